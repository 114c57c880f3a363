//!
//! # PDK Module
//!
//! Defines the process-design-kit data model: named physical [Layer]s,
//! numeric design rules, symbolic-layer resolution, and the [PdkRegistry]
//! mapping technology names to [Pdk] instances.
//!

// Std-Lib
use std::collections::HashMap;

// Crates.io
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// Local Imports
use crate::error::{RfError, RfResult};
use crate::ptr::Ptr;

/// # Layer Specification
/// As in seemingly every layout system, this uses two numbers to identify
/// each physical layer: a layer number and a datatype number.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct LayerSpec(pub i16, pub i16);
impl LayerSpec {
    pub fn new(n1: i16, n2: i16) -> Self {
        Self(n1, n2)
    }
    /// Layer number
    pub fn layer(&self) -> i16 {
        self.0
    }
    /// Datatype number
    pub fn datatype(&self) -> i16 {
        self.1
    }
}

/// # Physical Layer Definition
///
/// Immutable once defined; created when its [Pdk] is constructed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Layer {
    /// Symbolic Name
    pub name: String,
    /// Layer Number
    pub layernum: i16,
    /// Datatype Number
    pub datatype: i16,
    /// Human-Readable Description
    pub description: String,
}
impl Layer {
    /// Create a new [Layer]
    pub fn new(
        name: impl Into<String>,
        layernum: i16,
        datatype: i16,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            layernum,
            datatype,
            description: description.into(),
        }
    }
    /// Physical (layer, datatype) pair
    pub fn spec(&self) -> LayerSpec {
        LayerSpec(self.layernum, self.datatype)
    }
}

/// # Layer Reference
///
/// Either a literal physical (layer, datatype) pair, or a symbolic name to be
/// resolved against a bound [Pdk]. Literal pairs bypass the layer table
/// entirely, which lets components work with or without a bound PDK.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LayerRef {
    /// Literal (layer, datatype) pair
    Spec(LayerSpec),
    /// Symbolic layer name, resolved against the bound PDK
    Name(String),
}
impl LayerRef {
    /// Resolve to a physical [LayerSpec].
    ///
    /// Literal pairs are returned unchanged, with or without a PDK.
    /// Symbolic names require a bound PDK with a matching table entry;
    /// anything else is an [RfError::UnknownLayer], never a silent default.
    pub fn resolve(&self, pdk: Option<&Pdk>) -> RfResult<LayerSpec> {
        match self {
            LayerRef::Spec(spec) => Ok(*spec),
            LayerRef::Name(name) => match pdk {
                Some(pdk) => pdk.layer(name),
                None => Err(RfError::UnknownLayer(format!(
                    "symbolic layer \"{}\" used with no PDK bound",
                    name
                ))),
            },
        }
    }
}
impl From<LayerSpec> for LayerRef {
    fn from(spec: LayerSpec) -> Self {
        Self::Spec(spec)
    }
}
impl From<&str> for LayerRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

/// # Process Design Kit
///
/// A named table of symbolic layer names and numeric design rules for one
/// fabrication technology. Constructed once, read-only thereafter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Pdk {
    /// Technology Name
    pub name: String,
    /// Human-Readable Description
    pub description: String,
    /// Name => Layer Lookup
    layers: HashMap<String, Layer>,
    /// Name => Design-Rule Value Lookup
    design_rules: HashMap<String, f64>,
}
impl Pdk {
    /// Create a new and empty [Pdk]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Default::default()
        }
    }
    /// Add a [Layer]. Layer names are unique per technology;
    /// re-adding an existing name is a configuration error.
    pub fn add_layer(&mut self, layer: Layer) -> RfResult<()> {
        if self.layers.contains_key(&layer.name) {
            return Err(RfError::Config(format!(
                "duplicate layer \"{}\" in PDK \"{}\"",
                layer.name, self.name
            )));
        }
        self.layers.insert(layer.name.clone(), layer);
        Ok(())
    }
    /// Add a named design rule
    pub fn add_design_rule(&mut self, name: impl Into<String>, value: f64) {
        self.design_rules.insert(name.into(), value);
    }
    /// Get the physical (layer, datatype) pair for symbolic layer `name`
    pub fn layer(&self, name: &str) -> RfResult<LayerSpec> {
        match self.layers.get(name) {
            Some(layer) => Ok(layer.spec()),
            None => Err(RfError::UnknownLayer(format!(
                "\"{}\" not found in PDK \"{}\"",
                name, self.name
            ))),
        }
    }
    /// Get the numeric value of design rule `name`
    pub fn design_rule(&self, name: &str) -> RfResult<f64> {
        match self.design_rules.get(name) {
            Some(value) => Ok(*value),
            None => Err(RfError::UnknownRule(format!(
                "\"{}\" not found in PDK \"{}\"",
                name, self.name
            ))),
        }
    }
    /// Create the reference "generic" PDK: ten numbered layers and the
    /// default minimum-width/spacing rule set.
    pub fn generic() -> Self {
        let mut pdk = Pdk::new("generic", "Generic PDK with basic layers for RF designs");
        let layers = [
            ("metal1", 1, "Metal 1 layer"),
            ("metal2", 2, "Metal 2 layer"),
            ("metal3", 3, "Metal 3 layer"),
            ("via12", 4, "Via between Metal 1 and Metal 2"),
            ("via23", 5, "Via between Metal 2 and Metal 3"),
            ("resistor", 6, "Resistor layer"),
            ("dielectric", 7, "Dielectric layer"),
            ("substrate", 8, "Substrate layer"),
            ("text", 9, "Text layer"),
            ("drawing", 10, "Drawing layer"),
        ];
        for (name, num, desc) in layers {
            // Names are distinct by construction; insertion cannot fail
            pdk.layers.insert(name.into(), Layer::new(name, num, 0, desc));
        }
        // Minimum widths & spacings per metal and via layer
        for metal in ["metal1", "metal2", "metal3", "via12", "via23"] {
            pdk.add_design_rule(format!("min_width_{}", metal), 2.0);
            pdk.add_design_rule(format!("min_spacing_{}", metal), 2.0);
        }
        // RF-specific rules, per element category
        for element in ["transmission_line", "inductor", "capacitor"] {
            pdk.add_design_rule(format!("min_{}_width", element), 5.0);
            pdk.add_design_rule(format!("min_{}_spacing", element), 5.0);
        }
        pdk
    }
}

/// # PDK Registry
///
/// Maps technology names to shared [Pdk] handles. Built once at startup and
/// read-only thereafter; runtime registration of a duplicate name fails
/// loudly rather than silently replacing an entry.
#[derive(Debug, Clone, Default)]
pub struct PdkRegistry {
    pdks: HashMap<String, Ptr<Pdk>>,
}
impl PdkRegistry {
    /// Create a new and empty [PdkRegistry]
    pub fn new() -> Self {
        Self::default()
    }
    /// Create a [PdkRegistry] with the built-in technologies registered
    pub fn with_builtins() -> Self {
        let mut registry = Self::default();
        let generic = Pdk::generic();
        // The sole built-in; its name cannot collide in an empty registry
        registry.pdks.insert(generic.name.clone(), Ptr::new(generic));
        registry
    }
    /// Register `pdk` under its technology name.
    /// Fails with a configuration error if the name is already registered.
    pub fn register(&mut self, pdk: Pdk) -> RfResult<()> {
        if self.pdks.contains_key(&pdk.name) {
            return Err(RfError::Config(format!(
                "PDK \"{}\" is already registered",
                pdk.name
            )));
        }
        self.pdks.insert(pdk.name.clone(), Ptr::new(pdk));
        Ok(())
    }
    /// Get a shared handle to the [Pdk] registered for `technology`
    pub fn get(&self, technology: &str) -> RfResult<Ptr<Pdk>> {
        match self.pdks.get(technology) {
            Some(pdk) => Ok(pdk.clone()),
            None => Err(RfError::UnknownTechnology(technology.to_string())),
        }
    }
}
