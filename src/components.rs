//!
//! # Component Entity & Port Model
//!
//! Defines the data structures shared by every synthesis algorithm:
//! [Component], [Port], [Connection], the single-result [Synthesis]
//! structure, the [Synthesize] capability dispatched over the closed
//! [ComponentKind] variant set, and the [ComponentRegistry] mapping type
//! tags to parameter decoders.
//!

// Std-Lib
use std::collections::{BTreeMap, HashMap};

// Crates.io
use enum_dispatch::enum_dispatch;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// Local Imports
use crate::error::{RfError, RfResult};
use crate::geom::{normalize_degrees, Point, Polygon};
use crate::passive::{
    InterdigitatedCapacitor, MimCapacitor, ParallelPlateCapacitor, SolenoidInductor,
    SpiralInductor, SymmetricInductor,
};
use crate::pdk::{LayerRef, LayerSpec, Pdk};
use crate::structures::{BranchLineCoupler, RatRaceCoupler, WilkinsonDivider};
use crate::tlines::{
    CpwBend, CpwLine, CpwTaper, CurvedMicrostripLine, MicrostripLine, TaperedMicrostripLine,
};

/// # Component Port
///
/// A named, located, oriented connection point, used for placement and
/// routing intent. Positions are in the owning component's local frame until
/// the assembler places them globally.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Port {
    /// Port Name
    pub name: String,
    /// Location
    pub loc: Point,
    /// Width
    pub width: f64,
    /// Physical Layer
    pub layer: LayerSpec,
    /// Orientation (degrees, normalized into [0, 360))
    pub orientation: f64,
}
impl Port {
    /// Create a new [Port], normalizing `orientation` into [0, 360)
    pub fn new(
        name: impl Into<String>,
        loc: Point,
        width: f64,
        layer: LayerSpec,
        orientation: f64,
    ) -> Self {
        Self {
            name: name.into(),
            loc,
            width,
            layer,
            orientation: normalize_degrees(orientation),
        }
    }
}

/// # Logical Connection
///
/// Design intent linking one of our ports to a port on another component.
/// Carried through for external tooling (e.g. netlist export); the synthesis
/// engine neither resolves nor validates the referenced component or port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Connection {
    /// Name of the port on the owning component
    pub port: String,
    /// Name of the target component
    pub target: String,
    /// Name of the port on the target component
    pub target_port: String,
}

/// # Geometric Element
///
/// A closed [Polygon] paired with the physical layer it is drawn on.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Element {
    /// Physical Layer
    pub layer: LayerSpec,
    /// Closed Polygon
    pub inner: Polygon,
}

/// # Synthesis Result
///
/// The single authoritative output of one synthesis call: the polygon set and
/// the port table, both in the component's local frame. The component's
/// stored port table is assigned from this structure wholesale, so no stale
/// or duplicate entries can survive a re-synthesis.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Synthesis {
    /// Geometric Elements
    pub elems: Vec<Element>,
    /// Port Table, name-keyed
    pub ports: BTreeMap<String, Port>,
}
impl Synthesis {
    /// Create a new and empty [Synthesis]
    pub fn new() -> Self {
        Self::default()
    }
    /// Add a [Polygon] on physical layer `layer`
    pub fn add_polygon(&mut self, layer: LayerSpec, inner: Polygon) {
        self.elems.push(Element { layer, inner });
    }
    /// Add a [Port], inserting or overwriting by name
    pub fn add_port(
        &mut self,
        name: impl Into<String>,
        loc: Point,
        width: f64,
        layer: LayerSpec,
        orientation: f64,
    ) {
        let port = Port::new(name, loc, width, layer, orientation);
        self.ports.insert(port.name.clone(), port);
    }
}

/// # Component Family
///
/// Classification label only, not a behavioral hierarchy.
/// [Family::AdvancedStructure] currently has no concrete members but remains
/// as an extension point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Family {
    TransmissionLine,
    Passive,
    BasicStructure,
    AdvancedStructure,
}

/// # Synthesize Capability
///
/// The sole behavioral contract of a component kind: a pure function from
/// the typed parameters and an optionally-bound PDK to a [Synthesis] result.
/// Implementations must not hold or mutate any other state, so repeated
/// calls with equal inputs are byte-identical.
#[enum_dispatch]
pub trait Synthesize {
    /// Produce the polygon set and port table for these parameters
    fn synthesize(&self, pdk: Option<&Pdk>) -> RfResult<Synthesis>;
}

/// # Component Kind
///
/// The closed set of built-in component types, one tagged variant per type,
/// all dispatched through the single [Synthesize] capability.
#[enum_dispatch(Synthesize)]
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKind {
    // Transmission lines
    MicrostripLine(MicrostripLine),
    TaperedMicrostripLine(TaperedMicrostripLine),
    CurvedMicrostripLine(CurvedMicrostripLine),
    CpwLine(CpwLine),
    CpwBend(CpwBend),
    CpwTaper(CpwTaper),
    // Passive components
    SpiralInductor(SpiralInductor),
    SymmetricInductor(SymmetricInductor),
    SolenoidInductor(SolenoidInductor),
    MimCapacitor(MimCapacitor),
    InterdigitatedCapacitor(InterdigitatedCapacitor),
    ParallelPlateCapacitor(ParallelPlateCapacitor),
    // Basic structures
    WilkinsonDivider(WilkinsonDivider),
    BranchLineCoupler(BranchLineCoupler),
    RatRaceCoupler(RatRaceCoupler),
}
impl ComponentKind {
    /// The registry type-tag for this kind
    pub fn tag(&self) -> &'static str {
        match self {
            Self::MicrostripLine(_) => MicrostripLine::TAG,
            Self::TaperedMicrostripLine(_) => TaperedMicrostripLine::TAG,
            Self::CurvedMicrostripLine(_) => CurvedMicrostripLine::TAG,
            Self::CpwLine(_) => CpwLine::TAG,
            Self::CpwBend(_) => CpwBend::TAG,
            Self::CpwTaper(_) => CpwTaper::TAG,
            Self::SpiralInductor(_) => SpiralInductor::TAG,
            Self::SymmetricInductor(_) => SymmetricInductor::TAG,
            Self::SolenoidInductor(_) => SolenoidInductor::TAG,
            Self::MimCapacitor(_) => MimCapacitor::TAG,
            Self::InterdigitatedCapacitor(_) => InterdigitatedCapacitor::TAG,
            Self::ParallelPlateCapacitor(_) => ParallelPlateCapacitor::TAG,
            Self::WilkinsonDivider(_) => WilkinsonDivider::TAG,
            Self::BranchLineCoupler(_) => BranchLineCoupler::TAG,
            Self::RatRaceCoupler(_) => RatRaceCoupler::TAG,
        }
    }
    /// The classification [Family] for this kind
    pub fn family(&self) -> Family {
        match self {
            Self::MicrostripLine(_)
            | Self::TaperedMicrostripLine(_)
            | Self::CurvedMicrostripLine(_)
            | Self::CpwLine(_)
            | Self::CpwBend(_)
            | Self::CpwTaper(_) => Family::TransmissionLine,
            Self::SpiralInductor(_)
            | Self::SymmetricInductor(_)
            | Self::SolenoidInductor(_)
            | Self::MimCapacitor(_)
            | Self::InterdigitatedCapacitor(_)
            | Self::ParallelPlateCapacitor(_) => Family::Passive,
            Self::WilkinsonDivider(_) | Self::BranchLineCoupler(_) | Self::RatRaceCoupler(_) => {
                Family::BasicStructure
            }
        }
    }
}

/// # Component Instance
///
/// A named, placed instance of a [ComponentKind]. Constructed with an empty
/// port table; synthesis populates (and fully replaces) it.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Instance Name, unique within a design
    pub name: String,
    /// Typed Parameters, by concrete type
    pub kind: ComponentKind,
    /// Location of the local-frame origin in the design's global frame
    pub loc: Point,
    /// Angle of rotation (degrees), about the local origin
    pub rotation: f64,
    /// Port Table, populated by synthesis, in the local frame
    pub ports: BTreeMap<String, Port>,
    /// Declared Logical Connections
    pub connections: Vec<Connection>,
}
impl Component {
    /// Create a new [Component] at the origin, with no rotation,
    /// an empty port table, and no connections
    pub fn new(name: impl Into<String>, kind: impl Into<ComponentKind>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            loc: Point::default(),
            rotation: 0.0,
            ports: BTreeMap::new(),
            connections: Vec::new(),
        }
    }
    /// Add a logical connection to another component
    pub fn add_connection(
        &mut self,
        port: impl Into<String>,
        target: impl Into<String>,
        target_port: impl Into<String>,
    ) {
        self.connections.push(Connection {
            port: port.into(),
            target: target.into(),
            target_port: target_port.into(),
        });
    }
    /// Synthesize our geometry.
    ///
    /// Pure in the parameters and `pdk`; refreshes the stored port table by
    /// assignment from the single [Synthesis] result, so calling twice with
    /// equal inputs yields identical ports and polygons.
    pub fn synthesize(&mut self, pdk: Option<&Pdk>) -> RfResult<Synthesis> {
        let synth = self.kind.synthesize(pdk)?;
        self.ports = synth.ports.clone();
        Ok(synth)
    }
}

/// Parameter-decoder function type: open parameter map in, typed kind out
pub type ParamDecoder = fn(serde_yaml::Value) -> RfResult<ComponentKind>;

/// Decode the open parameter map `params` into kind `T`
fn decode_params<T>(params: serde_yaml::Value) -> RfResult<ComponentKind>
where
    T: DeserializeOwned + Into<ComponentKind>,
{
    let typed: T = serde_yaml::from_value(params)
        .map_err(|e| RfError::Parameter(e.to_string()))?;
    Ok(typed.into())
}

/// The built-in (tag, decoder) pairs, in registration order
const BUILTINS: [(&str, ParamDecoder); 15] = [
    (MicrostripLine::TAG, decode_params::<MicrostripLine>),
    (
        TaperedMicrostripLine::TAG,
        decode_params::<TaperedMicrostripLine>,
    ),
    (
        CurvedMicrostripLine::TAG,
        decode_params::<CurvedMicrostripLine>,
    ),
    (CpwLine::TAG, decode_params::<CpwLine>),
    (CpwBend::TAG, decode_params::<CpwBend>),
    (CpwTaper::TAG, decode_params::<CpwTaper>),
    (SpiralInductor::TAG, decode_params::<SpiralInductor>),
    (SymmetricInductor::TAG, decode_params::<SymmetricInductor>),
    (SolenoidInductor::TAG, decode_params::<SolenoidInductor>),
    (MimCapacitor::TAG, decode_params::<MimCapacitor>),
    (
        InterdigitatedCapacitor::TAG,
        decode_params::<InterdigitatedCapacitor>,
    ),
    (
        ParallelPlateCapacitor::TAG,
        decode_params::<ParallelPlateCapacitor>,
    ),
    (WilkinsonDivider::TAG, decode_params::<WilkinsonDivider>),
    (BranchLineCoupler::TAG, decode_params::<BranchLineCoupler>),
    (RatRaceCoupler::TAG, decode_params::<RatRaceCoupler>),
];

/// # Component Type Registry
///
/// Maps type tags to parameter decoders. Built once at startup, read-only
/// thereafter, and safe to query concurrently. Registering a second decoder
/// under an existing tag is a configuration error, never a silent
/// replacement.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    decoders: HashMap<String, ParamDecoder>,
}
impl ComponentRegistry {
    /// Create a new and empty [ComponentRegistry]
    pub fn new() -> Self {
        Self::default()
    }
    /// Create a [ComponentRegistry] with all built-in types registered
    pub fn with_builtins() -> Self {
        let mut registry = Self::default();
        for (tag, decoder) in BUILTINS {
            // Built-in tags are distinct by construction; insertion cannot fail
            registry.decoders.insert(tag.to_string(), decoder);
        }
        registry
    }
    /// Register `decoder` under `tag`.
    /// Fails with a configuration error if `tag` is already registered.
    pub fn register(&mut self, tag: impl Into<String>, decoder: ParamDecoder) -> RfResult<()> {
        let tag = tag.into();
        if self.decoders.contains_key(&tag) {
            return Err(RfError::Config(format!(
                "component type \"{}\" is already registered",
                tag
            )));
        }
        self.decoders.insert(tag, decoder);
        Ok(())
    }
    /// Get the decoder registered for `tag`
    pub fn resolve(&self, tag: &str) -> RfResult<ParamDecoder> {
        match self.decoders.get(tag) {
            Some(decoder) => Ok(*decoder),
            None => Err(RfError::UnknownType(tag.to_string())),
        }
    }
    /// Decode `params` through the decoder registered for `tag`
    pub fn decode(&self, tag: &str, params: serde_yaml::Value) -> RfResult<ComponentKind> {
        (self.resolve(tag)?)(params)
    }
}

/// Require `value` to be strictly positive, for parameter validation
pub(crate) fn require_positive(name: &str, value: f64) -> RfResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(RfError::Parameter(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

// Shared serde parameter defaults, matching the reference component set
pub(crate) fn default_layer() -> LayerRef {
    LayerRef::Spec(LayerSpec(1, 0))
}
pub(crate) fn default_layer2() -> LayerRef {
    LayerRef::Spec(LayerSpec(2, 0))
}
pub(crate) fn default_layer3() -> LayerRef {
    LayerRef::Spec(LayerSpec(3, 0))
}
pub(crate) fn default_ground_width() -> f64 {
    10.0
}
pub(crate) fn default_angle() -> f64 {
    90.0
}
pub(crate) fn default_via_size() -> f64 {
    1.0
}
