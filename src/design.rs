//!
//! # Design & Assembly
//!
//! Defines the top-level [Design] entity, PDK binding, and the assembler
//! turning a component list into a placed, serializable [Layout].
//!

// Std-Lib
use std::collections::BTreeMap;

// Crates.io
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// Local Imports
use crate::components::{Component, Element, Port};
use crate::error::RfResult;
use crate::geom::{normalize_degrees, Transform};
use crate::pdk::{Pdk, PdkRegistry};
use crate::ptr::Ptr;
use crate::ser::SerdeFile;

/// # RF Design
///
/// A named, ordered list of placed [Component]s targeting one technology.
/// Holds an optional shared [Pdk] handle once [Design::bind_pdk] has run.
#[derive(Debug, Clone, Default)]
pub struct Design {
    /// Design Name
    pub name: String,
    /// Technology Name, resolved against a [PdkRegistry]
    pub technology: String,
    /// Distance Units, descriptive only
    pub units: String,
    /// Placed Components, in document order
    pub components: Vec<Component>,
    /// Free-Form Metadata, passed through untouched
    pub metadata: BTreeMap<String, serde_yaml::Value>,
    /// Bound PDK handle
    pub pdk: Option<Ptr<Pdk>>,
}
impl Design {
    /// Create a new and empty [Design] in technology `technology`
    pub fn new(name: impl Into<String>, technology: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            technology: technology.into(),
            units: "um".to_string(),
            ..Default::default()
        }
    }
    /// Add a [Component], keeping document order
    pub fn add_component(&mut self, component: Component) {
        self.components.push(component);
    }
    /// Resolve our technology name against `registry` and store the shared
    /// handle. Performed once, explicitly, before assembly.
    pub fn bind_pdk(&mut self, registry: &PdkRegistry) -> RfResult<()> {
        self.pdk = Some(registry.get(&self.technology)?);
        Ok(())
    }
    /// Assemble the design into a placed [Layout].
    ///
    /// Components are synthesized in document order, each in its own local
    /// frame, then rotated about its local origin and translated to its
    /// location. Any single failure aborts the whole assembly.
    pub fn assemble(&mut self) -> RfResult<Layout> {
        let pdk_ptr = self.pdk.clone();
        let pdk_guard = match &pdk_ptr {
            Some(ptr) => Some(ptr.read()?),
            None => None,
        };
        let pdk: Option<&Pdk> = pdk_guard.as_deref();

        let mut cells = Vec::with_capacity(self.components.len());
        for component in self.components.iter_mut() {
            let synth = component.synthesize(pdk)?;
            let trans = Transform::placement(&component.loc, component.rotation);
            let elems = synth
                .elems
                .iter()
                .map(|e| Element {
                    layer: e.layer,
                    inner: e.inner.transform(&trans),
                })
                .collect();
            let ports = synth
                .ports
                .values()
                .map(|p| {
                    let placed = Port {
                        name: p.name.clone(),
                        loc: p.loc.transform(&trans),
                        width: p.width,
                        layer: p.layer,
                        orientation: normalize_degrees(p.orientation + component.rotation),
                    };
                    (placed.name.clone(), placed)
                })
                .collect();
            cells.push(Cell {
                name: component.name.clone(),
                elems,
                ports,
            });
        }
        Ok(Layout {
            name: self.name.clone(),
            cells,
        })
    }
}

/// # Placed Cell
///
/// One component's assembled output: its polygons and ports, both in the
/// design's global frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Cell {
    /// Source Component Name
    pub name: String,
    /// Placed Geometric Elements
    pub elems: Vec<Element>,
    /// Placed Port Table
    pub ports: BTreeMap<String, Port>,
}

/// # Assembled Layout
///
/// The serializable result of [Design::assemble]: one [Cell] per component,
/// in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Layout {
    /// Design Name
    pub name: String,
    /// Placed Cells, in document order
    pub cells: Vec<Cell>,
}
impl SerdeFile for Layout {}
impl Layout {
    /// Total polygon count across all cells
    pub fn num_elems(&self) -> usize {
        self.cells.iter().map(|c| c.elems.len()).sum()
    }
}
