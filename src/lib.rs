//!
//! # rf21
//!
//! Parametric RF & microwave layout generation.
//!
//! Turns a declarative description of an RF circuit - named component
//! instances, their parameters, placement, and logical port connections -
//! into exact 2D fabrication geometry: closed polygons tagged with physical
//! (layer, datatype) pairs, plus named connection points ("ports") with
//! position, width, and orientation.
//!
//! The crate is organized around a handful of cooperating pieces:
//!
//! * [`pdk`] - named physical layers and design rules for one technology,
//!   and resolution of symbolic layer references to physical pairs.
//! * [`components`] - the component entity & port model, the `Synthesize`
//!   capability, and the component-type registry.
//! * [`tlines`], [`passive`], [`structures`] - the per-type geometry
//!   synthesis algorithms.
//! * [`design`] - the design assembler, composing placed components into one
//!   top-level [`design::Layout`].
//! * [`yaml`] - the design-document loader.
//!

pub mod error;
pub use error::*;

pub mod ptr;
pub use ptr::*;

pub mod ser;
pub use ser::*;

pub mod geom;
pub use geom::*;

pub mod pdk;
pub use pdk::*;

pub mod components;
pub use components::*;

pub mod tlines;
pub use tlines::*;

pub mod passive;
pub use passive::*;

pub mod structures;
pub use structures::*;

pub mod design;
pub use design::*;

pub mod yaml;
pub use yaml::{load_design, parse_design, validate_document};

#[cfg(test)]
mod tests;
