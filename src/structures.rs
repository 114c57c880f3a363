//!
//! # Power Dividers & Hybrid Couplers
//!
//! Synthesis algorithms for the multi-port structure family: the Wilkinson
//! divider, the branch-line (90 degree hybrid) coupler, and the rat-race
//! (180 degree hybrid) coupler.
//!

// Std-Lib
use std::f64::consts::{FRAC_PI_2, TAU};

// Crates.io
use serde::{Deserialize, Serialize};

// Local Imports
use crate::components::{default_layer, default_layer2, require_positive, Synthesis, Synthesize};
use crate::error::RfResult;
use crate::geom::{annulus_sector, Point, Polygon};
use crate::pdk::{LayerRef, Pdk};

/// Arc sampling for the divider's quarter-wave rings
const QUARTER_RING_POINTS: usize = 50;
/// Arc sampling for the rat-race ring
const FULL_RING_POINTS: usize = 100;

/// # Wilkinson Power Divider
///
/// An input stub feeding two quarter-wave ring arms that rejoin at the two
/// output stubs, with an isolation resistor bridging the outputs on a
/// separate layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WilkinsonDivider {
    /// Radius of the quarter-wave arms
    pub radius: f64,
    /// Transmission-Line Width
    pub width: f64,
    /// Isolation-Resistor Width
    pub isolation_resistor_width: f64,
    /// Isolation-Resistor Length
    pub isolation_resistor_length: f64,
    /// Conductor Layer
    #[serde(default = "default_layer")]
    pub layer: LayerRef,
    /// Resistor Layer
    #[serde(default = "default_layer2")]
    pub resistor_layer: LayerRef,
}
impl WilkinsonDivider {
    pub const TAG: &'static str = "wilkinson_divider";
}
impl Synthesize for WilkinsonDivider {
    fn synthesize(&self, pdk: Option<&Pdk>) -> RfResult<Synthesis> {
        require_positive("radius", self.radius)?;
        require_positive("width", self.width)?;
        require_positive("isolation_resistor_width", self.isolation_resistor_width)?;
        require_positive("isolation_resistor_length", self.isolation_resistor_length)?;
        let layer = self.layer.resolve(pdk)?;
        let resistor_layer = self.resistor_layer.resolve(pdk)?;

        let r = self.radius;
        let half_w = self.width / 2.;
        let stub = r / 2.;
        let mut synth = Synthesis::new();
        // Input stub
        synth.add_polygon(
            layer,
            Polygon::rect(Point::new(-stub, -half_w), Point::new(0., half_w)),
        );
        // Upper & lower quarter-wave arms
        synth.add_polygon(
            layer,
            annulus_sector(r - half_w, r + half_w, 0., FRAC_PI_2, QUARTER_RING_POINTS),
        );
        synth.add_polygon(
            layer,
            annulus_sector(r - half_w, r + half_w, -FRAC_PI_2, 0., QUARTER_RING_POINTS),
        );
        // Output stubs
        synth.add_polygon(
            layer,
            Polygon::rect(Point::new(r, r - half_w), Point::new(r + stub, r + half_w)),
        );
        synth.add_polygon(
            layer,
            Polygon::rect(Point::new(r, -r - half_w), Point::new(r + stub, -r + half_w)),
        );
        // Isolation resistor, bridging the two output stubs
        let half_rw = self.isolation_resistor_width / 2.;
        let rl = self.isolation_resistor_length;
        synth.add_polygon(
            resistor_layer,
            Polygon::new(vec![
                Point::new(r, r - half_rw),
                Point::new(r, -r + half_rw),
                Point::new(r + rl, -r + half_rw),
                Point::new(r + rl, r - half_rw),
            ]),
        );
        synth.add_port("in", Point::new(-stub, 0.), self.width, layer, 180.);
        synth.add_port("out1", Point::new(r + stub, r), self.width, layer, 0.);
        synth.add_port("out2", Point::new(r + stub, -r), self.width, layer, 0.);
        Ok(synth)
    }
}

/// # Branch-Line Coupler
///
/// The 90 degree hybrid: four line sections forming a square of side `size`,
/// with a port at each corner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BranchLineCoupler {
    /// Side Length of the square
    pub size: f64,
    /// Transmission-Line Width
    pub width: f64,
    /// Conductor Layer
    #[serde(default = "default_layer")]
    pub layer: LayerRef,
}
impl BranchLineCoupler {
    pub const TAG: &'static str = "branch_line_coupler";
}
impl Synthesize for BranchLineCoupler {
    fn synthesize(&self, pdk: Option<&Pdk>) -> RfResult<Synthesis> {
        require_positive("size", self.size)?;
        require_positive("width", self.width)?;
        let layer = self.layer.resolve(pdk)?;

        let s = self.size;
        let half_w = self.width / 2.;
        let mut synth = Synthesis::new();
        // Top, right, bottom, and left sides
        synth.add_polygon(
            layer,
            Polygon::rect(Point::new(0., s - half_w), Point::new(s, s + half_w)),
        );
        synth.add_polygon(
            layer,
            Polygon::rect(Point::new(s - half_w, 0.), Point::new(s + half_w, s)),
        );
        synth.add_polygon(
            layer,
            Polygon::rect(Point::new(0., -half_w), Point::new(s, half_w)),
        );
        synth.add_polygon(
            layer,
            Polygon::rect(Point::new(-half_w, 0.), Point::new(half_w, s)),
        );
        synth.add_port("p1", Point::new(-half_w, 0.), self.width, layer, 180.);
        synth.add_port("p2", Point::new(s, -half_w), self.width, layer, 270.);
        synth.add_port("p3", Point::new(s + half_w, s), self.width, layer, 0.);
        synth.add_port("p4", Point::new(0., s + half_w), self.width, layer, 90.);
        Ok(synth)
    }
}

/// # Rat-Race Coupler
///
/// The 180 degree hybrid: a full ring at center-line radius `radius` with
/// four radial leads at the cardinal angles, each half a radius long.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatRaceCoupler {
    /// Center-Line Radius of the ring
    pub radius: f64,
    /// Transmission-Line Width
    pub width: f64,
    /// Conductor Layer
    #[serde(default = "default_layer")]
    pub layer: LayerRef,
}
impl RatRaceCoupler {
    pub const TAG: &'static str = "rat_race_coupler";
}
impl Synthesize for RatRaceCoupler {
    fn synthesize(&self, pdk: Option<&Pdk>) -> RfResult<Synthesis> {
        require_positive("radius", self.radius)?;
        require_positive("width", self.width)?;
        let layer = self.layer.resolve(pdk)?;

        let r = self.radius;
        let half_w = self.width / 2.;
        let mut synth = Synthesis::new();
        synth.add_polygon(
            layer,
            annulus_sector(r - half_w, r + half_w, 0., TAU, FULL_RING_POINTS),
        );
        // Radial leads & ports at the four cardinal angles
        let lead = r / 2.;
        for (i, angle_deg) in [0., 90., 180., 270.].into_iter().enumerate() {
            let angle = f64::to_radians(angle_deg);
            let (dx, dy) = (angle.cos(), angle.sin());
            let (x, y) = (r * dx, r * dy);
            synth.add_polygon(
                layer,
                Polygon::new(vec![
                    Point::new(x - half_w * dy, y + half_w * dx),
                    Point::new(x + lead * dx - half_w * dy, y + lead * dy + half_w * dx),
                    Point::new(x + lead * dx + half_w * dy, y + lead * dy - half_w * dx),
                    Point::new(x + half_w * dy, y - half_w * dx),
                ]),
            );
            synth.add_port(
                format!("p{}", i + 1),
                Point::new(x + lead * dx, y + lead * dy),
                self.width,
                layer,
                angle_deg,
            );
        }
        Ok(synth)
    }
}
