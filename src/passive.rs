//!
//! # Passive Components
//!
//! Synthesis algorithms for the lumped-passive family: spiral, symmetric,
//! and solenoid inductors, and MIM, interdigitated, and parallel-plate
//! capacitors.
//!

// Std-Lib
use std::f64::consts::{FRAC_PI_2, TAU};

// Crates.io
use serde::{Deserialize, Serialize};

// Local Imports
use crate::components::{
    default_layer, default_layer2, default_layer3, default_via_size, require_positive, Synthesis,
    Synthesize,
};
use crate::error::{RfError, RfResult};
use crate::geom::{linspace, normalize_degrees, render_trace, spiral_point_count, Point, Polygon};
use crate::pdk::{LayerRef, Pdk};

/// Sample an Archimedean spiral center-line: radius grows by `spacing` per
/// full turn, starting at `inner_radius` on the positive x-axis.
fn spiral_centerline(n_turns: f64, spacing: f64, inner_radius: f64) -> Vec<Point> {
    let n = spiral_point_count(n_turns);
    linspace(0., TAU * n_turns, n)
        .into_iter()
        .map(|t| {
            let r = inner_radius + spacing * t / TAU;
            Point::new(r * t.cos(), r * t.sin())
        })
        .collect()
}

/// # Spiral Inductor
///
/// A single-ended Archimedean spiral with a straight lead from the outer end
/// of the winding to clear the footprint. The inner port is left for an
/// underpass or bond to reach.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpiralInductor {
    /// Number of turns, fractional turns allowed
    pub n_turns: f64,
    /// Trace Width
    pub width: f64,
    /// Center-Line Spacing per turn
    pub spacing: f64,
    /// Inner Radius, where the winding starts
    pub inner_radius: f64,
    /// Conductor Layer
    #[serde(default = "default_layer")]
    pub layer: LayerRef,
}
impl SpiralInductor {
    pub const TAG: &'static str = "spiral_inductor";
}
impl Synthesize for SpiralInductor {
    fn synthesize(&self, pdk: Option<&Pdk>) -> RfResult<Synthesis> {
        require_positive("n_turns", self.n_turns)?;
        require_positive("width", self.width)?;
        require_positive("spacing", self.spacing)?;
        require_positive("inner_radius", self.inner_radius)?;
        let layer = self.layer.resolve(pdk)?;

        let pts = spiral_centerline(self.n_turns, self.spacing, self.inner_radius);
        let mut synth = Synthesis::new();
        synth.add_polygon(layer, render_trace(&pts, self.width));

        // Straight lead from the winding's outer end, perpendicular to the
        // local radius, long enough to clear the outer turn
        let end = pts[pts.len() - 1];
        let end_angle = (TAU * self.n_turns).rem_euclid(TAU);
        let (dir_x, dir_y) = ((end_angle + FRAC_PI_2).cos(), (end_angle + FRAC_PI_2).sin());
        let outer_radius = self.inner_radius + self.spacing * self.n_turns;
        let lead_length = outer_radius + self.width;
        let lead_end = Point::new(end.x + dir_x * lead_length, end.y + dir_y * lead_length);
        synth.add_polygon(layer, render_trace(&[end, lead_end], self.width));

        synth.add_port("in", pts[0], self.width, layer, 0.);
        synth.add_port(
            "out",
            lead_end,
            self.width,
            layer,
            normalize_degrees(end_angle.to_degrees() + 90.),
        );
        Ok(synth)
    }
}

/// # Symmetric Spiral Inductor
///
/// The same winding as [SpiralInductor], plus an underpass on a second layer
/// running from outside the footprint to the winding's inner end, putting
/// the two ports on opposite sides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymmetricInductor {
    /// Number of turns, fractional turns allowed
    pub n_turns: f64,
    /// Trace Width
    pub width: f64,
    /// Center-Line Spacing per turn
    pub spacing: f64,
    /// Inner Radius, where the winding starts
    pub inner_radius: f64,
    /// Underpass Conductor Layer
    #[serde(default = "default_layer2")]
    pub underpass_layer: LayerRef,
    /// Winding Conductor Layer
    #[serde(default = "default_layer")]
    pub layer: LayerRef,
}
impl SymmetricInductor {
    pub const TAG: &'static str = "symmetric_inductor";
}
impl Synthesize for SymmetricInductor {
    fn synthesize(&self, pdk: Option<&Pdk>) -> RfResult<Synthesis> {
        require_positive("n_turns", self.n_turns)?;
        require_positive("width", self.width)?;
        require_positive("spacing", self.spacing)?;
        require_positive("inner_radius", self.inner_radius)?;
        let layer = self.layer.resolve(pdk)?;
        let underpass_layer = self.underpass_layer.resolve(pdk)?;

        let pts = spiral_centerline(self.n_turns, self.spacing, self.inner_radius);
        let mut synth = Synthesis::new();
        synth.add_polygon(layer, render_trace(&pts, self.width));

        // Underpass from outside the footprint to the winding's inner end
        let outer_radius = self.inner_radius + self.spacing * self.n_turns;
        let under_start = Point::new(-outer_radius - self.width, 0.);
        let under_end = Point::new(-self.inner_radius, 0.);
        synth.add_polygon(underpass_layer, render_trace(&[under_start, under_end], self.width));

        synth.add_port("p1", pts[0], self.width, layer, 0.);
        synth.add_port("p2", under_start, self.width, underpass_layer, 180.);
        Ok(synth)
    }
}

/// # Solenoid Inductor
///
/// A two-layer solenoid wound along the x-axis: each turn is one segment on
/// the top layer and one on the bottom, offset to opposite sides of the
/// winding diameter, with a via joining consecutive turns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SolenoidInductor {
    /// Number of turns
    pub n_turns: u32,
    /// Trace Width
    pub width: f64,
    /// Winding Length, along the axis
    pub length: f64,
    /// Winding Diameter
    pub diameter: f64,
    /// Via Square Side
    #[serde(default = "default_via_size")]
    pub via_size: f64,
    /// Top Metal Layer
    #[serde(default = "default_layer")]
    pub top_layer: LayerRef,
    /// Bottom Metal Layer
    #[serde(default = "default_layer2")]
    pub bottom_layer: LayerRef,
    /// Via Layer
    #[serde(default = "default_layer3")]
    pub via_layer: LayerRef,
}
impl SolenoidInductor {
    pub const TAG: &'static str = "solenoid_inductor";
}
impl Synthesize for SolenoidInductor {
    fn synthesize(&self, pdk: Option<&Pdk>) -> RfResult<Synthesis> {
        if self.n_turns == 0 {
            return Err(RfError::Parameter("n_turns must be at least 1".into()));
        }
        require_positive("width", self.width)?;
        require_positive("length", self.length)?;
        require_positive("diameter", self.diameter)?;
        require_positive("via_size", self.via_size)?;
        let top_layer = self.top_layer.resolve(pdk)?;
        let bottom_layer = self.bottom_layer.resolve(pdk)?;
        let via_layer = self.via_layer.resolve(pdk)?;

        let n = self.n_turns as usize;
        let segment = self.length / n as f64;
        let half_d = self.diameter / 2.;
        let half_w = self.width / 2.;
        let half_v = self.via_size / 2.;
        let mut synth = Synthesis::new();
        for i in 0..n {
            let x0 = i as f64 * segment;
            let x1 = (i + 1) as f64 * segment;
            // Even turns run the top conductor on the near side and the
            // bottom on the far side; odd turns swap
            let (top_y, bottom_y) = if i % 2 == 0 {
                (-half_d, half_d)
            } else {
                (half_d, -half_d)
            };
            synth.add_polygon(
                top_layer,
                Polygon::rect(Point::new(x0, top_y - half_w), Point::new(x1, top_y + half_w)),
            );
            synth.add_polygon(
                bottom_layer,
                Polygon::rect(
                    Point::new(x0, bottom_y - half_w),
                    Point::new(x1, bottom_y + half_w),
                ),
            );
            // Via joining this turn to the next
            if i < n - 1 {
                synth.add_polygon(
                    via_layer,
                    Polygon::rect(
                        Point::new(x1 - half_v, top_y - half_v),
                        Point::new(x1 + half_v, top_y + half_v),
                    ),
                );
            }
        }
        let p1_y = if n % 2 == 0 { half_d } else { -half_d };
        let p2_y = if n % 2 == 1 { half_d } else { -half_d };
        synth.add_port("p1", Point::new(0., p1_y), self.width, bottom_layer, 180.);
        synth.add_port("p2", Point::new(self.length, p2_y), self.width, top_layer, 0.);
        Ok(synth)
    }
}

/// # Metal-Insulator-Metal Capacitor
///
/// Stacked plates on two metal layers with a dielectric cut between them.
/// The bottom plate extends one unit beyond the top plate on every side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MimCapacitor {
    /// Plate Width
    pub width: f64,
    /// Plate Length
    pub length: f64,
    /// Top Metal Layer
    #[serde(default = "default_layer")]
    pub top_layer: LayerRef,
    /// Bottom Metal Layer
    #[serde(default = "default_layer2")]
    pub bottom_layer: LayerRef,
    /// Dielectric Layer
    #[serde(default = "default_layer3")]
    pub dielectric_layer: LayerRef,
}
impl MimCapacitor {
    pub const TAG: &'static str = "mim_capacitor";
    /// Bottom-plate overhang beyond the top plate, per side
    const BOTTOM_MARGIN: f64 = 1.0;
}
impl Synthesize for MimCapacitor {
    fn synthesize(&self, pdk: Option<&Pdk>) -> RfResult<Synthesis> {
        require_positive("width", self.width)?;
        require_positive("length", self.length)?;
        let top_layer = self.top_layer.resolve(pdk)?;
        let bottom_layer = self.bottom_layer.resolve(pdk)?;
        let dielectric_layer = self.dielectric_layer.resolve(pdk)?;

        let half_w = self.width / 2.;
        let margin = Self::BOTTOM_MARGIN;
        let mut synth = Synthesis::new();
        synth.add_polygon(
            bottom_layer,
            Polygon::rect(
                Point::new(-margin, -half_w - margin),
                Point::new(self.length + margin, half_w + margin),
            ),
        );
        synth.add_polygon(
            dielectric_layer,
            Polygon::rect(Point::new(0., -half_w), Point::new(self.length, half_w)),
        );
        synth.add_polygon(
            top_layer,
            Polygon::rect(Point::new(0., -half_w), Point::new(self.length, half_w)),
        );
        synth.add_port(
            "p1",
            Point::new(self.length / 2., half_w + margin),
            self.width / 4.,
            top_layer,
            90.,
        );
        synth.add_port(
            "p2",
            Point::new(self.length / 2., -half_w - margin),
            self.width / 4.,
            bottom_layer,
            270.,
        );
        Ok(synth)
    }
}

/// # Interdigitated Capacitor
///
/// Two bus bars bridged by `n_fingers` parallel fingers, all on one layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InterdigitatedCapacitor {
    /// Number of fingers
    pub n_fingers: u32,
    /// Finger Length
    pub finger_length: f64,
    /// Finger Width
    pub finger_width: f64,
    /// Finger-To-Finger Spacing
    pub finger_spacing: f64,
    /// Conductor Layer
    #[serde(default = "default_layer")]
    pub layer: LayerRef,
}
impl InterdigitatedCapacitor {
    pub const TAG: &'static str = "interdigitated_capacitor";
}
impl Synthesize for InterdigitatedCapacitor {
    fn synthesize(&self, pdk: Option<&Pdk>) -> RfResult<Synthesis> {
        if self.n_fingers == 0 {
            return Err(RfError::Parameter("n_fingers must be at least 1".into()));
        }
        require_positive("finger_length", self.finger_length)?;
        require_positive("finger_width", self.finger_width)?;
        require_positive("finger_spacing", self.finger_spacing)?;
        let layer = self.layer.resolve(pdk)?;

        let n = self.n_fingers as f64;
        let total_width = (n + 1.) * self.finger_spacing + n * self.finger_width;
        let half_t = total_width / 2.;
        let mut synth = Synthesis::new();
        // Left & right bus bars
        synth.add_polygon(
            layer,
            Polygon::rect(
                Point::new(-self.finger_width, -half_t),
                Point::new(0., half_t),
            ),
        );
        synth.add_polygon(
            layer,
            Polygon::rect(
                Point::new(self.finger_length, -half_t),
                Point::new(self.finger_length + self.finger_width, half_t),
            ),
        );
        // Fingers, spanning the full gap between the buses
        for i in 0..self.n_fingers {
            let y = -half_t
                + self.finger_spacing
                + i as f64 * (self.finger_width + self.finger_spacing);
            synth.add_polygon(
                layer,
                Polygon::rect(
                    Point::new(0., y),
                    Point::new(self.finger_length, y + self.finger_width),
                ),
            );
        }
        synth.add_port(
            "p1",
            Point::new(-self.finger_width, 0.),
            self.finger_width,
            layer,
            180.,
        );
        synth.add_port(
            "p2",
            Point::new(self.finger_length + self.finger_width, 0.),
            self.finger_width,
            layer,
            0.,
        );
        Ok(synth)
    }
}

/// # Parallel-Plate Capacitor
///
/// Two coplanar plates separated by `plate_spacing`, on one layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParallelPlateCapacitor {
    /// Plate Width
    pub width: f64,
    /// Plate Length
    pub length: f64,
    /// Plate-To-Plate Spacing
    pub plate_spacing: f64,
    /// Conductor Layer
    #[serde(default = "default_layer")]
    pub layer: LayerRef,
}
impl ParallelPlateCapacitor {
    pub const TAG: &'static str = "parallel_plate_capacitor";
}
impl Synthesize for ParallelPlateCapacitor {
    fn synthesize(&self, pdk: Option<&Pdk>) -> RfResult<Synthesis> {
        require_positive("width", self.width)?;
        require_positive("length", self.length)?;
        require_positive("plate_spacing", self.plate_spacing)?;
        let layer = self.layer.resolve(pdk)?;

        let half_s = self.plate_spacing / 2.;
        let mut synth = Synthesis::new();
        synth.add_polygon(
            layer,
            Polygon::rect(
                Point::new(0., half_s),
                Point::new(self.length, half_s + self.width),
            ),
        );
        synth.add_polygon(
            layer,
            Polygon::rect(
                Point::new(0., -half_s - self.width),
                Point::new(self.length, -half_s),
            ),
        );
        synth.add_port(
            "p1",
            Point::new(self.length / 2., half_s + self.width),
            self.width / 2.,
            layer,
            90.,
        );
        synth.add_port(
            "p2",
            Point::new(self.length / 2., -half_s - self.width),
            self.width / 2.,
            layer,
            270.,
        );
        Ok(synth)
    }
}
