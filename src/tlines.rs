//!
//! # Transmission-Line Components
//!
//! Synthesis algorithms for the planar transmission-line family: straight,
//! tapered, and curved microstrip, and straight, bent, and tapered
//! coplanar waveguide (CPW).
//!
//! Every type follows the same local-frame conventions: signal flows from an
//! `in` port at the origin facing 180 degrees to an `out` port at the far
//! end, and geometry is centered on the x-axis.
//!

// Crates.io
use serde::{Deserialize, Serialize};

// Local Imports
use crate::components::{
    default_angle, default_ground_width, default_layer, require_positive, Synthesis, Synthesize,
};
use crate::error::RfResult;
use crate::geom::{annulus_sector, arc_point_count, normalize_degrees, Point, Polygon};
use crate::pdk::{LayerRef, Pdk};

/// # Straight Microstrip Line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MicrostripLine {
    /// Length, along the signal direction
    pub length: f64,
    /// Conductor Width
    pub width: f64,
    /// Conductor Layer
    #[serde(default = "default_layer")]
    pub layer: LayerRef,
}
impl MicrostripLine {
    pub const TAG: &'static str = "microstrip_line";
}
impl Synthesize for MicrostripLine {
    fn synthesize(&self, pdk: Option<&Pdk>) -> RfResult<Synthesis> {
        require_positive("length", self.length)?;
        require_positive("width", self.width)?;
        let layer = self.layer.resolve(pdk)?;

        let mut synth = Synthesis::new();
        synth.add_polygon(
            layer,
            Polygon::rect(
                Point::new(0., -self.width / 2.),
                Point::new(self.length, self.width / 2.),
            ),
        );
        synth.add_port("in", Point::new(0., 0.), self.width, layer, 180.);
        synth.add_port("out", Point::new(self.length, 0.), self.width, layer, 0.);
        Ok(synth)
    }
}

/// # Linearly Tapered Microstrip Line
///
/// Width transitions linearly from `width_in` at the origin to `width_out`
/// at the far end.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaperedMicrostripLine {
    /// Length, along the signal direction
    pub length: f64,
    /// Conductor Width at the input end
    pub width_in: f64,
    /// Conductor Width at the output end
    pub width_out: f64,
    /// Conductor Layer
    #[serde(default = "default_layer")]
    pub layer: LayerRef,
}
impl TaperedMicrostripLine {
    pub const TAG: &'static str = "tapered_microstrip_line";
}
impl Synthesize for TaperedMicrostripLine {
    fn synthesize(&self, pdk: Option<&Pdk>) -> RfResult<Synthesis> {
        require_positive("length", self.length)?;
        require_positive("width_in", self.width_in)?;
        require_positive("width_out", self.width_out)?;
        let layer = self.layer.resolve(pdk)?;

        let mut synth = Synthesis::new();
        synth.add_polygon(
            layer,
            Polygon::new(vec![
                Point::new(0., -self.width_in / 2.),
                Point::new(self.length, -self.width_out / 2.),
                Point::new(self.length, self.width_out / 2.),
                Point::new(0., self.width_in / 2.),
            ]),
        );
        synth.add_port("in", Point::new(0., 0.), self.width_in, layer, 180.);
        synth.add_port("out", Point::new(self.length, 0.), self.width_out, layer, 0.);
        Ok(synth)
    }
}

/// # Curved (Circular-Arc) Microstrip Line
///
/// An annular-sector conductor centered on the origin, swept
/// counter-clockwise from angle zero through `angle` degrees at center-line
/// radius `radius`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurvedMicrostripLine {
    /// Center-Line Radius
    pub radius: f64,
    /// Conductor Width
    pub width: f64,
    /// Swept Angle (degrees)
    #[serde(default = "default_angle")]
    pub angle: f64,
    /// Conductor Layer
    #[serde(default = "default_layer")]
    pub layer: LayerRef,
}
impl CurvedMicrostripLine {
    pub const TAG: &'static str = "curved_microstrip_line";
}
impl Synthesize for CurvedMicrostripLine {
    fn synthesize(&self, pdk: Option<&Pdk>) -> RfResult<Synthesis> {
        require_positive("radius", self.radius)?;
        require_positive("width", self.width)?;
        require_positive("angle", self.angle)?;
        let layer = self.layer.resolve(pdk)?;

        let n = arc_point_count(self.angle);
        let theta1 = self.angle.to_radians();
        let mut synth = Synthesis::new();
        synth.add_polygon(
            layer,
            annulus_sector(
                self.radius - self.width / 2.,
                self.radius + self.width / 2.,
                0.,
                theta1,
                n,
            ),
        );
        synth.add_port("in", Point::new(self.radius, 0.), self.width, layer, 180.);
        synth.add_port(
            "out",
            Point::new(self.radius * theta1.cos(), self.radius * theta1.sin()),
            self.width,
            layer,
            normalize_degrees(self.angle + 90.),
        );
        Ok(synth)
    }
}

/// # Straight Coplanar-Waveguide Line
///
/// A center conductor flanked by two ground strips, separated by `gap` on
/// each side. All three conductors share one layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CpwLine {
    /// Length, along the signal direction
    pub length: f64,
    /// Center-Conductor Width
    pub width: f64,
    /// Signal-To-Ground Gap
    pub gap: f64,
    /// Ground-Strip Width
    #[serde(default = "default_ground_width")]
    pub ground_width: f64,
    /// Conductor Layer
    #[serde(default = "default_layer")]
    pub layer: LayerRef,
}
impl CpwLine {
    pub const TAG: &'static str = "cpw_line";
}
impl Synthesize for CpwLine {
    fn synthesize(&self, pdk: Option<&Pdk>) -> RfResult<Synthesis> {
        require_positive("length", self.length)?;
        require_positive("width", self.width)?;
        require_positive("gap", self.gap)?;
        require_positive("ground_width", self.ground_width)?;
        let layer = self.layer.resolve(pdk)?;

        let inner = self.width / 2. + self.gap;
        let outer = inner + self.ground_width;
        let mut synth = Synthesis::new();
        // Center conductor
        synth.add_polygon(
            layer,
            Polygon::rect(
                Point::new(0., -self.width / 2.),
                Point::new(self.length, self.width / 2.),
            ),
        );
        // Upper & lower ground strips
        synth.add_polygon(
            layer,
            Polygon::rect(Point::new(0., inner), Point::new(self.length, outer)),
        );
        synth.add_polygon(
            layer,
            Polygon::rect(Point::new(0., -outer), Point::new(self.length, -inner)),
        );
        synth.add_port("in", Point::new(0., 0.), self.width, layer, 180.);
        synth.add_port("out", Point::new(self.length, 0.), self.width, layer, 0.);
        Ok(synth)
    }
}

/// # Coplanar-Waveguide Bend
///
/// A circular-arc CPW section: three concentric annular sectors swept from
/// angle zero through `angle` degrees about the origin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CpwBend {
    /// Center-Line Radius
    pub radius: f64,
    /// Center-Conductor Width
    pub width: f64,
    /// Signal-To-Ground Gap
    pub gap: f64,
    /// Ground-Strip Width
    #[serde(default = "default_ground_width")]
    pub ground_width: f64,
    /// Swept Angle (degrees)
    #[serde(default = "default_angle")]
    pub angle: f64,
    /// Conductor Layer
    #[serde(default = "default_layer")]
    pub layer: LayerRef,
}
impl CpwBend {
    pub const TAG: &'static str = "cpw_bend";
}
impl Synthesize for CpwBend {
    fn synthesize(&self, pdk: Option<&Pdk>) -> RfResult<Synthesis> {
        require_positive("radius", self.radius)?;
        require_positive("width", self.width)?;
        require_positive("gap", self.gap)?;
        require_positive("ground_width", self.ground_width)?;
        require_positive("angle", self.angle)?;
        let layer = self.layer.resolve(pdk)?;

        let n = arc_point_count(self.angle);
        let theta1 = self.angle.to_radians();
        let mut synth = Synthesis::new();
        // Center conductor
        synth.add_polygon(
            layer,
            annulus_sector(
                self.radius - self.width / 2.,
                self.radius + self.width / 2.,
                0.,
                theta1,
                n,
            ),
        );
        // Inner ground strip
        synth.add_polygon(
            layer,
            annulus_sector(
                self.radius - self.width / 2. - self.gap - self.ground_width,
                self.radius - self.width / 2. - self.gap,
                0.,
                theta1,
                n,
            ),
        );
        // Outer ground strip
        synth.add_polygon(
            layer,
            annulus_sector(
                self.radius + self.width / 2. + self.gap,
                self.radius + self.width / 2. + self.gap + self.ground_width,
                0.,
                theta1,
                n,
            ),
        );
        synth.add_port("in", Point::new(self.radius, 0.), self.width, layer, 180.);
        synth.add_port(
            "out",
            Point::new(self.radius * theta1.cos(), self.radius * theta1.sin()),
            self.width,
            layer,
            normalize_degrees(self.angle + 90.),
        );
        Ok(synth)
    }
}

/// # Coplanar-Waveguide Taper
///
/// Linearly transitions both the center-conductor width and the
/// signal-to-ground gap, keeping the ground-strip width constant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CpwTaper {
    /// Length, along the signal direction
    pub length: f64,
    /// Center-Conductor Width at the input end
    pub width_in: f64,
    /// Center-Conductor Width at the output end
    pub width_out: f64,
    /// Signal-To-Ground Gap at the input end
    pub gap_in: f64,
    /// Signal-To-Ground Gap at the output end
    pub gap_out: f64,
    /// Ground-Strip Width
    #[serde(default = "default_ground_width")]
    pub ground_width: f64,
    /// Conductor Layer
    #[serde(default = "default_layer")]
    pub layer: LayerRef,
}
impl CpwTaper {
    pub const TAG: &'static str = "cpw_taper";
}
impl Synthesize for CpwTaper {
    fn synthesize(&self, pdk: Option<&Pdk>) -> RfResult<Synthesis> {
        require_positive("length", self.length)?;
        require_positive("width_in", self.width_in)?;
        require_positive("width_out", self.width_out)?;
        require_positive("gap_in", self.gap_in)?;
        require_positive("gap_out", self.gap_out)?;
        require_positive("ground_width", self.ground_width)?;
        let layer = self.layer.resolve(pdk)?;

        let inner0 = self.width_in / 2. + self.gap_in;
        let inner1 = self.width_out / 2. + self.gap_out;
        let mut synth = Synthesis::new();
        // Center conductor
        synth.add_polygon(
            layer,
            Polygon::new(vec![
                Point::new(0., -self.width_in / 2.),
                Point::new(self.length, -self.width_out / 2.),
                Point::new(self.length, self.width_out / 2.),
                Point::new(0., self.width_in / 2.),
            ]),
        );
        // Upper ground strip
        synth.add_polygon(
            layer,
            Polygon::new(vec![
                Point::new(0., inner0),
                Point::new(self.length, inner1),
                Point::new(self.length, inner1 + self.ground_width),
                Point::new(0., inner0 + self.ground_width),
            ]),
        );
        // Lower ground strip, mirrored
        synth.add_polygon(
            layer,
            Polygon::new(vec![
                Point::new(0., -inner0),
                Point::new(self.length, -inner1),
                Point::new(self.length, -inner1 - self.ground_width),
                Point::new(0., -inner0 - self.ground_width),
            ]),
        );
        synth.add_port("in", Point::new(0., 0.), self.width_in, layer, 180.);
        synth.add_port("out", Point::new(self.length, 0.), self.width_out, layer, 0.);
        Ok(synth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RfError;
    use crate::pdk::LayerSpec;

    #[test]
    fn microstrip_basics() -> RfResult<()> {
        let line = MicrostripLine {
            length: 100.,
            width: 10.,
            layer: LayerSpec(1, 0).into(),
        };
        let synth = line.synthesize(None)?;
        assert_eq!(synth.elems.len(), 1);
        assert_eq!(synth.elems[0].layer, LayerSpec(1, 0));
        assert_eq!(synth.elems[0].inner.points.len(), 4);
        let inp = &synth.ports["in"];
        assert_eq!(inp.loc, Point::new(0., 0.));
        assert_eq!(inp.orientation, 180.);
        assert_eq!(inp.width, 10.);
        let out = &synth.ports["out"];
        assert_eq!(out.loc, Point::new(100., 0.));
        assert_eq!(out.orientation, 0.);
        Ok(())
    }
    #[test]
    fn microstrip_rejects_nonpositive_dims() {
        let line = MicrostripLine {
            length: -1.,
            width: 10.,
            layer: LayerSpec(1, 0).into(),
        };
        assert!(matches!(line.synthesize(None), Err(RfError::Parameter(_))));
    }
    #[test]
    fn taper_port_widths() -> RfResult<()> {
        let taper = TaperedMicrostripLine {
            length: 50.,
            width_in: 10.,
            width_out: 4.,
            layer: LayerSpec(1, 0).into(),
        };
        let synth = taper.synthesize(None)?;
        assert_eq!(synth.ports["in"].width, 10.);
        assert_eq!(synth.ports["out"].width, 4.);
        // Trapezoid corners
        let pts = &synth.elems[0].inner.points;
        assert_eq!(pts[0], Point::new(0., -5.));
        assert_eq!(pts[1], Point::new(50., -2.));
        Ok(())
    }
    #[test]
    fn curved_line_arc() -> RfResult<()> {
        let arc = CurvedMicrostripLine {
            radius: 50.,
            width: 10.,
            angle: 90.,
            layer: LayerSpec(1, 0).into(),
        };
        let synth = arc.synthesize(None)?;
        // One annular sector at 18 points per arc
        assert_eq!(synth.elems.len(), 1);
        assert_eq!(synth.elems[0].inner.points.len(), 36);
        assert_eq!(synth.ports["in"].loc, Point::new(50., 0.));
        let out = &synth.ports["out"];
        assert!((out.loc.x - 0.).abs() < 1e-9);
        assert!((out.loc.y - 50.).abs() < 1e-9);
        assert_eq!(out.orientation, 180.);
        Ok(())
    }
    #[test]
    fn curved_line_full_turn_orientation_wraps() -> RfResult<()> {
        let arc = CurvedMicrostripLine {
            radius: 50.,
            width: 10.,
            angle: 300.,
            layer: LayerSpec(1, 0).into(),
        };
        let synth = arc.synthesize(None)?;
        // 300 + 90 wraps to 30
        assert_eq!(synth.ports["out"].orientation, 30.);
        Ok(())
    }
    #[test]
    fn cpw_line_three_conductors() -> RfResult<()> {
        let line = CpwLine {
            length: 100.,
            width: 10.,
            gap: 5.,
            ground_width: 10.,
            layer: LayerSpec(1, 0).into(),
        };
        let synth = line.synthesize(None)?;
        assert_eq!(synth.elems.len(), 3);
        for elem in &synth.elems {
            assert_eq!(elem.layer, LayerSpec(1, 0));
        }
        // Upper ground spans y in [10, 20]
        let upper = &synth.elems[1].inner.points;
        assert_eq!(upper[0], Point::new(0., 10.));
        assert_eq!(upper[2], Point::new(100., 20.));
        assert_eq!(synth.ports.len(), 2);
        assert_eq!(synth.ports["in"].orientation, 180.);
        assert_eq!(synth.ports["out"].orientation, 0.);
        Ok(())
    }
    #[test]
    fn cpw_bend_sectors() -> RfResult<()> {
        let bend = CpwBend {
            radius: 50.,
            width: 10.,
            gap: 5.,
            ground_width: 10.,
            angle: 90.,
            layer: LayerSpec(1, 0).into(),
        };
        let synth = bend.synthesize(None)?;
        assert_eq!(synth.elems.len(), 3);
        for elem in &synth.elems {
            assert_eq!(elem.inner.points.len(), 36);
        }
        assert_eq!(synth.ports["out"].orientation, 180.);
        Ok(())
    }
    #[test]
    fn cpw_taper_gap_transition() -> RfResult<()> {
        let taper = CpwTaper {
            length: 40.,
            width_in: 10.,
            width_out: 4.,
            gap_in: 5.,
            gap_out: 2.,
            ground_width: 10.,
            layer: LayerSpec(1, 0).into(),
        };
        let synth = taper.synthesize(None)?;
        assert_eq!(synth.elems.len(), 3);
        // Upper ground inner edge runs from w_in/2+gap_in to w_out/2+gap_out
        let upper = &synth.elems[1].inner.points;
        assert_eq!(upper[0], Point::new(0., 10.));
        assert_eq!(upper[1], Point::new(40., 4.));
        Ok(())
    }
    #[test]
    fn symbolic_layers_resolve_through_the_pdk() -> RfResult<()> {
        let line = MicrostripLine {
            length: 10.,
            width: 2.,
            layer: "metal2".into(),
        };
        let pdk = Pdk::generic();
        let synth = line.synthesize(Some(&pdk))?;
        assert_eq!(synth.elems[0].layer, LayerSpec(2, 0));
        assert_eq!(synth.ports["in"].layer, LayerSpec(2, 0));
        // And fail cleanly with none bound
        assert!(matches!(
            line.synthesize(None),
            Err(RfError::UnknownLayer(_))
        ));
        Ok(())
    }
}
