//!
//! # Geometry Module
//!
//! Defines the core geometric types, [Point], [Polygon], and [Transform],
//! and the sampling helpers shared by the synthesis algorithms.
//!
//! All coordinates are `f64`, in the design's distance units. Angles are
//! degrees at every public API boundary and radians internally.
//!

// Crates.io
use derive_more::{Add, Sub};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// # Coordinate Type-Alias
///
/// Used for all layout spatial coordinates.
pub type Coord = f64;

/// # Point in two-dimensional layout-space
#[derive(
    Debug, Copy, Clone, Default, Add, Sub, Serialize, Deserialize, JsonSchema, PartialEq, PartialOrd,
)]
pub struct Point {
    pub x: Coord,
    pub y: Coord,
}
impl Point {
    /// Create a new [Point] from (x,y) coordinates
    pub fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }
    /// Create a new point shifted by `p.x` in the x-dimension and by `p.y` in the y-dimension
    pub fn shift(&self, p: &Point) -> Point {
        Point {
            x: p.x + self.x,
            y: p.y + self.y,
        }
    }
    /// Create a new [Point], transformed from our original location by `trans`
    pub fn transform(&self, trans: &Transform) -> Point {
        let x = trans.a[0][0] * self.x + trans.a[0][1] * self.y + trans.b[0];
        let y = trans.a[1][0] * self.x + trans.a[1][1] * self.y + trans.b[1];
        Self { x, y }
    }
}

/// # Polygon
///
/// Closed n-sided polygon with arbitrary number of vertices.
/// Primarily consists of a series of ordered [Point]s.
///
/// Closure from the last point back to the first is implied;
/// the initial point need not be repeated at the end.
///
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Polygon {
    pub points: Vec<Point>,
}
impl Polygon {
    /// Create a new [Polygon] from a vector of [Point]s
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }
    /// Create an axis-aligned rectangle from two opposite corners
    pub fn rect(p0: Point, p1: Point) -> Self {
        Self {
            points: vec![
                p0,
                Point::new(p1.x, p0.y),
                p1,
                Point::new(p0.x, p1.y),
            ],
        }
    }
    /// Apply matrix-vector [Transform] `trans`,
    /// creating a new [Polygon] at a location equal to the transformation of our own.
    pub fn transform(&self, trans: &Transform) -> Polygon {
        Polygon {
            points: self.points.iter().map(|p| p.transform(trans)).collect(),
        }
    }
}

/// # Matrix-Vector Transformation
///
/// 2x2 rotation-matrix and two-entry translation vector,
/// used for placement of synthesized geometry into the global frame.
///
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Rotation / Transformation Matrix
    /// Represented in row-major order
    pub a: [[f64; 2]; 2],
    /// X-Y Translation
    pub b: [f64; 2],
}
impl Transform {
    /// The identity transform, leaving any transformed object unmodified
    pub fn identity() -> Self {
        Self {
            a: [[1., 0.], [0., 1.]],
            b: [0., 0.],
        }
    }
    /// Translation by (x,y)
    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            a: [[1., 0.], [0., 1.]],
            b: [x, y],
        }
    }
    /// A transform to rotate by `angle` degrees
    pub fn rotate(angle: f64) -> Self {
        let sin = angle.to_radians().sin();
        let cos = angle.to_radians().cos();
        Self {
            a: [[cos, -sin], [sin, cos]],
            b: [0., 0.],
        }
    }
    /// Create a placement transform: rotation by `angle` degrees about the
    /// local origin, then translation to `loc`.
    pub fn placement(loc: &Point, angle: f64) -> Self {
        let sin = angle.to_radians().sin();
        let cos = angle.to_radians().cos();
        Self {
            a: [[cos, -sin], [sin, cos]],
            b: [loc.x, loc.y],
        }
    }
}

/// Normalize `deg` into the [0, 360) interval
pub fn normalize_degrees(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Number of sample points for an arc swept by `angle_deg` degrees.
/// Denser sampling for larger angular extents, to bound chord error.
pub fn arc_point_count(angle_deg: f64) -> usize {
    ((angle_deg / 5.0) as usize).max(10)
}

/// Number of sample points for a spiral of `turns` full turns.
pub fn spiral_point_count(turns: f64) -> usize {
    ((turns * 20.0) as usize).max(100)
}

/// Sample `n` evenly-spaced values over `[start, stop]`, endpoints inclusive.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    debug_assert!(n >= 2);
    let step = (stop - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Create an annulus-sector [Polygon] between `inner_radius` and
/// `outer_radius`, swept from `theta0` to `theta1` (radians), sampled at `n`
/// points per arc. The inner arc is sampled forward and the outer arc in
/// reverse, concatenated into one simple closed loop.
pub fn annulus_sector(
    inner_radius: f64,
    outer_radius: f64,
    theta0: f64,
    theta1: f64,
    n: usize,
) -> Polygon {
    let theta = linspace(theta0, theta1, n);
    let mut points: Vec<Point> = theta
        .iter()
        .map(|t| Point::new(inner_radius * t.cos(), inner_radius * t.sin()))
        .collect();
    points.extend(
        theta
            .iter()
            .rev()
            .map(|t| Point::new(outer_radius * t.cos(), outer_radius * t.sin())),
    );
    Polygon::new(points)
}

/// Render an open center-line at non-zero `width` into a closed [Polygon].
///
/// Each center-line point is offset by `width / 2` along the local normal,
/// with interior normals mitered between the adjacent segment directions.
/// The left offsets run forward and the right offsets in reverse, closing
/// the loop.
pub fn render_trace(points: &[Point], width: f64) -> Polygon {
    debug_assert!(points.len() >= 2);
    let half = width / 2.0;
    let n = points.len();
    let mut left = Vec::with_capacity(2 * n);
    let mut right = Vec::with_capacity(n);
    for i in 0..n {
        let (dx, dy) = if i == 0 {
            segment_direction(&points[0], &points[1])
        } else if i == n - 1 {
            segment_direction(&points[n - 2], &points[n - 1])
        } else {
            // Miter: average the adjacent segment directions
            let (ax, ay) = segment_direction(&points[i - 1], &points[i]);
            let (bx, by) = segment_direction(&points[i], &points[i + 1]);
            let (sx, sy) = (ax + bx, ay + by);
            let norm = (sx * sx + sy * sy).sqrt();
            if norm > f64::EPSILON {
                (sx / norm, sy / norm)
            } else {
                (ax, ay)
            }
        };
        // Normal is the left-hand perpendicular of the local direction
        let (nx, ny) = (-dy, dx);
        left.push(Point::new(points[i].x + nx * half, points[i].y + ny * half));
        right.push(Point::new(points[i].x - nx * half, points[i].y - ny * half));
    }
    right.reverse();
    left.extend(right);
    Polygon::new(left)
}

/// Unit direction vector from `p0` to `p1`
fn segment_direction(p0: &Point, p1: &Point) -> (f64, f64) {
    let (dx, dy) = (p1.x - p0.x, p1.y - p0.y);
    let norm = (dx * dx + dy * dy).sqrt();
    if norm > f64::EPSILON {
        (dx / norm, dy / norm)
    } else {
        (1.0, 0.0)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn transform_identity() {
        let poly = Polygon::rect(Point::new(0., 0.), Point::new(1., 1.));
        let trans = Transform::identity();
        assert_eq!(poly.transform(&trans), poly);
    }
    #[test]
    fn transform_placement() {
        // Rotate a unit-x point by 90 degrees about the origin, then translate
        let trans = Transform::placement(&Point::new(10., 20.), 90.);
        let p = Point::new(1., 0.).transform(&trans);
        assert_close(p.x, 10.);
        assert_close(p.y, 21.);
    }
    #[test]
    fn arc_sampling_counts() {
        assert_eq!(arc_point_count(90.), 18);
        assert_eq!(arc_point_count(10.), 10);
        assert_eq!(arc_point_count(360.), 72);
        assert_eq!(spiral_point_count(3.5), 100);
        assert_eq!(spiral_point_count(10.), 200);
    }
    #[test]
    fn linspace_endpoints() {
        let v = linspace(0., 1., 11);
        assert_eq!(v.len(), 11);
        assert_close(v[0], 0.);
        assert_close(v[10], 1.);
        assert_close(v[5], 0.5);
    }
    #[test]
    fn render_straight_trace() {
        // A two-point horizontal center-line renders to a rectangle
        let poly = render_trace(&[Point::new(0., 0.), Point::new(10., 0.)], 2.);
        assert_eq!(poly.points.len(), 4);
        assert_eq!(
            poly.points,
            vec![
                Point::new(0., 1.),
                Point::new(10., 1.),
                Point::new(10., -1.),
                Point::new(0., -1.),
            ]
        );
    }
    #[test]
    fn annulus_sector_closure() {
        let poly = annulus_sector(1., 2., 0., std::f64::consts::FRAC_PI_2, 10);
        assert_eq!(poly.points.len(), 20);
        // Starts on the inner arc at angle zero, ends on the outer arc at angle zero
        assert_close(poly.points[0].x, 1.);
        assert_close(poly.points[0].y, 0.);
        assert_close(poly.points[19].x, 2.);
        assert_close(poly.points[19].y, 0.);
    }
}
