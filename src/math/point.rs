use std::fmt;

use super::Point3;

/// A point in 3D space.
///
/// Equality between points is approximate: two points are considered the
/// same vertex when their distance is within a tolerance. This relation is
/// not transitive, so it must only be used as a per-pair test.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometricPoint {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate. Also the scalar field used for critical point analysis.
    pub y: f32,
    /// Z coordinate.
    pub z: f32,
}

impl GeometricPoint {
    /// Creates a new point.
    #[must_use]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Creates a point with all three coordinates set to `coord`.
    #[must_use]
    pub fn splat(coord: f32) -> Self {
        Self::new(coord, coord, coord)
    }

    /// Euclidean distance to `other`. NaN coordinates propagate.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f32 {
        nalgebra::distance(&self.to_point(), &other.to_point())
    }

    /// Returns `true` if `other` lies within `tolerance` of this point.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tolerance: f32) -> bool {
        self.distance(other) <= tolerance
    }

    /// Returns `true` if every coordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Converts to an `nalgebra` point.
    #[must_use]
    pub fn to_point(&self) -> Point3 {
        Point3::new(self.x, self.y, self.z)
    }
}

impl From<Point3> for GeometricPoint {
    fn from(p: Point3) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl From<GeometricPoint> for Point3 {
    fn from(p: GeometricPoint) -> Self {
        p.to_point()
    }
}

impl From<[f32; 3]> for GeometricPoint {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for GeometricPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.x, self.y, self.z)
    }
}

/// A point carrying a scalar field sample, e.g. a grayscale intensity.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarPoint {
    /// Position of the sample.
    pub position: GeometricPoint,
    /// Field value at `position`.
    pub value: f32,
}

impl ScalarPoint {
    /// Creates a new scalar sample.
    #[must_use]
    pub fn new(position: GeometricPoint, value: f32) -> Self {
        Self { position, value }
    }

    /// Returns `true` if both positions and values agree within `tolerance`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tolerance: f32) -> bool {
        self.position.approx_eq(&other.position, tolerance)
            && (self.value - other.value).abs() <= tolerance
    }
}

impl fmt::Display for ScalarPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position, self.value)
    }
}
