use crate::math::GeometricPoint;

/// One face of a triangle mesh.
///
/// Winding order is not significant to any analysis in this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Triangle {
    /// First corner.
    pub v0: GeometricPoint,
    /// Second corner.
    pub v1: GeometricPoint,
    /// Third corner.
    pub v2: GeometricPoint,
}

impl Triangle {
    /// Creates a new triangle from three corners.
    #[must_use]
    pub fn new(v0: GeometricPoint, v1: GeometricPoint, v2: GeometricPoint) -> Self {
        Self { v0, v1, v2 }
    }

    /// Returns the corners as an array, in order.
    #[must_use]
    pub fn corners(&self) -> [GeometricPoint; 3] {
        [self.v0, self.v1, self.v2]
    }
}

impl From<[GeometricPoint; 3]> for Triangle {
    fn from([v0, v1, v2]: [GeometricPoint; 3]) -> Self {
        Self::new(v0, v1, v2)
    }
}
