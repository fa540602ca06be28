mod grid;
mod point;

pub(crate) use grid::SpatialGrid;
pub use point::{GeometricPoint, ScalarPoint};

/// 3D point type used for interop with `nalgebra`.
pub type Point3 = nalgebra::Point3<f32>;

/// Default tolerance for approximate point equality.
///
/// Two points closer than this (in source units) are treated as the same
/// vertex. Meshes with a different scale or precision should pass their own
/// tolerance through [`AnalysisParams`](crate::analysis::AnalysisParams).
pub const EPSILON: f32 = 1.0e-5;
