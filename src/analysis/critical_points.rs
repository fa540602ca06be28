use tracing::{debug, info};

use crate::math::GeometricPoint;

use super::{AdjacencyMap, VertexEntry};

/// Vertices classified by the height field (the y-coordinate).
#[derive(Debug, Clone, Default)]
pub struct CriticalPoints {
    /// Vertices no neighbor lies below.
    pub minima: Vec<GeometricPoint>,
    /// Vertices no neighbor lies above.
    pub maxima: Vec<GeometricPoint>,
    /// Reserved. Saddle detection is not performed, so this is always empty.
    pub saddles: Vec<GeometricPoint>,
}

/// Per-vertex extremum flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extremum {
    /// No neighbor is lower.
    pub is_min: bool,
    /// No neighbor is higher.
    pub is_max: bool,
}

/// Classifies one vertex against its neighbors.
///
/// A vertex with no neighbors, or whose neighbors all share its height, is
/// both a minimum and a maximum. A vertex with a NaN height is neither.
#[must_use]
pub fn classify(entry: &VertexEntry) -> Extremum {
    let y = entry.position.y;
    if y.is_nan() {
        return Extremum {
            is_min: false,
            is_max: false,
        };
    }

    let mut flags = Extremum {
        is_min: true,
        is_max: true,
    };
    for n in &entry.neighbors {
        if n.y > y {
            flags.is_max = false;
        }
        if n.y < y {
            flags.is_min = false;
        }
    }
    flags
}

/// Finds local minima and maxima of the y-coordinate over an adjacency map.
///
/// Expects a fully built [`AdjacencyMap`]; run
/// [`AnalyzeVertices`](super::AnalyzeVertices) first.
#[derive(Debug, Default)]
pub struct FindCriticalPoints;

impl FindCriticalPoints {
    /// Creates a new `FindCriticalPoints` operation.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the classification.
    ///
    /// Output lists follow the map's iteration order. A vertex can appear in
    /// both lists.
    #[must_use]
    pub fn execute(&self, adjacency: &AdjacencyMap) -> CriticalPoints {
        debug!(vertices = adjacency.len(), "finding critical points");

        let mut points = CriticalPoints::default();
        for (_, entry) in adjacency.iter() {
            let flags = classify(entry);
            if flags.is_min {
                points.minima.push(entry.position);
            }
            if flags.is_max {
                points.maxima.push(entry.position);
            }
        }

        info!(
            minima = points.minima.len(),
            maxima = points.maxima.len(),
            "critical points found"
        );
        points
    }
}
