mod adjacency;
mod critical_points;

pub use adjacency::{AdjacencyMap, AnalyzeVertices, VertexEntry, VertexId};
pub use critical_points::{classify, CriticalPoints, Extremum, FindCriticalPoints};

use crate::error::{ParameterError, Result};
use crate::math::EPSILON;

/// Parameters controlling vertex analysis.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisParams {
    /// Distance within which two corners are treated as the same vertex.
    pub tolerance: f32,
}

impl AnalysisParams {
    /// Creates parameters with a custom tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if `tolerance` is NaN, infinite, zero or negative.
    pub fn new(tolerance: f32) -> Result<Self> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ParameterError::InvalidTolerance { value: tolerance }.into());
        }
        Ok(Self { tolerance })
    }
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self { tolerance: EPSILON }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ScalarMeshError;

    #[test]
    fn default_uses_epsilon() {
        approx::assert_relative_eq!(AnalysisParams::default().tolerance, EPSILON);
    }

    #[test]
    fn custom_tolerance_accepted() {
        let params = AnalysisParams::new(0.25).unwrap();
        approx::assert_relative_eq!(params.tolerance, 0.25);
    }

    #[test]
    fn invalid_tolerances_rejected() {
        for value in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let err = AnalysisParams::new(value).unwrap_err();
            assert!(
                matches!(
                    err,
                    ScalarMeshError::Parameter(ParameterError::InvalidTolerance { .. })
                ),
                "unexpected error for {value}: {err}"
            );
        }
    }
}
