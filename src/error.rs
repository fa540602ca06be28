use thiserror::Error;

/// Top-level error type for the scalar mesh crate.
#[derive(Debug, Error)]
pub enum ScalarMeshError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Volume(#[from] VolumeError),
}

/// Errors related to analysis parameters.
#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("tolerance must be finite and positive, got {value}")]
    InvalidTolerance { value: f32 },
}

/// Errors related to volumetric datasets.
#[derive(Debug, Error)]
pub enum VolumeError {
    #[error("invalid dataset dimensions {width}x{height}x{depth} with {channels} channel(s)")]
    InvalidDimensions {
        width: usize,
        height: usize,
        depth: usize,
        channels: usize,
    },

    #[error("layer index {index} is out of range for depth {depth}")]
    LayerOutOfRange { index: usize, depth: usize },

    #[error("layer buffer has {actual} bytes, expected {expected}")]
    LayerSizeMismatch { expected: usize, actual: usize },

    #[error("grayscale conversion needs at least 3 channels, dataset has {0}")]
    InsufficientChannels(usize),
}

/// Convenience type alias for results using [`ScalarMeshError`].
pub type Result<T> = std::result::Result<T, ScalarMeshError>;
