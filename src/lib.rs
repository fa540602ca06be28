pub mod analysis;
pub mod error;
pub mod math;
pub mod mesh;
pub mod volume;

pub use error::{Result, ScalarMeshError};
