use tracing::debug;

use crate::error::{Result, VolumeError};
use crate::math::{GeometricPoint, ScalarPoint};

/// A regular 3D grid of scalar samples, filled one image layer at a time.
///
/// Samples are stored flat, indexed `x + y * width + z * width * height`.
/// Each sample keeps its grid position so it can be handed to consumers
/// that expect positioned values.
#[derive(Debug, Clone)]
pub struct Dataset {
    name: String,
    width: usize,
    height: usize,
    depth: usize,
    channels: usize,
    values: Vec<ScalarPoint>,
}

impl Dataset {
    /// Creates an empty dataset. All samples start at the origin with value `0`.
    ///
    /// # Errors
    ///
    /// Returns an error if any dimension is zero, the sample or layer byte
    /// count overflows, or there are fewer than three channels per pixel.
    pub fn new(
        name: impl Into<String>,
        width: usize,
        height: usize,
        depth: usize,
        channels: usize,
    ) -> Result<Self> {
        let invalid = || VolumeError::InvalidDimensions {
            width,
            height,
            depth,
            channels,
        };
        if width == 0 || height == 0 || depth == 0 {
            return Err(invalid().into());
        }
        if channels < 3 {
            return Err(VolumeError::InsufficientChannels(channels).into());
        }
        let layer_area = width.checked_mul(height).ok_or_else(invalid)?;
        layer_area.checked_mul(channels).ok_or_else(invalid)?;
        let count = layer_area.checked_mul(depth).ok_or_else(invalid)?;

        Ok(Self {
            name: name.into(),
            width,
            height,
            depth,
            channels,
            values: vec![ScalarPoint::default(); count],
        })
    }

    /// Dataset name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Samples along X.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Samples along Y.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of layers (samples along Z).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Bytes per pixel in the layers fed to [`Dataset::add_layer`].
    #[must_use]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// All samples in storage order.
    #[must_use]
    pub fn values(&self) -> &[ScalarPoint] {
        &self.values
    }

    /// Flat index of `(x, y, z)`, or `None` if out of bounds.
    #[must_use]
    pub fn index(&self, x: usize, y: usize, z: usize) -> Option<usize> {
        if x >= self.width || y >= self.height || z >= self.depth {
            return None;
        }
        Some(x + y * self.width + z * self.width * self.height)
    }

    /// Sample at `(x, y, z)`.
    #[must_use]
    pub fn sample(&self, x: usize, y: usize, z: usize) -> Option<&ScalarPoint> {
        self.index(x, y, z).and_then(|i| self.values.get(i))
    }

    /// Scalar value at `(x, y, z)`.
    #[must_use]
    pub fn value(&self, x: usize, y: usize, z: usize) -> Option<f32> {
        self.sample(x, y, z).map(|s| s.value)
    }

    /// Fills layer `layer_index` from an interleaved pixel buffer.
    ///
    /// Each pixel's value is the mean of its first three channels; any
    /// further channels (e.g. alpha) are ignored. Rows run along X.
    ///
    /// # Errors
    ///
    /// Returns an error if `layer_index` is past the last layer or `layer`
    /// does not hold exactly `width * height * channels` bytes.
    #[allow(clippy::cast_precision_loss)]
    pub fn add_layer(&mut self, layer: &[u8], layer_index: usize) -> Result<()> {
        if layer_index >= self.depth {
            return Err(VolumeError::LayerOutOfRange {
                index: layer_index,
                depth: self.depth,
            }
            .into());
        }
        let expected = self.width * self.height * self.channels;
        if layer.len() != expected {
            return Err(VolumeError::LayerSizeMismatch {
                expected,
                actual: layer.len(),
            }
            .into());
        }

        let width = self.width;
        let area = width * self.height;
        let offset = layer_index * area;
        let z = layer_index as f32;
        for (pixel, (pixels, sample)) in layer
            .chunks_exact(self.channels)
            .zip(&mut self.values[offset..offset + area])
            .enumerate()
        {
            let x = pixel % width;
            let y = pixel / width;
            let gray = pixels[..3].iter().map(|&c| f32::from(c)).sum::<f32>() / 3.0;
            *sample = ScalarPoint::new(GeometricPoint::new(x as f32, y as f32, z), gray);
        }

        debug!(dataset = %self.name, layer = layer_index, "layer loaded");
        Ok(())
    }
}
