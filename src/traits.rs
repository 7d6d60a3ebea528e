use ndarray::{ArrayD, ArrayView5};

use crate::errors::Result;

/// Abstraction over the volumetric segmentation backend.
///
/// The pipeline depends on this seam instead of the concrete ONNX session so
/// it can run against a mock in tests.
pub trait VolumeSegmentationModel: Send + Sync {
    /// Run one forward pass over a `[1, 1, D, H, W]` tensor and return the
    /// raw output, whatever its shape.
    fn predict(&self, tensor: ArrayView5<'_, f32>) -> Result<ArrayD<f32>>;
}
