use ndarray::{ArrayD, ArrayView5, IxDyn};

use crate::errors::{NeuroSegError, Result};
use crate::traits::VolumeSegmentationModel;

/// Mock backend that returns a canned logit map regardless of input.
///
/// The pipeline applies sigmoid to whatever comes back, so tests that want a
/// voxel above the detection threshold should use a large positive logit and
/// a large negative one for background.
#[derive(Debug, Clone)]
pub struct MockSegmentationModel {
    pub logits: ArrayD<f32>,
}

impl MockSegmentationModel {
    pub const fn new(logits: ArrayD<f32>) -> Self {
        Self { logits }
    }

    /// A mock that finds nothing: background logits everywhere.
    pub fn silent(shape: &[usize]) -> Self {
        Self {
            logits: ArrayD::from_elem(IxDyn(shape), -10.0),
        }
    }
}

impl VolumeSegmentationModel for MockSegmentationModel {
    fn predict(&self, _tensor: ArrayView5<'_, f32>) -> Result<ArrayD<f32>> {
        Ok(self.logits.clone())
    }
}

/// Mock backend whose forward pass always fails.
#[derive(Debug, Clone)]
pub struct FailingSegmentationModel;

impl VolumeSegmentationModel for FailingSegmentationModel {
    fn predict(&self, _tensor: ArrayView5<'_, f32>) -> Result<ArrayD<f32>> {
        Err(NeuroSegError::Forward {
            source: "mock forward failure".into(),
        })
    }
}
