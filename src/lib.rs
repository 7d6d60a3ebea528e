pub mod analysis;
pub mod config;
pub mod errors;
pub mod model;
pub mod report;
pub mod traits;
pub mod volume;

pub mod mocks;

use std::path::Path;

use ndarray::ArrayD;
use tracing::debug;

pub use config::Config;
pub use errors::{NeuroSegError, Result};
pub use model::Model;
pub use report::DiagnosisReport;
pub use traits::VolumeSegmentationModel;

/// Linear pipeline from a decoded volume to a diagnosis report.
///
/// Generic over the model seam so the whole chain is exercisable without an
/// ONNX session.
pub struct VolumeProcessor<M: VolumeSegmentationModel> {
    model: M,
}

impl<M: VolumeSegmentationModel> VolumeProcessor<M> {
    pub const fn new(model: M) -> Self {
        Self { model }
    }

    /// Preprocess, run the forward pass, and summarize the mask.
    pub fn analyze(&self, volume: ArrayD<f32>) -> Result<DiagnosisReport> {
        let tensor = model::preprocess(volume)?;
        debug!(shape = ?tensor.shape(), "input tensor ready");

        let raw = self.model.predict(tensor.view())?;
        let mask = analysis::coerce_mask(raw)?;
        let summary = analysis::summarize_mask(mask.view());
        Ok(DiagnosisReport::from_summary(&summary))
    }

    /// Decode a NIfTI file and analyze it.
    pub fn analyze_file(&self, path: &Path) -> Result<DiagnosisReport> {
        let volume = volume::load_volume(path)?;
        self.analyze(volume)
    }
}

impl VolumeProcessor<Model> {
    /// Pipeline backed by an ONNX session loaded from the configured path.
    pub fn with_onnx_model(config: &Config) -> Result<Self> {
        let model = Model::new(&config.model)?;
        Ok(Self::new(model))
    }
}
