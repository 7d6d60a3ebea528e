use std::path::Path;

use ndarray::{Array5, ArrayD, ArrayView5, Axis, Ix3};
use ort::session::{
    builder::{GraphOptimizationLevel, SessionBuilder},
    Session,
};
use ort::value::TensorRef;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::errors::{NeuroSegError, Result};
use crate::traits::VolumeSegmentationModel;

/// Initialize the ONNX Runtime environment.
///
/// Nothing else in the pipeline may run when this fails: a missing or
/// broken runtime library is reported as a dependency error, not a model
/// error.
pub fn probe_runtime() -> Result<()> {
    ort::init()
        .with_name("neuroseg")
        .commit()
        .map_err(|e| NeuroSegError::Dependency {
            message: e.to_string(),
        })?;
    Ok(())
}

/// An ahead-of-time exported segmentation model.
///
/// The session needs exclusive access for each run, so it sits behind a
/// mutex and `predict` can take `&self` like the trait requires.
pub struct Model {
    input_name: String,
    output_name: String,
    session: Mutex<Session>,
}

impl Model {
    /// Deserialize an ONNX graph from disk.
    ///
    /// Only the self-contained exported format is accepted. A raw parameter
    /// checkpoint (a `.pth` state_dict without the architecture definition)
    /// fails here and is reported as a model-load error.
    pub fn new(model_path: &Path) -> Result<Self> {
        let session = Self::build_session(model_path).map_err(|e| NeuroSegError::ModelLoad {
            source: Box::new(e),
        })?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .ok_or_else(|| NeuroSegError::ModelLoad {
                source: "model declares no inputs".into(),
            })?;
        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| NeuroSegError::ModelLoad {
                source: "model declares no outputs".into(),
            })?;

        info!(path = %model_path.display(), input = %input_name, output = %output_name, "model loaded");

        Ok(Self {
            input_name,
            output_name,
            session: Mutex::new(session),
        })
    }

    fn build_session(model_path: &Path) -> ort::Result<Session> {
        SessionBuilder::new()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .commit_from_file(model_path)
    }
}

impl VolumeSegmentationModel for Model {
    fn predict(&self, tensor: ArrayView5<'_, f32>) -> Result<ArrayD<f32>> {
        let mut session = self.session.lock();
        let outputs = session.run(
            ort::inputs![self.input_name.as_str() => TensorRef::from_array_view(&tensor.as_standard_layout())?],
        )?;
        Ok(outputs[self.output_name.as_str()]
            .try_extract_array::<f32>()?
            .to_owned())
    }
}

/// Normalize a raw volume and shape it for the forward pass.
///
/// Intensities are min-max scaled to [0,1]; a constant volume divides by 1.0
/// instead of the zero range. A 4th axis is collapsed to its first slice.
/// Anything that is not 3-dimensional after that is rejected, and the result
/// gains leading batch and channel axes: `[1, 1, D, H, W]`.
pub fn preprocess(volume: ArrayD<f32>) -> Result<Array5<f32>> {
    let mut v = volume;

    let min = v.iter().copied().fold(f32::INFINITY, f32::min);
    let max = v.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let range = max - min;
    let denom = if range > 0.0 { range } else { 1.0 };
    v.mapv_inplace(|x| (x - min) / denom);

    if v.ndim() == 4 {
        v = v.index_axis_move(Axis(3), 0);
    }
    let shape = v.shape().to_vec();
    if shape.len() != 3 {
        return Err(NeuroSegError::VolumeShape { shape });
    }

    debug!(?shape, "volume normalized");

    let v = v
        .into_dimensionality::<Ix3>()
        .map_err(|_| NeuroSegError::VolumeShape { shape })?;
    Ok(v.insert_axis(Axis(0)).insert_axis(Axis(0)))
}
