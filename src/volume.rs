use std::path::Path;

use ndarray::ArrayD;
use nifti::{IntoNdArray, NiftiObject, ReaderOptions};
use tracing::debug;

use crate::errors::{NeuroSegError, Result};

/// Decode a NIfTI file into a floating-point voxel array.
///
/// Header scaling (scl_slope / scl_inter) is applied by the reader, so the
/// returned intensities match what `get_fdata`-style accessors produce.
pub fn load_volume(path: &Path) -> Result<ArrayD<f32>> {
    let object = ReaderOptions::new()
        .read_file(path)
        .map_err(|e| NeuroSegError::VolumeRead {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

    let volume = object
        .into_volume()
        .into_ndarray::<f32>()
        .map_err(|e| NeuroSegError::VolumeRead {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

    debug!(shape = ?volume.shape(), "loaded volume");
    Ok(volume)
}
