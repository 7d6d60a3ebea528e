use ndarray::{Array3, ArrayD, ArrayView3, Axis, Ix3};
use tracing::debug;

use crate::errors::{NeuroSegError, Result};

/// Voxels must score strictly above this to count as tumor tissue.
pub const DETECTION_THRESHOLD: f32 = 0.5;

/// Reported whenever anything is detected. Placeholder until a calibrated
/// confidence is derived from the score distribution.
const FIXED_CONFIDENCE: f64 = 0.85;

/// Coarse per-run findings derived from a score mask.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskSummary {
    pub tumor_present: bool,
    pub tumor_size: String,
    pub tumor_location: String,
    pub confidence: f64,
}

/// Coerce a raw model output to a 3-D probability mask.
///
/// Every singleton axis is squeezed away, logits become probabilities via
/// sigmoid, and a residual class axis is resolved by taking the foreground
/// channel. Anything that still is not 3-dimensional is an output-shape
/// error.
pub fn coerce_mask(raw: ArrayD<f32>) -> Result<Array3<f32>> {
    let mut mask = raw;
    while let Some(axis) = mask.shape().iter().position(|&len| len == 1) {
        mask = mask.index_axis_move(Axis(axis), 0);
    }

    mask.mapv_inplace(sigmoid);

    if mask.ndim() == 4 {
        mask = mask.index_axis_move(Axis(0), 0);
    }
    let shape = mask.shape().to_vec();
    if shape.len() != 3 {
        return Err(NeuroSegError::OutputShape { shape });
    }

    mask.into_dimensionality::<Ix3>()
        .map_err(|_| NeuroSegError::OutputShape { shape })
}

/// Derive presence, bounding-box size, location, and confidence from a mask.
///
/// Size is reported in voxel units; voxel spacing never reaches this stage.
/// Location is a half-space heuristic on the width axis.
pub fn summarize_mask(mask: ArrayView3<'_, f32>) -> MaskSummary {
    let mut bounds: Option<[[usize; 2]; 3]> = None;
    for ((d, h, w), &score) in mask.indexed_iter() {
        if score > DETECTION_THRESHOLD {
            match bounds.as_mut() {
                None => bounds = Some([[d, d], [h, h], [w, w]]),
                Some(b) => {
                    for (range, coord) in b.iter_mut().zip([d, h, w]) {
                        range[0] = range[0].min(coord);
                        range[1] = range[1].max(coord);
                    }
                }
            }
        }
    }

    let Some([[dmin, dmax], [hmin, hmax], [wmin, wmax]]) = bounds else {
        return MaskSummary {
            tumor_present: false,
            tumor_size: "0 x 0 x 0 cm".to_string(),
            tumor_location: "Not detected".to_string(),
            confidence: 0.0,
        };
    };

    let (dz, dh, dw) = (dmax - dmin + 1, hmax - hmin + 1, wmax - wmin + 1);
    debug!(dz, dh, dw, "bounding box extracted");

    let width = mask.len_of(Axis(2));
    let location = if (wmin + wmax) as f64 / 2.0 > width as f64 / 2.0 {
        "Right hemisphere"
    } else {
        "Left hemisphere"
    };

    MaskSummary {
        tumor_present: true,
        tumor_size: format!("{dz} x {dh} x {dw} vox"),
        tumor_location: location.to_string(),
        confidence: FIXED_CONFIDENCE,
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
