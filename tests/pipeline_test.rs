use anyhow::Result;
use ndarray::{ArrayD, IxDyn};

use neuroseg_rs::mocks::MockSegmentationModel;
use neuroseg_rs::{Config, VolumeProcessor};

/// Background logits everywhere except a block of confident foreground.
fn block_logits(
    shape: &[usize],
    d: std::ops::Range<usize>,
    h: std::ops::Range<usize>,
    w: std::ops::Range<usize>,
) -> ArrayD<f32> {
    let mut logits = ArrayD::from_elem(IxDyn(shape), -10.0f32);
    for di in d {
        for hi in h.clone() {
            for wi in w.clone() {
                logits[[0, 0, di, hi, wi]] = 10.0;
            }
        }
    }
    logits
}

#[test]
fn detected_block_produces_full_report() -> Result<()> {
    // 2 x 3 x 4 block in the left half of a 10^3 volume.
    let logits = block_logits(&[1, 1, 10, 10, 10], 1..3, 2..5, 0..4);
    let processor = VolumeProcessor::new(MockSegmentationModel::new(logits));

    let volume = ArrayD::<f32>::from_shape_fn(IxDyn(&[10, 10, 10]), |idx| {
        (idx[0] + idx[1] + idx[2]) as f32
    });
    let report = processor.analyze(volume)?;

    assert_eq!(report.diagnosis, "Brain Tumor Detected");
    assert_eq!(report.tumor_size, "2 x 3 x 4 vox");
    assert_eq!(report.tumor_location, "Left hemisphere");
    assert_eq!(report.confidence, 85.0);
    assert_eq!(report.severity, "High Grade");
    assert_eq!(
        report.recommendations,
        [
            "Surgical/oncology consultation".to_string(),
            "Consider MRI with contrast".to_string(),
            "Histopathological evaluation if clinically indicated".to_string(),
        ]
    );
    Ok(())
}

#[test]
fn right_half_block_is_located_in_right_hemisphere() -> Result<()> {
    let logits = block_logits(&[1, 1, 10, 10, 10], 4..6, 4..6, 7..10);
    let processor = VolumeProcessor::new(MockSegmentationModel::new(logits));

    let volume = ArrayD::<f32>::zeros(IxDyn(&[10, 10, 10]));
    let report = processor.analyze(volume)?;

    assert_eq!(report.tumor_location, "Right hemisphere");
    assert_eq!(report.tumor_size, "2 x 2 x 3 vox");
    Ok(())
}

#[test]
fn silent_model_produces_clean_report() -> Result<()> {
    let processor = VolumeProcessor::new(MockSegmentationModel::silent(&[1, 1, 10, 10, 10]));

    let volume = ArrayD::<f32>::zeros(IxDyn(&[10, 10, 10]));
    let report = processor.analyze(volume)?;

    assert_eq!(report.diagnosis, "No Tumor Detected");
    assert_eq!(report.tumor_location, "Not detected");
    assert_eq!(report.tumor_size, "0 x 0 x 0 cm");
    assert_eq!(report.confidence, 0.0);
    assert_eq!(report.severity, "Low Risk");
    Ok(())
}

#[test]
fn four_dimensional_volume_is_accepted() -> Result<()> {
    // Trailing axis gets collapsed to its first slice before inference.
    let logits = block_logits(&[1, 1, 6, 6, 6], 0..1, 0..1, 0..1);
    let processor = VolumeProcessor::new(MockSegmentationModel::new(logits));

    let volume = ArrayD::<f32>::from_shape_fn(IxDyn(&[6, 6, 6, 2]), |idx| idx[3] as f32);
    let report = processor.analyze(volume)?;

    assert_eq!(report.tumor_size, "1 x 1 x 1 vox");
    Ok(())
}

#[test]
fn class_axis_in_model_output_is_resolved_to_foreground() -> Result<()> {
    // Two-channel output: foreground channel carries the detection.
    let mut logits = ArrayD::from_elem(IxDyn(&[1, 2, 6, 6, 6]), -10.0f32);
    logits[[0, 0, 2, 2, 2]] = 10.0;
    let processor = VolumeProcessor::new(MockSegmentationModel::new(logits));

    let volume = ArrayD::<f32>::zeros(IxDyn(&[6, 6, 6]));
    let report = processor.analyze(volume)?;

    assert_eq!(report.diagnosis, "Brain Tumor Detected");
    assert_eq!(report.tumor_size, "1 x 1 x 1 vox");
    Ok(())
}

#[test]
fn json_line_matches_output_contract() -> Result<()> {
    let logits = block_logits(&[1, 1, 10, 10, 10], 1..3, 2..5, 0..4);
    let processor = VolumeProcessor::new(MockSegmentationModel::new(logits));

    let report = processor.analyze(ArrayD::<f32>::zeros(IxDyn(&[10, 10, 10])))?;
    let value: serde_json::Value = serde_json::from_str(&report.to_json_line())?;

    let object = value.as_object().unwrap();
    let expected_keys = [
        "diagnosis",
        "tumorLocation",
        "tumorSize",
        "confidence",
        "severity",
        "recommendations",
    ];
    assert_eq!(object.len(), expected_keys.len());
    for key in expected_keys {
        assert!(object.contains_key(key), "missing key {key}");
    }
    Ok(())
}

#[test]
fn validation_distinguishes_model_and_input_paths() -> Result<()> {
    let temp_dir = tempfile::TempDir::new()?;
    let model_path = temp_dir.path().join("segformer3d.onnx");
    let input_path = temp_dir.path().join("scan.nii.gz");

    let config = Config {
        model: model_path.clone(),
        input: input_path.clone(),
    };
    let err = config.validate().unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("Model not found at {}", model_path.display())
    );
    assert_eq!(err.exit_code(), 2);

    std::fs::write(&model_path, b"dummy")?;
    let err = config.validate().unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("Input not found at {}", input_path.display())
    );
    assert_eq!(err.exit_code(), 2);
    Ok(())
}
