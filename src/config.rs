use clap::Parser;
use std::path::PathBuf;

use crate::errors::{NeuroSegError, Result};

#[derive(Parser, Clone)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Path to the serialized segmentation model (ONNX graph).
    #[arg(long)]
    pub model: PathBuf,

    /// Path to the volumetric image to analyze (.nii / .nii.gz).
    #[arg(long)]
    pub input: PathBuf,
}

impl Config {
    /// Check that both files exist before any heavy work starts.
    pub fn validate(&self) -> Result<()> {
        if !self.model.exists() {
            return Err(NeuroSegError::MissingFile {
                kind: "Model",
                path: self.model.display().to_string(),
            });
        }
        if !self.input.exists() {
            return Err(NeuroSegError::MissingFile {
                kind: "Input",
                path: self.input.display().to_string(),
            });
        }
        Ok(())
    }
}
