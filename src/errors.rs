use thiserror::Error;

/// Structured error types for the tumor segmentation pipeline.
///
/// Each variant corresponds to one failure class of a run, and every class
/// carries its own process exit code so a calling process can distinguish
/// runtime issues, missing files, unsupported model formats, inference
/// errors, and malformed outputs without parsing the message.
#[derive(Error, Debug)]
pub enum NeuroSegError {
    #[error("Inference runtime unavailable: {message}. Install the ONNX Runtime shared library (https://onnxruntime.ai) or rebuild with the bundled runtime")]
    Dependency { message: String },

    #[error("{kind} not found at {path}")]
    MissingFile { kind: &'static str, path: String },

    #[error("Failed to read input volume at {path}: {source}")]
    VolumeRead {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Unexpected volume shape: {shape:?}")]
    VolumeShape { shape: Vec<usize> },

    #[error("Failed to load ONNX model. The provided file likely contains a raw parameter checkpoint without the architecture definition; export the trained model to ONNX before running inference. Error: {source}")]
    ModelLoad {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Model forward failed: {source}")]
    Forward {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Unexpected model output shape: {shape:?}")]
    OutputShape { shape: Vec<usize> },
}

pub type Result<T> = std::result::Result<T, NeuroSegError>;

impl NeuroSegError {
    /// Process exit status reported for this failure class.
    ///
    /// Volume read and shape problems count as input errors and share the
    /// missing-file code.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Dependency { .. } => 1,
            Self::MissingFile { .. } | Self::VolumeRead { .. } | Self::VolumeShape { .. } => 2,
            Self::ModelLoad { .. } => 3,
            Self::Forward { .. } => 4,
            Self::OutputShape { .. } => 5,
        }
    }
}

/// Convert ONNX Runtime errors to forward-pass errors.
///
/// Load-time failures are mapped explicitly at the call site; anything that
/// escapes through `?` during a session run belongs to the inference class.
impl From<ort::Error> for NeuroSegError {
    fn from(err: ort::Error) -> Self {
        Self::Forward {
            source: Box::new(err),
        }
    }
}
