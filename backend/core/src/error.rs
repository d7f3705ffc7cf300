use thiserror::Error;

/// Top-level error type for the Dharma renderer and its export paths.
///
/// Parsing itself is total and never produces one of these; errors only
/// arise at the boundaries (speech synthesis, configuration, export).
#[derive(Debug, Error)]
pub enum DharmaError {
    #[error("speech synthesis failed ({status}): {message}")]
    Speech { status: u16, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("export failed: {0}")]
    Export(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
