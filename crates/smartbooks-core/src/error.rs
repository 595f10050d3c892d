//! Error types for the smartbooks-core library.
//!
//! Extraction itself never fails: a rule that does not match or a value
//! that does not normalize is a field-scoped omission, not an error. The
//! types here cover the collaborator seams (OCR, persistence) and the
//! surrounding glue.

use thiserror::Error;

/// Main error type for the smartbooks library.
#[derive(Error, Debug)]
pub enum SmartbooksError {
    /// OCR provider error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Persistence sink error.
    #[error("sink error: {0}")]
    Sink(#[from] SinkError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors reported by an OCR provider.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The provider could not decode the input image.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),
}

/// Errors reported by a persistence sink.
#[derive(Error, Debug)]
pub enum SinkError {
    /// The sink could not store the raw audit record.
    #[error("failed to store raw record for {filename}: {reason}")]
    Raw { filename: String, reason: String },

    /// The sink could not store the structured row.
    #[error("failed to store structured record: {0}")]
    Structured(String),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Row serialization failure.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for the smartbooks library.
pub type Result<T> = std::result::Result<T, SmartbooksError>;
