//! Error handling for the job finder application

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobFinderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Text extraction error: {0}")]
    TextExtraction(String),

    #[error("{service} service unavailable: {detail}")]
    ServiceUnavailable { service: String, detail: String },

    #[error("Profile response is not valid JSON: {source}")]
    ProfileParse {
        /// The unmodified generation output, kept so callers can display it.
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Export error: {0}")]
    Export(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, JobFinderError>;
