//! Custom error types for the release verifier.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerifierError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to retrieve {key} from bucket {bucket}: {reason}")]
    Retrieval {
        bucket: String,
        key: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, VerifierError>;
