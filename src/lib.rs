//! Release Verifier Library
//!
//! Post-step verification gate: confirms a pipeline step produced its
//! expected output directory and files, and that no file shrank beyond
//! tolerance relative to the previous release.

pub mod config;
pub mod manifest;
pub mod storage;
pub mod utils;
pub mod verify;

// Re-export commonly used types
pub use config::Config;
pub use utils::errors::VerifierError;
pub type Result<T> = std::result::Result<T, VerifierError>;
