//! Utility modules for the release verifier.

pub mod errors;
pub mod logger;

pub use errors::{Result, VerifierError};
