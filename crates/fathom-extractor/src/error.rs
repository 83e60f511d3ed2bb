//! Error types for the extraction engine
//!
//! Only schema configuration can fail. Extraction itself is total: malformed
//! input degrades to empty fields and empty lists, never to an error.

use thiserror::Error;

/// Errors that can occur while loading or validating a document schema
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Schema contents are inconsistent or unusable
    #[error("Invalid schema: {0}")]
    Schema(String),
}
