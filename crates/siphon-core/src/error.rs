//! Source-definition error types
//!
//! Errors raised while validating stream descriptors or applying them to
//! response envelopes. Field-level schema mismatches are deliberately NOT
//! errors; they follow the coerce-or-null tolerance policy in [`crate::record`].

use thiserror::Error;

/// Error that can occur while defining or applying a stream descriptor.
#[derive(Debug, Error)]
pub enum SourceError {
    // Descriptor errors (surface at catalog registration)
    /// Stream descriptor failed validation.
    #[error("invalid descriptor for stream '{stream}': {message}")]
    InvalidDescriptor { stream: String, message: String },

    /// A stream with the same name is already registered.
    #[error("duplicate stream name: {name}")]
    DuplicateStream { name: String },

    /// No stream is registered under this name.
    #[error("stream not found: {name}")]
    StreamNotFound { name: String },

    // Path errors
    /// A path placeholder had no matching parameter.
    #[error("missing path parameter '{param}' in '{template}'")]
    MissingPathParam { template: String, param: String },

    /// A records-path expression does not match the supported grammar.
    #[error("invalid records path '{expression}': {message}")]
    InvalidRecordsPath { expression: String, message: String },

    // Extraction errors
    /// The response envelope did not contain the expected record array.
    #[error("envelope mismatch for stream '{stream}': {message}")]
    EnvelopeMismatch { stream: String, message: String },

    // Configuration errors
    /// Source configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl SourceError {
    /// Get an error code for classification.
    pub fn error_code(&self) -> &'static str {
        match self {
            SourceError::InvalidDescriptor { .. } => "INVALID_DESCRIPTOR",
            SourceError::DuplicateStream { .. } => "DUPLICATE_STREAM",
            SourceError::StreamNotFound { .. } => "STREAM_NOT_FOUND",
            SourceError::MissingPathParam { .. } => "MISSING_PATH_PARAM",
            SourceError::InvalidRecordsPath { .. } => "INVALID_RECORDS_PATH",
            SourceError::EnvelopeMismatch { .. } => "ENVELOPE_MISMATCH",
            SourceError::InvalidConfiguration { .. } => "INVALID_CONFIG",
        }
    }

    // Convenience constructors

    /// Create an invalid descriptor error.
    pub fn invalid_descriptor(stream: impl Into<String>, message: impl Into<String>) -> Self {
        SourceError::InvalidDescriptor {
            stream: stream.into(),
            message: message.into(),
        }
    }

    /// Create an envelope mismatch error.
    pub fn envelope_mismatch(stream: impl Into<String>, message: impl Into<String>) -> Self {
        SourceError::EnvelopeMismatch {
            stream: stream.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        SourceError::InvalidConfiguration {
            message: message.into(),
        }
    }
}

/// Result type for source-definition operations.
pub type SourceResult<T> = Result<T, SourceError>;
