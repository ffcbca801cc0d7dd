//! Error types for KTX conversion
//!
//! Only conditions that make it impossible to derive a container end up here.
//! Everything recoverable is reported through a [`crate::DiagnosticSink`].

use std::io;
use thiserror::Error;

/// Result type alias for KTX operations
pub type Result<T> = std::result::Result<T, KtxError>;

/// Main error type for KTX conversion operations
#[derive(Error, Debug)]
pub enum KtxError {
    /// IO errors when reading/writing files
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The textual document declares a format this codec does not speak
    #[error("Unknown format: expected \"{expected}\", got \"{found}\"")]
    UnknownFormat { expected: String, found: String },

    /// A percent-encoded byte string could not be decoded
    #[error("Invalid byte string encoding: {input}")]
    PercentDecode { input: String },

    /// An inline pattern does not evenly tile the declared image size
    #[error("Pattern of {pattern_len} bytes does not tile an image of {size} bytes")]
    PatternSize { pattern_len: usize, size: usize },

    /// A sidecar image could not be found in the image store
    #[error("Image not found: {name}")]
    ImageNotFound { name: String },

    /// Unknown GL enum name
    #[error("Unknown GL enum: {name}")]
    UnknownGlEnum { name: String },

    /// Format errors (malformed JSON structure, bad header values, etc.)
    #[error("Format error: {0}")]
    Format(String),

    /// Generic parsing errors
    #[error("Parse error: {message}")]
    Parse { message: String },
}

impl KtxError {
    /// Create a format error
    pub fn format<S: Into<String>>(message: S) -> Self {
        Self::Format(message.into())
    }

    /// Create a parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create an unknown format error
    pub fn unknown_format<S: Into<String>>(expected: S, found: S) -> Self {
        Self::UnknownFormat {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a percent-decoding error
    pub fn percent_decode<S: Into<String>>(input: S) -> Self {
        Self::PercentDecode {
            input: input.into(),
        }
    }

    /// Create a pattern tiling error
    pub fn pattern_size(pattern_len: usize, size: usize) -> Self {
        Self::PatternSize { pattern_len, size }
    }

    /// Create an image-not-found error
    pub fn image_not_found<S: Into<String>>(name: S) -> Self {
        Self::ImageNotFound { name: name.into() }
    }
}
