//! Error types for KTX binary parsing

use ktx_juggle_core::KtxError;
use thiserror::Error;

/// Result type for KTX binary operations
pub type Result<T> = std::result::Result<T, BinaryError>;

/// Errors that can occur during KTX binary parsing and writing
#[derive(Error, Debug)]
pub enum BinaryError {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Not enough data
    #[error("Not enough data: expected {expected}, got {actual}")]
    NotEnoughData { expected: usize, actual: usize },

    /// Invalid file format
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    /// Errors from the shared core
    #[error(transparent)]
    Core(#[from] KtxError),
}

impl BinaryError {
    /// Create a new invalid format error
    pub fn invalid_format<S: Into<String>>(msg: S) -> Self {
        Self::InvalidFormat(msg.into())
    }

    /// Create a new not enough data error
    pub fn not_enough_data(expected: usize, actual: usize) -> Self {
        Self::NotEnoughData { expected, actual }
    }

    /// The stream ended before a field was complete
    pub fn is_eof(&self) -> bool {
        match self {
            Self::NotEnoughData { .. } => true,
            Self::Io(e) => e.kind() == std::io::ErrorKind::UnexpectedEof,
            _ => false,
        }
    }
}

impl From<BinaryError> for KtxError {
    fn from(err: BinaryError) -> Self {
        match err {
            BinaryError::Io(e) => KtxError::Io(e),
            BinaryError::Core(e) => e,
            other => KtxError::format(other.to_string()),
        }
    }
}
