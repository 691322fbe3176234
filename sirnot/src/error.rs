//! Error types for `sirnot` operations.

use std::fmt;

/// Main error type for `sirnot` operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested record (or, under the strict listing policy, any
    /// active record) does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Ciphertext token does not match the `ivHex:ciphertextHex` shape
    #[error("malformed ciphertext token: {0}")]
    MalformedToken(String),

    /// Ciphertext failed padding or character checks during decryption
    /// (wrong key, cross-process token, or corrupted data)
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    /// Externalized key material could not be parsed
    #[error("invalid key material: {0}")]
    InvalidKey(String),

    /// Underlying persistence failure, wrapped with operation context
    #[error("storage failure during {operation}: {source}")]
    Storage {
        /// The service operation that was executing
        operation: &'static str,
        /// The original store error
        #[source]
        source: StoreError,
    },
}

/// Errors raised by [`NoteStore`](crate::store::NoteStore) implementations.
///
/// The service never exposes these directly; they are re-classified into
/// [`Error::Storage`] at the service boundary.
#[derive(Debug)]
pub enum StoreError {
    /// A write was rejected by the backing store
    WriteFailed(String),

    /// A read failed in the backing store
    ReadFailed(String),

    /// I/O operation failed
    Io(std::io::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteFailed(msg) => write!(f, "write failed: {msg}"),
            Self::ReadFailed(msg) => write!(f, "read failed: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
