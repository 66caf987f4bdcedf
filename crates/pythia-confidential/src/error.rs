//! error types for the confidential engine boundary

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// every engine failure is fatal to the enclosing ledger operation
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    #[error("sealed input proof verification failed")]
    InvalidProof,

    #[error("address holds no decrypt grant for this handle")]
    AccessDenied,

    #[error("unknown ciphertext handle")]
    UnknownHandle,

    #[error("ciphertext width does not match the requested operation")]
    WidthMismatch,
}
