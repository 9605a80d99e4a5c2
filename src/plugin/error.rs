//! Handler Bundle Error Types

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("bundle is not readable: {path}: {cause}")]
    BundleUnreadable { path: PathBuf, cause: String },

    #[error("bundle api version {found} is incompatible with host version {expected}")]
    ApiVersionMismatch { expected: u32, found: u32 },

    #[error("bundle entry '{type_name}' has no constructor")]
    NotConstructible { type_name: String },

    #[error("handler failed during '{operation}': {cause}")]
    CallbackFailed { operation: String, cause: String },

    #[error("{message}")]
    Generic { message: String },
}

/// Result type for handler operations
pub type HandlerResult<T> = Result<T, HandlerError>;
