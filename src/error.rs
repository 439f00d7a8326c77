//! Global error handling for ctxdump
//!
//! Only configuration problems and a failure to create the output file are
//! fatal. Per-file read failures never reach this type; they are rendered
//! inline by the content renderer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Global error type for ctxdump operations
#[derive(Error, Debug)]
pub enum ContextError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The output document could not be created
    #[error("Failed to create {}: {source}", .path.display())]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Specialized Result type for ctxdump operations
pub type Result<T> = std::result::Result<T, ContextError>;

/// Creates a ContextError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::ContextError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

// Lets `main` keep returning io::Result
impl From<ContextError> for io::Error {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}
