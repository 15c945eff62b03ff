//! Error types for the Scenery engine
//!
//! This module defines the error type shared by the registries, the uniform
//! binder and the scene orchestrator, plus the `engine_err!`/`engine_bail!`
//! macros that log an error at the point where it is raised.

use std::fmt;

/// Result type for Scenery engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Scenery engine errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Image file could not be read or decoded (bad path, corrupt data)
    ImageLoad {
        /// Path or label of the image source
        path: String,
        /// Decoder or I/O failure message
        reason: String,
    },

    /// Decoded image has a channel count other than 3 (RGB) or 4 (RGBA)
    UnsupportedFormat {
        /// Tag the texture would have been registered under
        tag: String,
        /// Channel count reported by the decoder
        channels: u8,
    },

    /// Every texture slot is already allocated
    SlotExhausted {
        /// Tag the texture would have been registered under
        tag: String,
        /// Registry capacity (texture unit limit)
        capacity: usize,
    },

    /// A resource with the same tag is already registered
    DuplicateTag {
        /// The rejected tag
        tag: String,
    },

    /// Invalid resource description (material values, light index, config, ...)
    InvalidResource(String),

    /// Backend-specific error (device, shader program, geometry library)
    Backend(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ImageLoad { path, reason } => {
                write!(f, "Could not load image '{}': {}", path, reason)
            }
            Error::UnsupportedFormat { tag, channels } => write!(
                f,
                "Unsupported image format for '{}': {} channels (expected 3 or 4)",
                tag, channels
            ),
            Error::SlotExhausted { tag, capacity } => write!(
                f,
                "No free texture slot for '{}': all {} slots are in use",
                tag, capacity
            ),
            Error::DuplicateTag { tag } => write!(f, "Tag '{}' is already registered", tag),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::Backend(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an error (with file:line) and evaluate to it
///
/// # Example
///
/// ```no_run
/// use scenery_engine::{engine_err, scenery::Error};
///
/// let err = engine_err!("scenery::Example", Error::Backend("device lost".to_string()));
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $err:expr) => {{
        let err = $err;
        $crate::engine_error!($source, "{}", err);
        err
    }};
}

/// Log an error (with file:line) and return it from the enclosing function
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $err:expr) => {
        return Err($crate::engine_err!($source, $err))
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
