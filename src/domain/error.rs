//! Error types for the Userdeck plugin.
//!
//! This module defines the centralized error type [`UserdeckError`] and a type
//! alias [`Result`] for convenient error handling throughout the plugin. All
//! errors are implemented using the `thiserror` crate.
//!
//! Failures of the remote fetch itself are not represented here: they are a
//! classified, user-visible state and live in [`crate::api::FetchError`].

use thiserror::Error;

/// The main error type for Userdeck plugin operations.
#[derive(Debug, Error)]
pub enum UserdeckError {
    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations, e.g. while reading
    /// a theme file or writing trace output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Userdeck operations.
pub type Result<T> = std::result::Result<T, UserdeckError>;
