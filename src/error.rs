//! Error types for the application shell.
//!
//! The animation engine itself never fails; these cover window and GL
//! setup, font loading and the on-disk state.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// I/O error reading or writing saved state
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Saved state could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Window, display or GL context creation failed
    #[error("Window setup failed: {0}")]
    Window(String),

    /// femtovg canvas or renderer creation failed
    #[error("Canvas error: {0}")]
    Canvas(String),

    /// No usable font was found
    #[error("Font error: {0}")]
    Font(String),
}

pub type Result<T> = std::result::Result<T, Error>;
