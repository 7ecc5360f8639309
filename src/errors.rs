use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors that can occur while drawing or running the shell
#[derive(Error, Debug)]
pub enum DrawError {
    /// Canvas dimensions must not be negative
    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    /// Not enough memory for the requested canvas or layer
    #[error("Not enough memory for a {width}x{height} canvas")]
    AllocationFailed { width: i32, height: i32 },

    /// Only horizontal and vertical lines can be drawn
    #[error("Line ({x1}, {y1}) - ({x2}, {y2}) is neither horizontal nor vertical")]
    UnsupportedLine { x1: i32, y1: i32, x2: i32, y2: i32 },

    /// A pixel with no owning layer; always a bug
    #[error("Internal error: no layer owns pixel ({x}, {y})")]
    UnownedPixel { x: i32, y: i32 },

    /// Error related to IO operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error reading or parsing the configuration file
    #[error("Configuration error for {}: {message}", path.display())]
    Configuration { path: PathBuf, message: Arc<String> },

    /// Unknown property or a value of the wrong type
    #[error("Invalid property {name}: {message}")]
    InvalidProperty {
        name: Arc<String>,
        message: Arc<String>,
    },
}

impl DrawError {
    /// Whether the session can keep going after this error
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::UnownedPixel { .. })
    }
}

/// Type alias for Result with DrawError
pub type Result<T> = std::result::Result<T, DrawError>;
