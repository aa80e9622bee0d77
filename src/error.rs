//! Error type shared by the pipeline, the display surfaces and the config loader

use thiserror::Error;

/// Errors reported by the rendering pipeline
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("mesh holds {0} vertices, which is not a whole number of triangles")]
    IncompleteTriangle(usize),

    #[error("rotation axis must have a finite, non-zero length")]
    ZeroAxis,

    #[error("invalid perspective projection: {0}")]
    InvalidPerspective(String),

    #[error("surface buffer too small: expected at least {expected} bytes, got {actual}")]
    SurfaceSize { expected: usize, actual: usize },

    #[error("pixel ({x}, {y}) lies outside the {width}x{height} frame")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    #[error("display error: {0}")]
    Display(String),

    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
