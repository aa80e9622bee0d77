//! Software wireframe renderer
//!
//! Triangles go through a row-vector transform (`v · M`), a perspective
//! divide and a viewport mapping, then each edge is drawn with an integer
//! Bresenham rasterizer into a display surface's pixel buffer.

pub mod config;
pub mod display;
pub mod error;
pub mod line;
pub mod math3d;
pub mod mesh;
pub mod rasterizer;
pub mod scene;
pub mod transform;
pub mod util;

pub use config::RenderConfig;
pub use display::{DisplaySurface, Frame, MemorySurface};
pub use error::{RenderError, Result};
pub use math3d::{Mat4, Vec4};
pub use mesh::Mesh;
pub use rasterizer::{FrameStats, Renderer};
pub use scene::Spinner;
