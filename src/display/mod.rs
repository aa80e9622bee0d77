//! Display surfaces: where the rasterizer's pixels live and how they get shown
//!
//! The renderer never talks to a window directly. It owns a `DisplaySurface`
//! and borrows its pixel bytes through a bounds-checked `Frame` while drawing.

mod frame;
mod memory;
#[cfg(feature = "sdl")]
pub mod sdl;

pub use frame::{Frame, FrameView};
pub use memory::MemorySurface;

use crate::error::Result;

pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;

/// Every pixel is 4 bytes: byte 0 is left alone by line drawing,
/// bytes 1..=3 hold blue, green, red (RGBA8888 on little-endian)
pub const BYTES_PER_PIXEL: usize = 4;

/// A pixel buffer of fixed size plus a way to show it
pub trait DisplaySurface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Bytes per row
    fn stride(&self) -> usize {
        self.width() as usize * BYTES_PER_PIXEL
    }

    fn pixels(&self) -> &[u8];

    fn pixels_mut(&mut self) -> &mut [u8];

    /// Make the current buffer contents visible
    fn present(&mut self) -> Result<()>;
}
