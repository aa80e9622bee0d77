use super::{DisplaySurface, BYTES_PER_PIXEL, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::Result;

/// Off-screen surface: a plain byte buffer that counts presents.
/// Used for headless rendering and tests.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    presented: usize,
}

impl MemorySurface {
    /// Surface with the default resolution (640x480)
    pub fn new() -> Self {
        Self::with_size(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
            width,
            height,
            presented: 0,
        }
    }

    /// Number of times `present` has been called
    pub fn presented(&self) -> usize {
        self.presented
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for MemorySurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    fn present(&mut self) -> Result<()> {
        self.presented += 1;
        Ok(())
    }
}
