use super::BYTES_PER_PIXEL;
use crate::error::{RenderError, Result};

/// Write a color into bytes 1..=3 of a pixel (B, G, R). Byte 0 keeps
/// whatever `clear` put there.
#[inline]
fn write_pixel(dest: &mut [u8], r: u8, g: u8, b: u8) {
    dest[1] = b;
    dest[2] = g;
    dest[3] = r;
}

/// Width, height and row stride of a pixel buffer. Owns the bounds check
/// and the byte offset of every pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    width: u32,
    height: u32,
    stride: usize,
}

impl Layout {
    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Byte offset of pixel (x, y), None outside the buffer
    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| y as usize * self.stride + x as usize * BYTES_PER_PIXEL)
    }

    fn len(&self) -> usize {
        self.stride * self.height as usize
    }
}

/// Read-only view of a surface's pixel bytes
pub struct FrameView<'a> {
    bytes: &'a [u8],
    layout: Layout,
}

impl<'a> FrameView<'a> {
    /// Wrap bytes already checked by `Frame::new` for the same dimensions
    pub(crate) fn new_unchecked(bytes: &'a [u8], width: u32, height: u32, stride: usize) -> Self {
        let layout = Layout {
            width,
            height,
            stride,
        };
        debug_assert!(bytes.len() >= layout.len());
        Self { bytes, layout }
    }

    /// Read a pixel as (r, g, b); None if out of bounds
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<(u8, u8, u8)> {
        let idx = self.layout.index(x, y)?;
        let px = &self.bytes[idx..idx + BYTES_PER_PIXEL];
        Some((px[3], px[2], px[1]))
    }
}

/// Bounds-checked view of a surface's pixel bytes for one frame
pub struct Frame<'a> {
    bytes: &'a mut [u8],
    layout: Layout,
}

impl<'a> Frame<'a> {
    /// Wrap `bytes` as `height` rows of `stride` bytes, `width` pixels each.
    ///
    /// Fails if a row cannot hold `width` pixels or the buffer cannot hold
    /// `height` rows.
    pub fn new(bytes: &'a mut [u8], width: u32, height: u32, stride: usize) -> Result<Self> {
        let row_bytes = width as usize * BYTES_PER_PIXEL;
        if stride < row_bytes {
            return Err(RenderError::SurfaceSize {
                expected: row_bytes,
                actual: stride,
            });
        }
        let layout = Layout {
            width,
            height,
            stride,
        };
        if bytes.len() < layout.len() {
            return Err(RenderError::SurfaceSize {
                expected: layout.len(),
                actual: bytes.len(),
            });
        }
        Ok(Self { bytes, layout })
    }

    /// Wrap bytes already checked by `new` for the same dimensions.
    /// Indexing stays bounds checked; a shrunken buffer panics rather than
    /// writing out of range.
    pub(crate) fn new_unchecked(bytes: &'a mut [u8], width: u32, height: u32, stride: usize) -> Self {
        let layout = Layout {
            width,
            height,
            stride,
        };
        debug_assert!(bytes.len() >= layout.len());
        Self { bytes, layout }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.layout.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.layout.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.layout.in_bounds(x, y)
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            bytes: &self.bytes[..],
            layout: self.layout,
        }
    }

    /// Set a pixel, clipping anything outside the frame.
    /// Returns false when the pixel was clipped.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8) -> bool {
        let Some(idx) = self.layout.index(x, y) else {
            return false;
        };
        write_pixel(&mut self.bytes[idx..idx + BYTES_PER_PIXEL], r, g, b);
        true
    }

    /// Like `set_pixel`, but an out-of-range pixel is an error
    pub fn try_set_pixel(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8) -> Result<()> {
        if self.set_pixel(x, y, r, g, b) {
            Ok(())
        } else {
            Err(RenderError::OutOfBounds {
                x,
                y,
                width: self.layout.width,
                height: self.layout.height,
            })
        }
    }

    /// Read a pixel as (r, g, b); None if out of bounds
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<(u8, u8, u8)> {
        self.view().get_pixel(x, y)
    }

    /// Set every byte of the frame, padding included
    pub fn fill(&mut self, value: u8) {
        let len = self.layout.len();
        self.bytes[..len].fill(value);
    }

    /// Set every byte of rows `start..start + count` (clamped to the frame)
    pub fn fill_rows(&mut self, start: u32, count: u32, value: u8) {
        let Layout { height, stride, .. } = self.layout;
        let start = start.min(height) as usize;
        let end = (start + count as usize).min(height as usize);
        self.bytes[start * stride..end * stride].fill(value);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..]
    }
}
