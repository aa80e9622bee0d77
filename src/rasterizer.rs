//! Wireframe rasterizer
//!
//! Owns a display surface and a depth buffer. Vertices come in clip space,
//! get divided by `w`, mapped to pixels (origin top-left, +Y down) and every
//! triangle is drawn as three 1-pixel edges. Nothing is clipped against the
//! view frustum. Edges are clipped to a guard band around the frame before
//! they are rasterized, and only their on-screen span is walked, so vertices
//! with `w` near zero or behind the eye cost no more than visible ones.

use crate::display::{DisplaySurface, Frame, FrameView};
use crate::error::Result;
use crate::line::{clip_to_guard_band, line_len, rasterize_line_clipped};
use crate::math3d::{Mat4, Vec4};
use crate::mesh::Mesh;
use log::{debug, trace};

/// Depth written by `clear`: past the far plane in normalized depth
pub const CLEAR_DEPTH: f32 = 2.0;

/// Height of each stripe drawn by `fill_bands`
pub const BAND_HEIGHT: u32 = 100;

/// Counters for the frame currently being drawn, reset by `clear`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub triangles: usize,
    pub pixels_drawn: usize,
    pub pixels_clipped: usize,
}

pub struct Renderer<S: DisplaySurface> {
    surface: S,
    width: u32,
    height: u32,
    stride: usize,
    // Reset every frame but not used for occlusion yet
    depth: Vec<f32>,
    line_color: (u8, u8, u8),
    stats: FrameStats,
}

impl<S: DisplaySurface> Renderer<S> {
    /// Take ownership of a surface. Its size is fixed from here on.
    pub fn new(mut surface: S) -> Result<Self> {
        let (width, height, stride) = (surface.width(), surface.height(), surface.stride());
        Frame::new(surface.pixels_mut(), width, height, stride)?;
        debug!("renderer on {}x{} surface, stride {}", width, height, stride);

        Ok(Self {
            surface,
            width,
            height,
            stride,
            depth: vec![CLEAR_DEPTH; width as usize * height as usize],
            line_color: (0, 0, 0),
            stats: FrameStats::default(),
        })
    }

    /// Release the surface
    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width over height, as used for the projection
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn depth_buffer(&self) -> &[f32] {
        &self.depth
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn line_color(&self) -> (u8, u8, u8) {
        self.line_color
    }

    pub fn set_line_color(&mut self, r: u8, g: u8, b: u8) {
        self.line_color = (r, g, b);
    }

    /// Read back a pixel as (r, g, b)
    pub fn pixel(&self, x: i32, y: i32) -> Option<(u8, u8, u8)> {
        FrameView::new_unchecked(self.surface.pixels(), self.width, self.height, self.stride)
            .get_pixel(x, y)
    }

    fn frame(&mut self) -> Frame<'_> {
        Frame::new_unchecked(
            self.surface.pixels_mut(),
            self.width,
            self.height,
            self.stride,
        )
    }

    /// White frame (every byte 0xFF) and depth reset to `CLEAR_DEPTH`
    pub fn clear(&mut self) {
        self.frame().fill(0xFF);
        self.depth.fill(CLEAR_DEPTH);
        self.stats = FrameStats::default();
    }

    /// Debug pattern: horizontal stripes `BAND_HEIGHT` rows tall, the stripe
    /// starting at row `i` filled with the byte `i mod 256`
    pub fn fill_bands(&mut self) {
        let height = self.height;
        let mut frame = self.frame();
        for start in (0..height).step_by(BAND_HEIGHT as usize) {
            frame.fill_rows(start, BAND_HEIGHT, start as u8);
        }
    }

    /// Perspective divide, then normalized device coordinates to pixels.
    ///
    /// `x` in [-1, 1] maps to [0, width], `y` in [-1, 1] maps to
    /// [height, 0]. `z` keeps its normalized value and `w` becomes 1.
    pub fn map_to_device(&self, v: Vec4) -> Vec4 {
        let ndc = v.homogenize();
        Vec4::new(
            (ndc.x + 1.0) * 0.5 * self.width as f32,
            (1.0 - ndc.y) * 0.5 * self.height as f32,
            ndc.z,
        )
    }

    /// Draw a line between two points already in pixel space.
    /// Coordinates are truncated toward zero.
    ///
    /// Pixels of the line that fall outside the frame are counted as clipped
    /// without being visited. A line with a non-finite endpoint is skipped.
    pub fn draw_line(&mut self, a: Vec4, b: Vec4) {
        if ![a.x, a.y, b.x, b.y].iter().all(|v| v.is_finite()) {
            trace!("skipping line with non-finite endpoint {:?} {:?}", a, b);
            return;
        }
        let Some([x1, y1, x2, y2]) = clip_to_guard_band(a.x, a.y, b.x, b.y, self.width, self.height)
        else {
            self.count_clipped(a, b, 0);
            return;
        };

        let (r, g, bl) = self.line_color;
        let (width, height) = (self.width, self.height);
        let mut drawn = 0;
        let mut frame = self.frame();
        rasterize_line_clipped(x1, y1, x2, y2, width, height, |x, y| {
            if frame.set_pixel(x, y, r, g, bl) {
                drawn += 1;
            }
        });
        self.stats.pixels_drawn += drawn;
        self.count_clipped(a, b, drawn);
    }

    /// Everything on the unclipped line that was not drawn
    fn count_clipped(&mut self, a: Vec4, b: Vec4, drawn: usize) {
        let total = line_len(a.x as i64, a.y as i64, b.x as i64, b.y as i64);
        let total = usize::try_from(total).unwrap_or(usize::MAX);
        self.stats.pixels_clipped = self
            .stats
            .pixels_clipped
            .saturating_add(total.saturating_sub(drawn));
    }

    /// Map three clip-space vertices to pixels and draw the edges
    /// a-b, b-c and c-a. No fill.
    pub fn draw_triangle(&mut self, a: Vec4, b: Vec4, c: Vec4) {
        let a = self.map_to_device(a);
        let b = self.map_to_device(b);
        let c = self.map_to_device(c);
        self.draw_line(a, b);
        self.draw_line(b, c);
        self.draw_line(c, a);
        self.stats.triangles += 1;
    }

    /// Transform every vertex by `transform` and draw each triangle.
    ///
    /// A mesh whose length is not a multiple of three is rejected before
    /// anything is drawn.
    pub fn draw_mesh(&mut self, mesh: &Mesh, transform: &Mat4) -> Result<()> {
        mesh.validate()?;
        for [a, b, c] in mesh.triangles() {
            self.draw_triangle(
                a.transform(transform),
                b.transform(transform),
                c.transform(transform),
            );
        }
        Ok(())
    }

    /// Present the buffer on the surface
    pub fn update(&mut self) -> Result<()> {
        let stats = self.stats;
        trace!(
            "frame: {} triangles, {} pixels drawn, {} clipped",
            stats.triangles,
            stats.pixels_drawn,
            stats.pixels_clipped
        );
        self.surface.present()
    }
}
