//! SDL2 window surface
//!
//! Pixels are kept in a CPU-side buffer and streamed to an RGBA8888 texture
//! on every `present`.

use super::{DisplaySurface, BYTES_PER_PIXEL};
use crate::error::{RenderError, Result};
use log::debug;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

/// Host events the render loop cares about
#[derive(Debug, Clone)]
pub enum InputEvent {
    Quit,
    KeyDown(Keycode),
}

/// Window, canvas and event pump
pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    width: u32,
    height: u32,
}

impl Display {
    /// Open a centered window of the given size.
    /// vsync=true locks presents to the monitor refresh.
    pub fn open(
        title: &str,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<(Self, TextureCreator<WindowContext>)> {
        let sdl_context = sdl2::init().map_err(RenderError::Display)?;
        let video_subsystem = sdl_context.video().map_err(RenderError::Display)?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| RenderError::Display(e.to_string()))?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder
            .build()
            .map_err(|e| RenderError::Display(e.to_string()))?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump().map_err(RenderError::Display)?;

        debug!("opened {}x{} window (vsync: {})", width, height, vsync);
        Ok((
            Self {
                canvas,
                event_pump,
                width,
                height,
            },
            texture_creator,
        ))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        self.event_pump
            .poll_iter()
            .filter_map(|event| match event {
                Event::Quit { .. } => Some(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(k), ..
                } => Some(InputEvent::KeyDown(k)),
                _ => None,
            })
            .collect()
    }
}

/// A window plus the streaming texture and CPU pixel buffer behind it.
///
/// The texture borrows the `TextureCreator` returned by `Display::open`,
/// which must outlive the surface.
pub struct WindowSurface<'a> {
    display: Display,
    texture: Texture<'a>,
    pixels: Vec<u8>,
}

impl<'a> WindowSurface<'a> {
    pub fn new(display: Display, texture_creator: &'a TextureCreator<WindowContext>) -> Result<Self> {
        let (width, height) = (display.width(), display.height());
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGBA8888, width, height)
            .map_err(|e| RenderError::Display(e.to_string()))?;
        Ok(Self {
            display,
            texture,
            pixels: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
        })
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        self.display.poll_events()
    }
}

impl DisplaySurface for WindowSurface<'_> {
    fn width(&self) -> u32 {
        self.display.width
    }

    fn height(&self) -> u32 {
        self.display.height
    }

    fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    fn present(&mut self) -> Result<()> {
        let stride = self.stride();
        self.texture
            .update(None, &self.pixels, stride)
            .map_err(|e| RenderError::Display(e.to_string()))?;
        self.display
            .canvas
            .copy(&self.texture, None, None)
            .map_err(RenderError::Display)?;
        self.display.canvas.present();
        Ok(())
    }
}
