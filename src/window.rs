//! SDL2 window used by the demo viewer to show a [`Surface`].

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::WindowContext;
use thiserror::Error;

use crate::render::{RasterSurface, Surface};

/// Failures reported by SDL while opening or drawing to the viewer window.
#[derive(Debug, Error)]
pub enum WindowError {
    #[error("sdl: {0}")]
    Sdl(String),

    #[error("frame is {frame_width}x{frame_height}, window is {window_width}x{window_height}")]
    SizeMismatch {
        frame_width: u32,
        frame_height: u32,
        window_width: u32,
        window_height: u32,
    },
}

impl From<String> for WindowError {
    fn from(message: String) -> Self {
        WindowError::Sdl(message)
    }
}

fn sdl_err(err: impl ToString) -> WindowError {
    WindowError::Sdl(err.to_string())
}

pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
pub const FPS: u64 = 30;
pub const FRAME_TARGET_TIME: f64 = 1000.0 / FPS as f64;

/// Keys the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    NextScene,
    ToggleClipper,
    Left,
    Right,
    Up,
    Down,
    Save,
}

impl Key {
    fn from_keycode(keycode: Keycode) -> Option<Self> {
        match keycode {
            Keycode::Tab | Keycode::Space => Some(Key::NextScene),
            Keycode::C => Some(Key::ToggleClipper),
            Keycode::Left | Keycode::A => Some(Key::Left),
            Keycode::Right | Keycode::D => Some(Key::Right),
            Keycode::Up | Keycode::W => Some(Key::Up),
            Keycode::Down | Keycode::S => Some(Key::Down),
            Keycode::P => Some(Key::Save),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Quit,
    Resize(u32, u32),
    KeyDown(Key),
}

pub struct FrameLimiter {
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
        }
    }

    /// Milliseconds since the previous call, sleeping first if the frame
    /// came in under budget.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let budget = FRAME_TARGET_TIME as u64;
        let elapsed = window.timer().ticks64().saturating_sub(self.previous_frame_time);
        if let Some(remaining) = budget.checked_sub(elapsed).filter(|&ms| ms > 0) {
            std::thread::sleep(std::time::Duration::from_millis(remaining));
        }

        let now = window.timer().ticks64();
        let delta = now.saturating_sub(self.previous_frame_time);
        self.previous_frame_time = now;
        delta
    }
}

/// Viewer window holding one streaming ARGB texture the size of the frame.
pub struct Window {
    canvas: Canvas<sdl2::video::Window>,
    // Declared before `texture_creator` so it is dropped first.
    texture: Texture<'static>,
    texture_creator: Box<TextureCreator<WindowContext>>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, WindowError> {
        let sdl = sdl2::init()?;
        let timer_subsystem = sdl.timer()?;
        let canvas = sdl
            .video()?
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(sdl_err)?
            .into_canvas()
            .build()
            .map_err(sdl_err)?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl.event_pump()?;
        let texture = Self::create_texture(&texture_creator, width, height)?;

        Ok(Self {
            canvas,
            texture,
            texture_creator,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    fn create_texture(
        creator: &TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Texture<'static>, WindowError> {
        // SAFETY: the creator is boxed, never moved out of `Window`, and the
        // texture field is dropped before it.
        let creator: &'static TextureCreator<WindowContext> = unsafe { &*(creator as *const _) };
        creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(sdl_err)
    }

    /// Drains pending SDL events.
    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        self.event_pump
            .poll_iter()
            .filter_map(|event| match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => Some(WindowEvent::Quit),
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => Some(WindowEvent::Resize(w as u32, h as u32)),
                Event::KeyDown {
                    keycode: Some(keycode),
                    ..
                } => Key::from_keycode(keycode).map(WindowEvent::KeyDown),
                _ => None,
            })
            .collect()
    }

    /// Streams `surface` to the window. The surface must match the window size.
    pub fn present(&mut self, surface: &Surface) -> Result<(), WindowError> {
        if (surface.width(), surface.height()) != (self.width, self.height) {
            return Err(WindowError::SizeMismatch {
                frame_width: surface.width(),
                frame_height: surface.height(),
                window_width: self.width,
                window_height: self.height,
            });
        }

        let pitch = self.width as usize * 4;
        self.texture
            .update(None, &surface.to_argb_bytes(), pitch)
            .map_err(sdl_err)?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), WindowError> {
        self.width = width;
        self.height = height;
        self.texture = Self::create_texture(&self.texture_creator, width, height)?;
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), WindowError> {
        self.canvas.window_mut().set_title(title).map_err(sdl_err)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}
