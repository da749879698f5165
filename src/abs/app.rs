//! SDL2 and OpenGL window management.
//!
//! This module defines the [`SdlSurface`] struct which encapsulates the SDL2 window and the
//! OpenGL context created for it, and implements [`Surface`] for it.

use sdl2::{event::Event, event::WindowEvent, keyboard::Scancode};

use crate::abs::{GlowGpu, Key, Surface, SurfaceEvent};
use crate::config::WindowConfig;
use crate::error::{Error, Result};

/// The [`SdlSurface`] struct encapsulates the SDL2 window and its OpenGL context.
///
/// Dropping it destroys the context, the window and finally the SDL subsystems.
pub struct SdlSurface {
    _gl_context: sdl2::video::GLContext,
    window: sdl2::video::Window,
    event_pump: sdl2::EventPump,
    video_subsystem: sdl2::VideoSubsystem,
    _sdl: sdl2::Sdl,
    should_close: bool,
}

fn surface_error(error: impl ToString) -> Error {
    Error::SurfaceCreation(error.to_string())
}

impl SdlSurface {
    /// Opens a resizable window with an OpenGL 3.3 core context and makes the context current.
    pub fn new(config: &WindowConfig) -> Result<Self> {
        let sdl = sdl2::init().map_err(surface_error)?;
        let video_subsystem = sdl.video().map_err(surface_error)?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);

        let window = video_subsystem
            .window(&config.title, config.width, config.height)
            .opengl()
            .resizable()
            .build()
            .map_err(surface_error)?;
        let gl_context = window.gl_create_context().map_err(surface_error)?;
        window.gl_make_current(&gl_context).map_err(surface_error)?;
        let event_pump = sdl.event_pump().map_err(surface_error)?;

        log::info!(
            "Created {}x{} window \"{}\"",
            config.width,
            config.height,
            config.title
        );

        Ok(Self {
            _gl_context: gl_context,
            window,
            event_pump,
            video_subsystem,
            _sdl: sdl,
            should_close: false,
        })
    }

    /// Loads the OpenGL entry points of the current context.
    pub fn load_gl(&self) -> Result<GlowGpu> {
        if self.video_subsystem.gl_get_proc_address("glClear").is_null() {
            return Err(Error::GraphicsFunctionLoad(
                "glClear is not available".to_string(),
            ));
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                self.video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        Ok(GlowGpu::new(gl))
    }
}

impl Surface for SdlSurface {
    fn size(&self) -> (i32, i32) {
        let (width, height) = self.window.drawable_size();
        (width as i32, height as i32)
    }

    fn should_close(&self) -> bool {
        self.should_close
    }

    fn set_should_close(&mut self, value: bool) {
        self.should_close = value;
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        let scancode = match key {
            Key::Escape => Scancode::Escape,
        };
        self.event_pump
            .keyboard_state()
            .is_scancode_pressed(scancode)
    }

    fn swap_buffers(&mut self) {
        self.window.gl_swap_window();
    }

    fn poll_events(&mut self) -> Vec<SurfaceEvent> {
        self.event_pump
            .poll_iter()
            .filter_map(|event| match event {
                Event::Quit { .. }
                | Event::Window {
                    win_event: WindowEvent::Close,
                    ..
                } => Some(SurfaceEvent::CloseRequested),
                Event::Window {
                    win_event: WindowEvent::Resized(width, height),
                    ..
                } => Some(SurfaceEvent::Resized { width, height }),
                _ => None,
            })
            .collect()
    }
}
