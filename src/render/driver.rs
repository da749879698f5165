//! The render loop.
//!
//! [`RenderLoop`] owns the surface and the startup-built [`Pipeline`] and drives them through
//! `Initializing -> Running -> Terminated`. Each iteration polls input, clears, draws, presents
//! and then delivers window events, so a close request raised during an iteration is only seen
//! at the next iteration boundary.

use std::rc::Rc;

use glam::Vec4;

use crate::abs::{Gpu, Key, Surface, SurfaceEvent};
use crate::config::{Config, ShaderFailurePolicy};
use crate::error::{Error, Result};
use crate::render::frame::framebuffer_size_callback;
use crate::render::scene::Pipeline;

/// Lifecycle of a [`RenderLoop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Initializing,
    Running,
    Terminated,
}

/// Drives the poll-render-present cycle.
///
/// The pipeline is declared before the surface so GPU objects are deleted while the context is
/// still alive.
pub struct RenderLoop<S: Surface, G: Gpu> {
    pipeline: Option<Pipeline<G>>,
    gpu: Rc<G>,
    surface: S,
    clear_color: Vec4,
    state: LoopState,
    frames_presented: u64,
}

impl<S: Surface, G: Gpu> RenderLoop<S, G> {
    /// Sets up the viewport and builds the pipeline for the configured scene.
    ///
    /// Shader failures are returned unless the config asks to keep running without a pipeline.
    pub fn new(surface: S, gpu: Rc<G>, config: &Config) -> Result<Self> {
        let mut render_loop = Self {
            pipeline: None,
            gpu,
            surface,
            clear_color: config.clear_color(),
            state: LoopState::Initializing,
            frames_presented: 0,
        };

        let (width, height) = render_loop.surface.size();
        framebuffer_size_callback(&*render_loop.gpu, width, height);
        render_loop.gpu.polygon_mode(config.wireframe);

        render_loop.pipeline = match Pipeline::for_scene(&render_loop.gpu, config.scene) {
            Ok(pipeline) => pipeline,
            Err(Error::Shader(e)) if config.shader_failure == ShaderFailurePolicy::Continue => {
                log::error!("{e}");
                log::warn!("Continuing without a shader program, nothing will be drawn");
                None
            }
            Err(e) => return Err(e),
        };

        log::info!("Running scene \"{}\"", config.scene);
        render_loop.state = LoopState::Running;
        Ok(render_loop)
    }

    /// Runs frames until the surface reports it should close, then terminates.
    ///
    /// Returns the process exit code.
    pub fn run(&mut self) -> i32 {
        while self.state == LoopState::Running && !self.surface.should_close() {
            self.frame();
        }
        self.terminate();
        0
    }

    /// One iteration of the loop body.
    pub fn frame(&mut self) {
        self.process_input();

        self.gpu.clear(self.clear_color);
        if let Some(pipeline) = &self.pipeline {
            pipeline.draw(&self.gpu);
        }

        self.surface.swap_buffers();
        self.frames_presented += 1;

        for event in self.surface.poll_events() {
            match event {
                SurfaceEvent::Resized { width, height } => {
                    framebuffer_size_callback(&*self.gpu, width, height)
                }
                SurfaceEvent::CloseRequested => self.surface.set_should_close(true),
            }
        }
    }

    fn process_input(&mut self) {
        if self.surface.is_key_pressed(Key::Escape) {
            self.surface.set_should_close(true);
        }
    }

    /// Releases the GPU resources. The surface itself goes when the loop is dropped.
    fn terminate(&mut self) {
        if self.state == LoopState::Terminated {
            return;
        }
        self.pipeline = None;
        self.state = LoopState::Terminated;
        log::debug!("Render loop finished after {} frames", self.frames_presented);
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn has_pipeline(&self) -> bool {
        self.pipeline.is_some()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
