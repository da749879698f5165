//! Introductory OpenGL programs: open a window, compile a shader program and draw a triangle or
//! a rectangle every frame until the window is closed.
//!
//! The renderer is written against the [`abs::Gpu`] and [`abs::Surface`] traits. The binary
//! plugs in [`abs::GlowGpu`] and [`abs::SdlSurface`].

pub mod abs;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;

pub use error::{Error, Result, ShaderError};
