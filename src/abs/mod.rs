//! This module contains the building blocks of the renderer: the graphics backend seam,
//! geometry upload, shader management and the window surface.

pub mod app;
pub mod gpu;
pub mod mesh;
pub mod shader;
pub mod surface;

#[cfg(test)]
pub mod testing;

pub use app::*;
pub use gpu::*;
pub use mesh::*;
pub use shader::*;
pub use surface::*;
