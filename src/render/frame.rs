//! Per-frame drawing.

use crate::abs::{Gpu, ShaderProgram, VertexArray};

/// How the vertex source is walked by a draw call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawMode {
    /// Consecutive vertices starting at 0.
    Arrays,
    /// `u32` indices from the element buffer starting at offset 0.
    Indexed,
}

/// Issues exactly one triangle draw call of `count` vertices or indices.
///
/// Nothing stays bound as vertex source afterwards.
pub fn render_frame<G: Gpu>(
    gpu: &G,
    vertex_array: &VertexArray<G>,
    program: &ShaderProgram<G>,
    count: i32,
    mode: DrawMode,
) {
    program.use_program();
    gpu.bind_vertex_array(Some(vertex_array.id()));
    match mode {
        DrawMode::Arrays => gpu.draw_arrays(0, count),
        DrawMode::Indexed => gpu.draw_elements(count, 0),
    }
    gpu.bind_vertex_array(None);
}

/// Resize handler. Makes the viewport cover the whole `width` x `height` surface.
pub fn framebuffer_size_callback<G: Gpu>(gpu: &G, width: i32, height: i32) {
    log::debug!("Viewport set to {width}x{height}");
    gpu.viewport(0, 0, width, height);
}
