//! Graphics backend seam.
//!
//! This module defines the [`Gpu`] trait, the narrow set of graphics calls the rest of the crate
//! needs, together with the opaque handle types it hands out. [`GlowGpu`] implements it on top
//! of an OpenGL context loaded through [`glow`].

use std::{fmt, num::NonZero};

use glam::Vec4;
use glow::HasContext;

/// Handle to a vertex array object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VertexArrayId(pub NonZero<u32>);

/// Handle to a buffer object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BufferId(pub NonZero<u32>);

/// Handle to a single compiled shader stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShaderId(pub NonZero<u32>);

/// Handle to a linked shader program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProgramId(pub NonZero<u32>);

/// Which binding point a buffer is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Vertex attribute data.
    Array,
    /// Vertex indices for indexed drawing.
    ElementArray,
}

/// A programmable pipeline stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Layout of one floating point vertex attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttribLayout {
    /// Attribute slot (`layout (location = N)` in GLSL).
    pub index: u32,
    /// Number of `f32` components.
    pub components: i32,
    /// Distance in bytes between two consecutive vertices.
    pub stride: i32,
    /// Byte offset of the first component.
    pub offset: i32,
}

/// The graphics calls used by geometry upload, the shader builder and the renderer.
///
/// All methods take `&self`; implementations are expected to be used from the thread that owns
/// the context only.
pub trait Gpu {
    fn create_vertex_array(&self) -> Result<VertexArrayId, String>;
    fn delete_vertex_array(&self, vertex_array: VertexArrayId);
    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayId>);

    fn create_buffer(&self) -> Result<BufferId, String>;
    fn delete_buffer(&self, buffer: BufferId);
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferId>);
    /// Uploads `data` into the buffer bound at `target` with a static usage hint.
    fn buffer_data(&self, target: BufferTarget, data: &[u8]);
    /// Declares and enables a float attribute for the bound vertex array.
    fn vertex_attrib(&self, layout: AttribLayout);

    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderId, String>;
    /// Sets the source of `shader` and compiles it, returning the compile status.
    fn compile_shader(&self, shader: ShaderId, source: &str) -> bool;
    fn shader_info_log(&self, shader: ShaderId) -> String;
    fn delete_shader(&self, shader: ShaderId);

    fn create_program(&self) -> Result<ProgramId, String>;
    fn attach_shader(&self, program: ProgramId, shader: ShaderId);
    fn detach_shader(&self, program: ProgramId, shader: ShaderId);
    /// Links `program`, returning the link status.
    fn link_program(&self, program: ProgramId) -> bool;
    fn program_info_log(&self, program: ProgramId) -> String;
    fn delete_program(&self, program: ProgramId);
    fn use_program(&self, program: Option<ProgramId>);

    /// Draws `count` vertices as triangles, starting at `first`.
    fn draw_arrays(&self, first: i32, count: i32);
    /// Draws `count` `u32` indices as triangles, starting at byte `offset` of the element buffer.
    fn draw_elements(&self, count: i32, offset: i32);

    /// Clears the color buffer to `color`.
    fn clear(&self, color: Vec4);
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    /// Switches between filled and line rasterization of polygons.
    fn polygon_mode(&self, wireframe: bool);

    /// Short human readable description of the driver.
    fn describe(&self) -> String {
        String::from("unknown")
    }
}

/// [`Gpu`] implementation backed by a [`glow::Context`].
pub struct GlowGpu {
    gl: glow::Context,
}

impl GlowGpu {
    /// Wraps an already loaded OpenGL context.
    pub fn new(gl: glow::Context) -> Self {
        Self { gl }
    }
}

fn gl_target(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Array => glow::ARRAY_BUFFER,
        BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
    }
}

impl Gpu for GlowGpu {
    fn create_vertex_array(&self) -> Result<VertexArrayId, String> {
        unsafe { self.gl.create_vertex_array().map(|vao| VertexArrayId(vao.0)) }
    }

    fn delete_vertex_array(&self, vertex_array: VertexArrayId) {
        unsafe {
            self.gl
                .delete_vertex_array(glow::NativeVertexArray(vertex_array.0));
        }
    }

    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayId>) {
        unsafe {
            self.gl
                .bind_vertex_array(vertex_array.map(|vao| glow::NativeVertexArray(vao.0)));
        }
    }

    fn create_buffer(&self) -> Result<BufferId, String> {
        unsafe { self.gl.create_buffer().map(|buffer| BufferId(buffer.0)) }
    }

    fn delete_buffer(&self, buffer: BufferId) {
        unsafe {
            self.gl.delete_buffer(glow::NativeBuffer(buffer.0));
        }
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferId>) {
        unsafe {
            self.gl.bind_buffer(
                gl_target(target),
                buffer.map(|buffer| glow::NativeBuffer(buffer.0)),
            );
        }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        unsafe {
            self.gl
                .buffer_data_u8_slice(gl_target(target), data, glow::STATIC_DRAW);
        }
    }

    fn vertex_attrib(&self, layout: AttribLayout) {
        unsafe {
            self.gl.vertex_attrib_pointer_f32(
                layout.index,
                layout.components,
                glow::FLOAT,
                false,
                layout.stride,
                layout.offset,
            );
            self.gl.enable_vertex_attrib_array(layout.index);
        }
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderId, String> {
        let shader_type = match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        };
        unsafe { self.gl.create_shader(shader_type).map(|shader| ShaderId(shader.0)) }
    }

    fn compile_shader(&self, shader: ShaderId, source: &str) -> bool {
        let shader = glow::NativeShader(shader.0);
        unsafe {
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);
            self.gl.get_shader_compile_status(shader)
        }
    }

    fn shader_info_log(&self, shader: ShaderId) -> String {
        unsafe { self.gl.get_shader_info_log(glow::NativeShader(shader.0)) }
    }

    fn delete_shader(&self, shader: ShaderId) {
        unsafe {
            self.gl.delete_shader(glow::NativeShader(shader.0));
        }
    }

    fn create_program(&self) -> Result<ProgramId, String> {
        unsafe { self.gl.create_program().map(|program| ProgramId(program.0)) }
    }

    fn attach_shader(&self, program: ProgramId, shader: ShaderId) {
        unsafe {
            self.gl.attach_shader(
                glow::NativeProgram(program.0),
                glow::NativeShader(shader.0),
            );
        }
    }

    fn detach_shader(&self, program: ProgramId, shader: ShaderId) {
        unsafe {
            self.gl.detach_shader(
                glow::NativeProgram(program.0),
                glow::NativeShader(shader.0),
            );
        }
    }

    fn link_program(&self, program: ProgramId) -> bool {
        let program = glow::NativeProgram(program.0);
        unsafe {
            self.gl.link_program(program);
            self.gl.get_program_link_status(program)
        }
    }

    fn program_info_log(&self, program: ProgramId) -> String {
        unsafe { self.gl.get_program_info_log(glow::NativeProgram(program.0)) }
    }

    fn delete_program(&self, program: ProgramId) {
        unsafe {
            self.gl.delete_program(glow::NativeProgram(program.0));
        }
    }

    fn use_program(&self, program: Option<ProgramId>) {
        unsafe {
            self.gl
                .use_program(program.map(|program| glow::NativeProgram(program.0)));
        }
    }

    fn draw_arrays(&self, first: i32, count: i32) {
        unsafe {
            self.gl.draw_arrays(glow::TRIANGLES, first, count);
        }
    }

    fn draw_elements(&self, count: i32, offset: i32) {
        unsafe {
            self.gl
                .draw_elements(glow::TRIANGLES, count, glow::UNSIGNED_INT, offset);
        }
    }

    fn clear(&self, color: Vec4) {
        unsafe {
            self.gl.clear_color(color.x, color.y, color.z, color.w);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe {
            self.gl.viewport(x, y, width, height);
        }
    }

    fn polygon_mode(&self, wireframe: bool) {
        let mode = if wireframe { glow::LINE } else { glow::FILL };
        unsafe {
            self.gl.polygon_mode(glow::FRONT_AND_BACK, mode);
        }
    }

    fn describe(&self) -> String {
        unsafe {
            format!(
                "{} ({}), OpenGL {}",
                self.gl.get_parameter_string(glow::RENDERER),
                self.gl.get_parameter_string(glow::VENDOR),
                self.gl.get_parameter_string(glow::VERSION),
            )
        }
    }
}
