//! Test doubles for the [`Gpu`] and [`Surface`] seams.

use std::{
    cell::{Cell, RefCell},
    collections::{HashSet, VecDeque},
    num::NonZero,
};

use glam::Vec4;

use crate::abs::*;

/// A call that changes what ends up on screen.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    BindVertexArray(Option<VertexArrayId>),
    BufferData { target: BufferTarget, bytes: usize },
    VertexAttrib(AttribLayout),
    UseProgram(Option<ProgramId>),
    DrawArrays { first: i32, count: i32 },
    DrawElements { count: i32, offset: i32 },
    Clear(Vec4),
    Viewport(i32, i32, i32, i32),
    PolygonMode(bool),
}

#[derive(Default)]
struct State {
    next_id: u32,
    live: HashSet<u32>,
    calls: Vec<Call>,
    bound_vertex_array: Option<VertexArrayId>,
    viewport: Option<(i32, i32, i32, i32)>,
}

/// Records calls and tracks object lifetimes instead of talking to a driver.
///
/// Sources compile when they start with a `#version` line, contain `void main` and have
/// balanced braces.
#[derive(Default)]
pub struct RecordingGpu {
    state: RefCell<State>,
    pub fail_link: Cell<bool>,
    pub fail_buffer_allocation: Cell<bool>,
}

impl RecordingGpu {
    fn allocate(&self) -> NonZero<u32> {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.live.insert(id);
        NonZero::new(id).unwrap()
    }

    fn release(&self, id: NonZero<u32>) {
        let removed = self.state.borrow_mut().live.remove(&id.get());
        assert!(removed, "object {id} released twice or never created");
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn draw_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, Call::DrawArrays { .. } | Call::DrawElements { .. }))
            .collect()
    }

    pub fn clear_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Clear(_)))
            .count()
    }

    /// Number of objects created and not yet deleted.
    pub fn live_objects(&self) -> usize {
        self.state.borrow().live.len()
    }

    pub fn bound_vertex_array(&self) -> Option<VertexArrayId> {
        self.state.borrow().bound_vertex_array
    }

    pub fn current_viewport(&self) -> Option<(i32, i32, i32, i32)> {
        self.state.borrow().viewport
    }
}

fn compiles(source: &str) -> bool {
    source.trim_start().starts_with("#version")
        && source.contains("void main")
        && source.matches('{').count() == source.matches('}').count()
}

impl Gpu for RecordingGpu {
    fn create_vertex_array(&self) -> Result<VertexArrayId, String> {
        Ok(VertexArrayId(self.allocate()))
    }

    fn delete_vertex_array(&self, vertex_array: VertexArrayId) {
        self.release(vertex_array.0);
    }

    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayId>) {
        self.state.borrow_mut().bound_vertex_array = vertex_array;
        self.record(Call::BindVertexArray(vertex_array));
    }

    fn create_buffer(&self) -> Result<BufferId, String> {
        if self.fail_buffer_allocation.get() {
            return Err("out of memory".to_string());
        }
        Ok(BufferId(self.allocate()))
    }

    fn delete_buffer(&self, buffer: BufferId) {
        self.release(buffer.0);
    }

    fn bind_buffer(&self, _target: BufferTarget, _buffer: Option<BufferId>) {}

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        self.record(Call::BufferData {
            target,
            bytes: data.len(),
        });
    }

    fn vertex_attrib(&self, layout: AttribLayout) {
        self.record(Call::VertexAttrib(layout));
    }

    fn create_shader(&self, _stage: ShaderStage) -> Result<ShaderId, String> {
        Ok(ShaderId(self.allocate()))
    }

    fn compile_shader(&self, _shader: ShaderId, source: &str) -> bool {
        compiles(source)
    }

    fn shader_info_log(&self, _shader: ShaderId) -> String {
        "0:1(1): error: syntax error, unexpected end of file".to_string()
    }

    fn delete_shader(&self, shader: ShaderId) {
        self.release(shader.0);
    }

    fn create_program(&self) -> Result<ProgramId, String> {
        Ok(ProgramId(self.allocate()))
    }

    fn attach_shader(&self, _program: ProgramId, _shader: ShaderId) {}

    fn detach_shader(&self, _program: ProgramId, _shader: ShaderId) {}

    fn link_program(&self, _program: ProgramId) -> bool {
        !self.fail_link.get()
    }

    fn program_info_log(&self, _program: ProgramId) -> String {
        "error: vertex shader output `color` not read by fragment shader".to_string()
    }

    fn delete_program(&self, program: ProgramId) {
        self.release(program.0);
    }

    fn use_program(&self, program: Option<ProgramId>) {
        self.record(Call::UseProgram(program));
    }

    fn draw_arrays(&self, first: i32, count: i32) {
        self.record(Call::DrawArrays { first, count });
    }

    fn draw_elements(&self, count: i32, offset: i32) {
        self.record(Call::DrawElements { count, offset });
    }

    fn clear(&self, color: Vec4) {
        self.record(Call::Clear(color));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.state.borrow_mut().viewport = Some((x, y, width, height));
        self.record(Call::Viewport(x, y, width, height));
    }

    fn polygon_mode(&self, wireframe: bool) {
        self.record(Call::PolygonMode(wireframe));
    }
}

/// A loop that never sees a close condition fails here instead of hanging.
const MAX_SWAPS: usize = 10_000;

/// A surface driven by a script instead of a window system.
pub struct ScriptedSurface {
    pub size: (i32, i32),
    pub should_close: bool,
    /// Escape reads as pressed from this key poll (0-based) onwards.
    pub escape_from_poll: Option<usize>,
    /// Events returned by successive calls to `poll_events`.
    pub events: VecDeque<Vec<SurfaceEvent>>,
    /// A close request is delivered after this many swaps.
    pub close_after_swaps: Option<usize>,
    pub swaps: usize,
    key_polls: Cell<usize>,
}

impl ScriptedSurface {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: (width, height),
            should_close: false,
            escape_from_poll: None,
            events: VecDeque::new(),
            close_after_swaps: None,
            swaps: 0,
            key_polls: Cell::new(0),
        }
    }

    pub fn key_polls(&self) -> usize {
        self.key_polls.get()
    }
}

impl Surface for ScriptedSurface {
    fn size(&self) -> (i32, i32) {
        self.size
    }

    fn should_close(&self) -> bool {
        self.should_close
    }

    fn set_should_close(&mut self, value: bool) {
        self.should_close = value;
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        let poll = self.key_polls.get();
        self.key_polls.set(poll + 1);
        match key {
            Key::Escape => self.escape_from_poll.is_some_and(|from| poll >= from),
        }
    }

    fn swap_buffers(&mut self) {
        self.swaps += 1;
        assert!(self.swaps <= MAX_SWAPS, "render loop never terminated");
    }

    fn poll_events(&mut self) -> Vec<SurfaceEvent> {
        let mut events = self.events.pop_front().unwrap_or_default();
        if self.close_after_swaps == Some(self.swaps) {
            events.push(SurfaceEvent::CloseRequested);
        }
        events
    }
}
