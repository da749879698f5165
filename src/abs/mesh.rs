//! Geometry upload.
//!
//! This module defines the GPU-side buffer wrappers ([`VertexArray`], [`VertexBuffer`] and
//! [`IndexBuffer`]) and the [`upload`] function which copies position data into them. All
//! geometry is position only, so every vertex array uses [`POSITION_LAYOUT`].

use std::rc::Rc;

use crate::abs::{AttribLayout, BufferId, BufferTarget, Gpu, VertexArrayId};
use crate::error::{Error, Result};

/// Number of `f32` components per vertex.
pub const COMPONENTS_PER_VERTEX: usize = 3;

/// Slot 0, three tightly packed floats.
pub const POSITION_LAYOUT: AttribLayout = AttribLayout {
    index: 0,
    components: COMPONENTS_PER_VERTEX as i32,
    stride: (COMPONENTS_PER_VERTEX * size_of::<f32>()) as i32,
    offset: 0,
};

fn as_bytes<T: Copy>(data: &[T]) -> &[u8] {
    // f32 and u32 have no padding and every bit pattern is a valid u8
    unsafe { std::slice::from_raw_parts(data.as_ptr() as *const u8, size_of_val(data)) }
}

/// Binding configuration linking buffers to attribute slots. Owns no data.
pub struct VertexArray<G: Gpu> {
    gpu: Rc<G>,
    id: VertexArrayId,
}

impl<G: Gpu> VertexArray<G> {
    pub fn new(gpu: &Rc<G>) -> Result<Self> {
        let id = gpu.create_vertex_array().map_err(Error::ResourceCreation)?;
        Ok(Self {
            gpu: Rc::clone(gpu),
            id,
        })
    }

    pub fn id(&self) -> VertexArrayId {
        self.id
    }
}

impl<G: Gpu> Drop for VertexArray<G> {
    fn drop(&mut self) {
        self.gpu.delete_vertex_array(self.id);
    }
}

/// Vertex positions stored on the GPU side.
pub struct VertexBuffer<G: Gpu> {
    gpu: Rc<G>,
    id: BufferId,
    len: usize,
}

impl<G: Gpu> VertexBuffer<G> {
    /// Creates the buffer and uploads `vertices` into it. Expects the [`VertexArray`] that
    /// should reference it to be bound.
    fn new(gpu: &Rc<G>, vertices: &[f32]) -> Result<Self> {
        let id = gpu.create_buffer().map_err(Error::ResourceCreation)?;
        let buffer = Self {
            gpu: Rc::clone(gpu),
            id,
            len: vertices.len(),
        };
        gpu.bind_buffer(BufferTarget::Array, Some(id));
        gpu.buffer_data(BufferTarget::Array, as_bytes(vertices));
        Ok(buffer)
    }

    pub fn id(&self) -> BufferId {
        self.id
    }

    /// Number of `f32` components uploaded.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of the uploaded data in bytes.
    pub fn size_bytes(&self) -> usize {
        self.len * size_of::<f32>()
    }

    pub fn vertex_count(&self) -> usize {
        self.len / COMPONENTS_PER_VERTEX
    }
}

impl<G: Gpu> Drop for VertexBuffer<G> {
    fn drop(&mut self) {
        self.gpu.delete_buffer(self.id);
    }
}

/// Vertex indices stored on the GPU side.
pub struct IndexBuffer<G: Gpu> {
    gpu: Rc<G>,
    id: BufferId,
    len: usize,
}

impl<G: Gpu> IndexBuffer<G> {
    fn new(gpu: &Rc<G>, indices: &[u32]) -> Result<Self> {
        let id = gpu.create_buffer().map_err(Error::ResourceCreation)?;
        let buffer = Self {
            gpu: Rc::clone(gpu),
            id,
            len: indices.len(),
        };
        gpu.bind_buffer(BufferTarget::ElementArray, Some(id));
        gpu.buffer_data(BufferTarget::ElementArray, as_bytes(indices));
        Ok(buffer)
    }

    pub fn id(&self) -> BufferId {
        self.id
    }

    /// Number of indices uploaded.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<G: Gpu> Drop for IndexBuffer<G> {
    fn drop(&mut self) {
        self.gpu.delete_buffer(self.id);
    }
}

/// Everything [`upload`] creates. Fields drop in declaration order, the vertex array first.
pub struct Geometry<G: Gpu> {
    pub vertex_array: VertexArray<G>,
    pub vertex_buffer: VertexBuffer<G>,
    pub index_buffer: Option<IndexBuffer<G>>,
}

/// Uploads position data (and optionally indices) and configures a vertex array for it.
///
/// Index values are not checked against the vertex count. Nothing is left bound when this
/// returns.
pub fn upload<G: Gpu>(gpu: &Rc<G>, vertices: &[f32], indices: Option<&[u32]>) -> Result<Geometry<G>> {
    let vertex_array = VertexArray::new(gpu)?;
    gpu.bind_vertex_array(Some(vertex_array.id()));

    let buffers = VertexBuffer::new(gpu, vertices).and_then(|vertex_buffer| {
        let index_buffer = indices
            .map(|indices| IndexBuffer::new(gpu, indices))
            .transpose()?;
        gpu.vertex_attrib(POSITION_LAYOUT);
        Ok((vertex_buffer, index_buffer))
    });

    // The vertex array goes first so the element buffer stays attached to it.
    gpu.bind_vertex_array(None);
    gpu.bind_buffer(BufferTarget::Array, None);
    gpu.bind_buffer(BufferTarget::ElementArray, None);

    let (vertex_buffer, index_buffer) = buffers?;
    log::debug!(
        "Uploaded {} vertices and {} indices",
        vertex_buffer.vertex_count(),
        index_buffer.as_ref().map_or(0, IndexBuffer::len)
    );

    Ok(Geometry {
        vertex_array,
        vertex_buffer,
        index_buffer,
    })
}
