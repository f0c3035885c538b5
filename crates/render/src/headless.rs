use std::cell::Cell;
use std::rc::Rc;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::context::{
    IndexBuffer, Material, Primitive, RenderContext, TextureImage, VertexBuffer,
};

/// Per-draw uniform block in the layout a GPU backend would upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DrawUniforms {
    pub model_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub color: [f32; 4],
}

/// CPU-side buffer. Releases its slot in the renderer's live count on drop.
#[derive(Debug)]
pub struct HeadlessBuffer {
    id: u64,
    bytes: Vec<u8>,
    live: Rc<Cell<usize>>,
}

impl HeadlessBuffer {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Drop for HeadlessBuffer {
    fn drop(&mut self) {
        self.live.set(self.live.get().saturating_sub(1));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessTexture {
    pub id: u64,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub primitive: Primitive,
    pub vertex_buffer: u64,
    pub vertex_count: usize,
    pub index_count: usize,
    pub has_tex_coord: bool,
    pub texture: Option<u64>,
    pub uniforms: DrawUniforms,
}

/// Backend without a GPU: keeps buffer contents in memory and records every
/// draw call, for the CLI and for tests.
#[derive(Debug)]
pub struct HeadlessRenderer {
    width: f32,
    height: f32,
    model_view: Mat4,
    projection: Mat4,
    next_id: u64,
    live: Rc<Cell<usize>>,
    draws: Vec<DrawRecord>,
}

impl HeadlessRenderer {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            model_view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            next_id: 1,
            live: Rc::new(Cell::new(0)),
            draws: Vec::new(),
        }
    }

    /// Number of buffers created and not yet dropped.
    pub fn live_buffers(&self) -> usize {
        self.live.get()
    }

    pub fn draws(&self) -> &[DrawRecord] {
        &self.draws
    }

    pub fn take_draws(&mut self) -> Vec<DrawRecord> {
        std::mem::take(&mut self.draws)
    }

    fn allocate(&mut self, bytes: &[u8]) -> HeadlessBuffer {
        let id = self.next_id;
        self.next_id += 1;
        self.live.set(self.live.get() + 1);
        HeadlessBuffer {
            id,
            bytes: bytes.to_vec(),
            live: Rc::clone(&self.live),
        }
    }
}

impl RenderContext for HeadlessRenderer {
    type Buffer = HeadlessBuffer;
    type Texture = HeadlessTexture;

    fn create_vertex_buffer(&mut self, data: &[f32], item_size: usize) -> VertexBuffer<HeadlessBuffer> {
        let item_size = item_size.max(1);
        VertexBuffer {
            resource: self.allocate(bytemuck::cast_slice(data)),
            item_size,
            num_items: data.len() / item_size,
        }
    }

    fn create_index_buffer(&mut self, data: &[u32]) -> IndexBuffer<HeadlessBuffer> {
        IndexBuffer {
            resource: self.allocate(bytemuck::cast_slice(data)),
            num_items: data.len(),
        }
    }

    fn create_texture(&mut self, image: &TextureImage) -> HeadlessTexture {
        let id = self.next_id;
        self.next_id += 1;
        tracing::debug!(id, width = image.width, height = image.height, "texture created");
        HeadlessTexture {
            id,
            width: image.width,
            height: image.height,
        }
    }

    fn draw_elements(
        &mut self,
        primitive: Primitive,
        vertices: &VertexBuffer<HeadlessBuffer>,
        tex_coord: Option<&VertexBuffer<HeadlessBuffer>>,
        indices: &IndexBuffer<HeadlessBuffer>,
        material: Material<'_, HeadlessTexture>,
    ) {
        self.draws.push(DrawRecord {
            primitive,
            vertex_buffer: vertices.resource.id,
            vertex_count: vertices.num_items,
            index_count: indices.num_items,
            has_tex_coord: tex_coord.is_some(),
            texture: material.texture.map(|texture| texture.id),
            uniforms: DrawUniforms {
                model_view: self.model_view.to_cols_array_2d(),
                projection: self.projection.to_cols_array_2d(),
                color: material.color,
            },
        });
    }

    fn set_model_view(&mut self, model_view: Mat4) {
        self.model_view = model_view;
    }

    fn model_view(&self) -> Mat4 {
        self.model_view
    }

    fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
    }

    fn projection(&self) -> Mat4 {
        self.projection
    }

    fn viewport(&self) -> [f32; 4] {
        [0.0, 0.0, self.width, self.height]
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }
}
