use glam::Mat4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
    Lines,
}

/// A vertex attribute buffer: `num_items` items of `item_size` floats each.
#[derive(Debug)]
pub struct VertexBuffer<B> {
    pub resource: B,
    pub item_size: usize,
    pub num_items: usize,
}

#[derive(Debug)]
pub struct IndexBuffer<B> {
    pub resource: B,
    pub num_items: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct Material<'a, T> {
    pub color: [f32; 4],
    pub texture: Option<&'a T>,
}

#[derive(Debug, Clone)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// The small surface the visualization needs from a graphics backend.
///
/// Buffer and texture resources are owned by the returned handles; dropping a
/// handle releases the backend resource.
pub trait RenderContext {
    type Buffer;
    type Texture;

    fn create_vertex_buffer(&mut self, data: &[f32], item_size: usize) -> VertexBuffer<Self::Buffer>;

    fn create_index_buffer(&mut self, data: &[u32]) -> IndexBuffer<Self::Buffer>;

    fn create_texture(&mut self, image: &TextureImage) -> Self::Texture;

    fn draw_elements(
        &mut self,
        primitive: Primitive,
        vertices: &VertexBuffer<Self::Buffer>,
        tex_coord: Option<&VertexBuffer<Self::Buffer>>,
        indices: &IndexBuffer<Self::Buffer>,
        material: Material<'_, Self::Texture>,
    );

    fn set_model_view(&mut self, model_view: Mat4);

    fn model_view(&self) -> Mat4;

    fn set_projection(&mut self, projection: Mat4);

    fn projection(&self) -> Mat4;

    /// `[x, y, width, height]` in pixels.
    fn viewport(&self) -> [f32; 4];

    fn resize(&mut self, width: f32, height: f32);
}
