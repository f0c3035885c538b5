use tilt_core::VisualizationMesh;

use crate::context::{IndexBuffer, Material, Primitive, RenderContext, VertexBuffer};

/// GPU copies of a [`VisualizationMesh`]: the solid textured mesh and a line
/// index buffer that reuses the same vertices for the wireframe overlay.
pub struct VisualizationBuffers<B> {
    pub vertices: VertexBuffer<B>,
    pub tex_coord: VertexBuffer<B>,
    pub indices: IndexBuffer<B>,
    pub wireframe_indices: IndexBuffer<B>,
}

impl<B> VisualizationBuffers<B> {
    pub fn upload<C>(ctx: &mut C, mesh: &VisualizationMesh) -> Self
    where
        C: RenderContext<Buffer = B>,
    {
        let vertices = ctx.create_vertex_buffer(bytemuck::cast_slice(&mesh.vertices), 3);
        let tex_coord = ctx.create_vertex_buffer(bytemuck::cast_slice(&mesh.tex_coord), 2);
        let indices = ctx.create_index_buffer(&mesh.indices);
        let wireframe_indices = ctx.create_index_buffer(&mesh.wireframe_indices);
        tracing::debug!(
            vertices = vertices.num_items,
            indices = indices.num_items,
            wireframe = wireframe_indices.num_items,
            "visualization buffers uploaded"
        );
        Self {
            vertices,
            tex_coord,
            indices,
            wireframe_indices,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.num_items == 0
    }

    /// Draws the textured mesh and, when `wireframe` carries a color, the
    /// outline overlay. Returns `false` without drawing for an empty mesh.
    pub fn draw<C>(
        &self,
        ctx: &mut C,
        texture: Option<&C::Texture>,
        color: [f32; 4],
        wireframe: Option<[f32; 4]>,
    ) -> bool
    where
        C: RenderContext<Buffer = B>,
    {
        if self.is_empty() {
            return false;
        }
        ctx.draw_elements(
            Primitive::Triangles,
            &self.vertices,
            Some(&self.tex_coord),
            &self.indices,
            Material { color, texture },
        );
        if let Some(color) = wireframe {
            ctx.draw_elements(
                Primitive::Lines,
                &self.vertices,
                None,
                &self.wireframe_indices,
                Material {
                    color,
                    texture: None,
                },
            );
        }
        true
    }
}
