use glam::Vec2;
use tilt_scene::{Document, Element, NodeInfo, Viewport};

pub const VERTICES_PER_NODE: usize = 12;
pub const INDICES_PER_NODE: usize = 30;
pub const WIREFRAME_INDICES_PER_NODE: usize = 20;

/// Relative indices of the ten triangles of one stack: front, bottom, top,
/// then the right and left sides.
const STACK_INDICES: [u32; INDICES_PER_NODE] = [
    0, 1, 2, 0, 2, 3, //
    4, 5, 6, 4, 6, 7, //
    8, 9, 10, 8, 10, 11, //
    9, 5, 6, 9, 6, 10, //
    8, 4, 7, 8, 7, 11,
];

/// Relative indices of the ten outline segments of one stack: the front
/// outline, the four edges running back in depth, then the back edges of the
/// bottom and top faces. The two vertical back edges stay open; the back of
/// a stack is never drawn.
const STACK_WIREFRAME: [u32; WIREFRAME_INDICES_PER_NODE] = [
    0, 1, 1, 2, 2, 3, 3, 0, //
    8, 11, 9, 10, 5, 6, 4, 7, //
    10, 11, 6, 7,
];

/// Combined geometry for every drawable node of a document.
///
/// Each node contributes 12 vertices: the front face (0-3), the bottom
/// extrusion (4-7) and the top extrusion (8-11), every quad wound clockwise
/// from its top-left corner. `node_information[k]` owns vertices
/// `[12k, 12k + 12)` and indices `[30k, 30k + 30)`.
#[derive(Debug, Clone, Default)]
pub struct VisualizationMesh {
    pub vertices: Vec<[f32; 3]>,
    pub tex_coord: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    pub wireframe_indices: Vec<u32>,
    pub node_information: Vec<NodeInfo>,
}

impl VisualizationMesh {
    pub fn node_count(&self) -> usize {
        self.node_information.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Node owning the triangle whose first index sits at `triangle_start`.
    pub fn node_for_triangle(&self, triangle_start: usize) -> Option<&NodeInfo> {
        self.node_information.get(triangle_start / INDICES_PER_NODE)
    }

    pub fn triangle(&self, triangle_start: usize) -> Option<[[f32; 3]; 3]> {
        let tri = self.indices.get(triangle_start..triangle_start + 3)?;
        Some([
            *self.vertices.get(tri[0] as usize)?,
            *self.vertices.get(tri[1] as usize)?,
            *self.vertices.get(tri[2] as usize)?,
        ])
    }

    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        if self.vertices.is_empty() {
            return None;
        }
        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        for vertex in &self.vertices {
            for i in 0..3 {
                min[i] = min[i].min(vertex[i]);
                max[i] = max[i].max(vertex[i]);
            }
        }
        Some((min, max))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MeshBuilder {
    viewport: Viewport,
    texture_size: Vec2,
    thickness: f32,
}

impl MeshBuilder {
    pub fn new(viewport: Viewport, thickness: f32) -> Self {
        Self {
            viewport,
            texture_size: Vec2::new(viewport.width, viewport.height),
            thickness,
        }
    }

    /// Size of the page snapshot the front faces sample from; defaults to the
    /// viewport size.
    pub fn with_texture_size(mut self, width: f32, height: f32) -> Self {
        self.texture_size = Vec2::new(width, height);
        self
    }

    pub fn build<'a, I>(&self, nodes: I) -> VisualizationMesh
    where
        I: IntoIterator<Item = (&'a Element, u32)>,
    {
        let mut mesh = VisualizationMesh::default();
        let mut skipped = 0usize;
        for (element, depth) in nodes {
            if !self.push_node(&mut mesh, element, depth) {
                skipped += 1;
            }
        }
        tracing::debug!(
            nodes = mesh.node_count(),
            skipped,
            vertices = mesh.vertices.len(),
            "visualization mesh built"
        );
        mesh
    }

    /// Appends one node's stack to `mesh`; returns `false` when the node is
    /// too small to draw.
    pub fn push_node(&self, mesh: &mut VisualizationMesh, element: &Element, depth: u32) -> bool {
        let bounds = element.bounds;
        if !bounds.is_drawable() {
            return false;
        }

        let half_width = self.viewport.width * 0.5;
        let half_height = self.viewport.height * 0.5;
        let x = bounds.x - half_width;
        let y = bounds.y - half_height;
        let z = depth as f32 * self.thickness;
        let w = bounds.width;
        let h = bounds.height;
        let back = z - self.thickness;

        let base = mesh.vertices.len() as u32;
        mesh.vertices.extend_from_slice(&[
            [x, y, z],
            [x + w, y, z],
            [x + w, y + h, z],
            [x, y + h, z],
            [x, y + h, z],
            [x + w, y + h, z],
            [x + w, y + h, back],
            [x, y + h, back],
            [x, y, z],
            [x + w, y, z],
            [x + w, y, back],
            [x, y, back],
        ]);

        let u0 = (x + half_width) / self.texture_size.x;
        let v0 = (y + half_height) / self.texture_size.y;
        let u1 = (x + w + half_width) / self.texture_size.x;
        let v1 = (y + h + half_height) / self.texture_size.y;
        mesh.tex_coord
            .extend_from_slice(&[[u0, v0], [u1, v0], [u1, v1], [u0, v1]]);
        mesh.tex_coord.extend_from_slice(&[[0.0, 0.0]; 8]);

        mesh.indices
            .extend(STACK_INDICES.iter().map(|offset| base + offset));
        mesh.wireframe_indices
            .extend(STACK_WIREFRAME.iter().map(|offset| base + offset));
        mesh.node_information
            .push(NodeInfo::from_element(element, depth));
        true
    }
}

pub fn build_visualization(document: &Document, thickness: f32) -> VisualizationMesh {
    MeshBuilder::new(document.viewport, thickness).build(document.nodes())
}
