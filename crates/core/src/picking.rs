use glam::{Mat4, Vec3};
use tilt_scene::NodeInfo;

use crate::math::unproject;
use crate::visualization::{VisualizationMesh, INDICES_PER_NODE};

pub const PICK_EPSILON: f32 = 1.0e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub position: Vec3,
    pub direction: Vec3,
    pub look_at: Vec3,
}

impl Ray {
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self {
            position,
            direction: (look_at - position).normalize_or_zero(),
            look_at,
        }
    }

    /// Ray through window pixel `(x, y)` from the near plane to the far plane.
    /// `y` is measured from the bottom of `viewport`, as in OpenGL.
    pub fn from_screen(
        x: f32,
        y: f32,
        model_view: Mat4,
        projection: Mat4,
        viewport: [f32; 4],
    ) -> Option<Self> {
        let near = unproject(Vec3::new(x, y, 0.0), model_view, projection, viewport)?;
        let far = unproject(Vec3::new(x, y, 1.0), model_view, projection, viewport)?;
        let ray = Self::new(near, far);
        if ray.direction == Vec3::ZERO {
            return None;
        }
        Some(ray)
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.position + self.direction * distance
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriangleHit {
    /// The triangle has zero area.
    Degenerate,
    Disjoint,
    /// The ray runs inside the triangle's plane.
    Coplanar,
    Intersects(Vec3),
}

impl TriangleHit {
    pub fn point(self) -> Option<Vec3> {
        match self {
            TriangleHit::Intersects(point) => Some(point),
            _ => None,
        }
    }
}

pub fn intersect_ray_triangle(v0: Vec3, v1: Vec3, v2: Vec3, ray: &Ray) -> TriangleHit {
    let u = v1 - v0;
    let v = v2 - v0;
    let n = u.cross(v);
    if n == Vec3::ZERO {
        return TriangleHit::Degenerate;
    }

    let w0 = ray.position - v0;
    let a = -n.dot(w0);
    let b = n.dot(ray.direction);
    if b.abs() < PICK_EPSILON {
        return if a == 0.0 {
            TriangleHit::Coplanar
        } else {
            TriangleHit::Disjoint
        };
    }

    let r = a / b;
    if r < 0.0 {
        return TriangleHit::Disjoint;
    }

    let point = ray.at(r);
    let uu = u.dot(u);
    let uv = u.dot(v);
    let vv = v.dot(v);
    let w = point - v0;
    let wu = w.dot(u);
    let wv = w.dot(v);
    let d = uv * uv - uu * vv;

    let s = (uv * wv - vv * wu) / d;
    if !(0.0..=1.0).contains(&s) {
        return TriangleHit::Disjoint;
    }
    let t = (uv * wu - uu * wv) / d;
    if t < 0.0 || s + t > 1.0 {
        return TriangleHit::Disjoint;
    }
    TriangleHit::Intersects(point)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickHit<'a> {
    pub node_index: usize,
    pub triangle_start: usize,
    pub location: Vec3,
    pub info: &'a NodeInfo,
}

/// Every triangle the ray crosses, largest `z` first. Ties keep mesh order.
pub fn intersect_mesh<'a>(mesh: &'a VisualizationMesh, ray: &Ray) -> Vec<PickHit<'a>> {
    let mut hits = Vec::new();
    for triangle_start in (0..mesh.indices.len().saturating_sub(2)).step_by(3) {
        let Some([a, b, c]) = mesh.triangle(triangle_start) else {
            continue;
        };
        let hit = intersect_ray_triangle(Vec3::from(a), Vec3::from(b), Vec3::from(c), ray);
        let Some(location) = hit.point() else {
            continue;
        };
        let node_index = triangle_start / INDICES_PER_NODE;
        let Some(info) = mesh.node_information.get(node_index) else {
            continue;
        };
        hits.push(PickHit {
            node_index,
            triangle_start,
            location,
            info,
        });
    }
    hits.sort_by(|a, b| b.location.z.total_cmp(&a.location.z));
    hits
}

pub fn pick<'a>(mesh: &'a VisualizationMesh, ray: &Ray) -> Option<PickHit<'a>> {
    let hit = intersect_mesh(mesh, ray).into_iter().next();
    if let Some(hit) = &hit {
        tracing::debug!(
            node = hit.node_index,
            label = %hit.info.label,
            z = hit.location.z,
            "pick hit"
        );
    } else {
        tracing::debug!("pick missed");
    }
    hit
}
