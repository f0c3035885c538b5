mod arcball;
mod math;
mod picking;
mod profiling;
mod settings;
mod timer;
mod visualization;

pub use arcball::{
    keys, Arcball, ArcballFrame, ArcballMode, ArcballViewport, MouseButton, SphereVectors,
};
pub use math::{lerp_toward, point_to_sphere, project, quat_from_euler, unproject};
pub use picking::{
    intersect_mesh, intersect_ray_triangle, pick, PickHit, Ray, TriangleHit, PICK_EPSILON,
};
pub use profiling::{maybe_profiled, profiled};
pub use settings::{ArcballSettings, SettingsError, TiltSettings, VisualizationSettings};
pub use timer::{Interval, SIXTY_HZ_MS};
pub use visualization::{
    build_visualization, MeshBuilder, VisualizationMesh, INDICES_PER_NODE, VERTICES_PER_NODE,
    WIREFRAME_INDICES_PER_NODE,
};
