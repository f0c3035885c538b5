use glam::{Quat, Vec3};
use tilt_core::{
    maybe_profiled, pick, Arcball, ArcballFrame, MeshBuilder, MouseButton, Ray, TiltSettings,
    VisualizationMesh,
};
use tilt_render::{CameraState, RenderContext, TextureCache, TextureImage, VisualizationBuffers};
use tilt_scene::{Document, NodeInfo};

use crate::input::InputEvent;

/// Ties the arcball, the document mesh, its GPU buffers and the picker to a
/// render backend.
pub struct Visualizer<R: RenderContext> {
    renderer: R,
    settings: TiltSettings,
    camera: CameraState,
    arcball: Arcball,
    frame: ArcballFrame,
    mesh: VisualizationMesh,
    buffers: Option<VisualizationBuffers<R::Buffer>>,
    textures: TextureCache<R::Texture>,
    active_texture: Option<String>,
    highlighted: Option<NodeInfo>,
}

impl<R: RenderContext> Visualizer<R> {
    pub fn new(renderer: R, settings: TiltSettings) -> Self {
        let [_, _, width, height] = renderer.viewport();
        let arcball = Arcball::with_initial(
            width.max(1.0),
            height.max(1.0),
            None,
            Vec3::ZERO,
            Quat::IDENTITY,
            settings.arcball.clone(),
        );
        let mut visualizer = Self {
            renderer,
            camera: CameraState::from_settings(&settings.visualization),
            settings,
            arcball,
            frame: ArcballFrame {
                rotation: Quat::IDENTITY,
                translation: Vec3::ZERO,
            },
            mesh: VisualizationMesh::default(),
            buffers: None,
            textures: TextureCache::new(),
            active_texture: None,
            highlighted: None,
        };
        visualizer.sync_camera();
        visualizer
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn arcball(&self) -> &Arcball {
        &self.arcball
    }

    pub fn arcball_mut(&mut self) -> &mut Arcball {
        &mut self.arcball
    }

    pub fn settings(&self) -> &TiltSettings {
        &self.settings
    }

    pub fn mesh(&self) -> &VisualizationMesh {
        &self.mesh
    }

    pub fn last_frame(&self) -> ArcballFrame {
        self.frame
    }

    pub fn highlighted(&self) -> Option<&NodeInfo> {
        self.highlighted.as_ref()
    }

    /// Rebuilds the mesh for `document` and replaces the uploaded buffers.
    pub fn load_document(&mut self, document: &Document) {
        let thickness = self.settings.visualization.stack_thickness;
        self.mesh = maybe_profiled(self.settings.profile, "build_mesh", || {
            MeshBuilder::new(document.viewport, thickness).build(document.nodes())
        });
        self.buffers = None;
        self.buffers = Some(VisualizationBuffers::upload(&mut self.renderer, &self.mesh));
        self.highlighted = None;
        tracing::info!(
            nodes = self.mesh.node_count(),
            triangles = self.mesh.triangle_count(),
            "document loaded"
        );
    }

    /// Registers a page snapshot and makes it the texture drawn on the mesh.
    pub fn set_texture(&mut self, key: impl Into<String>, image: &TextureImage) {
        let key = key.into();
        let texture = self.renderer.create_texture(image);
        self.textures.insert(key.clone(), texture);
        self.active_texture = Some(key);
    }

    pub fn clear_texture(&mut self) {
        if let Some(key) = self.active_texture.take() {
            self.textures.remove(&key);
        }
    }

    pub fn has_texture(&self) -> bool {
        self.active_texture
            .as_deref()
            .is_some_and(|key| self.textures.get(key).is_some())
    }

    pub fn reset_view(&mut self) {
        self.arcball.reset(self.settings.arcball.reset_factor);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width > 0.0 && height > 0.0) {
            tracing::warn!(width, height, "ignoring empty resize");
            return;
        }
        self.renderer.resize(width, height);
        self.arcball.resize(width, height, None);
        self.sync_camera();
    }

    /// Applies one input event. A double click picks and returns the node
    /// under the cursor.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<NodeInfo> {
        match event {
            InputEvent::MouseDown { x, y, button } => {
                self.arcball.mouse_down(x, y, MouseButton::from_code(button));
            }
            InputEvent::MouseUp { x, y, button } => {
                self.arcball.mouse_up(x, y, MouseButton::from_code(button));
            }
            InputEvent::MouseMove { x, y } => self.arcball.mouse_move(x, y),
            InputEvent::MouseOver => self.arcball.mouse_over(),
            InputEvent::MouseOut => self.arcball.mouse_out(),
            InputEvent::Scroll { delta } => self.arcball.mouse_scroll(delta),
            InputEvent::KeyDown { code } => self.arcball.key_down(code),
            InputEvent::KeyUp { code } => self.arcball.key_up(code),
            InputEvent::DoubleClick { x, y } => return self.pick(x, y).cloned(),
            InputEvent::Resize { width, height } => self.resize(width, height),
        }
        None
    }

    /// Advances the controller by `elapsed_ms` and draws the scene. Returns
    /// whether anything was drawn; nothing is drawn until both a texture and
    /// a non-empty mesh are loaded.
    pub fn frame(&mut self, elapsed_ms: f32) -> bool {
        self.arcball.advance_timers(elapsed_ms);
        self.frame = self.arcball.update(elapsed_ms);
        self.sync_camera();

        let Some(buffers) = self.buffers.as_ref() else {
            return false;
        };
        let Some(texture) = self
            .active_texture
            .as_deref()
            .and_then(|key| self.textures.get(key))
        else {
            return false;
        };
        let visualization = &self.settings.visualization;
        let wireframe = visualization
            .show_wireframe
            .then_some(visualization.wireframe_color);
        buffers.draw(
            &mut self.renderer,
            Some(texture),
            visualization.mesh_color,
            wireframe,
        )
    }

    /// Picks the node under page pixel `(x, y)` (y grows downwards) and
    /// remembers it as the highlighted node. A miss clears the highlight.
    pub fn pick(&mut self, x: f32, y: f32) -> Option<&NodeInfo> {
        let viewport = self.renderer.viewport();
        let window_y = viewport[3] - y;
        let ray = Ray::from_screen(
            x,
            window_y,
            self.renderer.model_view(),
            self.renderer.projection(),
            viewport,
        );
        let mesh = &self.mesh;
        let hit = ray.and_then(|ray| {
            maybe_profiled(self.settings.profile, "pick", || {
                pick(mesh, &ray).map(|hit| hit.info.clone())
            })
        });
        if hit.is_none() {
            tracing::debug!(x, y, "nothing under cursor");
        }
        self.highlighted = hit;
        self.highlighted.as_ref()
    }

    fn sync_camera(&mut self) {
        let [_, _, width, height] = self.renderer.viewport();
        self.renderer.set_model_view(self.camera.model_view(self.frame));
        self.renderer
            .set_projection(self.camera.projection(width, height));
    }
}
