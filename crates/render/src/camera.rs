use glam::{Mat4, Quat, Vec3};
use tilt_core::{ArcballFrame, VisualizationSettings};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub distance: f32,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self::from_settings(&VisualizationSettings::default())
    }
}

impl CameraState {
    pub fn from_settings(settings: &VisualizationSettings) -> Self {
        Self {
            distance: settings.camera_distance,
            fov_y_degrees: settings.fov_y_degrees,
            near: settings.near,
            far: settings.far,
        }
    }

    pub fn projection(&self, width: f32, height: f32) -> Mat4 {
        let aspect = width.max(1.0) / height.max(1.0);
        Mat4::perspective_rh_gl(self.fov_y_degrees.to_radians(), aspect, self.near, self.far)
    }

    /// Pulls the camera back by `distance`, applies the arcball pan and
    /// rotation, then flips y so page coordinates grow downwards on screen.
    pub fn model_view(&self, frame: ArcballFrame) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -self.distance))
            * Mat4::from_translation(frame.translation)
            * Mat4::from_quat(normalized(frame.rotation))
            * Mat4::from_scale(Vec3::new(1.0, -1.0, 1.0))
    }
}

fn normalized(rotation: Quat) -> Quat {
    let rotation = rotation.normalize();
    if rotation.is_finite() {
        rotation
    } else {
        Quat::IDENTITY
    }
}
