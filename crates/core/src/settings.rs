use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltSettings {
    pub arcball: ArcballSettings,
    pub visualization: VisualizationSettings,
    pub profile: bool,
}

#[derive(Debug)]
pub enum SettingsError {
    Parse(String),
    Invalid(&'static str),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Parse(message) => write!(f, "settings parse error: {message}"),
            SettingsError::Invalid(field) => write!(f, "invalid settings value: {field}"),
        }
    }
}

impl TiltSettings {
    pub fn from_json(data: &str) -> Result<Self, SettingsError> {
        let settings: TiltSettings =
            serde_json::from_str(data).map_err(|err| SettingsError::Parse(err.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        serde_json::to_string_pretty(self).map_err(|err| SettingsError::Parse(err.to_string()))
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let arcball = &self.arcball;
        if arcball.scroll_min > arcball.scroll_max {
            return Err(SettingsError::Invalid("arcball.scroll_min"));
        }
        if !(arcball.reset_factor > 0.0 && arcball.reset_factor < 1.0) {
            return Err(SettingsError::Invalid("arcball.reset_factor"));
        }
        if self.visualization.stack_thickness <= 0.0 {
            return Err(SettingsError::Invalid("visualization.stack_thickness"));
        }
        if self.visualization.near <= 0.0 || self.visualization.far <= self.visualization.near {
            return Err(SettingsError::Invalid("visualization.far"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcballSettings {
    pub scroll_min: f32,
    pub scroll_max: f32,
    pub scroll_speed: f32,
    pub zoom_step: f32,
    pub key_rotation_step: f32,
    pub key_translation_step: f32,
    pub reset_factor: f32,
    pub frame_delta: f32,
}

impl Default for ArcballSettings {
    fn default() -> Self {
        Self {
            scroll_min: -3000.0,
            scroll_max: 500.0,
            scroll_speed: 50.0,
            zoom_step: 0.1,
            key_rotation_step: 0.2,
            key_translation_step: 50.0,
            reset_factor: 0.9,
            frame_delta: 25.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizationSettings {
    pub stack_thickness: f32,
    pub camera_distance: f32,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub show_wireframe: bool,
    pub mesh_color: [f32; 4],
    pub wireframe_color: [f32; 4],
}

impl Default for VisualizationSettings {
    fn default() -> Self {
        Self {
            stack_thickness: 15.0,
            camera_distance: 900.0,
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 10000.0,
            show_wireframe: true,
            mesh_color: [1.0, 1.0, 1.0, 1.0],
            wireframe_color: [0.0, 0.0, 0.0, 0.25],
        }
    }
}
