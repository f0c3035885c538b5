use serde::{Deserialize, Serialize};
use tilt_core::MouseButton;

/// Host input forwarded to the visualization. Coordinates are page pixels
/// with y growing downwards; `button` uses the host codes (1 left, 2 middle,
/// 3 right).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    MouseDown { x: f32, y: f32, button: i32 },
    MouseUp { x: f32, y: f32, button: i32 },
    MouseMove { x: f32, y: f32 },
    MouseOver,
    MouseOut,
    Scroll { delta: f32 },
    KeyDown { code: u32 },
    KeyUp { code: u32 },
    DoubleClick { x: f32, y: f32 },
    Resize { width: f32, height: f32 },
}

impl InputEvent {
    pub fn button(&self) -> Option<MouseButton> {
        match *self {
            InputEvent::MouseDown { button, .. } | InputEvent::MouseUp { button, .. } => {
                Some(MouseButton::from_code(button))
            }
            _ => None,
        }
    }
}

/// An input event scheduled for a given frame of a scripted run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    #[serde(default)]
    pub frame: u32,
    pub event: InputEvent,
}
