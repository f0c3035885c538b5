mod input;
mod layout;
pub mod logging;
mod visualizer;

pub use input::{InputEvent, ScriptedEvent};
pub use layout::{parse_document, LayoutError};
pub use visualizer::Visualizer;
