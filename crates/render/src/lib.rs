mod buffers;
mod camera;
mod context;
mod headless;
mod texture;

pub use buffers::VisualizationBuffers;
pub use camera::CameraState;
pub use context::{IndexBuffer, Material, Primitive, RenderContext, TextureImage, VertexBuffer};
pub use headless::{DrawRecord, DrawUniforms, HeadlessBuffer, HeadlessRenderer, HeadlessTexture};
pub use texture::TextureCache;
