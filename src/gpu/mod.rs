mod context;
mod render;
mod surface;
mod texture;

pub use context::GpuContext;
pub use render::BlitPipeline;
pub use surface::WindowSurface;
pub use texture::FrameTexture;
