mod context;
mod framebuffer;
mod renderer;
mod surface;

pub use context::DrawContext;
pub use framebuffer::Framebuffer;
pub use renderer::Renderer;
pub use surface::{HeadlessSurface, Surface};
