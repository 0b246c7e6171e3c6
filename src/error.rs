use thiserror::Error;

/// Errors raised by grid views and their surfaces
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("scale must be finite and positive, got {0}")]
    InvalidScale(f64),

    /// The view transform has degenerated and cannot map screen points back to cells
    #[error("view transform is not invertible")]
    NonInvertibleTransform,

    #[error("no suitable GPU adapter found")]
    NoAdapter,

    #[error("surface not supported by adapter")]
    UnsupportedSurface,

    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("failed to create window: {0}")]
    CreateWindow(#[from] winit::error::OsError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}
