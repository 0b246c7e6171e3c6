use std::sync::Arc;
use wgpu::BindGroup;
use winit::window::Window;

use crate::error::ViewError;
use crate::gpu::context::GpuContext;
use crate::gpu::render::BlitPipeline;
use crate::gpu::texture::FrameTexture;
use crate::grid::Color;
use crate::render::{DrawContext, Framebuffer, Surface};

/// Window-backed surface.
///
/// Cells are rasterized on the CPU into the back buffer; `present` uploads it
/// to a texture and blits that onto the swapchain image.
pub struct WindowSurface {
    window: Arc<Window>,
    gpu: GpuContext,
    blit: BlitPipeline,
    frame_texture: FrameTexture,
    bind_group: BindGroup,
    back: Framebuffer,
    background: Color,
    title: String,
    label: String,
}

impl WindowSurface {
    pub fn new(window: Arc<Window>, background: Color) -> Result<Self, ViewError> {
        log::info!("Creating GPU context...");
        let gpu = pollster::block_on(GpuContext::new(window.clone()))?;

        let size = window.inner_size();
        let blit = BlitPipeline::new(&gpu.device, gpu.format());
        let frame_texture = FrameTexture::new(
            &gpu.device,
            FrameTexture::format_for(gpu.format()),
            size.width,
            size.height,
        );
        let bind_group = blit.create_bind_group(&gpu.device, &frame_texture.view);

        Ok(Self {
            window,
            gpu,
            blit,
            frame_texture,
            bind_group,
            back: Framebuffer::new(size.width, size.height, background),
            background,
            title: String::new(),
            label: String::new(),
        })
    }

    /// The window has no label widget, so the readout rides along in the title bar
    fn refresh_title(&self) {
        if self.label.is_empty() {
            self.window.set_title(&self.title);
        } else {
            self.window
                .set_title(&format!("{} | {}", self.title, self.label));
        }
    }

    fn recreate_frame_texture(&mut self) {
        self.frame_texture = FrameTexture::new(
            &self.gpu.device,
            FrameTexture::format_for(self.gpu.format()),
            self.back.width(),
            self.back.height(),
        );
        self.bind_group = self
            .blit
            .create_bind_group(&self.gpu.device, &self.frame_texture.view);
    }
}

impl Surface for WindowSurface {
    fn size(&self) -> (u32, u32) {
        (self.back.width(), self.back.height())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        self.back.resize(width, height, self.background);
    }

    fn begin_draw(&mut self) -> DrawContext<'_> {
        DrawContext::new(&mut self.back)
    }

    fn present(&mut self) -> Result<(), ViewError> {
        // Minimized windows have nothing to show
        if self.back.width() == 0 || self.back.height() == 0 {
            return Ok(());
        }
        if !self.frame_texture.matches(&self.back) {
            self.recreate_frame_texture();
        }
        self.frame_texture.upload(&self.gpu.queue, &self.back);

        let output = match self.gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.gpu.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("present-encoder"),
            });
        self.blit
            .draw(&mut encoder, &view, &self.bind_group, self.background);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        output.present();
        Ok(())
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.refresh_title();
    }

    fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
        self.refresh_title();
    }
}
