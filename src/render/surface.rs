use crate::error::ViewError;
use crate::grid::Color;
use crate::render::context::DrawContext;
use crate::render::framebuffer::Framebuffer;

/// A double-buffered presentation target.
///
/// Drawing goes to an off-screen back buffer through [`DrawContext`];
/// nothing becomes visible until [`present`](Surface::present).
pub trait Surface {
    /// Size of the back buffer in pixels
    fn size(&self) -> (u32, u32);

    /// Match a new visible size. Back buffer contents are lost.
    fn resize(&mut self, width: u32, height: u32);

    fn begin_draw(&mut self) -> DrawContext<'_>;

    /// Publish the back buffer
    fn present(&mut self) -> Result<(), ViewError>;

    fn set_title(&mut self, title: &str);

    /// Show the pointer readout next to the view
    fn set_label(&mut self, label: &str);
}

/// In-memory surface: presenting copies the back buffer into a readable front buffer
#[derive(Debug)]
pub struct HeadlessSurface {
    back: Framebuffer,
    front: Framebuffer,
    title: String,
    label: String,
    presents: u64,
}

impl HeadlessSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            back: Framebuffer::new(width, height, Color::BLACK),
            front: Framebuffer::new(width, height, Color::BLACK),
            title: String::new(),
            label: String::new(),
            presents: 0,
        }
    }

    /// What was visible after the last present
    pub fn front(&self) -> &Framebuffer {
        &self.front
    }

    pub fn back(&self) -> &Framebuffer {
        &self.back
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn present_count(&self) -> u64 {
        self.presents
    }
}

impl Surface for HeadlessSurface {
    fn size(&self) -> (u32, u32) {
        (self.back.width(), self.back.height())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.back.resize(width, height, Color::BLACK);
    }

    fn begin_draw(&mut self) -> DrawContext<'_> {
        DrawContext::new(&mut self.back)
    }

    fn present(&mut self) -> Result<(), ViewError> {
        self.front.copy_from(&self.back);
        self.presents += 1;
        Ok(())
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
    }
}
