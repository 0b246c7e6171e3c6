use crate::grid::Color;

/// CPU pixel buffer, row-major, `width * height` colors
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Change dimensions. Contents are discarded and refilled with `fill`.
    pub fn resize(&mut self, width: u32, height: u32, fill: Color) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width as usize * height as usize, fill);
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Write one pixel; coordinates outside the buffer are clipped
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.pixels[index] = color;
    }

    /// Fill the half-open pixel block `[x0, x1) x [y0, y1)`, clipped to the buffer
    pub fn fill_block(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Color) {
        let x0 = x0.clamp(0, self.width as i64) as usize;
        let x1 = x1.clamp(0, self.width as i64) as usize;
        let y0 = y0.clamp(0, self.height as i64) as usize;
        let y1 = y1.clamp(0, self.height as i64) as usize;
        if x0 >= x1 {
            return;
        }
        let stride = self.width as usize;
        for y in y0..y1 {
            self.pixels[y * stride + x0..y * stride + x1].fill(color);
        }
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Raw RGBA8 bytes for texture upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Take over another buffer's size and contents
    pub fn copy_from(&mut self, other: &Framebuffer) {
        self.width = other.width;
        self.height = other.height;
        self.pixels.clone_from(&other.pixels);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_filled() {
        let buffer = Framebuffer::new(3, 2, Color::WHITE);
        assert_eq!(buffer.pixels().len(), 6);
        assert_eq!(buffer.pixel(2, 1), Some(Color::WHITE));
        assert_eq!(buffer.pixel(3, 0), None);
        assert_eq!(buffer.as_bytes().len(), 24);
    }

    #[test]
    fn test_fill_block_clips() {
        let mut buffer = Framebuffer::new(4, 4, Color::BLACK);
        buffer.fill_block(-2, 2, 2, 10, Color::RED);
        assert_eq!(buffer.pixel(0, 2), Some(Color::RED));
        assert_eq!(buffer.pixel(1, 3), Some(Color::RED));
        assert_eq!(buffer.pixel(2, 3), Some(Color::BLACK));
        assert_eq!(buffer.pixel(0, 1), Some(Color::BLACK));
    }

    #[test]
    fn test_set_pixel_out_of_range_is_ignored() {
        let mut buffer = Framebuffer::new(2, 2, Color::BLACK);
        buffer.set_pixel(-1, 0, Color::RED);
        buffer.set_pixel(2, 1, Color::RED);
        assert!(buffer.pixels().iter().all(|c| *c == Color::BLACK));
    }

    #[test]
    fn test_resize_refills() {
        let mut buffer = Framebuffer::new(2, 2, Color::RED);
        buffer.resize(3, 1, Color::BLUE);
        assert_eq!(buffer.width(), 3);
        assert_eq!(buffer.height(), 1);
        assert!(buffer.pixels().iter().all(|c| *c == Color::BLUE));
    }
}
