/// RGBA color with 8 bits per channel.
///
/// Layout: 4 bytes, `[r, g, b, a]`, matching `Rgba8Unorm` texels so a slice of
/// colors can be uploaded to the GPU as-is.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    /// Opaque color from red, green and blue channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_size() {
        assert_eq!(std::mem::size_of::<Color>(), 4);
    }

    #[test]
    fn test_texel_byte_order() {
        let colors = [Color::rgba(1, 2, 3, 4), Color::RED];
        let bytes: &[u8] = bytemuck::cast_slice(&colors);
        assert_eq!(bytes, &[1, 2, 3, 4, 255, 0, 0, 255]);
    }

    #[test]
    fn test_rgb_is_opaque() {
        assert_eq!(Color::rgb(10, 20, 30).a, 255);
    }
}
