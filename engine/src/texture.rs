use crate::{geometry::Dim2D, graphics::Color};

const BLOCK_HIGHLIGHT: u8 = 255;
const BLOCK_FACE: u8 = 200;
const BLOCK_SHADOW: u8 = 110;

/// An owned RGBA image that renderers can stretch and tint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Texture {
    /// Fully transparent texture.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * 4],
        }
    }

    /// Square grey block with a one-eighth bevel: lit on the top and left edges, shaded on the
    /// bottom and right. Tinting it yields a coloured tile.
    pub fn block(size: u32) -> Self {
        let size = size.max(2);
        let bevel = (size / 8).max(1);
        let mut tex = Self::new(size, size);
        for y in 0..size {
            for x in 0..size {
                let shade = if x < bevel || y < bevel {
                    BLOCK_HIGHLIGHT
                } else if x >= size - bevel || y >= size - bevel {
                    BLOCK_SHADOW
                } else {
                    BLOCK_FACE
                };
                tex.set_texel(x, y, [shade, shade, shade, 255]);
            }
        }
        tex
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dim(&self) -> Dim2D {
        Dim2D::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Texel at `(x, y)`; coordinates past the edge are clamped.
    pub fn texel(&self, x: u32, y: u32) -> Color {
        let x = x.min(self.width.saturating_sub(1)) as usize;
        let y = y.min(self.height.saturating_sub(1)) as usize;
        let i = (y * self.width as usize + x) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    pub fn set_texel(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels[i..i + 4].copy_from_slice(&color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_has_bevel_edges() {
        let tex = Texture::block(16);
        assert_eq!(tex.dim(), Dim2D::new(16, 16));
        assert_eq!(tex.texel(0, 8), [255, 255, 255, 255]);
        assert_eq!(tex.texel(8, 8), [200, 200, 200, 255]);
        assert_eq!(tex.texel(15, 8), [110, 110, 110, 255]);
        assert_eq!(tex.texel(8, 15), [110, 110, 110, 255]);
    }

    #[test]
    fn texel_clamps_out_of_range() {
        let mut tex = Texture::new(2, 2);
        tex.set_texel(1, 1, [1, 2, 3, 4]);
        assert_eq!(tex.texel(9, 9), [1, 2, 3, 4]);
    }

    #[test]
    fn set_texel_ignores_out_of_range() {
        let mut tex = Texture::new(1, 1);
        tex.set_texel(1, 0, [9, 9, 9, 9]);
        assert_eq!(tex.texel(0, 0), [0, 0, 0, 0]);
    }
}
