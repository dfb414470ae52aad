//! Pre-rendered text built from a tiny block font.
//!
//! A [`TextImage`] is rasterized once and re-blitted every frame, so callers rebuild it only
//! when the string changes.

use std::fmt;

use crate::{
    geometry::{Dim2D, Point2D, Rect},
    graphics::{Color, Renderer2d, WHITE},
    texture::Texture,
};

pub const GLYPH_W: u32 = 3;
pub const GLYPH_H: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    scale: u32,
}

impl Font {
    pub const LARGE: Font = Font { scale: 12 };
    pub const MEDIUM: Font = Font { scale: 8 };
    pub const SMALL: Font = Font { scale: 5 };

    pub const fn with_scale(scale: u32) -> Self {
        Self {
            scale: if scale == 0 { 1 } else { scale },
        }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Pixel height of one line.
    pub fn size(&self) -> u32 {
        GLYPH_H * self.scale
    }

    fn advance(&self) -> u32 {
        (GLYPH_W + 1) * self.scale
    }

    /// Rendered extent of `text`; the gap after the last glyph is not counted.
    pub fn measure(&self, text: &str) -> Dim2D {
        let n = text.chars().count() as u32;
        if n == 0 {
            return Dim2D::new(0, 0);
        }
        Dim2D::new(n * self.advance() - self.scale, self.size())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    Empty,
    MissingGlyph(char),
}

impl fmt::Display for TextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextError::Empty => write!(f, "cannot render empty text"),
            TextError::MissingGlyph(ch) => write!(f, "font has no glyph for {ch:?}"),
        }
    }
}

impl std::error::Error for TextError {}

/// A rendered string with a position on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextImage {
    text: String,
    texture: Texture,
    pub pos: Point2D,
}

impl TextImage {
    pub fn new(font: &Font, text: &str, color: Color) -> Result<Self, TextError> {
        if text.is_empty() {
            return Err(TextError::Empty);
        }
        let rows: Vec<[u8; GLYPH_H as usize]> = text
            .chars()
            .map(|ch| glyph_rows(ch).ok_or(TextError::MissingGlyph(ch)))
            .collect::<Result<_, _>>()?;

        let dim = font.measure(text);
        let mut texture = Texture::new(dim.w, dim.h);
        let s = font.scale();
        for (i, glyph) in rows.iter().enumerate() {
            let gx = i as u32 * font.advance();
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..GLYPH_W {
                    if bits & (1 << (GLYPH_W - 1 - col)) == 0 {
                        continue;
                    }
                    for dy in 0..s {
                        for dx in 0..s {
                            texture.set_texel(gx + col * s + dx, row as u32 * s + dy, color);
                        }
                    }
                }
            }
        }

        Ok(Self {
            text: text.to_string(),
            texture,
            pos: Point2D::ORIGIN,
        })
    }

    pub fn at(mut self, pos: Point2D) -> Self {
        self.pos = pos;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn dim(&self) -> Dim2D {
        self.texture.dim()
    }

    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, self.dim())
    }

    /// Hit test with inclusive edges on all four sides.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (x, y) = (x as i64, y as i64);
        let left = self.pos.x as i64;
        let top = self.pos.y as i64;
        x >= left
            && x <= left + self.dim().w as i64
            && y >= top
            && y <= top + self.dim().h as i64
    }

    pub fn render(&self, renderer: &mut dyn Renderer2d) {
        renderer.draw_texture(self.rect(), &self.texture, WHITE);
    }
}

fn glyph_rows(ch: char) -> Option<[u8; GLYPH_H as usize]> {
    let rows = match ch.to_ascii_uppercase() {
        ' ' => [0b000; 5],

        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],

        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b111, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b111, 0b101, 0b111, 0b110, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],

        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '>' => [0b100, 0b010, 0b001, 0b010, 0b100],
        _ => return None,
    };
    Some(rows)
}
