use crate::{
    geometry::{Point2D, Rect},
    surface::SurfaceSize,
    texture::Texture,
};

pub type Color = [u8; 4];

pub const BLACK: Color = [0, 0, 0, 255];
pub const WHITE: Color = [255, 255, 255, 255];

/// Unified 2D rendering interface.
///
/// All coordinates are relative to the current viewport. `push_viewport` moves the origin to the
/// pushed rect and clips every subsequent draw to it (and to any enclosing viewport) until the
/// matching `pop_viewport`.
pub trait Renderer2d {
    fn begin_frame(&mut self, size: SurfaceSize);
    fn size(&self) -> SurfaceSize;

    /// Current viewport in surface coordinates.
    fn viewport(&self) -> Rect;
    fn push_viewport(&mut self, rect: Rect);
    fn pop_viewport(&mut self);

    /// Opaque fill.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stretches `texture` over `rect`, multiplying every texel by `tint`.
    /// Fully transparent texels are skipped.
    fn draw_texture(&mut self, rect: Rect, texture: &Texture, tint: Color);

    fn rect_outline(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() {
            return;
        }
        let bottom = rect.y + rect.h as i32 - 1;
        let right = rect.x + rect.w as i32 - 1;
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, 1), color);
        self.fill_rect(Rect::new(rect.x, bottom, rect.w, 1), color);
        self.fill_rect(Rect::new(rect.x, rect.y, 1, rect.h), color);
        self.fill_rect(Rect::new(right, rect.y, 1, rect.h), color);
    }

    /// Fills the whole current viewport.
    fn clear(&mut self, color: Color) {
        let vp = self.viewport();
        self.fill_rect(Rect::from_size(vp.w, vp.h), color);
    }
}

/// Runs `draw` with `rect` pushed as the viewport, restoring the previous one afterwards.
pub fn with_viewport<R>(
    renderer: &mut dyn Renderer2d,
    rect: Rect,
    draw: impl FnOnce(&mut dyn Renderer2d) -> R,
) -> R {
    renderer.push_viewport(rect);
    let out = draw(renderer);
    renderer.pop_viewport();
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Viewport {
    origin: Point2D,
    clip: Option<Rect>,
}

/// CPU renderer that draws into an RGBA frame buffer.
pub struct CpuRenderer<'a> {
    frame: &'a mut [u8],
    size: SurfaceSize,
    viewports: Vec<Viewport>,
}

impl<'a> CpuRenderer<'a> {
    pub fn new(frame: &'a mut [u8], size: SurfaceSize) -> Self {
        Self {
            frame,
            size,
            viewports: Vec::new(),
        }
    }

    fn surface_rect(&self) -> Rect {
        Rect::from_size(self.size.width, self.size.height)
    }

    fn current(&self) -> Viewport {
        self.viewports.last().copied().unwrap_or(Viewport {
            origin: Point2D::ORIGIN,
            clip: Some(self.surface_rect()),
        })
    }

    /// Maps a viewport-relative rect to the visible part of it in surface coordinates.
    fn resolve(&self, rect: Rect) -> Option<Rect> {
        let vp = self.current();
        let abs = rect.translate(vp.origin.x, vp.origin.y);
        abs.intersect(&vp.clip?)
    }

    fn frame_ok(&self) -> bool {
        let expected_len = self.size.rgba_len();
        expected_len != 0 && self.frame.len() >= expected_len
    }

    fn offset(&self, x: i32, y: i32) -> usize {
        (y as usize * self.size.width as usize + x as usize) * 4
    }
}

impl Renderer2d for CpuRenderer<'_> {
    fn begin_frame(&mut self, size: SurfaceSize) {
        self.size = size;
        self.viewports.clear();
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn viewport(&self) -> Rect {
        let vp = self.current();
        match vp.clip {
            Some(clip) => clip,
            None => Rect::at(vp.origin, Default::default()),
        }
    }

    fn push_viewport(&mut self, rect: Rect) {
        let vp = self.current();
        let abs = rect.translate(vp.origin.x, vp.origin.y);
        let clip = vp.clip.and_then(|c| abs.intersect(&c));
        self.viewports.push(Viewport {
            origin: abs.pos(),
            clip,
        });
    }

    fn pop_viewport(&mut self) {
        self.viewports.pop();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if !self.frame_ok() {
            return;
        }
        let Some(area) = self.resolve(rect) else {
            return;
        };

        let row_bytes = area.w as usize * 4;
        let stride = self.size.width as usize * 4;
        let mut row_start = self.offset(area.x, area.y);

        let [r, g, b, a] = color;
        for _ in 0..area.h {
            let row = &mut self.frame[row_start..row_start + row_bytes];
            for px in row.chunks_exact_mut(4) {
                px[0] = r;
                px[1] = g;
                px[2] = b;
                px[3] = a;
            }
            row_start += stride;
        }
    }

    fn draw_texture(&mut self, rect: Rect, texture: &Texture, tint: Color) {
        if !self.frame_ok() || rect.is_empty() || texture.is_empty() {
            return;
        }
        let vp = self.current();
        let dest = rect.translate(vp.origin.x, vp.origin.y);
        let Some(area) = self.resolve(rect) else {
            return;
        };

        for py in area.y..area.y + area.h as i32 {
            let v = (py - dest.y) as u64 * texture.height() as u64 / dest.h as u64;
            for px in area.x..area.x + area.w as i32 {
                let u = (px - dest.x) as u64 * texture.width() as u64 / dest.w as u64;
                let texel = texture.texel(u as u32, v as u32);
                if texel[3] == 0 {
                    continue;
                }
                let i = self.offset(px, py);
                for c in 0..3 {
                    self.frame[i + c] = ((texel[c] as u16 * tint[c] as u16) / 255) as u8;
                }
                self.frame[i + 3] = 255;
            }
        }
    }
}
