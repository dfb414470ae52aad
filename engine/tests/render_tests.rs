use engine::geometry::{Point2D, Rect};
use engine::graphics::{with_viewport, Renderer2d, WHITE};
use engine::surface::{RgbaBufferSurface, SurfaceSize};
use engine::text::{Font, TextImage};
use engine::texture::Texture;

#[test]
fn tinted_block_inside_viewport() {
    let mut surface = RgbaBufferSurface::new(SurfaceSize::new(64, 64));
    let block = Texture::block(16);
    {
        let mut gfx = surface.renderer();
        gfx.clear([10, 10, 10, 255]);
        with_viewport(&mut gfx, Rect::new(16, 16, 32, 32), |gfx| {
            gfx.draw_texture(Rect::new(0, 0, 16, 16), &block, [255, 0, 0, 255]);
            // Hangs off the top-left corner of the viewport.
            gfx.draw_texture(Rect::new(-8, -8, 16, 16), &block, [0, 0, 255, 255]);
        });
    }

    assert_eq!(surface.pixel(24, 24), Some([200, 0, 0, 255]));
    assert_eq!(surface.pixel(16, 24), Some([255, 0, 0, 255]));
    assert_eq!(surface.pixel(16, 16), Some([0, 0, 200, 255]));
    assert_eq!(surface.pixel(23, 23), Some([0, 0, 110, 255]));
    assert_eq!(surface.pixel(10, 10), Some([10, 10, 10, 255]));
}

#[test]
fn text_image_renders_at_its_position() {
    let mut surface = RgbaBufferSurface::new(SurfaceSize::new(40, 20));
    let text = TextImage::new(&Font::with_scale(2), "-", WHITE)
        .unwrap()
        .at(Point2D::new(4, 2));
    text.render(&mut surface.renderer());

    // '-' lights only its middle row (rows 4..6 at scale 2, offset by y = 2).
    assert_eq!(surface.pixel(4, 6), Some(WHITE));
    assert_eq!(surface.pixel(9, 7), Some(WHITE));
    assert_eq!(surface.pixel(4, 2), Some([0, 0, 0, 0]));
    assert_eq!(surface.pixel(10, 6), Some([0, 0, 0, 0]));
}

#[test]
fn identical_draws_share_a_digest() {
    let draw = || {
        let mut surface = RgbaBufferSurface::new(SurfaceSize::new(32, 32));
        {
            let mut gfx = surface.renderer();
            gfx.clear([25, 25, 25, 255]);
            gfx.rect_outline(Rect::new(2, 2, 20, 10), WHITE);
            gfx.draw_texture(Rect::new(4, 4, 8, 8), &Texture::block(8), [0, 255, 0, 255]);
        }
        surface.digest()
    };
    assert_eq!(draw(), draw());
}
