//! The play screen: board panel on the left, score above it, next-piece preview on the right.

use engine::geometry::{Dim2D, Point2D, Rect};
use engine::graphics::{with_viewport, Color, Renderer2d, BLACK, WHITE};
use engine::input::{InputEvent, Key};
use engine::text::{Font, TextImage};
use engine::texture::Texture;

use crate::board::{COLS, ROWS};
use crate::pieces::{FallingPiece, NUM_PIECE_PARTS};
use crate::screens::{
    Screen, ScreenContext, ScreenError, ScreenId, Transition, BACKGROUND, FOREGROUND,
};
use crate::tetris_core::{Step, TetrisCore};

pub const PADDING_PX: i32 = 30;
const BLOCK_TEXTURE_PX: u32 = 32;

/// Pixel geometry of the play screen.
///
/// Horizontally: padding, board, padding, preview column (four blocks wide), padding.
/// Vertically: padding, score line, padding, board, padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLayout {
    pub block: Dim2D,
    pub panel: Rect,
    score_font_px: i32,
}

impl GameLayout {
    pub fn new(screen: Dim2D, score_font: &Font) -> Self {
        let font_px = score_font.size() as i32;
        let top_margin = PADDING_PX * 2 + font_px;
        let block_w = (screen.w as i32 - 3 * PADDING_PX) / (COLS as i32 + 4);
        let block_h = (screen.h as i32 - top_margin - PADDING_PX) / ROWS as i32;
        let block = Dim2D::new(block_w.max(1) as u32, block_h.max(1) as u32);
        let panel = Rect::new(
            PADDING_PX,
            top_margin,
            block.w * COLS as u32,
            block.h * ROWS as u32,
        );
        Self {
            block,
            panel,
            score_font_px: font_px,
        }
    }

    /// Panel-relative rect of board cell `(x, y)`; row 0 is drawn at the bottom.
    pub fn cell_rect(&self, x: i32, y: i32) -> Rect {
        let (w, h) = (self.block.w as i32, self.block.h as i32);
        Rect::new(x * w, (ROWS as i32 - y - 1) * h, self.block.w, self.block.h)
    }

    /// Screen position where block offset `(0, 0)` of the preview lands.
    pub fn preview_origin(&self) -> Point2D {
        Point2D::new(
            PADDING_PX * 2 + self.panel.w as i32,
            PADDING_PX * 2 + self.score_font_px + self.block.h as i32 * NUM_PIECE_PARTS as i32,
        )
    }
}

pub struct GameScreen {
    core: TetrisCore,
    layout: GameLayout,
    font: Font,
    block: Texture,
    label: TextImage,
    points_text: TextImage,
    shown_points: u32,
}

impl GameScreen {
    pub fn new(screen: Dim2D, core: TetrisCore) -> Result<Self, ScreenError> {
        let font = Font::MEDIUM;
        let layout = GameLayout::new(screen, &font);
        let label = TextImage::new(&font, "Pts", FOREGROUND)
            .map_err(ScreenError::text("score label"))?
            .at(Point2D::new(PADDING_PX, PADDING_PX));
        let points_text = Self::points_image(&font, &layout, 0)?;
        Ok(Self {
            core,
            layout,
            font,
            block: Texture::block(BLOCK_TEXTURE_PX),
            label,
            points_text,
            shown_points: 0,
        })
    }

    pub fn core(&self) -> &TetrisCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut TetrisCore {
        &mut self.core
    }

    pub fn layout(&self) -> &GameLayout {
        &self.layout
    }

    pub fn points_text(&self) -> &TextImage {
        &self.points_text
    }

    fn points_image(font: &Font, layout: &GameLayout, points: u32) -> Result<TextImage, ScreenError> {
        let image = TextImage::new(font, &points.to_string(), FOREGROUND)
            .map_err(ScreenError::text("score"))?;
        let x = PADDING_PX + layout.panel.w as i32 - image.dim().w as i32;
        Ok(image.at(Point2D::new(x, PADDING_PX)))
    }

    fn refresh_points_text(&mut self) -> Result<(), ScreenError> {
        let points = self.core.points();
        if points == self.shown_points {
            return Ok(());
        }
        self.points_text = Self::points_image(&self.font, &self.layout, points)?;
        self.shown_points = points;
        Ok(())
    }

    fn draw_block(&self, renderer: &mut dyn Renderer2d, rect: Rect, color: Color) {
        renderer.draw_texture(rect, &self.block, color);
    }

    fn render_panel(&self, renderer: &mut dyn Renderer2d) {
        let board = self.core.board();
        for y in 0..ROWS {
            for x in 0..COLS {
                let color = board.cell(x, y).map_or(BLACK, |kind| kind.color());
                self.draw_block(renderer, self.layout.cell_rect(x as i32, y as i32), color);
            }
        }

        let piece = self.core.falling_piece();
        if let Some(color) = piece.color() {
            for cell in piece.cells() {
                self.draw_block(renderer, self.layout.cell_rect(cell.x, cell.y), color);
            }
        }

        renderer.rect_outline(Rect::from_size(self.layout.panel.w, self.layout.panel.h), WHITE);
    }

    fn render_preview(&self, renderer: &mut dyn Renderer2d, piece: &FallingPiece) {
        let Some(color) = piece.color() else {
            return;
        };
        let origin = self.layout.preview_origin();
        let (w, h) = (self.layout.block.w as i32, self.layout.block.h as i32);
        for b in piece.blocks {
            let rect = Rect::new(origin.x + b.x * w, origin.y - b.y * h, self.layout.block.w, self.layout.block.h);
            self.draw_block(renderer, rect, color);
        }
    }
}

impl Screen for GameScreen {
    fn focus(&mut self, ctx: &mut ScreenContext<'_>) -> Result<(), ScreenError> {
        self.core.reset(ctx.clock.now_ms());
        self.points_text = Self::points_image(&self.font, &self.layout, 0)?;
        self.shown_points = 0;
        log::info!("new round");
        Ok(())
    }

    fn update(&mut self, ctx: &mut ScreenContext<'_>) -> Result<Transition, ScreenError> {
        match self.core.step(ctx.clock.now_ms()) {
            Step::Spawned if self.core.is_colliding() => {
                let points = self.core.points();
                let rank = ctx.high_scores.insert(points);
                log::info!("game over with {points} points (rank {rank:?})");
                return Ok(Transition::To(ScreenId::Menu));
            }
            Step::Fixated(clear) if clear.lines > 0 => self.refresh_points_text()?,
            _ => {}
        }
        Ok(Transition::Stay)
    }

    fn handle_event(
        &mut self,
        event: &InputEvent,
        ctx: &mut ScreenContext<'_>,
    ) -> Result<Transition, ScreenError> {
        match event {
            InputEvent::KeyDown(Key::Left) => {
                self.core.move_left();
            }
            InputEvent::KeyDown(Key::Right) => {
                self.core.move_right();
            }
            InputEvent::KeyDown(Key::Down) => {
                self.core.move_down(ctx.clock.now_ms());
            }
            InputEvent::KeyDown(Key::Up) => {
                self.core.rotate();
            }
            InputEvent::KeyDown(Key::Escape) => {
                log::info!("round abandoned at {} points", self.core.points());
                return Ok(Transition::To(ScreenId::Menu));
            }
            _ => {}
        }
        Ok(Transition::Stay)
    }

    fn render(&self, renderer: &mut dyn Renderer2d) {
        renderer.clear(BACKGROUND);
        with_viewport(renderer, self.layout.panel, |gfx| self.render_panel(gfx));
        self.label.render(renderer);
        self.points_text.render(renderer);
        self.render_preview(renderer, self.core.next_piece());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_for_default_window() {
        let layout = GameLayout::new(Dim2D::new(640, 640), &Font::MEDIUM);
        assert_eq!(layout.block, Dim2D::new(39, 25));
        assert_eq!(layout.panel, Rect::new(30, 100, 390, 500));
        assert_eq!(layout.preview_origin(), Point2D::new(450, 200));
    }

    #[test]
    fn cell_rect_flips_rows() {
        let layout = GameLayout::new(Dim2D::new(640, 640), &Font::MEDIUM);
        assert_eq!(layout.cell_rect(0, 0), Rect::new(0, 475, 39, 25));
        assert_eq!(layout.cell_rect(9, 19), Rect::new(351, 0, 39, 25));
        assert_eq!(layout.cell_rect(2, 20), Rect::new(78, -25, 39, 25));
    }
}
