//! Tetromino templates and the piece currently in play.
//!
//! Block offsets use board orientation: `y` grows upwards, row 0 is the bottom.

use engine::geometry::{Dim2D, Point2D};
use engine::graphics::Color;

use crate::board::{COLS, ROWS};

pub const NUM_PIECE_PARTS: usize = 4;
pub const NUM_PIECE_KINDS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    S,
    Z,
    L,
    J,
    T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceTemplate {
    pub fills: [Point2D; NUM_PIECE_PARTS],
    /// Bounding box of `fills` in the unrotated orientation.
    pub size: Dim2D,
}

const fn p(x: i32, y: i32) -> Point2D {
    Point2D::new(x, y)
}

static TEMPLATES: [PieceTemplate; NUM_PIECE_KINDS] = [
    PieceTemplate {
        fills: [p(0, 0), p(1, 0), p(2, 0), p(3, 0)],
        size: Dim2D::new(4, 1),
    },
    PieceTemplate {
        fills: [p(0, 0), p(1, 0), p(0, 1), p(1, 1)],
        size: Dim2D::new(2, 2),
    },
    PieceTemplate {
        fills: [p(0, 0), p(1, 0), p(1, 1), p(2, 1)],
        size: Dim2D::new(3, 2),
    },
    PieceTemplate {
        fills: [p(0, 1), p(1, 1), p(1, 0), p(2, 0)],
        size: Dim2D::new(3, 2),
    },
    PieceTemplate {
        fills: [p(0, 0), p(1, 0), p(2, 0), p(2, 1)],
        size: Dim2D::new(3, 2),
    },
    PieceTemplate {
        fills: [p(0, 1), p(1, 1), p(2, 1), p(2, 0)],
        size: Dim2D::new(3, 2),
    },
    PieceTemplate {
        fills: [p(0, 0), p(1, 0), p(2, 0), p(1, 1)],
        size: Dim2D::new(3, 2),
    },
];

impl PieceKind {
    pub const ALL: [PieceKind; NUM_PIECE_KINDS] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % NUM_PIECE_KINDS]
    }

    pub fn template(self) -> &'static PieceTemplate {
        &TEMPLATES[self as usize]
    }

    pub const fn color(self) -> Color {
        match self {
            PieceKind::I => [255, 0, 0, 255],
            PieceKind::O => [0, 255, 0, 255],
            PieceKind::S => [0, 0, 255, 255],
            PieceKind::Z => [255, 255, 0, 255],
            PieceKind::L => [255, 0, 255, 255],
            PieceKind::J => [0, 255, 255, 255],
            PieceKind::T => [0, 128, 255, 255],
        }
    }
}

/// A tetromino instance: four block offsets plus the board position they hang from.
///
/// `kind == None` marks "nothing falling"; the offsets are then meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallingPiece {
    pub blocks: [Point2D; NUM_PIECE_PARTS],
    pub relative: Point2D,
    pub kind: Option<PieceKind>,
}

impl Default for FallingPiece {
    fn default() -> Self {
        Self::NONE
    }
}

impl FallingPiece {
    pub const NONE: FallingPiece = FallingPiece {
        blocks: [Point2D::ORIGIN; NUM_PIECE_PARTS],
        relative: Point2D::ORIGIN,
        kind: None,
    };

    /// Instantiates `kind` rotated `flips` quarter turns, anchored near the top centre.
    pub fn spawn(kind: PieceKind, flips: u32) -> Self {
        let template = kind.template();
        let mut piece = FallingPiece {
            blocks: template.fills,
            relative: Point2D::ORIGIN,
            kind: Some(kind),
        };
        for _ in 0..flips {
            piece.flip();
        }

        let (w, h) = (template.size.w as i32, template.size.h as i32);
        let (cols, rows) = (COLS as i32, ROWS as i32);
        piece.relative = if flips % 2 == 1 {
            Point2D::new(cols / 2 - h / 2, rows - w / 2 - 1)
        } else {
            Point2D::new(cols / 2 - w / 2, rows - h / 2 - 1)
        };
        piece
    }

    pub fn is_falling(&self) -> bool {
        self.kind.is_some()
    }

    pub fn color(&self) -> Option<Color> {
        self.kind.map(PieceKind::color)
    }

    /// Absolute board coordinates of the four blocks.
    pub fn cells(&self) -> [Point2D; NUM_PIECE_PARTS] {
        self.blocks.map(|b| b + self.relative)
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.relative = self.relative + Point2D::new(dx, dy);
    }

    /// Quarter turn: `(x, y) -> (-y, x)`, then shifts the offsets back to non-negative.
    pub fn flip(&mut self) {
        let mut adj = Point2D::ORIGIN;
        for block in &mut self.blocks {
            *block = Point2D::new(-block.y, block.x);
            adj.x = adj.x.max(-block.x);
            adj.y = adj.y.max(-block.y);
        }
        for block in &mut self.blocks {
            *block = *block + adj;
        }
    }

    /// Inverse of [`flip`](Self::flip): three quarter turns.
    pub fn flip_back(&mut self) {
        for _ in 0..3 {
            self.flip();
        }
    }
}
