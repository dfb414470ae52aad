//! Board simulation: falling piece control, gravity, fixation and scoring.
//!
//! Everything here is deterministic given the RNG seed and the timestamps passed in.

use rand::rngs::StdRng;
use rand::Rng;

use crate::board::{Board, LineClear};
use crate::pieces::{FallingPiece, NUM_PIECE_KINDS, PieceKind};

pub const FALL_DELAY_MS: u64 = 300;

/// What a single simulation step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The fall delay has not elapsed yet.
    Waiting,
    /// Gravity moved the piece one row down.
    Fell,
    /// The piece landed and was merged into the board.
    Fixated(LineClear),
    /// Nothing was falling, so the next piece entered play.
    Spawned,
}

pub struct TetrisCore {
    board: Board,
    falling: FallingPiece,
    next: FallingPiece,
    points: u32,
    last_update_ms: u64,
    fall_delay_ms: u64,
    rng: StdRng,
}

impl TetrisCore {
    pub fn new(rng: StdRng, fall_delay_ms: u64) -> Self {
        let mut core = Self {
            board: Board::new(),
            falling: FallingPiece::NONE,
            next: FallingPiece::NONE,
            points: 0,
            last_update_ms: 0,
            fall_delay_ms,
            rng,
        };
        core.generate_next();
        core
    }

    /// Starts a fresh round at `now_ms`: empty board, nothing falling, zero points.
    pub fn reset(&mut self, now_ms: u64) {
        self.last_update_ms = now_ms;
        self.board.clear();
        self.falling = FallingPiece::NONE;
        self.points = 0;
        self.generate_next();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn falling_piece(&self) -> &FallingPiece {
        &self.falling
    }

    pub fn next_piece(&self) -> &FallingPiece {
        &self.next
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn fall_delay_ms(&self) -> u64 {
        self.fall_delay_ms
    }

    pub fn last_update_ms(&self) -> u64 {
        self.last_update_ms
    }

    pub fn is_falling(&self) -> bool {
        self.falling.is_falling()
    }

    pub fn is_colliding(&self) -> bool {
        self.board.collides(&self.falling)
    }

    pub fn set_falling_piece_for_test(&mut self, piece: FallingPiece) {
        self.falling = piece;
    }

    pub fn set_next_piece_for_test(&mut self, piece: FallingPiece) {
        self.next = piece;
    }

    fn generate_next(&mut self) {
        let kind = PieceKind::from_index(self.rng.gen_range(0..NUM_PIECE_KINDS));
        let flips = self.rng.gen_range(0..4);
        self.next = FallingPiece::spawn(kind, flips);
    }

    /// Promotes the forecast piece into play and forecasts a new one.
    ///
    /// # Panics
    ///
    /// If a piece is already falling.
    pub fn spawn(&mut self) {
        assert!(!self.is_falling(), "spawn called while a piece is still falling");
        self.falling = self.next;
        assert!(self.is_falling(), "next piece was never generated");
        self.generate_next();
    }

    fn try_translate(&mut self, dx: i32, dy: i32) -> bool {
        if !self.is_falling() {
            return false;
        }
        self.falling.translate(dx, dy);
        if self.is_colliding() {
            self.falling.translate(-dx, -dy);
            return false;
        }
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_translate(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_translate(1, 0)
    }

    /// Soft drop; a successful move restarts the gravity timer.
    pub fn move_down(&mut self, now_ms: u64) -> bool {
        let moved = self.try_translate(0, -1);
        if moved {
            self.last_update_ms = now_ms;
        }
        moved
    }

    pub fn rotate(&mut self) -> bool {
        if !self.is_falling() {
            return false;
        }
        self.falling.flip();
        if self.is_colliding() {
            self.falling.flip_back();
            return false;
        }
        true
    }

    /// Advances the simulation to `now_ms`.
    ///
    /// With nothing falling this spawns the next piece; the caller checks
    /// [`is_colliding`](Self::is_colliding) afterwards to detect a blocked spawn.
    pub fn step(&mut self, now_ms: u64) -> Step {
        if !self.is_falling() {
            self.spawn();
            return Step::Spawned;
        }
        if now_ms.saturating_sub(self.last_update_ms) <= self.fall_delay_ms {
            return Step::Waiting;
        }

        self.last_update_ms = now_ms;
        self.falling.translate(0, -1);
        if !self.is_colliding() {
            return Step::Fell;
        }
        self.falling.translate(0, 1);
        Step::Fixated(self.fixate())
    }

    fn fixate(&mut self) -> LineClear {
        self.board.fixate(&self.falling);
        self.falling = FallingPiece::NONE;
        let clear = self.board.clear_full_rows();
        self.points = self.points.saturating_add(clear.points());
        if clear.lines > 0 {
            log::debug!("cleared {} line(s) for {} points", clear.lines, clear.points());
        }
        clear
    }
}
