//! Integer geometry for layout, hit-testing and drawing.
//!
//! Positions are signed so shapes may hang partially outside a viewport (a falling piece above
//! the board, for instance); extents are unsigned.

use std::ops::Add;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point2D {
    pub x: i32,
    pub y: i32,
}

impl Point2D {
    pub const ORIGIN: Point2D = Point2D { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point2D {
    type Output = Point2D;

    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dim2D {
    pub w: u32,
    pub h: u32,
}

impl Dim2D {
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    pub fn clamp_max(self, max: Dim2D) -> Self {
        Self {
            w: self.w.min(max.w),
            h: self.h.min(max.h),
        }
    }
}

/// X offset that centers `thing` horizontally inside `within`.
///
/// Negative when `thing` is wider than `within`.
pub fn hor_center_within(thing: Dim2D, within: Dim2D) -> i32 {
    (within.w as i32 - thing.w as i32) / 2
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn from_size(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    pub const fn at(pos: Point2D, dim: Dim2D) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            w: dim.w,
            h: dim.h,
        }
    }

    pub fn pos(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    pub fn size(&self) -> Dim2D {
        Dim2D::new(self.w, self.h)
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i64 {
        self.x as i64 + self.w as i64
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.h as i64
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        let (px, py) = (px as i64, py as i64);
        px >= self.x as i64 && px < self.right() && py >= self.y as i64 && py < self.bottom()
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }

    /// Overlap of two rects, or `None` when they do not share a pixel.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = (self.x as i64).max(other.x as i64);
        let y0 = (self.y as i64).max(other.y as i64);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect::new(
            x0 as i32,
            y0 as i32,
            (x1 - x0) as u32,
            (y1 - y0) as u32,
        ))
    }

    /// Returns the rectangle inset by `insets` (i.e. the inner content area).
    ///
    /// If insets exceed the rect size, the resulting width/height will saturate to 0.
    pub fn inset(&self, insets: Insets) -> Self {
        let w = self
            .w
            .saturating_sub(insets.left.saturating_add(insets.right));
        let h = self
            .h
            .saturating_sub(insets.top.saturating_add(insets.bottom));
        Self {
            x: self.x.saturating_add(insets.left as i32),
            y: self.y.saturating_add(insets.top as i32),
            w,
            h,
        }
    }

    /// Grows the rect by `by` pixels on every side.
    pub fn outset(&self, by: u32) -> Self {
        Self {
            x: self.x.saturating_sub(by as i32),
            y: self.y.saturating_sub(by as i32),
            w: self.w.saturating_add(by.saturating_mul(2)),
            h: self.h.saturating_add(by.saturating_mul(2)),
        }
    }

    /// Places a child of `size` inside this rect using the requested `anchor`.
    ///
    /// If `size` exceeds this rect, it is clamped to fit.
    pub fn place(&self, size: Dim2D, anchor: Anchor) -> Self {
        let Dim2D { w, h } = size.clamp_max(self.size());
        let free_w = (self.w - w) as i32;
        let free_h = (self.h - h) as i32;

        let x = match anchor {
            Anchor::TopLeft | Anchor::CenterLeft | Anchor::BottomLeft => self.x,
            Anchor::TopCenter | Anchor::Center | Anchor::BottomCenter => self.x + free_w / 2,
            Anchor::TopRight | Anchor::CenterRight | Anchor::BottomRight => self.x + free_w,
        };

        let y = match anchor {
            Anchor::TopLeft | Anchor::TopCenter | Anchor::TopRight => self.y,
            Anchor::CenterLeft | Anchor::Center | Anchor::CenterRight => self.y + free_h / 2,
            Anchor::BottomLeft | Anchor::BottomCenter | Anchor::BottomRight => self.y + free_h,
        };

        Self { x, y, w, h }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Insets {
    pub const ZERO: Insets = Insets {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    pub fn all(v: u32) -> Self {
        Self {
            left: v,
            top: v,
            right: v,
            bottom: v,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hor_center_rounds_toward_zero() {
        assert_eq!(hor_center_within(Dim2D::new(100, 10), Dim2D::new(640, 480)), 270);
        assert_eq!(hor_center_within(Dim2D::new(101, 10), Dim2D::new(640, 480)), 269);
        assert_eq!(hor_center_within(Dim2D::new(700, 10), Dim2D::new(640, 480)), -30);
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(-5, 10, 10, 4);
        assert!(r.contains(-5, 10));
        assert!(r.contains(4, 13));
        assert!(!r.contains(5, 13));
        assert!(!r.contains(0, 14));
        assert!(!r.contains(-6, 10));
    }

    #[test]
    fn intersect_clips_and_rejects_disjoint() {
        let a = Rect::new(0, 0, 10, 10);
        assert_eq!(a.intersect(&Rect::new(5, -5, 10, 10)), Some(Rect::new(5, 0, 5, 5)));
        assert_eq!(a.intersect(&Rect::new(10, 0, 4, 4)), None);
        assert_eq!(a.intersect(&Rect::new(2, 2, 0, 4)), None);
    }

    #[test]
    fn inset_saturates_to_zero() {
        let r = Rect::new(10, 20, 5, 5);
        let inner = r.inset(Insets::all(10));
        assert_eq!(inner, Rect::new(20, 30, 0, 0));
    }

    #[test]
    fn outset_grows_every_side() {
        let r = Rect::new(10, 20, 5, 6);
        assert_eq!(r.outset(3), Rect::new(7, 17, 11, 12));
    }

    #[test]
    fn place_center_and_bottom_right() {
        let parent = Rect::new(0, 0, 100, 50);
        let child = Dim2D::new(20, 10);

        assert_eq!(parent.place(child, Anchor::Center), Rect::new(40, 20, 20, 10));
        assert_eq!(parent.place(child, Anchor::BottomRight), Rect::new(80, 40, 20, 10));
    }

    #[test]
    fn place_clamps_oversized_child() {
        let parent = Rect::new(5, 5, 10, 10);
        assert_eq!(
            parent.place(Dim2D::new(50, 50), Anchor::TopCenter),
            Rect::new(5, 5, 10, 10)
        );
    }
}
