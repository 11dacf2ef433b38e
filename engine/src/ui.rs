//! Layout primitives for the 2D renderer.
//!
//! Everything is integer pixels: a `Rect`, plus helpers for insetting, anchored placement and
//! splitting a region into panels.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_size(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x
            && px < self.x.saturating_add(self.w)
            && py >= self.y
            && py < self.y.saturating_add(self.h)
    }

    /// Inner content area; saturates to an empty rect when the insets are too large.
    pub fn inset(&self, insets: Insets) -> Self {
        Self {
            x: self.x.saturating_add(insets.left),
            y: self.y.saturating_add(insets.top),
            w: self
                .w
                .saturating_sub(insets.left.saturating_add(insets.right)),
            h: self
                .h
                .saturating_sub(insets.top.saturating_add(insets.bottom)),
        }
    }

    /// Places a child of `size` inside this rect. Oversized children are clamped to fit.
    pub fn place(&self, size: Size, anchor: Anchor) -> Self {
        let w = size.w.min(self.w);
        let h = size.h.min(self.h);
        let free_w = self.w - w;
        let free_h = self.h - h;

        let x = self.x
            + match anchor {
                Anchor::TopLeft | Anchor::CenterLeft => 0,
                Anchor::TopCenter | Anchor::Center | Anchor::BottomCenter => free_w / 2,
                Anchor::TopRight | Anchor::CenterRight => free_w,
            };
        let y = self.y
            + match anchor {
                Anchor::TopLeft | Anchor::TopCenter | Anchor::TopRight => 0,
                Anchor::CenterLeft | Anchor::Center | Anchor::CenterRight => free_h / 2,
                Anchor::BottomCenter => free_h,
            };

        Self { x, y, w, h }
    }

    /// Splits into a left and a right half. An odd pixel goes to the right half.
    pub fn split_columns(&self) -> (Self, Self) {
        let left_w = self.w / 2;
        (
            Self::new(self.x, self.y, left_w, self.h),
            Self::new(self.x + left_w, self.y, self.w - left_w, self.h),
        )
    }

    /// Top slice covering `fraction` (clamped to `0..=1`) of the height.
    pub fn top_fraction(&self, fraction: f64) -> Self {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let h = ((self.h as f64) * fraction).round() as u32;
        Self::new(self.x, self.y, self.w, h.min(self.h))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
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
    BottomCenter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inset_shrinks_rect_and_moves_origin() {
        let r = Rect::from_size(100, 80);
        assert_eq!(r.inset(Insets::all(10)), Rect::new(10, 10, 80, 60));
    }

    #[test]
    fn place_center_positions_child_in_parent() {
        let parent = Rect::from_size(100, 100);
        let child = parent.place(Size::new(20, 10), Anchor::Center);
        assert_eq!(child, Rect::new(40, 45, 20, 10));
    }

    #[test]
    fn place_clamps_size_to_parent() {
        let parent = Rect::new(5, 5, 50, 40);
        let child = parent.place(Size::new(999, 999), Anchor::BottomCenter);
        assert_eq!(child, Rect::new(5, 5, 50, 40));
    }

    #[test]
    fn split_columns_gives_odd_pixel_to_right_half() {
        let (left, right) = Rect::new(10, 0, 101, 50).split_columns();
        assert_eq!(left, Rect::new(10, 0, 50, 50));
        assert_eq!(right, Rect::new(60, 0, 51, 50));
    }

    #[test]
    fn top_fraction_clamps_and_rounds() {
        let panel = Rect::new(0, 20, 10, 200);
        assert_eq!(panel.top_fraction(0.0).h, 0);
        assert_eq!(panel.top_fraction(0.25), Rect::new(0, 20, 10, 50));
        assert_eq!(panel.top_fraction(3.0).h, 200);
        assert_eq!(panel.top_fraction(f64::NAN).h, 0);
    }
}
