//! Axis-aligned rectangle in view pixels.

/// Left/top/right/bottom bounds, as used for the displayed image and for
/// simulated crop windows.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_min_size(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self::new(left, top, left + width, top + height)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> (f32, f32) {
        ((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }

    /// True when the rect has no usable area or carries non-finite values.
    pub fn is_degenerate(&self) -> bool {
        !(self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite())
            || self.width() <= 0.0
            || self.height() <= 0.0
    }

    /// True if `other` sticks out of `self` on any side.
    pub fn is_exceeded_by(&self, other: &Bounds) -> bool {
        other.top < self.top
            || other.left < self.left
            || other.bottom > self.bottom
            || other.right > self.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_rects() {
        assert!(Bounds::new(0.0, 0.0, 0.0, 10.0).is_degenerate());
        assert!(Bounds::new(0.0, 10.0, 10.0, 10.0).is_degenerate());
        assert!(Bounds::new(0.0, 0.0, f32::NAN, 10.0).is_degenerate());
        assert!(!Bounds::new(0.0, 0.0, 10.0, 10.0).is_degenerate());
    }

    #[test]
    fn containment() {
        let image = Bounds::new(0.0, 0.0, 100.0, 100.0);
        assert!(!image.is_exceeded_by(&Bounds::new(0.0, 0.0, 100.0, 100.0)));
        assert!(image.is_exceeded_by(&Bounds::new(-1.0, 0.0, 50.0, 50.0)));
        assert!(image.is_exceeded_by(&Bounds::new(10.0, 10.0, 50.0, 100.5)));
    }
}
