//! Rectangle arithmetic under a fixed width/height ratio.
//!
//! Every `calculate_*` function derives one coordinate (or span) from the
//! others. None of them guard against a zero span: a zero height gives an
//! infinite or NaN ratio which callers must treat as "undefined".

use crate::rect::Bounds;

pub fn calculate_aspect_ratio(left: f32, top: f32, right: f32, bottom: f32) -> f32 {
    (right - left) / (bottom - top)
}

pub fn calculate_aspect_ratio_of(rect: &Bounds) -> f32 {
    calculate_aspect_ratio(rect.left, rect.top, rect.right, rect.bottom)
}

pub fn calculate_left(top: f32, right: f32, bottom: f32, target_aspect_ratio: f32) -> f32 {
    let height = bottom - top;
    right - target_aspect_ratio * height
}

pub fn calculate_top(left: f32, right: f32, bottom: f32, target_aspect_ratio: f32) -> f32 {
    let width = right - left;
    bottom - width / target_aspect_ratio
}

pub fn calculate_right(left: f32, top: f32, bottom: f32, target_aspect_ratio: f32) -> f32 {
    let height = bottom - top;
    left + target_aspect_ratio * height
}

pub fn calculate_bottom(left: f32, top: f32, right: f32, target_aspect_ratio: f32) -> f32 {
    let width = right - left;
    top + width / target_aspect_ratio
}

pub fn calculate_width(top: f32, bottom: f32, target_aspect_ratio: f32) -> f32 {
    target_aspect_ratio * (bottom - top)
}

pub fn calculate_height(left: f32, right: f32, target_aspect_ratio: f32) -> f32 {
    (right - left) / target_aspect_ratio
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_coordinates_close_the_rectangle() {
        // 200x100 at ratio 2.0
        assert_eq!(calculate_left(0.0, 300.0, 100.0, 2.0), 100.0);
        assert_eq!(calculate_right(100.0, 0.0, 100.0, 2.0), 300.0);
        assert_eq!(calculate_top(100.0, 300.0, 100.0, 2.0), 0.0);
        assert_eq!(calculate_bottom(100.0, 0.0, 300.0, 2.0), 100.0);
    }

    #[test]
    fn spans_from_ratio() {
        assert_eq!(calculate_width(10.0, 70.0, 0.5), 30.0);
        assert_eq!(calculate_height(10.0, 70.0, 0.5), 120.0);
    }

    #[test]
    fn zero_height_ratio_is_undefined() {
        let flat = Bounds::new(0.0, 5.0, 10.0, 5.0);
        assert!(calculate_aspect_ratio_of(&flat).is_infinite());

        let empty = Bounds::new(5.0, 5.0, 5.0, 5.0);
        assert!(calculate_aspect_ratio_of(&empty).is_nan());
    }
}
