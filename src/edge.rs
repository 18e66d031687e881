//! The four edges of the crop window and the snap/clamp rules that move them.

use crate::aspect_ratio;
use crate::rect::Bounds;

/// Minimum distance in pixels between an edge and its opposing edge.
pub const MIN_CROP_LENGTH_PX: f32 = 40.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Left,
    Top,
    Right,
    Bottom,
}

impl EdgeKind {
    pub const ALL: [EdgeKind; 4] = [
        EdgeKind::Left,
        EdgeKind::Top,
        EdgeKind::Right,
        EdgeKind::Bottom,
    ];

    pub fn opposite(self) -> Self {
        match self {
            EdgeKind::Left => EdgeKind::Right,
            EdgeKind::Top => EdgeKind::Bottom,
            EdgeKind::Right => EdgeKind::Left,
            EdgeKind::Bottom => EdgeKind::Top,
        }
    }

    /// Top and Bottom run horizontally and hold a y coordinate.
    pub fn is_horizontal(self) -> bool {
        matches!(self, EdgeKind::Top | EdgeKind::Bottom)
    }

    /// The side of `rect` this edge corresponds to.
    pub fn boundary_of(self, rect: &Bounds) -> f32 {
        match self {
            EdgeKind::Left => rect.left,
            EdgeKind::Top => rect.top,
            EdgeKind::Right => rect.right,
            EdgeKind::Bottom => rect.bottom,
        }
    }
}

/// One side of the crop window. The coordinate is an x for Left/Right and a
/// y for Top/Bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    kind: EdgeKind,
    coordinate: f32,
}

impl Edge {
    pub fn new(kind: EdgeKind, coordinate: f32) -> Self {
        Self { kind, coordinate }
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    pub fn coordinate(&self) -> f32 {
        self.coordinate
    }

    /// Moves the edge by `distance`. No bounds checking.
    pub fn offset(&mut self, distance: f32) {
        self.coordinate += distance;
    }

    /// Moves the edge onto the matching side of `rect` and returns how far it
    /// moved (new - old).
    pub fn snap_to_rect(&mut self, rect: &Bounds) -> f32 {
        let offset = self.snap_offset(rect);
        self.coordinate = self.kind.boundary_of(rect);
        offset
    }

    /// The distance `snap_to_rect` would move the edge, without moving it.
    pub fn snap_offset(&self, rect: &Bounds) -> f32 {
        self.kind.boundary_of(rect) - self.coordinate
    }

    /// True if the edge is closer than `margin` to (or beyond) the matching
    /// side of `rect`.
    pub fn is_outside_margin(&self, rect: &Bounds, margin: f32) -> bool {
        match self.kind {
            EdgeKind::Left => self.coordinate - rect.left < margin,
            EdgeKind::Top => self.coordinate - rect.top < margin,
            EdgeKind::Right => rect.right - self.coordinate < margin,
            EdgeKind::Bottom => rect.bottom - self.coordinate < margin,
        }
    }
}

/// The four edges of one crop window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropEdges {
    pub left: Edge,
    pub top: Edge,
    pub right: Edge,
    pub bottom: Edge,
}

impl Default for CropEdges {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

impl CropEdges {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left: Edge::new(EdgeKind::Left, left),
            top: Edge::new(EdgeKind::Top, top),
            right: Edge::new(EdgeKind::Right, right),
            bottom: Edge::new(EdgeKind::Bottom, bottom),
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            self.left.coordinate,
            self.top.coordinate,
            self.right.coordinate,
            self.bottom.coordinate,
        )
    }

    pub fn width(&self) -> f32 {
        self.right.coordinate - self.left.coordinate
    }

    pub fn height(&self) -> f32 {
        self.bottom.coordinate - self.top.coordinate
    }

    pub fn edge(&self, kind: EdgeKind) -> &Edge {
        match kind {
            EdgeKind::Left => &self.left,
            EdgeKind::Top => &self.top,
            EdgeKind::Right => &self.right,
            EdgeKind::Bottom => &self.bottom,
        }
    }

    pub fn edge_mut(&mut self, kind: EdgeKind) -> &mut Edge {
        match kind {
            EdgeKind::Left => &mut self.left,
            EdgeKind::Top => &mut self.top,
            EdgeKind::Right => &mut self.right,
            EdgeKind::Bottom => &mut self.bottom,
        }
    }

    pub fn coordinate(&self, kind: EdgeKind) -> f32 {
        self.edge(kind).coordinate
    }

    pub fn is_finite(&self) -> bool {
        EdgeKind::ALL
            .iter()
            .all(|&kind| self.coordinate(kind).is_finite())
    }

    /// Moves `kind` to follow the touch point at (`x`, `y`).
    ///
    /// The edge snaps onto the image boundary when the touch is within
    /// `snap_radius` of it. Otherwise it is kept at least
    /// [`MIN_CROP_LENGTH_PX`] away from the opposing edge, both directly and
    /// through `aspect_ratio` on the cross axis.
    pub fn adjust_coordinate(
        &mut self,
        kind: EdgeKind,
        x: f32,
        y: f32,
        image_rect: &Bounds,
        snap_radius: f32,
        aspect_ratio: f32,
    ) {
        let coordinate = match kind {
            EdgeKind::Left => self.adjusted_left(x, image_rect, snap_radius, aspect_ratio),
            EdgeKind::Top => self.adjusted_top(y, image_rect, snap_radius, aspect_ratio),
            EdgeKind::Right => self.adjusted_right(x, image_rect, snap_radius, aspect_ratio),
            EdgeKind::Bottom => self.adjusted_bottom(y, image_rect, snap_radius, aspect_ratio),
        };
        self.edge_mut(kind).coordinate = coordinate;
    }

    /// Re-derives `kind` from the other three edges so the window matches
    /// `aspect_ratio`.
    pub fn adjust_coordinate_to_ratio(&mut self, kind: EdgeKind, aspect_ratio: f32) {
        let left = self.left.coordinate;
        let top = self.top.coordinate;
        let right = self.right.coordinate;
        let bottom = self.bottom.coordinate;

        let coordinate = match kind {
            EdgeKind::Left => aspect_ratio::calculate_left(top, right, bottom, aspect_ratio),
            EdgeKind::Top => aspect_ratio::calculate_top(left, right, bottom, aspect_ratio),
            EdgeKind::Right => aspect_ratio::calculate_right(left, top, bottom, aspect_ratio),
            EdgeKind::Bottom => aspect_ratio::calculate_bottom(left, top, right, aspect_ratio),
        };
        self.edge_mut(kind).coordinate = coordinate;
    }

    /// Lookahead for snapping `other` while `kind` is being dragged.
    ///
    /// Simulates `other` sitting on the image boundary, the edge opposite
    /// `other` shifted back by `other`'s snap offset, and `kind` re-derived
    /// from `aspect_ratio`. Returns true if that rectangle leaves `image_rect`.
    /// Pairs that are not perpendicular always count as out of bounds.
    pub fn is_new_rectangle_out_of_bounds(
        &self,
        kind: EdgeKind,
        other: EdgeKind,
        image_rect: &Bounds,
        aspect_ratio: f32,
    ) -> bool {
        let offset = self.edge(other).snap_offset(image_rect);
        let left = self.left.coordinate;
        let top = self.top.coordinate;
        let right = self.right.coordinate;
        let bottom = self.bottom.coordinate;

        let simulated = match (kind, other) {
            (EdgeKind::Left, EdgeKind::Top) => {
                let (top, bottom) = (image_rect.top, bottom - offset);
                let left = aspect_ratio::calculate_left(top, right, bottom, aspect_ratio);
                Bounds::new(left, top, right, bottom)
            }
            (EdgeKind::Left, EdgeKind::Bottom) => {
                let (top, bottom) = (top - offset, image_rect.bottom);
                let left = aspect_ratio::calculate_left(top, right, bottom, aspect_ratio);
                Bounds::new(left, top, right, bottom)
            }
            (EdgeKind::Top, EdgeKind::Left) => {
                let (left, right) = (image_rect.left, right - offset);
                let top = aspect_ratio::calculate_top(left, right, bottom, aspect_ratio);
                Bounds::new(left, top, right, bottom)
            }
            (EdgeKind::Top, EdgeKind::Right) => {
                let (left, right) = (left - offset, image_rect.right);
                let top = aspect_ratio::calculate_top(left, right, bottom, aspect_ratio);
                Bounds::new(left, top, right, bottom)
            }
            (EdgeKind::Right, EdgeKind::Top) => {
                let (top, bottom) = (image_rect.top, bottom - offset);
                let right = aspect_ratio::calculate_right(left, top, bottom, aspect_ratio);
                Bounds::new(left, top, right, bottom)
            }
            (EdgeKind::Right, EdgeKind::Bottom) => {
                let (top, bottom) = (top - offset, image_rect.bottom);
                let right = aspect_ratio::calculate_right(left, top, bottom, aspect_ratio);
                Bounds::new(left, top, right, bottom)
            }
            (EdgeKind::Bottom, EdgeKind::Left) => {
                let (left, right) = (image_rect.left, right - offset);
                let bottom = aspect_ratio::calculate_bottom(left, top, right, aspect_ratio);
                Bounds::new(left, top, right, bottom)
            }
            (EdgeKind::Bottom, EdgeKind::Right) => {
                let (left, right) = (left - offset, image_rect.right);
                let bottom = aspect_ratio::calculate_bottom(left, top, right, aspect_ratio);
                Bounds::new(left, top, right, bottom)
            }
            _ => return true,
        };

        image_rect.is_exceeded_by(&simulated)
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.left.offset(dx);
        self.right.offset(dx);
        self.top.offset(dy);
        self.bottom.offset(dy);
    }

    fn adjusted_left(&self, x: f32, image_rect: &Bounds, snap_radius: f32, aspect_ratio: f32) -> f32 {
        if x - image_rect.left < snap_radius {
            return image_rect.left;
        }

        let right = self.right.coordinate;
        let mut horizontal_limit = f32::INFINITY;
        let mut vertical_limit = f32::INFINITY;

        if x >= right - MIN_CROP_LENGTH_PX {
            horizontal_limit = right - MIN_CROP_LENGTH_PX;
        }
        if (right - x) / aspect_ratio <= MIN_CROP_LENGTH_PX {
            vertical_limit = right - MIN_CROP_LENGTH_PX * aspect_ratio;
        }

        x.min(horizontal_limit.min(vertical_limit))
    }

    fn adjusted_right(&self, x: f32, image_rect: &Bounds, snap_radius: f32, aspect_ratio: f32) -> f32 {
        if image_rect.right - x < snap_radius {
            return image_rect.right;
        }

        let left = self.left.coordinate;
        let mut horizontal_limit = f32::NEG_INFINITY;
        let mut vertical_limit = f32::NEG_INFINITY;

        if x <= left + MIN_CROP_LENGTH_PX {
            horizontal_limit = left + MIN_CROP_LENGTH_PX;
        }
        if (x - left) / aspect_ratio <= MIN_CROP_LENGTH_PX {
            vertical_limit = left + MIN_CROP_LENGTH_PX * aspect_ratio;
        }

        x.max(horizontal_limit.max(vertical_limit))
    }

    fn adjusted_top(&self, y: f32, image_rect: &Bounds, snap_radius: f32, aspect_ratio: f32) -> f32 {
        if y - image_rect.top < snap_radius {
            return image_rect.top;
        }

        let bottom = self.bottom.coordinate;
        let mut vertical_limit = f32::INFINITY;
        let mut horizontal_limit = f32::INFINITY;

        if y >= bottom - MIN_CROP_LENGTH_PX {
            vertical_limit = bottom - MIN_CROP_LENGTH_PX;
        }
        if (bottom - y) * aspect_ratio <= MIN_CROP_LENGTH_PX {
            horizontal_limit = bottom - MIN_CROP_LENGTH_PX / aspect_ratio;
        }

        y.min(vertical_limit.min(horizontal_limit))
    }

    fn adjusted_bottom(&self, y: f32, image_rect: &Bounds, snap_radius: f32, aspect_ratio: f32) -> f32 {
        if image_rect.bottom - y < snap_radius {
            return image_rect.bottom;
        }

        let top = self.top.coordinate;
        let mut vertical_limit = f32::NEG_INFINITY;
        let mut horizontal_limit = f32::NEG_INFINITY;

        if y <= top + MIN_CROP_LENGTH_PX {
            vertical_limit = top + MIN_CROP_LENGTH_PX;
        }
        if (y - top) * aspect_ratio <= MIN_CROP_LENGTH_PX {
            horizontal_limit = top + MIN_CROP_LENGTH_PX / aspect_ratio;
        }

        y.max(vertical_limit.max(horizontal_limit))
    }
}
