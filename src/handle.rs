//! Handles of the crop window and the resize behaviour bound to each.

use crate::aspect_ratio;
use crate::edge::{CropEdges, EdgeKind};
use crate::edge_pair::EdgePair;
use crate::rect::Bounds;

/// Ratio used for the minimum-size clamp when the window is not locked.
const UNFIXED_ASPECT_RATIO: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Left,
    Top,
    Right,
    Bottom,
    Center, // Moving
}

/// How a handle turns pointer motion into edge motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleStrategy {
    Corner {
        horizontal: EdgeKind,
        vertical: EdgeKind,
    },
    /// A Top or Bottom handle.
    HorizontalEdge(EdgeKind),
    /// A Left or Right handle.
    VerticalEdge(EdgeKind),
    Center,
}

impl Handle {
    pub const ALL: [Handle; 9] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
        Handle::Left,
        Handle::Top,
        Handle::Right,
        Handle::Bottom,
        Handle::Center,
    ];

    pub fn strategy(self) -> HandleStrategy {
        match self {
            Handle::TopLeft => HandleStrategy::Corner {
                horizontal: EdgeKind::Top,
                vertical: EdgeKind::Left,
            },
            Handle::TopRight => HandleStrategy::Corner {
                horizontal: EdgeKind::Top,
                vertical: EdgeKind::Right,
            },
            Handle::BottomLeft => HandleStrategy::Corner {
                horizontal: EdgeKind::Bottom,
                vertical: EdgeKind::Left,
            },
            Handle::BottomRight => HandleStrategy::Corner {
                horizontal: EdgeKind::Bottom,
                vertical: EdgeKind::Right,
            },
            Handle::Left => HandleStrategy::VerticalEdge(EdgeKind::Left),
            Handle::Top => HandleStrategy::HorizontalEdge(EdgeKind::Top),
            Handle::Right => HandleStrategy::VerticalEdge(EdgeKind::Right),
            Handle::Bottom => HandleStrategy::HorizontalEdge(EdgeKind::Bottom),
            Handle::Center => HandleStrategy::Center,
        }
    }

    pub fn is_corner(self) -> bool {
        matches!(self.strategy(), HandleStrategy::Corner { .. })
    }

    /// Free resize: every bound edge follows the pointer on its own axis.
    pub fn update_crop_window(
        self,
        edges: &mut CropEdges,
        x: f32,
        y: f32,
        image_rect: &Bounds,
        snap_radius: f32,
    ) {
        self.strategy()
            .update_free(edges, x, y, image_rect, snap_radius);
    }

    /// Resize that keeps the window at `target_aspect_ratio`.
    pub fn update_crop_window_with_ratio(
        self,
        edges: &mut CropEdges,
        x: f32,
        y: f32,
        target_aspect_ratio: f32,
        image_rect: &Bounds,
        snap_radius: f32,
    ) {
        self.strategy()
            .update_locked(edges, x, y, target_aspect_ratio, image_rect, snap_radius);
    }
}

impl HandleStrategy {
    /// The bound edges in their default order: horizontal edge first.
    pub fn bound_edges(self) -> EdgePair {
        match self {
            HandleStrategy::Corner {
                horizontal,
                vertical,
            } => EdgePair::new(Some(horizontal), Some(vertical)),
            HandleStrategy::HorizontalEdge(edge) => EdgePair::new(Some(edge), None),
            HandleStrategy::VerticalEdge(edge) => EdgePair::new(None, Some(edge)),
            HandleStrategy::Center => EdgePair::default(),
        }
    }

    /// Picks which bound edge drives a ratio-locked drag to (`x`, `y`).
    ///
    /// If moving the corner there would make the window wider than the target
    /// ratio, x decides the size and the vertical edge is primary. Otherwise
    /// y decides and the horizontal edge is primary.
    pub fn active_edges(self, edges: &CropEdges, x: f32, y: f32, target_aspect_ratio: f32) -> EdgePair {
        let bound = self.bound_edges();
        if self.potential_aspect_ratio(edges, x, y) > target_aspect_ratio {
            bound.swapped()
        } else {
            bound
        }
    }

    fn potential_aspect_ratio(self, edges: &CropEdges, x: f32, y: f32) -> f32 {
        let bound = self.bound_edges();
        let vertical = bound.secondary;
        let horizontal = bound.primary;

        let left = if vertical == Some(EdgeKind::Left) { x } else { edges.left.coordinate() };
        let top = if horizontal == Some(EdgeKind::Top) { y } else { edges.top.coordinate() };
        let right = if vertical == Some(EdgeKind::Right) { x } else { edges.right.coordinate() };
        let bottom = if horizontal == Some(EdgeKind::Bottom) { y } else { edges.bottom.coordinate() };

        aspect_ratio::calculate_aspect_ratio(left, top, right, bottom)
    }

    fn update_free(self, edges: &mut CropEdges, x: f32, y: f32, image_rect: &Bounds, snap_radius: f32) {
        match self {
            HandleStrategy::Center => update_center(edges, x, y, image_rect, snap_radius),
            _ => {
                for kind in self.bound_edges().iter() {
                    edges.adjust_coordinate(kind, x, y, image_rect, snap_radius, UNFIXED_ASPECT_RATIO);
                }
            }
        }
    }

    fn update_locked(
        self,
        edges: &mut CropEdges,
        x: f32,
        y: f32,
        target_aspect_ratio: f32,
        image_rect: &Bounds,
        snap_radius: f32,
    ) {
        match self {
            HandleStrategy::Corner { .. } => {
                let active = self.active_edges(edges, x, y, target_aspect_ratio);
                let (Some(primary), Some(secondary)) = (active.primary, active.secondary) else {
                    return;
                };
                update_corner(edges, primary, secondary, x, y, target_aspect_ratio, image_rect, snap_radius);
            }
            HandleStrategy::HorizontalEdge(edge) => {
                update_side(
                    edges,
                    edge,
                    [EdgeKind::Left, EdgeKind::Right],
                    x,
                    y,
                    target_aspect_ratio,
                    image_rect,
                    snap_radius,
                );
            }
            HandleStrategy::VerticalEdge(edge) => {
                update_side(
                    edges,
                    edge,
                    [EdgeKind::Top, EdgeKind::Bottom],
                    x,
                    y,
                    target_aspect_ratio,
                    image_rect,
                    snap_radius,
                );
            }
            // A moving window never changes shape.
            HandleStrategy::Center => update_center(edges, x, y, image_rect, snap_radius),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn update_corner(
    edges: &mut CropEdges,
    primary: EdgeKind,
    secondary: EdgeKind,
    x: f32,
    y: f32,
    target_aspect_ratio: f32,
    image_rect: &Bounds,
    snap_radius: f32,
) {
    edges.adjust_coordinate(primary, x, y, image_rect, snap_radius, target_aspect_ratio);
    edges.adjust_coordinate_to_ratio(secondary, target_aspect_ratio);

    // The secondary edge ran into the image border: pin it there and let the
    // primary edge follow the ratio instead.
    if edges.edge(secondary).is_outside_margin(image_rect, snap_radius) {
        edges.edge_mut(secondary).snap_to_rect(image_rect);
        edges.adjust_coordinate_to_ratio(primary, target_aspect_ratio);
    }

    // Whichever edge still overhangs the image is pulled in and the other
    // follows the ratio inwards.
    for (edge, other) in [(primary, secondary), (secondary, primary)] {
        if edges.edge(edge).is_outside_margin(image_rect, 0.0) {
            edges.edge_mut(edge).snap_to_rect(image_rect);
            edges.adjust_coordinate_to_ratio(other, target_aspect_ratio);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn update_side(
    edges: &mut CropEdges,
    edge: EdgeKind,
    perpendicular: [EdgeKind; 2],
    x: f32,
    y: f32,
    target_aspect_ratio: f32,
    image_rect: &Bounds,
    snap_radius: f32,
) {
    edges.adjust_coordinate(edge, x, y, image_rect, snap_radius, target_aspect_ratio);
    split_difference(edges, edge, perpendicular, target_aspect_ratio);

    let [near, far] = perpendicular;
    for side in [near, far] {
        if edges.edge(side).is_outside_margin(image_rect, snap_radius)
            && !edges.is_new_rectangle_out_of_bounds(edge, side, image_rect, target_aspect_ratio)
        {
            snap_and_rebalance(edges, side, edge, image_rect, target_aspect_ratio);
        }
    }

    // The lookahead can veto a snap that is still needed; an edge that ended
    // up past the image is pulled back regardless.
    for side in [near, far] {
        if edges.edge(side).is_outside_margin(image_rect, 0.0) {
            snap_and_rebalance(edges, side, edge, image_rect, target_aspect_ratio);
        }
    }

    // Rebalancing grows the window when it snaps an edge that was inside the
    // margin, which can carry the dragged edge past the image.
    if edges.edge(edge).is_outside_margin(image_rect, 0.0) {
        edges.edge_mut(edge).snap_to_rect(image_rect);
        split_difference(edges, edge, perpendicular, target_aspect_ratio);
    }
}

// Keeps the perpendicular span centred.
fn split_difference(edges: &mut CropEdges, edge: EdgeKind, perpendicular: [EdgeKind; 2], target_aspect_ratio: f32) {
    let [near, far] = perpendicular;
    let (target_span, current_span) = if edge.is_horizontal() {
        (
            aspect_ratio::calculate_width(edges.top.coordinate(), edges.bottom.coordinate(), target_aspect_ratio),
            edges.width(),
        )
    } else {
        (
            aspect_ratio::calculate_height(edges.left.coordinate(), edges.right.coordinate(), target_aspect_ratio),
            edges.height(),
        )
    };
    let half_difference = (target_span - current_span) / 2.0;
    edges.edge_mut(near).offset(-half_difference);
    edges.edge_mut(far).offset(half_difference);
}

fn snap_and_rebalance(
    edges: &mut CropEdges,
    side: EdgeKind,
    edge: EdgeKind,
    image_rect: &Bounds,
    target_aspect_ratio: f32,
) {
    let offset = edges.edge_mut(side).snap_to_rect(image_rect);
    edges.edge_mut(side.opposite()).offset(-offset);
    edges.adjust_coordinate_to_ratio(edge, target_aspect_ratio);
}

fn update_center(edges: &mut CropEdges, x: f32, y: f32, image_rect: &Bounds, snap_radius: f32) {
    let (center_x, center_y) = edges.bounds().center();
    edges.translate(x - center_x, y - center_y);

    for (near, far) in [
        (EdgeKind::Left, EdgeKind::Right),
        (EdgeKind::Top, EdgeKind::Bottom),
    ] {
        if edges.edge(near).is_outside_margin(image_rect, snap_radius) {
            let offset = edges.edge_mut(near).snap_to_rect(image_rect);
            edges.edge_mut(far).offset(offset);
        } else if edges.edge(far).is_outside_margin(image_rect, snap_radius) {
            let offset = edges.edge_mut(far).snap_to_rect(image_rect);
            edges.edge_mut(near).offset(offset);
        }
    }
}
