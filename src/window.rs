//! Crop window state and the drag gesture that edits it.

use tracing::{debug, warn};

use crate::aspect_ratio;
use crate::config::{self, CropConfig, GuidelineMode};
use crate::edge::{CropEdges, MIN_CROP_LENGTH_PX};
use crate::error::{CropError, Result};
use crate::handle::Handle;
use crate::hit_test::{self, TouchOffset};
use crate::rect::Bounds;

/// Share of the image left uncovered on each side by a fresh free window.
const INITIAL_PADDING: f32 = 0.1;

/// The four edges plus the settings that constrain them.
#[derive(Clone, Debug, PartialEq)]
pub struct CropWindowState {
    edges: CropEdges,
    fixed_aspect_ratio: bool,
    aspect_ratio_x: i32,
    aspect_ratio_y: i32,
    target_aspect_ratio: f32,
    guidelines: GuidelineMode,
}

impl Default for CropWindowState {
    fn default() -> Self {
        Self::from_config(&CropConfig::default())
    }
}

impl CropWindowState {
    /// Expects an already validated `config`.
    pub fn from_config(config: &CropConfig) -> Self {
        Self {
            edges: CropEdges::default(),
            fixed_aspect_ratio: config.fixed_aspect_ratio,
            aspect_ratio_x: config.aspect_ratio_x,
            aspect_ratio_y: config.aspect_ratio_y,
            target_aspect_ratio: config.target_aspect_ratio(),
            guidelines: config.guidelines,
        }
    }

    pub fn edges(&self) -> &CropEdges {
        &self.edges
    }

    pub fn fixed_aspect_ratio(&self) -> bool {
        self.fixed_aspect_ratio
    }

    pub fn aspect_ratio(&self) -> (i32, i32) {
        (self.aspect_ratio_x, self.aspect_ratio_y)
    }

    pub fn target_aspect_ratio(&self) -> f32 {
        self.target_aspect_ratio
    }

    pub fn guidelines(&self) -> GuidelineMode {
        self.guidelines
    }

    pub fn set_guidelines(&mut self, guidelines: i32) -> Result<()> {
        self.guidelines = GuidelineMode::try_from(guidelines)?;
        Ok(())
    }

    pub fn set_fixed_aspect_ratio(&mut self, fixed: bool) {
        self.fixed_aspect_ratio = fixed;
    }

    pub fn set_aspect_ratio_x(&mut self, aspect_ratio_x: i32) -> Result<()> {
        self.aspect_ratio_x = config::validate_aspect_ratio('x', aspect_ratio_x)?;
        self.target_aspect_ratio = self.configured_aspect_ratio();
        Ok(())
    }

    pub fn set_aspect_ratio_y(&mut self, aspect_ratio_y: i32) -> Result<()> {
        self.aspect_ratio_y = config::validate_aspect_ratio('y', aspect_ratio_y)?;
        self.target_aspect_ratio = self.configured_aspect_ratio();
        Ok(())
    }

    fn configured_aspect_ratio(&self) -> f32 {
        self.aspect_ratio_x as f32 / self.aspect_ratio_y as f32
    }

    /// Lays out a fresh window over `image_rect`.
    ///
    /// A free window gets 10% padding on every side, less if that would leave
    /// it under [`MIN_CROP_LENGTH_PX`]. A fixed window spans the image along
    /// its limiting axis and is centred along the other; if that would be
    /// under [`MIN_CROP_LENGTH_PX`] the length is raised and the target ratio
    /// follows the window actually laid out. An image rect with either span
    /// under [`MIN_CROP_LENGTH_PX`] cannot hold a window and is rejected.
    pub fn reset(&mut self, image_rect: &Bounds) -> Result<()> {
        if image_rect.is_degenerate() {
            return Err(CropError::DegenerateGeometry("image rect has no area"));
        }
        if image_rect.width() < MIN_CROP_LENGTH_PX || image_rect.height() < MIN_CROP_LENGTH_PX {
            return Err(CropError::DegenerateGeometry(
                "image rect is smaller than the minimum crop window",
            ));
        }

        self.target_aspect_ratio = self.configured_aspect_ratio();
        let (center_x, center_y) = image_rect.center();

        if !self.fixed_aspect_ratio {
            let horizontal_padding = initial_padding(image_rect.width());
            let vertical_padding = initial_padding(image_rect.height());
            self.edges = CropEdges::new(
                image_rect.left + horizontal_padding,
                image_rect.top + vertical_padding,
                image_rect.right - horizontal_padding,
                image_rect.bottom - vertical_padding,
            );
        } else if aspect_ratio::calculate_aspect_ratio_of(image_rect) > self.target_aspect_ratio {
            // Wider than the target: the image height limits the window.
            let (top, bottom) = (image_rect.top, image_rect.bottom);
            let ideal_width = aspect_ratio::calculate_width(top, bottom, self.target_aspect_ratio);
            let crop_width = ideal_width.max(MIN_CROP_LENGTH_PX);
            if ideal_width < MIN_CROP_LENGTH_PX {
                self.target_aspect_ratio = MIN_CROP_LENGTH_PX / (bottom - top);
            }
            let half_width = crop_width / 2.0;
            self.edges = CropEdges::new(center_x - half_width, top, center_x + half_width, bottom);
        } else {
            let (left, right) = (image_rect.left, image_rect.right);
            let ideal_height = aspect_ratio::calculate_height(left, right, self.target_aspect_ratio);
            let crop_height = ideal_height.max(MIN_CROP_LENGTH_PX);
            if ideal_height < MIN_CROP_LENGTH_PX {
                self.target_aspect_ratio = (right - left) / MIN_CROP_LENGTH_PX;
            }
            let half_height = crop_height / 2.0;
            self.edges = CropEdges::new(left, center_y - half_height, right, center_y + half_height);
        }

        debug!(edges = ?self.edges.bounds(), fixed = self.fixed_aspect_ratio, "crop window reset");
        Ok(())
    }

    /// Whether rule-of-thirds lines should be drawn right now.
    pub fn guidelines_visible(&self, handle_pressed: bool) -> bool {
        if !hit_test::has_room_for_guidelines(self.edges.width(), self.edges.height()) {
            return false;
        }
        match self.guidelines {
            GuidelineMode::Off => false,
            GuidelineMode::OnTouch => handle_pressed,
            GuidelineMode::On => true,
        }
    }

    /// x positions of the vertical and y positions of the horizontal
    /// rule-of-thirds lines.
    pub fn rule_of_thirds(&self) -> ([f32; 2], [f32; 2]) {
        let bounds = self.edges.bounds();
        let third_width = bounds.width() / 3.0;
        let third_height = bounds.height() / 3.0;
        (
            [bounds.left + third_width, bounds.right - third_width],
            [bounds.top + third_height, bounds.bottom - third_height],
        )
    }

    /// Center and radius of the circular selection drawn inside the window.
    pub fn selection_circle(&self) -> (f32, f32, f32) {
        let (center_x, center_y) = self.edges.bounds().center();
        (center_x, center_y, self.edges.width() / 2.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ActiveDrag {
    handle: Handle,
    offset: TouchOffset,
}

// Never pads a span below the minimum crop length.
fn initial_padding(span: f32) -> f32 {
    (INITIAL_PADDING * span).min((span - MIN_CROP_LENGTH_PX) / 2.0)
}

/// One crop session over one displayed image.
///
/// Owns the window state and the in-progress gesture. Changing the image
/// rect or any constraint re-lays the window out and cancels the gesture.
#[derive(Clone, Debug)]
pub struct CropSession {
    state: CropWindowState,
    image_rect: Option<Bounds>,
    snap_radius: f32,
    handle_radius: f32,
    drag: Option<ActiveDrag>,
}

impl Default for CropSession {
    fn default() -> Self {
        Self::new(&CropConfig::default())
    }
}

impl CropSession {
    /// Expects an already validated `config`.
    pub fn new(config: &CropConfig) -> Self {
        Self {
            state: CropWindowState::from_config(config),
            image_rect: None,
            snap_radius: config.snap_radius,
            handle_radius: config.handle_radius,
            drag: None,
        }
    }

    pub fn state(&self) -> &CropWindowState {
        &self.state
    }

    pub fn edges(&self) -> &CropEdges {
        self.state.edges()
    }

    pub fn image_rect(&self) -> Option<Bounds> {
        self.image_rect
    }

    pub fn pressed_handle(&self) -> Option<Handle> {
        self.drag.map(|drag| drag.handle)
    }

    pub fn guidelines_visible(&self) -> bool {
        self.state.guidelines_visible(self.drag.is_some())
    }

    /// Attaches the session to a new image rect. A degenerate rect detaches
    /// it so no handle can be pressed until a usable rect arrives.
    pub fn set_image_rect(&mut self, image_rect: Bounds) -> Result<()> {
        self.cancel_drag();
        match self.state.reset(&image_rect) {
            Ok(()) => {
                self.image_rect = Some(image_rect);
                Ok(())
            }
            Err(err) => {
                self.image_rect = None;
                Err(err)
            }
        }
    }

    pub fn set_guidelines(&mut self, guidelines: i32) -> Result<()> {
        self.state.set_guidelines(guidelines)?;
        self.relayout()
    }

    pub fn set_fixed_aspect_ratio(&mut self, fixed: bool) -> Result<()> {
        self.state.set_fixed_aspect_ratio(fixed);
        self.relayout()
    }

    pub fn set_aspect_ratio_x(&mut self, aspect_ratio_x: i32) -> Result<()> {
        self.state.set_aspect_ratio_x(aspect_ratio_x)?;
        self.relayout()
    }

    pub fn set_aspect_ratio_y(&mut self, aspect_ratio_y: i32) -> Result<()> {
        self.state.set_aspect_ratio_y(aspect_ratio_y)?;
        self.relayout()
    }

    /// Applies every setting of `config` at once; nothing changes if any of
    /// them is invalid.
    pub fn apply_config(&mut self, config: &CropConfig) -> Result<()> {
        config.validate()?;
        let edges = self.state.edges;
        self.state = CropWindowState::from_config(config);
        self.state.edges = edges;
        self.snap_radius = config.snap_radius;
        self.handle_radius = config.handle_radius;
        self.relayout()
    }

    /// Re-lays the window out over the current image, if there is one.
    pub fn relayout(&mut self) -> Result<()> {
        self.cancel_drag();
        match self.image_rect {
            Some(image_rect) => self.state.reset(&image_rect),
            None => Ok(()),
        }
    }

    /// The handle a press at (`x`, `y`) would grab.
    pub fn handle_at(&self, x: f32, y: f32) -> Option<Handle> {
        self.image_rect?;

        let bounds = self.state.edges.bounds();
        hit_test::locate(
            x,
            y,
            bounds.left,
            bounds.top,
            bounds.right,
            bounds.bottom,
            self.handle_radius,
        )
    }

    /// Pointer down. Returns the grabbed handle, if any.
    pub fn press(&mut self, x: f32, y: f32) -> Option<Handle> {
        let handle = self.handle_at(x, y)?;
        let bounds = self.state.edges.bounds();
        let offset = hit_test::touch_offset(
            handle,
            x,
            y,
            bounds.left,
            bounds.top,
            bounds.right,
            bounds.bottom,
        );

        debug!(?handle, x, y, "crop handle pressed");
        self.drag = Some(ActiveDrag { handle, offset });
        Some(handle)
    }

    /// Pointer move. Returns true if the window changed.
    ///
    /// Moves without a pressed handle are ignored. An update that would leave
    /// a non-finite edge behind is dropped and the previous window kept.
    pub fn drag_to(&mut self, x: f32, y: f32) -> bool {
        let (Some(drag), Some(image_rect)) = (self.drag, self.image_rect) else {
            return false;
        };

        let (x, y) = drag.offset.apply(x, y);
        let previous = self.state.edges;

        if self.state.fixed_aspect_ratio {
            drag.handle.update_crop_window_with_ratio(
                &mut self.state.edges,
                x,
                y,
                self.state.target_aspect_ratio,
                &image_rect,
                self.snap_radius,
            );
        } else {
            drag.handle
                .update_crop_window(&mut self.state.edges, x, y, &image_rect, self.snap_radius);
        }

        if !self.state.edges.is_finite() {
            warn!(handle = ?drag.handle, x, y, "dropping crop update with undefined geometry");
            self.state.edges = previous;
            return false;
        }

        self.state.edges != previous
    }

    /// Pointer up or cancel.
    pub fn release(&mut self) {
        if let Some(drag) = self.drag.take() {
            debug!(handle = ?drag.handle, edges = ?self.state.edges.bounds(), "crop handle released");
        }
    }

    fn cancel_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            debug!(handle = ?drag.handle, "crop gesture cancelled");
        }
    }
}
