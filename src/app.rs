use std::path::{Path, PathBuf};

use circle_cropper::config::{CropConfig, GuidelineMode};
use circle_cropper::export;
use circle_cropper::handle::Handle;
use circle_cropper::rect::Bounds;
use circle_cropper::window::CropSession;
use eframe::egui;
use image::DynamicImage;
use tracing::{error, info, warn};

/// Space around the image so handles on its border stay grabbable.
const PADDING: f32 = 20.0;
const HANDLE_DOT_RADIUS: f32 = 6.0;

pub struct CircleCropper {
    image: Option<DynamicImage>,
    texture: Option<egui::TextureHandle>,
    session: CropSession,
    /// Last image rect handed to the session, accepted or not.
    layout: Option<Bounds>,
}

impl CircleCropper {
    pub fn new(cc: &eframe::CreationContext<'_>, config: CropConfig, image: Option<PathBuf>) -> Self {
        let mut app = Self {
            image: None,
            texture: None,
            session: CropSession::new(&config),
            layout: None,
        };
        if let Some(path) = image {
            app.open_image(&cc.egui_ctx, &path);
        }
        app
    }

    fn open_image(&mut self, ctx: &egui::Context, path: &Path) {
        match image::open(path) {
            Ok(img) => {
                info!(path = %path.display(), width = img.width(), height = img.height(), "opened image");
                self.texture = Some(load_texture(ctx, &img));
                self.image = Some(img);
                // Force a fresh crop window on the next frame.
                self.layout = None;
                self.session.release();
            }
            Err(err) => error!("Failed to open {}: {err}", path.display()),
        }
    }

    fn save_cropped_circle(&self) {
        let (Some(image), Some(displayed)) = (&self.image, self.session.image_rect()) else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name("cropped.png")
            .save_file()
        else {
            return;
        };

        let saved = export::cropped_circle(image, self.session.edges(), &displayed)
            .and_then(|circle| export::save_png(&circle, &path));
        match saved {
            Ok(()) => info!(path = %path.display(), "saved cropped circle"),
            Err(err) => error!("Failed to save {}: {err}", path.display()),
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Open Image").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Image", &["png", "jpg", "jpeg", "bmp"])
                    .pick_file()
                {
                    self.open_image(ui.ctx(), &path);
                }
            }

            if self.texture.is_none() {
                return;
            }
            ui.separator();

            let state = self.session.state();
            let mut fixed = state.fixed_aspect_ratio();
            let (mut ratio_x, mut ratio_y) = state.aspect_ratio();
            let current_guidelines = state.guidelines();
            let mut guidelines = current_guidelines;

            if ui.checkbox(&mut fixed, "Fixed Aspect Ratio").changed() {
                report(self.session.set_fixed_aspect_ratio(fixed));
            }

            ui.label("Aspect Ratio:");
            let x_changed = ui
                .add_enabled(
                    fixed,
                    egui::DragValue::new(&mut ratio_x).speed(0.1).range(1..=100),
                )
                .changed();
            ui.label(":");
            let y_changed = ui
                .add_enabled(
                    fixed,
                    egui::DragValue::new(&mut ratio_y).speed(0.1).range(1..=100),
                )
                .changed();
            if x_changed {
                report(self.session.set_aspect_ratio_x(ratio_x));
            }
            if y_changed {
                report(self.session.set_aspect_ratio_y(ratio_y));
            }

            ui.separator();
            ui.label("Guidelines:");
            egui::ComboBox::from_id_salt("params_guidelines")
                .selected_text(guidelines.to_string())
                .show_ui(ui, |ui| {
                    for mode in GuidelineMode::ALL {
                        ui.selectable_value(&mut guidelines, mode, mode.to_string());
                    }
                });
            if guidelines != current_guidelines {
                report(self.session.set_guidelines(guidelines.into()));
            }

            ui.separator();
            if ui.button("Save Cropped Circle").clicked() {
                self.save_cropped_circle();
            }
        });
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let Some((texture_id, [width, height])) = self.texture.as_ref().map(|t| (t.id(), t.size())) else {
            ui.centered_and_justified(|ui| {
                ui.label("Open an image or drop one here");
            });
            return;
        };

        let view = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(view, egui::Sense::drag());
        let inner = view.shrink(PADDING);

        let fitted = export::fit_center_inside(width as u32, height as u32, inner.width(), inner.height());
        let layout = Bounds::from_min_size(
            inner.min.x + fitted.left,
            inner.min.y + fitted.top,
            fitted.width(),
            fitted.height(),
        );
        if self.layout != Some(layout) {
            self.layout = Some(layout);
            if let Err(err) = self.session.set_image_rect(layout) {
                warn!("Cannot place crop window: {err}");
            }
        }

        if response.drag_started() {
            let origin = ui
                .input(|i| i.pointer.press_origin())
                .or(response.interact_pointer_pos());
            if let Some(pos) = origin {
                self.session.press(pos.x, pos.y);
            }
        }
        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.session.drag_to(pos.x, pos.y);
            }
        }
        if response.drag_stopped() {
            self.session.release();
        }

        let hovered = self
            .session
            .pressed_handle()
            .or_else(|| response.hover_pos().and_then(|pos| self.session.handle_at(pos.x, pos.y)));
        if let Some(handle) = hovered {
            ui.ctx().set_cursor_icon(cursor_for(handle));
        }

        let image_rect = to_egui_rect(&layout);
        ui.painter_at(view).image(
            texture_id,
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        if self.session.image_rect().is_some() {
            self.paint_overlay(&ui.painter_at(image_rect), &ui.painter_at(view));
        }
    }

    /// Dims the image outside the selection circle, then draws the window,
    /// guidelines and handles. `image_painter` is clipped to the image.
    fn paint_overlay(&self, image_painter: &egui::Painter, painter: &egui::Painter) {
        let state = self.session.state();
        let window = to_egui_rect(&state.edges().bounds());
        let (center_x, center_y, radius) = state.selection_circle();
        let center = egui::pos2(center_x, center_y);

        // One ring wide enough to reach every corner of the image.
        let reach = image_painter.clip_rect().size().length();
        image_painter.circle_stroke(
            center,
            radius + reach / 2.0,
            egui::Stroke::new(reach, egui::Color32::from_black_alpha(150)),
        );

        image_painter.rect_stroke(
            window,
            0.0,
            egui::Stroke::new(1.0, egui::Color32::from_white_alpha(90)),
        );
        image_painter.circle_stroke(center, radius, egui::Stroke::new(2.0, egui::Color32::WHITE));

        if self.session.guidelines_visible() {
            let stroke = egui::Stroke::new(1.0, egui::Color32::from_white_alpha(140));
            let (xs, ys) = state.rule_of_thirds();
            for x in xs {
                let half_chord = chord_half_length(radius, x - center_x);
                let top = (center_y - half_chord).max(window.min.y);
                let bottom = (center_y + half_chord).min(window.max.y);
                if top < bottom {
                    image_painter.line_segment([egui::pos2(x, top), egui::pos2(x, bottom)], stroke);
                }
            }
            for y in ys {
                let half_chord = chord_half_length(radius, y - center_y);
                let left = (center_x - half_chord).max(window.min.x);
                let right = (center_x + half_chord).min(window.max.x);
                if left < right {
                    image_painter.line_segment([egui::pos2(left, y), egui::pos2(right, y)], stroke);
                }
            }
        }

        let pressed = self.session.pressed_handle();
        let handle_stroke = egui::Stroke::new(1.0, egui::Color32::BLACK);
        for handle in Handle::ALL {
            let Some(pos) = handle_position(handle, window) else {
                continue;
            };
            let fill = if pressed == Some(handle) {
                egui::Color32::LIGHT_BLUE
            } else {
                egui::Color32::WHITE
            };
            painter.circle(pos, HANDLE_DOT_RADIUS, fill, handle_stroke);
        }
    }
}

impl eframe::App for CircleCropper {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle dropped files
        if !ctx.input(|i| i.raw.dropped_files.is_empty()) {
            let dropped_files = ctx.input(|i| i.raw.dropped_files.clone());
            if let Some(path) = dropped_files.first().and_then(|file| file.path.clone()) {
                self.open_image(ctx, &path);
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.toolbar(ui);
            ui.separator();
            self.canvas(ui);
        });
    }
}

fn load_texture(ctx: &egui::Context, image: &DynamicImage) -> egui::TextureHandle {
    let size = [image.width() as _, image.height() as _];
    let rgba = image.to_rgba8();
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_flat_samples().as_slice());
    ctx.load_texture("circle-cropper-image", color_image, egui::TextureOptions::LINEAR)
}

fn report(result: circle_cropper::Result<()>) {
    if let Err(err) = result {
        if err.is_invalid_configuration() {
            warn!("Crop setting rejected: {err}");
        } else {
            error!("{err}");
        }
    }
}

fn to_egui_rect(bounds: &Bounds) -> egui::Rect {
    egui::Rect::from_min_max(
        egui::pos2(bounds.left, bounds.top),
        egui::pos2(bounds.right, bounds.bottom),
    )
}

/// Half the length of the chord `distance` away from the center of a circle.
fn chord_half_length(radius: f32, distance: f32) -> f32 {
    (radius * radius - distance * distance).max(0.0).sqrt()
}

fn handle_position(handle: Handle, window: egui::Rect) -> Option<egui::Pos2> {
    let pos = match handle {
        Handle::TopLeft => window.left_top(),
        Handle::TopRight => window.right_top(),
        Handle::BottomLeft => window.left_bottom(),
        Handle::BottomRight => window.right_bottom(),
        Handle::Left => window.left_center(),
        Handle::Top => window.center_top(),
        Handle::Right => window.right_center(),
        Handle::Bottom => window.center_bottom(),
        Handle::Center => return None,
    };
    Some(pos)
}

fn cursor_for(handle: Handle) -> egui::CursorIcon {
    match handle {
        Handle::TopLeft | Handle::BottomRight => egui::CursorIcon::ResizeNwSe,
        Handle::TopRight | Handle::BottomLeft => egui::CursorIcon::ResizeNeSw,
        Handle::Left | Handle::Right => egui::CursorIcon::ResizeHorizontal,
        Handle::Top | Handle::Bottom => egui::CursorIcon::ResizeVertical,
        Handle::Center => egui::CursorIcon::Move,
    }
}
