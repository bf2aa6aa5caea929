// Canvas view: shows the pixel buffer and turns primary-button presses and drags into
// stroke actions.

use egui::{Color32, PointerButton, Pos2, Rect, Sense, TextureHandle, TextureOptions};
use scribble_canvas::{Action, Canvas, Point};
use tracing::trace;

pub struct CanvasView {
    texture: TextureHandle,
    dirty: bool,
    tracker: StrokeTracker,
}

impl CanvasView {
    pub fn new(ctx: &egui::Context, canvas: &Canvas) -> Self {
        let texture = ctx.load_texture("canvas", color_image(canvas), TextureOptions::NEAREST);
        Self {
            texture,
            dirty: false,
            tracker: StrokeTracker::default(),
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn show(&mut self, ui: &mut egui::Ui, canvas: &Canvas) -> Vec<Action> {
        if self.dirty {
            trace!("Uploading canvas texture");
            self.texture.set(color_image(canvas), TextureOptions::NEAREST);
            self.dirty = false;
        }

        let size = egui::vec2(canvas.width() as f32, canvas.height() as f32);
        let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
        let rect = response.rect;
        painter.image(
            self.texture.id(),
            rect,
            Rect::from_min_max(Pos2::ZERO, egui::pos2(1.0, 1.0)),
            Color32::WHITE,
        );

        let to_canvas = |pos: Pos2| {
            let scale = size / rect.size();
            let local = (pos - rect.min) * scale;
            Point::new(local.x.floor() as i32, local.y.floor() as i32)
        };

        let (primary_down, press_origin, pointer) = ui.input(|i| {
            (
                i.pointer.button_down(PointerButton::Primary),
                i.pointer.press_origin(),
                i.pointer.interact_pos(),
            )
        });

        // The stroke starts where the button went down, not where egui decides a drag began.
        let pressed_here = (response.is_pointer_button_down_on() && primary_down)
            || response.clicked_by(PointerButton::Primary);
        let pressed_at = if pressed_here {
            press_origin.or(pointer).map(to_canvas)
        } else {
            None
        };

        self.tracker.update(pressed_at, primary_down, pointer.map(to_canvas))
    }
}

/// Primary-button state reduced to PointerDown / PointerMove / PointerUp.
#[derive(Debug, Default)]
struct StrokeTracker {
    // Last position sent, while a stroke is in progress.
    last: Option<Point>,
}

impl StrokeTracker {
    /// `pressed_at` is the press origin when the button is (or was, this frame) pressed
    /// on the canvas; `down` is the current primary-button state.
    fn update(
        &mut self,
        pressed_at: Option<Point>,
        down: bool,
        pointer: Option<Point>,
    ) -> Vec<Action> {
        let mut actions = Vec::new();

        if self.last.is_none() {
            if let Some(origin) = pressed_at {
                actions.push(Action::PointerDown(origin));
                self.last = Some(origin);
            }
        }

        if let Some(last) = self.last {
            if let Some(point) = pointer.filter(|&p| p != last) {
                actions.push(Action::PointerMove(point));
                self.last = Some(point);
            }
            if !down {
                actions.push(Action::PointerUp);
                self.last = None;
            }
        }

        actions
    }
}

fn color_image(canvas: &Canvas) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied(
        [canvas.width() as usize, canvas.height() as usize],
        &canvas.to_rgba_bytes(),
    )
}
