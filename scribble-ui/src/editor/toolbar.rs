// Toolbar along the top of the editor window.

use egui::Color32;
use scribble_canvas::{Action, History, Pen, PEN_WIDTH_RANGE};
use tracing::trace;

/// A toolbar click. Save As and Open need a file dialog before they become actions.
#[derive(Debug)]
pub enum ToolbarRequest {
    Apply(Action),
    SaveAs,
    Open,
}

pub struct Toolbar {
    color: Color32,
    width: u32,
}

impl Toolbar {
    pub fn new(pen: &Pen) -> Self {
        Self {
            color: pen.color(),
            width: pen.width(),
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, history: &History) -> Vec<ToolbarRequest> {
        let mut requests = Vec::new();

        ui.horizontal(|ui| {
            ui.label("Color");
            if ui.color_edit_button_srgba(&mut self.color).changed() {
                trace!("Color picker changed to {:?}", self.color);
                requests.push(ToolbarRequest::Apply(Action::SetColor(self.color)));
            }

            if ui.button("Clear").clicked() {
                requests.push(ToolbarRequest::Apply(Action::Clear));
            }

            ui.separator();
            let spinner = egui::DragValue::new(&mut self.width).range(PEN_WIDTH_RANGE);
            if ui.add(spinner).changed() {
                requests.push(ToolbarRequest::Apply(Action::SetWidth(self.width)));
            }
            ui.label(format!("Pen Width: {}", self.width));
            ui.separator();

            if ui
                .add_enabled(history.can_undo(), egui::Button::new("Undo"))
                .clicked()
            {
                requests.push(ToolbarRequest::Apply(Action::Undo));
            }
            if ui
                .add_enabled(history.can_redo(), egui::Button::new("Redo"))
                .clicked()
            {
                requests.push(ToolbarRequest::Apply(Action::Redo));
            }

            ui.separator();
            if ui.button("Save").clicked() {
                requests.push(ToolbarRequest::Apply(Action::Save));
            }
            if ui.button("Save As").clicked() {
                requests.push(ToolbarRequest::SaveAs);
            }
            if ui.button("Open").clicked() {
                requests.push(ToolbarRequest::Open);
            }
        });

        requests
    }
}
