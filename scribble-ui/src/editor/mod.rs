// Editor window for Scribble.
// Toolbar and canvas view produce Actions; only this module touches the Document.

pub mod dialogs;
pub mod toolbar;
pub mod view;

use scribble_canvas::{Action, Document, Outcome};
use tracing::{error, info};

use crate::editor::toolbar::{Toolbar, ToolbarRequest};
use crate::editor::view::CanvasView;

pub struct ScribbleApp {
    document: Document,
    toolbar: Toolbar,
    view: CanvasView,
    status: Option<String>,
    title: String,
}

impl ScribbleApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        document: Document,
        status: Option<String>,
    ) -> Self {
        let view = CanvasView::new(&cc.egui_ctx, document.canvas());
        let toolbar = Toolbar::new(document.pen());
        let title = document.title();
        Self {
            document,
            toolbar,
            view,
            status,
            title,
        }
    }

    fn dispatch(&mut self, action: Action) {
        match self.document.apply(action) {
            Ok(Outcome::Redraw) => self.view.mark_dirty(),
            Ok(Outcome::Unchanged) => {}
            Ok(Outcome::NeedsSavePath) => {
                self.save_as();
                return;
            }
            Err(e) => {
                error!("{}", e);
                self.status = Some(e.to_string());
                return;
            }
        }
        self.status = None;
    }

    fn save_as(&mut self) {
        if let Some(path) = dialogs::pick_save_path(self.document.current_file()) {
            self.dispatch(Action::SaveAs(path));
        }
    }

    fn handle(&mut self, request: ToolbarRequest) {
        match request {
            ToolbarRequest::Apply(action) => self.dispatch(action),
            ToolbarRequest::SaveAs => self.save_as(),
            ToolbarRequest::Open => {
                if let Some(path) = dialogs::pick_open_path() {
                    info!("Opening {}", path.display());
                    self.dispatch(Action::Open(path));
                }
            }
        }
    }
}

impl eframe::App for ScribbleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let requests = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| self.toolbar.show(ui, self.document.history()))
            .inner;
        for request in requests {
            self.handle(request);
        }

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| match &self.status {
            Some(message) => {
                ui.colored_label(ui.visuals().error_fg_color, message);
            }
            None => {
                ui.label(format!(
                    "Undo: {}  Redo: {}",
                    self.document.history().undo_len(),
                    self.document.history().redo_len()
                ));
            }
        });

        let actions = egui::CentralPanel::default()
            .show(ctx, |ui| self.view.show(ui, self.document.canvas()))
            .inner;
        for action in actions {
            self.dispatch(action);
        }
        if self.view.is_dirty() {
            ctx.request_repaint();
        }

        let title = self.document.title();
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }
    }
}
