//! Application state for one open drawing.
//!
//! The UI turns toolbar clicks and pointer events into [`Action`]s and hands them
//! to [`Document::apply`]. Nothing in here calls back into the UI.

use std::path::{Path, PathBuf};

use egui::Color32;
use tracing::{debug, info, warn};

use crate::canvas::{Canvas, Point};
use crate::config::EditorConfig;
use crate::error::CanvasError;
use crate::history::History;
use crate::pen::Pen;

/// Everything the UI can ask the document to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    SetColor(Color32),
    SetWidth(u32),
    Clear,
    Undo,
    Redo,
    /// Overwrite the associated file, if there is one.
    Save,
    SaveAs(PathBuf),
    Open(PathBuf),
}

/// What the UI should do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Pixels changed; repaint.
    Redraw,
    /// Nothing visible changed.
    Unchanged,
    /// `Save` had no file to write to; ask for a path and send `SaveAs`.
    NeedsSavePath,
}

#[derive(Debug)]
pub struct Document {
    canvas: Canvas,
    history: History,
    pen: Pen,
    current_file: Option<PathBuf>,
    // Last pointer position while a stroke is in progress.
    stroke: Option<Point>,
}

impl Document {
    pub fn new(config: &EditorConfig) -> Self {
        info!(
            "New document {}x{}, history capacity {}",
            config.canvas_width, config.canvas_height, config.history_capacity
        );
        Self {
            canvas: config.canvas(),
            history: config.history(),
            pen: config.pen(),
            current_file: None,
            stroke: None,
        }
    }

    /// Failures leave canvas, history and file association as they were.
    pub fn apply(&mut self, action: Action) -> Result<Outcome, CanvasError> {
        debug!("Applying {:?}", action);
        let outcome = match action {
            Action::PointerDown(point) => {
                self.history.begin_stroke(&self.canvas);
                self.stroke = Some(point);
                Outcome::Unchanged
            }
            Action::PointerMove(point) => match self.stroke {
                Some(last) => {
                    self.canvas
                        .draw_segment(last, point, self.pen.color(), self.pen.width());
                    self.stroke = Some(point);
                    Outcome::Redraw
                }
                None => Outcome::Unchanged,
            },
            Action::PointerUp => {
                self.stroke = None;
                Outcome::Unchanged
            }
            Action::SetColor(color) => {
                self.pen.set_color(color);
                Outcome::Unchanged
            }
            Action::SetWidth(width) => {
                self.pen.set_width(width);
                Outcome::Unchanged
            }
            Action::Clear => {
                self.history.begin_stroke(&self.canvas);
                self.canvas.clear();
                Outcome::Redraw
            }
            Action::Undo => redraw_if(self.history.undo(&mut self.canvas)),
            Action::Redo => redraw_if(self.history.redo(&mut self.canvas)),
            Action::Save => match self.current_file.clone() {
                Some(path) => {
                    self.write(&path)?;
                    Outcome::Unchanged
                }
                None => Outcome::NeedsSavePath,
            },
            Action::SaveAs(path) => {
                self.write(&path)?;
                self.current_file = Some(path);
                Outcome::Unchanged
            }
            Action::Open(path) => {
                self.open(&path)?;
                self.current_file = Some(path);
                Outcome::Redraw
            }
        };
        Ok(outcome)
    }

    fn write(&self, path: &Path) -> Result<(), CanvasError> {
        self.canvas.save_to(path).inspect_err(|e| {
            warn!("Save failed: {}", e);
        })
    }

    fn open(&mut self, path: &Path) -> Result<(), CanvasError> {
        let before = self.canvas.snapshot();
        self.canvas.load_from(path).inspect_err(|e| {
            warn!("Open failed: {}", e);
        })?;
        self.history.record(before);
        self.stroke = None;
        Ok(())
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    pub fn is_stroking(&self) -> bool {
        self.stroke.is_some()
    }

    /// Window title: the file name, or "Untitled".
    pub fn title(&self) -> String {
        let name = self
            .current_file
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string());
        format!("{name} - Scribble")
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::new(&EditorConfig::default())
    }
}

fn redraw_if(changed: bool) -> Outcome {
    if changed {
        Outcome::Redraw
    } else {
        Outcome::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Document {
        Document::new(&EditorConfig {
            canvas_width: 20,
            canvas_height: 20,
            ..EditorConfig::default()
        })
    }

    fn draw(doc: &mut Document, from: (i32, i32), to: (i32, i32)) {
        doc.apply(Action::PointerDown(from.into())).unwrap();
        doc.apply(Action::PointerMove(to.into())).unwrap();
        doc.apply(Action::PointerUp).unwrap();
    }

    #[test]
    fn test_stroke_draws_with_pen() {
        let mut doc = small();
        doc.apply(Action::SetColor(Color32::RED)).unwrap();
        doc.apply(Action::SetWidth(1)).unwrap();

        assert_eq!(
            doc.apply(Action::PointerDown(Point::new(2, 2))).unwrap(),
            Outcome::Unchanged
        );
        assert!(doc.is_stroking());
        assert_eq!(
            doc.apply(Action::PointerMove(Point::new(10, 2))).unwrap(),
            Outcome::Redraw
        );
        doc.apply(Action::PointerMove(Point::new(10, 8))).unwrap();
        doc.apply(Action::PointerUp).unwrap();

        assert!(!doc.is_stroking());
        assert_eq!(doc.canvas().get_pixel(6, 2), Some(Color32::RED));
        assert_eq!(doc.canvas().get_pixel(10, 5), Some(Color32::RED));
        assert_eq!(doc.canvas().get_pixel(6, 5), Some(Color32::WHITE));
        assert_eq!(doc.history().undo_len(), 1);
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let mut doc = small();
        let before = doc.canvas().clone();

        assert_eq!(
            doc.apply(Action::PointerMove(Point::new(5, 5))).unwrap(),
            Outcome::Unchanged
        );
        assert!(!doc.is_stroking());
        assert_eq!(doc.canvas(), &before);
    }

    #[test]
    fn test_one_snapshot_per_stroke() {
        let mut doc = small();
        doc.apply(Action::PointerDown(Point::new(0, 0))).unwrap();
        for x in 1..10 {
            doc.apply(Action::PointerMove(Point::new(x, x))).unwrap();
        }
        doc.apply(Action::PointerUp).unwrap();
        assert_eq!(doc.history().undo_len(), 1);
    }

    #[test]
    fn test_oversized_pen_width_draws_without_panic() {
        let mut doc = small();
        doc.apply(Action::SetWidth(50_000)).unwrap();
        draw(&mut doc, (3, 3), (4, 3));

        assert_eq!(doc.pen().width(), 50_000);
        assert!(doc.canvas().pixels().iter().all(|&p| p == Color32::BLACK));
    }

    #[test]
    fn test_pen_survives_undo() {
        let mut doc = small();
        draw(&mut doc, (0, 0), (5, 5));
        doc.apply(Action::SetWidth(7)).unwrap();
        doc.apply(Action::Undo).unwrap();
        assert_eq!(doc.pen().width(), 7);
    }

    #[test]
    fn test_clear_is_undoable() {
        let mut doc = small();
        draw(&mut doc, (0, 0), (19, 19));
        let drawn = doc.canvas().clone();

        assert_eq!(doc.apply(Action::Clear).unwrap(), Outcome::Redraw);
        assert!(doc.canvas().pixels().iter().all(|&p| p == Color32::WHITE));

        assert_eq!(doc.apply(Action::Undo).unwrap(), Outcome::Redraw);
        assert_eq!(doc.canvas(), &drawn);
    }

    #[test]
    fn test_undo_redo_outcomes() {
        let mut doc = small();
        assert_eq!(doc.apply(Action::Undo).unwrap(), Outcome::Unchanged);
        assert_eq!(doc.apply(Action::Redo).unwrap(), Outcome::Unchanged);

        draw(&mut doc, (0, 0), (5, 0));
        assert_eq!(doc.apply(Action::Undo).unwrap(), Outcome::Redraw);
        assert_eq!(doc.apply(Action::Redo).unwrap(), Outcome::Redraw);
    }

    #[test]
    fn test_save_without_file_asks_for_path() {
        let mut doc = small();
        assert_eq!(doc.apply(Action::Save).unwrap(), Outcome::NeedsSavePath);
        assert!(doc.current_file().is_none());
    }

    #[test]
    fn test_save_as_then_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drawing.png");
        let mut doc = small();
        draw(&mut doc, (0, 0), (19, 0));

        doc.apply(Action::SaveAs(path.clone())).unwrap();
        assert_eq!(doc.current_file(), Some(path.as_path()));
        assert_eq!(doc.title(), "drawing.png - Scribble");

        draw(&mut doc, (0, 5), (19, 5));
        assert_eq!(doc.apply(Action::Save).unwrap(), Outcome::Unchanged);

        let mut reloaded = small();
        reloaded.apply(Action::Open(path)).unwrap();
        assert_eq!(reloaded.canvas().pixels(), doc.canvas().pixels());
    }

    #[test]
    fn test_failed_save_as_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = small();
        draw(&mut doc, (0, 0), (5, 5));
        let before = doc.canvas().clone();

        let err = doc
            .apply(Action::SaveAs(dir.path().join("missing").join("x.png")))
            .unwrap_err();
        assert!(matches!(err, CanvasError::Encode { .. }));
        assert!(doc.current_file().is_none());
        assert_eq!(doc.canvas(), &before);
        assert_eq!(doc.history().undo_len(), 1);
    }

    #[test]
    fn test_open_is_undoable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.png");
        let mut source = small();
        source.apply(Action::SetColor(Color32::RED)).unwrap();
        source.apply(Action::SetWidth(50)).unwrap();
        draw(&mut source, (10, 10), (10, 10));
        source.apply(Action::SaveAs(path.clone())).unwrap();

        let mut doc = small();
        let blank = doc.canvas().clone();
        assert_eq!(doc.apply(Action::Open(path)).unwrap(), Outcome::Redraw);
        assert_eq!(doc.canvas().pixels(), source.canvas().pixels());

        doc.apply(Action::Undo).unwrap();
        assert_eq!(doc.canvas(), &blank);
    }

    #[test]
    fn test_failed_open_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = small();
        draw(&mut doc, (0, 0), (5, 5));
        let before = doc.canvas().clone();

        let err = doc
            .apply(Action::Open(dir.path().join("nope.png")))
            .unwrap_err();
        assert!(err.is_decode());
        assert_eq!(doc.canvas(), &before);
        assert_eq!(doc.history().undo_len(), 1);
        assert!(doc.current_file().is_none());
        assert_eq!(doc.title(), "Untitled - Scribble");
    }
}
