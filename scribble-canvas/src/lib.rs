//! scribble-canvas: raster canvas, pen and bounded undo/redo for Scribble.
//!
//! Design rules:
//! - The canvas never changes size after creation.
//! - Undo/redo is a pair of snapshot deques; a new stroke always clears redo.
//! - The core is synchronous and owned by one thread; the UI feeds it `Action`s.
//! - Encoding and decoding of image files is delegated to the `image` crate.

pub mod canvas;
pub mod config;
pub mod document;
pub mod error;
pub mod history;
pub mod pen;

pub use canvas::{Canvas, Point, Snapshot, DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_BRUSH_WIDTH};
pub use config::{load_config, EditorConfig, CONFIG_ENV_VAR};
pub use document::{Action, Document, Outcome};
pub use error::CanvasError;
pub use history::{History, DEFAULT_HISTORY_CAPACITY, MAX_HISTORY_CAPACITY};
pub use pen::{Pen, PEN_WIDTH_RANGE};

/// Re-exported so callers don't need a direct egui dependency for colors.
pub use egui::Color32;
