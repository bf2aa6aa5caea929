//! Editor defaults, read once at startup.
//!
//! The config file is optional JSON; any missing field falls back to its default.
//! Nothing here is written back to disk.

use std::fs;
use std::path::Path;

use anyhow::Context;
use egui::Color32;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::canvas::{Canvas, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::history::{History, DEFAULT_HISTORY_CAPACITY, MAX_HISTORY_CAPACITY};
use crate::pen::{Pen, PEN_WIDTH_RANGE};

/// Environment variable holding the path of the config file.
pub const CONFIG_ENV_VAR: &str = "SCRIBBLE_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default = "default_canvas_width")]
    pub canvas_width: u32,
    #[serde(default = "default_canvas_height")]
    pub canvas_height: u32,
    #[serde(default = "default_background")]
    pub background: [u8; 3],
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    #[serde(default = "default_pen_width")]
    pub pen_width: u32,
    #[serde(default = "default_pen_color")]
    pub pen_color: [u8; 3],
}

fn default_canvas_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_canvas_height() -> u32 {
    DEFAULT_HEIGHT
}

fn default_background() -> [u8; 3] {
    [255, 255, 255]
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

fn default_pen_width() -> u32 {
    2
}

fn default_pen_color() -> [u8; 3] {
    [0, 0, 0]
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            background: default_background(),
            history_capacity: default_history_capacity(),
            pen_width: default_pen_width(),
            pen_color: default_pen_color(),
        }
    }
}

impl EditorConfig {
    /// Reads the file named by `SCRIBBLE_CONFIG`, or returns defaults when it is unset.
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => load_config(path),
            None => {
                debug!("{} not set, using default editor config", CONFIG_ENV_VAR);
                Ok(Self::default())
            }
        }
    }

    pub fn background_color(&self) -> Color32 {
        let [r, g, b] = self.background;
        Color32::from_rgb(r, g, b)
    }

    pub fn pen_color(&self) -> Color32 {
        let [r, g, b] = self.pen_color;
        Color32::from_rgb(r, g, b)
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(
            self.canvas_width,
            self.canvas_height,
            self.background_color(),
        )
    }

    pub fn history(&self) -> History {
        History::new(self.history_capacity)
    }

    pub fn pen(&self) -> Pen {
        Pen::new(self.pen_color(), self.pen_width)
    }
}

/// Load editor config from a JSON file.
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<EditorConfig> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config file: {}", path.display()))?;
    let config: EditorConfig = serde_json::from_str(&data)
        .with_context(|| format!("parse config json: {}", path.display()))?;

    if config.canvas_width == 0 || config.canvas_height == 0 {
        anyhow::bail!(
            "canvas size must be non-zero, got {}x{}",
            config.canvas_width,
            config.canvas_height
        );
    }

    if config.history_capacity > MAX_HISTORY_CAPACITY {
        anyhow::bail!(
            "history_capacity must be at most {}, got {}",
            MAX_HISTORY_CAPACITY,
            config.history_capacity
        );
    }

    if !PEN_WIDTH_RANGE.contains(&config.pen_width) {
        anyhow::bail!(
            "pen_width must be within {}..={}, got {}",
            PEN_WIDTH_RANGE.start(),
            PEN_WIDTH_RANGE.end(),
            config.pen_width
        );
    }

    info!("Loaded editor config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!((config.canvas_width, config.canvas_height), (800, 600));
        assert_eq!(config.background_color(), Color32::WHITE);
        assert_eq!(config.history().capacity(), 10);
        assert_eq!(config.pen(), Pen::default());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let file = write_config(r#"{ "history_capacity": 25, "pen_color": [255, 0, 0] }"#);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.history_capacity, 25);
        assert_eq!(config.pen_color(), Color32::RED);
        assert_eq!(config.canvas_width, 800);
        assert_eq!(config.pen_width, 2);
    }

    #[test]
    fn test_zero_size_rejected() {
        let file = write_config(r#"{ "canvas_width": 0 }"#);
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_oversized_history_rejected() {
        let file = write_config(r#"{ "history_capacity": 18446744073709551615 }"#);
        let err = load_config(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("history_capacity"));

        let file = write_config(r#"{ "history_capacity": 100 }"#);
        assert_eq!(load_config(file.path()).unwrap().history_capacity, 100);
    }

    #[test]
    fn test_pen_width_outside_range_rejected() {
        for width in [0, 51, 50_000] {
            let file = write_config(&format!(r#"{{ "pen_width": {width} }}"#));
            let err = load_config(file.path()).unwrap_err();
            assert!(format!("{err:#}").contains("pen_width"), "width {width}");
        }

        let file = write_config(r#"{ "pen_width": 50 }"#);
        assert_eq!(load_config(file.path()).unwrap().pen().width(), 50);
    }

    #[test]
    fn test_bad_json_rejected() {
        let file = write_config("not json");
        let err = load_config(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parse config json"));
    }

    #[test]
    fn test_missing_file_rejected() {
        assert!(load_config("definitely/not/here.json").is_err());
    }
}
