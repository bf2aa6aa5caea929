// Pen settings used for freehand strokes.

use std::ops::RangeInclusive;

use egui::Color32;
use tracing::debug;

/// Widths the toolbar offers. `Pen` itself accepts any value; keeping it in range
/// is the caller's job.
pub const PEN_WIDTH_RANGE: RangeInclusive<u32> = 1..=50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pen {
    color: Color32,
    width: u32,
}

impl Pen {
    pub fn new(color: Color32, width: u32) -> Self {
        Self { color, width }
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn set_color(&mut self, color: Color32) {
        debug!("Pen color set to {:?}", color);
        self.color = color;
    }

    pub fn set_width(&mut self, width: u32) {
        debug!("Pen width set to {}", width);
        self.width = width;
    }
}

impl Default for Pen {
    fn default() -> Self {
        Pen::new(Color32::BLACK, 2)
    }
}
