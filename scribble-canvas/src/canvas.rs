// Fixed-size raster canvas for Scribble.
// Strokes are baked straight into the pixel buffer; history works on whole snapshots.

use std::path::Path;

use egui::Color32;
use image::{Rgb, RgbImage};
use tracing::{debug, info, trace, warn};

use crate::error::CanvasError;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

/// Widest brush `draw_segment` will stamp; larger widths are drawn at this size.
pub const MAX_BRUSH_WIDTH: u32 = 1024;

/// A pointer position in canvas pixel coordinates. May lie outside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Immutable deep copy of a canvas pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    pixels: Box<[Color32]>,
}

impl Snapshot {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color32] {
        &self.pixels
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    background: Color32,
    pixels: Vec<Color32>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Color32) -> Self {
        info!(
            "Creating new canvas of size {}x{} with background color {:?}",
            width, height, background
        );

        let background = opaque(background);
        let total_pixels = width as usize * height as usize;
        debug!("Total pixels to initialize: {}", total_pixels);

        Self {
            width,
            height,
            background,
            pixels: vec![background; total_pixels],
        }
    }

    // Callers must check bounds first.
    fn coord_to_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color32> {
        if x >= self.width || y >= self.height {
            warn!(
                "Requested pixel color at invalid coordinates ({}, {})",
                x, y
            );
            return None;
        }
        Some(self.pixels[self.coord_to_index(x, y)])
    }

    /// Returns false, leaving the buffer untouched, when (x, y) is off the canvas.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color32) -> bool {
        if x >= self.width || y >= self.height {
            trace!("Ignoring pixel write at ({}, {})", x, y);
            return false;
        }
        let index = self.coord_to_index(x, y);
        self.pixels[index] = opaque(color);
        true
    }

    /// Sets every pixel to `color`. Not recorded in history on its own.
    pub fn fill(&mut self, color: Color32) {
        info!("Filling canvas {:?}", color);
        let color = opaque(color);
        self.pixels.fill(color);
        trace!("Canvas fill complete");
    }

    /// Fills the canvas with its background color.
    pub fn clear(&mut self) {
        info!("Clearing canvas");
        self.fill(self.background);
    }

    /// Draws a straight line with a round brush of diameter `width`.
    ///
    /// Coordinates may lie anywhere; whatever falls off the canvas is clipped.
    /// A width of 0 is drawn as 1, widths above [`MAX_BRUSH_WIDTH`] as that maximum.
    pub fn draw_segment(&mut self, from: Point, to: Point, color: Color32, width: u32) {
        let width = width.clamp(1, MAX_BRUSH_WIDTH);
        let radius = width as f32 / 2.0;
        let reach = radius.ceil() as i32;
        trace!(
            "Drawing segment {:?} -> {:?} width {} color {:?}",
            from,
            to,
            width,
            color
        );

        let bounds_min = (-(reach as f64), -(reach as f64));
        let bounds_max = (
            (self.width as i64 - 1 + reach as i64) as f64,
            (self.height as i64 - 1 + reach as i64) as f64,
        );
        let Some((start, end)) = clip_segment(from, to, bounds_min, bounds_max) else {
            trace!("Segment lies entirely off the canvas");
            return;
        };

        let side = 2 * reach as usize + 1;
        let mut brush = Vec::with_capacity(side * side);
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                if (dx * dx + dy * dy) as f32 <= radius * radius {
                    brush.push((dx, dy));
                }
            }
        }

        let color = opaque(color);
        let (width, height) = (self.width as i32, self.height as i32);
        let pixels = &mut self.pixels;
        bresenham_line(start, end, |cx, cy| {
            for &(dx, dy) in &brush {
                let (px, py) = (cx + dx, cy + dy);
                if px >= 0 && py >= 0 && px < width && py < height {
                    pixels[py as usize * width as usize + px as usize] = color;
                }
            }
        });
    }

    /// Replaces the buffer with the image at `path`.
    ///
    /// The image must match the canvas size exactly; on any error the buffer is unchanged.
    pub fn load_from(&mut self, path: impl AsRef<Path>) -> Result<(), CanvasError> {
        let path = path.as_ref();
        info!("Loading canvas from {}", path.display());

        let decoded = image::open(path)
            .map_err(|source| CanvasError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgb8();

        let found = decoded.dimensions();
        if found != (self.width, self.height) {
            warn!(
                "Rejecting {}: image is {}x{}, canvas is {}x{}",
                path.display(),
                found.0,
                found.1,
                self.width,
                self.height
            );
            return Err(CanvasError::DimensionMismatch {
                path: path.to_path_buf(),
                expected: (self.width, self.height),
                found,
            });
        }

        self.pixels = decoded
            .pixels()
            .map(|Rgb([r, g, b])| Color32::from_rgb(*r, *g, *b))
            .collect();
        debug!("Loaded {} pixels", self.pixels.len());
        Ok(())
    }

    /// Encodes the buffer as RGB8, format chosen from the path extension.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), CanvasError> {
        let path = path.as_ref();
        info!("Saving canvas to {}", path.display());

        let buffer = RgbImage::from_fn(self.width, self.height, |x, y| {
            let pixel = self.pixels[self.coord_to_index(x, y)];
            Rgb([pixel.r(), pixel.g(), pixel.b()])
        });
        buffer.save(path).map_err(|source| CanvasError::Encode {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Saved {}x{} image", self.width, self.height);
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        trace!("Taking canvas snapshot");
        Snapshot {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone().into_boxed_slice(),
        }
    }

    /// True when `snapshot` was taken from a canvas of this size.
    pub fn fits(&self, snapshot: &Snapshot) -> bool {
        (snapshot.width, snapshot.height) == (self.width, self.height)
    }

    /// Replaces the buffer with `snapshot`. A snapshot of another size is refused
    /// and the buffer is left as it was.
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<(), CanvasError> {
        if !self.fits(&snapshot) {
            warn!(
                "Refusing {}x{} snapshot on {}x{} canvas",
                snapshot.width, snapshot.height, self.width, self.height
            );
            return Err(CanvasError::SnapshotMismatch {
                expected: (self.width, self.height),
                found: (snapshot.width, snapshot.height),
            });
        }
        self.replace_with(snapshot);
        Ok(())
    }

    // Callers must check `fits` first.
    pub(crate) fn replace_with(&mut self, snapshot: Snapshot) {
        trace!("Restoring canvas snapshot");
        self.pixels = snapshot.pixels.into_vec();
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    /// Row-major pixel buffer.
    pub fn pixels(&self) -> &[Color32] {
        &self.pixels
    }

    /// Row-major unmultiplied RGBA bytes, for uploading to a texture.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_array()).collect()
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, Color32::WHITE)
    }
}

// The buffer is RGB; alpha is dropped on the way in.
fn opaque(color: Color32) -> Color32 {
    Color32::from_rgb(color.r(), color.g(), color.b())
}

// Liang-Barsky clip against an inclusive rectangle.
fn clip_segment(
    from: Point,
    to: Point,
    min: (f64, f64),
    max: (f64, f64),
) -> Option<(Point, Point)> {
    let (x0, y0) = (from.x as f64, from.y as f64);
    let dx = to.x as f64 - x0;
    let dy = to.y as f64 - y0;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (p, q) in [
        (-dx, x0 - min.0),
        (dx, max.0 - x0),
        (-dy, y0 - min.1),
        (dy, max.1 - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64| Point::new((x0 + t * dx).round() as i32, (y0 + t * dy).round() as i32);
    Some((at(t0), at(t1)))
}

fn bresenham_line<F>(from: Point, to: Point, mut plot: F)
where
    F: FnMut(i32, i32),
{
    let (mut x, mut y) = (from.x, from.y);
    let dx = (to.x - x).abs();
    let dy = -(to.y - y).abs();
    let sx = if x < to.x { 1 } else { -1 };
    let sy = if y < to.y { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        plot(x, y);
        if x == to.x && y == to.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
