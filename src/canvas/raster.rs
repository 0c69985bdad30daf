use image::{ImageOutputFormat, RgbaImage};
use std::io::Cursor;

use crate::error::{Result, StudioError};

use super::surface::CanvasPoint;

pub type Rgba = [u8; 4];

pub const WHITE: Rgba = [255, 255, 255, 255];
pub const INK: Rgba = [0, 0, 0, 255];

/// Fixed-resolution backing store for the sketch canvas.
#[derive(Debug, Clone)]
pub struct Raster {
    pixels: RgbaImage,
    background: Rgba,
    stroke_width: f32,
}

impl Raster {
    pub fn new(width: u32, height: u32, stroke_width: f32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width.max(1), height.max(1), image::Rgba(WHITE)),
            background: WHITE,
            stroke_width: stroke_width.max(1.0),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width() && y < self.height() {
            Some(self.pixels.get_pixel(x, y).0)
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        let bg = image::Rgba(self.background);
        for pixel in self.pixels.pixels_mut() {
            *pixel = bg;
        }
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.pixels().all(|p| p.0 == self.background)
    }

    /// Round-capped line from `from` to `to`, stamped at half-pixel steps.
    /// Only the part that can touch the canvas is stamped.
    pub fn stroke_segment(&mut self, from: CanvasPoint, to: CanvasPoint) {
        let margin = f64::from(self.stroke_width);
        let bounds = (
            -margin,
            -margin,
            f64::from(self.width()) + margin,
            f64::from(self.height()) + margin,
        );
        let Some((x0, y0, x1, y1)) = clip_segment(from, to, bounds) else {
            return;
        };

        let dx = x1 - x0;
        let dy = y1 - y0;
        let length = (dx * dx + dy * dy).sqrt();
        let steps = (length * 2.0).ceil().max(1.0) as u32;
        for i in 0..=steps {
            let t = f64::from(i) / f64::from(steps);
            self.dot(CanvasPoint::new((x0 + dx * t) as f32, (y0 + dy * t) as f32));
        }
    }

    pub fn dot(&mut self, center: CanvasPoint) {
        let radius = self.stroke_width / 2.0;
        let min_x = (center.x - radius).floor().max(0.0) as i64;
        let min_y = (center.y - radius).floor().max(0.0) as i64;
        let max_x = ((center.x + radius).ceil() as i64).min(self.width() as i64 - 1);
        let max_y = ((center.y + radius).ceil() as i64).min(self.height() as i64 - 1);
        let color = image::Rgba(INK);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5 - center.x;
                let py = y as f32 + 0.5 - center.y;
                if px * px + py * py <= radius * radius {
                    self.pixels.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }

    /// Lossless PNG serialisation of the current pixels.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.pixels
            .write_to(&mut buffer, ImageOutputFormat::Png)
            .map_err(|e| StudioError::EncodeError(format!("PNG export failed: {}", e)))?;
        Ok(buffer.into_inner())
    }
}

/// Liang-Barsky clip of a segment against `(min_x, min_y, max_x, max_y)`.
/// Non-finite endpoints clip to nothing.
fn clip_segment(
    from: CanvasPoint,
    to: CanvasPoint,
    (min_x, min_y, max_x, max_y): (f64, f64, f64, f64),
) -> Option<(f64, f64, f64, f64)> {
    let (x0, y0) = (f64::from(from.x), f64::from(from.y));
    let (x1, y1) = (f64::from(to.x), f64::from(to.y));
    if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
        return None;
    }

    let dx = x1 - x0;
    let dy = y1 - y0;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [
        (-dx, x0 - min_x),
        (dx, max_x - x0),
        (-dy, y0 - min_y),
        (dy, max_y - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
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
    }

    Some((x0 + dx * t0, y0 + dy * t0, x0 + dx * t1, y0 + dy * t1))
}
