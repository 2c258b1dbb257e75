//! Software canvas
//!
//! Rasterizes rectangles and polylines into an RGBA buffer with source-over
//! blending. Text is not rasterized: labels are kept with their position so
//! the host can composite them with its own font stack.

use glam::{IVec2, UVec2, Vec2};

use crate::canvas::{Canvas, PathCommand};
use crate::color::Rgba;

#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub position: Vec2,
    pub font: String,
    pub color: Rgba,
}

pub struct PixelCanvas {
    size: UVec2,
    pixels: Vec<Rgba>,
    labels: Vec<TextLabel>,
}

impl PixelCanvas {
    pub fn new(size: UVec2) -> Self {
        Self {
            size,
            pixels: vec![Rgba::TRANSPARENT; area(size)],
            labels: Vec::new(),
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.size.x && y < self.size.y {
            Some(self.pixels[y as usize * self.size.x as usize + x as usize])
        } else {
            None
        }
    }

    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    /// Row-major RGBA8 bytes, ready for image encoders.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| [p.r, p.g, p.b, p.a])
            .collect()
    }

    fn blend(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x >= self.size.x as i32 || y >= self.size.y as i32 {
            return;
        }
        let index = y as usize * self.size.x as usize + x as usize;
        self.pixels[index] = color.over(self.pixels[index]);
    }

    fn fill_span(&mut self, min: IVec2, max: IVec2, color: Rgba) {
        let min = min.max(IVec2::ZERO);
        let max = max.min(self.size.as_ivec2());
        for y in min.y..max.y {
            for x in min.x..max.x {
                self.blend(x, y, color);
            }
        }
    }

    /// Stamps a square brush of `width` pixels along the segment.
    fn draw_line(&mut self, start: Vec2, end: Vec2, width: i32, color: Rgba) {
        let offset = (width - 1) / 2;
        bresenham(start, end, |p| {
            let corner = p - IVec2::splat(offset);
            self.fill_span(corner, corner + IVec2::splat(width), color);
        });
    }
}

impl Canvas for PixelCanvas {
    fn resize(&mut self, _logical: UVec2, backing: UVec2) {
        self.size = backing;
        self.pixels = vec![Rgba::TRANSPARENT; area(backing)];
        self.labels.clear();
    }

    fn backing_size(&self) -> UVec2 {
        self.size
    }

    fn clear(&mut self) {
        self.pixels.fill(Rgba::TRANSPARENT);
        self.labels.clear();
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        let min = origin.round().as_ivec2();
        let max = (origin + size).round().as_ivec2();
        self.fill_span(min, max, color);
    }

    fn stroke_rect(&mut self, origin: Vec2, size: Vec2, line_width: f32, color: Rgba) {
        let w = (line_width.round() as i32).max(1);
        let min = origin.round().as_ivec2();
        let max = (origin + size).round().as_ivec2();
        // top, bottom, left, right; side edges skip the corners already drawn
        self.fill_span(min, IVec2::new(max.x, min.y + w), color);
        self.fill_span(IVec2::new(min.x, max.y - w), max, color);
        self.fill_span(
            IVec2::new(min.x, min.y + w),
            IVec2::new(min.x + w, max.y - w),
            color,
        );
        self.fill_span(
            IVec2::new(max.x - w, min.y + w),
            IVec2::new(max.x, max.y - w),
            color,
        );
    }

    fn fill_text(&mut self, text: &str, position: Vec2, font: &str, color: Rgba) {
        self.labels.push(TextLabel {
            text: text.to_string(),
            position,
            font: font.to_string(),
            color,
        });
    }

    fn stroke_path(&mut self, path: &[PathCommand], line_width: f32, color: Rgba) {
        let width = (line_width.round() as i32).max(1);
        let mut cursor: Option<Vec2> = None;
        for command in path {
            match *command {
                PathCommand::MoveTo(point) => cursor = Some(point),
                PathCommand::LineTo(point) => {
                    if let Some(from) = cursor {
                        // clip to the surface plus a brush-width margin
                        let margin = Vec2::splat(width as f32);
                        let bounds = (-margin, self.size.as_vec2() + margin);
                        if let Some((a, b)) = clip_segment(from, point, bounds.0, bounds.1) {
                            self.draw_line(a, b, width, color);
                        }
                    }
                    cursor = Some(point);
                }
            }
        }
    }
}

fn area(size: UVec2) -> usize {
    size.x as usize * size.y as usize
}

/// Liang-Barsky clip of segment `a`-`b` against the box `min..=max`.
fn clip_segment(a: Vec2, b: Vec2, min: Vec2, max: Vec2) -> Option<(Vec2, Vec2)> {
    if !(a.is_finite() && b.is_finite()) {
        return None;
    }
    let d = b - a;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;
    for (p, q) in [
        (-d.x, a.x - min.x),
        (d.x, max.x - a.x),
        (-d.y, a.y - min.y),
        (d.y, max.y - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((a + d * t0, a + d * t1))
}

fn bresenham<F>(start: Vec2, end: Vec2, mut plot: F)
where
    F: FnMut(IVec2),
{
    let mut x0 = start.x.round() as i64;
    let mut y0 = start.y.round() as i64;
    let x1 = end.x.round() as i64;
    let y1 = end.y.round() as i64;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        plot(IVec2::new(x0 as i32, y0 as i32));
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
