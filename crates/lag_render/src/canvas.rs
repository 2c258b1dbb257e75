//! Drawing surface capability
//!
//! The chart only needs a handful of 2D primitives. Hosts implement [`Canvas`]
//! over whatever they render with; [`DisplayList`] records the calls so they
//! can be replayed later, and `PixelCanvas` rasterizes them in software.

use glam::{UVec2, Vec2};

use crate::color::Rgba;

/// One step of a path. The first step of a stroke is a move, never a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Vec2),
    LineTo(Vec2),
}

pub trait Canvas {
    /// Resizes the surface. `backing` is the pixel size, usually `logical`
    /// scaled by the device pixel ratio. Contents are discarded.
    fn resize(&mut self, logical: UVec2, backing: UVec2);

    fn backing_size(&self) -> UVec2;

    fn clear(&mut self);

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba);

    fn stroke_rect(&mut self, origin: Vec2, size: Vec2, line_width: f32, color: Rgba);

    /// Draws `text` with its baseline starting at `position`.
    fn fill_text(&mut self, text: &str, position: Vec2, font: &str, color: Rgba);

    fn stroke_path(&mut self, path: &[PathCommand], line_width: f32, color: Rgba);
}

/// A recorded canvas call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        origin: Vec2,
        size: Vec2,
        color: Rgba,
    },
    StrokeRect {
        origin: Vec2,
        size: Vec2,
        line_width: f32,
        color: Rgba,
    },
    FillText {
        text: String,
        position: Vec2,
        font: String,
        color: Rgba,
    },
    StrokePath {
        path: Vec<PathCommand>,
        line_width: f32,
        color: Rgba,
    },
}

/// Canvas that keeps the calls of the current frame for replay.
///
/// `clear` starts a new frame, so `commands` always holds the last paint.
#[derive(Debug, Default)]
pub struct DisplayList {
    logical: UVec2,
    backing: UVec2,
    commands: Vec<DrawCommand>,
    resizes: usize,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn logical_size(&self) -> UVec2 {
        self.logical
    }

    /// Number of `resize` calls seen so far.
    pub fn resizes(&self) -> usize {
        self.resizes
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::FillText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn paths(&self) -> impl Iterator<Item = (&[PathCommand], Rgba)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::StrokePath { path, color, .. } => Some((path.as_slice(), *color)),
            _ => None,
        })
    }

    /// Replays the recorded frame onto another canvas.
    pub fn replay(&self, target: &mut impl Canvas) {
        for command in &self.commands {
            match command {
                DrawCommand::FillRect { origin, size, color } => {
                    target.fill_rect(*origin, *size, *color)
                }
                DrawCommand::StrokeRect {
                    origin,
                    size,
                    line_width,
                    color,
                } => target.stroke_rect(*origin, *size, *line_width, *color),
                DrawCommand::FillText {
                    text,
                    position,
                    font,
                    color,
                } => target.fill_text(text, *position, font, *color),
                DrawCommand::StrokePath {
                    path,
                    line_width,
                    color,
                } => target.stroke_path(path, *line_width, *color),
            }
        }
    }
}

impl Canvas for DisplayList {
    fn resize(&mut self, logical: UVec2, backing: UVec2) {
        self.logical = logical;
        self.backing = backing;
        self.commands.clear();
        self.resizes += 1;
    }

    fn backing_size(&self) -> UVec2 {
        self.backing
    }

    fn clear(&mut self) {
        self.commands.clear();
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { origin, size, color });
    }

    fn stroke_rect(&mut self, origin: Vec2, size: Vec2, line_width: f32, color: Rgba) {
        self.commands.push(DrawCommand::StrokeRect {
            origin,
            size,
            line_width,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, position: Vec2, font: &str, color: Rgba) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            position,
            font: font.to_string(),
            color,
        });
    }

    fn stroke_path(&mut self, path: &[PathCommand], line_width: f32, color: Rgba) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.to_vec(),
            line_width,
            color,
        });
    }
}
