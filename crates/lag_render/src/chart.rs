//! Strip chart painting
//!
//! The newest sample sits on the right edge and older samples step one backing
//! pixel to the left each, so the chart scrolls left as the buffer fills.

use glam::Vec2;
use lag_metrics::{Clock, FrameRecorder, RingBuffer, Sample};

use crate::canvas::{Canvas, PathCommand};
use crate::color::Rgba;
use crate::config::LagometerConfig;

const TEXT_MARGIN: f32 = 8.0;
const LINE_WIDTH: f32 = 1.0;

/// Builds the polyline for one series, newest sample first.
///
/// Sample `i` (0 = newest) lands at `x = width - i`; `min` maps to the bottom
/// edge and `max` to the top. Values outside the range are not clamped.
pub fn series_path(
    samples: &RingBuffer<Sample>,
    value: impl Fn(&Sample) -> f64,
    size: Vec2,
    min: f64,
    max: f64,
) -> Vec<PathCommand> {
    let height = size.y as f64;
    let y_scale = height / (max - min);
    samples
        .recent(samples.len())
        .enumerate()
        .map(|(i, sample)| {
            let x = size.x - i as f32;
            let y = (height - (value(sample) - min) * y_scale) as f32;
            let point = Vec2::new(x, y);
            if i == 0 {
                PathCommand::MoveTo(point)
            } else {
                PathCommand::LineTo(point)
            }
        })
        .collect()
}

/// Paints background, readouts and both series for a recorder.
pub struct ChartRenderer {
    min: f64,
    max: f64,
    background_color: Rgba,
    border_color: Rgba,
    text_color: Rgba,
    frame_color: Rgba,
    script_color: Rgba,
    font: String,
    line_height: f32,
    text_window: usize,
}

impl ChartRenderer {
    pub fn new(config: &LagometerConfig) -> Self {
        Self {
            min: config.min,
            max: config.max,
            background_color: config.background_color,
            border_color: config.border_color,
            text_color: config.text_color,
            frame_color: config.frame_color,
            script_color: config.script_color,
            font: config.font.clone(),
            line_height: config.font_px(),
            text_window: config.text_window,
        }
    }

    pub fn paint<C: Clock>(&self, canvas: &mut impl Canvas, recorder: &FrameRecorder<C>) {
        let size = canvas.backing_size().as_vec2();

        canvas.clear();
        canvas.fill_rect(Vec2::ZERO, size, self.background_color);
        canvas.stroke_rect(Vec2::ZERO, size, LINE_WIDTH, self.border_color);

        for (line, text) in self.readouts(recorder).iter().enumerate() {
            let baseline = self.line_height * (line as f32 + 1.0) - 2.0;
            canvas.fill_text(text, Vec2::new(TEXT_MARGIN, baseline), &self.font, self.text_color);
        }

        let samples = recorder.samples();
        if samples.is_empty() {
            return;
        }
        let frames = series_path(samples, |s| s.frame_time, size, self.min, self.max);
        canvas.stroke_path(&frames, LINE_WIDTH, self.frame_color);
        let scripts = series_path(samples, |s| s.script_time, size, self.min, self.max);
        canvas.stroke_path(&scripts, LINE_WIDTH, self.script_color);
    }

    /// Text lines shown in the top-left corner.
    pub fn readouts<C: Clock>(&self, recorder: &FrameRecorder<C>) -> [String; 3] {
        let fps = match recorder.fps(self.text_window) {
            Some(fps) => format!("{} fps", fps.round() as i64),
            None => "-- fps".to_string(),
        };
        let script = match recorder.script_time(self.text_window) {
            Some(ms) => format!("{:.1} ms", ms),
            None => "-- ms".to_string(),
        };
        let dropped = format!("{} dropped", recorder.dropped_frame_count().max(0));
        [fps, script, dropped]
    }
}
