//! The lagometer widget
//!
//! Owns a [`FrameRecorder`], a canvas and the chart style. A host wires it in
//! two places:
//!
//! - its frame scheduler calls [`FrameHooks::pre_render`] and
//!   [`FrameHooks::post_render`] once per cycle;
//! - its scene graph calls [`Lagometer::render`] once per render pass, passing
//!   the continuation that produces the host's render acknowledgment.

use glam::UVec2;
use lag_metrics::{Clock, FrameRecorder, MetricsSnapshot};

use crate::canvas::Canvas;
use crate::chart::ChartRenderer;
use crate::config::{ConfigError, LagometerConfig};
use crate::throttle::DrawThrottle;

/// Per-cycle notifications a host scheduler delivers.
pub trait FrameHooks {
    fn pre_render(&mut self);
    fn post_render(&mut self);
}

pub struct Lagometer<C, K> {
    config: LagometerConfig,
    recorder: FrameRecorder<C>,
    canvas: K,
    chart: ChartRenderer,
    throttle: DrawThrottle,
    logical_size: UVec2,
    cached_size: Option<(UVec2, UVec2)>,
    redraws: u64,
}

impl<C: Clock, K: Canvas> Lagometer<C, K> {
    pub fn new(config: LagometerConfig, clock: C, canvas: K) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::debug!(
            capacity = config.capacity(),
            draw_frequency = config.draw_frequency,
            "creating lagometer"
        );
        Ok(Self {
            recorder: FrameRecorder::new(config.capacity(), clock),
            chart: ChartRenderer::new(&config),
            throttle: DrawThrottle::new(config.redraw_interval_ms()),
            logical_size: config.logical_size(),
            cached_size: None,
            redraws: 0,
            canvas,
            config,
        })
    }

    /// Repaints if the redraw interval has elapsed, then returns `next()`.
    ///
    /// `next` runs on every call, including throttled ones, so the widget
    /// never breaks the host's render chain.
    pub fn render<R>(&mut self, next: impl FnOnce() -> R) -> R {
        let now = self.recorder.clock().now_ms();
        if self.throttle.ready(now) {
            self.sync_size();
            self.chart.paint(&mut self.canvas, &self.recorder);
            self.throttle.mark(now);
            self.redraws += 1;
        } else {
            tracing::trace!(now, "lagometer redraw throttled");
        }
        next()
    }

    /// Changes the logical size. The surface is resized on the next redraw,
    /// which happens on the next `render` call. Samples are kept.
    pub fn set_size(&mut self, logical: UVec2) {
        self.logical_size = logical;
        self.throttle.invalidate();
    }

    pub fn logical_size(&self) -> UVec2 {
        self.logical_size
    }

    pub fn backing_size(&self) -> UVec2 {
        (self.logical_size.as_vec2() * self.config.pixel_ratio)
            .round()
            .as_uvec2()
    }

    pub fn fps(&self, count: usize) -> Option<f64> {
        self.recorder.fps(count)
    }

    pub fn script_time(&self, count: usize) -> Option<f64> {
        self.recorder.script_time(count)
    }

    pub fn dropped_frame_count(&self) -> i64 {
        self.recorder.dropped_frame_count()
    }

    /// Aggregates over the configured text window.
    pub fn snapshot(&self) -> MetricsSnapshot {
        self.recorder.snapshot(self.config.text_window)
    }

    pub fn reset(&mut self) {
        self.recorder.reset();
        self.throttle.invalidate();
    }

    pub fn recorder(&self) -> &FrameRecorder<C> {
        &self.recorder
    }

    pub fn canvas(&self) -> &K {
        &self.canvas
    }

    pub fn config(&self) -> &LagometerConfig {
        &self.config
    }

    /// Number of repaints actually performed.
    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    fn sync_size(&mut self) {
        let sizes = (self.logical_size, self.backing_size());
        if self.cached_size != Some(sizes) {
            tracing::debug!(
                logical = ?sizes.0,
                backing = ?sizes.1,
                "resizing lagometer surface"
            );
            self.canvas.resize(sizes.0, sizes.1);
            self.cached_size = Some(sizes);
        }
    }
}

impl<C: Clock, K: Canvas> FrameHooks for Lagometer<C, K> {
    fn pre_render(&mut self) {
        self.recorder.pre_render();
    }

    fn post_render(&mut self) {
        self.recorder.post_render();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DisplayList;
    use crate::raster::PixelCanvas;
    use lag_metrics::ManualClock;

    fn build(config: LagometerConfig) -> (Lagometer<ManualClock, DisplayList>, ManualClock) {
        let clock = ManualClock::new(1000.0);
        let widget = Lagometer::new(config, clock.clone(), DisplayList::new()).unwrap();
        (widget, clock)
    }

    /// Runs one frame cycle starting at `start` whose script takes `script_time`.
    fn cycle(widget: &mut impl FrameHooks, clock: &ManualClock, start: f64, script_time: f64) {
        clock.set(start);
        widget.pre_render();
        clock.set(start + script_time);
        widget.post_render();
    }

    #[test]
    fn dropped_frames_start_at_zero() {
        let (widget, _) = build(LagometerConfig::default());
        assert_eq!(widget.dropped_frame_count(), 0);
        assert_eq!(widget.fps(20), None);
    }

    #[test]
    fn sliding_window_scenario() {
        let config = LagometerConfig {
            capacity: Some(4),
            ..Default::default()
        };
        let (mut widget, clock) = build(config);

        let mut t = 1000.0;
        cycle(&mut widget, &clock, t, 5.0);
        for frame_time in [10.0, 20.0, 30.0, 40.0] {
            t += frame_time;
            cycle(&mut widget, &clock, t, 5.0);
        }
        assert_eq!(widget.fps(4), Some(40.0));
        assert_eq!(widget.script_time(4), Some(5.0));

        cycle(&mut widget, &clock, t + 50.0, 5.0);
        let fps = widget.fps(4).unwrap();
        assert!((fps - 28.571_428).abs() < 1e-3);
    }

    #[test]
    fn throttled_render_still_acknowledges() {
        let (mut widget, clock) = build(LagometerConfig::default());

        assert_eq!(widget.render(|| "ack"), "ack");
        clock.advance(100.0);
        assert_eq!(widget.render(|| "ack"), "ack");
        assert_eq!(widget.redraws(), 1);

        clock.advance(400.0);
        widget.render(|| ());
        assert_eq!(widget.redraws(), 2);
    }

    #[test]
    fn first_render_sizes_surface() {
        let (mut widget, _) = build(LagometerConfig::default());
        assert_eq!(widget.canvas().resizes(), 0);
        widget.render(|| ());
        assert_eq!(widget.canvas().resizes(), 1);
        assert_eq!(widget.canvas().backing_size(), UVec2::new(200, 200));
        assert_eq!(widget.canvas().logical_size(), UVec2::new(100, 100));
    }

    #[test]
    fn resize_keeps_samples() {
        let (mut widget, clock) = build(LagometerConfig::default());
        for i in 0..=10 {
            cycle(&mut widget, &clock, 1000.0 + i as f64 * 16.0, 4.0);
        }
        widget.render(|| ());
        let before: Vec<_> = widget.recorder().samples().recent(10).copied().collect();

        widget.set_size(UVec2::new(150, 40));
        widget.render(|| ());

        let after: Vec<_> = widget.recorder().samples().recent(10).copied().collect();
        assert_eq!(before, after);
        assert_eq!(widget.canvas().resizes(), 2);
        assert_eq!(widget.canvas().backing_size(), UVec2::new(300, 80));
        assert_eq!(widget.redraws(), 2);
    }

    #[test]
    fn unchanged_size_does_not_resize() {
        let (mut widget, clock) = build(LagometerConfig::default());
        widget.render(|| ());
        clock.advance(600.0);
        widget.render(|| ());
        assert_eq!(widget.redraws(), 2);
        assert_eq!(widget.canvas().resizes(), 1);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = LagometerConfig {
            min: 40.0,
            max: 10.0,
            ..Default::default()
        };
        let result = Lagometer::new(config, ManualClock::default(), DisplayList::new());
        assert!(matches!(result, Err(ConfigError::EmptyRange { .. })));
    }

    #[test]
    fn reset_forces_redraw_and_clears_metrics() {
        let (mut widget, clock) = build(LagometerConfig::default());
        cycle(&mut widget, &clock, 1000.0, 1.0);
        cycle(&mut widget, &clock, 1016.0, 1.0);
        widget.render(|| ());
        widget.reset();
        assert_eq!(widget.fps(20), None);
        widget.render(|| ());
        assert_eq!(widget.redraws(), 2);
        assert!(widget.canvas().texts().any(|text| text == "-- fps"));
    }

    #[test]
    fn long_stall_paints_without_overflow() {
        let config = LagometerConfig {
            min: 0.0,
            max: 1.0,
            ..Default::default()
        };
        let clock = ManualClock::new(1000.0);
        let canvas = PixelCanvas::new(config.backing_size());
        let mut widget = Lagometer::new(config, clock.clone(), canvas).unwrap();

        let mut t = 1000.0;
        for _ in 0..3 {
            cycle(&mut widget, &clock, t, 1.0);
            t += 16.0;
        }
        // two-hour gap
        t += 7.2e6;
        cycle(&mut widget, &clock, t, 1.0);

        assert_eq!(widget.render(|| "ack"), "ack");
        assert_eq!(widget.redraws(), 1);
        assert!(widget.canvas().labels().iter().any(|label| label.text == "0 fps"));
    }
}
