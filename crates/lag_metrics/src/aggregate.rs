//! Rolling aggregates over recorded samples
//!
//! Window queries return `None` for an empty window instead of dividing by
//! zero. Callers decide how to present "no data yet".

use serde::Serialize;

use crate::clock::Clock;
use crate::recorder::FrameRecorder;
use crate::sample::{Extrema, Sample};

/// Expected frame interval used for the dropped-frame estimate.
///
/// This is a fixed 60 Hz assumption, not a detected refresh rate.
pub const TARGET_FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

impl<C: Clock> FrameRecorder<C> {
    /// Frames per second over the newest `count` samples.
    ///
    /// Computed as the inverse of the mean frame time in the window, so a
    /// single long frame pulls the value down proportionally. `None` when the
    /// mean frame time is not positive, e.g. every hook fired at one instant.
    pub fn fps(&self, count: usize) -> Option<f64> {
        self.frame_time(count)
            .filter(|mean| *mean > 0.0)
            .map(|mean| 1000.0 / mean)
    }

    /// Mean frame time in milliseconds over the newest `count` samples.
    pub fn frame_time(&self, count: usize) -> Option<f64> {
        self.window_mean(count, |sample| sample.frame_time)
    }

    /// Mean script time in milliseconds over the newest `count` samples.
    pub fn script_time(&self, count: usize) -> Option<f64> {
        self.window_mean(count, |sample| sample.script_time)
    }

    /// Frames missed against a 60 Hz cadence since the first cycle.
    ///
    /// Zero until at least two cycles were observed. The raw estimate can go
    /// negative when the host runs faster than 60 Hz.
    pub fn dropped_frame_count(&self) -> i64 {
        if self.frame_count() <= 1 {
            return 0;
        }
        let (Some(first), Some(last)) = (self.first_frame_time(), self.last_time()) else {
            return 0;
        };
        let expected = ((last - first) / TARGET_FRAME_INTERVAL_MS).floor() as i64;
        expected - self.frame_count() as i64
    }

    pub fn snapshot(&self, window: usize) -> MetricsSnapshot {
        MetricsSnapshot {
            fps: self.fps(window),
            frame_time_ms: self.frame_time(window),
            script_time_ms: self.script_time(window),
            dropped_frames: self.dropped_frame_count(),
            frame_count: self.frame_count(),
            samples: self.samples().len(),
            frame_time_range: self.frame_time_extrema(),
            script_time_range: self.script_time_extrema(),
        }
    }

    fn window_mean(&self, count: usize, value: impl Fn(&Sample) -> f64) -> Option<f64> {
        let window = self.samples().recent(count);
        let len = window.len();
        if len == 0 {
            return None;
        }
        let sum: f64 = window.map(value).sum();
        Some(sum / len as f64)
    }
}

/// Point-in-time view of the aggregates, suitable for logging or export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub fps: Option<f64>,
    pub frame_time_ms: Option<f64>,
    pub script_time_ms: Option<f64>,
    pub dropped_frames: i64,
    pub frame_count: u64,
    pub samples: usize,
    pub frame_time_range: Extrema,
    pub script_time_range: Extrema,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    /// Feeds cycles with the given frame times, each followed by 5ms of script.
    fn feed(recorder: &mut FrameRecorder<ManualClock>, start: f64, frame_times: &[f64]) -> f64 {
        let mut t = start;
        for frame_time in frame_times {
            t += frame_time;
            recorder.pre_render_at(t);
            recorder.post_render_at(t + 5.0);
        }
        t
    }

    fn primed(capacity: usize) -> FrameRecorder<ManualClock> {
        let mut recorder = FrameRecorder::new(capacity, ManualClock::default());
        recorder.pre_render_at(0.0);
        recorder.post_render_at(5.0);
        recorder
    }

    #[test]
    fn fps_over_partial_and_wrapped_buffer() {
        let mut recorder = primed(4);
        let t = feed(&mut recorder, 0.0, &[10.0, 20.0, 30.0, 40.0]);
        assert_eq!(recorder.fps(4), Some(40.0));

        feed(&mut recorder, t, &[50.0]);
        let fps = recorder.fps(4).unwrap();
        assert!((fps - 1000.0 / 35.0).abs() < 1e-9, "fps was {fps}");
        let frames: Vec<f64> = recorder.samples().recent(4).map(|s| s.frame_time).collect();
        assert_eq!(frames, vec![50.0, 40.0, 30.0, 20.0]);
    }

    #[test]
    fn fps_matches_mean_for_any_window_within_capacity() {
        let frame_times = [12.0, 18.0, 16.0, 33.0, 7.0, 16.5];
        for capacity in 1..=8 {
            let mut recorder = primed(capacity);
            feed(&mut recorder, 0.0, &frame_times);
            let held = capacity.min(frame_times.len());
            let newest = &frame_times[frame_times.len() - held..];
            let mean = newest.iter().sum::<f64>() / held as f64;
            let fps = recorder.fps(held).unwrap();
            assert!((fps - 1000.0 / mean).abs() < 1e-9);
        }
    }

    #[test]
    fn window_is_clamped_to_occupancy() {
        let mut recorder = primed(16);
        feed(&mut recorder, 0.0, &[20.0, 30.0]);
        assert_eq!(recorder.fps(20), Some(40.0));
        assert_eq!(recorder.script_time(20), Some(5.0));
        assert_eq!(recorder.frame_time(1), Some(30.0));
    }

    #[test]
    fn empty_window_has_no_value() {
        let recorder = primed(4);
        assert_eq!(recorder.fps(20), None);
        assert_eq!(recorder.script_time(20), None);

        let mut recorder = primed(4);
        feed(&mut recorder, 0.0, &[16.0]);
        assert_eq!(recorder.fps(0), None);
    }

    #[test]
    fn dropped_frames_need_two_cycles() {
        let mut recorder = FrameRecorder::new(4, ManualClock::default());
        assert_eq!(recorder.dropped_frame_count(), 0);
        recorder.pre_render_at(0.0);
        assert_eq!(recorder.dropped_frame_count(), 0);
        recorder.pre_render_at(500.0);
        assert_eq!(recorder.dropped_frame_count(), 0);
    }

    #[test]
    fn dropped_frames_against_sixty_hertz() {
        let mut recorder = FrameRecorder::new(4, ManualClock::default());
        for t in [0.0, 16.0, 32.0, 110.0] {
            recorder.pre_render_at(t);
        }
        // floor(110 / 16.67) = 6 expected, 3 observed
        assert_eq!(recorder.dropped_frame_count(), 3);
    }

    #[test]
    fn dropped_frames_go_negative_above_sixty_hertz() {
        let mut recorder = FrameRecorder::new(4, ManualClock::default());
        for i in 0..=10 {
            recorder.pre_render_at(i as f64 * 4.0);
        }
        // floor(40 / 16.67) = 2 expected, 10 observed
        assert_eq!(recorder.dropped_frame_count(), -8);
    }

    #[test]
    fn snapshot_serializes() {
        let mut recorder = primed(4);
        feed(&mut recorder, 0.0, &[25.0]);
        let snapshot = recorder.snapshot(20);
        assert_eq!(snapshot.fps, Some(40.0));
        assert_eq!(snapshot.samples, 1);

        let json = serde_json::to_value(snapshot).unwrap();
        assert_eq!(json["fps"], 40.0);
        assert_eq!(json["script_time_ms"], 5.0);
        assert_eq!(json["frame_time_range"]["max"], 25.0);
    }

    #[test]
    fn zero_frame_times_have_no_fps() {
        let mut recorder = primed(4);
        feed(&mut recorder, 0.0, &[0.0, 0.0]);
        assert_eq!(recorder.frame_time(4), Some(0.0));
        assert_eq!(recorder.fps(4), None);
        assert_eq!(recorder.snapshot(4).fps, None);
    }
}
