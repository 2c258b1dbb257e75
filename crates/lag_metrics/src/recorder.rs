//! Frame sample recording
//!
//! [`FrameRecorder`] is driven by a host render loop through two hooks per
//! frame cycle:
//!
//! - `pre_render` fires before the host hands the frame to rendering. The gap
//!   between two consecutive pre-render calls is the frame time.
//! - `post_render` fires after the application work of that cycle. The gap
//!   since the matching pre-render call is the script time.
//!
//! Calls must alternate strictly (pre, post, pre, post...). The recorder does
//! not check the pairing; unpaired calls produce meaningless samples.

use crate::clock::Clock;
use crate::ring_buffer::RingBuffer;
use crate::sample::{Extrema, Sample};

pub struct FrameRecorder<C> {
    clock: C,
    samples: RingBuffer<Sample>,
    first_frame_time: Option<f64>,
    last_time: Option<f64>,
    frame_time: Option<f64>,
    frame_count: u64,
    frame_extrema: Extrema,
    script_extrema: Extrema,
}

impl<C: Clock> FrameRecorder<C> {
    pub fn new(capacity: usize, clock: C) -> Self {
        Self {
            clock,
            samples: RingBuffer::new(capacity),
            first_frame_time: None,
            last_time: None,
            frame_time: None,
            frame_count: 0,
            frame_extrema: Extrema::default(),
            script_extrema: Extrema::default(),
        }
    }

    pub fn pre_render(&mut self) {
        let now = self.clock.now_ms();
        self.pre_render_at(now);
    }

    pub fn post_render(&mut self) {
        let now = self.clock.now_ms();
        self.post_render_at(now);
    }

    /// Pre-render hook with a host-supplied timestamp in milliseconds.
    pub fn pre_render_at(&mut self, now: f64) {
        if self.first_frame_time.is_none() {
            self.first_frame_time = Some(now);
            self.frame_count = 0;
        } else {
            self.frame_count += 1;
            if let Some(last) = self.last_time {
                let frame_time = now - last;
                self.frame_extrema.observe(frame_time);
                self.frame_time = Some(frame_time);
            }
        }
        self.last_time = Some(now);
    }

    /// Post-render hook with a host-supplied timestamp in milliseconds.
    ///
    /// No-op until a frame time exists, i.e. during the very first cycle.
    pub fn post_render_at(&mut self, now: f64) {
        let (Some(frame_time), Some(last)) = (self.frame_time, self.last_time) else {
            return;
        };

        let script_time = now - last;
        self.script_extrema.observe(script_time);
        self.samples.push(Sample {
            captured_at: last,
            frame_time,
            script_time,
        });
    }

    /// Drops all samples, counters and extrema.
    pub fn reset(&mut self) {
        tracing::debug!(
            samples = self.samples.len(),
            frames = self.frame_count,
            "resetting frame recorder"
        );
        self.samples.clear();
        self.first_frame_time = None;
        self.last_time = None;
        self.frame_time = None;
        self.frame_count = 0;
        self.frame_extrema.reset();
        self.script_extrema.reset();
    }

    pub fn samples(&self) -> &RingBuffer<Sample> {
        &self.samples
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Cycles observed since the first pre-render timestamp.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn first_frame_time(&self) -> Option<f64> {
        self.first_frame_time
    }

    pub fn last_time(&self) -> Option<f64> {
        self.last_time
    }

    pub fn frame_time_extrema(&self) -> Extrema {
        self.frame_extrema
    }

    pub fn script_time_extrema(&self) -> Extrema {
        self.script_extrema
    }
}
