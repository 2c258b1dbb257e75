//! Lag Metrics - Frame sampling for render loops
//!
//! Measures frame time and script time from two hooks a host render loop
//! fires every cycle, keeps a bounded newest-first history and derives
//! rolling aggregates from it.
//!
//! # Usage
//!
//! ```ignore
//! use lag_metrics::{FrameRecorder, MonotonicClock};
//!
//! let mut recorder = FrameRecorder::new(200, MonotonicClock::new());
//! loop {
//!     recorder.pre_render();
//!     // ... update the scene ...
//!     recorder.post_render();
//!     if let Some(fps) = recorder.fps(20) {
//!         println!("FPS: {:.1}", fps);
//!     }
//! }
//! ```
//!
//! Everything here is single-threaded and owned by one recorder instance.

mod aggregate;
mod clock;
mod recorder;
mod ring_buffer;
mod sample;

pub use aggregate::{MetricsSnapshot, TARGET_FRAME_INTERVAL_MS};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use recorder::FrameRecorder;
pub use ring_buffer::{Recent, RingBuffer};
pub use sample::{Extrema, Sample};
