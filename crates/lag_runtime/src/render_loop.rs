//! Simulated host render loop
//!
//! Stands in for a real scheduler: fires the frame hooks around a synthetic
//! workload, runs a render pass and paces cycles to a target interval.

use std::thread;
use std::time::{Duration, Instant};

use lag_render::FrameHooks;

/// Acknowledgment a render pass hands back to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderAck {
    pub frame: u64,
}

/// Synthetic per-frame script cost.
#[derive(Debug, Clone, Copy)]
pub struct Workload {
    pub base: Duration,
    pub jitter: Duration,
    /// Every `spike_every` frames the script overruns by `spike`.
    pub spike_every: u64,
    pub spike: Duration,
}

impl Workload {
    pub fn cost(&self, frame: u64) -> Duration {
        let phase = (frame % 10) as u32;
        let mut cost = self.base + self.jitter * phase / 10;
        if self.spike_every > 0 && frame % self.spike_every == self.spike_every - 1 {
            cost += self.spike;
        }
        cost
    }
}

impl Default for Workload {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(2),
            jitter: Duration::from_millis(4),
            spike_every: 45,
            spike: Duration::from_millis(30),
        }
    }
}

pub struct RenderLoop {
    frame_interval: Duration,
    workload: Workload,
    frame: u64,
}

impl RenderLoop {
    pub fn new(frame_interval: Duration, workload: Workload) -> Self {
        Self {
            frame_interval,
            workload,
            frame: 0,
        }
    }

    /// Runs one cycle. `render` is the scene's render pass.
    pub fn step<H, F>(&mut self, hooks: &mut H, render: F) -> RenderAck
    where
        H: FrameHooks,
        F: FnOnce(&mut H, RenderAck) -> RenderAck,
    {
        let started = Instant::now();
        let frame = self.frame;
        self.frame += 1;

        hooks.pre_render();
        thread::sleep(self.workload.cost(frame));
        hooks.post_render();

        let ack = render(hooks, RenderAck { frame });

        if let Some(rest) = self.frame_interval.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
        ack
    }

    pub fn frames(&self) -> u64 {
        self.frame
    }
}
