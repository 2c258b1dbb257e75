//! Redraw rate limiting

/// Allows one redraw per `interval_ms`, measured from the last completed draw.
#[derive(Debug, Clone, Copy)]
pub struct DrawThrottle {
    interval_ms: f64,
    last_draw: Option<f64>,
}

impl DrawThrottle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_draw: None,
        }
    }

    pub fn ready(&self, now: f64) -> bool {
        self.last_draw
            .map_or(true, |last| now - last >= self.interval_ms)
    }

    pub fn mark(&mut self, now: f64) {
        self.last_draw = Some(now);
    }

    /// Makes the next `ready` call succeed regardless of time.
    pub fn invalidate(&mut self) {
        self.last_draw = None;
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_draw_is_always_ready() {
        let throttle = DrawThrottle::new(500.0);
        assert!(throttle.ready(0.0));
    }

    #[test]
    fn waits_for_interval() {
        let mut throttle = DrawThrottle::new(500.0);
        throttle.mark(1000.0);
        assert!(!throttle.ready(1100.0));
        assert!(!throttle.ready(1499.9));
        assert!(throttle.ready(1500.0));

        throttle.invalidate();
        assert!(throttle.ready(1001.0));
    }
}
