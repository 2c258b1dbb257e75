//! Per-frame samples and running extrema

use serde::Serialize;

/// One completed frame cycle. All values are milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    /// Pre-render timestamp the frame time was measured against.
    pub captured_at: f64,
    /// Time between this cycle's pre-render hook and the previous one.
    pub frame_time: f64,
    /// Time between this cycle's pre-render and post-render hooks.
    pub script_time: f64,
}

/// Running min/max over every value observed since the last reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Extrema {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Extrema {
    pub fn observe(&mut self, value: f64) {
        self.min = Some(self.min.map_or(value, |min| min.min(value)));
        self.max = Some(self.max.map_or(value, |max| max.max(value)));
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extrema_track_range() {
        let mut extrema = Extrema::default();
        assert_eq!(extrema.min, None);
        extrema.observe(12.0);
        extrema.observe(4.0);
        extrema.observe(30.0);
        assert_eq!(extrema.min, Some(4.0));
        assert_eq!(extrema.max, Some(30.0));
        extrema.reset();
        assert_eq!(extrema, Extrema::default());
    }
}
