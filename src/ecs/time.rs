use std::fmt;

use serde::{Deserialize, Serialize};

pub const MILLIS_PER_SECOND: u64 = 1_000;

/// Default fixed step: ten ticks per simulated second.
pub const DEFAULT_STEP_MS: u32 = 100;

// Cycle lengths used by the interval run conditions.
pub const TRAVEL_EVENT_INTERVAL_MS: u64 = 5 * MILLIS_PER_SECOND;
pub const PERIODIC_EVENT_INTERVAL_MS: u64 = 15 * MILLIS_PER_SECOND;
pub const MARKET_INTERVAL_MS: u64 = 30 * MILLIS_PER_SECOND;

/// Simulation time as total elapsed milliseconds since the start.
///
/// Integer milliseconds keep interval arithmetic exact; systems that need a
/// float `dt` read it from `SimClock::dt()`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimTime(u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub fn from_secs(secs: u64) -> Self {
        Self(secs * MILLIS_PER_SECOND)
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    pub fn as_secs_f32(self) -> f32 {
        self.0 as f32 / MILLIS_PER_SECOND as f32
    }

    pub fn advanced_by(self, millis: u32) -> Self {
        Self(self.0 + u64::from(millis))
    }

    /// True when the window `[self, self + step)` is followed by a positive
    /// multiple of `interval`, i.e. the step ending at `self + step` crosses it.
    pub fn crosses(self, step_ms: u32, interval_ms: u64) -> bool {
        if interval_ms == 0 {
            return false;
        }
        let end = self.0 + u64::from(step_ms);
        end / interval_ms > self.0 / interval_ms
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0 / MILLIS_PER_SECOND;
        let millis = self.0 % MILLIS_PER_SECOND;
        write!(f, "{}:{:02}.{:03}", secs / 60, secs % 60, millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        let t = SimTime::from_secs(90);
        assert_eq!(t.as_millis(), 90_000);
        assert_eq!(t.as_secs_f32(), 90.0);
        assert_eq!(t.advanced_by(250).as_millis(), 90_250);
    }

    #[test]
    fn crosses_only_on_boundary_step() {
        let step = 100;
        assert!(!SimTime::ZERO.crosses(step, 5_000));
        assert!(!SimTime::from_millis(4_800).crosses(step, 5_000));
        assert!(SimTime::from_millis(4_900).crosses(step, 5_000));
        assert!(!SimTime::from_millis(5_000).crosses(step, 5_000));
        assert!(SimTime::from_millis(9_900).crosses(step, 5_000));
    }

    #[test]
    fn large_step_crossing() {
        assert!(SimTime::from_millis(29_000).crosses(2_000, 30_000));
        assert!(!SimTime::from_millis(0).crosses(2_000, 30_000));
    }

    #[test]
    fn zero_interval_never_fires() {
        assert!(!SimTime::from_secs(10).crosses(100, 0));
    }

    #[test]
    fn display_minutes_seconds() {
        assert_eq!(SimTime::from_millis(61_005).to_string(), "1:01.005");
        assert_eq!(SimTime::ZERO.to_string(), "0:00.000");
    }
}
