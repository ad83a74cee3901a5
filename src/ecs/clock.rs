use bevy_ecs::resource::Resource;
use bevy_ecs::system::ResMut;

use super::time::{DEFAULT_STEP_MS, MILLIS_PER_SECOND, SimTime};

/// Simulation clock resource tracking elapsed time and tick count.
///
/// Advances by a fixed `step_ms` per tick. The `advance_clock` system moves the
/// clock forward at the end of each tick (in `SimPhase::Last`), so systems see
/// the time at the start of the tick they run in.
#[derive(Resource, Debug, Clone)]
pub struct SimClock {
    pub time: SimTime,
    pub step_ms: u32,
    pub tick_count: u64,
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_MS)
    }
}

impl SimClock {
    pub fn new(step_ms: u32) -> Self {
        Self {
            time: SimTime::ZERO,
            step_ms: step_ms.max(1),
            tick_count: 0,
        }
    }

    /// Seconds covered by one tick.
    pub fn dt(&self) -> f32 {
        self.step_ms as f32 / MILLIS_PER_SECOND as f32
    }

    /// Advance the clock by one step.
    pub fn advance(&mut self) {
        self.time = self.time.advanced_by(self.step_ms);
        self.tick_count += 1;
    }
}

/// Bevy system that advances the simulation clock by one step.
/// Registered in `SimPhase::Last` so all other systems see the current
/// time before it advances.
pub fn advance_clock(mut clock: ResMut<SimClock>) {
    clock.advance();
}
