use bevy_ecs::system::Res;

use super::clock::SimClock;
use super::resources::PlayerHandle;
use super::time::{
    MARKET_INTERVAL_MS, PERIODIC_EVENT_INTERVAL_MS, SimTime, TRAVEL_EVENT_INTERVAL_MS,
};
use crate::model::config::GameConfig;

// Internal check functions for testability.

fn interval_check(time: SimTime, step_ms: u32, interval_ms: u64) -> bool {
    time.crosses(step_ms, interval_ms)
}

fn world_ready_check(has_config: bool, has_player: bool) -> bool {
    has_config && has_player
}

fn needs_initialization_check(has_config: bool, has_player: bool) -> bool {
    has_config && !has_player
}

// Bevy run condition functions (for use with `.run_if()`).

pub fn every_five_seconds(clock: Res<SimClock>) -> bool {
    interval_check(clock.time, clock.step_ms, TRAVEL_EVENT_INTERVAL_MS)
}

pub fn every_fifteen_seconds(clock: Res<SimClock>) -> bool {
    interval_check(clock.time, clock.step_ms, PERIODIC_EVENT_INTERVAL_MS)
}

pub fn every_thirty_seconds(clock: Res<SimClock>) -> bool {
    interval_check(clock.time, clock.step_ms, MARKET_INTERVAL_MS)
}

/// Config is loaded and the player exists. Gates every domain system.
pub fn world_ready(config: Option<Res<GameConfig>>, player: Option<Res<PlayerHandle>>) -> bool {
    world_ready_check(config.is_some(), player.is_some())
}

/// Config is loaded but the world has not been built yet.
pub fn needs_initialization(
    config: Option<Res<GameConfig>>,
    player: Option<Res<PlayerHandle>>,
) -> bool {
    needs_initialization_check(config.is_some(), player.is_some())
}
