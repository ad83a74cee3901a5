#![allow(dead_code)]

use bevy_app::App;
use bevy_ecs::entity::Entity;
use caravan_sim::ecs::{
    CaravanEvent, CaravanPlugin, PlayerHandle, SimClock, SimTick, build_sim_app_deterministic,
    install_game_config,
};
use caravan_sim::model::GameConfig;

/// A fully initialised caravan world, one tick in.
pub fn caravan_app(seed: u64) -> App {
    caravan_app_with(seed, GameConfig::default())
}

pub fn caravan_app_with(seed: u64, config: GameConfig) -> App {
    let mut app = build_sim_app_deterministic(seed);
    app.add_plugins(CaravanPlugin);
    assert!(install_game_config(&mut app, config));
    tick(&mut app);
    app
}

/// Periodic events off. Terrain hazards still roll while the convoy travels,
/// so travel scenarios assert bounds rather than exact values.
pub fn quiet_config() -> GameConfig {
    GameConfig {
        event_chance: 0.0,
        ..GameConfig::default()
    }
}

pub fn tick(app: &mut App) {
    app.world_mut().run_schedule(SimTick);
}

pub fn tick_n(app: &mut App, n: u32) {
    for _ in 0..n {
        tick(app);
    }
}

pub fn tick_seconds(app: &mut App, secs: u32) {
    let step = app.world().resource::<SimClock>().step_ms;
    tick_n(app, secs * 1000 / step);
}

pub fn player(app: &App) -> Entity {
    app.world().resource::<PlayerHandle>().0
}

/// Every `CaravanEvent` still buffered from the last two ticks.
pub fn recent_events(app: &App) -> Vec<CaravanEvent> {
    let messages = app
        .world()
        .resource::<bevy_ecs::message::Messages<CaravanEvent>>();
    let mut cursor = messages.get_cursor();
    cursor.read(messages).cloned().collect()
}

pub fn read_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}
