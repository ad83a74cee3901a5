use bevy_app::App;
use bevy_ecs::entity::Entity;
use bevy_ecs::message::Messages;

use crate::ecs::clock::SimClock;
use crate::ecs::events::CaravanEvent;
use crate::ecs::resources::PlayerHandle;
use crate::ecs::schedule::SimTick;
use crate::ecs::spawn;
use crate::ecs::time::MILLIS_PER_SECOND;
use crate::map::{GridPos, TerrainGrid};
use crate::model::config::GameConfig;
use crate::model::terrain::TerrainType;
use crate::model::wagon::WagonType;

/// Run `n` ticks.
pub fn tick_n(app: &mut App, n: u32) {
    for _ in 0..n {
        app.world_mut().run_schedule(SimTick);
    }
}

/// Run enough ticks to cover `secs` seconds at the clock's step.
pub fn tick_seconds(app: &mut App, secs: u32) {
    let step = u64::from(app.world().resource::<SimClock>().step_ms);
    let ticks = u64::from(secs) * MILLIS_PER_SECOND / step;
    tick_n(app, ticks as u32);
}

/// Install a default config and a uniform map, and spawn the player with one
/// basic cart at grid (10, 10). Skips world generation entirely.
pub fn spawn_test_convoy(app: &mut App, terrain: TerrainType) -> Entity {
    spawn_test_convoy_with(app, GameConfig::default(), terrain)
}

pub fn spawn_test_convoy_with(app: &mut App, config: GameConfig, terrain: TerrainType) -> Entity {
    let grid = TerrainGrid::uniform(&config, terrain);
    let start = GridPos::new(10, 10);
    let position = grid.grid_to_world(start);

    let world = app.world_mut();
    let player = spawn::spawn_player(world, &config, start, position, terrain);
    spawn::spawn_wagon(world, player, WagonType::BasicCart);
    world.insert_resource(grid);
    world.insert_resource(config);
    world.insert_resource(PlayerHandle(player));
    player
}

/// Every `CaravanEvent` still buffered: this tick's and the previous tick's.
pub fn recent_events(app: &App) -> Vec<CaravanEvent> {
    let messages = app.world().resource::<Messages<CaravanEvent>>();
    let mut cursor = messages.get_cursor();
    cursor.read(messages).cloned().collect()
}
