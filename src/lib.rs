pub mod ecs;
pub mod flush;
pub mod map;
pub mod model;

pub use ecs::{CaravanPlugin, SimTick, build_sim_app, install_game_config};
pub use model::GameConfig;
