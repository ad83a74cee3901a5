use bevy_app::App;
use bevy_ecs::message::{MessageRegistry, Messages};
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::clock::SimClock;
use super::commands::{
    CombatEncounter, RecruitmentAction, TradeTransaction, TravelCommand, WagonPurchase,
    WagonRepair,
};
use super::conditions::needs_initialization;
use super::events::CaravanEvent;
use super::resources::{
    CombatRng, EconomyRng, EventLog, EventsRng, GoodsCatalog, InventoryRng, MovementRng, SimRng,
    distribute_rng,
};
use super::schedule::{SimPhase, configure_sim_schedule};
use super::systems::initialization::initialize_world;
use crate::model::config::GameConfig;

/// Build a headless Bevy app with simulation clock, core resources,
/// command queues, and the world initialiser.
///
/// The app starts without a `GameConfig`; nothing beyond the clock runs
/// until one is installed. Add `CaravanPlugin` for the domain systems.
///
/// Manual tick control:
/// ```no_run
/// # use caravan_sim::ecs::{build_sim_app, install_game_config, CaravanPlugin, SimTick};
/// # use caravan_sim::model::GameConfig;
/// let mut app = build_sim_app(7);
/// app.add_plugins(CaravanPlugin);
/// install_game_config(&mut app, GameConfig::default());
/// for _ in 0..600 {  // one minute of 100 ms ticks
///     app.world_mut().run_schedule(SimTick);
/// }
/// ```
pub fn build_sim_app(seed: u64) -> App {
    build_sim_app_seeded(seed)
}

/// Build a headless Bevy app with a specific RNG seed and multi-threaded executor.
pub fn build_sim_app_seeded(seed: u64) -> App {
    build_sim_app_with_executor(seed, ExecutorKind::MultiThreaded)
}

/// Build a headless Bevy app with single-threaded executor for reproducible determinism.
///
/// Use this when exact RNG consumption order across ticks must be identical across runs.
pub fn build_sim_app_deterministic(seed: u64) -> App {
    build_sim_app_with_executor(seed, ExecutorKind::SingleThreaded)
}

/// Build a headless Bevy app with a specific executor kind.
pub fn build_sim_app_with_executor(seed: u64, executor: ExecutorKind) -> App {
    let mut app = App::empty();

    // Core resources
    app.insert_resource(SimClock::default());
    app.insert_resource(EventLog::new());
    app.insert_resource(GoodsCatalog::default());
    app.insert_resource(SimRng {
        rng: SmallRng::seed_from_u64(seed),
        seed,
    });

    // Per-domain RNG resources (reseeded each tick by distribute_rng)
    app.init_resource::<MovementRng>();
    app.init_resource::<EconomyRng>();
    app.init_resource::<InventoryRng>();
    app.init_resource::<EventsRng>();
    app.init_resource::<CombatRng>();

    // Command queues. Not registered with the MessageRegistry, so they are
    // never rotated and only empty when their consumer drains them.
    app.init_resource::<Messages<TravelCommand>>();
    app.init_resource::<Messages<TradeTransaction>>();
    app.init_resource::<Messages<WagonRepair>>();
    app.init_resource::<Messages<WagonPurchase>>();
    app.init_resource::<Messages<RecruitmentAction>>();
    app.init_resource::<Messages<CombatEncounter>>();

    // Outbound notifications rotate every tick
    MessageRegistry::register_message::<CaravanEvent>(app.world_mut());

    let mut schedule = configure_sim_schedule(executor);
    schedule.add_systems(
        (
            bevy_ecs::message::message_update_system,
            distribute_rng,
            initialize_world.run_if(needs_initialization),
        )
            .chain()
            .in_set(SimPhase::PreUpdate),
    );
    app.add_schedule(schedule);
    app
}

/// Validate and install the game configuration. The world is built on the
/// next tick. Installing a second config after initialisation has no effect
/// on the already-built world.
pub fn install_game_config(app: &mut App, config: GameConfig) -> bool {
    if let Err(err) = config.validate() {
        tracing::warn!(error = %err, "rejected game config");
        return false;
    }
    if app.world().contains_resource::<GameConfig>() {
        tracing::warn!("game config already installed");
        return false;
    }
    app.insert_resource(config);
    true
}
