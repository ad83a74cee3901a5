pub mod app;
pub mod clock;
pub mod commands;
pub mod components;
pub mod conditions;
pub mod events;
pub mod plugin;
pub mod resources;
pub mod schedule;
pub mod spawn;
pub mod systems;
#[cfg(test)]
pub mod test_helpers;
pub mod time;

pub use app::{build_sim_app, build_sim_app_deterministic, install_game_config};
pub use clock::SimClock;
pub use commands::{
    CombatEncounter, RecruitmentAction, TradeTransaction, TravelCommand, WagonPurchase,
    WagonRepair, submit,
};
pub use components::{
    City, CityMarket, ConvoyResources, GameEvent, GoodData, Inventory, IsPlayer, MapPosition,
    PlayerConvoy, PlayerProgress, PriceList, TravelState, Wagon,
};
pub use conditions::world_ready;
pub use events::{CaravanEvent, CommandKind, RejectReason};
pub use plugin::CaravanPlugin;
pub use resources::{EventLog, GoodsCatalog, LogEntry, PlayerHandle, SimRng};
pub use schedule::{CommandSet, DomainSet, SimPhase, SimTick, configure_sim_schedule};
pub use time::SimTime;
