pub mod event_log;
pub mod sim_resources;

pub use event_log::{EventLog, LogEntry};
pub use sim_resources::{
    CombatRng, EconomyRng, EventsRng, GoodsCatalog, InventoryRng, MovementRng, PlayerHandle,
    SimRng, distribute_rng,
};
