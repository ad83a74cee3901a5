#[macro_use]
mod macros;

pub mod city;
pub mod combat;
pub mod config;
pub mod event;
pub mod goods;
pub mod progress;
pub mod terrain;
pub mod wagon;

pub use city::{CITIES, CITY_TRADE_RADIUS, CitySpec, EconomyType};
pub use combat::{CombatInput, CombatOutcome, CombatResult, resolve_combat};
pub use config::{ConfigError, GameConfig, MapConfig};
pub use event::{EventType, ImmediateEffect};
pub use goods::{GOODS, GoodCategory, GoodSpec, find_good};
pub use progress::Achievement;
pub use terrain::{TerrainCoefficients, TerrainType, travel_risk};
pub use wagon::{WagonSpec, WagonType, repair_cost};
