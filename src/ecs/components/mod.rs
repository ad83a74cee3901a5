pub mod common;
pub mod convoy;
pub mod event;
pub mod market;
pub mod progress;
pub mod wagon;

pub use common::{CityMarker, GoodMarker, IsPlayer, MarketMarker, WagonMarker};
pub use convoy::{
    BASE_CONVOY_CAPACITY, ConvoyResources, GUARD_FLOOR, Inventory, InventoryItem, MORALE_MAX,
    MORALE_MIN, MapPosition, PlayerConvoy, TravelState,
};
pub use event::{GameEvent, RoadBlockDelay};
pub use market::{
    City, CityMarket, GoodData, MarketPrice, PriceList, SUPPLY_DEMAND_MAX, SUPPLY_DEMAND_MIN,
    market_price,
};
pub use progress::PlayerProgress;
pub use wagon::Wagon;
