use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;

use crate::map::{GridPos, WorldPos};
use crate::model::city::EconomyType;
use crate::model::goods::{GoodCategory, GoodSpec};

pub const SUPPLY_DEMAND_MIN: f32 = 0.5;
pub const SUPPLY_DEMAND_MAX: f32 = 2.0;
const MIN_SUPPLY_DIVISOR: f32 = 0.1;

/// Catalog entry for a good. Immutable once spawned.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct GoodData {
    pub name: String,
    pub weight: u32,
    pub base_value: u32,
    pub category: GoodCategory,
    pub profit_per_km: f32,
    pub decay_rate: f32,
}

impl GoodData {
    pub fn value_density(&self) -> f32 {
        self.base_value as f32 / self.weight.max(1) as f32
    }
}

impl From<&GoodSpec> for GoodData {
    fn from(spec: &GoodSpec) -> Self {
        Self {
            name: spec.name.to_string(),
            weight: spec.weight,
            base_value: spec.base_value,
            category: spec.category,
            profit_per_km: spec.profit_per_km(),
            decay_rate: spec.decay_rate,
        }
    }
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct City {
    pub name: String,
    pub grid: GridPos,
    pub world: WorldPos,
    pub population: u32,
    pub economy: EconomyType,
    /// Radius in grid cells within which the convoy counts as "at" the city.
    pub trade_radius: f32,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct CityMarket {
    pub city: Entity,
    pub price_multiplier: f32,
    pub trade_volume: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketPrice {
    pub good: Entity,
    pub price: u32,
    pub supply: f32,
    pub demand: f32,
}

/// Recompute a unit price from base value and market pressure.
pub fn market_price(base_value: u32, supply: f32, demand: f32) -> u32 {
    let raw = base_value as f32 * demand / supply.max(MIN_SUPPLY_DIVISOR);
    (raw.round() as u32).max(1)
}

/// Per-market price table, one entry per listed good.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct PriceList {
    pub entries: Vec<MarketPrice>,
}

impl PriceList {
    pub fn get(&self, good: Entity) -> Option<&MarketPrice> {
        self.entries.iter().find(|e| e.good == good)
    }

    pub fn price_of(&self, good: Entity) -> Option<u32> {
        self.get(good).map(|e| e.price)
    }
}
