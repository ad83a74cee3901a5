use serde::{Deserialize, Serialize};

use super::goods::GoodCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum EconomyType {
    Agricultural,
    Industrial,
    TradeHub,
    Mining,
}

string_enum!(EconomyType {
    Agricultural => "agricultural",
    Industrial => "industrial",
    TradeHub => "trade_hub",
    Mining => "mining",
});

impl EconomyType {
    /// Market-wide price multiplier for cities of this economy.
    pub fn price_multiplier(self) -> f32 {
        match self {
            EconomyType::Agricultural => 0.8,
            EconomyType::Industrial => 1.2,
            EconomyType::TradeHub => 1.0,
            EconomyType::Mining => 1.1,
        }
    }

    /// Local price modifier for a category of goods. Producers sell cheap,
    /// importers pay extra.
    pub fn category_modifier(self, category: GoodCategory) -> f32 {
        match (self, category) {
            (EconomyType::Agricultural, GoodCategory::Raw) => 0.7,
            (EconomyType::Agricultural, GoodCategory::Food) => 0.6,
            (EconomyType::Agricultural, GoodCategory::Luxury) => 1.3,
            (EconomyType::Industrial, GoodCategory::Crafts) => 0.8,
            (EconomyType::Industrial, GoodCategory::Raw) => 1.1,
            (EconomyType::Mining, GoodCategory::Raw) => 0.9,
            (EconomyType::Mining, GoodCategory::Luxury) => 1.2,
            _ => 1.0,
        }
    }
}

/// Fixed city placement entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CitySpec {
    pub name: &'static str,
    pub grid: (i32, i32),
    pub economy: EconomyType,
    pub population: u32,
}

/// Trade radius of every city, in grid cells.
pub const CITY_TRADE_RADIUS: f32 = 20.0;

pub const CITIES: [CitySpec; 6] = [
    CitySpec {
        name: "Starting Town",
        grid: (10, 10),
        economy: EconomyType::Agricultural,
        population: 2000,
    },
    CitySpec {
        name: "Trade Capital",
        grid: (50, 50),
        economy: EconomyType::TradeHub,
        population: 5000,
    },
    CitySpec {
        name: "Mountain Fortress",
        grid: (80, 20),
        economy: EconomyType::Mining,
        population: 1500,
    },
    CitySpec {
        name: "Port City",
        grid: (30, 70),
        economy: EconomyType::Industrial,
        population: 3000,
    },
    CitySpec {
        name: "Northern Outpost",
        grid: (20, 80),
        economy: EconomyType::Agricultural,
        population: 1200,
    },
    CitySpec {
        name: "Southern Village",
        grid: (70, 30),
        economy: EconomyType::Agricultural,
        population: 800,
    },
];
