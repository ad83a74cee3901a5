use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum GoodCategory {
    Raw,
    Crafts,
    Luxury,
    Food,
}

string_enum!(GoodCategory {
    Raw => "raw",
    Crafts => "crafts",
    Luxury => "luxury",
    Food => "food",
});

impl GoodCategory {
    /// Chance that a carried stack of this category spoils on one decay roll.
    pub fn decay_chance(self) -> f32 {
        match self {
            GoodCategory::Food => 0.3,
            GoodCategory::Raw => 0.1,
            GoodCategory::Crafts => 0.05,
            GoodCategory::Luxury => 0.02,
        }
    }
}

/// Static catalog entry for a tradeable good.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoodSpec {
    pub name: &'static str,
    pub weight: u32,
    pub base_value: u32,
    pub category: GoodCategory,
    pub decay_rate: f32,
}

impl GoodSpec {
    pub fn profit_per_km(&self) -> f32 {
        self.base_value as f32 * PROFIT_PER_KM_FACTOR
    }
}

const PROFIT_PER_KM_FACTOR: f32 = 0.01;

/// Weight assumed for a good missing from the catalog.
pub const FALLBACK_WEIGHT: u32 = 1;
/// Base price assumed for a good missing from the catalog.
pub const FALLBACK_BASE_VALUE: u32 = 10;

macro_rules! good {
    ($name:expr, $weight:expr, $value:expr, $cat:ident, $decay:expr) => {
        GoodSpec {
            name: $name,
            weight: $weight,
            base_value: $value,
            category: GoodCategory::$cat,
            decay_rate: $decay,
        }
    };
}

pub const GOODS: [GoodSpec; 16] = [
    good!("Grain", 1, 10, Raw, 0.3),
    good!("Timber", 2, 15, Raw, 0.1),
    good!("Iron Ore", 5, 20, Raw, 0.05),
    good!("Coal", 3, 12, Raw, 0.02),
    good!("Cloth", 3, 25, Crafts, 0.1),
    good!("Leather", 4, 35, Crafts, 0.15),
    good!("Tools", 2, 50, Crafts, 0.02),
    good!("Pottery", 2, 30, Crafts, 0.2),
    good!("Wine", 2, 50, Luxury, 0.1),
    good!("Jewelry", 1, 100, Luxury, 0.01),
    good!("Silk", 1, 80, Luxury, 0.05),
    good!("Spices", 1, 60, Luxury, 0.08),
    good!("Fruit", 1, 8, Food, 0.4),
    good!("Vegetables", 1, 6, Food, 0.35),
    good!("Meat", 2, 25, Food, 0.5),
    good!("Bread", 1, 5, Food, 0.3),
];

pub fn find_good(name: &str) -> Option<&'static GoodSpec> {
    GOODS.iter().find(|g| g.name == name)
}
