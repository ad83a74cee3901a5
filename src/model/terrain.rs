use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Terrain
// ---------------------------------------------------------------------------

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub enum TerrainType {
    Road,
    #[default]
    Plains,
    Forest,
    Mountains,
    Desert,
    River,
}

string_enum!(TerrainType {
    Road => "road",
    Plains => "plains",
    Forest => "forest",
    Mountains => "mountains",
    Desert => "desert",
    River => "river",
});

/// Per-terrain balance coefficients used by wear, movement, risk and foraging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainCoefficients {
    pub movement_cost: f32,
    pub wear_multiplier: f32,
    pub danger_level: f32,
    pub food_availability: f32,
}

impl TerrainType {
    /// Map a uniform sample in `[0, 1)` to a terrain type.
    ///
    /// Rivers are never produced by generation; they only appear through
    /// hand-placed grids or overrides.
    pub fn from_sample(value: f32) -> Self {
        if value < 0.1 {
            TerrainType::Road
        } else if value < 0.4 {
            TerrainType::Forest
        } else if value < 0.6 {
            TerrainType::Mountains
        } else if value < 0.8 {
            TerrainType::Plains
        } else {
            TerrainType::Desert
        }
    }

    pub fn coefficients(self) -> TerrainCoefficients {
        let (movement_cost, wear_multiplier, danger_level, food_availability) = match self {
            TerrainType::Road => (0.8, 0.7, 0.3, 0.3),
            TerrainType::Plains => (1.0, 1.0, 0.4, 0.8),
            TerrainType::Forest => (1.5, 1.3, 0.7, 0.6),
            TerrainType::Mountains => (2.0, 2.0, 0.8, 0.2),
            TerrainType::Desert => (1.3, 1.5, 0.6, 0.1),
            TerrainType::River => (1.8, 1.8, 0.5, 0.7),
        };
        TerrainCoefficients {
            movement_cost,
            wear_multiplier,
            danger_level,
            food_availability,
        }
    }

    /// Multiplier applied to convoy speed while crossing this terrain.
    pub fn speed_modifier(self) -> f32 {
        match self {
            TerrainType::Road => 1.2,
            TerrainType::Plains => 1.0,
            TerrainType::Forest => 0.7,
            TerrainType::Mountains => 0.5,
            TerrainType::Desert => 0.6,
            TerrainType::River => 0.4,
        }
    }

    /// Step cost used only by the pathfinder. Coarser than `movement_cost`.
    pub fn path_cost(self) -> f32 {
        match self {
            TerrainType::Road => 1.0,
            TerrainType::Plains => 1.5,
            TerrainType::Forest => 2.0,
            TerrainType::Mountains => 4.0,
            TerrainType::Desert => 2.5,
            TerrainType::River => 3.0,
        }
    }

    /// Chance of a travel event firing on one 5-second roll.
    pub fn travel_event_chance(self) -> f32 {
        match self {
            TerrainType::Forest => 0.4,
            TerrainType::Mountains => 0.5,
            TerrainType::Desert => 0.3,
            TerrainType::River => 0.35,
            TerrainType::Road => 0.1,
            TerrainType::Plains => 0.2,
        }
    }
}

// ---------------------------------------------------------------------------
// Risk
// ---------------------------------------------------------------------------

const GUARD_RISK_REDUCTION: f32 = 0.05;
const MIN_GUARD_FACTOR: f32 = 0.1;
const MIN_MORALE_FACTOR: f32 = 0.5;

/// Travel risk for a convoy on `danger`-rated terrain.
///
/// Guards shave 5% each down to a 0.1 floor; low morale stops helping below 0.5.
pub fn travel_risk(danger: f32, guards: u32, morale: f32) -> f32 {
    let guard_factor = (1.0 - guards as f32 * GUARD_RISK_REDUCTION).max(MIN_GUARD_FACTOR);
    danger * guard_factor * morale.max(MIN_MORALE_FACTOR)
}
