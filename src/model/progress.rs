use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Achievement {
    FirstThousand,
    Explorer,
    MasterTrader,
    CaravanKing,
}

string_enum!(Achievement {
    FirstThousand => "first_thousand",
    Explorer => "explorer",
    MasterTrader => "master_trader",
    CaravanKing => "caravan_king",
});

// ---------------------------------------------------------------------------
// Constants — Achievement thresholds
// ---------------------------------------------------------------------------

const FIRST_THOUSAND_GOLD: u32 = 1000;
const EXPLORER_DISTANCE: f32 = 500.0;
const MASTER_TRADER_TRADES: u32 = 100;
const CARAVAN_KING_LEVEL: u32 = 10;

// ---------------------------------------------------------------------------
// Constants — Experience awards
// ---------------------------------------------------------------------------

pub const EXP_PER_TRADE: u32 = 5;
pub const EXP_PER_COMBAT_VICTORY: u32 = 10;
pub const EXP_PER_DISTANCE_UNIT: f32 = 1.0;

// ---------------------------------------------------------------------------
// Constants — Level-up rewards
// ---------------------------------------------------------------------------

pub const LEVEL_GOLD_REWARD: u32 = 100;
pub const LEVEL_MORALE_REWARD: f32 = 0.1;
pub const LEVEL_SPEED_REWARD: f32 = 0.5;

/// Lifetime counters an achievement can be earned against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressTotals {
    pub level: u32,
    pub total_gold_earned: u32,
    pub total_distance: f32,
    pub total_trades: u32,
}

impl Achievement {
    pub fn is_earned(self, totals: &ProgressTotals) -> bool {
        match self {
            Achievement::FirstThousand => totals.total_gold_earned >= FIRST_THOUSAND_GOLD,
            Achievement::Explorer => totals.total_distance >= EXPLORER_DISTANCE,
            Achievement::MasterTrader => totals.total_trades >= MASTER_TRADER_TRADES,
            Achievement::CaravanKing => totals.level >= CARAVAN_KING_LEVEL,
        }
    }
}

/// Experience needed to leave `level`.
pub fn exp_for_next_level(level: u32, exp_per_level: u32) -> u32 {
    level.saturating_mul(exp_per_level)
}
