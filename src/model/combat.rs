use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CombatOutcome {
    DecisiveVictory,
    Victory,
    PyrrhicVictory,
    Stalemate,
    Defeat,
    Rout,
}

string_enum!(CombatOutcome {
    DecisiveVictory => "decisive_victory",
    Victory => "victory",
    PyrrhicVictory => "pyrrhic_victory",
    Stalemate => "stalemate",
    Defeat => "defeat",
    Rout => "rout",
});

// ---------------------------------------------------------------------------
// Constants — Power
// ---------------------------------------------------------------------------

const POWER_PER_GUARD: u32 = 10;
const POWER_PER_MORALE: f32 = 20.0;
pub const JITTER_MIN: f32 = 0.8;
pub const JITTER_MAX: f32 = 1.2;

// ---------------------------------------------------------------------------
// Constants — Outcome ladder (inclusive lower bounds)
// ---------------------------------------------------------------------------

const DECISIVE_RATIO: f32 = 2.0;
const VICTORY_RATIO: f32 = 1.5;
const PYRRHIC_RATIO: f32 = 1.0;
const STALEMATE_RATIO: f32 = 0.7;
const DEFEAT_RATIO: f32 = 0.4;

impl CombatOutcome {
    pub fn from_ratio(ratio: f32) -> Self {
        if ratio >= DECISIVE_RATIO {
            CombatOutcome::DecisiveVictory
        } else if ratio >= VICTORY_RATIO {
            CombatOutcome::Victory
        } else if ratio >= PYRRHIC_RATIO {
            CombatOutcome::PyrrhicVictory
        } else if ratio >= STALEMATE_RATIO {
            CombatOutcome::Stalemate
        } else if ratio >= DEFEAT_RATIO {
            CombatOutcome::Defeat
        } else {
            CombatOutcome::Rout
        }
    }

    pub fn is_victory(self) -> bool {
        !matches!(self, CombatOutcome::Defeat | CombatOutcome::Rout)
    }

    /// Guards lost by the player.
    pub fn guard_losses(self) -> u32 {
        match self {
            CombatOutcome::DecisiveVictory => 0,
            CombatOutcome::Victory => 1,
            CombatOutcome::PyrrhicVictory => 2,
            CombatOutcome::Stalemate => 3,
            CombatOutcome::Defeat => 5,
            CombatOutcome::Rout => 8,
        }
    }

    pub fn morale_change(self) -> f32 {
        match self {
            CombatOutcome::DecisiveVictory => 0.2,
            CombatOutcome::Victory => 0.1,
            CombatOutcome::PyrrhicVictory => -0.1,
            CombatOutcome::Stalemate => -0.2,
            CombatOutcome::Defeat => -0.3,
            CombatOutcome::Rout => -0.5,
        }
    }

    /// Bandits killed out of `count`.
    pub fn bandit_losses(self, count: u32) -> u32 {
        match self {
            CombatOutcome::DecisiveVictory => count,
            CombatOutcome::Victory => count.saturating_sub(1),
            CombatOutcome::PyrrhicVictory => count.saturating_sub(2),
            CombatOutcome::Stalemate => count / 2,
            CombatOutcome::Defeat => count / 4,
            CombatOutcome::Rout => 0,
        }
    }

    /// Signed gold swing against `bandit_power`. Losses are capped later.
    fn gold_delta(self, bandit_power: u32) -> i64 {
        let bandit = i64::from(bandit_power);
        match self {
            CombatOutcome::DecisiveVictory => bandit / 2,
            CombatOutcome::Victory => bandit / 4,
            CombatOutcome::PyrrhicVictory | CombatOutcome::Stalemate => 0,
            CombatOutcome::Defeat => -bandit,
            CombatOutcome::Rout => -2 * bandit,
        }
    }

    fn food_delta(self, bandit_power: u32) -> i64 {
        match self {
            CombatOutcome::Rout => -i64::from(bandit_power),
            _ => 0,
        }
    }
}

/// Everything combat needs to know about the convoy and its attackers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatInput {
    pub guards: u32,
    pub morale: f32,
    pub gold: u32,
    pub food: u32,
    pub bandit_count: u32,
    pub bandit_power: u32,
    pub surprise_factor: f32,
    pub difficulty: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatResult {
    pub outcome: CombatOutcome,
    pub victory: bool,
    pub player_power: u32,
    pub bandit_power: u32,
    pub ratio: f32,
    pub player_losses: u32,
    pub bandit_losses: u32,
    pub gold_gained: u32,
    pub gold_lost: u32,
    pub food_lost: u32,
    pub morale_change: f32,
}

/// Player power before the random factor is applied: guards plus a morale bonus.
pub fn base_player_power(guards: u32, morale: f32) -> u32 {
    guards * POWER_PER_GUARD + (morale * POWER_PER_MORALE) as u32
}

pub fn bandit_power(base_power: u32, surprise_factor: f32, difficulty: f32) -> u32 {
    (base_power as f32 * difficulty * (1.0 + surprise_factor)) as u32
}

/// Resolve a fight. `jitter` is the player's random power factor, drawn by
/// the caller from `[JITTER_MIN, JITTER_MAX]`.
pub fn resolve_combat(input: &CombatInput, jitter: f32) -> CombatResult {
    let player_power = (base_player_power(input.guards, input.morale) as f32 * jitter) as u32;
    let bandit_power = bandit_power(input.bandit_power, input.surprise_factor, input.difficulty);
    let ratio = player_power as f32 / bandit_power.max(1) as f32;
    let outcome = CombatOutcome::from_ratio(ratio);

    let gold_delta = outcome.gold_delta(bandit_power);
    let (gold_gained, gold_lost) = if gold_delta >= 0 {
        (gold_delta as u32, 0)
    } else {
        (0, (gold_delta.unsigned_abs() as u32).min(input.gold))
    };
    let food_lost = (outcome.food_delta(bandit_power).unsigned_abs() as u32).min(input.food);

    CombatResult {
        outcome,
        victory: outcome.is_victory(),
        player_power,
        bandit_power,
        ratio,
        player_losses: outcome.guard_losses(),
        bandit_losses: outcome.bandit_losses(input.bandit_count),
        gold_gained,
        gold_lost,
        food_lost,
        morale_change: outcome.morale_change(),
    }
}
