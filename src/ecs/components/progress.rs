use bevy_ecs::component::Component;

use crate::model::progress::{Achievement, ProgressTotals};

#[derive(Component, Debug, Clone, PartialEq)]
pub struct PlayerProgress {
    pub level: u32,
    pub experience: u32,
    pub total_distance: f32,
    pub total_gold_earned: u32,
    pub total_trades: u32,
    /// Fractional distance not yet converted into experience.
    pub distance_carry: f32,
    pub first_thousand: bool,
    pub explorer: bool,
    pub master_trader: bool,
    pub caravan_king: bool,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self {
            level: 1,
            experience: 0,
            total_distance: 0.0,
            total_gold_earned: 0,
            total_trades: 0,
            distance_carry: 0.0,
            first_thousand: false,
            explorer: false,
            master_trader: false,
            caravan_king: false,
        }
    }
}

impl PlayerProgress {
    pub fn totals(&self) -> ProgressTotals {
        ProgressTotals {
            level: self.level,
            total_gold_earned: self.total_gold_earned,
            total_distance: self.total_distance,
            total_trades: self.total_trades,
        }
    }

    pub fn has(&self, achievement: Achievement) -> bool {
        match achievement {
            Achievement::FirstThousand => self.first_thousand,
            Achievement::Explorer => self.explorer,
            Achievement::MasterTrader => self.master_trader,
            Achievement::CaravanKing => self.caravan_king,
        }
    }

    /// Set the flag. Flags are one-way.
    pub fn grant(&mut self, achievement: Achievement) {
        let flag = match achievement {
            Achievement::FirstThousand => &mut self.first_thousand,
            Achievement::Explorer => &mut self.explorer,
            Achievement::MasterTrader => &mut self.master_trader,
            Achievement::CaravanKing => &mut self.caravan_king,
        };
        *flag = true;
    }
}
