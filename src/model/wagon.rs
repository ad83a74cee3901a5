use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum WagonType {
    #[default]
    BasicCart,
    TradeWagon,
    HeavyWagon,
    LuxuryCoach,
}

string_enum!(WagonType {
    BasicCart => "basic_cart",
    TradeWagon => "trade_wagon",
    HeavyWagon => "heavy_wagon",
    LuxuryCoach => "luxury_coach",
});

/// Purchase-time stats for a wagon type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WagonSpec {
    pub cost: u32,
    pub max_health: f32,
    pub capacity: u32,
    pub speed_modifier: f32,
    pub wear_rate: f32,
}

impl WagonType {
    pub fn spec(self) -> WagonSpec {
        let (cost, max_health, capacity, speed_modifier, wear_rate) = match self {
            WagonType::BasicCart => (100, 100.0, 500, 1.0, 0.10),
            WagonType::TradeWagon => (200, 120.0, 800, 0.9, 0.08),
            WagonType::HeavyWagon => (300, 150.0, 1200, 0.7, 0.12),
            WagonType::LuxuryCoach => (500, 80.0, 300, 1.2, 0.15),
        };
        WagonSpec {
            cost,
            max_health,
            capacity,
            speed_modifier,
            wear_rate,
        }
    }
}

const REPAIR_COST_FACTOR: f32 = 0.5;

/// Gold needed to bring a wagon from `health` back to `max_health`.
///
/// Half the purchase price scaled by the missing health fraction, truncated.
pub fn repair_cost(wagon_type: WagonType, health: f32, max_health: f32) -> u32 {
    if max_health <= 0.0 {
        return 0;
    }
    let missing = (1.0 - health / max_health).clamp(0.0, 1.0);
    (wagon_type.spec().cost as f32 * missing * REPAIR_COST_FACTOR) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purchase_table() {
        let heavy = WagonType::HeavyWagon.spec();
        assert_eq!(heavy.cost, 300);
        assert_eq!(heavy.max_health, 150.0);
        assert_eq!(heavy.capacity, 1200);
        assert_eq!(heavy.speed_modifier, 0.7);
        assert_eq!(heavy.wear_rate, 0.12);
    }

    #[test]
    fn repair_cost_scales_with_damage() {
        assert_eq!(repair_cost(WagonType::BasicCart, 100.0, 100.0), 0);
        assert_eq!(repair_cost(WagonType::BasicCart, 50.0, 100.0), 25);
        assert_eq!(repair_cost(WagonType::BasicCart, 0.0, 100.0), 50);
        assert_eq!(repair_cost(WagonType::LuxuryCoach, 0.0, 80.0), 250);
    }
}
