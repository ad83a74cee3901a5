use bevy_ecs::entity::Entity;
use bevy_ecs::message::Message;

use crate::map::WorldPos;
use crate::model::combat::CombatResult;
use crate::model::event::EventType;
use crate::model::progress::Achievement;
use crate::model::wagon::WagonType;

/// Which inbound queue a rejected request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Trade,
    Repair,
    Purchase,
    Recruitment,
    Travel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    InsufficientGold,
    InsufficientCapacity,
    InsufficientStock,
    AlreadyTraveling,
    UnknownTarget,
    NothingToDo,
}

/// Outbound notifications for UI consumers and cross-system reactions.
#[derive(Message, Clone, Debug, PartialEq)]
pub enum CaravanEvent {
    // -- Lifecycle --
    WorldInitialized {
        player: Entity,
    },
    CommandRejected {
        command: CommandKind,
        reason: RejectReason,
    },

    // -- Travel --
    TravelStarted {
        destination: WorldPos,
        distance: f32,
    },
    Arrived {
        city: Option<Entity>,
    },
    GuardDeserted {
        remaining: u32,
    },

    // -- Trade --
    TradeCompleted {
        good: Entity,
        quantity: u32,
        total_price: u32,
        is_buy: bool,
    },
    CargoSpoiled {
        good: Entity,
        lost: u32,
    },

    // -- Wagons --
    WagonBroken {
        wagon: Entity,
    },
    WagonRepaired {
        wagon: Entity,
        cost: u32,
    },
    WagonPurchased {
        wagon: Entity,
        wagon_type: WagonType,
    },

    // -- Combat --
    CombatResolved {
        result: CombatResult,
    },

    // -- Events --
    EventStarted {
        event: Entity,
        event_type: EventType,
        severity: f32,
    },
    EventEnded {
        event_type: EventType,
    },
    RoadCleared,

    // -- Personnel --
    GuardsHired {
        count: u32,
        cost: u32,
    },
    GuardsDismissed {
        count: u32,
    },
    PayrollPaid {
        amount: u32,
    },
    PayrollMissed {
        owed: u32,
    },

    // -- Progression --
    LevelUp {
        level: u32,
    },
    AchievementUnlocked {
        achievement: Achievement,
    },
}

impl CaravanEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            CaravanEvent::WorldInitialized { .. } => "world_initialized",
            CaravanEvent::CommandRejected { .. } => "command_rejected",
            CaravanEvent::TravelStarted { .. } => "travel_started",
            CaravanEvent::Arrived { .. } => "arrived",
            CaravanEvent::GuardDeserted { .. } => "guard_deserted",
            CaravanEvent::TradeCompleted { .. } => "trade_completed",
            CaravanEvent::CargoSpoiled { .. } => "cargo_spoiled",
            CaravanEvent::WagonBroken { .. } => "wagon_broken",
            CaravanEvent::WagonRepaired { .. } => "wagon_repaired",
            CaravanEvent::WagonPurchased { .. } => "wagon_purchased",
            CaravanEvent::CombatResolved { .. } => "combat_resolved",
            CaravanEvent::EventStarted { .. } => "event_started",
            CaravanEvent::EventEnded { .. } => "event_ended",
            CaravanEvent::RoadCleared => "road_cleared",
            CaravanEvent::GuardsHired { .. } => "guards_hired",
            CaravanEvent::GuardsDismissed { .. } => "guards_dismissed",
            CaravanEvent::PayrollPaid { .. } => "payroll_paid",
            CaravanEvent::PayrollMissed { .. } => "payroll_missed",
            CaravanEvent::LevelUp { .. } => "level_up",
            CaravanEvent::AchievementUnlocked { .. } => "achievement_unlocked",
        }
    }

    /// Human-readable line for the event log.
    pub fn describe(&self) -> String {
        match self {
            CaravanEvent::WorldInitialized { .. } => "The caravan sets out".to_string(),
            CaravanEvent::CommandRejected { command, reason } => {
                format!("{command:?} request rejected: {reason:?}")
            }
            CaravanEvent::TravelStarted { distance, .. } => {
                format!("Departed on a {distance:.0}-unit journey")
            }
            CaravanEvent::Arrived { city: Some(_) } => "Arrived at a city".to_string(),
            CaravanEvent::Arrived { city: None } => "Arrived at the destination".to_string(),
            CaravanEvent::GuardDeserted { remaining } => {
                format!("A starving guard deserted ({remaining} left)")
            }
            CaravanEvent::TradeCompleted {
                quantity,
                total_price,
                is_buy,
                ..
            } => {
                let verb = if *is_buy { "Bought" } else { "Sold" };
                format!("{verb} {quantity} units for {total_price} gold")
            }
            CaravanEvent::CargoSpoiled { lost, .. } => format!("{lost} units of cargo spoiled"),
            CaravanEvent::WagonBroken { .. } => "A wagon broke down".to_string(),
            CaravanEvent::WagonRepaired { cost, .. } => format!("Wagon repaired for {cost} gold"),
            CaravanEvent::WagonPurchased { wagon_type, .. } => {
                format!("Purchased a {wagon_type}")
            }
            CaravanEvent::CombatResolved { result } => format!(
                "Fought bandits: {} ({} vs {}), lost {} guards",
                result.outcome, result.player_power, result.bandit_power, result.player_losses
            ),
            CaravanEvent::EventStarted {
                event_type,
                severity,
                ..
            } => event_type.describe(*severity),
            CaravanEvent::EventEnded { event_type } => format!("{event_type} has passed"),
            CaravanEvent::RoadCleared => "The road is clear again".to_string(),
            CaravanEvent::GuardsHired { count, cost } => {
                format!("Hired {count} guards for {cost} gold")
            }
            CaravanEvent::GuardsDismissed { count } => format!("Dismissed {count} guards"),
            CaravanEvent::PayrollPaid { amount } => format!("Paid {amount} gold in wages"),
            CaravanEvent::PayrollMissed { owed } => format!("Could not pay {owed} gold in wages"),
            CaravanEvent::LevelUp { level } => format!("Reached level {level}"),
            CaravanEvent::AchievementUnlocked { achievement } => {
                format!("Achievement unlocked: {achievement}")
            }
        }
    }
}
