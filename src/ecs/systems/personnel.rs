//! Guards: hiring, dismissal, pay and morale upkeep.
//!
//! Commands set:
//! 1. `process_recruitment` — drains `RecruitmentAction`s
//!
//! Personnel set (every 30 s):
//! 2. `pay_guards` — payroll, then the morale drift from food and purse

use bevy_app::{App, Plugin};
use bevy_ecs::message::{MessageWriter, Messages};
use bevy_ecs::query::With;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Query, Res, ResMut};

use crate::ecs::commands::RecruitmentAction;
use crate::ecs::components::{ConvoyResources, GUARD_FLOOR, IsPlayer};
use crate::ecs::conditions::{every_thirty_seconds, world_ready};
use crate::ecs::events::{CaravanEvent, CommandKind, RejectReason};
use crate::ecs::resources::PlayerHandle;
use crate::ecs::schedule::{CommandSet, DomainSet, SimTick};
use crate::model::config::GameConfig;

// ---------------------------------------------------------------------------
// Constants — Morale
// ---------------------------------------------------------------------------

const DISMISSAL_MORALE_HIT: f32 = 0.05;
const PAID_MORALE: f32 = 0.05;
const UNPAID_MORALE: f32 = -0.1;
const FED_MORALE: f32 = 0.01;
const HUNGRY_MORALE: f32 = -0.05;
/// Gold above this keeps the guards confident.
const COMFORTABLE_PURSE: u32 = 100;
const COMFORTABLE_MORALE: f32 = 0.01;
const POOR_MORALE: f32 = -0.02;

// ---------------------------------------------------------------------------
// Plugin registration
// ---------------------------------------------------------------------------

pub struct PersonnelPlugin;

impl Plugin for PersonnelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            SimTick,
            process_recruitment
                .run_if(world_ready)
                .in_set(CommandSet::Recruitment),
        );
        app.add_systems(
            SimTick,
            pay_guards
                .run_if(world_ready)
                .run_if(every_thirty_seconds)
                .in_set(DomainSet::Personnel),
        );
    }
}

// ---------------------------------------------------------------------------
// System 1: Recruitment
// ---------------------------------------------------------------------------

fn process_recruitment(
    mut queue: ResMut<Messages<RecruitmentAction>>,
    config: Res<GameConfig>,
    player: Res<PlayerHandle>,
    mut convoys: Query<&mut ConvoyResources, With<IsPlayer>>,
    mut events: MessageWriter<CaravanEvent>,
) {
    for action in queue.drain() {
        let Ok(mut resources) = convoys.get_mut(player.0) else {
            continue;
        };
        let event = match action {
            RecruitmentAction::Hire { count } => hire(&mut resources, count, config.guard_hire_cost),
            RecruitmentAction::Fire { count } => dismiss(&mut resources, count),
        };
        match &event {
            CaravanEvent::CommandRejected { reason, .. } => {
                tracing::warn!(?action, ?reason, gold = resources.gold, "recruitment rejected");
            }
            _ => {
                tracing::debug!(?action, guards = resources.guards, gold = resources.gold, "recruitment applied");
            }
        }
        events.write(event);
    }
}

/// Hire all `count` guards or none of them.
fn hire(resources: &mut ConvoyResources, count: u32, unit_cost: u32) -> CaravanEvent {
    if count == 0 {
        return rejected(RejectReason::NothingToDo);
    }
    let cost = count.saturating_mul(unit_cost);
    if !resources.try_spend(cost) {
        return rejected(RejectReason::InsufficientGold);
    }
    resources.guards += count;
    CaravanEvent::GuardsHired { count, cost }
}

/// Dismiss up to `count` guards, never below the floor. Each one leaving
/// unsettles the rest.
fn dismiss(resources: &mut ConvoyResources, count: u32) -> CaravanEvent {
    let count = count.min(resources.guards.saturating_sub(GUARD_FLOOR));
    if count == 0 {
        return rejected(RejectReason::NothingToDo);
    }
    resources.guards -= count;
    resources.adjust_morale(-DISMISSAL_MORALE_HIT * count as f32);
    CaravanEvent::GuardsDismissed { count }
}

fn rejected(reason: RejectReason) -> CaravanEvent {
    CaravanEvent::CommandRejected {
        command: CommandKind::Recruitment,
        reason,
    }
}

// ---------------------------------------------------------------------------
// System 2: Payroll and upkeep (30 s)
// ---------------------------------------------------------------------------

fn pay_guards(
    config: Res<GameConfig>,
    player: Res<PlayerHandle>,
    mut convoys: Query<&mut ConvoyResources, With<IsPlayer>>,
    mut events: MessageWriter<CaravanEvent>,
) {
    let Ok(mut resources) = convoys.get_mut(player.0) else {
        return;
    };

    let owed = resources.guards.saturating_mul(config.guard_salary);
    if resources.try_spend(owed) {
        resources.adjust_morale(PAID_MORALE);
        tracing::debug!(owed, gold = resources.gold, "payroll paid");
        events.write(CaravanEvent::PayrollPaid { amount: owed });
    } else {
        resources.adjust_morale(UNPAID_MORALE);
        tracing::warn!(owed, gold = resources.gold, "payroll missed");
        events.write(CaravanEvent::PayrollMissed { owed });
    }

    let fed = if resources.food > 0 { FED_MORALE } else { HUNGRY_MORALE };
    let purse = if resources.gold > COMFORTABLE_PURSE {
        COMFORTABLE_MORALE
    } else {
        POOR_MORALE
    };
    resources.adjust_morale(fed + purse);
}
