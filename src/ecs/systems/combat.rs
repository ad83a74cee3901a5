//! Combat.
//!
//! Combat set:
//! 1. `resolve_encounters` — drains `CombatEncounter`s, resolves each fight
//!    against the convoy as it stands and applies the outcome

use bevy_app::{App, Plugin};
use bevy_ecs::message::{MessageWriter, Messages};
use bevy_ecs::query::With;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Query, Res, ResMut};
use rand::Rng;

use crate::ecs::commands::CombatEncounter;
use crate::ecs::components::{ConvoyResources, IsPlayer};
use crate::ecs::conditions::world_ready;
use crate::ecs::events::CaravanEvent;
use crate::ecs::resources::{CombatRng, PlayerHandle};
use crate::ecs::schedule::{DomainSet, SimTick};
use crate::model::combat::{CombatInput, CombatResult, JITTER_MAX, JITTER_MIN, resolve_combat};
use crate::model::config::GameConfig;

// ---------------------------------------------------------------------------
// Plugin registration
// ---------------------------------------------------------------------------

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            SimTick,
            resolve_encounters.run_if(world_ready).in_set(DomainSet::Combat),
        );
    }
}

// ---------------------------------------------------------------------------
// System 1: Encounters
// ---------------------------------------------------------------------------

fn resolve_encounters(
    mut queue: ResMut<Messages<CombatEncounter>>,
    config: Res<GameConfig>,
    player: Res<PlayerHandle>,
    mut rng: ResMut<CombatRng>,
    mut convoys: Query<&mut ConvoyResources, With<IsPlayer>>,
    mut events: MessageWriter<CaravanEvent>,
) {
    let rng = &mut rng.0;
    for encounter in queue.drain() {
        let Ok(mut resources) = convoys.get_mut(player.0) else {
            continue;
        };
        let input = CombatInput {
            guards: resources.guards,
            morale: resources.morale(),
            gold: resources.gold,
            food: resources.food,
            bandit_count: encounter.bandit_count,
            bandit_power: encounter.bandit_power,
            surprise_factor: encounter.surprise_factor,
            difficulty: config.combat_difficulty,
        };
        let result = resolve_combat(&input, rng.random_range(JITTER_MIN..=JITTER_MAX));
        apply_result(&mut resources, &result);

        tracing::info!(
            outcome = %result.outcome,
            ratio = result.ratio,
            guards_lost = result.player_losses,
            gold_gained = result.gold_gained,
            gold_lost = result.gold_lost,
            guards = resources.guards,
            "combat resolved"
        );
        events.write(CaravanEvent::CombatResolved { result });
    }
}

fn apply_result(resources: &mut ConvoyResources, result: &CombatResult) {
    resources.gold = resources
        .gold
        .saturating_add(result.gold_gained)
        .saturating_sub(result.gold_lost);
    resources.lose_guards(result.player_losses);
    resources.food = resources.food.saturating_sub(result.food_lost);
    resources.adjust_morale(result.morale_change);
}
