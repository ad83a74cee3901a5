//! Wagons: repair, purchase, load and wear.
//!
//! Commands set:
//! 1. `process_repairs` — drains `WagonRepair`s
//! 2. `process_purchases` — drains `WagonPurchase`s (exclusive, spawns wagons)
//!
//! Wear set (every tick):
//! 3. `distribute_load` — spreads the convoy's cargo over its wagons
//! 4. `apply_wear` — terrain and overload wear, breakdowns

use bevy_app::{App, Plugin};
use bevy_ecs::entity::Entity;
use bevy_ecs::message::{MessageWriter, Messages};
use bevy_ecs::query::With;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Query, Res, ResMut};
use bevy_ecs::world::World;

use crate::ecs::clock::SimClock;
use crate::ecs::commands::{WagonPurchase, WagonRepair};
use crate::ecs::components::{
    ConvoyResources, IsPlayer, MapPosition, PlayerConvoy, Wagon, WagonMarker,
};
use crate::ecs::conditions::world_ready;
use crate::ecs::events::{CaravanEvent, CommandKind, RejectReason};
use crate::ecs::resources::PlayerHandle;
use crate::ecs::schedule::{CommandSet, DomainSet, SimTick};
use crate::ecs::spawn;
use crate::model::config::GameConfig;

// ---------------------------------------------------------------------------
// Plugin registration
// ---------------------------------------------------------------------------

pub struct WagonsPlugin;

impl Plugin for WagonsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            SimTick,
            (process_repairs, process_purchases)
                .chain()
                .run_if(world_ready)
                .in_set(CommandSet::Wagons),
        );
        app.add_systems(
            SimTick,
            (distribute_load, apply_wear)
                .chain()
                .run_if(world_ready)
                .in_set(DomainSet::Wear),
        );
    }
}

// ---------------------------------------------------------------------------
// System 1: Repairs
// ---------------------------------------------------------------------------

fn process_repairs(
    mut queue: ResMut<Messages<WagonRepair>>,
    player: Res<PlayerHandle>,
    mut convoys: Query<&mut ConvoyResources, With<IsPlayer>>,
    mut wagons: Query<(Entity, &mut Wagon), With<WagonMarker>>,
    mut events: MessageWriter<CaravanEvent>,
) {
    for request in queue.drain() {
        let Ok(mut resources) = convoys.get_mut(player.0) else {
            continue;
        };
        let target = match request.wagon {
            Some(wagon) => wagons.get(wagon).ok().map(|(e, _)| e),
            None => first_broken_wagon(&wagons, player.0),
        };
        let Some(target) = target else {
            let reason = match request.wagon {
                Some(_) => RejectReason::UnknownTarget,
                None => RejectReason::NothingToDo,
            };
            tracing::warn!(?reason, "repair rejected");
            events.write(CaravanEvent::CommandRejected {
                command: CommandKind::Repair,
                reason,
            });
            continue;
        };
        let Ok((_, mut wagon)) = wagons.get_mut(target) else {
            continue;
        };

        let cost = wagon.repair_cost();
        if !resources.try_spend(cost) {
            tracing::warn!(cost, gold = resources.gold, "repair rejected: not enough gold");
            events.write(CaravanEvent::CommandRejected {
                command: CommandKind::Repair,
                reason: RejectReason::InsufficientGold,
            });
            continue;
        }
        wagon.repair();
        tracing::debug!(cost, gold = resources.gold, "wagon repaired");
        events.write(CaravanEvent::WagonRepaired {
            wagon: target,
            cost,
        });
    }
}

/// Lowest-index broken wagon owned by `owner`.
fn first_broken_wagon(
    wagons: &Query<(Entity, &mut Wagon), With<WagonMarker>>,
    owner: Entity,
) -> Option<Entity> {
    wagons
        .iter()
        .filter(|(_, w)| w.owner == owner && w.is_broken)
        .map(|(e, _)| e)
        .min()
}

// ---------------------------------------------------------------------------
// System 2: Purchases
// ---------------------------------------------------------------------------

fn process_purchases(world: &mut World) {
    let Some(player) = world.get_resource::<PlayerHandle>().map(|h| h.0) else {
        return;
    };
    let requests: Vec<WagonPurchase> = world
        .resource_mut::<Messages<WagonPurchase>>()
        .drain()
        .collect();

    for request in requests {
        let cost = request.wagon_type.spec().cost;
        let paid = world
            .get_mut::<ConvoyResources>(player)
            .is_some_and(|mut res| res.try_spend(cost));
        let event = if paid {
            let wagon = spawn::spawn_wagon(world, player, request.wagon_type);
            tracing::debug!(wagon_type = %request.wagon_type, cost, "wagon purchased");
            CaravanEvent::WagonPurchased {
                wagon,
                wagon_type: request.wagon_type,
            }
        } else {
            tracing::warn!(wagon_type = %request.wagon_type, cost, "purchase rejected: not enough gold");
            CaravanEvent::CommandRejected {
                command: CommandKind::Purchase,
                reason: RejectReason::InsufficientGold,
            }
        };
        world.resource_mut::<Messages<CaravanEvent>>().write(event);
    }
}

// ---------------------------------------------------------------------------
// System 3: Load distribution
// ---------------------------------------------------------------------------

/// Each wagon carries a share of the convoy's cargo proportional to its capacity.
fn distribute_load(
    convoys: Query<(Entity, &PlayerConvoy), With<IsPlayer>>,
    mut wagons: Query<&mut Wagon, With<WagonMarker>>,
) {
    for (owner, convoy) in &convoys {
        let fleet_capacity: u64 = wagons
            .iter()
            .filter(|w| w.owner == owner)
            .map(|w| u64::from(w.load_capacity))
            .sum();
        if fleet_capacity == 0 {
            continue;
        }
        for mut wagon in wagons.iter_mut().filter(|w| w.owner == owner) {
            let share =
                u64::from(convoy.used_capacity) * u64::from(wagon.load_capacity) / fleet_capacity;
            wagon.current_load = share as u32;
        }
    }
}

// ---------------------------------------------------------------------------
// System 4: Wear
// ---------------------------------------------------------------------------

fn apply_wear(
    clock: Res<SimClock>,
    config: Res<GameConfig>,
    owners: Query<&MapPosition>,
    mut wagons: Query<(Entity, &mut Wagon), With<WagonMarker>>,
    mut events: MessageWriter<CaravanEvent>,
) {
    let dt = clock.dt();
    for (entity, mut wagon) in &mut wagons {
        if wagon.is_broken {
            continue;
        }
        let Ok(position) = owners.get(wagon.owner) else {
            continue;
        };
        let mut wear = wagon.wear_rate * config.terrain(position.terrain).wear_multiplier * dt;
        if wagon.is_overloaded() {
            wear *= wagon.current_load as f32 / wagon.load_capacity.max(1) as f32;
        }
        if wagon.damage(wear) {
            tracing::info!(wagon_type = %wagon.wagon_type, "wagon broke down");
            events.write(CaravanEvent::WagonBroken { wagon: entity });
        }
    }
}
