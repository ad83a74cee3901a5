//! Cargo upkeep.
//!
//! Inventory set:
//! 1. `update_overload` — every tick, speed penalty for carrying too much
//! 2. `decay_cargo` — every 30 s, category-based spoilage rolls

use bevy_app::{App, Plugin};
use bevy_ecs::message::MessageWriter;
use bevy_ecs::query::With;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Query, Res, ResMut};
use rand::Rng;

use crate::ecs::components::{GoodData, GoodMarker, Inventory, IsPlayer, PlayerConvoy};
use crate::ecs::conditions::{every_thirty_seconds, world_ready};
use crate::ecs::events::CaravanEvent;
use crate::ecs::resources::{InventoryRng, PlayerHandle};
use crate::ecs::schedule::{DomainSet, SimTick};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const OVERLOAD_PENALTY: f32 = 0.5;
const OVERLOAD_FLOOR: f32 = 0.3;
/// A spoiled stack loses this fraction of its units (at least one).
const DECAY_LOSS_DIVISOR: u32 = 10;

// ---------------------------------------------------------------------------
// Plugin registration
// ---------------------------------------------------------------------------

pub struct InventoryPlugin;

impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            SimTick,
            update_overload.run_if(world_ready).in_set(DomainSet::Inventory),
        );
        app.add_systems(
            SimTick,
            decay_cargo
                .after(update_overload)
                .run_if(world_ready)
                .run_if(every_thirty_seconds)
                .in_set(DomainSet::Inventory),
        );
    }
}

/// 1.0 within capacity, then half a point of speed per 100% overload, floored.
pub fn overload_factor(used: u32, total: u32) -> f32 {
    if total == 0 || used <= total {
        return 1.0;
    }
    let ratio = used as f32 / total as f32;
    (1.0 - (ratio - 1.0) * OVERLOAD_PENALTY).max(OVERLOAD_FLOOR)
}

// ---------------------------------------------------------------------------
// System 1: Overload
// ---------------------------------------------------------------------------

fn update_overload(mut convoys: Query<&mut PlayerConvoy, With<IsPlayer>>) {
    for mut convoy in &mut convoys {
        let factor = overload_factor(convoy.used_capacity, convoy.total_capacity);
        if convoy.overload_factor != factor {
            convoy.overload_factor = factor;
        }
    }
}

// ---------------------------------------------------------------------------
// System 2: Decay (30 s)
// ---------------------------------------------------------------------------

fn decay_cargo(
    player: Res<PlayerHandle>,
    mut rng: ResMut<InventoryRng>,
    mut convoys: Query<(&mut PlayerConvoy, &mut Inventory), With<IsPlayer>>,
    goods: Query<&GoodData, With<GoodMarker>>,
    mut events: MessageWriter<CaravanEvent>,
) {
    let Ok((mut convoy, mut inventory)) = convoys.get_mut(player.0) else {
        return;
    };
    let rng = &mut rng.0;
    let held = inventory.items.clone();
    for item in held {
        let Ok(good) = goods.get(item.good) else {
            continue;
        };
        if rng.random_range(0.0..1.0) >= good.category.decay_chance() {
            continue;
        }
        let lost = (item.quantity / DECAY_LOSS_DIVISOR).max(1).min(item.quantity);
        if inventory.remove(item.good, lost) {
            convoy.used_capacity = convoy
                .used_capacity
                .saturating_sub(good.weight.saturating_mul(lost));
            tracing::debug!(good = %good.name, lost, "cargo spoiled");
            events.write(CaravanEvent::CargoSpoiled {
                good: item.good,
                lost,
            });
        }
    }
}
