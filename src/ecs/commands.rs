//! Inbound requests from UI and input collaborators.
//!
//! Each kind is its own FIFO (`Messages<T>`), drained once per tick by the
//! owning domain system. Command queues are not rotated by the message update
//! system, so a request written before the world exists waits until it does.

use bevy_ecs::entity::Entity;
use bevy_ecs::message::{Message, Messages};
use bevy_ecs::world::World;

use crate::map::{RoutePlan, WorldPos};
use crate::model::wagon::WagonType;

/// Buy or sell `quantity` units of `good` for `total_price` gold.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct TradeTransaction {
    pub good: Entity,
    pub quantity: u32,
    pub total_price: u32,
    pub is_buy: bool,
}

impl TradeTransaction {
    pub fn buy(good: Entity, quantity: u32, total_price: u32) -> Self {
        Self {
            good,
            quantity,
            total_price,
            is_buy: true,
        }
    }

    pub fn sell(good: Entity, quantity: u32, total_price: u32) -> Self {
        Self {
            good,
            quantity,
            total_price,
            is_buy: false,
        }
    }
}

/// Repair a wagon. `None` picks the first broken wagon.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct WagonRepair {
    pub wagon: Option<Entity>,
}

#[derive(Message, Debug, Clone, PartialEq)]
pub struct WagonPurchase {
    pub wagon_type: WagonType,
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecruitmentAction {
    Hire { count: u32 },
    Fire { count: u32 },
}

/// Start travelling towards `destination`. Ignored while already on the road.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct TravelCommand {
    pub destination: WorldPos,
    pub plan: Option<RoutePlan>,
}

/// A fight the convoy cannot avoid.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct CombatEncounter {
    pub bandit_count: u32,
    pub bandit_power: u32,
    pub surprise_factor: f32,
}

/// Queue a command for the next tick. Returns false if the queue is not
/// registered (the world was not built with `build_sim_app`).
pub fn submit<M: Message>(world: &mut World, command: M) -> bool {
    let Some(mut queue) = world.get_resource_mut::<Messages<M>>() else {
        tracing::warn!(
            command = std::any::type_name::<M>(),
            "command queue not registered"
        );
        return false;
    };
    queue.write(command);
    true
}
