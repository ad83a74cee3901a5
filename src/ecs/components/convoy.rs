use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;

use crate::map::{GridPos, WorldPos};
use crate::model::terrain::TerrainType;

pub const MORALE_MIN: f32 = 0.1;
pub const MORALE_MAX: f32 = 1.0;
/// A convoy always keeps at least one guard.
pub const GUARD_FLOOR: u32 = 1;
/// Capacity of the convoy itself, before any wagons.
pub const BASE_CONVOY_CAPACITY: u32 = 1000;

/// Absorbs f32 drift when per-tick food amounts sum to a whole unit.
const FOOD_DEBT_EPSILON: f32 = 1e-4;

/// The player's travelling unit.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PlayerConvoy {
    pub position: WorldPos,
    pub move_speed: f32,
    pub base_speed: f32,
    pub total_capacity: u32,
    pub used_capacity: u32,
    /// Starvation, storm and road-block penalties. 1.0 is unimpeded.
    pub speed_modifier: f32,
    /// Penalty for carrying more than `total_capacity`. 1.0 when within limits.
    pub overload_factor: f32,
}

impl PlayerConvoy {
    pub fn new(position: WorldPos, base_speed: f32, total_capacity: u32) -> Self {
        Self {
            position,
            move_speed: base_speed,
            base_speed,
            total_capacity,
            used_capacity: 0,
            speed_modifier: 1.0,
            overload_factor: 1.0,
        }
    }

    pub fn free_capacity(&self) -> u32 {
        self.total_capacity.saturating_sub(self.used_capacity)
    }

    pub fn can_carry(&self, extra: u32) -> bool {
        self.used_capacity.saturating_add(extra) <= self.total_capacity
    }
}

/// Gold, food, guards and morale. Morale stays within `[MORALE_MIN, MORALE_MAX]`.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ConvoyResources {
    pub gold: u32,
    pub food: u32,
    pub guards: u32,
    pub food_consumption_rate: f32,
    /// Food eaten but not yet taken from the whole-unit store.
    pub food_debt: f32,
    morale: f32,
}

impl ConvoyResources {
    pub fn new(gold: u32, food: u32, guards: u32, food_consumption_rate: f32) -> Self {
        Self {
            gold,
            food,
            guards,
            food_consumption_rate,
            food_debt: 0.0,
            morale: MORALE_MAX,
        }
    }

    pub fn morale(&self) -> f32 {
        self.morale
    }

    pub fn set_morale(&mut self, morale: f32) {
        self.morale = morale.clamp(MORALE_MIN, MORALE_MAX);
    }

    pub fn adjust_morale(&mut self, delta: f32) {
        self.set_morale(self.morale + delta);
    }

    /// Debit `amount` if affordable.
    pub fn try_spend(&mut self, amount: u32) -> bool {
        if self.gold < amount {
            return false;
        }
        self.gold -= amount;
        true
    }

    /// Accrue `amount` of food eaten and take the whole units from the store.
    /// Returns the units removed.
    pub fn eat(&mut self, amount: f32) -> u32 {
        self.food_debt += amount;
        let whole = (self.food_debt + FOOD_DEBT_EPSILON).floor();
        if whole < 1.0 {
            return 0;
        }
        self.food_debt -= whole;
        let eaten = (whole as u32).min(self.food);
        self.food -= eaten;
        if self.food == 0 {
            self.food_debt = 0.0;
        }
        eaten
    }

    /// Remove up to `count` guards, never going below `GUARD_FLOOR`.
    /// Returns the number actually removed.
    pub fn lose_guards(&mut self, count: u32) -> u32 {
        let removable = self.guards.saturating_sub(GUARD_FLOOR);
        let lost = count.min(removable);
        self.guards -= lost;
        lost
    }
}

impl Default for ConvoyResources {
    fn default() -> Self {
        Self::new(0, 0, GUARD_FLOOR, 0.0)
    }
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct MapPosition {
    pub grid: GridPos,
    pub world: WorldPos,
    pub terrain: TerrainType,
    /// Travel risk on the current cell, refreshed every tick.
    pub risk: f32,
}

#[derive(Component, Debug, Clone, PartialEq, Default)]
pub struct TravelState {
    pub is_traveling: bool,
    pub progress: f32,
    pub total_travel_time: f32,
    pub destination_reached: bool,
    pub start: WorldPos,
    pub destination: WorldPos,
    /// Simplified waypoints of the planned route, if one was supplied.
    pub waypoints: Vec<GridPos>,
}

impl TravelState {
    pub fn idle() -> Self {
        Self {
            destination_reached: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryItem {
    pub good: Entity,
    pub quantity: u32,
}

/// Carried goods. Entries are unique per good and never hold zero.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    pub items: Vec<InventoryItem>,
}

impl Inventory {
    pub fn quantity_of(&self, good: Entity) -> u32 {
        self.items
            .iter()
            .find(|i| i.good == good)
            .map_or(0, |i| i.quantity)
    }

    pub fn add(&mut self, good: Entity, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.items.iter_mut().find(|i| i.good == good) {
            Some(item) => item.quantity += quantity,
            None => self.items.push(InventoryItem { good, quantity }),
        }
    }

    /// Remove `quantity` units. Fails without change if fewer are held.
    pub fn remove(&mut self, good: Entity, quantity: u32) -> bool {
        let Some(pos) = self.items.iter().position(|i| i.good == good) else {
            return false;
        };
        if self.items[pos].quantity < quantity {
            return false;
        }
        self.items[pos].quantity -= quantity;
        if self.items[pos].quantity == 0 {
            self.items.remove(pos);
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items ordered by value per unit weight, best first.
    pub fn sorted_by_value_density(
        &self,
        density: impl Fn(Entity) -> f32,
    ) -> Vec<InventoryItem> {
        let mut items = self.items.clone();
        items.sort_by(|a, b| density(b.good).total_cmp(&density(a.good)));
        items
    }
}
