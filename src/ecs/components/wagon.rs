use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;

use crate::model::wagon::{WagonType, repair_cost};

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Wagon {
    pub owner: Entity,
    pub health: f32,
    pub max_health: f32,
    pub load_capacity: u32,
    pub current_load: u32,
    pub speed_modifier: f32,
    pub wear_rate: f32,
    pub wagon_type: WagonType,
    pub is_broken: bool,
}

impl Wagon {
    pub fn new(owner: Entity, wagon_type: WagonType) -> Self {
        let spec = wagon_type.spec();
        Self {
            owner,
            health: spec.max_health,
            max_health: spec.max_health,
            load_capacity: spec.capacity,
            current_load: 0,
            speed_modifier: spec.speed_modifier,
            wear_rate: spec.wear_rate,
            wagon_type,
            is_broken: false,
        }
    }

    pub fn is_overloaded(&self) -> bool {
        self.current_load > self.load_capacity
    }

    /// Take `amount` of damage. Returns true only on the tick the wagon breaks.
    pub fn damage(&mut self, amount: f32) -> bool {
        self.health = (self.health - amount.max(0.0)).max(0.0);
        if self.health <= 0.0 && !self.is_broken {
            self.is_broken = true;
            return true;
        }
        false
    }

    pub fn repair_cost(&self) -> u32 {
        repair_cost(self.wagon_type, self.health, self.max_health)
    }

    pub fn repair(&mut self) {
        self.health = self.max_health;
        self.is_broken = false;
    }
}

#[cfg(test)]
mod tests {
    use bevy_ecs::world::World;

    use super::*;

    fn cart() -> Wagon {
        let mut world = World::new();
        Wagon::new(world.spawn_empty().id(), WagonType::BasicCart)
    }

    #[test]
    fn breaks_exactly_once() {
        let mut wagon = cart();
        assert!(!wagon.damage(60.0));
        assert!(wagon.damage(60.0));
        assert_eq!(wagon.health, 0.0);
        assert!(wagon.is_broken);
        assert!(!wagon.damage(10.0));
        assert!(wagon.is_broken);
    }

    #[test]
    fn negative_damage_does_not_heal() {
        let mut wagon = cart();
        wagon.damage(10.0);
        wagon.damage(-50.0);
        assert_eq!(wagon.health, 90.0);
    }

    #[test]
    fn repair_restores_and_clears() {
        let mut wagon = cart();
        wagon.damage(100.0);
        assert_eq!(wagon.repair_cost(), 50);
        wagon.repair();
        assert_eq!(wagon.health, 100.0);
        assert!(!wagon.is_broken);
        assert_eq!(wagon.repair_cost(), 0);
    }
}
