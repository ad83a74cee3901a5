use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;

use crate::ecs::components::*;
use crate::map::{GridPos, WorldPos};
use crate::model::city::{CITY_TRADE_RADIUS, CitySpec};
use crate::model::config::GameConfig;
use crate::model::goods::GoodSpec;
use crate::model::terrain::TerrainType;
use crate::model::wagon::WagonType;

pub fn spawn_good(world: &mut World, spec: &GoodSpec) -> Entity {
    world.spawn((GoodData::from(spec), GoodMarker)).id()
}

pub fn spawn_city(world: &mut World, spec: &CitySpec, world_scale: f32) -> Entity {
    let grid = GridPos::new(spec.grid.0, spec.grid.1);
    world
        .spawn((
            City {
                name: spec.name.to_string(),
                grid,
                world: WorldPos::new(grid.x as f32 * world_scale, grid.y as f32 * world_scale),
                population: spec.population,
                economy: spec.economy,
                trade_radius: CITY_TRADE_RADIUS,
            },
            CityMarker,
        ))
        .id()
}

pub fn spawn_market(world: &mut World, city: Entity, price_multiplier: f32, prices: PriceList) -> Entity {
    world
        .spawn((
            CityMarket {
                city,
                price_multiplier,
                trade_volume: 1.0,
            },
            prices,
            MarketMarker,
        ))
        .id()
}

/// Spawn the player's convoy at `grid` with starting resources from `config`.
/// Wagons are added separately with `spawn_wagon`.
pub fn spawn_player(
    world: &mut World,
    config: &GameConfig,
    grid: GridPos,
    position: WorldPos,
    terrain: TerrainType,
) -> Entity {
    world
        .spawn((
            PlayerConvoy::new(position, config.base_movement_speed, BASE_CONVOY_CAPACITY),
            ConvoyResources::new(
                config.start_gold,
                config.start_food,
                config.start_guards.max(GUARD_FLOOR),
                config.food_consumption_rate,
            ),
            MapPosition {
                grid,
                world: position,
                terrain,
                risk: 0.0,
            },
            TravelState::idle(),
            Inventory::default(),
            PlayerProgress::default(),
            IsPlayer,
        ))
        .id()
}

/// Spawn a wagon owned by `owner` and add its capacity to the owner's convoy.
pub fn spawn_wagon(world: &mut World, owner: Entity, wagon_type: WagonType) -> Entity {
    let wagon = Wagon::new(owner, wagon_type);
    let capacity = wagon.load_capacity;
    let entity = world.spawn((wagon, WagonMarker)).id();
    if let Some(mut convoy) = world.get_mut::<PlayerConvoy>(owner) {
        convoy.total_capacity += capacity;
    }
    entity
}
