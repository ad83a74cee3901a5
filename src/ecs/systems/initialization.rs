//! One-shot world construction.
//!
//! `initialize_world` runs in `SimPhase::PreUpdate` on the first tick where a
//! `GameConfig` is present and no `PlayerHandle` exists yet. It builds the
//! terrain grid, the goods catalog, the six cities with their markets, and the
//! player convoy with a starter cart. `PlayerHandle` is inserted last, which
//! opens the `world_ready` gate for every domain system in the same tick.

use bevy_ecs::entity::Entity;
use bevy_ecs::message::Messages;
use bevy_ecs::world::World;
use rand::Rng;

use crate::ecs::components::{MarketPrice, PriceList};
use crate::ecs::events::CaravanEvent;
use crate::ecs::resources::{GoodsCatalog, PlayerHandle, SimRng};
use crate::ecs::spawn;
use crate::map::{GridPos, TerrainGrid};
use crate::model::city::{CITIES, EconomyType};
use crate::model::config::GameConfig;
use crate::model::goods::{GOODS, GoodSpec};
use crate::model::terrain::TerrainType;
use crate::model::wagon::WagonType;

// ---------------------------------------------------------------------------
// Constants — Initial market rolls
// ---------------------------------------------------------------------------

const PRICE_JITTER_MIN: f32 = 0.8;
const PRICE_JITTER_MAX: f32 = 1.2;
const INITIAL_PRESSURE_MIN: f32 = 0.5;
const INITIAL_PRESSURE_MAX: f32 = 1.5;

/// Grid cell the convoy starts on (Starting Town).
const PLAYER_START: GridPos = GridPos::new(10, 10);

pub fn initialize_world(world: &mut World) {
    let Some(config) = world.get_resource::<GameConfig>().cloned() else {
        return;
    };

    let mut grid = TerrainGrid::generate(&config);
    for city in &CITIES {
        grid.set(GridPos::new(city.grid.0, city.grid.1), TerrainType::Road, &config);
    }

    let mut catalog = GoodsCatalog::default();
    let mut goods: Vec<(Entity, &GoodSpec)> = Vec::with_capacity(GOODS.len());
    for spec in &GOODS {
        let entity = spawn::spawn_good(world, spec);
        catalog.insert(spec.name, entity);
        goods.push((entity, spec));
    }

    for spec in &CITIES {
        let city = spawn::spawn_city(world, spec, grid.world_scale());
        let prices = {
            let mut sim_rng = world.resource_mut::<SimRng>();
            roll_price_list(&mut sim_rng.rng, spec.economy, &goods, &config)
        };
        spawn::spawn_market(world, city, spec.economy.price_multiplier(), prices);
    }

    let terrain = grid.terrain_at(PLAYER_START).unwrap_or_default();
    let position = grid.grid_to_world(PLAYER_START);
    let player = spawn::spawn_player(world, &config, PLAYER_START, position, terrain);
    spawn::spawn_wagon(world, player, WagonType::BasicCart);

    world.insert_resource(grid);
    world.insert_resource(catalog);
    world.insert_resource(PlayerHandle(player));
    world
        .resource_mut::<Messages<CaravanEvent>>()
        .write(CaravanEvent::WorldInitialized { player });

    tracing::info!(
        cities = CITIES.len(),
        goods = GOODS.len(),
        gold = config.start_gold,
        seed = config.map.seed,
        "world initialized"
    );
}

/// Opening prices: base value shifted by the city's economy, then jittered.
fn roll_price_list(
    rng: &mut impl Rng,
    economy: EconomyType,
    goods: &[(Entity, &GoodSpec)],
    config: &GameConfig,
) -> PriceList {
    let entries = goods
        .iter()
        .map(|&(good, spec)| {
            let jitter = rng.random_range(PRICE_JITTER_MIN..PRICE_JITTER_MAX);
            let raw = spec.base_value as f32
                * economy.category_modifier(spec.category)
                * config.base_price_multiplier
                * jitter;
            MarketPrice {
                good,
                price: (raw.round() as u32).max(1),
                supply: rng.random_range(INITIAL_PRESSURE_MIN..INITIAL_PRESSURE_MAX),
                demand: rng.random_range(INITIAL_PRESSURE_MIN..INITIAL_PRESSURE_MAX),
            }
        })
        .collect();
    PriceList { entries }
}
