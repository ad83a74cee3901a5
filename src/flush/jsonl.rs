use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use bevy_ecs::entity::Entity;
use bevy_ecs::query::With;
use bevy_ecs::world::World;
use serde::Serialize;

use crate::ecs::clock::SimClock;
use crate::ecs::components::{
    City, CityMarket, ConvoyResources, GoodData, Inventory, MapPosition, MarketMarker,
    PlayerConvoy, PlayerProgress, PriceList, Wagon, WagonMarker,
};
use crate::ecs::resources::{EventLog, PlayerHandle};
use crate::ecs::time::SimTime;
use crate::map::{GridPos, WorldPos};
use crate::model::city::EconomyType;
use crate::model::progress::Achievement;
use crate::model::terrain::TerrainType;
use crate::model::wagon::WagonType;

/// Write an iterator of serializable items to a JSONL file (one JSON object per line).
fn write_jsonl<T: Serialize>(path: &Path, items: impl Iterator<Item = T>) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for item in items {
        serde_json::to_writer(&mut writer, &item)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

#[derive(Serialize)]
struct CargoLine {
    good: String,
    quantity: u32,
}

#[derive(Serialize)]
struct WagonLine {
    wagon_type: WagonType,
    health: f32,
    current_load: u32,
    load_capacity: u32,
    is_broken: bool,
}

#[derive(Serialize)]
struct ConvoySnapshot {
    tick: u64,
    time: SimTime,
    position: WorldPos,
    grid: GridPos,
    terrain: TerrainType,
    risk: f32,
    gold: u32,
    food: u32,
    guards: u32,
    morale: f32,
    base_speed: f32,
    speed_modifier: f32,
    used_capacity: u32,
    total_capacity: u32,
    level: u32,
    experience: u32,
    total_distance: f32,
    total_gold_earned: u32,
    total_trades: u32,
    achievements: Vec<Achievement>,
    cargo: Vec<CargoLine>,
    wagons: Vec<WagonLine>,
}

#[derive(Serialize)]
struct PriceLine {
    good: String,
    price: u32,
    supply: f32,
    demand: f32,
}

#[derive(Serialize)]
struct MarketSnapshot {
    city: String,
    economy: EconomyType,
    price_multiplier: f32,
    prices: Vec<PriceLine>,
}

fn good_name(world: &World, good: Entity) -> String {
    world
        .get::<GoodData>(good)
        .map(|data| data.name.clone())
        .unwrap_or_else(|| format!("{good:?}"))
}

fn convoy_snapshot(world: &mut World) -> Option<ConvoySnapshot> {
    let player = world.get_resource::<PlayerHandle>()?.0;
    let clock = world.resource::<SimClock>();
    let (tick, time) = (clock.tick_count, clock.time);

    let mut wagon_query = world.query_filtered::<(Entity, &Wagon), With<WagonMarker>>();
    let world: &World = world;
    let mut owned: Vec<(Entity, &Wagon)> = wagon_query
        .iter(world)
        .filter(|(_, wagon)| wagon.owner == player)
        .collect();
    owned.sort_by_key(|(entity, _)| *entity);
    let wagons = owned
        .into_iter()
        .map(|(_, wagon)| WagonLine {
            wagon_type: wagon.wagon_type,
            health: wagon.health,
            current_load: wagon.current_load,
            load_capacity: wagon.load_capacity,
            is_broken: wagon.is_broken,
        })
        .collect();

    let entity = world.get_entity(player).ok()?;
    let convoy = entity.get::<PlayerConvoy>()?;
    let resources = entity.get::<ConvoyResources>()?;
    let position = entity.get::<MapPosition>()?;
    let progress = entity.get::<PlayerProgress>()?;
    let inventory = entity.get::<Inventory>()?;

    Some(ConvoySnapshot {
        tick,
        time,
        position: position.world,
        grid: position.grid,
        terrain: position.terrain,
        risk: position.risk,
        gold: resources.gold,
        food: resources.food,
        guards: resources.guards,
        morale: resources.morale(),
        base_speed: convoy.base_speed,
        speed_modifier: convoy.speed_modifier,
        used_capacity: convoy.used_capacity,
        total_capacity: convoy.total_capacity,
        level: progress.level,
        experience: progress.experience,
        total_distance: progress.total_distance,
        total_gold_earned: progress.total_gold_earned,
        total_trades: progress.total_trades,
        achievements: Achievement::ALL
            .iter()
            .copied()
            .filter(|a| progress.has(*a))
            .collect(),
        cargo: inventory
            .items
            .iter()
            .map(|item| CargoLine {
                good: good_name(world, item.good),
                quantity: item.quantity,
            })
            .collect(),
        wagons,
    })
}

fn market_snapshots(world: &mut World) -> Vec<MarketSnapshot> {
    let mut query = world.query_filtered::<(Entity, &CityMarket, &PriceList), With<MarketMarker>>();
    let world: &World = world;
    let mut markets: Vec<(Entity, &CityMarket, &PriceList)> = query.iter(world).collect();
    markets.sort_by_key(|(entity, _, _)| *entity);

    markets
        .into_iter()
        .filter_map(|(_, market, prices)| {
            let city = world.get::<City>(market.city)?;
            Some(MarketSnapshot {
                city: city.name.clone(),
                economy: city.economy,
                price_multiplier: market.price_multiplier,
                prices: prices
                    .entries
                    .iter()
                    .map(|entry| PriceLine {
                        good: good_name(world, entry.good),
                        price: entry.price,
                        supply: entry.supply,
                        demand: entry.demand,
                    })
                    .collect(),
            })
        })
        .collect()
}

/// Flush the caravan's history and current state to JSONL files in the given
/// output directory.
///
/// Creates the output directory if it does not exist. Writes 3 files:
/// - `events.jsonl` — one `LogEntry` per line
/// - `convoy.jsonl` — a single snapshot line of the player convoy (empty
///   before the world is built)
/// - `markets.jsonl` — one line per city market with its price list
pub fn flush_to_jsonl(world: &mut World, output_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(output_dir)?;

    match world.get_resource::<EventLog>() {
        Some(log) => write_jsonl(&output_dir.join("events.jsonl"), log.entries.iter())?,
        None => write_jsonl(&output_dir.join("events.jsonl"), std::iter::empty::<()>())?,
    }
    write_jsonl(
        &output_dir.join("convoy.jsonl"),
        convoy_snapshot(world).into_iter(),
    )?;
    write_jsonl(
        &output_dir.join("markets.jsonl"),
        market_snapshots(world).into_iter(),
    )?;

    Ok(())
}
