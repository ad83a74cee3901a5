//! Movement & travel.
//!
//! Commands set:
//! 1. `start_travel` — drains `TravelCommand`s into `TravelState`
//!
//! Movement set (every tick):
//! 2. `advance_convoy` — food, starvation, speed, interpolation, arrival,
//!    terrain and risk refresh, distance statistics

use bevy_app::{App, Plugin};
use bevy_ecs::entity::Entity;
use bevy_ecs::message::{MessageWriter, Messages};
use bevy_ecs::query::With;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Query, Res, ResMut};
use rand::Rng;

use crate::ecs::clock::SimClock;
use crate::ecs::commands::TravelCommand;
use crate::ecs::components::{
    City, CityMarker, ConvoyResources, IsPlayer, MapPosition, PlayerConvoy, PlayerProgress,
    RoadBlockDelay, TravelState,
};
use crate::ecs::conditions::world_ready;
use crate::ecs::events::{CaravanEvent, CommandKind, RejectReason};
use crate::ecs::resources::{MovementRng, PlayerHandle};
use crate::ecs::schedule::{CommandSet, DomainSet, SimTick};
use crate::map::{GridPos, TerrainGrid};
use crate::model::config::GameConfig;
use crate::model::progress::EXP_PER_DISTANCE_UNIT;
use crate::model::terrain::travel_risk;

// ---------------------------------------------------------------------------
// Constants — Food & starvation
// ---------------------------------------------------------------------------

const SPEED_RECOVERY_PER_SEC: f32 = 0.1;
const STARVATION_MORALE_PER_SEC: f32 = 0.05;
const STARVATION_SPEED_PER_SEC: f32 = 0.1;
const STARVATION_SPEED_FLOOR: f32 = 0.3;
const DESERTION_MORALE_THRESHOLD: f32 = 0.3;
const DESERTION_CHANCE_PER_SEC: f32 = 0.01;

// ---------------------------------------------------------------------------
// Constants — Travel
// ---------------------------------------------------------------------------

const MIN_TRAVEL_TIME_DIVISOR: f32 = 1.0;
const MIN_MOVE_SPEED: f32 = 0.1;
/// Distance credited to the travel statistics per second on the road.
const DISTANCE_PER_SEC: f32 = 5.0;

// ---------------------------------------------------------------------------
// Plugin registration
// ---------------------------------------------------------------------------

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            SimTick,
            start_travel.run_if(world_ready).in_set(CommandSet::Travel),
        );
        app.add_systems(
            SimTick,
            advance_convoy.run_if(world_ready).in_set(DomainSet::Movement),
        );
    }
}

// ---------------------------------------------------------------------------
// System 1: Travel commands
// ---------------------------------------------------------------------------

fn start_travel(
    mut queue: ResMut<Messages<TravelCommand>>,
    player: Res<PlayerHandle>,
    mut convoys: Query<(&PlayerConvoy, &MapPosition, &mut TravelState), With<IsPlayer>>,
    mut events: MessageWriter<CaravanEvent>,
) {
    for command in queue.drain() {
        let Ok((convoy, position, mut travel)) = convoys.get_mut(player.0) else {
            continue;
        };
        if travel.is_traveling {
            tracing::warn!("travel command ignored: already on the road");
            events.write(CaravanEvent::CommandRejected {
                command: CommandKind::Travel,
                reason: RejectReason::AlreadyTraveling,
            });
            continue;
        }

        let start = position.world;
        let distance = start.distance(command.destination);
        *travel = TravelState {
            is_traveling: true,
            progress: 0.0,
            total_travel_time: distance / convoy.move_speed.max(MIN_MOVE_SPEED),
            destination_reached: false,
            start,
            destination: command.destination,
            waypoints: command.plan.map(|plan| plan.waypoints).unwrap_or_default(),
        };

        tracing::info!(
            distance,
            travel_time = travel.total_travel_time,
            "travel started"
        );
        events.write(CaravanEvent::TravelStarted {
            destination: command.destination,
            distance,
        });
    }
}

// ---------------------------------------------------------------------------
// System 2: Per-tick movement
// ---------------------------------------------------------------------------

#[allow(clippy::type_complexity, clippy::too_many_arguments)]
fn advance_convoy(
    clock: Res<SimClock>,
    config: Res<GameConfig>,
    grid: Res<TerrainGrid>,
    player: Res<PlayerHandle>,
    mut rng: ResMut<MovementRng>,
    mut convoys: Query<
        (
            &mut PlayerConvoy,
            &mut ConvoyResources,
            &mut MapPosition,
            &mut TravelState,
            &mut PlayerProgress,
        ),
        With<IsPlayer>,
    >,
    cities: Query<(Entity, &City), With<CityMarker>>,
    road_blocks: Query<&RoadBlockDelay>,
    mut events: MessageWriter<CaravanEvent>,
) {
    let Ok((mut convoy, mut resources, mut position, mut travel, mut progress)) =
        convoys.get_mut(player.0)
    else {
        return;
    };
    let dt = clock.dt();
    let mut arrived = false;
    let blocked = road_blocks.iter().any(|block| block.player == player.0);

    if travel.is_traveling {
        consume_food(&mut convoy, &mut resources, dt, !blocked);
        if resources.food == 0 && starve(&mut convoy, &mut resources, dt, &mut rng.0) {
            tracing::warn!(guards = resources.guards, "a starving guard deserted");
            events.write(CaravanEvent::GuardDeserted {
                remaining: resources.guards,
            });
        }

        let effective_speed = convoy.base_speed
            * position.terrain.speed_modifier()
            * convoy.speed_modifier
            * convoy.overload_factor;
        convoy.move_speed = effective_speed;
        travel.progress +=
            effective_speed * dt / travel.total_travel_time.max(MIN_TRAVEL_TIME_DIVISOR);

        if travel.progress < 1.0 {
            position.world = travel.start.lerp(travel.destination, travel.progress);
        } else {
            travel.progress = 1.0;
            travel.is_traveling = false;
            travel.destination_reached = true;
            travel.waypoints.clear();
            position.world = travel.destination;
            arrived = true;
        }

        record_distance(&mut progress, dt);
    }

    convoy.position = position.world;
    position.grid = grid.world_to_grid(position.world);
    if let Some(terrain) = grid.terrain_at(position.grid) {
        position.terrain = terrain;
    }
    let danger = config.terrain(position.terrain).danger_level;
    position.risk = travel_risk(danger, resources.guards, resources.morale());

    if arrived {
        let city = nearest_city_in_range(position.grid, &cities);
        tracing::info!(
            x = position.world.x,
            z = position.world.z,
            at_city = city.is_some(),
            "arrived"
        );
        events.write(CaravanEvent::Arrived { city });
    }
}

/// Eat for `dt` seconds. Fractions carry over in `food_debt` until they add
/// up to a whole unit. A fed convoy slowly sheds speed penalties unless the
/// road ahead is blocked.
fn consume_food(convoy: &mut PlayerConvoy, resources: &mut ConvoyResources, dt: f32, recover: bool) {
    if resources.food == 0 {
        return;
    }
    resources.eat(resources.food_consumption_rate * dt);
    if recover && convoy.speed_modifier < 1.0 {
        convoy.speed_modifier = (convoy.speed_modifier + SPEED_RECOVERY_PER_SEC * dt).min(1.0);
    }
}

/// Apply one tick of starvation. Returns true if a guard deserted.
fn starve(
    convoy: &mut PlayerConvoy,
    resources: &mut ConvoyResources,
    dt: f32,
    rng: &mut impl Rng,
) -> bool {
    resources.adjust_morale(-STARVATION_MORALE_PER_SEC * dt);
    convoy.speed_modifier =
        (convoy.speed_modifier - STARVATION_SPEED_PER_SEC * dt).max(STARVATION_SPEED_FLOOR);
    if resources.morale() <= DESERTION_MORALE_THRESHOLD
        && rng.random_range(0.0..1.0) < DESERTION_CHANCE_PER_SEC * dt
    {
        return resources.lose_guards(1) > 0;
    }
    false
}

fn record_distance(progress: &mut PlayerProgress, dt: f32) {
    let travelled = DISTANCE_PER_SEC * dt;
    progress.total_distance += travelled;
    progress.distance_carry += travelled;
    let whole = progress.distance_carry.floor();
    if whole >= 1.0 {
        progress.experience += (whole * EXP_PER_DISTANCE_UNIT) as u32;
        progress.distance_carry -= whole;
    }
}

fn nearest_city_in_range(
    at: GridPos,
    cities: &Query<(Entity, &City), With<CityMarker>>,
) -> Option<Entity> {
    cities
        .iter()
        .map(|(entity, city)| (entity, city.grid.euclidean(at), city.trade_radius))
        .filter(|&(_, distance, radius)| distance <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entity, _, _)| entity)
}

#[cfg(test)]
mod tests {
    use bevy_ecs::message::Messages;
    use rand::SeedableRng;

    use super::*;
    use crate::ecs::app::build_sim_app_deterministic;
    use crate::ecs::commands::submit;
    use crate::ecs::test_helpers::{spawn_test_convoy, tick_n, tick_seconds};
    use crate::map::WorldPos;
    use crate::model::terrain::TerrainType;

    fn setup_app(terrain: TerrainType) -> (App, Entity) {
        let mut app = build_sim_app_deterministic(42);
        app.add_plugins(MovementPlugin);
        let player = spawn_test_convoy(&mut app, terrain);
        (app, player)
    }

    fn travel_to(app: &mut App, x: f32, z: f32) {
        assert!(submit(
            app.world_mut(),
            TravelCommand {
                destination: WorldPos::new(x, z),
                plan: None,
            }
        ));
    }

    #[test]
    fn travel_command_starts_journey() {
        let (mut app, player) = setup_app(TerrainType::Plains);
        travel_to(&mut app, 200.0, 100.0);
        tick_n(&mut app, 1);

        let travel = app.world().get::<TravelState>(player).unwrap();
        assert!(travel.is_traveling);
        assert!(!travel.destination_reached);
        assert_eq!(travel.start, WorldPos::new(100.0, 100.0));
        assert_eq!(travel.total_travel_time, 20.0);
        assert!(travel.progress > 0.0);
    }

    #[test]
    fn second_travel_command_is_rejected_while_moving() {
        let (mut app, player) = setup_app(TerrainType::Plains);
        travel_to(&mut app, 200.0, 100.0);
        tick_n(&mut app, 1);
        travel_to(&mut app, 0.0, 0.0);
        tick_n(&mut app, 1);

        let travel = app.world().get::<TravelState>(player).unwrap();
        assert_eq!(travel.destination, WorldPos::new(200.0, 100.0));
        assert!(app.world().resource::<Messages<TravelCommand>>().is_empty());
    }

    #[test]
    fn arrival_snaps_to_destination() {
        let (mut app, player) = setup_app(TerrainType::Plains);
        travel_to(&mut app, 200.0, 100.0);
        tick_seconds(&mut app, 10);

        let travel = app.world().get::<TravelState>(player).unwrap();
        assert!(!travel.is_traveling);
        assert!(travel.destination_reached);
        assert_eq!(travel.progress, 1.0);
        let pos = app.world().get::<MapPosition>(player).unwrap();
        assert_eq!(pos.world, WorldPos::new(200.0, 100.0));
        assert_eq!(pos.grid, GridPos::new(20, 10));
    }

    #[test]
    fn road_is_faster_than_plains() {
        let (mut road, road_player) = setup_app(TerrainType::Road);
        let (mut plains, plains_player) = setup_app(TerrainType::Plains);
        travel_to(&mut road, 900.0, 100.0);
        travel_to(&mut plains, 900.0, 100.0);
        tick_seconds(&mut road, 5);
        tick_seconds(&mut plains, 5);

        let road_progress = road.world().get::<TravelState>(road_player).unwrap().progress;
        let plains_progress = plains.world().get::<TravelState>(plains_player).unwrap().progress;
        assert!(road_progress > plains_progress);
    }

    #[test]
    fn food_is_consumed_only_while_traveling() {
        let (mut app, player) = setup_app(TerrainType::Plains);
        tick_seconds(&mut app, 2);
        assert_eq!(app.world().get::<ConvoyResources>(player).unwrap().food, 100);

        travel_to(&mut app, 900.0, 100.0);
        tick_seconds(&mut app, 2);
        assert!(app.world().get::<ConvoyResources>(player).unwrap().food < 100);
    }

    #[test]
    fn one_second_on_the_road_eats_the_configured_rate() {
        let (mut app, player) = setup_app(TerrainType::Plains);
        travel_to(&mut app, 900.0, 100.0);
        tick_seconds(&mut app, 1);
        // 2 food per second
        assert_eq!(app.world().get::<ConvoyResources>(player).unwrap().food, 98);

        tick_seconds(&mut app, 10);
        assert_eq!(app.world().get::<ConvoyResources>(player).unwrap().food, 78);
    }

    #[test]
    fn starvation_lowers_morale_and_speed() {
        let (mut app, player) = setup_app(TerrainType::Plains);
        app.world_mut().get_mut::<ConvoyResources>(player).unwrap().food = 0;
        travel_to(&mut app, 900.0, 900.0);
        tick_seconds(&mut app, 10);

        let res = app.world().get::<ConvoyResources>(player).unwrap();
        assert!(res.morale() < 1.0);
        assert!(res.guards >= 1);
        let convoy = app.world().get::<PlayerConvoy>(player).unwrap();
        assert!(convoy.speed_modifier < 1.0);
        assert!(convoy.speed_modifier >= STARVATION_SPEED_FLOOR);
    }

    #[test]
    fn distance_feeds_statistics_and_experience() {
        let (mut app, player) = setup_app(TerrainType::Plains);
        travel_to(&mut app, 900.0, 900.0);
        tick_seconds(&mut app, 4);

        let progress = app.world().get::<PlayerProgress>(player).unwrap();
        assert!((progress.total_distance - 20.0).abs() < 0.01);
        assert!(progress.experience >= 19);
        assert!(progress.distance_carry < 1.0);
    }

    #[test]
    fn risk_is_refreshed_from_terrain() {
        let (mut app, player) = setup_app(TerrainType::Mountains);
        tick_n(&mut app, 1);
        let pos = app.world().get::<MapPosition>(player).unwrap();
        // 0.8 danger, 5 guards (0.75), morale 1.0
        assert!((pos.risk - 0.6).abs() < 1e-5);
    }

    #[test]
    fn starve_respects_guard_floor() {
        let mut convoy = PlayerConvoy::new(WorldPos::default(), 5.0, 100);
        let mut res = ConvoyResources::new(0, 0, 1, 2.0);
        res.set_morale(0.1);
        let mut rng = rand::rngs::SmallRng::seed_from_u64(1);
        for _ in 0..100_000 {
            starve(&mut convoy, &mut res, 1.0, &mut rng);
        }
        assert_eq!(res.guards, 1);
        assert_eq!(convoy.speed_modifier, STARVATION_SPEED_FLOOR);
        assert_eq!(res.morale(), 0.1);
    }

    #[test]
    fn road_block_holds_convoy_in_place() {
        let (mut app, player) = setup_app(TerrainType::Plains);
        travel_to(&mut app, 900.0, 100.0);
        tick_n(&mut app, 1);
        {
            let world = app.world_mut();
            world.get_mut::<PlayerConvoy>(player).unwrap().speed_modifier = 0.0;
            world.spawn(RoadBlockDelay {
                remaining: 10.0,
                player,
                original_speed: 1.0,
            });
        }
        let before = app.world().get::<TravelState>(player).unwrap().progress;
        tick_seconds(&mut app, 5);
        let travel = app.world().get::<TravelState>(player).unwrap();
        assert_eq!(travel.progress, before);
        assert_eq!(app.world().get::<PlayerConvoy>(player).unwrap().speed_modifier, 0.0);
    }
}
