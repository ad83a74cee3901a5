//! Random events.
//!
//! Events set:
//! 1. `roll_periodic_events` — every 15 s, good-fortune draws with immediate effects
//! 2. `roll_travel_events` — every 5 s on the road, terrain hazards
//! 3. `tick_events` — every tick, ongoing drains, expiry and end effects
//! 4. `tick_road_blocks` — every tick, releases blocked convoys

use bevy_app::{App, Plugin};
use bevy_ecs::entity::Entity;
use bevy_ecs::message::{MessageWriter, Messages};
use bevy_ecs::query::With;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Commands, Query, Res, ResMut};
use rand::Rng;

use crate::ecs::clock::SimClock;
use crate::ecs::commands::CombatEncounter;
use crate::ecs::components::{
    ConvoyResources, GameEvent, IsPlayer, MapPosition, PlayerConvoy, PlayerProgress,
    RoadBlockDelay, TravelState, Wagon, WagonMarker,
};
use crate::ecs::conditions::{every_fifteen_seconds, every_five_seconds, world_ready};
use crate::ecs::events::CaravanEvent;
use crate::ecs::resources::{EventsRng, PlayerHandle};
use crate::ecs::schedule::{DomainSet, SimTick};
use crate::model::config::GameConfig;
use crate::model::event::{EventType, periodic_event_chance};

// ---------------------------------------------------------------------------
// Constants — Severity ranges
// ---------------------------------------------------------------------------

const PERIODIC_SEVERITY_MIN: f32 = 0.3;
const PERIODIC_SEVERITY_MAX: f32 = 1.0;
const TRAVEL_SEVERITY_MIN: f32 = 0.4;
const TRAVEL_SEVERITY_MAX: f32 = 0.8;

// ---------------------------------------------------------------------------
// Constants — Travel hazards
// ---------------------------------------------------------------------------

const BANDITS_PER_SEVERITY: f32 = 5.0;
const BANDIT_POWER_PER_SEVERITY: f32 = 30.0;
const SURPRISE_MIN: f32 = 0.1;
const SURPRISE_MAX: f32 = 0.3;
const STORM_SPEED_PENALTY: f32 = 0.5;
const STORM_MORALE_HIT: f32 = 0.1;
const ROAD_BLOCK_SECS: f32 = 10.0;
/// Floor for the speed modifier after any hazard other than a road block.
const HAZARD_SPEED_FLOOR: f32 = 0.1;

// ---------------------------------------------------------------------------
// Plugin registration
// ---------------------------------------------------------------------------

pub struct EventsPlugin;

impl Plugin for EventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            SimTick,
            (
                roll_periodic_events.run_if(every_fifteen_seconds),
                roll_travel_events.run_if(every_five_seconds),
                tick_events,
                tick_road_blocks,
            )
                .chain()
                .run_if(world_ready)
                .in_set(DomainSet::Events),
        );
    }
}

// ---------------------------------------------------------------------------
// System 1: Periodic events (15 s)
// ---------------------------------------------------------------------------

fn roll_periodic_events(
    mut commands: Commands,
    config: Res<GameConfig>,
    player: Res<PlayerHandle>,
    mut rng: ResMut<EventsRng>,
    mut convoys: Query<(&mut ConvoyResources, &PlayerProgress), With<IsPlayer>>,
    mut events: MessageWriter<CaravanEvent>,
) {
    let Ok((mut resources, progress)) = convoys.get_mut(player.0) else {
        return;
    };
    let rng = &mut rng.0;
    let chance = periodic_event_chance(config.event_chance, progress.total_distance);
    if rng.random_range(0.0..1.0) >= chance {
        return;
    }

    let event_type = EventType::periodic_from_sample(rng.random_range(0.0..1.0));
    let severity = rng.random_range(PERIODIC_SEVERITY_MIN..PERIODIC_SEVERITY_MAX);
    let effect = event_type.immediate_effect(severity);
    resources.gold = resources.gold.saturating_add(effect.gold);
    resources.guards = resources.guards.saturating_add(effect.guards);
    resources.adjust_morale(effect.morale);

    let event = commands
        .spawn(GameEvent::new(event_type, severity, Some(player.0)))
        .id();
    tracing::info!(%event_type, severity, gold = effect.gold, guards = effect.guards, "event started");
    events.write(CaravanEvent::EventStarted {
        event,
        event_type,
        severity,
    });
}

// ---------------------------------------------------------------------------
// System 2: Travel hazards (5 s)
// ---------------------------------------------------------------------------

#[allow(clippy::type_complexity, clippy::too_many_arguments)]
fn roll_travel_events(
    mut commands: Commands,
    player: Res<PlayerHandle>,
    mut rng: ResMut<EventsRng>,
    mut convoys: Query<
        (
            &mut PlayerConvoy,
            &mut ConvoyResources,
            &MapPosition,
            &TravelState,
        ),
        With<IsPlayer>,
    >,
    mut wagons: Query<(Entity, &mut Wagon), With<WagonMarker>>,
    mut delays: Query<&mut RoadBlockDelay>,
    mut encounters: ResMut<Messages<CombatEncounter>>,
    mut events: MessageWriter<CaravanEvent>,
) {
    let Ok((mut convoy, mut resources, position, travel)) = convoys.get_mut(player.0) else {
        return;
    };
    if !travel.is_traveling {
        return;
    }
    let rng = &mut rng.0;
    if rng.random_range(0.0..1.0) >= position.terrain.travel_event_chance() {
        return;
    }

    let event_type = EventType::travel_from_sample(position.terrain, rng.random_range(0.0..1.0));
    let severity = rng.random_range(TRAVEL_SEVERITY_MIN..TRAVEL_SEVERITY_MAX);

    match event_type {
        EventType::BanditAttack => {
            encounters.write(CombatEncounter {
                bandit_count: (BANDITS_PER_SEVERITY * severity) as u32,
                bandit_power: (BANDIT_POWER_PER_SEVERITY * severity) as u32,
                surprise_factor: rng.random_range(SURPRISE_MIN..SURPRISE_MAX),
            });
        }
        EventType::WeatherStorm => {
            convoy.speed_modifier *= 1.0 - severity * STORM_SPEED_PENALTY;
            resources.adjust_morale(-STORM_MORALE_HIT * severity);
        }
        EventType::WagonBreakdown => {
            let owned: Vec<Entity> = wagons
                .iter()
                .filter(|(_, w)| w.owner == player.0)
                .map(|(e, _)| e)
                .collect();
            if !owned.is_empty() {
                let target = owned[rng.random_range(0..owned.len())];
                if let Ok((_, mut wagon)) = wagons.get_mut(target) {
                    let amount = wagon.health * severity;
                    if wagon.damage(amount) {
                        events.write(CaravanEvent::WagonBroken { wagon: target });
                    }
                }
            }
        }
        EventType::RoadBlock => {
            let mut active = delays.iter_mut().find(|delay| delay.player == player.0);
            if let Some(delay) = block_road(player.0, &mut convoy, active.as_deref_mut()) {
                commands.spawn(delay);
            }
        }
        _ => {}
    }
    if event_type != EventType::RoadBlock {
        convoy.speed_modifier = convoy.speed_modifier.max(HAZARD_SPEED_FLOOR);
    }

    let event = commands
        .spawn(GameEvent::new(event_type, severity, Some(player.0)))
        .id();
    tracing::info!(%event_type, severity, terrain = %position.terrain, "travel event");
    events.write(CaravanEvent::EventStarted {
        event,
        event_type,
        severity,
    });
}

/// Halt the convoy. A block already in force is extended and keeps the speed
/// it recorded; otherwise the new delay to spawn is returned.
fn block_road(
    player: Entity,
    convoy: &mut PlayerConvoy,
    active: Option<&mut RoadBlockDelay>,
) -> Option<RoadBlockDelay> {
    let fresh = match active {
        Some(delay) => {
            delay.remaining = ROAD_BLOCK_SECS;
            None
        }
        None => Some(RoadBlockDelay {
            remaining: ROAD_BLOCK_SECS,
            player,
            original_speed: convoy.speed_modifier,
        }),
    };
    convoy.speed_modifier = 0.0;
    fresh
}

// ---------------------------------------------------------------------------
// System 3: Event lifecycle (every tick)
// ---------------------------------------------------------------------------

fn tick_events(
    mut commands: Commands,
    clock: Res<SimClock>,
    mut game_events: Query<(Entity, &mut GameEvent)>,
    mut targets: Query<(&mut PlayerConvoy, &mut ConvoyResources)>,
    mut events: MessageWriter<CaravanEvent>,
) {
    let dt = clock.dt();
    for (entity, mut event) in &mut game_events {
        let target = event.target.and_then(|t| targets.get_mut(t).ok());
        let drain = event.event_type.morale_drain_per_sec(event.severity);
        let expired = event.remaining - dt <= 0.0;

        if let Some((mut convoy, mut resources)) = target {
            if drain > 0.0 {
                resources.adjust_morale(-drain * dt);
            }
            if expired && event.event_type == EventType::WeatherStorm {
                convoy.speed_modifier = 1.0;
            }
        }

        event.remaining -= dt;
        event.processed = true;
        if expired {
            tracing::debug!(event_type = %event.event_type, "event ended");
            events.write(CaravanEvent::EventEnded {
                event_type: event.event_type,
            });
            commands.entity(entity).despawn();
        }
    }
}

// ---------------------------------------------------------------------------
// System 4: Road blocks (every tick)
// ---------------------------------------------------------------------------

fn tick_road_blocks(
    mut commands: Commands,
    clock: Res<SimClock>,
    mut delays: Query<(Entity, &mut RoadBlockDelay)>,
    mut convoys: Query<&mut PlayerConvoy>,
    mut events: MessageWriter<CaravanEvent>,
) {
    let dt = clock.dt();
    for (entity, mut delay) in &mut delays {
        delay.remaining -= dt;
        let Ok(mut convoy) = convoys.get_mut(delay.player) else {
            commands.entity(entity).despawn();
            continue;
        };
        if delay.remaining > 0.0 {
            // a storm ending mid-block must not lift the block
            convoy.speed_modifier = 0.0;
            continue;
        }
        convoy.speed_modifier = delay.original_speed;
        tracing::info!("road block cleared");
        events.write(CaravanEvent::RoadCleared);
        commands.entity(entity).despawn();
    }
}
