//! Experience, levels, achievements and the history log.
//!
//! Progression set (every tick):
//! 1. `check_level_up` — chained level-ups with their rewards
//! 2. `check_achievements` — one-way achievement flags
//!
//! Reactions phase:
//! 3. `award_event_experience` — experience for completed trades and won fights
//! 4. `record_history` — appends every `CaravanEvent` to the `EventLog`

use bevy_app::{App, Plugin};
use bevy_ecs::message::{MessageReader, MessageWriter};
use bevy_ecs::query::With;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Query, Res, ResMut};

use crate::ecs::clock::SimClock;
use crate::ecs::components::{ConvoyResources, IsPlayer, PlayerConvoy, PlayerProgress};
use crate::ecs::conditions::world_ready;
use crate::ecs::events::CaravanEvent;
use crate::ecs::resources::{EventLog, PlayerHandle};
use crate::ecs::schedule::{DomainSet, SimPhase, SimTick};
use crate::model::config::GameConfig;
use crate::model::progress::{
    Achievement, EXP_PER_COMBAT_VICTORY, EXP_PER_TRADE, LEVEL_GOLD_REWARD, LEVEL_MORALE_REWARD,
    LEVEL_SPEED_REWARD, exp_for_next_level,
};

// ---------------------------------------------------------------------------
// Plugin registration
// ---------------------------------------------------------------------------

pub struct ProgressionPlugin;

impl Plugin for ProgressionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            SimTick,
            (check_level_up, check_achievements)
                .chain()
                .run_if(world_ready)
                .in_set(DomainSet::Progression),
        );
        app.add_systems(
            SimTick,
            (award_event_experience.run_if(world_ready), record_history)
                .chain()
                .in_set(SimPhase::Reactions),
        );
    }
}

// ---------------------------------------------------------------------------
// System 1: Level-ups
// ---------------------------------------------------------------------------

fn check_level_up(
    config: Res<GameConfig>,
    player: Res<PlayerHandle>,
    mut convoys: Query<
        (&mut PlayerProgress, &mut ConvoyResources, &mut PlayerConvoy),
        With<IsPlayer>,
    >,
    mut events: MessageWriter<CaravanEvent>,
) {
    let Ok((mut progress, mut resources, mut convoy)) = convoys.get_mut(player.0) else {
        return;
    };
    let exp_per_level = config.exp_per_level.max(1);

    while progress.experience >= exp_for_next_level(progress.level, exp_per_level) {
        progress.experience = 0;
        progress.level += 1;
        let level = progress.level;

        resources.gold = resources
            .gold
            .saturating_add(level.saturating_mul(LEVEL_GOLD_REWARD));
        resources.adjust_morale(LEVEL_MORALE_REWARD);
        convoy.base_speed += LEVEL_SPEED_REWARD;

        tracing::info!(level, gold = resources.gold, base_speed = convoy.base_speed, "level up");
        events.write(CaravanEvent::LevelUp { level });
    }
}

// ---------------------------------------------------------------------------
// System 2: Achievements
// ---------------------------------------------------------------------------

fn check_achievements(
    player: Res<PlayerHandle>,
    mut progress: Query<&mut PlayerProgress, With<IsPlayer>>,
    mut events: MessageWriter<CaravanEvent>,
) {
    let Ok(mut progress) = progress.get_mut(player.0) else {
        return;
    };
    let totals = progress.totals();
    for &achievement in Achievement::ALL {
        if progress.has(achievement) || !achievement.is_earned(&totals) {
            continue;
        }
        progress.grant(achievement);
        tracing::info!(%achievement, "achievement unlocked");
        events.write(CaravanEvent::AchievementUnlocked { achievement });
    }
}

// ---------------------------------------------------------------------------
// System 3: Experience from outcomes (Reactions)
// ---------------------------------------------------------------------------

fn award_event_experience(
    player: Res<PlayerHandle>,
    mut reader: MessageReader<CaravanEvent>,
    mut progress: Query<&mut PlayerProgress, With<IsPlayer>>,
) {
    let gained: u32 = reader
        .read()
        .map(|event| match event {
            CaravanEvent::TradeCompleted { .. } => EXP_PER_TRADE,
            CaravanEvent::CombatResolved { result } if result.victory => EXP_PER_COMBAT_VICTORY,
            _ => 0,
        })
        .sum();
    if gained == 0 {
        return;
    }
    if let Ok(mut progress) = progress.get_mut(player.0) {
        progress.experience = progress.experience.saturating_add(gained);
    }
}

// ---------------------------------------------------------------------------
// System 4: History (Reactions)
// ---------------------------------------------------------------------------

fn record_history(
    clock: Res<SimClock>,
    mut reader: MessageReader<CaravanEvent>,
    mut log: ResMut<EventLog>,
) {
    for event in reader.read() {
        log.push(clock.tick_count, clock.time, event.kind(), event.describe());
    }
}

#[cfg(test)]
mod tests {
    use bevy_ecs::entity::Entity;
    use bevy_ecs::message::Messages;

    use super::*;
    use crate::ecs::app::build_sim_app_deterministic;
    use crate::ecs::test_helpers::{recent_events, spawn_test_convoy, tick_n};
    use crate::model::terrain::TerrainType;

    fn setup_app() -> (App, Entity) {
        let mut app = build_sim_app_deterministic(42);
        app.add_plugins(ProgressionPlugin);
        let player = spawn_test_convoy(&mut app, TerrainType::Road);
        (app, player)
    }

    fn emit(app: &mut App, event: CaravanEvent) {
        app.world_mut()
            .resource_mut::<Messages<CaravanEvent>>()
            .write(event);
    }

    #[test]
    fn level_up_resets_experience_and_pays_out() {
        let (mut app, player) = setup_app();
        app.world_mut().get_mut::<PlayerProgress>(player).unwrap().experience = 100;
        app.world_mut()
            .get_mut::<ConvoyResources>(player)
            .unwrap()
            .set_morale(0.5);
        tick_n(&mut app, 1);

        let progress = app.world().get::<PlayerProgress>(player).unwrap();
        assert_eq!(progress.level, 2);
        assert_eq!(progress.experience, 0);
        let res = app.world().get::<ConvoyResources>(player).unwrap();
        assert_eq!(res.gold, 1200);
        assert!((res.morale() - 0.6).abs() < 1e-5);
        assert_eq!(app.world().get::<PlayerConvoy>(player).unwrap().base_speed, 5.5);
    }

    #[test]
    fn just_below_threshold_does_not_level() {
        let (mut app, player) = setup_app();
        app.world_mut().get_mut::<PlayerProgress>(player).unwrap().experience = 99;
        tick_n(&mut app, 1);
        assert_eq!(app.world().get::<PlayerProgress>(player).unwrap().level, 1);
    }

    #[test]
    fn achievements_are_granted_once() {
        let (mut app, player) = setup_app();
        app.world_mut()
            .get_mut::<PlayerProgress>(player)
            .unwrap()
            .total_gold_earned = 1000;
        tick_n(&mut app, 1);
        assert!(
            app.world()
                .get::<PlayerProgress>(player)
                .unwrap()
                .has(Achievement::FirstThousand)
        );
        let unlocked = |app: &App| {
            recent_events(app)
                .iter()
                .filter(|e| matches!(e, CaravanEvent::AchievementUnlocked { .. }))
                .count()
        };
        assert_eq!(unlocked(&app), 1);

        tick_n(&mut app, 3);
        assert_eq!(unlocked(&app), 0);
        assert_eq!(
            app.world().resource::<EventLog>().count_kind("achievement_unlocked"),
            1
        );
    }

    #[test]
    fn trades_and_victories_grant_experience() {
        let (mut app, player) = setup_app();
        let good = app.world_mut().spawn_empty().id();
        emit(
            &mut app,
            CaravanEvent::TradeCompleted {
                good,
                quantity: 1,
                total_price: 10,
                is_buy: true,
            },
        );
        tick_n(&mut app, 1);
        assert_eq!(app.world().get::<PlayerProgress>(player).unwrap().experience, EXP_PER_TRADE);
    }

    #[test]
    fn every_event_lands_in_the_log() {
        let (mut app, _) = setup_app();
        emit(&mut app, CaravanEvent::RoadCleared);
        emit(&mut app, CaravanEvent::PayrollMissed { owed: 10 });
        tick_n(&mut app, 2);

        let log = app.world().resource::<EventLog>();
        assert_eq!(log.entries.len(), 2);
        assert_eq!(log.entries[0].kind, "road_cleared");
        assert_eq!(log.entries[1].kind, "payroll_missed");
        assert_eq!(log.entries[0].tick, 0);
    }
}
