mod common;

use bevy_ecs::message::Messages;
use caravan_sim::ecs::components::{GUARD_FLOOR, MORALE_MAX, MORALE_MIN};
use caravan_sim::ecs::{
    CaravanEvent, CommandKind, ConvoyResources, EventLog, PlayerConvoy, RecruitmentAction, RejectReason,
    TravelCommand, TravelState, build_sim_app_deterministic, install_game_config, submit,
};
use caravan_sim::map::{GridPos, TerrainGrid};
use caravan_sim::model::GameConfig;
use caravan_sim::CaravanPlugin;
use common::*;

fn travel_to_cell(app: &mut bevy_app::App, cell: GridPos) {
    let destination = app.world().resource::<TerrainGrid>().grid_to_world(cell);
    assert!(submit(
        app.world_mut(),
        TravelCommand {
            destination,
            plan: None,
        }
    ));
}

#[test]
fn starvation_spiral_keeps_floors() {
    let mut app = caravan_app_with(5, quiet_config());
    let player = player(&app);
    app.world_mut().get_mut::<ConvoyResources>(player).unwrap().food = 0;
    travel_to_cell(&mut app, GridPos::new(90, 90));
    tick_seconds(&mut app, 100);

    let res = app.world().get::<ConvoyResources>(player).unwrap();
    assert!(res.morale() < 0.5);
    assert!(res.morale() >= MORALE_MIN);
    assert!(res.guards >= GUARD_FLOOR);
    let convoy = app.world().get::<PlayerConvoy>(player).unwrap();
    assert!(convoy.speed_modifier >= 0.3);
    assert!(convoy.speed_modifier < 1.0);
}

#[test]
fn morale_and_guards_stay_in_range_with_events_on() {
    let mut app = caravan_app(6);
    let player = player(&app);
    travel_to_cell(&mut app, GridPos::new(80, 20));
    for _ in 0..60 {
        tick_seconds(&mut app, 10);
        let res = app.world().get::<ConvoyResources>(player).unwrap();
        assert!((MORALE_MIN..=MORALE_MAX).contains(&res.morale()));
        assert!(res.guards >= GUARD_FLOOR);
    }
}

#[test]
fn quiet_config_keeps_an_idle_convoy_eventless() {
    let mut app = caravan_app_with(9, quiet_config());
    tick_seconds(&mut app, 120);
    let log = app.world().resource::<EventLog>();
    assert_eq!(log.count_kind("event_started"), 0);
    assert!(log.count_kind("payroll_paid") >= 3);
}

#[test]
fn second_travel_command_is_rejected() {
    let mut app = caravan_app_with(7, quiet_config());
    let player = player(&app);
    travel_to_cell(&mut app, GridPos::new(50, 50));
    tick(&mut app);
    travel_to_cell(&mut app, GridPos::new(0, 0));
    tick(&mut app);

    let rejected = recent_events(&app).into_iter().any(|e| {
        e == CaravanEvent::CommandRejected {
            command: CommandKind::Travel,
            reason: RejectReason::AlreadyTraveling,
        }
    });
    assert!(rejected);
    let travel = app.world().get::<TravelState>(player).unwrap();
    let target = app
        .world()
        .resource::<TerrainGrid>()
        .grid_to_world(GridPos::new(50, 50));
    assert_eq!(travel.destination, target);
}

#[test]
fn commands_wait_until_the_world_exists() {
    let mut app = build_sim_app_deterministic(8);
    app.add_plugins(CaravanPlugin);
    submit(app.world_mut(), RecruitmentAction::Hire { count: 1 });
    tick_n(&mut app, 5);
    assert_eq!(
        app.world()
            .resource::<Messages<RecruitmentAction>>()
            .len(),
        1
    );

    assert!(install_game_config(&mut app, GameConfig::default()));
    tick(&mut app);
    let res = app.world().get::<ConvoyResources>(player(&app)).unwrap();
    assert_eq!(res.guards, 6);
    assert_eq!(res.gold, 975);
}
