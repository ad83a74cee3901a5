mod common;

use bevy_ecs::entity::Entity;
use bevy_ecs::query::With;
use caravan_sim::ecs::components::WagonMarker;
use caravan_sim::ecs::{
    ConvoyResources, MapPosition, PlayerConvoy, Wagon, WagonPurchase, WagonRepair, submit,
};
use caravan_sim::map::{GridPos, TerrainGrid};
use caravan_sim::model::{TerrainType, WagonType};
use common::*;

fn fleet(app: &mut bevy_app::App) -> Vec<(Entity, Wagon)> {
    let player = player(app);
    let world = app.world_mut();
    let mut query = world.query_filtered::<(Entity, &Wagon), With<WagonMarker>>();
    let mut wagons: Vec<(Entity, Wagon)> = query
        .iter(world)
        .filter(|(_, w)| w.owner == player)
        .map(|(e, w)| (e, w.clone()))
        .collect();
    wagons.sort_by_key(|(e, _)| *e);
    wagons
}

#[test]
fn wear_is_monotonic_without_repairs() {
    let mut app = caravan_app(31);
    let destination = app
        .world()
        .resource::<TerrainGrid>()
        .grid_to_world(GridPos::new(70, 30));
    submit(
        app.world_mut(),
        caravan_sim::ecs::TravelCommand {
            destination,
            plan: None,
        },
    );

    let mut last = 100.0;
    for _ in 0..30 {
        tick_seconds(&mut app, 10);
        let health = fleet(&mut app)[0].1.health;
        assert!(health <= last);
        assert!(health >= 0.0);
        last = health;
    }
    assert!(last < 100.0);
}

#[test]
fn mountain_wear_breaks_the_cart() {
    let mut app = caravan_app_with(32, quiet_config());
    let player = player(&app);
    {
        let config = quiet_config();
        let mut grid = app.world_mut().resource_mut::<TerrainGrid>();
        grid.set(GridPos::new(10, 10), TerrainType::Mountains, &config);
    }
    tick(&mut app);
    assert_eq!(
        app.world().get::<MapPosition>(player).unwrap().terrain,
        TerrainType::Mountains
    );
    // 0.1 base wear doubled in the mountains
    tick_seconds(&mut app, 510);
    let (_, cart) = fleet(&mut app)[0].clone();
    assert!(cart.is_broken);
    assert_eq!(cart.health, 0.0);
}

#[test]
fn repair_and_purchase_spend_gold() {
    let mut app = caravan_app_with(33, quiet_config());
    let player = player(&app);
    let (cart, _) = fleet(&mut app)[0].clone();
    {
        let mut wagon = app.world_mut().get_mut::<Wagon>(cart).unwrap();
        wagon.health = 0.0;
        wagon.is_broken = true;
    }
    submit(app.world_mut(), WagonRepair { wagon: None });
    submit(
        app.world_mut(),
        WagonPurchase {
            wagon_type: WagonType::TradeWagon,
        },
    );
    tick(&mut app);

    let wagons = fleet(&mut app);
    assert_eq!(wagons.len(), 2);
    assert!(!wagons[0].1.is_broken);
    // 50 for the repair, 200 for the wagon
    assert_eq!(app.world().get::<ConvoyResources>(player).unwrap().gold, 750);
    assert_eq!(
        app.world().get::<PlayerConvoy>(player).unwrap().total_capacity,
        2300
    );
}
