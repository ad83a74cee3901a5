mod common;

use bevy_ecs::entity::Entity;
use bevy_ecs::query::With;
use bevy_ecs::world::World;
use caravan_sim::ecs::components::{MarketMarker, SUPPLY_DEMAND_MAX, SUPPLY_DEMAND_MIN};
use caravan_sim::ecs::{
    CaravanEvent, City, CityMarket, CommandKind, ConvoyResources, GoodsCatalog, Inventory,
    PlayerConvoy, PlayerProgress, PriceList, RejectReason, TradeTransaction, submit,
};
use common::*;

fn grain(app: &bevy_app::App) -> Entity {
    app.world().resource::<GoodsCatalog>().get("Grain").unwrap()
}

fn starting_town_prices(app: &mut bevy_app::App) -> PriceList {
    let world = app.world_mut();
    let mut markets = world.query_filtered::<(&CityMarket, &PriceList), With<MarketMarker>>();
    let world: &World = world;
    let (_, prices) = markets
        .iter(world)
        .find(|(market, _)| {
            world
                .get::<City>(market.city)
                .is_some_and(|c| c.name == "Starting Town")
        })
        .unwrap();
    prices.clone()
}

#[test]
fn buy_then_sell_round_trip() {
    let mut app = caravan_app_with(1, quiet_config());
    let player = player(&app);
    let grain = grain(&app);

    submit(app.world_mut(), TradeTransaction::buy(grain, 10, 100));
    tick(&mut app);
    submit(app.world_mut(), TradeTransaction::sell(grain, 10, 120));
    tick(&mut app);

    let world = app.world();
    assert_eq!(world.get::<ConvoyResources>(player).unwrap().gold, 1020);
    assert!(world.get::<Inventory>(player).unwrap().is_empty());
    assert_eq!(world.get::<PlayerConvoy>(player).unwrap().used_capacity, 0);
    let progress = world.get::<PlayerProgress>(player).unwrap();
    assert_eq!(progress.total_trades, 2);
    assert_eq!(progress.total_gold_earned, 120);
    // 5 per trade
    assert_eq!(progress.experience, 10);
}

#[test]
fn buying_at_the_local_market_price() {
    let mut app = caravan_app_with(2, quiet_config());
    let player = player(&app);
    let grain = grain(&app);
    let unit_price = starting_town_prices(&mut app).price_of(grain).unwrap();
    assert!(unit_price >= 1);

    submit(app.world_mut(), TradeTransaction::buy(grain, 5, unit_price * 5));
    tick(&mut app);

    let gold = app.world().get::<ConvoyResources>(player).unwrap().gold;
    assert_eq!(gold, 1000 - unit_price * 5);
}

#[test]
fn over_capacity_purchase_is_rejected_whole() {
    let mut app = caravan_app_with(3, quiet_config());
    let player = player(&app);
    let grain = grain(&app);

    // 1000 base plus 500 for the basic cart, grain weighs 1
    submit(app.world_mut(), TradeTransaction::buy(grain, 1501, 1));
    tick(&mut app);

    let rejected = recent_events(&app).into_iter().any(|e| {
        e == CaravanEvent::CommandRejected {
            command: CommandKind::Trade,
            reason: RejectReason::InsufficientCapacity,
        }
    });
    assert!(rejected);
    let world = app.world();
    assert_eq!(world.get::<ConvoyResources>(player).unwrap().gold, 1000);
    assert!(world.get::<Inventory>(player).unwrap().is_empty());

    submit(app.world_mut(), TradeTransaction::buy(grain, 1500, 1));
    tick(&mut app);
    let convoy = app.world().get::<PlayerConvoy>(player).unwrap();
    assert_eq!(convoy.used_capacity, convoy.total_capacity);
}

#[test]
fn market_prices_stay_in_bounds_over_a_long_run() {
    let mut app = caravan_app(4);
    // 40 price cycles
    tick_seconds(&mut app, 1200);

    let world = app.world_mut();
    let mut markets = world.query_filtered::<&PriceList, With<MarketMarker>>();
    let mut checked = 0;
    for prices in markets.iter(world) {
        for entry in &prices.entries {
            assert!((SUPPLY_DEMAND_MIN..=SUPPLY_DEMAND_MAX).contains(&entry.supply));
            assert!((SUPPLY_DEMAND_MIN..=SUPPLY_DEMAND_MAX).contains(&entry.demand));
            assert!(entry.price >= 1);
            checked += 1;
        }
    }
    assert!(checked > 0);
}
