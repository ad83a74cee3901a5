//! Economy & markets.
//!
//! Commands set:
//! 1. `process_trades` — drains `TradeTransaction`s, applies buys and sells
//!
//! Economy set (every 30 s):
//! 2. `update_market_prices` — supply/demand random walk and price recompute

use bevy_app::{App, Plugin};
use bevy_ecs::message::{MessageWriter, Messages};
use bevy_ecs::query::With;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Query, Res, ResMut};
use rand::Rng;

use crate::ecs::commands::TradeTransaction;
use crate::ecs::components::{
    ConvoyResources, GoodData, GoodMarker, Inventory, IsPlayer, MarketMarker, PlayerConvoy,
    PlayerProgress, PriceList, SUPPLY_DEMAND_MAX, SUPPLY_DEMAND_MIN, market_price,
};
use crate::ecs::conditions::{every_thirty_seconds, world_ready};
use crate::ecs::events::{CaravanEvent, CommandKind, RejectReason};
use crate::ecs::resources::{EconomyRng, PlayerHandle};
use crate::ecs::schedule::{CommandSet, DomainSet, SimTick};

// ---------------------------------------------------------------------------
// Constants — Price cycle
// ---------------------------------------------------------------------------

const DEMAND_STEP: f32 = 0.1;
const SUPPLY_STEP: f32 = 0.05;

// ---------------------------------------------------------------------------
// Plugin registration
// ---------------------------------------------------------------------------

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            SimTick,
            process_trades.run_if(world_ready).in_set(CommandSet::Trade),
        );
        app.add_systems(
            SimTick,
            update_market_prices
                .run_if(world_ready)
                .run_if(every_thirty_seconds)
                .in_set(DomainSet::Economy),
        );
    }
}

// ---------------------------------------------------------------------------
// System 1: Trade transactions
// ---------------------------------------------------------------------------

#[allow(clippy::type_complexity)]
fn process_trades(
    mut queue: ResMut<Messages<TradeTransaction>>,
    player: Res<PlayerHandle>,
    mut convoys: Query<
        (
            &mut PlayerConvoy,
            &mut ConvoyResources,
            &mut Inventory,
            &mut PlayerProgress,
        ),
        With<IsPlayer>,
    >,
    goods: Query<&GoodData, With<GoodMarker>>,
    mut events: MessageWriter<CaravanEvent>,
) {
    for trade in queue.drain() {
        let Ok((mut convoy, mut resources, mut inventory, mut progress)) =
            convoys.get_mut(player.0)
        else {
            continue;
        };
        let outcome = match goods.get(trade.good) {
            Ok(good) => apply_trade(
                &trade,
                good,
                &mut convoy,
                &mut resources,
                &mut inventory,
                &mut progress,
            ),
            Err(_) => Err(RejectReason::UnknownTarget),
        };

        match outcome {
            Ok(()) => {
                tracing::debug!(
                    is_buy = trade.is_buy,
                    quantity = trade.quantity,
                    total_price = trade.total_price,
                    gold = resources.gold,
                    "trade completed"
                );
                events.write(CaravanEvent::TradeCompleted {
                    good: trade.good,
                    quantity: trade.quantity,
                    total_price: trade.total_price,
                    is_buy: trade.is_buy,
                });
            }
            Err(reason) => {
                tracing::warn!(
                    ?reason,
                    is_buy = trade.is_buy,
                    quantity = trade.quantity,
                    gold = resources.gold,
                    "trade rejected"
                );
                events.write(CaravanEvent::CommandRejected {
                    command: CommandKind::Trade,
                    reason,
                });
            }
        }
    }
}

/// Apply one trade, or leave everything untouched and say why not.
fn apply_trade(
    trade: &TradeTransaction,
    good: &GoodData,
    convoy: &mut PlayerConvoy,
    resources: &mut ConvoyResources,
    inventory: &mut Inventory,
    progress: &mut PlayerProgress,
) -> Result<(), RejectReason> {
    if trade.quantity == 0 {
        return Err(RejectReason::NothingToDo);
    }
    let weight = good.weight.saturating_mul(trade.quantity);

    if trade.is_buy {
        if resources.gold < trade.total_price {
            return Err(RejectReason::InsufficientGold);
        }
        if !convoy.can_carry(weight) {
            return Err(RejectReason::InsufficientCapacity);
        }
        resources.gold -= trade.total_price;
        convoy.used_capacity += weight;
        inventory.add(trade.good, trade.quantity);
    } else {
        if !inventory.remove(trade.good, trade.quantity) {
            return Err(RejectReason::InsufficientStock);
        }
        resources.gold = resources.gold.saturating_add(trade.total_price);
        convoy.used_capacity = convoy.used_capacity.saturating_sub(weight);
        progress.total_gold_earned = progress.total_gold_earned.saturating_add(trade.total_price);
    }
    progress.total_trades += 1;
    Ok(())
}

// ---------------------------------------------------------------------------
// System 2: Price cycle (30 s)
// ---------------------------------------------------------------------------

fn update_market_prices(
    mut rng: ResMut<EconomyRng>,
    mut markets: Query<&mut PriceList, With<MarketMarker>>,
    goods: Query<&GoodData, With<GoodMarker>>,
) {
    let rng = &mut rng.0;
    let mut updated = 0usize;
    for mut prices in &mut markets {
        for entry in &mut prices.entries {
            let Ok(good) = goods.get(entry.good) else {
                continue;
            };
            entry.demand = (entry.demand + rng.random_range(-DEMAND_STEP..DEMAND_STEP))
                .clamp(SUPPLY_DEMAND_MIN, SUPPLY_DEMAND_MAX);
            entry.supply = (entry.supply + rng.random_range(-SUPPLY_STEP..SUPPLY_STEP))
                .clamp(SUPPLY_DEMAND_MIN, SUPPLY_DEMAND_MAX);
            entry.price = market_price(good.base_value, entry.supply, entry.demand);
            updated += 1;
        }
    }
    tracing::debug!(entries = updated, "market prices updated");
}
