use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, ScheduleLabel, SystemSet};

use super::clock::advance_clock;

/// Schedule label for the main simulation tick.
/// Run manually each tick via `app.world_mut().run_schedule(SimTick)`.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimTick;

/// Ordered phases within each simulation tick.
///
/// Systems are assigned to phases via `.in_set(SimPhase::Update)` etc.
/// Phases run in declaration order: PreUpdate < Update < PostUpdate < Reactions < Last.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimPhase {
    PreUpdate,
    Update,
    PostUpdate,
    Reactions,
    Last,
}

/// Per-domain system sets within `SimPhase::Update`.
///
/// ```text
/// Commands → Movement → Wear → Economy → Inventory → Events → Combat
///          → Personnel → Progression
/// ```
///
/// The order is strict: movement, wear, events, combat and personnel all
/// read-modify-write `ConvoyResources` or `PlayerConvoy` on the same tick.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainSet {
    Commands,
    Movement,
    Wear,
    Economy,
    Inventory,
    Events,
    Combat,
    Personnel,
    Progression,
}

impl DomainSet {
    const ORDER: [DomainSet; 9] = [
        DomainSet::Commands,
        DomainSet::Movement,
        DomainSet::Wear,
        DomainSet::Economy,
        DomainSet::Inventory,
        DomainSet::Events,
        DomainSet::Combat,
        DomainSet::Personnel,
        DomainSet::Progression,
    ];
}

/// Command queues within `DomainSet::Commands`, drained in this order.
///
/// Trades, repairs, purchases and recruitment all spend from the same purse,
/// so when gold runs short the earlier queue wins.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandSet {
    Travel,
    Trade,
    Wagons,
    Recruitment,
}

/// Configure cross-domain ordering within `SimPhase::Update`.
fn configure_domain_ordering(schedule: &mut Schedule) {
    for set in DomainSet::ORDER {
        schedule.configure_sets(set.in_set(SimPhase::Update));
    }
    for pair in DomainSet::ORDER.windows(2) {
        schedule.configure_sets(pair[1].after(pair[0]));
    }
    schedule.configure_sets(
        (
            CommandSet::Travel,
            CommandSet::Trade,
            CommandSet::Wagons,
            CommandSet::Recruitment,
        )
            .chain()
            .in_set(DomainSet::Commands),
    );
}

/// Build a configured `SimTick` schedule with phase ordering.
pub fn configure_sim_schedule(executor: ExecutorKind) -> Schedule {
    let mut schedule = Schedule::new(SimTick);
    schedule.set_executor_kind(executor);
    schedule.configure_sets(
        (
            SimPhase::PreUpdate,
            SimPhase::Update,
            SimPhase::PostUpdate,
            SimPhase::Reactions,
            SimPhase::Last,
        )
            .chain(),
    );
    configure_domain_ordering(&mut schedule);
    schedule.add_systems(advance_clock.in_set(SimPhase::Last));
    schedule
}
