use bevy_app::{App, Plugin};

use super::systems::combat::CombatPlugin;
use super::systems::economy::EconomyPlugin;
use super::systems::events::EventsPlugin;
use super::systems::inventory::InventoryPlugin;
use super::systems::movement::MovementPlugin;
use super::systems::personnel::PersonnelPlugin;
use super::systems::progression::ProgressionPlugin;
use super::systems::wagons::WagonsPlugin;

/// Aggregate plugin that installs every caravan domain plugin.
pub struct CaravanPlugin;

impl Plugin for CaravanPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            MovementPlugin,
            WagonsPlugin,
            EconomyPlugin,
            InventoryPlugin,
            EventsPlugin,
            CombatPlugin,
            PersonnelPlugin,
            ProgressionPlugin,
        ));
    }
}
