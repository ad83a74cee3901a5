pub mod combat;
pub mod economy;
pub mod events;
pub mod initialization;
pub mod inventory;
pub mod movement;
pub mod personnel;
pub mod progression;
pub mod wagons;
