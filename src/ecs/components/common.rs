use bevy_ecs::component::Component;

// ---------------------------------------------------------------------------
// Marker components — one per entity kind
// ---------------------------------------------------------------------------

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct IsPlayer;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct CityMarker;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct MarketMarker;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct WagonMarker;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct GoodMarker;
