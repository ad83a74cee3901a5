use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;

use crate::model::event::EventType;

/// A timed game event. Ticked down every frame and despawned at zero.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct GameEvent {
    pub event_type: EventType,
    pub severity: f32,
    pub remaining: f32,
    pub description: String,
    /// Set after the first lifecycle pass, so consumers can pick out new events.
    pub processed: bool,
    pub target: Option<Entity>,
}

impl GameEvent {
    pub fn new(event_type: EventType, severity: f32, target: Option<Entity>) -> Self {
        Self {
            event_type,
            severity,
            remaining: event_type.duration_secs(),
            description: event_type.describe(severity),
            processed: false,
            target,
        }
    }
}

/// Holds a convoy in place until `remaining` runs out, then restores its speed.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct RoadBlockDelay {
    pub remaining: f32,
    pub player: Entity,
    pub original_speed: f32,
}
