use super::coords::{GridPos, WorldPos};
use super::grid::TerrainGrid;
use super::pathfinding::{PathfinderSettings, search, simplify_path};

// ---------------------------------------------------------------------------
// Constants — Route estimates
// ---------------------------------------------------------------------------

/// Nominal speed used for time estimates, independent of the convoy.
const ESTIMATE_SPEED: f32 = 5.0;
/// Food eaten per estimated second of travel.
const ESTIMATE_FOOD_PER_SEC: f32 = 2.0;
const RISK_DISTANCE_DIVISOR: f32 = 100.0;
const RISK_MIN: f32 = 0.1;
const RISK_MAX: f32 = 0.9;

/// A precomputed journey between two world positions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoutePlan {
    pub start: WorldPos,
    pub end: WorldPos,
    pub distance: f32,
    pub estimated_time: f32,
    pub food_needed: u32,
    pub risk: f32,
    /// Simplified waypoints. Empty when no grid route was found.
    pub waypoints: Vec<GridPos>,
    /// False when the pathfinder gave up before reaching the destination cell.
    pub complete: bool,
}

pub fn plan_route(
    grid: &TerrainGrid,
    start: WorldPos,
    end: WorldPos,
    settings: &PathfinderSettings,
) -> RoutePlan {
    let distance = start.distance(end);
    let estimated_time = distance / ESTIMATE_SPEED;
    let found = search(grid, grid.world_to_grid(start), grid.world_to_grid(end), settings);
    RoutePlan {
        start,
        end,
        distance,
        estimated_time,
        food_needed: (estimated_time * ESTIMATE_FOOD_PER_SEC).ceil() as u32,
        risk: (distance / RISK_DISTANCE_DIVISOR).clamp(RISK_MIN, RISK_MAX),
        waypoints: simplify_path(grid, &found.path),
        complete: found.complete,
    }
}
