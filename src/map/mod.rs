//! Terrain grid, coordinates and route finding.

pub mod coords;
pub mod grid;
pub mod pathfinding;
pub mod route;

pub use coords::{GridPos, WorldPos};
pub use grid::{TerrainData, TerrainGrid};
pub use pathfinding::{
    PathSearch, PathfinderSettings, find_path, find_route, path_cost, path_time, search,
    simplify_path,
};
pub use route::{RoutePlan, plan_route};
