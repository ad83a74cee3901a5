//! Bounded A* over the terrain grid.
//!
//! `find_path` returns the raw, cell-by-cell route. `simplify_path` drops
//! waypoints that do not border an obstacle, and `find_route` does both.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::coords::GridPos;
use super::grid::TerrainGrid;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const DIAGONAL_COST: f32 = 1.414;
/// Pathfinder cost above which a cell counts as an obstacle for simplification.
const OBSTACLE_COST: f32 = 3.0;
const MIN_SPEED: f32 = 0.1;

const DIAGONALS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ORTHOGONALS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathfinderSettings {
    pub allow_diagonal: bool,
    /// Maximum open-set size before the search gives up.
    pub max_path_length: usize,
    pub heuristic_weight: f32,
}

impl Default for PathfinderSettings {
    fn default() -> Self {
        Self {
            allow_diagonal: false,
            max_path_length: 1000,
            heuristic_weight: 1.0,
        }
    }
}

/// Result of a search, including whether the target was actually reached.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathSearch {
    pub path: Vec<GridPos>,
    pub complete: bool,
    pub expanded: usize,
}

#[derive(Debug, Clone, Copy)]
struct OpenNode {
    f: f32,
    seq: u64,
    index: usize,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    // Reversed so the max-heap pops the lowest f, earliest insertion first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

fn heuristic(a: GridPos, b: GridPos, settings: &PathfinderSettings) -> f32 {
    let distance = if settings.allow_diagonal {
        a.euclidean(b)
    } else {
        a.manhattan(b) as f32
    };
    distance * settings.heuristic_weight
}

fn step_cost(grid: &TerrainGrid, to: GridPos, diagonal: bool) -> Option<f32> {
    let base = grid.terrain_at(to)?.path_cost();
    Some(if diagonal { base * DIAGONAL_COST } else { base })
}

/// Full search with diagnostics.
///
/// When the open-set cap is hit, the path leads to the expanded cell closest
/// to the target and `complete` is false. An exhausted search returns no path.
pub fn search(
    grid: &TerrainGrid,
    start: GridPos,
    target: GridPos,
    settings: &PathfinderSettings,
) -> PathSearch {
    if !grid.in_bounds(start) || !grid.in_bounds(target) {
        return PathSearch::default();
    }
    if start == target {
        return PathSearch {
            path: vec![start],
            complete: true,
            expanded: 0,
        };
    }

    let width = grid.width() as usize;
    let cell_count = width * grid.height() as usize;
    let index_of = |p: GridPos| p.y as usize * width + p.x as usize;
    let pos_of = |i: usize| GridPos::new((i % width) as i32, (i / width) as i32);

    let mut g_score = vec![f32::INFINITY; cell_count];
    let mut came_from: Vec<Option<usize>> = vec![None; cell_count];
    let mut closed = vec![false; cell_count];
    let mut open = BinaryHeap::new();
    let mut seq = 0u64;
    let mut expanded = 0usize;

    let start_index = index_of(start);
    let target_index = index_of(target);
    g_score[start_index] = 0.0;
    open.push(OpenNode {
        f: heuristic(start, target, settings),
        seq,
        index: start_index,
    });

    let mut best = (start_index, heuristic(start, target, settings));
    let mut capped = false;

    while let Some(node) = open.pop() {
        if closed[node.index] {
            continue;
        }
        if node.index == target_index {
            return PathSearch {
                path: reconstruct(&came_from, target_index, pos_of),
                complete: true,
                expanded,
            };
        }
        closed[node.index] = true;
        expanded += 1;

        let current = pos_of(node.index);
        let h = heuristic(current, target, settings);
        if h < best.1 {
            best = (node.index, h);
        }

        let diagonals: &[(i32, i32)] = if settings.allow_diagonal {
            &DIAGONALS[..]
        } else {
            &[]
        };
        let neighbors = diagonals
            .iter()
            .map(|d| (*d, true))
            .chain(ORTHOGONALS.iter().map(|d| (*d, false)));

        for ((dx, dy), diagonal) in neighbors {
            let next = GridPos::new(current.x + dx, current.y + dy);
            let Some(cost) = step_cost(grid, next, diagonal) else {
                continue;
            };
            let next_index = index_of(next);
            if closed[next_index] {
                continue;
            }
            let tentative = g_score[node.index] + cost;
            if tentative < g_score[next_index] {
                g_score[next_index] = tentative;
                came_from[next_index] = Some(node.index);
                seq += 1;
                open.push(OpenNode {
                    f: tentative + heuristic(next, target, settings),
                    seq,
                    index: next_index,
                });
            }
        }
        if open.len() > settings.max_path_length {
            tracing::debug!(
                expanded,
                open = open.len(),
                cap = settings.max_path_length,
                "path search hit open-set cap"
            );
            capped = true;
            break;
        }
    }

    if !capped {
        return PathSearch {
            expanded,
            ..PathSearch::default()
        };
    }
    PathSearch {
        path: reconstruct(&came_from, best.0, pos_of),
        complete: false,
        expanded,
    }
}

fn reconstruct(
    came_from: &[Option<usize>],
    end: usize,
    pos_of: impl Fn(usize) -> GridPos,
) -> Vec<GridPos> {
    let mut path = vec![pos_of(end)];
    let mut current = end;
    while let Some(prev) = came_from[current] {
        path.push(pos_of(prev));
        current = prev;
    }
    path.reverse();
    path
}

/// Shortest path from `start` to `target`, cell by cell.
///
/// Empty when either endpoint is off the grid. Consecutive waypoints are
/// always adjacent.
pub fn find_path(
    grid: &TerrainGrid,
    start: GridPos,
    target: GridPos,
    settings: &PathfinderSettings,
) -> Vec<GridPos> {
    search(grid, start, target, settings).path
}

fn is_obstacle(grid: &TerrainGrid, pos: GridPos) -> bool {
    grid.terrain_at(pos)
        .is_some_and(|t| t.path_cost() > OBSTACLE_COST)
}

/// Drop intermediate waypoints unless the last kept waypoint or the next
/// point is an obstacle. The first and last points are always kept.
pub fn simplify_path(grid: &TerrainGrid, path: &[GridPos]) -> Vec<GridPos> {
    if path.len() <= 2 {
        return path.to_vec();
    }
    let mut simplified = vec![path[0]];
    for window in path[1..].windows(2) {
        let (point, next) = (window[0], window[1]);
        let kept = simplified[simplified.len() - 1];
        if is_obstacle(grid, kept) || is_obstacle(grid, next) {
            simplified.push(point);
        }
    }
    simplified.push(path[path.len() - 1]);
    simplified
}

/// `find_path` followed by `simplify_path`.
pub fn find_route(
    grid: &TerrainGrid,
    start: GridPos,
    target: GridPos,
    settings: &PathfinderSettings,
) -> Vec<GridPos> {
    simplify_path(grid, &find_path(grid, start, target, settings))
}

/// Sum of pathfinder step costs along a cell-by-cell path.
pub fn path_cost(grid: &TerrainGrid, path: &[GridPos]) -> f32 {
    path.windows(2)
        .filter_map(|w| {
            let diagonal = w[0].x != w[1].x && w[0].y != w[1].y;
            step_cost(grid, w[1], diagonal)
        })
        .sum()
}

pub fn path_time(grid: &TerrainGrid, path: &[GridPos], speed: f32) -> f32 {
    path_cost(grid, path) / speed.max(MIN_SPEED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::GameConfig;
    use crate::model::terrain::TerrainType;

    fn config(width: u32, height: u32) -> GameConfig {
        let mut config = GameConfig::default();
        config.map.width = width;
        config.map.height = height;
        config
    }

    fn assert_adjacent(path: &[GridPos], diagonal: bool) {
        for w in path.windows(2) {
            assert!(w[0].is_adjacent(w[1], diagonal), "{:?} -> {:?}", w[0], w[1]);
        }
    }

    #[test]
    fn straight_line_on_open_ground() {
        let grid = TerrainGrid::uniform(&config(10, 10), TerrainType::Plains);
        let settings = PathfinderSettings::default();
        let path = find_path(&grid, GridPos::new(0, 0), GridPos::new(5, 0), &settings);
        assert_eq!(path.len(), 6);
        assert_eq!(path[0], GridPos::new(0, 0));
        assert_eq!(path[5], GridPos::new(5, 0));
        assert_adjacent(&path, false);
    }

    #[test]
    fn start_equals_target() {
        let grid = TerrainGrid::uniform(&config(4, 4), TerrainType::Plains);
        let p = GridPos::new(2, 2);
        assert_eq!(find_path(&grid, p, p, &PathfinderSettings::default()), vec![p]);
    }

    #[test]
    fn out_of_grid_is_empty() {
        let grid = TerrainGrid::uniform(&config(4, 4), TerrainType::Plains);
        let settings = PathfinderSettings::default();
        assert!(find_path(&grid, GridPos::new(0, 0), GridPos::new(4, 0), &settings).is_empty());
        assert!(find_path(&grid, GridPos::new(-1, 0), GridPos::new(1, 1), &settings).is_empty());
    }

    #[test]
    fn detours_around_mountains_when_cheaper() {
        let cfg = config(5, 3);
        let mut grid = TerrainGrid::uniform(&cfg, TerrainType::Plains);
        // Mountain wall across the middle row except the far column.
        for x in 1..4 {
            grid.set(GridPos::new(x, 1), TerrainType::Mountains, &cfg);
        }
        for x in 0..5 {
            grid.set(GridPos::new(x, 0), TerrainType::Road, &cfg);
        }
        let settings = PathfinderSettings::default();
        let path = find_path(&grid, GridPos::new(2, 2), GridPos::new(2, 0), &settings);
        assert_eq!(path.first(), Some(&GridPos::new(2, 2)));
        assert_eq!(path.last(), Some(&GridPos::new(2, 0)));
        assert_adjacent(&path, false);
        // Crossing costs 4 + 1; the way round through column 0 costs 7.5.
        assert_eq!(path.len(), 3);
        assert!((path_cost(&grid, &path) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn diagonal_paths_are_eight_connected() {
        let grid = TerrainGrid::uniform(&config(10, 10), TerrainType::Plains);
        let settings = PathfinderSettings {
            allow_diagonal: true,
            ..PathfinderSettings::default()
        };
        let path = find_path(&grid, GridPos::new(0, 0), GridPos::new(6, 6), &settings);
        assert_eq!(path.len(), 7);
        assert_adjacent(&path, true);
    }

    #[test]
    fn capped_search_returns_partial_prefix() {
        let grid = TerrainGrid::uniform(&config(60, 60), TerrainType::Plains);
        let settings = PathfinderSettings {
            max_path_length: 10,
            ..PathfinderSettings::default()
        };
        let result = search(&grid, GridPos::new(0, 0), GridPos::new(59, 59), &settings);
        assert!(!result.complete);
        assert_eq!(result.path[0], GridPos::new(0, 0));
        assert_ne!(result.path.last(), Some(&GridPos::new(59, 59)));
        assert_adjacent(&result.path, false);
    }

    #[test]
    fn simplify_keeps_endpoints_and_obstacle_neighbours() {
        let cfg = config(6, 2);
        let mut grid = TerrainGrid::uniform(&cfg, TerrainType::Plains);
        grid.set(GridPos::new(3, 1), TerrainType::Mountains, &cfg);
        let raw: Vec<GridPos> = (0..6).map(|x| GridPos::new(x, 0)).collect();
        assert_eq!(
            simplify_path(&grid, &raw),
            vec![GridPos::new(0, 0), GridPos::new(5, 0)]
        );

        let detour = vec![
            GridPos::new(2, 0),
            GridPos::new(2, 1),
            GridPos::new(3, 1),
            GridPos::new(4, 1),
            GridPos::new(4, 0),
        ];
        // (4, 1) is checked against the last kept point (2, 1), not the mountain
        let simplified = simplify_path(&grid, &detour);
        assert_eq!(
            simplified,
            vec![GridPos::new(2, 0), GridPos::new(2, 1), GridPos::new(4, 0)]
        );
    }

    #[test]
    fn path_time_uses_speed_floor() {
        let grid = TerrainGrid::uniform(&config(4, 1), TerrainType::Road);
        let path: Vec<GridPos> = (0..4).map(|x| GridPos::new(x, 0)).collect();
        assert!((path_cost(&grid, &path) - 3.0).abs() < 1e-6);
        assert!((path_time(&grid, &path, 1.5) - 2.0).abs() < 1e-6);
        assert!((path_time(&grid, &path, 0.0) - 30.0).abs() < 1e-4);
    }
}
