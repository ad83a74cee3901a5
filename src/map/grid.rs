use bevy_ecs::resource::Resource;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::coords::{GridPos, WorldPos};
use crate::model::config::GameConfig;
use crate::model::terrain::TerrainType;

/// One grid cell with its precomputed terrain coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainData {
    pub pos: GridPos,
    pub terrain: TerrainType,
    pub movement_cost: f32,
    pub wear_multiplier: f32,
    pub danger_level: f32,
    pub food_availability: f32,
}

impl TerrainData {
    pub fn new(pos: GridPos, terrain: TerrainType, config: &GameConfig) -> Self {
        let c = config.terrain(terrain);
        Self {
            pos,
            terrain,
            movement_cost: c.movement_cost,
            wear_multiplier: c.wear_multiplier,
            danger_level: c.danger_level,
            food_availability: c.food_availability,
        }
    }
}

/// The authoritative terrain grid. Row-major, `y * width + x`.
#[derive(Resource, Debug, Clone)]
pub struct TerrainGrid {
    width: u32,
    height: u32,
    world_scale: f32,
    cells: Vec<TerrainData>,
}

impl TerrainGrid {
    /// Generate a grid from the map seed in `config`.
    pub fn generate(config: &GameConfig) -> Self {
        let map = &config.map;
        let mut rng = SmallRng::seed_from_u64(map.seed);
        let mut cells = Vec::with_capacity((map.width * map.height) as usize);
        for y in 0..map.height as i32 {
            for x in 0..map.width as i32 {
                let terrain = TerrainType::from_sample(rng.random_range(0.0..1.0));
                cells.push(TerrainData::new(GridPos::new(x, y), terrain, config));
            }
        }
        tracing::debug!(
            width = map.width,
            height = map.height,
            seed = map.seed,
            "generated terrain grid"
        );
        Self {
            width: map.width,
            height: map.height,
            world_scale: map.world_scale,
            cells,
        }
    }

    /// Build a grid where every cell has the same terrain.
    pub fn uniform(config: &GameConfig, terrain: TerrainType) -> Self {
        let map = &config.map;
        let mut cells = Vec::with_capacity((map.width * map.height) as usize);
        for y in 0..map.height as i32 {
            for x in 0..map.width as i32 {
                cells.push(TerrainData::new(GridPos::new(x, y), terrain, config));
            }
        }
        Self {
            width: map.width,
            height: map.height,
            world_scale: map.world_scale,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn world_scale(&self) -> f32 {
        self.world_scale
    }

    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    fn index(&self, pos: GridPos) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    pub fn get(&self, pos: GridPos) -> Option<&TerrainData> {
        self.index(pos).map(|i| &self.cells[i])
    }

    pub fn terrain_at(&self, pos: GridPos) -> Option<TerrainType> {
        self.get(pos).map(|cell| cell.terrain)
    }

    /// Overwrite one cell. Out-of-grid positions are ignored.
    pub fn set(&mut self, pos: GridPos, terrain: TerrainType, config: &GameConfig) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = TerrainData::new(pos, terrain, config);
        }
    }

    pub fn world_to_grid(&self, world: WorldPos) -> GridPos {
        GridPos::new(
            (world.x / self.world_scale).round() as i32,
            (world.z / self.world_scale).round() as i32,
        )
    }

    pub fn grid_to_world(&self, pos: GridPos) -> WorldPos {
        WorldPos::new(
            pos.x as f32 * self.world_scale,
            pos.y as f32 * self.world_scale,
        )
    }

    pub fn cells(&self) -> impl Iterator<Item = &TerrainData> {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(seed: u64) -> GameConfig {
        let mut config = GameConfig::default();
        config.map.width = 16;
        config.map.height = 12;
        config.map.seed = seed;
        config
    }

    #[test]
    fn generation_is_seeded() {
        let a = TerrainGrid::generate(&small_config(7));
        let b = TerrainGrid::generate(&small_config(7));
        let c = TerrainGrid::generate(&small_config(8));
        let terrains = |g: &TerrainGrid| g.cells().map(|c| c.terrain).collect::<Vec<_>>();
        assert_eq!(terrains(&a), terrains(&b));
        assert_ne!(terrains(&a), terrains(&c));
        assert_eq!(a.cells().count(), 16 * 12);
    }

    #[test]
    fn generation_never_places_rivers() {
        let grid = TerrainGrid::generate(&small_config(3));
        assert!(grid.cells().all(|c| c.terrain != TerrainType::River));
    }

    #[test]
    fn cells_carry_coefficients() {
        let grid = TerrainGrid::uniform(&small_config(1), TerrainType::Forest);
        let cell = grid.get(GridPos::new(3, 4)).unwrap();
        assert_eq!(cell.pos, GridPos::new(3, 4));
        assert_eq!(cell.wear_multiplier, 1.3);
        assert_eq!(cell.danger_level, 0.7);
    }

    #[test]
    fn bounds() {
        let grid = TerrainGrid::uniform(&small_config(1), TerrainType::Plains);
        assert!(grid.in_bounds(GridPos::new(0, 0)));
        assert!(grid.in_bounds(GridPos::new(15, 11)));
        assert!(!grid.in_bounds(GridPos::new(16, 0)));
        assert!(!grid.in_bounds(GridPos::new(0, -1)));
        assert!(grid.get(GridPos::new(-1, 3)).is_none());
    }

    #[test]
    fn world_conversion_rounds() {
        let grid = TerrainGrid::uniform(&small_config(1), TerrainType::Plains);
        assert_eq!(grid.world_to_grid(WorldPos::new(100.0, 100.0)), GridPos::new(10, 10));
        assert_eq!(grid.world_to_grid(WorldPos::new(104.9, 95.1)), GridPos::new(10, 10));
        assert_eq!(grid.grid_to_world(GridPos::new(3, 7)), WorldPos::new(30.0, 70.0));
    }

    #[test]
    fn set_replaces_cell() {
        let config = small_config(1);
        let mut grid = TerrainGrid::uniform(&config, TerrainType::Plains);
        grid.set(GridPos::new(2, 2), TerrainType::Road, &config);
        grid.set(GridPos::new(99, 99), TerrainType::Road, &config);
        assert_eq!(grid.terrain_at(GridPos::new(2, 2)), Some(TerrainType::Road));
    }
}
