use serde::{Deserialize, Serialize};

/// Integer cell coordinate on the terrain grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: GridPos) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn euclidean(self, other: GridPos) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// True when `other` is one step away (diagonals only if `diagonal`).
    pub fn is_adjacent(self, other: GridPos, diagonal: bool) -> bool {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        match (dx, dy) {
            (1, 0) | (0, 1) => true,
            (1, 1) => diagonal,
            _ => false,
        }
    }
}

/// Continuous position on the ground plane, in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub z: f32,
}

impl WorldPos {
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    pub fn distance(self, other: WorldPos) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }

    pub fn lerp(self, other: WorldPos, t: f32) -> WorldPos {
        WorldPos {
            x: self.x + (other.x - self.x) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_respects_diagonal_flag() {
        let a = GridPos::new(5, 5);
        assert!(a.is_adjacent(GridPos::new(5, 6), false));
        assert!(a.is_adjacent(GridPos::new(4, 5), false));
        assert!(!a.is_adjacent(GridPos::new(6, 6), false));
        assert!(a.is_adjacent(GridPos::new(6, 6), true));
        assert!(!a.is_adjacent(a, true));
        assert!(!a.is_adjacent(GridPos::new(7, 5), true));
    }

    #[test]
    fn lerp_endpoints() {
        let a = WorldPos::new(0.0, 0.0);
        let b = WorldPos::new(10.0, 20.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), WorldPos::new(5.0, 10.0));
        assert!((a.distance(WorldPos::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
    }
}
