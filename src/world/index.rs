//! Chunk and cell addressing on the infinite ground-plane grid

use std::fmt;

use crate::core::types::Vec3;

/// Integer coordinate identifying a chunk in the world grid
///
/// Only the two ground-plane axes are tracked: `x` follows world X and `z`
/// follows world Z. Height is not part of a chunk's identity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkIndex {
    pub x: i32,
    pub z: i32,
}

impl ChunkIndex {
    /// The chunk containing the world origin
    pub const ORIGIN: ChunkIndex = ChunkIndex { x: 0, z: 0 };

    /// Create a new chunk index
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Convert a world position to the index of the chunk containing it
    ///
    /// Uses floor division on X and Z so that positions just below zero map
    /// to chunk -1 rather than collapsing onto chunk 0.
    ///
    /// # Arguments
    /// * `pos` - World-space position (Y is ignored)
    /// * `chunk_edge` - World length of one chunk edge, must be positive
    pub fn from_world_pos(pos: Vec3, chunk_edge: f32) -> Self {
        Self {
            x: (pos.x / chunk_edge).floor() as i32,
            z: (pos.z / chunk_edge).floor() as i32,
        }
    }

    /// World-space position of this chunk's root
    ///
    /// The root is where local cell `(0, 0)` sits, so grid cell `g` covers
    /// world `[x * edge + g * cell_size, x * edge + (g + 1) * cell_size)` and
    /// the chunk's cells tile exactly the span [`from_world_pos`](Self::from_world_pos)
    /// maps to this index.
    pub fn world_origin(&self, chunk_size: u32, cell_size: f32) -> Vec3 {
        let half = (chunk_size / 2) as f64;
        let size = chunk_size as f64;
        let cell = cell_size as f64;
        Vec3::new(
            ((self.x as f64 * size + half) * cell) as f32,
            0.0,
            ((self.z as f64 * size + half) * cell) as f32,
        )
    }

    /// Local cell of this chunk that contains a world position
    ///
    /// The position is expected to lie inside this chunk.
    pub fn local_cell(&self, pos: Vec3, chunk_size: u32, cell_size: f32) -> LocalCell {
        let local = pos - self.world_origin(chunk_size, cell_size);
        let cell = LocalCell::new(
            (local.x / cell_size).floor() as i32,
            (local.z / cell_size).floor() as i32,
        );
        debug_assert!(cell.in_bounds(chunk_size), "{:?} outside chunk {}", pos, self);
        cell
    }

    /// Chebyshev (chessboard) distance to another chunk
    pub fn chebyshev_distance(&self, other: ChunkIndex) -> u32 {
        let dx = (self.x as i64 - other.x as i64).unsigned_abs();
        let dz = (self.z as i64 - other.z as i64).unsigned_abs();
        dx.max(dz).min(u32::MAX as u64) as u32
    }

    /// Offset this index by a number of chunks on each axis
    ///
    /// Saturates at the ends of the `i32` range.
    pub fn offset(&self, dx: i32, dz: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.z.saturating_add(dz))
    }
}

impl fmt::Display for ChunkIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.z)
    }
}

impl From<(i32, i32)> for ChunkIndex {
    fn from((x, z): (i32, i32)) -> Self {
        Self::new(x, z)
    }
}

/// Cell coordinate local to a chunk, centered on the chunk root
///
/// For a chunk of `size` cells per edge, valid cells lie in
/// `[-size/2, size - size/2)` on each axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalCell {
    pub x: i32,
    pub z: i32,
}

impl LocalCell {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Convert a grid coordinate in `[0, size)` to a centered local cell
    pub fn from_grid(gx: u32, gz: u32, size: u32) -> Self {
        let half = (size / 2) as i32;
        Self::new(gx as i32 - half, gz as i32 - half)
    }

    /// Whether this cell lies inside a chunk of `size` cells per edge
    pub fn in_bounds(&self, size: u32) -> bool {
        let min = -((size / 2) as i32);
        let max = min + size as i32;
        (min..max).contains(&self.x) && (min..max).contains(&self.z)
    }

    /// Position of this cell relative to the chunk root, in world units
    pub fn local_position(&self, cell_size: f32) -> Vec3 {
        Vec3::new(self.x as f32 * cell_size, 0.0, self.z as f32 * cell_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_world_pos_positive() {
        assert_eq!(ChunkIndex::from_world_pos(Vec3::new(0.0, 0.0, 0.0), 10.0), ChunkIndex::new(0, 0));
        assert_eq!(ChunkIndex::from_world_pos(Vec3::new(15.0, 3.0, 9.99), 10.0), ChunkIndex::new(1, 0));
        assert_eq!(ChunkIndex::from_world_pos(Vec3::new(20.0, 0.0, 35.0), 10.0), ChunkIndex::new(2, 3));
    }

    #[test]
    fn test_from_world_pos_negative_uses_floor() {
        // Truncation would put both of these in chunk 0
        assert_eq!(ChunkIndex::from_world_pos(Vec3::new(-0.5, 0.0, 0.5), 10.0), ChunkIndex::new(-1, 0));
        assert_eq!(ChunkIndex::from_world_pos(Vec3::new(-10.0, 0.0, -10.01), 10.0), ChunkIndex::new(-1, -2));
    }

    #[test]
    fn test_world_origin() {
        let idx = ChunkIndex::new(-2, 3);
        assert_eq!(idx.world_origin(10, 1.0), Vec3::new(-15.0, 0.0, 35.0));
        assert_eq!(idx.world_origin(10, 2.0), Vec3::new(-30.0, 0.0, 70.0));
        assert_eq!(ChunkIndex::ORIGIN.world_origin(11, 1.0), Vec3::new(5.0, 0.0, 5.0));
    }

    #[test]
    fn test_cells_tile_the_chunk_span() {
        // Chunk -1 spans world x [-10, 0); its cells must cover exactly that
        let idx = ChunkIndex::new(-1, 0);
        let root = idx.world_origin(10, 1.0);
        let low = root.x + LocalCell::from_grid(0, 0, 10).local_position(1.0).x;
        let high = root.x + LocalCell::from_grid(9, 9, 10).local_position(1.0).x + 1.0;
        assert_eq!((low, high), (-10.0, 0.0));

        let pos = Vec3::new(-1.0, 0.0, 0.5);
        assert_eq!(ChunkIndex::from_world_pos(pos, 10.0), idx);
        assert_eq!(idx.local_cell(pos, 10, 1.0), LocalCell::new(4, -5));
        assert_eq!(idx.local_cell(Vec3::new(-10.0, 0.0, 9.99), 10, 1.0), LocalCell::new(-5, 4));
    }

    #[test]
    fn test_local_cell_odd_size_and_scaled_cells() {
        let idx = ChunkIndex::new(2, -1);
        // Edge 22 units, chunk x spans [44, 66)
        assert_eq!(idx.local_cell(Vec3::new(44.0, 0.0, -22.0), 11, 2.0), LocalCell::new(-5, -5));
        assert_eq!(idx.local_cell(Vec3::new(65.9, 0.0, -0.1), 11, 2.0), LocalCell::new(5, 5));
    }

    #[test]
    fn test_chebyshev_distance() {
        let a = ChunkIndex::new(0, 0);
        assert_eq!(a.chebyshev_distance(ChunkIndex::new(0, 0)), 0);
        assert_eq!(a.chebyshev_distance(ChunkIndex::new(1, -1)), 1);
        assert_eq!(a.chebyshev_distance(ChunkIndex::new(-3, 2)), 3);
    }

    #[test]
    fn test_display_label() {
        assert_eq!(format!("Chunk {}", ChunkIndex::new(4, -7)), "Chunk 4, -7");
    }

    #[test]
    fn test_local_cell_bounds() {
        assert_eq!(LocalCell::from_grid(0, 0, 10), LocalCell::new(-5, -5));
        assert_eq!(LocalCell::from_grid(9, 9, 10), LocalCell::new(4, 4));
        assert!(LocalCell::new(-5, 4).in_bounds(10));
        assert!(!LocalCell::new(5, 0).in_bounds(10));

        // Odd sizes keep one extra cell on the positive side of the tile
        // grid; the reserved ring keeps content inside [-size/2, size/2)
        assert_eq!(LocalCell::from_grid(10, 10, 11), LocalCell::new(5, 5));
        assert!(LocalCell::new(5, 5).in_bounds(11));
        assert!(!LocalCell::new(-6, 0).in_bounds(11));
    }
}
