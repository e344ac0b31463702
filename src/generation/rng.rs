//! Randomness injected into placement

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::world::index::ChunkIndex;

/// Source of uniform random draws used by the placer
///
/// Implemented for every [`rand::Rng`], so any seeded generator can be
/// passed in directly. Tests use scripted sources to pin exact sequences.
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`
    fn next_unit(&mut self) -> f32;

    /// Uniform index in `[0, n)`. `n` must be at least 1.
    fn next_index(&mut self, n: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn next_unit(&mut self) -> f32 {
        self.r#gen::<f32>()
    }

    fn next_index(&mut self, n: usize) -> usize {
        self.gen_range(0..n)
    }
}

/// Derive a generator seed for one chunk from a world seed
///
/// Integer hash in the splitmix64 family; neighbouring indices get
/// unrelated seeds.
pub fn chunk_seed(world_seed: u64, index: ChunkIndex) -> u64 {
    let mut h = world_seed
        ^ (index.x as u32 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (index.z as u32 as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F).rotate_left(32);
    h = (h ^ (h >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    h = (h ^ (h >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    h ^ (h >> 31)
}

/// Generator for one chunk under per-chunk seeding
pub fn chunk_rng(world_seed: u64, index: ChunkIndex) -> StdRng {
    StdRng::seed_from_u64(chunk_seed(world_seed, index))
}

/// Generator for session seeding; `None` draws the seed from OS entropy
pub fn session_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Scripted source replaying fixed sequences, for tests
#[cfg(test)]
pub(crate) struct SequenceSource {
    units: Vec<f32>,
    unit_pos: usize,
    indices: Vec<usize>,
    index_pos: usize,
}

#[cfg(test)]
impl SequenceSource {
    /// Replays `units` for unit draws and `indices` (modulo `n`) for index
    /// draws, each cycling when exhausted
    pub fn new(units: Vec<f32>, indices: Vec<usize>) -> Self {
        Self { units, unit_pos: 0, indices, index_pos: 0 }
    }

    pub fn unit_draws(&self) -> usize {
        self.unit_pos
    }

    pub fn index_draws(&self) -> usize {
        self.index_pos
    }
}

#[cfg(test)]
impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f32 {
        let v = self.units[self.unit_pos % self.units.len()];
        self.unit_pos += 1;
        v
    }

    fn next_index(&mut self, n: usize) -> usize {
        let v = self.indices.get(self.index_pos % self.indices.len().max(1)).copied().unwrap_or(0);
        self.index_pos += 1;
        v % n
    }
}
