//! Chunk content generation: placement plus connectivity under a seed policy

use rand::rngs::StdRng;

use crate::generation::placer::RandomObjectPlacer;
use crate::generation::rng::{self, RandomSource};
use crate::world::config::{ChunkConfig, SeedPolicy};
use crate::world::content::{BoundaryOpenings, ChunkContent};
use crate::world::index::ChunkIndex;

/// Builds [`ChunkContent`] values for chunk indices
pub struct ChunkGenerator {
    placer: RandomObjectPlacer,
    policy: SeedPolicy,
    /// Shared sequential generator, used only under `SeedPolicy::Session`
    session: StdRng,
    generated: u64,
}

impl ChunkGenerator {
    /// Create a generator for chunks of `chunk_size` cells per edge
    pub fn new(chunk_size: u32, policy: SeedPolicy) -> Self {
        let session_seed = match policy {
            SeedPolicy::Session { seed } => seed,
            SeedPolicy::PerChunk { seed } => Some(seed),
        };
        Self {
            placer: RandomObjectPlacer::new(chunk_size),
            policy,
            session: rng::session_rng(session_seed),
            generated: 0,
        }
    }

    pub fn policy(&self) -> SeedPolicy {
        self.policy
    }

    /// Number of chunks generated so far
    pub fn generated_count(&self) -> u64 {
        self.generated
    }

    /// Generate fresh content for a chunk
    pub fn generate(&mut self, index: ChunkIndex, config: &ChunkConfig) -> ChunkContent {
        self.generated += 1;
        let content = match self.policy {
            SeedPolicy::Session { .. } => Self::build(&self.placer, config, &mut self.session),
            SeedPolicy::PerChunk { seed } => {
                let mut chunk_rng = rng::chunk_rng(seed, index);
                Self::build(&self.placer, config, &mut chunk_rng)
            }
        };
        log::trace!("Generated chunk {} with {} objects", index, content.len());
        content
    }

    /// Generate content from an explicit random source
    pub fn generate_with<R: RandomSource + ?Sized>(&self, config: &ChunkConfig, rng: &mut R) -> ChunkContent {
        Self::build(&self.placer, config, rng)
    }

    fn build<R: RandomSource + ?Sized>(
        placer: &RandomObjectPlacer,
        config: &ChunkConfig,
        rng: &mut R,
    ) -> ChunkContent {
        let cells = placer.place(&config.categories, rng);
        // A way is open when the draw falls within the chance
        let openings = config.open_way_chance.map(|chance| BoundaryOpenings {
            up: rng.next_unit() <= chance,
            right: rng.next_unit() <= chance,
        });
        ChunkContent::new(cells, openings)
    }
}
