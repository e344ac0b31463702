//! Procedural content generation for chunks
//!
//! The pipeline per chunk is:
//! 1. Pick a random source according to the [`SeedPolicy`](crate::world::SeedPolicy)
//! 2. Place category content on interior cells ([`RandomObjectPlacer`])
//! 3. Optionally draw boundary openings for maze-style connectivity

pub mod rng;
pub mod placer;
pub mod generator;

pub use rng::{RandomSource, chunk_rng, chunk_seed, session_rng};
pub use placer::RandomObjectPlacer;
pub use generator::ChunkGenerator;
