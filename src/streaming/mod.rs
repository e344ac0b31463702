//! Chunk streaming: slot pooling, content caching and window convergence

pub mod cache;
pub mod assets;
pub mod host;
pub mod slot;
pub mod pool;
pub mod window;
pub mod controller;

pub use cache::ChunkContentCache;
pub use assets::AssetCatalog;
pub use host::{ChunkHost, HeadlessHandle, HeadlessHost, Placement};
pub use slot::{ChunkSlot, RebindOutcome, SlotId};
pub use pool::SlotPool;
pub use window::{StreamWindow, WindowDiff};
pub use controller::{ChunkState, StreamingController, StreamingStats, TransitionReport};
