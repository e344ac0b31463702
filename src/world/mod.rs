//! World addressing, chunk content and configuration

pub mod index;
pub mod content;
pub mod config;

pub use index::{ChunkIndex, LocalCell};
pub use content::{BoundaryOpenings, CategoryId, ChunkContent, Orientation, PlacedObject};
pub use config::{ChunkConfig, ConfigRole, ContentCategory, SeedPolicy, WorldConfig};
