//! World streaming configuration
//!
//! Configuration is consumed, not owned, by the streamer. Every recoverable
//! problem (out-of-range probability, negative radius, zero chunk size) is
//! clamped by [`WorldConfig::validated`] and reported through `log::warn!`
//! instead of aborting.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::types::Result;
use crate::world::content::CategoryId;
use crate::world::index::ChunkIndex;

/// How generation randomness is seeded
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SeedPolicy {
    /// One sequential generator for the whole session. Chunk content depends
    /// on the order in which chunks are first visited. `None` seeds from OS
    /// entropy.
    Session { seed: Option<u64> },
    /// Each chunk gets a generator derived from `(seed, index)`, so the same
    /// seed always yields the same world regardless of visiting order.
    PerChunk { seed: u64 },
}

impl Default for SeedPolicy {
    fn default() -> Self {
        SeedPolicy::Session { seed: None }
    }
}

/// A kind of content that may be placed on chunk cells
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentCategory {
    pub id: CategoryId,
    #[serde(default)]
    pub name: String,
    /// Chance in [0, 1] that an unclaimed interior cell receives this category
    pub probability: f32,
    /// Asset references, one per visual variant
    #[serde(default)]
    pub assets: Vec<String>,
}

impl ContentCategory {
    pub fn new(id: u16, name: impl Into<String>, probability: f32, assets: &[&str]) -> Self {
        Self {
            id: CategoryId(id),
            name: name.into(),
            probability,
            assets: assets.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Generation settings for one role (origin or default)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkConfig {
    /// Categories in priority order: earlier categories claim cells first
    pub categories: Vec<ContentCategory>,
    /// Chance for each owned edge to get a passage. `None` disables
    /// connectivity data entirely.
    pub open_way_chance: Option<f32>,
}

/// Which configuration a chunk is generated with
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfigRole {
    Origin,
    Default,
}

impl ConfigRole {
    pub fn for_index(index: ChunkIndex) -> Self {
        if index == ChunkIndex::ORIGIN {
            ConfigRole::Origin
        } else {
            ConfigRole::Default
        }
    }
}

/// Full configuration surface of the streamer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Cells per chunk edge (also the placement grid resolution)
    pub chunk_size: u32,
    /// World units per cell
    pub cell_size: f32,
    /// Chebyshev radius of the resident window, in chunks
    pub window_radius: i32,
    /// Seeding of the placement generator
    pub seed: SeedPolicy,
    /// Configuration for the chunk at index (0, 0)
    pub origin: ChunkConfig,
    /// Configuration for every other chunk
    pub default: ChunkConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunk_size: 10,
            cell_size: 1.0,
            window_radius: 5,
            seed: SeedPolicy::default(),
            origin: ChunkConfig {
                categories: vec![
                    ContentCategory::new(1, "obstacle", 0.0, &["rock_small", "rock_large"]),
                    ContentCategory::new(2, "decorative", 0.05, &["grass_tuft", "flowers"]),
                ],
                open_way_chance: None,
            },
            default: ChunkConfig {
                categories: vec![
                    ContentCategory::new(1, "obstacle", 0.1, &["rock_small", "rock_large"]),
                    ContentCategory::new(2, "decorative", 0.15, &["grass_tuft", "flowers"]),
                ],
                open_way_chance: None,
            },
        }
    }
}

impl WorldConfig {
    /// Load a configuration from a JSON file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded world config from {}", path.display());
        Ok(config)
    }

    /// Parse a configuration from JSON text and validate it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: WorldConfig = serde_json::from_str(json)?;
        Ok(config.validated())
    }

    /// Serialize to pretty JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// World length of one chunk edge
    pub fn chunk_edge(&self) -> f32 {
        self.chunk_size as f32 * self.cell_size
    }

    /// Configuration used to generate the given chunk
    pub fn config_for(&self, index: ChunkIndex) -> &ChunkConfig {
        self.config_for_role(ConfigRole::for_index(index))
    }

    pub fn config_for_role(&self, role: ConfigRole) -> &ChunkConfig {
        match role {
            ConfigRole::Origin => &self.origin,
            ConfigRole::Default => &self.default,
        }
    }

    /// Copy with every recoverable configuration error clamped
    pub fn validated(&self) -> Self {
        let mut config = self.clone();

        if config.chunk_size == 0 {
            log::warn!("chunk_size 0 is invalid, using 1");
            config.chunk_size = 1;
        }
        if !config.cell_size.is_finite() || config.cell_size <= 0.0 {
            log::warn!("cell_size {} is invalid, using 1.0", config.cell_size);
            config.cell_size = 1.0;
        }
        if config.window_radius < 0 {
            log::warn!("window_radius {} is negative, clamping to 0", config.window_radius);
            config.window_radius = 0;
        }

        validate_chunk_config(&mut config.origin, "origin");
        validate_chunk_config(&mut config.default, "default");
        config
    }
}

fn validate_chunk_config(config: &mut ChunkConfig, role: &str) {
    for category in &mut config.categories {
        let clamped = clamp_unit(category.probability);
        if clamped != category.probability {
            log::warn!(
                "{} config: category {} ({}) probability {} outside [0, 1], using {}",
                role, category.id, category.name, category.probability, clamped
            );
            category.probability = clamped;
        }
        if category.probability > 0.0 && category.assets.is_empty() {
            log::warn!(
                "{} config: category {} ({}) can be placed but has no assets bound",
                role, category.id, category.name
            );
        }
    }

    if let Some(chance) = config.open_way_chance {
        let clamped = clamp_unit(chance);
        if clamped != chance {
            log::warn!("{} config: open_way_chance {} outside [0, 1], using {}", role, chance, clamped);
            config.open_way_chance = Some(clamped);
        }
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let cfg = WorldConfig::default();
        assert_eq!(cfg.chunk_size, 10);
        assert_eq!(cfg.window_radius, 5);
        assert_eq!(cfg.chunk_edge(), 10.0);
        assert_eq!(cfg.validated(), cfg);
    }

    #[test]
    fn test_role_selection() {
        let cfg = WorldConfig::default();
        assert_eq!(ConfigRole::for_index(ChunkIndex::ORIGIN), ConfigRole::Origin);
        assert_eq!(ConfigRole::for_index(ChunkIndex::new(0, 1)), ConfigRole::Default);
        assert_eq!(cfg.config_for(ChunkIndex::ORIGIN), &cfg.origin);
        assert_eq!(cfg.config_for(ChunkIndex::new(-1, 0)), &cfg.default);
    }

    #[test]
    fn test_validation_clamps() {
        let mut cfg = WorldConfig::default();
        cfg.chunk_size = 0;
        cfg.cell_size = -2.0;
        cfg.window_radius = -3;
        cfg.default.categories[0].probability = 1.5;
        cfg.default.categories[1].probability = f32::NAN;
        cfg.origin.categories[1].probability = -0.25;
        cfg.default.open_way_chance = Some(2.0);

        let v = cfg.validated();
        assert_eq!(v.chunk_size, 1);
        assert_eq!(v.cell_size, 1.0);
        assert_eq!(v.window_radius, 0);
        assert_eq!(v.default.categories[0].probability, 1.0);
        assert_eq!(v.default.categories[1].probability, 0.0);
        assert_eq!(v.origin.categories[1].probability, 0.0);
        assert_eq!(v.default.open_way_chance, Some(1.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg = WorldConfig::from_json_str(r#"{ "chunk_size": 16, "window_radius": -1 }"#).unwrap();
        assert_eq!(cfg.chunk_size, 16);
        assert_eq!(cfg.window_radius, 0);
        assert_eq!(cfg.cell_size, 1.0);
        assert_eq!(cfg.default, WorldConfig::default().default);
    }

    #[test]
    fn test_seed_policy_json() {
        let cfg = WorldConfig::from_json_str(r#"{ "seed": { "mode": "per_chunk", "seed": 42 } }"#).unwrap();
        assert_eq!(cfg.seed, SeedPolicy::PerChunk { seed: 42 });

        let cfg = WorldConfig::from_json_str(r#"{ "seed": { "mode": "session", "seed": null } }"#).unwrap();
        assert_eq!(cfg.seed, SeedPolicy::Session { seed: None });
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = r#"{
            "chunk_size": 8,
            "default": {
                "categories": [
                    { "id": 3, "name": "crate", "probability": 0.4, "assets": ["crate_a"] }
                ],
                "open_way_chance": 0.5
            }
        }"#;
        file.write_all(json.as_bytes()).unwrap();

        let cfg = WorldConfig::load(file.path()).unwrap();
        assert_eq!(cfg.chunk_size, 8);
        assert_eq!(cfg.default.categories.len(), 1);
        assert_eq!(cfg.default.categories[0].id, CategoryId(3));
        assert_eq!(cfg.default.open_way_chance, Some(0.5));
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            WorldConfig::load("/nonexistent/gridstream/world.json"),
            Err(crate::core::Error::Io(_))
        ));
        assert!(matches!(
            WorldConfig::from_json_str("{ not json"),
            Err(crate::core::Error::Json(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let cfg = WorldConfig::default();
        let json = cfg.to_json_string().unwrap();
        assert_eq!(WorldConfig::from_json_str(&json).unwrap(), cfg);
    }
}
