//! Session cache of generated chunk content
//!
//! Content is generated at most once per chunk index for the lifetime of the
//! cache. Entries are never evicted: unloading a chunk only releases its
//! slot, so revisiting an index shows exactly the content it had before.

use std::collections::HashMap;
use std::sync::Arc;

use crate::generation::ChunkGenerator;
use crate::world::config::ChunkConfig;
use crate::world::content::ChunkContent;
use crate::world::index::ChunkIndex;

/// Append-only map from chunk index to generated content
#[derive(Default)]
pub struct ChunkContentCache {
    /// Generated content, shared with any slot displaying it
    entries: HashMap<ChunkIndex, Arc<ChunkContent>>,
    hits: u64,
    misses: u64,
}

impl ChunkContentCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the content for a chunk, generating it on first request
    ///
    /// Choosing `config` for the index is the caller's job; on a hit the
    /// stored value is returned unchanged and `config` is ignored.
    ///
    /// # Arguments
    /// * `index` - Chunk to look up
    /// * `config` - Configuration to generate with on a miss
    /// * `generator` - Generator invoked on a miss
    pub fn get_or_create(
        &mut self,
        index: ChunkIndex,
        config: &ChunkConfig,
        generator: &mut ChunkGenerator,
    ) -> Arc<ChunkContent> {
        self.get_or_insert_with(index, || generator.generate(index, config))
    }

    /// Get the content for a chunk, building it with `build` on a miss
    pub fn get_or_insert_with<F>(&mut self, index: ChunkIndex, build: F) -> Arc<ChunkContent>
    where
        F: FnOnce() -> ChunkContent,
    {
        if let Some(content) = self.entries.get(&index) {
            self.hits += 1;
            return Arc::clone(content);
        }

        self.misses += 1;
        log::trace!("Cache miss for chunk {}, generating", index);
        let content = Arc::new(build());
        self.entries.insert(index, Arc::clone(&content));
        content
    }

    /// Peek at cached content without generating
    pub fn get(&self, index: ChunkIndex) -> Option<&Arc<ChunkContent>> {
        self.entries.get(&index)
    }

    /// Check whether content was ever generated for a chunk
    pub fn contains(&self, index: ChunkIndex) -> bool {
        self.entries.contains_key(&index)
    }

    /// Number of chunks generated this session
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over every generated chunk index
    pub fn indices(&self) -> impl Iterator<Item = &ChunkIndex> {
        self.entries.keys()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::config::{SeedPolicy, WorldConfig};

    fn generator() -> ChunkGenerator {
        ChunkGenerator::new(10, SeedPolicy::Session { seed: Some(11) })
    }

    #[test]
    fn test_cache_new() {
        let cache = ChunkContentCache::new();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_get_or_create_returns_same_content() {
        let cfg = WorldConfig::default();
        let mut generator = generator();
        let mut cache = ChunkContentCache::new();

        for x in -3..=3 {
            for z in -3..=3 {
                let idx = ChunkIndex::new(x, z);
                let first = cache.get_or_create(idx, cfg.config_for(idx), &mut generator);
                let second = cache.get_or_create(idx, cfg.config_for(idx), &mut generator);
                assert!(Arc::ptr_eq(&first, &second));
            }
        }

        assert_eq!(cache.len(), 49);
        assert_eq!(cache.misses(), 49);
        assert_eq!(cache.hits(), 49);
        assert_eq!(generator.generated_count(), 49);
    }

    #[test]
    fn test_hit_ignores_config() {
        let cfg = WorldConfig::default();
        let mut generator = generator();
        let mut cache = ChunkContentCache::new();
        let idx = ChunkIndex::new(2, 2);

        let first = cache.get_or_create(idx, &cfg.default, &mut generator);
        let mut everything = cfg.default.clone();
        for category in &mut everything.categories {
            category.probability = 1.0;
        }
        let second = cache.get_or_create(idx, &everything, &mut generator);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(generator.generated_count(), 1);
    }

    #[test]
    fn test_get_or_insert_with_builds_once() {
        let mut cache = ChunkContentCache::new();
        let idx = ChunkIndex::new(0, 1);
        let mut builds = 0;

        for _ in 0..3 {
            cache.get_or_insert_with(idx, || {
                builds += 1;
                ChunkContent::empty()
            });
        }
        assert_eq!(builds, 1);
        assert!(cache.contains(idx));
        assert!(cache.get(ChunkIndex::new(5, 5)).is_none());
    }

    #[test]
    fn test_indices_iterator() {
        let mut cache = ChunkContentCache::new();
        cache.get_or_insert_with(ChunkIndex::new(1, 2), ChunkContent::empty);
        cache.get_or_insert_with(ChunkIndex::new(-4, 5), ChunkContent::empty);

        let indices: Vec<_> = cache.indices().copied().collect();
        assert_eq!(indices.len(), 2);
        assert!(indices.contains(&ChunkIndex::new(1, 2)));
        assert!(indices.contains(&ChunkIndex::new(-4, 5)));
    }
}
