//! Streaming controller - keeps a window of chunks resident around an observer
//!
//! The controller is tick driven. Each tick converts the observer position to
//! a chunk index; when the index is unchanged nothing else happens. When it
//! changes, the desired window is diffed against the resident set and every
//! stale slot is rebound to one missing chunk, so a step costs only the
//! chunks that entered the window.

use std::sync::Arc;

use crate::core::types::Vec3;
use crate::generation::ChunkGenerator;
use crate::streaming::assets::AssetCatalog;
use crate::streaming::cache::ChunkContentCache;
use crate::streaming::host::ChunkHost;
use crate::streaming::pool::SlotPool;
use crate::streaming::slot::{ChunkSlot, SlotId};
use crate::streaming::window::StreamWindow;
use crate::world::config::WorldConfig;
use crate::world::content::ChunkContent;
use crate::world::index::ChunkIndex;

/// Residency of a chunk from the controller's point of view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChunkState {
    /// Never generated this session
    Unvisited,
    /// Generated and cached but not shown
    Cached,
    /// Bound to a slot and visible
    Resident,
}

/// Summary of one window transition
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransitionReport {
    /// Previous target, `None` for the initial populate
    pub from: Option<ChunkIndex>,
    pub to: ChunkIndex,
    /// Chunks that became resident
    pub entered: usize,
    /// Chunks that stopped being resident
    pub evicted: usize,
    /// Entered chunks whose content was generated (cache misses)
    pub generated: usize,
    /// New slots created for this transition
    pub slots_allocated: usize,
    /// Slots cleared and returned to the free list
    pub slots_released: usize,
}

/// Running totals over the controller's lifetime
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamingStats {
    pub ticks: u64,
    pub transitions: u64,
    pub rebinds: u64,
    pub slots_allocated: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    /// Placements skipped for lack of an asset binding
    pub skipped_placements: u64,
}

/// Owns the slot pool and content cache and drives both from observer motion
pub struct StreamingController<C: ChunkHost> {
    config: WorldConfig,
    chunk_edge: f32,
    radius: u32,
    /// Chunk the observer is in, `None` before the first tick
    target: Option<ChunkIndex>,
    pool: SlotPool<C::Handle>,
    cache: ChunkContentCache,
    generator: ChunkGenerator,
    catalog: AssetCatalog,
    host: C,
    stats: StreamingStats,
}

impl<C: ChunkHost> StreamingController<C> {
    /// Create a controller with asset bindings taken from the config
    ///
    /// Nothing is resident until the first [`tick`](Self::tick) or
    /// [`set_target`](Self::set_target).
    pub fn new(config: WorldConfig, host: C) -> Self {
        let catalog = AssetCatalog::from_config(&config);
        Self::with_catalog(config, catalog, host)
    }

    /// Create a controller with explicit asset bindings
    pub fn with_catalog(config: WorldConfig, catalog: AssetCatalog, host: C) -> Self {
        let config = config.validated();
        let generator = ChunkGenerator::new(config.chunk_size, config.seed);
        log::info!(
            "Streaming controller: {} cells per chunk, edge {} units, radius {}, {:?}",
            config.chunk_size,
            config.chunk_edge(),
            config.window_radius,
            generator.policy()
        );
        Self {
            chunk_edge: config.chunk_edge(),
            radius: (config.window_radius as u32).min(StreamWindow::MAX_RADIUS),
            config,
            target: None,
            pool: SlotPool::new(),
            cache: ChunkContentCache::new(),
            generator,
            catalog,
            host,
            stats: StreamingStats::default(),
        }
    }

    /// Advance one tick with the observer's current world position
    ///
    /// Returns `None` when the observer stayed in the same chunk.
    pub fn tick(&mut self, observer: Vec3) -> Option<TransitionReport> {
        self.stats.ticks += 1;
        let index = self.window_center(ChunkIndex::from_world_pos(observer, self.chunk_edge));
        if self.target == Some(index) {
            return None;
        }
        Some(self.retarget(index))
    }

    /// Center the window on a chunk directly
    ///
    /// Returns `None` if that chunk is already the target.
    pub fn set_target(&mut self, index: ChunkIndex) -> Option<TransitionReport> {
        let index = self.window_center(index);
        if self.target == Some(index) {
            return None;
        }
        Some(self.retarget(index))
    }

    /// Change the window radius, converging immediately if a target is set
    ///
    /// Negative radii are clamped to 0.
    pub fn set_window_radius(&mut self, radius: i32) -> Option<TransitionReport> {
        let radius = if radius < 0 {
            log::warn!("window radius {} is negative, clamping to 0", radius);
            0
        } else {
            (radius as u32).min(StreamWindow::MAX_RADIUS)
        };
        if radius == self.radius {
            return None;
        }
        self.radius = radius;
        self.config.window_radius = radius as i32;

        let previous = self.target?;
        // A larger window may need pulling back from the end of the index range
        let target = self.window_center(previous);
        self.target = Some(target);
        let report = self.converge(target, Some(previous));
        log::debug!(
            "Window radius now {}: +{} -{} chunks, {} slots released",
            radius, report.entered, report.evicted, report.slots_released
        );
        Some(report)
    }

    /// Center the window can take for a requested chunk at the current radius
    fn window_center(&self, index: ChunkIndex) -> ChunkIndex {
        StreamWindow::new(index, self.radius).center
    }

    fn retarget(&mut self, index: ChunkIndex) -> TransitionReport {
        let from = self.target.replace(index);
        let report = self.converge(index, from);
        self.stats.transitions += 1;

        match from {
            None => log::info!(
                "Initial populate around chunk {}: {} chunks, {} generated",
                index, report.entered, report.generated
            ),
            Some(prev) => log::debug!(
                "Target {} -> {}: +{} -{} chunks, {} generated",
                prev, index, report.entered, report.evicted, report.generated
            ),
        }
        report
    }

    /// Bring the resident set in line with the window around `center`
    fn converge(&mut self, center: ChunkIndex, from: Option<ChunkIndex>) -> TransitionReport {
        let window = StreamWindow::new(center, self.radius);
        let diff = window.diff(self.pool.resident_indices());

        let mut report = TransitionReport {
            from,
            to: center,
            entered: diff.missing.len(),
            evicted: diff.stale.len(),
            ..Default::default()
        };

        let mut stale = diff.stale;
        for index in diff.missing {
            let id = match stale.pop() {
                Some(old) => match self.pool.unbind(old) {
                    Some(id) => id,
                    None => self.spare_slot(window, &mut report),
                },
                None => self.spare_slot(window, &mut report),
            };

            if !self.cache.contains(index) {
                report.generated += 1;
            }
            let content = self.cache.get_or_create(index, self.config.config_for(index), &mut self.generator);
            self.bind_slot(id, index, content);
        }

        // Window shrank: clear what is left and keep it for later
        for old in stale {
            if let Some(id) = self.pool.unbind(old) {
                self.pool.get_mut(id).clear(&mut self.host);
                self.pool.release(id);
                report.slots_released += 1;
            }
        }

        debug_assert_eq!(self.pool.resident_count(), window.cell_count());
        report
    }

    /// A free slot, or a newly allocated one when none is free
    fn spare_slot(&mut self, window: StreamWindow, report: &mut TransitionReport) -> SlotId {
        if let Some(id) = self.pool.acquire_free() {
            return id;
        }
        if self.pool.len() >= window.cell_count() {
            // Only reachable when the pool is misconfigured or out of sync
            log::warn!(
                "Slot pool exhausted at {} slots for a {}-chunk window, growing",
                self.pool.len(),
                window.cell_count()
            );
        }
        report.slots_allocated += 1;
        self.stats.slots_allocated += 1;
        self.pool.allocate(&mut self.host)
    }

    fn bind_slot(&mut self, id: SlotId, index: ChunkIndex, content: Arc<ChunkContent>) {
        let origin = index.world_origin(self.config.chunk_size, self.config.cell_size);
        let outcome = self.pool.get_mut(id).rebind(
            index,
            content,
            origin,
            self.config.cell_size,
            &self.catalog,
            &mut self.host,
        );
        self.pool.bind(index, id);
        self.stats.rebinds += 1;
        self.stats.skipped_placements += outcome.skipped as u64;
    }

    /// Residency of a chunk
    pub fn chunk_state(&self, index: ChunkIndex) -> ChunkState {
        if self.pool.slot_for(index).is_some() {
            ChunkState::Resident
        } else if self.cache.contains(index) {
            ChunkState::Cached
        } else {
            ChunkState::Unvisited
        }
    }

    /// Chunk the window is centered on
    pub fn target_index(&self) -> Option<ChunkIndex> {
        self.target
    }

    pub fn window_radius(&self) -> u32 {
        self.radius
    }

    /// The current desired window, if a target is set
    pub fn window(&self) -> Option<StreamWindow> {
        self.target.map(|center| StreamWindow::new(center, self.radius))
    }

    pub fn resident_count(&self) -> usize {
        self.pool.resident_count()
    }

    /// Resident chunk indices (unordered)
    pub fn resident_indices(&self) -> impl Iterator<Item = ChunkIndex> + '_ {
        self.pool.resident_indices()
    }

    /// Slot showing a chunk, if resident
    pub fn slot_for(&self, index: ChunkIndex) -> Option<&ChunkSlot<C::Handle>> {
        self.pool.slot_for(index).map(|id| self.pool.get(id))
    }

    pub fn pool(&self) -> &SlotPool<C::Handle> {
        &self.pool
    }

    pub fn cache(&self) -> &ChunkContentCache {
        &self.cache
    }

    pub fn catalog(&self) -> &AssetCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn host(&self) -> &C {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut C {
        &mut self.host
    }

    /// Lifetime totals, including cache hit and miss counts
    pub fn stats(&self) -> StreamingStats {
        StreamingStats {
            cache_hits: self.cache.hits(),
            cache_misses: self.cache.misses(),
            ..self.stats
        }
    }
}
