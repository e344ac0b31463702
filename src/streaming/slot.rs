//! Reusable chunk slots
//!
//! A slot is the visible container for one chunk. Slots are created once and
//! then rebound to new chunk indices as the window slides; only their
//! content children are destroyed and rebuilt, never the slot root itself.

use std::fmt;
use std::sync::Arc;

use crate::core::types::Vec3;
use crate::streaming::assets::AssetCatalog;
use crate::streaming::host::{ChunkHost, Placement};
use crate::world::content::ChunkContent;
use crate::world::index::{ChunkIndex, LocalCell};

/// Stable identity of a slot in the pool, independent of its chunk
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub usize);

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {}", self.0)
    }
}

/// What a rebind did
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RebindOutcome {
    /// Children destroyed from the previous binding
    pub released: usize,
    /// Children spawned for the new content
    pub spawned: usize,
    /// Placements skipped because their category has no asset bound
    pub skipped: usize,
}

/// A visible chunk container
pub struct ChunkSlot<H> {
    id: SlotId,
    /// Chunk currently shown, `None` while unassigned
    index: Option<ChunkIndex>,
    /// Content currently instantiated
    content: Option<Arc<ChunkContent>>,
    origin: Vec3,
    /// Spawned content objects, exclusively owned by this slot
    children: Vec<H>,
    rebinds: u64,
}

impl<H> ChunkSlot<H> {
    pub(crate) fn new(id: SlotId) -> Self {
        Self {
            id,
            index: None,
            content: None,
            origin: Vec3::ZERO,
            children: Vec::new(),
            rebinds: 0,
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    /// Chunk this slot currently represents
    pub fn current_index(&self) -> Option<ChunkIndex> {
        self.index
    }

    pub fn content(&self) -> Option<&Arc<ChunkContent>> {
        self.content.as_ref()
    }

    /// World origin of the slot root
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Number of spawned content objects
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_assigned(&self) -> bool {
        self.index.is_some()
    }

    /// Times this slot has been rebound
    pub fn rebind_count(&self) -> u64 {
        self.rebinds
    }

    /// Show a different chunk in this slot
    ///
    /// Destroys every content child from the previous binding (the slot's own
    /// fixture is the host's and is left alone), spawns one child per
    /// placement in `content`, then moves the slot root to `origin`.
    /// Placements whose category has no bound asset are skipped and logged;
    /// the rest of the content is still spawned.
    ///
    /// # Arguments
    /// * `index` - Chunk the slot will represent
    /// * `content` - Content to instantiate
    /// * `origin` - World origin of the chunk
    /// * `cell_size` - World units per cell, scales local cell positions
    /// * `catalog` - Category to asset bindings
    /// * `host` - View layer that creates and destroys objects
    pub fn rebind<C>(
        &mut self,
        index: ChunkIndex,
        content: Arc<ChunkContent>,
        origin: Vec3,
        cell_size: f32,
        catalog: &AssetCatalog,
        host: &mut C,
    ) -> RebindOutcome
    where
        C: ChunkHost<Handle = H>,
    {
        let released = self.release_children(host);

        // Sorted so spawn order does not depend on hash iteration
        let mut cells: Vec<(&LocalCell, _)> = content.iter().collect();
        cells.sort_unstable_by_key(|(cell, _)| **cell);

        let mut spawned = 0;
        let mut skipped = 0;
        for (cell, placed) in cells {
            let Some(asset) = catalog.resolve(placed.category, placed.variant) else {
                skipped += 1;
                continue;
            };
            let placement = Placement {
                category: placed.category,
                asset,
                cell: *cell,
                local_position: cell.local_position(cell_size),
                orientation: placed.orientation,
            };
            self.children.push(host.spawn(self.id, &placement));
            spawned += 1;
        }

        if skipped > 0 {
            log::warn!(
                "Chunk {}: skipped {} placements with no asset bound",
                index, skipped
            );
        }

        self.index = Some(index);
        self.content = Some(content);
        self.origin = origin;
        self.rebinds += 1;
        host.move_slot(self.id, index, origin);

        log::trace!("Rebound {} to chunk {} ({} objects)", self.id, index, spawned);

        RebindOutcome { released, spawned, skipped }
    }

    /// Destroy all content and mark the slot unassigned
    ///
    /// Returns the number of children destroyed.
    pub fn clear<C>(&mut self, host: &mut C) -> usize
    where
        C: ChunkHost<Handle = H>,
    {
        let released = self.release_children(host);
        self.index = None;
        self.content = None;
        released
    }

    fn release_children<C>(&mut self, host: &mut C) -> usize
    where
        C: ChunkHost<Handle = H>,
    {
        let released = self.children.len();
        for handle in self.children.drain(..) {
            host.despawn(self.id, handle);
        }
        released
    }
}
