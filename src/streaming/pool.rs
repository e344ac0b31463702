//! Slot pool for recycling chunk slots.

use std::collections::HashMap;

use super::host::ChunkHost;
use super::slot::{ChunkSlot, SlotId};
use crate::world::index::ChunkIndex;

/// Growable pool of chunk slots
///
/// Slots are never destroyed. A slot is either resident (bound to exactly
/// one chunk index) or free (cleared, waiting on the free list).
pub struct SlotPool<H> {
    slots: Vec<ChunkSlot<H>>,
    /// Resident chunk index to slot, a bijection with the assigned slots
    resident: HashMap<ChunkIndex, SlotId>,
    /// Unassigned slots available for reuse
    free: Vec<SlotId>,
}

impl<H> SlotPool<H> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            resident: HashMap::new(),
            free: Vec::new(),
        }
    }

    /// Create a new slot and let the host build its root
    ///
    /// The slot starts unassigned and is not on the free list; the caller is
    /// expected to bind it right away.
    pub fn allocate<C>(&mut self, host: &mut C) -> SlotId
    where
        C: ChunkHost<Handle = H>,
    {
        let id = SlotId(self.slots.len());
        self.slots.push(ChunkSlot::new(id));
        host.create_slot(id);
        log::trace!("Allocated {}", id);
        id
    }

    /// Take a free slot, if any
    pub fn acquire_free(&mut self) -> Option<SlotId> {
        self.free.pop()
    }

    /// Return a cleared slot to the free list
    pub fn release(&mut self, id: SlotId) {
        debug_assert!(!self.slots[id.0].is_assigned(), "released slot must be cleared");
        self.free.push(id);
    }

    #[inline]
    pub fn get(&self, id: SlotId) -> &ChunkSlot<H> {
        &self.slots[id.0]
    }

    #[inline]
    pub fn get_mut(&mut self, id: SlotId) -> &mut ChunkSlot<H> {
        &mut self.slots[id.0]
    }

    /// Slot currently showing a chunk
    pub fn slot_for(&self, index: ChunkIndex) -> Option<SlotId> {
        self.resident.get(&index).copied()
    }

    /// Record that a slot now shows `index`
    pub fn bind(&mut self, index: ChunkIndex, id: SlotId) {
        let previous = self.resident.insert(index, id);
        debug_assert!(previous.is_none(), "chunk {} bound twice", index);
    }

    /// Forget the slot showing `index`, returning it
    pub fn unbind(&mut self, index: ChunkIndex) -> Option<SlotId> {
        self.resident.remove(&index)
    }

    /// Iterate over resident chunk indices and their slots
    pub fn iter_resident(&self) -> impl Iterator<Item = (ChunkIndex, SlotId)> + '_ {
        self.resident.iter().map(|(&index, &id)| (index, id))
    }

    pub fn resident_indices(&self) -> impl Iterator<Item = ChunkIndex> + '_ {
        self.resident.keys().copied()
    }

    /// Number of slots bound to a chunk
    pub fn resident_count(&self) -> usize {
        self.resident.len()
    }

    /// Number of free slots
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Total number of slots ever allocated
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate over every slot
    pub fn slots(&self) -> impl Iterator<Item = &ChunkSlot<H>> {
        self.slots.iter()
    }
}

impl<H> Default for SlotPool<H> {
    fn default() -> Self {
        Self::new()
    }
}
