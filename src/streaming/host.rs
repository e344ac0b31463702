//! Seam between the streamer and the view layer that owns renderables
//!
//! The streamer never creates visuals itself. It tells a [`ChunkHost`] when
//! a slot root is created or moved and which objects to spawn or despawn;
//! the host hands back opaque handles for the objects it made.

use std::collections::HashMap;

use crate::core::types::Vec3;
use crate::streaming::slot::SlotId;
use crate::world::content::{CategoryId, Orientation};
use crate::world::index::{ChunkIndex, LocalCell};

/// One object to instantiate inside a slot
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement<'a> {
    pub category: CategoryId,
    /// Asset reference resolved from the category binding
    pub asset: &'a str,
    pub cell: LocalCell,
    /// Position relative to the slot root, in world units
    pub local_position: Vec3,
    pub orientation: Orientation,
}

/// View layer driven by the streamer
pub trait ChunkHost {
    /// Opaque handle to one spawned object
    type Handle;

    /// A new slot was allocated. Build its root and any fixed fixture (such
    /// as a floor) that belongs to the slot rather than its content.
    fn create_slot(&mut self, slot: SlotId);

    /// Instantiate one placed object as a child of the slot root
    fn spawn(&mut self, slot: SlotId, placement: &Placement<'_>) -> Self::Handle;

    /// Destroy an object previously returned by [`ChunkHost::spawn`]
    fn despawn(&mut self, slot: SlotId, handle: Self::Handle);

    /// Move the slot root to a chunk's world origin
    fn move_slot(&mut self, slot: SlotId, index: ChunkIndex, origin: Vec3);
}

/// Handle issued by [`HeadlessHost`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HeadlessHandle(pub u64);

/// Bookkeeping-only host for tools, benches and tests
///
/// Tracks live objects and slot labels without rendering anything.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    next_handle: u64,
    live: HashMap<HeadlessHandle, (SlotId, String)>,
    labels: HashMap<SlotId, String>,
    origins: HashMap<SlotId, Vec3>,
    spawned: u64,
    despawned: u64,
    moves: u64,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slot roots created
    pub fn slot_count(&self) -> usize {
        self.labels.len()
    }

    /// Objects currently alive across all slots
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Objects currently alive in one slot
    pub fn live_in_slot(&self, slot: SlotId) -> usize {
        self.live.values().filter(|(s, _)| *s == slot).count()
    }

    /// Label of a slot root ("Chunk x, z" once placed)
    pub fn label(&self, slot: SlotId) -> Option<&str> {
        self.labels.get(&slot).map(String::as_str)
    }

    /// Current world origin of a slot root
    pub fn origin(&self, slot: SlotId) -> Option<Vec3> {
        self.origins.get(&slot).copied()
    }

    pub fn spawned_total(&self) -> u64 {
        self.spawned
    }

    pub fn despawned_total(&self) -> u64 {
        self.despawned
    }

    pub fn move_total(&self) -> u64 {
        self.moves
    }
}

impl ChunkHost for HeadlessHost {
    type Handle = HeadlessHandle;

    fn create_slot(&mut self, slot: SlotId) {
        self.labels.insert(slot, format!("Slot {}", slot.0));
        self.origins.insert(slot, Vec3::ZERO);
    }

    fn spawn(&mut self, slot: SlotId, placement: &Placement<'_>) -> HeadlessHandle {
        let handle = HeadlessHandle(self.next_handle);
        self.next_handle += 1;
        self.spawned += 1;
        self.live.insert(handle, (slot, placement.asset.to_string()));
        handle
    }

    fn despawn(&mut self, _slot: SlotId, handle: HeadlessHandle) {
        if self.live.remove(&handle).is_some() {
            self.despawned += 1;
        } else {
            log::warn!("Despawn of unknown handle {:?}", handle);
        }
    }

    fn move_slot(&mut self, slot: SlotId, index: ChunkIndex, origin: Vec3) {
        self.moves += 1;
        self.labels.insert(slot, format!("Chunk {}", index));
        self.origins.insert(slot, origin);
    }
}
