//! Streaming window logic for chunk residency.

use std::collections::HashSet;

use crate::world::index::ChunkIndex;

/// Square of chunk indices within a Chebyshev radius of a center chunk
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamWindow {
    pub center: ChunkIndex,
    pub radius: u32,
}

/// Difference between the resident set and a desired window
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WindowDiff {
    /// Resident chunks outside the window, sorted
    pub stale: Vec<ChunkIndex>,
    /// Window chunks with no resident slot, in window scan order
    pub missing: Vec<ChunkIndex>,
}

impl WindowDiff {
    pub fn is_empty(&self) -> bool {
        self.stale.is_empty() && self.missing.is_empty()
    }
}

impl StreamWindow {
    /// Largest radius whose window still fits in the `i32` index range
    pub const MAX_RADIUS: u32 = i32::MAX as u32 / 2;

    /// Create a window, clamping it to the representable index range
    ///
    /// The center is pulled in so that `center ± radius` never saturates;
    /// every index the window yields is then distinct.
    pub fn new(center: ChunkIndex, radius: u32) -> Self {
        let radius = radius.min(Self::MAX_RADIUS);
        let r = radius as i32;
        let center = ChunkIndex::new(
            center.x.clamp(i32::MIN + r, i32::MAX - r),
            center.z.clamp(i32::MIN + r, i32::MAX - r),
        );
        Self { center, radius }
    }

    /// Whether a chunk lies inside the window
    pub fn contains(&self, index: ChunkIndex) -> bool {
        self.center.chebyshev_distance(index) <= self.radius
    }

    /// Number of chunks in the window, `(2r + 1)^2`
    pub fn cell_count(&self) -> usize {
        let side = 2 * self.radius as usize + 1;
        side * side
    }

    /// Iterate over the window, x-major then z, ascending
    pub fn iter(&self) -> impl Iterator<Item = ChunkIndex> {
        let r = self.radius as i32;
        let center = self.center;
        (-r..=r).flat_map(move |dx| (-r..=r).map(move |dz| center.offset(dx, dz)))
    }

    /// Partition a resident set into stale and missing chunks
    pub fn diff<I>(&self, resident: I) -> WindowDiff
    where
        I: IntoIterator<Item = ChunkIndex>,
    {
        let resident: HashSet<ChunkIndex> = resident.into_iter().collect();

        let mut stale: Vec<ChunkIndex> = resident
            .iter()
            .copied()
            .filter(|&index| !self.contains(index))
            .collect();
        stale.sort_unstable();

        let missing = self.iter().filter(|index| !resident.contains(index)).collect();

        WindowDiff { stale, missing }
    }
}
