//! Placement results for a single chunk

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::world::index::LocalCell;

/// Identifier of a content category (obstacles, decorations, ...)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u16);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the four axis-aligned rotations about the vertical axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Deg0,
        Orientation::Deg90,
        Orientation::Deg180,
        Orientation::Deg270,
    ];

    /// Build from a number of clockwise quarter turns (wraps modulo 4)
    pub fn from_quarter_turns(turns: usize) -> Self {
        Self::ALL[turns % 4]
    }

    pub fn degrees(self) -> f32 {
        match self {
            Orientation::Deg0 => 0.0,
            Orientation::Deg90 => 90.0,
            Orientation::Deg180 => 180.0,
            Orientation::Deg270 => 270.0,
        }
    }
}

/// A single placed object inside a chunk
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlacedObject {
    /// Category that claimed the cell
    pub category: CategoryId,
    /// Index into the category's asset variants
    pub variant: u32,
    /// Rotation about the vertical axis
    pub orientation: Orientation,
}

/// Whether a passage toward the neighbouring chunk exists on each owned edge
///
/// Every chunk keeps a wall ring on all four sides. A chunk decides the
/// passages through its "up" (+z) and "right" (+x) walls; the passages
/// through its -x and -z walls are decided by the neighbours on those sides.
/// A way is open when its draw is `<=` the configured chance, so a chance of
/// 1.0 opens every way and 0.0 opens almost none.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BoundaryOpenings {
    pub up: bool,
    pub right: bool,
}

/// Immutable placement result for one chunk
///
/// Once built, a `ChunkContent` is never edited. It is shared behind an
/// `Arc` between the cache and any slot displaying it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkContent {
    cells: HashMap<LocalCell, PlacedObject>,
    boundary_openings: Option<BoundaryOpenings>,
}

impl ChunkContent {
    /// Create content from a finished placement map
    pub fn new(cells: HashMap<LocalCell, PlacedObject>, boundary_openings: Option<BoundaryOpenings>) -> Self {
        Self { cells, boundary_openings }
    }

    /// Content with no placements and no connectivity data
    pub fn empty() -> Self {
        Self::default()
    }

    /// Object placed at a cell, if any
    pub fn get(&self, cell: LocalCell) -> Option<&PlacedObject> {
        self.cells.get(&cell)
    }

    /// Iterate over every placement (no ordering guarantee)
    pub fn iter(&self) -> impl Iterator<Item = (&LocalCell, &PlacedObject)> {
        self.cells.iter()
    }

    /// Number of placed objects
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Connectivity flags, present only when the role models maze passages
    pub fn boundary_openings(&self) -> Option<BoundaryOpenings> {
        self.boundary_openings
    }

    /// Number of placements belonging to a category
    pub fn count_category(&self, category: CategoryId) -> usize {
        self.cells.values().filter(|p| p.category == category).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_quarter_turns() {
        assert_eq!(Orientation::from_quarter_turns(0), Orientation::Deg0);
        assert_eq!(Orientation::from_quarter_turns(3), Orientation::Deg270);
        assert_eq!(Orientation::from_quarter_turns(5), Orientation::Deg90);
        assert_eq!(Orientation::Deg180.degrees(), 180.0);
    }

    #[test]
    fn test_content_queries() {
        let mut cells = HashMap::new();
        let rock = PlacedObject { category: CategoryId(1), variant: 0, orientation: Orientation::Deg90 };
        let bush = PlacedObject { category: CategoryId(2), variant: 1, orientation: Orientation::Deg0 };
        cells.insert(LocalCell::new(0, 0), rock);
        cells.insert(LocalCell::new(1, -2), bush);
        cells.insert(LocalCell::new(2, 2), rock);

        let content = ChunkContent::new(cells, Some(BoundaryOpenings { up: true, right: false }));
        assert_eq!(content.len(), 3);
        assert_eq!(content.get(LocalCell::new(1, -2)), Some(&bush));
        assert!(content.get(LocalCell::new(3, 3)).is_none());
        assert_eq!(content.count_category(CategoryId(1)), 2);
        assert_eq!(content.boundary_openings(), Some(BoundaryOpenings { up: true, right: false }));
    }

    #[test]
    fn test_empty_content() {
        let content = ChunkContent::empty();
        assert!(content.is_empty());
        assert!(content.boundary_openings().is_none());
    }
}
