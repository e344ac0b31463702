//! Random object placement on a chunk's cell grid
//!
//! Categories are applied in priority order. For each category the interior
//! cells are scanned x-major (outer loop x, inner loop z, both ascending);
//! a cell not already claimed draws a sample in `[0, 1)` and is claimed when
//! the sample is `<=` the category's probability. A claim then draws a
//! variant index and an orientation.
//!
//! The outermost ring of the grid (grid coordinate 0 or `size - 1` on either
//! axis) is reserved for boundary walls and never receives content.

use std::collections::HashMap;

use crate::generation::rng::RandomSource;
use crate::world::config::ContentCategory;
use crate::world::content::{Orientation, PlacedObject};
use crate::world::index::LocalCell;

/// Places category content on the interior cells of a square chunk grid
#[derive(Clone, Copy, Debug)]
pub struct RandomObjectPlacer {
    size: u32,
}

impl RandomObjectPlacer {
    /// Create a placer for chunks of `size` cells per edge (minimum 1)
    pub fn new(size: u32) -> Self {
        Self { size: size.max(1) }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Interior cells in scan order
    pub fn interior_cells(&self) -> impl Iterator<Item = LocalCell> + '_ {
        let size = self.size;
        let last = size.saturating_sub(1);
        (1..last).flat_map(move |gx| (1..last).map(move |gz| LocalCell::from_grid(gx, gz, size)))
    }

    /// Number of cells eligible for placement
    pub fn interior_cell_count(&self) -> usize {
        let inner = self.size.saturating_sub(2) as usize;
        inner * inner
    }

    /// Produce a sparse placement map for one chunk
    ///
    /// # Arguments
    /// * `categories` - Candidate categories, highest priority first
    /// * `rng` - Source of uniform draws; the result is reproducible for a
    ///   reproducible sequence
    pub fn place<R: RandomSource + ?Sized>(
        &self,
        categories: &[ContentCategory],
        rng: &mut R,
    ) -> HashMap<LocalCell, PlacedObject> {
        let mut cells: HashMap<LocalCell, PlacedObject> = HashMap::new();

        for category in categories {
            // Zero chance never claims, skip the scan and its draws
            if category.probability <= 0.0 {
                continue;
            }

            let variants = category.assets.len().max(1);

            for cell in self.interior_cells() {
                if cells.contains_key(&cell) {
                    continue;
                }

                if rng.next_unit() <= category.probability {
                    let variant = rng.next_index(variants) as u32;
                    let orientation = Orientation::from_quarter_turns(rng.next_index(4));
                    cells.insert(cell, PlacedObject {
                        category: category.id,
                        variant,
                        orientation,
                    });
                }
            }
        }

        log::trace!("Placed {} objects on {} interior cells", cells.len(), self.interior_cell_count());
        cells
    }
}
