//! Sparse hash grid for efficient spatial queries

use crate::core::types::Position;
use ahash::AHashMap;

/// Uniform grid over the plane; only occupied cells are stored
///
/// Items land in the cell `(floor(x / cell_size), floor(y / cell_size))` and
/// keep insertion order within that cell.
pub struct SparseHashGrid<T> {
    cell_size: f32,
    cells: AHashMap<(i32, i32), Vec<T>>,
}

impl<T: Copy> SparseHashGrid<T> {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: AHashMap::new(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[inline]
    pub fn cell_coord(&self, pos: Position) -> (i32, i32) {
        let size = f64::from(self.cell_size);
        (
            (f64::from(pos.x) / size).floor() as i32,
            (f64::from(pos.y) / size).floor() as i32,
        )
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn insert(&mut self, item: T, pos: Position) {
        let coord = self.cell_coord(pos);
        self.cells.entry(coord).or_default().push(item);
    }

    /// Number of occupied cells
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Query all items in neighboring cells (3x3 neighborhood)
    ///
    /// With `cell_size` above `radius` this is a superset of everything within
    /// `radius` of `pos`; callers filter by exact distance.
    pub fn query_neighbors(&self, pos: Position) -> impl Iterator<Item = T> + '_ {
        let (cx, cy) = self.cell_coord(pos);

        (-1..=1).flat_map(move |dx| {
            (-1..=1).flat_map(move |dy| {
                self.cells
                    .get(&(cx.saturating_add(dx), cy.saturating_add(dy)))
                    .into_iter()
                    .flatten()
                    .copied()
            })
        })
    }

    /// Rebuild grid from positioned items
    pub fn rebuild(&mut self, items: impl Iterator<Item = (T, Position)>) {
        self.clear();
        for (item, pos) in items {
            self.insert(item, pos);
        }
    }
}
