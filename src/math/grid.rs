use std::collections::HashMap;

use super::GeometricPoint;

/// Integer cell coordinates in a [`SpatialGrid`].
pub(crate) type CellKey = (i64, i64, i64);

/// Uniform hash grid bucketing items by position.
///
/// The cell size is twice the lookup tolerance, so every point within
/// tolerance of a query lies in the query's cell or one of its 26 neighbors.
#[derive(Debug, Clone)]
pub(crate) struct SpatialGrid<T> {
    cell_size: f64,
    cells: HashMap<CellKey, Vec<T>>,
}

impl<T: Copy> SpatialGrid<T> {
    /// Creates an empty grid for lookups within `tolerance`.
    pub(crate) fn new(tolerance: f32) -> Self {
        Self {
            cell_size: f64::from(tolerance) * 2.0,
            cells: HashMap::new(),
        }
    }

    /// Returns the cell containing `point`.
    ///
    /// Coordinates outside the `i64` range saturate, which keeps far-away
    /// points together in the boundary cells.
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn cell_of(&self, point: &GeometricPoint) -> CellKey {
        (
            (f64::from(point.x) / self.cell_size).floor() as i64,
            (f64::from(point.y) / self.cell_size).floor() as i64,
            (f64::from(point.z) / self.cell_size).floor() as i64,
        )
    }

    /// Inserts `item` into the cell containing `point`.
    pub(crate) fn insert(&mut self, point: &GeometricPoint, item: T) {
        let cell = self.cell_of(point);
        self.cells.entry(cell).or_default().push(item);
    }

    /// Iterates over every item stored in the 3x3x3 block of cells around `point`.
    pub(crate) fn neighborhood(&self, point: &GeometricPoint) -> impl Iterator<Item = T> + '_ {
        let (cx, cy, cz) = self.cell_of(point);
        (-1..=1i64)
            .flat_map(move |dx| {
                (-1..=1i64).flat_map(move |dy| {
                    (-1..=1i64).filter_map(move |dz| {
                        Some((cx.checked_add(dx)?, cy.checked_add(dy)?, cz.checked_add(dz)?))
                    })
                })
            })
            .filter_map(|cell| self.cells.get(&cell))
            .flatten()
            .copied()
    }

    /// Number of occupied cells.
    pub(crate) fn occupied_cells(&self) -> usize {
        self.cells.len()
    }
}
