//! Flat, pre-allocated 2D field buffers.

use crate::grid::{Grid, GridCoord};

/// A scalar value per grid cell, stored row-major in one allocation.
///
/// Used for the permittivity map, the update coefficient, and the three
/// FDTD field components. Buffers are allocated once per grid and then
/// mutated in place; nothing here reallocates after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Field2D {
    grid: Grid,
    data: Vec<f64>,
}

impl Field2D {
    /// A field filled with zeros.
    pub fn zeros(grid: Grid) -> Self {
        Self::filled(grid, 0.0)
    }

    /// A field with every cell set to `value`.
    pub fn filled(grid: Grid, value: f64) -> Self {
        Self {
            grid,
            data: vec![value; grid.cell_count()],
        }
    }

    /// The grid this field lives on.
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Width in cells.
    pub fn nx(&self) -> usize {
        self.grid.nx()
    }

    /// Height in cells.
    pub fn ny(&self) -> usize {
        self.grid.ny()
    }

    /// Value at `(x, y)`. Panics if out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[self.grid.index(x, y)]
    }

    /// Value at a grid coordinate. Panics if out of bounds.
    #[inline]
    pub fn at(&self, coord: GridCoord) -> f64 {
        self.get(coord.x, coord.y)
    }

    /// Set the value at `(x, y)`. Panics if out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        let i = self.grid.index(x, y);
        self.data[i] = value;
    }

    /// Add `delta` to the value at a grid coordinate.
    #[inline]
    pub fn add_at(&mut self, coord: GridCoord, delta: f64) {
        let i = self.grid.index(coord.x, coord.y);
        self.data[i] += delta;
    }

    /// One row (fixed `y`) as a slice of `nx` values.
    pub fn row(&self, y: usize) -> &[f64] {
        let start = y * self.grid.nx();
        &self.data[start..start + self.grid.nx()]
    }

    /// Read-only view of the flat row-major buffer.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable view of the flat row-major buffer.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Reset every cell to `value` without reallocating.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Multiply every cell by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.data {
            *v *= factor;
        }
    }

    /// Largest absolute value in the field (0.0 for an all-zero field).
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0, |m, v| m.max(v.abs()))
    }

    /// Smallest value in the field.
    pub fn min_value(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Sum of squared values, a cheap proxy for field energy.
    pub fn energy(&self) -> f64 {
        self.data.iter().map(|v| v * v).sum()
    }

    /// A new field holding `f(value)` for every cell.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            grid: self.grid,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(4, 3).unwrap()
    }

    #[test]
    fn zeros_has_cell_count_len() {
        let f = Field2D::zeros(grid());
        assert_eq!(f.as_slice().len(), 12);
        assert!(f.as_slice().iter().all(|&v| v == 0.0));
        assert_eq!(f.max_abs(), 0.0);
    }

    #[test]
    fn set_get_round_trip_uses_row_major() {
        let mut f = Field2D::zeros(grid());
        f.set(3, 1, 2.5);
        assert_eq!(f.get(3, 1), 2.5);
        assert_eq!(f.as_slice()[7], 2.5);
        assert_eq!(f.row(1), &[0.0, 0.0, 0.0, 2.5]);
    }

    #[test]
    fn add_at_accumulates() {
        let mut f = Field2D::zeros(grid());
        let c = GridCoord::new(1, 2);
        f.add_at(c, 0.5);
        f.add_at(c, -2.0);
        assert_eq!(f.at(c), -1.5);
        assert_eq!(f.max_abs(), 1.5);
    }

    #[test]
    fn scale_and_fill_keep_allocation() {
        let mut f = Field2D::filled(grid(), 2.0);
        let ptr = f.as_slice().as_ptr();
        f.scale(0.5);
        assert!(f.as_slice().iter().all(|&v| v == 1.0));
        f.fill(0.0);
        assert_eq!(f.as_slice().as_ptr(), ptr);
        assert_eq!(f.energy(), 0.0);
    }

    #[test]
    fn map_builds_derived_field() {
        let eps = Field2D::filled(grid(), 2.0);
        let coeff = eps.map(|e| 0.5 / e);
        assert!(coeff.as_slice().iter().all(|&v| (v - 0.25).abs() < 1e-15));
        assert_eq!(eps.min_value(), 2.0);
    }
}
