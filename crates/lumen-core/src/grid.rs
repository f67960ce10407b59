//! The fixed 2D simulation grid and grid coordinates.

use smallvec::SmallVec;
use std::fmt;

use crate::error::GridError;

/// Distance (in cells) of the source column from the left edge and of the
/// default output column from the right edge.
pub const PORT_MARGIN: usize = 30;

/// An integer cell coordinate `(x, y)` with `x` along the propagation
/// axis (columns) and `y` transverse (rows).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoord {
    /// Column, `0 <= x < nx`.
    pub x: usize,
    /// Row, `0 <= y < ny`.
    pub y: usize,
}

impl GridCoord {
    /// Construct a coordinate. Bounds are not checked here; use
    /// [`Grid::checked_coord`] for untrusted input.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Port centres reported by geometry synthesis. No topology has more than
/// four output ports, so these stay inline.
pub type PortList = SmallVec<[GridCoord; 4]>;

/// A two-dimensional `nx * ny` cell grid with unit spacing.
///
/// All field and material buffers of a run share one grid. Cells are
/// stored row-major: `index(x, y) = y * nx + x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    nx: usize,
    ny: usize,
}

impl Grid {
    /// Default working width (propagation axis).
    pub const DEFAULT_NX: usize = 300;
    /// Default working height (transverse axis).
    pub const DEFAULT_NY: usize = 200;
    /// Maximum dimension size: coordinates are exchanged as `i64` and
    /// indices as `usize`, and both must address every cell.
    pub const MAX_DIM: usize = i32::MAX as usize;

    /// Create an `nx * ny` grid.
    ///
    /// Returns `Err(GridError::EmptyGrid)` if either dimension is 0, or
    /// `Err(GridError::DimensionTooLarge)` if either exceeds [`Self::MAX_DIM`].
    ///
    /// # Examples
    ///
    /// ```
    /// use lumen_core::Grid;
    ///
    /// let grid = Grid::new(300, 200).unwrap();
    /// assert_eq!(grid.cell_count(), 60_000);
    /// assert_eq!(grid.mid_y(), 100);
    /// ```
    pub fn new(nx: usize, ny: usize) -> Result<Self, GridError> {
        if nx == 0 || ny == 0 {
            return Err(GridError::EmptyGrid);
        }
        if nx > Self::MAX_DIM {
            return Err(GridError::DimensionTooLarge {
                name: "nx",
                value: nx,
                max: Self::MAX_DIM,
            });
        }
        if ny > Self::MAX_DIM {
            return Err(GridError::DimensionTooLarge {
                name: "ny",
                value: ny,
                max: Self::MAX_DIM,
            });
        }
        Ok(Self { nx, ny })
    }

    /// Width in cells.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Height in cells.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.nx * self.ny
    }

    /// Always returns `false`; construction rejects empty grids.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Flat buffer index of `(x, y)`. The caller guarantees bounds.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.nx && y < self.ny);
        y * self.nx + x
    }

    /// Whether `(x, y)` lies inside the grid.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.nx as u64 && (y as u64) < self.ny as u64
    }

    /// Convert untrusted signed coordinates into a [`GridCoord`], or
    /// `None` if they fall outside the grid.
    pub fn checked_coord(&self, x: i64, y: i64) -> Option<GridCoord> {
        if self.contains(x, y) {
            Some(GridCoord::new(x as usize, y as usize))
        } else {
            None
        }
    }

    /// Clamp a signed row into `[0, ny)`.
    pub fn clamp_y(&self, y: i64) -> usize {
        y.clamp(0, self.ny as i64 - 1) as usize
    }

    /// The transverse centre row, `ny / 2`.
    pub fn mid_y(&self) -> usize {
        self.ny / 2
    }

    /// Source injection point: [`PORT_MARGIN`] cells in from the left edge
    /// on the centre row (clamped for grids narrower than the margin).
    pub fn source_coord(&self) -> GridCoord {
        GridCoord::new(PORT_MARGIN.min(self.nx - 1), self.mid_y())
    }

    /// Column of the nominal output, [`PORT_MARGIN`] cells in from the
    /// right edge (clamped for grids narrower than the margin).
    pub fn output_x(&self) -> usize {
        self.nx.saturating_sub(PORT_MARGIN).min(self.nx - 1)
    }

    /// Default output point on the centre row.
    pub fn default_output(&self) -> GridCoord {
        GridCoord::new(self.output_x(), self.mid_y())
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            nx: Self::DEFAULT_NX,
            ny: Self::DEFAULT_NY,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.nx, self.ny)
    }
}
