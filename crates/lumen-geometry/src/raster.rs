//! Half-open, clipped band rasterization onto a permittivity field.
//!
//! Every writer takes signed ranges so that degenerate parameters
//! (negative widths, centres outside the grid) clip to nothing instead of
//! wrapping or panicking. There is no anti-aliasing: a cell is either core
//! or cladding.

use std::ops::Range;

use lumen_core::Field2D;

/// Intersect a signed half-open range with `[0, len)`.
fn clip(range: Range<i64>, len: usize) -> Range<usize> {
    let lo = range.start.clamp(0, len as i64) as usize;
    let hi = range.end.clamp(0, len as i64) as usize;
    lo..hi.max(lo)
}

/// Write `value` into rows `[y_lo, y_hi)` of column `x`.
///
/// Returns the number of cells written.
pub fn fill_column(eps: &mut Field2D, x: i64, rows: Range<i64>, value: f64) -> usize {
    if x < 0 || x >= eps.nx() as i64 {
        return 0;
    }
    let rows = clip(rows, eps.ny());
    let count = rows.len();
    for y in rows {
        eps.set(x as usize, y, value);
    }
    count
}

/// Write `value` into the rectangle `columns × rows`.
///
/// Returns the number of cells written.
pub fn fill_rect(eps: &mut Field2D, columns: Range<i64>, rows: Range<i64>, value: f64) -> usize {
    let columns = clip(columns, eps.nx());
    let mut count = 0;
    for x in columns {
        count += fill_column(eps, x as i64, rows.clone(), value);
    }
    count
}

/// Write a horizontal band `[center − half, center + half)` across
/// `columns`. Bounds saturate instead of overflowing.
pub fn fill_band(
    eps: &mut Field2D,
    columns: Range<i64>,
    center: i64,
    half: i64,
    value: f64,
) -> usize {
    let rows = center.saturating_sub(half)..center.saturating_add(half);
    fill_rect(eps, columns, rows, value)
}
