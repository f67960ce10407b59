//! Read-only inspection of synthesized permittivity maps.

use std::collections::VecDeque;

use lumen_core::{Field2D, GridCoord};

use crate::params::CLADDING_PERMITTIVITY;

fn is_core(value: f64) -> bool {
    value > CLADDING_PERMITTIVITY
}

/// Number of cells holding core (above-cladding) permittivity.
pub fn core_cell_count(eps: &Field2D) -> usize {
    eps.as_slice().iter().filter(|&&v| is_core(v)).count()
}

/// Whether `a` and `b` are joined by a 4-connected path of core cells.
///
/// Returns `false` if either endpoint is outside the grid or is cladding.
pub fn core_connected(eps: &Field2D, a: GridCoord, b: GridCoord) -> bool {
    let grid = eps.grid();
    let (nx, ny) = (grid.nx(), grid.ny());
    if a.x >= nx || a.y >= ny || b.x >= nx || b.y >= ny {
        return false;
    }
    if !is_core(eps.at(a)) || !is_core(eps.at(b)) {
        return false;
    }

    let mut seen = vec![false; grid.cell_count()];
    let mut queue = VecDeque::new();
    seen[grid.index(a.x, a.y)] = true;
    queue.push_back(a);

    while let Some(c) = queue.pop_front() {
        if c == b {
            return true;
        }
        let mut visit = |x: usize, y: usize| {
            let i = grid.index(x, y);
            if !seen[i] && is_core(eps.get(x, y)) {
                seen[i] = true;
                queue.push_back(GridCoord::new(x, y));
            }
        };
        if c.x > 0 {
            visit(c.x - 1, c.y);
        }
        if c.x + 1 < nx {
            visit(c.x + 1, c.y);
        }
        if c.y > 0 {
            visit(c.x, c.y - 1);
        }
        if c.y + 1 < ny {
            visit(c.x, c.y + 1);
        }
    }
    false
}
