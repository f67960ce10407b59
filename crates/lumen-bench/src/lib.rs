//! Benchmark profiles and utilities for the Lumen FDTD engine.
//!
//! Provides pre-built [`SimConfig`] profiles for benchmarks, integration
//! tests and examples:
//!
//! - [`reference_profile`]: 300x200 straight guide, TM, no damping
//! - [`stress_profile`]: 900x600 straight guide (~540K cells)
//! - [`scenario`]: the reference grid with any topology
//! - [`mmi_profile`]: an `n`-port MMI splitter on the reference grid

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use lumen_core::Grid;
use lumen_engine::{Polarization, SimConfig};
use lumen_geometry::{GeometryKind, ShapeParams};

/// Steps used by the reference transmission scenario.
pub const REFERENCE_STEPS: u64 = 600;

/// Reference profile: the default 300x200 grid with a straight guide.
pub fn reference_profile() -> SimConfig {
    SimConfig::default()
}

/// Stress profile: a 900x600 straight guide, 9x the reference cell count.
pub fn stress_profile() -> SimConfig {
    SimConfig {
        grid: stress_grid(),
        ..SimConfig::default()
    }
}

/// The reference grid with `kind` and default shape parameters.
pub fn scenario(kind: GeometryKind) -> SimConfig {
    SimConfig::default().with_geometry(kind)
}

/// The reference grid with `kind`, observed in `polarization`.
pub fn scenario_with(kind: GeometryKind, polarization: Polarization) -> SimConfig {
    scenario(kind).with_polarization(polarization)
}

/// An MMI splitter with `ports` outputs (clamped to 2–4 by synthesis).
pub fn mmi_profile(ports: u32) -> SimConfig {
    scenario(GeometryKind::Mmi).with_shape(ShapeParams::default().with_port_count(ports))
}

fn stress_grid() -> Grid {
    match Grid::new(900, 600) {
        Ok(grid) => grid,
        Err(_) => Grid::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_profile_validates() {
        reference_profile().validate().unwrap();
        assert_eq!(reference_profile().grid, Grid::default());
    }

    #[test]
    fn stress_profile_validates() {
        let config = stress_profile();
        config.validate().unwrap();
        assert_eq!(config.grid.cell_count(), 540_000);
    }

    #[test]
    fn every_scenario_validates() {
        for kind in GeometryKind::ALL {
            scenario(kind).validate().unwrap();
            scenario_with(kind, Polarization::Te).validate().unwrap();
        }
        assert_eq!(mmi_profile(4).shape.port_count, 4);
    }
}
