//! Lumen: a 2D FDTD engine for integrated-photonic waveguides.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Lumen sub-crates. For most users, adding `lumen` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use lumen::prelude::*;
//!
//! let config = SimConfig::default()
//!     .with_geometry(GeometryKind::from_name("s-bend"))
//!     .with_polarization(Polarization::from_label("TE"));
//! let mut sim = Simulation::new(config).unwrap();
//! assert_eq!(sim.synthesis().output, GridCoord::new(270, 130));
//!
//! let probe = sim.detectors_mut().add(150, 115).unwrap();
//! sim.run(100);
//! assert_eq!(sim.detectors().samples(probe).unwrap().len(), 100);
//! let report = sim.analyze_output().unwrap();
//! assert!(report.efficiency_percent.is_finite());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `lumen-core` | Grid, coordinates, field buffers, probe ids, errors |
//! | [`geometry`] | `lumen-geometry` | Topologies, shape parameters, rasterization |
//! | [`engine`] | `lumen-engine` | Stencil, source, detectors, analysis, driver |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Grid, coordinates, field buffers, ids and errors (`lumen-core`).
pub use lumen_core as types;

/// Waveguide topologies and rasterization (`lumen-geometry`).
///
/// [`geometry::GeometrySynthesizer::build`] turns a
/// [`geometry::GeometryKind`] and [`geometry::ShapeParams`] into a
/// permittivity grid plus its output coordinate.
pub use lumen_geometry as geometry;

/// Field updates, detectors and the simulation driver (`lumen-engine`).
///
/// [`engine::Simulation`] is the main entry point; [`engine::FdtdEngine`]
/// exposes the bare stencil.
pub use lumen_engine as engine;

/// Common imports for typical Lumen usage.
///
/// ```rust
/// use lumen::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use lumen_core::{Field2D, Grid, GridCoord, ProbeId};

    // Errors
    pub use lumen_core::{AnalysisError, GridError, ProbeError};

    // Geometry
    pub use lumen_geometry::{GeometryKind, GeometrySynthesizer, ShapeParams, Synthesis};

    // Engine
    pub use lumen_engine::{
        ConfigError, GaussianPulse, Polarization, SimConfig, Simulation, StepMetrics,
        TransmissionReport,
    };
}
