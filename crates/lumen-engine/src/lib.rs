//! FDTD field updates, detectors, and the lockstep simulation driver.
//!
//! The engine advances a 2D leapfrog stencil over a synthesized
//! permittivity grid, injecting a Gaussian-modulated pulse at the source
//! and sampling `|primary|` at every active probe after each step.
//!
//! - [`stencil`]: [`Polarization`] variants and the [`FdtdEngine`].
//! - [`source`]: the stateless [`GaussianPulse`].
//! - [`detector`]: the [`DetectorRegistry`] and input history.
//! - [`analysis`]: peak-based [`TransmissionReport`]s.
//! - [`config`]: [`SimConfig`], [`ConfigError`] and run-length helpers.
//! - [`simulation`]: [`Simulation`], the user-facing driver.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod detector;
pub mod metrics;
pub mod simulation;
pub mod source;
pub mod stencil;

pub use analysis::{efficiency, port_share, TransmissionAnalyzer, TransmissionReport};
pub use config::{
    resolve_step_count, suggested_damping, ConfigError, SimConfig, DEFAULT_STEPS_PER_COLUMN,
};
pub use detector::{DetectorRegistry, PortTap, Probe};
pub use metrics::StepMetrics;
pub use simulation::Simulation;
pub use source::{GaussianPulse, SourceError};
pub use stencil::{FdtdEngine, FieldState, Polarization, StepSample};
