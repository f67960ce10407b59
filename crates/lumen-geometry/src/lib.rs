//! Waveguide geometry synthesis for the Lumen FDTD engine.
//!
//! Rasterizes a named photonic topology onto a permittivity grid:
//!
//! - [`GeometryKind::Straight`]: a single horizontal core.
//! - [`GeometryKind::SBend`]: raised-cosine lateral offset.
//! - [`GeometryKind::YBranch`]: a stem splitting into two linear arms.
//! - [`GeometryKind::Mmi`]: a multimode body feeding 2–4 output guides.
//! - [`GeometryKind::Grating`]: a straight core with periodic teeth.
//! - [`GeometryKind::Fallback`]: anything unrecognised, drawn straight.
//!
//! [`GeometrySynthesizer::build`] returns a single [`Synthesis`] holding
//! both the permittivity field and the nominal output coordinate, so the
//! two cannot drift apart when parameters change.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod inspect;
pub mod kind;
pub mod params;
pub mod raster;
pub mod synth;

pub use inspect::{core_cell_count, core_connected};
pub use kind::GeometryKind;
pub use params::{ShapeParams, CLADDING_PERMITTIVITY, NARROW_CORE_HALF_WIDTH};
pub use synth::{GeometrySynthesizer, Synthesis};
