//! Core types for the Lumen waveguide FDTD engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! fundamental abstractions shared by the geometry and engine crates:
//! the simulation [`Grid`], flat [`Field2D`] buffers, probe identifiers,
//! and the error taxonomy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub mod grid;
pub mod id;

pub use error::{AnalysisError, GridError, ProbeError};
pub use field::Field2D;
pub use grid::{Grid, GridCoord, PortList, PORT_MARGIN};
pub use id::ProbeId;
