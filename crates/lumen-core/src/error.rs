//! Error types for the Lumen FDTD engine.
//!
//! Organised by subsystem: grid construction, probe placement, and
//! transmission analysis. Configuration errors live next to the
//! configuration they validate in `lumen-engine`.

use std::error::Error;
use std::fmt;

use crate::id::ProbeId;

/// Errors from [`Grid`](crate::Grid) construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// Attempted to construct a grid with zero cells.
    EmptyGrid,
    /// A dimension exceeds what the coordinate type can address.
    DimensionTooLarge {
        /// Which dimension (`"nx"` or `"ny"`).
        name: &'static str,
        /// The requested size.
        value: usize,
        /// The maximum allowed size.
        max: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid must have at least one cell"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} = {value} exceeds maximum of {max}")
            }
        }
    }
}

impl Error for GridError {}

/// Errors from detector probe management.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProbeError {
    /// The requested probe coordinate lies outside the grid.
    ///
    /// Placement is rejected at the boundary; coordinates are never
    /// clamped into range.
    InvalidCoordinate {
        /// Requested column.
        x: i64,
        /// Requested row.
        y: i64,
        /// Grid width.
        nx: usize,
        /// Grid height.
        ny: usize,
    },
    /// No probe with this ID is registered.
    UnknownProbe {
        /// The missing ID.
        id: ProbeId,
    },
    /// The main output probe cannot be removed or deactivated.
    ProtectedProbe {
        /// The protected ID.
        id: ProbeId,
    },
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoordinate { x, y, nx, ny } => {
                write!(f, "probe coordinate ({x}, {y}) outside {nx}x{ny} grid")
            }
            Self::UnknownProbe { id } => write!(f, "no probe with id {id}"),
            Self::ProtectedProbe { id } => {
                write!(f, "probe {id} is the main output probe and always active")
            }
        }
    }
}

impl Error for ProbeError {}

/// Errors from transmission analysis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnalysisError {
    /// The output series holds no samples ("no data" yet).
    EmptySeries,
    /// The probe to analyze could not be resolved.
    Probe(ProbeError),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySeries => write!(f, "no data: output series is empty"),
            Self::Probe(e) => write!(f, "probe: {e}"),
        }
    }
}

impl Error for AnalysisError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Probe(e) => Some(e),
            Self::EmptySeries => None,
        }
    }
}

impl From<ProbeError> for AnalysisError {
    fn from(e: ProbeError) -> Self {
        Self::Probe(e)
    }
}
