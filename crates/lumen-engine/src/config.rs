//! Simulation configuration, validation, and error types.
//!
//! [`SimConfig`] is the input for constructing a
//! [`Simulation`](crate::Simulation). [`validate()`](SimConfig::validate)
//! checks structural invariants before any buffer is allocated.

use std::error::Error;
use std::f64::consts::PI;
use std::fmt;

use lumen_core::{Grid, GridError, PORT_MARGIN};
use lumen_geometry::{GeometryKind, ShapeParams};

use crate::source::{GaussianPulse, SourceError};
use crate::stencil::Polarization;

/// Default run length is this many steps per grid column.
pub const DEFAULT_STEPS_PER_COLUMN: u64 = 5;

/// Lower bound for [`suggested_damping`] on bends.
pub const MIN_SUGGESTED_DAMPING: f64 = 0.99;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SimConfig::validate()`] or restart.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The grid could not be constructed.
    Grid(GridError),
    /// The grid is too narrow to hold both the source and output columns.
    GridTooSmall {
        /// Configured width.
        nx: usize,
        /// Smallest accepted width.
        min: usize,
    },
    /// Damping is NaN, infinite, or outside `(0, 1]`.
    InvalidDamping {
        /// The invalid value.
        value: f64,
    },
    /// Source pulse parameters are unusable.
    InvalidSource(SourceError),
    /// A restart asked for a different grid than the running simulation.
    GridMismatch {
        /// Grid of the running simulation.
        expected: Grid,
        /// Grid in the new configuration.
        got: Grid,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::GridTooSmall { nx, min } => {
                write!(f, "grid width {nx} too small, need at least {min} columns")
            }
            Self::InvalidDamping { value } => {
                write!(f, "damping must lie in (0, 1], got {value}")
            }
            Self::InvalidSource(e) => write!(f, "invalid source: {e}"),
            Self::GridMismatch { expected, got } => {
                write!(f, "grid is fixed at {expected}, restart requested {got}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::InvalidSource(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<SourceError> for ConfigError {
    fn from(e: SourceError) -> Self {
        Self::InvalidSource(e)
    }
}

// ── SimConfig ──────────────────────────────────────────────────────

/// Everything needed to build or restart a simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// Cell grid. Fixed for the lifetime of a simulation.
    pub grid: Grid,
    /// Waveguide topology.
    pub geometry: GeometryKind,
    /// Topology dimensions and material.
    pub shape: ShapeParams,
    /// Which field component is observed.
    pub polarization: Polarization,
    /// Uniform per-step damping of the primary field. `None` disables it.
    pub damping: Option<f64>,
    /// Injected pulse.
    pub source: GaussianPulse,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid: Grid::default(),
            geometry: GeometryKind::default(),
            shape: ShapeParams::default(),
            polarization: Polarization::default(),
            damping: None,
            source: GaussianPulse::default(),
        }
    }
}

impl SimConfig {
    /// Default configuration on an `nx * ny` grid.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Grid`] if the grid cannot be constructed.
    pub fn sized(nx: usize, ny: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            grid: Grid::new(nx, ny)?,
            ..Self::default()
        })
    }

    /// Same configuration with a different topology.
    pub fn with_geometry(mut self, geometry: GeometryKind) -> Self {
        self.geometry = geometry;
        self
    }

    /// Same configuration with different shape parameters.
    pub fn with_shape(mut self, shape: ShapeParams) -> Self {
        self.shape = shape;
        self
    }

    /// Same configuration with a different polarization.
    pub fn with_polarization(mut self, polarization: Polarization) -> Self {
        self.polarization = polarization;
        self
    }

    /// Same configuration with damping set (or cleared).
    pub fn with_damping(mut self, damping: Option<f64>) -> Self {
        self.damping = damping;
        self
    }

    /// Enable the geometry's [`suggested_damping`], if it has one.
    pub fn with_suggested_damping(mut self) -> Self {
        self.damping = suggested_damping(self.geometry, &self.shape);
        self
    }

    /// Smallest accepted grid width: both port margins plus one column.
    pub fn min_nx() -> usize {
        2 * PORT_MARGIN + 1
    }

    /// Check structural invariants.
    ///
    /// # Errors
    ///
    /// [`ConfigError::GridTooSmall`], [`ConfigError::InvalidDamping`] or
    /// [`ConfigError::InvalidSource`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min = Self::min_nx();
        if self.grid.nx() < min {
            return Err(ConfigError::GridTooSmall {
                nx: self.grid.nx(),
                min,
            });
        }
        if let Some(value) = self.damping {
            if !value.is_finite() || value <= 0.0 || value > 1.0 {
                return Err(ConfigError::InvalidDamping { value });
            }
        }
        self.source.validate()?;
        Ok(())
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Number of steps to run for a user-supplied request.
///
/// A non-negative integer (surrounding whitespace ignored) is used as-is.
/// Missing, non-numeric, or negative text falls back to
/// [`DEFAULT_STEPS_PER_COLUMN`]` × nx` and logs a warning.
///
/// # Examples
///
/// ```
/// use lumen_core::Grid;
/// use lumen_engine::config::resolve_step_count;
///
/// let grid = Grid::default();
/// assert_eq!(resolve_step_count(Some("600"), &grid), 600);
/// assert_eq!(resolve_step_count(Some("lots"), &grid), 1500);
/// assert_eq!(resolve_step_count(None, &grid), 1500);
/// ```
pub fn resolve_step_count(requested: Option<&str>, grid: &Grid) -> u64 {
    let fallback = DEFAULT_STEPS_PER_COLUMN * grid.nx() as u64;
    match requested.map(str::trim) {
        None | Some("") => fallback,
        Some(text) => match text.parse::<u64>() {
            Ok(steps) => steps,
            Err(_) => {
                log::warn!("invalid step count {text:?}, running {fallback} steps");
                fallback
            }
        },
    }
}

/// Heuristic uniform damping standing in for radiation loss.
///
/// S-bends lose more as their peak curvature
/// `κ = π²·|offset| / (2·span²)` rises: `1 − 0.05·κ`, clamped to
/// `[0.99, 1)`. Y-branches lose `0.001·|slope|` per step. Other
/// topologies return `None`.
pub fn suggested_damping(kind: GeometryKind, shape: &ShapeParams) -> Option<f64> {
    match kind {
        GeometryKind::SBend => {
            let span = shape.bend_span.abs().max(1.0);
            let curvature = PI * PI * shape.bend_offset.abs() / (2.0 * span * span);
            let damping = (1.0 - 0.05 * curvature).max(MIN_SUGGESTED_DAMPING);
            (damping < 1.0).then_some(damping)
        }
        GeometryKind::YBranch => {
            let damping = 1.0 - 0.001 * shape.branch_slope.abs();
            (damping < 1.0 && damping > 0.0).then_some(damping)
        }
        _ => None,
    }
}
