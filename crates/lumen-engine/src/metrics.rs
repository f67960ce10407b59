//! Per-step performance metrics for the simulation driver.

/// Timing collected during a single step.
///
/// All durations are in microseconds. The driver overwrites these after
/// every [`Simulation::step`](crate::Simulation::step).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step.
    pub total_us: u64,
    /// Time spent in the field-update stencil, source and damping included.
    pub stencil_us: u64,
    /// Time spent appending probe samples and the input history.
    pub record_us: u64,
}
