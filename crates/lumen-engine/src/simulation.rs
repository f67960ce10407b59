//! Lockstep simulation driver.
//!
//! [`Simulation`] ties geometry synthesis, the field-update engine and the
//! detector registry together. Each [`step()`](Simulation::step) advances
//! the fields once and records every active probe.
//!
//! # Ownership model
//!
//! `Simulation` is [`Send`]. Every mutating method takes `&mut self`, so a
//! restart can never overlap a step, and probe data is read between steps
//! through shared borrows.

use std::time::Instant;

use lumen_core::{AnalysisError, Field2D, Grid, ProbeError, ProbeId};
use lumen_geometry::{GeometrySynthesizer, Synthesis};

use crate::analysis::{TransmissionAnalyzer, TransmissionReport};
use crate::config::{resolve_step_count, ConfigError, SimConfig};
use crate::detector::DetectorRegistry;
use crate::metrics::StepMetrics;
use crate::stencil::{FdtdEngine, FieldState, StepSample};

// Fails to compile if any field is !Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Simulation>();
    }
};

/// A configured FDTD run on one fixed grid.
///
/// # Example
///
/// ```
/// use lumen_engine::{SimConfig, Simulation};
///
/// let mut sim = Simulation::new(SimConfig::default()).unwrap();
/// sim.run(200);
/// assert_eq!(sim.detectors().input_history().len(), 200);
/// let report = sim.analyze_output().unwrap();
/// assert!(report.efficiency_percent >= 0.0);
/// ```
pub struct Simulation {
    config: SimConfig,
    synthesis: Synthesis,
    engine: FdtdEngine,
    detectors: DetectorRegistry,
    analyzer: TransmissionAnalyzer,
    current_step: u64,
    last_metrics: StepMetrics,
}

impl Simulation {
    /// Validate `config`, synthesize its geometry and allocate all buffers.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] from [`SimConfig::validate`].
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let synthesis = GeometrySynthesizer::build(config.geometry, config.grid, &config.shape);
        let engine = FdtdEngine::new(
            &synthesis,
            config.polarization,
            config.source,
            config.damping,
        );
        let mut detectors = DetectorRegistry::new(config.grid, synthesis.output);
        detectors.set_ports(&synthesis.ports);
        let analyzer = TransmissionAnalyzer::new(synthesis.kind, synthesis.port_count());
        log::info!(
            "new {} simulation on {} ({})",
            synthesis.kind,
            config.grid,
            config.polarization.name()
        );
        Ok(Self {
            config,
            synthesis,
            engine,
            detectors,
            analyzer,
            current_step: 0,
            last_metrics: StepMetrics::default(),
        })
    }

    /// Execute one step and record every active probe.
    pub fn step(&mut self) -> StepSample {
        let start = Instant::now();
        let sample = self.engine.step(self.current_step);
        let stencil_done = Instant::now();
        self.detectors
            .record(self.engine.primary(), sample.source_amplitude);
        let end = Instant::now();

        self.current_step += 1;
        self.last_metrics = StepMetrics {
            total_us: micros(end - start),
            stencil_us: micros(stencil_done - start),
            record_us: micros(end - stencil_done),
        };
        sample
    }

    /// Execute `steps` steps. Returns the last sample, or `None` when
    /// `steps` is 0 (state is left untouched).
    pub fn run(&mut self, steps: u64) -> Option<StepSample> {
        let start = Instant::now();
        let mut last = None;
        for _ in 0..steps {
            last = Some(self.step());
        }
        if steps > 0 {
            log::info!(
                "ran {steps} steps of {} in {:.1} ms (now at step {})",
                self.synthesis.kind,
                start.elapsed().as_secs_f64() * 1e3,
                self.current_step
            );
        }
        last
    }

    /// Run a user-supplied step count; see [`resolve_step_count`].
    pub fn run_requested(&mut self, requested: Option<&str>) -> Option<StepSample> {
        let steps = resolve_step_count(requested, &self.config.grid);
        self.run(steps)
    }

    /// Zero the fields and recordings and return to step 0. Probes and
    /// geometry are kept.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.detectors.clear_recordings();
        self.current_step = 0;
        self.last_metrics = StepMetrics::default();
    }

    /// Start a new run with a new configuration on the same grid.
    ///
    /// The geometry is re-synthesized only when the topology or shape
    /// changed. Fields and recordings are always cleared; user probes
    /// persist and the main probe follows the new nominal output.
    ///
    /// # Errors
    ///
    /// [`ConfigError::GridMismatch`] if `config.grid` differs from the
    /// running grid, or any error from [`SimConfig::validate`]. On error
    /// the simulation is left unchanged.
    pub fn restart(&mut self, config: SimConfig) -> Result<(), ConfigError> {
        if config.grid != self.config.grid {
            return Err(ConfigError::GridMismatch {
                expected: self.config.grid,
                got: config.grid,
            });
        }
        config.validate()?;

        let geometry_changed =
            config.geometry != self.config.geometry || config.shape != self.config.shape;
        if geometry_changed {
            self.synthesis =
                GeometrySynthesizer::build(config.geometry, config.grid, &config.shape);
            self.analyzer =
                TransmissionAnalyzer::new(self.synthesis.kind, self.synthesis.port_count());
            self.detectors.set_ports(&self.synthesis.ports);
        }
        self.engine = FdtdEngine::new(
            &self.synthesis,
            config.polarization,
            config.source,
            config.damping,
        );
        self.detectors.clear_recordings();
        self.current_step = 0;
        self.last_metrics = StepMetrics::default();
        log::info!(
            "restart: {} {} ({}), geometry {}",
            self.synthesis.kind,
            config.grid,
            config.polarization.name(),
            if geometry_changed { "rebuilt" } else { "kept" }
        );
        self.config = config;
        Ok(())
    }

    /// Analyze a probe's samples against the input history it was
    /// recorded alongside. The main probe is analyzed together with the
    /// other output ports, as [`analyze_output`](Self::analyze_output).
    ///
    /// # Errors
    ///
    /// [`AnalysisError::Probe`] for an unknown id,
    /// [`AnalysisError::EmptySeries`] if the probe has no samples yet.
    pub fn analyze(&self, id: ProbeId) -> Result<TransmissionReport, AnalysisError> {
        if id.is_main() {
            return self.analyze_output();
        }
        let probe = self
            .detectors
            .get(id)
            .ok_or(ProbeError::UnknownProbe { id })?;
        let input = self.detectors.aligned_input(id)?;
        self.analyzer.analyze(&input, probe.samples())
    }

    /// Analyze every output port over the whole run, the main output
    /// first.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::EmptySeries`] before the first step.
    pub fn analyze_output(&self) -> Result<TransmissionReport, AnalysisError> {
        self.analyze_output_after(0)
    }

    /// Analyze every output port, ignoring port samples before step
    /// `settle` so the start-up transient does not set the output peaks.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::EmptySeries`] unless more than `settle` steps ran.
    pub fn analyze_output_after(&self, settle: usize) -> Result<TransmissionReport, AnalysisError> {
        // The main probe can't be paused, so every port series is aligned
        // with the whole input history.
        let ports: Vec<&[f64]> = self.detectors.port_series().collect();
        self.analyzer
            .analyze_ports(self.detectors.input_history(), &ports, settle)
    }

    /// Number of steps executed since the last reset or restart.
    pub fn current_step(&self) -> u64 {
        self.current_step
    }

    /// Active configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The fixed grid.
    pub fn grid(&self) -> Grid {
        self.config.grid
    }

    /// Current geometry: permittivity, source, output and ports.
    pub fn synthesis(&self) -> &Synthesis {
        &self.synthesis
    }

    /// Relative permittivity per cell.
    pub fn permittivity(&self) -> &Field2D {
        &self.synthesis.permittivity
    }

    /// The observed field component.
    pub fn primary(&self) -> &Field2D {
        self.engine.primary()
    }

    /// All three field components.
    pub fn fields(&self) -> &FieldState {
        self.engine.fields()
    }

    /// Probes and recordings.
    pub fn detectors(&self) -> &DetectorRegistry {
        &self.detectors
    }

    /// Mutable access for adding, removing and pausing probes.
    pub fn detectors_mut(&mut self) -> &mut DetectorRegistry {
        &mut self.detectors
    }

    /// Metrics from the most recent step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("geometry", &self.synthesis.kind)
            .field("grid", &self.config.grid)
            .field("polarization", &self.config.polarization)
            .field("current_step", &self.current_step)
            .field("probes", &self.detectors.len())
            .finish()
    }
}

fn micros(d: std::time::Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}
