//! Grid-point probes and the per-step recording registry.
//!
//! The registry always holds the main output probe ([`ProbeId::MAIN`],
//! label `"OUT"`) at the geometry's nominal output; user probes are
//! added and removed freely. Every call to
//! [`record`](DetectorRegistry::record) appends `|primary|` for each
//! active probe and `|source|` to the input history, so a probe that was
//! active since the start of the run is index-aligned with that history.
//! Probes that were paused keep the history ranges they did sample.
//!
//! Besides probes, the registry taps every extra output port of the
//! geometry, so splitters can be analyzed across all arms.

use std::borrow::Cow;
use std::ops::Range;

use indexmap::IndexMap;
use lumen_core::{Field2D, Grid, GridCoord, ProbeError, ProbeId};

/// Label of the main output probe.
pub const MAIN_LABEL: &str = "OUT";

/// A named sampling point.
#[derive(Clone, Debug, PartialEq)]
pub struct Probe {
    id: ProbeId,
    label: String,
    coord: GridCoord,
    active: bool,
    samples: Vec<f64>,
    segments: Vec<Range<usize>>,
}

impl Probe {
    fn new(id: ProbeId, label: String, coord: GridCoord) -> Self {
        Self {
            id,
            label,
            coord,
            active: true,
            samples: Vec::new(),
            segments: Vec::new(),
        }
    }

    /// Registry-assigned identifier.
    pub fn id(&self) -> ProbeId {
        self.id
    }

    /// Display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Sampled cell.
    pub fn coord(&self) -> GridCoord {
        self.coord
    }

    /// Whether the probe records on each step.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Recorded `|primary|` magnitudes for the current run.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Input-history index of this probe's first sample in the current
    /// run, or `None` if it has not recorded yet.
    pub fn since_step(&self) -> Option<usize> {
        self.segments.first().map(|r| r.start)
    }

    /// Contiguous input-history ranges this probe sampled, in order. Their
    /// total length equals the sample count.
    pub fn segments(&self) -> &[Range<usize>] {
        &self.segments
    }

    /// Whether the samples are contiguous and index-aligned with the whole
    /// input history (recorded on every step since the run began).
    pub fn is_aligned(&self, history_len: usize) -> bool {
        match self.segments.as_slice() {
            [] => history_len == 0,
            [only] => *only == (0..history_len),
            _ => false,
        }
    }

    fn push(&mut self, step: usize, value: f64) {
        match self.segments.last_mut() {
            Some(last) if last.end == step => last.end += 1,
            _ => self.segments.push(step..step + 1),
        }
        self.samples.push(value);
    }

    fn clear(&mut self) {
        self.samples.clear();
        self.segments.clear();
    }
}

/// An always-on sampling point at a secondary output port.
#[derive(Clone, Debug, PartialEq)]
pub struct PortTap {
    coord: GridCoord,
    samples: Vec<f64>,
}

impl PortTap {
    /// Sampled cell.
    pub fn coord(&self) -> GridCoord {
        self.coord
    }

    /// Recorded `|primary|` magnitudes, one per step of the current run.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }
}

/// Probe storage plus the input history of the current run.
#[derive(Clone, Debug)]
pub struct DetectorRegistry {
    grid: Grid,
    probes: IndexMap<ProbeId, Probe>,
    ports: Vec<PortTap>,
    input_history: Vec<f64>,
    next_id: u32,
}

impl DetectorRegistry {
    /// Create a registry on `grid` with the main probe at `output`.
    ///
    /// `output` is clamped into the grid; synthesis never produces an
    /// out-of-range output, so this only guards hand-built coordinates.
    pub fn new(grid: Grid, output: GridCoord) -> Self {
        let mut probes = IndexMap::new();
        let coord = clamp_coord(grid, output);
        probes.insert(
            ProbeId::MAIN,
            Probe::new(ProbeId::MAIN, MAIN_LABEL.to_owned(), coord),
        );
        Self {
            grid,
            probes,
            ports: Vec::new(),
            input_history: Vec::new(),
            next_id: ProbeId::MAIN.0 + 1,
        }
    }

    /// Add an active probe labelled `P<id>` at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`ProbeError::InvalidCoordinate`] if `(x, y)` lies outside the
    /// grid; the registry is left unchanged and no id is consumed.
    pub fn add(&mut self, x: i64, y: i64) -> Result<ProbeId, ProbeError> {
        let coord = self.checked(x, y)?;
        let id = self.allocate_id();
        self.probes
            .insert(id, Probe::new(id, format!("P{id}"), coord));
        Ok(id)
    }

    /// Add an active probe with an explicit label.
    ///
    /// # Errors
    ///
    /// Same as [`add`](Self::add).
    pub fn add_labeled(
        &mut self,
        label: impl Into<String>,
        x: i64,
        y: i64,
    ) -> Result<ProbeId, ProbeError> {
        let coord = self.checked(x, y)?;
        let id = self.allocate_id();
        self.probes.insert(id, Probe::new(id, label.into(), coord));
        Ok(id)
    }

    /// Remove a user probe and discard its samples.
    ///
    /// # Errors
    ///
    /// [`ProbeError::ProtectedProbe`] for the main probe,
    /// [`ProbeError::UnknownProbe`] for an unregistered id.
    pub fn remove(&mut self, id: ProbeId) -> Result<Probe, ProbeError> {
        if id.is_main() {
            return Err(ProbeError::ProtectedProbe { id });
        }
        self.probes
            .shift_remove(&id)
            .ok_or(ProbeError::UnknownProbe { id })
    }

    /// Enable or pause recording for a user probe. Samples already
    /// recorded are kept.
    ///
    /// # Errors
    ///
    /// [`ProbeError::ProtectedProbe`] when deactivating the main probe,
    /// [`ProbeError::UnknownProbe`] for an unregistered id.
    pub fn set_active(&mut self, id: ProbeId, active: bool) -> Result<(), ProbeError> {
        if id.is_main() && !active {
            return Err(ProbeError::ProtectedProbe { id });
        }
        let probe = self
            .probes
            .get_mut(&id)
            .ok_or(ProbeError::UnknownProbe { id })?;
        probe.active = active;
        Ok(())
    }

    /// Record one step: `|primary|` at every active probe and
    /// `|source_amplitude|` into the input history.
    pub fn record(&mut self, primary: &Field2D, source_amplitude: f64) {
        let step = self.input_history.len();
        for probe in self.probes.values_mut().filter(|p| p.active) {
            probe.push(step, primary.at(probe.coord).abs());
        }
        for tap in &mut self.ports {
            tap.samples.push(primary.at(tap.coord).abs());
        }
        self.input_history.push(source_amplitude.abs());
    }

    /// Drop all samples and the input history. Probes stay registered.
    pub fn clear_recordings(&mut self) {
        for probe in self.probes.values_mut() {
            probe.clear();
        }
        for tap in &mut self.ports {
            tap.samples.clear();
        }
        self.input_history.clear();
    }

    /// Move the main probe to a new nominal output (after re-synthesis).
    pub fn relocate_main(&mut self, output: GridCoord) {
        let coord = clamp_coord(self.grid, output);
        if let Some(main) = self.probes.get_mut(&ProbeId::MAIN) {
            main.coord = coord;
        }
    }

    /// Move the main probe to `ports[0]` and tap every further port.
    ///
    /// Existing port taps are replaced and start empty; the caller clears
    /// recordings alongside so all series stay aligned.
    pub fn set_ports(&mut self, ports: &[GridCoord]) {
        let Some((&output, rest)) = ports.split_first() else {
            self.ports.clear();
            return;
        };
        self.relocate_main(output);
        let grid = self.grid;
        self.ports = rest
            .iter()
            .map(|&coord| PortTap {
                coord: clamp_coord(grid, coord),
                samples: Vec::new(),
            })
            .collect();
    }

    /// The input history entries for exactly the steps `id` sampled,
    /// index-aligned with its samples.
    ///
    /// Borrowed when the probe sampled one contiguous range; gathered into
    /// an owned buffer when it was paused and resumed.
    ///
    /// # Errors
    ///
    /// [`ProbeError::UnknownProbe`] for an unregistered id.
    pub fn aligned_input(&self, id: ProbeId) -> Result<Cow<'_, [f64]>, ProbeError> {
        let probe = self.get(id).ok_or(ProbeError::UnknownProbe { id })?;
        let history = self.input_history.as_slice();
        Ok(match probe.segments.as_slice() {
            [] => Cow::Borrowed(&[]),
            [only] => Cow::Borrowed(&history[only.clone()]),
            many => Cow::Owned(
                many.iter()
                    .flat_map(|r| history[r.clone()].iter().copied())
                    .collect(),
            ),
        })
    }

    /// Look up a probe.
    pub fn get(&self, id: ProbeId) -> Option<&Probe> {
        self.probes.get(&id)
    }

    /// The main output probe.
    pub fn main(&self) -> &Probe {
        &self.probes[0]
    }

    /// Samples of `id`, if registered.
    pub fn samples(&self, id: ProbeId) -> Option<&[f64]> {
        self.get(id).map(Probe::samples)
    }

    /// All probes in insertion order; the main probe is first.
    pub fn iter(&self) -> impl Iterator<Item = &Probe> {
        self.probes.values()
    }

    /// Taps on the secondary output ports, in port order.
    pub fn ports(&self) -> &[PortTap] {
        &self.ports
    }

    /// Output series of every port: the main probe first, then each tap.
    pub fn port_series(&self) -> impl Iterator<Item = &[f64]> {
        std::iter::once(self.main().samples()).chain(self.ports.iter().map(PortTap::samples))
    }

    /// Number of registered probes, including the main probe.
    pub fn len(&self) -> usize {
        self.probes.len()
    }

    /// Always `false`; the main probe cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }

    /// `|source|` for every step of the current run.
    pub fn input_history(&self) -> &[f64] {
        &self.input_history
    }

    /// Grid the probes are placed on.
    pub fn grid(&self) -> Grid {
        self.grid
    }

    fn checked(&self, x: i64, y: i64) -> Result<GridCoord, ProbeError> {
        self.grid
            .checked_coord(x, y)
            .ok_or(ProbeError::InvalidCoordinate {
                x,
                y,
                nx: self.grid.nx(),
                ny: self.grid.ny(),
            })
    }

    fn allocate_id(&mut self) -> ProbeId {
        let id = ProbeId(self.next_id);
        self.next_id += 1;
        id
    }
}

fn clamp_coord(grid: Grid, coord: GridCoord) -> GridCoord {
    GridCoord::new(coord.x.min(grid.nx() - 1), coord.y.min(grid.ny() - 1))
}
