//! Peak-based transmission analysis.
//!
//! Absolute efficiency compares one output peak with the source peak and
//! is dominated by what radiates out of the core on an open grid. For
//! splitters the share of output power reaching each port is the figure
//! comparable with the ideal `100 / n` split.

use lumen_core::AnalysisError;
use lumen_geometry::GeometryKind;

/// Peak of a magnitude series (0.0 for an empty series).
pub fn peak(series: &[f64]) -> f64 {
    series.iter().copied().fold(0.0, f64::max)
}

/// Transmission efficiency in percent: `max(output) / max(input) × 100`.
///
/// A zero (or empty) input peak is replaced by 1.0 so the ratio stays
/// finite.
///
/// # Errors
///
/// [`AnalysisError::EmptySeries`] if `output` holds no samples.
///
/// # Examples
///
/// ```
/// use lumen_engine::analysis::efficiency;
///
/// let pct = efficiency(&[0.0, 2.0, 1.0], &[0.5, 1.0]).unwrap();
/// assert_eq!(pct, 50.0);
/// ```
pub fn efficiency(input: &[f64], output: &[f64]) -> Result<f64, AnalysisError> {
    if output.is_empty() {
        return Err(AnalysisError::EmptySeries);
    }
    let input_peak = peak(input);
    let denom = if input_peak > 0.0 { input_peak } else { 1.0 };
    Ok(peak(output) / denom * 100.0)
}

/// Share of output power, in percent, arriving at the first of `peaks`:
/// `peak₀² / Σ peakᵢ² × 100`.
///
/// `None` with fewer than two ports or when no port saw any field.
///
/// # Examples
///
/// ```
/// use lumen_engine::analysis::port_share;
///
/// assert_eq!(port_share(&[1.0, 1.0, 1.0, 1.0]), Some(25.0));
/// assert_eq!(port_share(&[2.0]), None);
/// ```
pub fn port_share(peaks: &[f64]) -> Option<f64> {
    if peaks.len() < 2 {
        return None;
    }
    let total: f64 = peaks.iter().map(|p| p * p).sum();
    (total > 0.0).then(|| peaks[0] * peaks[0] / total * 100.0)
}

/// Result of analyzing one probe's sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct TransmissionReport {
    /// `max(output) / max(input) × 100`.
    pub efficiency_percent: f64,
    /// Ideal per-port share for splitters (`100 / n` for an `n`-port MMI).
    pub ideal_percent: Option<f64>,
    /// Peak of the input series.
    pub peak_input: f64,
    /// Peak of the output series.
    pub peak_output: f64,
    /// Number of output samples analyzed.
    pub samples: usize,
    /// Output peak of every analyzed port, the reported output first.
    pub port_peaks: Vec<f64>,
    /// Power share of the reported output among all ports; see
    /// [`port_share`].
    pub port_share_percent: Option<f64>,
}

impl TransmissionReport {
    /// Ratio of measured to ideal efficiency, when an ideal applies.
    pub fn ideal_ratio(&self) -> Option<f64> {
        self.ideal_percent
            .filter(|ideal| *ideal > 0.0)
            .map(|ideal| self.efficiency_percent / ideal)
    }

    /// Distance in percentage points between the measured port share and
    /// the ideal share, when both apply.
    pub fn share_deviation(&self) -> Option<f64> {
        Some((self.port_share_percent? - self.ideal_percent?).abs())
    }
}

/// Analyzes sequences recorded on a particular geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransmissionAnalyzer {
    kind: GeometryKind,
    port_count: usize,
}

impl TransmissionAnalyzer {
    /// Analyzer for `kind` splitting into `port_count` outputs.
    pub fn new(kind: GeometryKind, port_count: usize) -> Self {
        Self { kind, port_count }
    }

    /// Ideal per-port share, if the geometry is a splitter with one.
    pub fn ideal_percent(&self) -> Option<f64> {
        match self.kind {
            GeometryKind::Mmi if self.port_count > 0 => Some(100.0 / self.port_count as f64),
            _ => None,
        }
    }

    /// Analyze an output series against the input series it was recorded
    /// alongside.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::EmptySeries`] if `output` is empty.
    pub fn analyze(&self, input: &[f64], output: &[f64]) -> Result<TransmissionReport, AnalysisError> {
        self.analyze_ports(input, &[output], 0)
    }

    /// Analyze the output ports of a splitter, the reported output first.
    ///
    /// Every port series must be index-aligned with `input`. Port samples
    /// before step `settle` are left out of the output peaks; the input
    /// peak always covers the whole series.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::EmptySeries`] if no output sample lies at or after
    /// `settle`.
    pub fn analyze_ports(
        &self,
        input: &[f64],
        ports: &[&[f64]],
        settle: usize,
    ) -> Result<TransmissionReport, AnalysisError> {
        let output = ports.first().map_or(&[][..], |s| after(s, settle));
        let efficiency_percent = efficiency(input, output)?;
        let port_peaks: Vec<f64> = ports.iter().map(|s| peak(after(s, settle))).collect();
        Ok(TransmissionReport {
            efficiency_percent,
            ideal_percent: self.ideal_percent(),
            peak_input: peak(input),
            peak_output: peak(output),
            samples: output.len(),
            port_share_percent: port_share(&port_peaks),
            port_peaks,
        })
    }
}

fn after(series: &[f64], settle: usize) -> &[f64] {
    series.get(settle..).unwrap_or(&[])
}
