//! Shape parameters shared by all topologies.

/// Relative permittivity of the cladding (every cell not inside a core).
pub const CLADDING_PERMITTIVITY: f64 = 1.0;

/// Core half-width (cells) below which the core is treated as
/// sub-wavelength and its permittivity is reduced toward the cladding.
pub const NARROW_CORE_HALF_WIDTH: f64 = 3.0;

/// Geometric parameters for waveguide synthesis.
///
/// All lengths are in grid cells. Values are trusted: out-of-range inputs
/// (a negative width, a zero span) produce degenerate but well-defined
/// rasterizations rather than errors. Each topology reads only the fields
/// it needs.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeParams {
    /// Core half-width in cells. Default: 6.
    pub half_width: f64,
    /// Refractive index of the core material. Default: 1.5 (ε = 2.25).
    pub core_index: f64,
    /// S-bend lateral offset in cells (positive = toward larger `y`). Default: 30.
    pub bend_offset: f64,
    /// S-bend longitudinal span in cells. Default: 120.
    pub bend_span: f64,
    /// Y-branch arm divergence, cells of lateral shift per cell of length.
    /// Default: 0.3.
    pub branch_slope: f64,
    /// Requested MMI output port count; clamped to `[2, 4]`. Default: 2.
    pub port_count: u32,
    /// Target Bragg wavelength in micrometres; scales the grating period.
    /// Default: 1.55.
    pub grating_wavelength_um: f64,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            half_width: 6.0,
            core_index: 1.5,
            bend_offset: 30.0,
            bend_span: 120.0,
            branch_slope: 0.3,
            port_count: 2,
            grating_wavelength_um: 1.55,
        }
    }
}

impl ShapeParams {
    /// Minimum number of MMI output ports.
    pub const MIN_PORTS: u32 = 2;
    /// Maximum number of MMI output ports.
    pub const MAX_PORTS: u32 = 4;
    /// Grating period (cells) at the reference wavelength.
    pub const REFERENCE_GRATING_PERIOD: f64 = 12.0;
    /// Reference Bragg wavelength (µm) for [`Self::REFERENCE_GRATING_PERIOD`].
    pub const REFERENCE_WAVELENGTH_UM: f64 = 1.55;

    /// Set the core half-width.
    pub fn with_half_width(mut self, half_width: f64) -> Self {
        self.half_width = half_width;
        self
    }

    /// Set the core refractive index.
    pub fn with_core_index(mut self, n: f64) -> Self {
        self.core_index = n;
        self
    }

    /// Set the S-bend offset and span.
    pub fn with_bend(mut self, offset: f64, span: f64) -> Self {
        self.bend_offset = offset;
        self.bend_span = span;
        self
    }

    /// Set the Y-branch divergence slope directly.
    pub fn with_branch_slope(mut self, slope: f64) -> Self {
        self.branch_slope = slope;
        self
    }

    /// Set the Y-branch divergence from a half-angle in degrees.
    pub fn with_branch_angle_deg(mut self, degrees: f64) -> Self {
        self.branch_slope = degrees.to_radians().tan();
        self
    }

    /// Set the requested MMI port count.
    pub fn with_port_count(mut self, ports: u32) -> Self {
        self.port_count = ports;
        self
    }

    /// Set the target Bragg wavelength.
    pub fn with_grating_wavelength_um(mut self, wavelength_um: f64) -> Self {
        self.grating_wavelength_um = wavelength_um;
        self
    }

    /// The MMI port count actually synthesized, `port_count` clamped to
    /// `[MIN_PORTS, MAX_PORTS]`.
    pub fn effective_ports(&self) -> u32 {
        self.port_count.clamp(Self::MIN_PORTS, Self::MAX_PORTS)
    }

    /// Core half-width rounded to whole cells.
    pub fn half_width_cells(&self) -> i64 {
        self.half_width.round() as i64
    }

    /// Permittivity written into core cells.
    ///
    /// `n²` for ordinary cores. Cores narrower than
    /// [`NARROW_CORE_HALF_WIDTH`] confine less of the mode, modelled as a
    /// linear blend toward the cladding:
    /// `1 + (n² − 1) · max(hw, 0) / NARROW_CORE_HALF_WIDTH`.
    /// Never below [`CLADDING_PERMITTIVITY`] (NaN inputs yield cladding).
    pub fn core_permittivity(&self) -> f64 {
        let bulk = self.core_index * self.core_index;
        let eps = if self.half_width < NARROW_CORE_HALF_WIDTH {
            let fill = self.half_width.max(0.0) / NARROW_CORE_HALF_WIDTH;
            CLADDING_PERMITTIVITY + (bulk - CLADDING_PERMITTIVITY) * fill
        } else {
            bulk
        };
        eps.max(CLADDING_PERMITTIVITY)
    }

    /// Grating period in cells, scaled from the 12-cell period at 1.55 µm.
    /// Never below 2 so each period holds a tooth and a gap.
    pub fn grating_period(&self) -> usize {
        let scaled = Self::REFERENCE_GRATING_PERIOD * self.grating_wavelength_um
            / Self::REFERENCE_WAVELENGTH_UM;
        if scaled.is_finite() {
            scaled.round().max(2.0) as usize
        } else {
            Self::REFERENCE_GRATING_PERIOD as usize
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_core_is_glass() {
        let p = ShapeParams::default();
        assert!((p.core_permittivity() - 2.25).abs() < 1e-12);
        assert_eq!(p.half_width_cells(), 6);
    }

    #[test]
    fn narrow_core_is_reduced() {
        let p = ShapeParams::default().with_half_width(1.5);
        let eps = p.core_permittivity();
        assert!((eps - 1.625).abs() < 1e-12, "got {eps}");
        let zero = ShapeParams::default().with_half_width(-4.0);
        assert_eq!(zero.core_permittivity(), CLADDING_PERMITTIVITY);
    }

    #[test]
    fn low_index_never_drops_below_cladding() {
        let p = ShapeParams::default().with_core_index(0.5);
        assert_eq!(p.core_permittivity(), 1.0);
        let nan = ShapeParams::default().with_core_index(f64::NAN);
        assert_eq!(nan.core_permittivity(), 1.0);
    }

    #[test]
    fn ports_are_clamped() {
        assert_eq!(ShapeParams::default().with_port_count(0).effective_ports(), 2);
        assert_eq!(ShapeParams::default().with_port_count(3).effective_ports(), 3);
        assert_eq!(ShapeParams::default().with_port_count(16).effective_ports(), 4);
    }

    #[test]
    fn grating_period_scales_with_wavelength() {
        assert_eq!(ShapeParams::default().grating_period(), 12);
        let blue = ShapeParams::default().with_grating_wavelength_um(0.775);
        assert_eq!(blue.grating_period(), 6);
        let tiny = ShapeParams::default().with_grating_wavelength_um(0.01);
        assert_eq!(tiny.grating_period(), 2);
        let bad = ShapeParams::default().with_grating_wavelength_um(f64::INFINITY);
        assert_eq!(bad.grating_period(), 12);
    }

    #[test]
    fn branch_angle_sets_slope() {
        let p = ShapeParams::default().with_branch_angle_deg(45.0);
        assert!((p.branch_slope - 1.0).abs() < 1e-12);
    }
}
