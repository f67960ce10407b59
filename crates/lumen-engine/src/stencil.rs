//! The 2D FDTD leapfrog stencil and field-update engine.
//!
//! Both polarizations share one stencil. With `P` the primary component,
//! `A` the x-directed auxiliary and `B` the y-directed auxiliary, each
//! step performs, in this order:
//!
//! ```text
//! A[x,y] -= s · a[x,y] · (P[x,y+1] − P[x,y])                  y < ny−1
//! B[x,y] += s · a[x,y] · (P[x+1,y] − P[x,y])                  x < nx−1
//! P[x,y] += s · b[x,y] · ((B[x,y] − B[x−1,y]) − (A[x,y] − A[x,y−1]))   x, y ≥ 1
//! P[src] += source(t)
//! P      *= damping                                           (optional)
//! ```
//!
//! | variant | P  | A  | B  | s  | a           | b           |
//! |---------|----|----|----|----|-------------|-------------|
//! | TM      | Ez | Hx | Hy | +1 | 0.5         | 0.5 / ε     |
//! | TE      | Hz | Ex | Ey | −1 | 0.5 / ε     | 0.5         |
//!
//! The auxiliaries are updated before the primary field reads them;
//! reordering breaks the scheme. No boundary condition is applied: the
//! last row of `A`, the last column of `B`, and the first row and column
//! of `P` are never written, which leaves the outer edge reflecting.

use lumen_core::{Field2D, Grid, GridCoord};
use lumen_geometry::Synthesis;

use crate::source::GaussianPulse;

/// Which field component the detectors observe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Polarization {
    /// Transverse-magnetic: primary `Ez`, auxiliaries `Hx`, `Hy`.
    #[default]
    Tm,
    /// Transverse-electric: primary `Hz`, auxiliaries `Ex`, `Ey`.
    Te,
}

impl Polarization {
    /// Resolve a user-facing label: anything mentioning "TE" selects
    /// [`Polarization::Te`], everything else [`Polarization::Tm`].
    pub fn from_label(label: &str) -> Self {
        if label.to_ascii_uppercase().contains("TE") {
            Self::Te
        } else {
            Self::Tm
        }
    }

    /// Short name, `"TM"` or `"TE"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Tm => "TM",
            Self::Te => "TE",
        }
    }

    /// Name of the primary (observed) component.
    pub fn primary_component(self) -> &'static str {
        match self {
            Self::Tm => "Ez",
            Self::Te => "Hz",
        }
    }

    /// The stencil parameters for this variant.
    pub fn coefficients(self) -> StencilCoefficients {
        match self {
            Self::Tm => StencilCoefficients {
                sign: 1.0,
                auxiliary: Scaling::Fixed(0.5),
                primary: Scaling::Permittivity,
            },
            Self::Te => StencilCoefficients {
                sign: -1.0,
                auxiliary: Scaling::Permittivity,
                primary: Scaling::Fixed(0.5),
            },
        }
    }
}

/// How a stencil stage scales its spatial difference.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scaling {
    /// A constant factor for every cell.
    Fixed(f64),
    /// The per-cell update coefficient `0.5 / ε`.
    Permittivity,
}

/// Parameters that distinguish the two polarization variants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StencilCoefficients {
    /// Orientation sign `s`.
    pub sign: f64,
    /// Scaling of the two auxiliary updates.
    pub auxiliary: Scaling,
    /// Scaling of the primary (curl) update.
    pub primary: Scaling,
}

/// Per-cell factor resolved against the coefficient buffer.
#[derive(Clone, Copy)]
enum Factor<'a> {
    Fixed(f64),
    Cells(&'a [f64]),
}

impl<'a> Factor<'a> {
    fn resolve(scaling: Scaling, coefficient: &'a [f64]) -> Self {
        match scaling {
            Scaling::Fixed(v) => Self::Fixed(v),
            Scaling::Permittivity => Self::Cells(coefficient),
        }
    }

    #[inline(always)]
    fn at(self, i: usize) -> f64 {
        match self {
            Self::Fixed(v) => v,
            Self::Cells(c) => c[i],
        }
    }
}

/// The three field components of one run.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldState {
    /// The observed component (`Ez` for TM, `Hz` for TE).
    pub primary: Field2D,
    /// x-directed auxiliary (`Hx` for TM, `Ex` for TE).
    pub aux_x: Field2D,
    /// y-directed auxiliary (`Hy` for TM, `Ey` for TE).
    pub aux_y: Field2D,
}

impl FieldState {
    /// All-zero state on `grid`.
    pub fn zeros(grid: Grid) -> Self {
        Self {
            primary: Field2D::zeros(grid),
            aux_x: Field2D::zeros(grid),
            aux_y: Field2D::zeros(grid),
        }
    }

    /// Zero all three components in place.
    pub fn clear(&mut self) {
        self.primary.fill(0.0);
        self.aux_x.fill(0.0);
        self.aux_y.fill(0.0);
    }
}

/// What one call to [`FdtdEngine::step`] injected and observed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepSample {
    /// Step index that was executed.
    pub step: u64,
    /// Signed source amplitude injected this step.
    pub source_amplitude: f64,
    /// `|P|` at the source coordinate after the step.
    pub at_source: f64,
    /// `|P|` at the nominal output coordinate after the step.
    pub at_output: f64,
}

/// Owns the field buffers and advances them one step at a time.
///
/// All buffers are allocated at construction; [`step`](Self::step) and
/// [`reset`](Self::reset) never reallocate.
#[derive(Clone, Debug)]
pub struct FdtdEngine {
    grid: Grid,
    polarization: Polarization,
    coefficient: Field2D,
    source: GaussianPulse,
    source_coord: GridCoord,
    output_coord: GridCoord,
    damping: Option<f64>,
    fields: FieldState,
}

impl FdtdEngine {
    /// Create an engine for a synthesized geometry. Fields start at zero.
    pub fn new(
        synthesis: &Synthesis,
        polarization: Polarization,
        source: GaussianPulse,
        damping: Option<f64>,
    ) -> Self {
        let grid = synthesis.permittivity.grid();
        Self {
            grid,
            polarization,
            coefficient: update_coefficient(&synthesis.permittivity),
            source,
            source_coord: synthesis.source,
            output_coord: synthesis.output,
            damping,
            fields: FieldState::zeros(grid),
        }
    }

    /// Advance the fields by one step, injecting `source(step)`.
    pub fn step(&mut self, step: u64) -> StepSample {
        let coeffs = self.polarization.coefficients();
        let (nx, ny) = (self.grid.nx(), self.grid.ny());
        let c = self.coefficient.as_slice();
        let aux_factor = Factor::resolve(coeffs.auxiliary, c);
        let primary_factor = Factor::resolve(coeffs.primary, c);
        let s = coeffs.sign;

        let FieldState {
            primary,
            aux_x,
            aux_y,
        } = &mut self.fields;
        let p = primary.as_mut_slice();
        let a = aux_x.as_mut_slice();
        let b = aux_y.as_mut_slice();

        // A from ∂P/∂y; the top row has no y+1 neighbour.
        for y in 0..ny.saturating_sub(1) {
            for x in 0..nx {
                let i = y * nx + x;
                a[i] -= s * aux_factor.at(i) * (p[i + nx] - p[i]);
            }
        }

        // B from ∂P/∂x; the last column has no x+1 neighbour.
        for y in 0..ny {
            for x in 0..nx.saturating_sub(1) {
                let i = y * nx + x;
                b[i] += s * aux_factor.at(i) * (p[i + 1] - p[i]);
            }
        }

        // P from the curl of the freshly updated auxiliaries.
        for y in 1..ny {
            for x in 1..nx {
                let i = y * nx + x;
                let curl = (b[i] - b[i - 1]) - (a[i] - a[i - nx]);
                p[i] += s * primary_factor.at(i) * curl;
            }
        }

        let source_amplitude = self.source.amplitude(step);
        primary.add_at(self.source_coord, source_amplitude);

        if let Some(factor) = self.damping {
            primary.scale(factor);
        }

        StepSample {
            step,
            source_amplitude,
            at_source: primary.at(self.source_coord).abs(),
            at_output: primary.at(self.output_coord).abs(),
        }
    }

    /// Zero all field components.
    pub fn reset(&mut self) {
        self.fields.clear();
    }

    /// The observed field component.
    pub fn primary(&self) -> &Field2D {
        &self.fields.primary
    }

    /// All three field components.
    pub fn fields(&self) -> &FieldState {
        &self.fields
    }

    /// The per-cell update coefficient `0.5 / ε`.
    pub fn coefficient(&self) -> &Field2D {
        &self.coefficient
    }

    /// Active polarization variant.
    pub fn polarization(&self) -> Polarization {
        self.polarization
    }

    /// Uniform damping factor, if enabled.
    pub fn damping(&self) -> Option<f64> {
        self.damping
    }

    /// Source injection point.
    pub fn source_coord(&self) -> GridCoord {
        self.source_coord
    }

    /// Nominal output point.
    pub fn output_coord(&self) -> GridCoord {
        self.output_coord
    }

    #[cfg(test)]
    pub(crate) fn fields_mut(&mut self) -> &mut FieldState {
        &mut self.fields
    }
}

/// `0.5 / ε` per cell. Permittivity is ≥ 1 everywhere, so this is finite.
pub fn update_coefficient(permittivity: &Field2D) -> Field2D {
    permittivity.map(|eps| 0.5 / eps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_geometry::{GeometryKind, GeometrySynthesizer, ShapeParams};

    fn vacuum(grid: Grid) -> Synthesis {
        // A zero-width core leaves the whole grid at cladding permittivity.
        let params = ShapeParams::default().with_half_width(0.0);
        GeometrySynthesizer::build(GeometryKind::Straight, grid, &params)
    }

    fn engine(polarization: Polarization) -> FdtdEngine {
        let s = GeometrySynthesizer::build(
            GeometryKind::Straight,
            Grid::new(80, 40).unwrap(),
            &ShapeParams::default(),
        );
        FdtdEngine::new(&s, polarization, GaussianPulse::default(), None)
    }

    #[test]
    fn label_parsing() {
        assert_eq!(Polarization::from_label("TM Mode (Transverse Magnetic)"), Polarization::Tm);
        assert_eq!(Polarization::from_label("te"), Polarization::Te);
        assert_eq!(Polarization::from_label(""), Polarization::Tm);
        assert_eq!(Polarization::Te.primary_component(), "Hz");
    }

    #[test]
    fn coefficient_is_half_inverse_permittivity() {
        let e = engine(Polarization::Tm);
        let c = e.coefficient();
        assert!((c.get(30, 20) - 0.5 / 2.25).abs() < 1e-15);
        assert_eq!(c.get(30, 0), 0.5);
    }

    #[test]
    fn step_zero_injects_nothing() {
        let mut e = engine(Polarization::Tm);
        let sample = e.step(0);
        assert_eq!(sample.source_amplitude, 0.0);
        assert_eq!(e.primary().max_abs(), 0.0);
    }

    #[test]
    fn soft_source_adds_amplitude() {
        let mut e = engine(Polarization::Tm);
        e.step(0);
        let sample = e.step(1);
        let expected = GaussianPulse::default().amplitude(1);
        assert_eq!(e.primary().at(e.source_coord()), expected);
        assert_eq!(sample.at_source, expected.abs());
    }

    #[test]
    fn primary_update_sees_fresh_auxiliaries() {
        for pol in [Polarization::Tm, Polarization::Te] {
            let s = vacuum(Grid::new(9, 9).unwrap());
            let mut e = FdtdEngine::new(&s, pol, GaussianPulse::default(), None);
            e.fields_mut().primary.set(4, 4, 1.0);
            // Step 0 injects nothing, so only the stencil acts.
            e.step(0);
            let p = e.primary();
            assert_eq!(p.get(4, 4), 0.0, "{pol:?} centre");
            assert_eq!(p.get(5, 4), 0.25, "{pol:?} east");
            assert_eq!(p.get(4, 5), 0.25, "{pol:?} north");
        }
    }

    #[test]
    fn variants_coincide_in_vacuum() {
        let s = vacuum(Grid::new(60, 30).unwrap());
        let mut tm = FdtdEngine::new(&s, Polarization::Tm, GaussianPulse::default(), None);
        let mut te = FdtdEngine::new(&s, Polarization::Te, GaussianPulse::default(), None);
        for t in 0..120 {
            tm.step(t);
            te.step(t);
        }
        assert_eq!(tm.primary(), te.primary());
        assert!(tm.primary().max_abs() > 0.0);
    }

    #[test]
    fn variants_differ_in_dielectric() {
        let mut tm = engine(Polarization::Tm);
        let mut te = engine(Polarization::Te);
        for t in 0..120 {
            tm.step(t);
            te.step(t);
        }
        assert_ne!(tm.primary(), te.primary());
    }

    #[test]
    fn outer_edges_are_never_updated() {
        let mut e = engine(Polarization::Tm);
        for t in 0..400 {
            e.step(t);
        }
        let f = e.fields();
        let (nx, ny) = (80, 40);
        for x in 0..nx {
            assert_eq!(f.primary.get(x, 0), 0.0);
            assert_eq!(f.aux_x.get(x, ny - 1), 0.0);
        }
        for y in 0..ny {
            assert_eq!(f.primary.get(0, y), 0.0);
            assert_eq!(f.aux_y.get(nx - 1, y), 0.0);
        }
        // The interior did evolve.
        assert!(f.primary.get(nx - 2, 20) != 0.0);
    }

    #[test]
    fn damping_removes_energy() {
        let s = GeometrySynthesizer::build(
            GeometryKind::Straight,
            Grid::new(80, 40).unwrap(),
            &ShapeParams::default(),
        );
        let mut lossless = FdtdEngine::new(&s, Polarization::Tm, GaussianPulse::default(), None);
        let mut lossy =
            FdtdEngine::new(&s, Polarization::Tm, GaussianPulse::default(), Some(0.98));
        for t in 0..150 {
            lossless.step(t);
            lossy.step(t);
        }
        assert!(lossy.primary().energy() < lossless.primary().energy());
    }

    #[test]
    fn reset_zeros_without_reallocating() {
        let mut e = engine(Polarization::Te);
        for t in 0..60 {
            e.step(t);
        }
        let ptr = e.primary().as_slice().as_ptr();
        e.reset();
        assert_eq!(e.primary().max_abs(), 0.0);
        assert_eq!(e.fields().aux_x.max_abs(), 0.0);
        assert_eq!(e.fields().aux_y.max_abs(), 0.0);
        assert_eq!(e.primary().as_slice().as_ptr(), ptr);
    }

    #[test]
    fn fields_stay_bounded() {
        let mut e = engine(Polarization::Tm);
        for t in 0..2000 {
            e.step(t);
        }
        let m = e.primary().max_abs();
        assert!(m.is_finite() && m < 10.0, "max |Ez| = {m}");
    }
}
