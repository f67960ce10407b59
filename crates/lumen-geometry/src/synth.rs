//! Topology rasterization: the geometry synthesizer.
//!
//! Layout constants are in cells on the default 300 × 200 working grid.
//! The source always sits at `(PORT_MARGIN, ny / 2)` and the nominal
//! output column at `nx − PORT_MARGIN`; each topology decides the output
//! row.

use lumen_core::{Field2D, Grid, GridCoord, PortList};
use smallvec::smallvec;

use crate::inspect::core_cell_count;
use crate::kind::GeometryKind;
use crate::params::{ShapeParams, CLADDING_PERMITTIVITY};
use crate::raster::{fill_band, fill_column};

/// Column where the S-bend transition begins.
pub const BEND_START_X: i64 = 60;
/// Column where the Y-branch stem ends and the arms begin.
pub const BRANCH_STEM_END: i64 = 80;
/// Column where the MMI access guide meets the multimode body.
pub const MMI_BODY_START: i64 = 60;
/// Column where the MMI body ends and the output guides begin.
pub const MMI_BODY_END: i64 = 210;
/// Half-width of the MMI access and output guides.
pub const MMI_PORT_HALF_WIDTH: i64 = 5;
/// Body half-width is `MMI_BODY_BASE + MMI_BODY_PER_PORT * ports`.
pub const MMI_BODY_BASE: i64 = 15;
/// Additional body half-width per output port.
pub const MMI_BODY_PER_PORT: i64 = 8;
/// Centre-to-centre spacing of the MMI output guides.
pub const MMI_PORT_SPACING: i64 = 16;
/// First column of the grating tooth region.
pub const GRATING_START: i64 = 90;
/// End (exclusive) of the grating tooth region.
pub const GRATING_END: i64 = 240;
/// Teeth extend this many cells beyond the core half-width on each side.
pub const GRATING_TOOTH_EXTRA: i64 = 3;

/// The result of rasterizing one topology.
///
/// Permittivity and output coordinate are produced together and are
/// replaced together on every restart.
#[derive(Clone, Debug, PartialEq)]
pub struct Synthesis {
    /// The topology that was drawn.
    pub kind: GeometryKind,
    /// Relative permittivity per cell; every value ≥ 1.0.
    pub permittivity: Field2D,
    /// Source injection point.
    pub source: GridCoord,
    /// Nominal output (main detector) point implied by the geometry.
    pub output: GridCoord,
    /// Centres of every output port at the output column; `ports[0]` is
    /// always `output`.
    pub ports: PortList,
    /// Permittivity written into core cells.
    pub core_permittivity: f64,
}

impl Synthesis {
    /// Number of output ports the topology splits into.
    pub fn port_count(&self) -> usize {
        self.ports.len()
    }
}

/// Rasterizes waveguide topologies onto a grid.
///
/// Stateless; synthesis is a pure function of its inputs.
#[derive(Clone, Copy, Debug, Default)]
pub struct GeometrySynthesizer;

impl GeometrySynthesizer {
    /// Rasterize `kind` onto `grid` with the given shape parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use lumen_core::Grid;
    /// use lumen_geometry::{GeometryKind, GeometrySynthesizer, ShapeParams};
    ///
    /// let params = ShapeParams::default().with_bend(30.0, 120.0);
    /// let s = GeometrySynthesizer::build(GeometryKind::SBend, Grid::default(), &params);
    /// assert_eq!(s.output.y, 130);
    /// ```
    pub fn build(kind: GeometryKind, grid: Grid, params: &ShapeParams) -> Synthesis {
        let mut eps = Field2D::filled(grid, CLADDING_PERMITTIVITY);
        let core = params.core_permittivity();
        let mid = grid.mid_y() as i64;
        let nx = grid.nx() as i64;
        let reach = reach(grid);
        let hw = params.half_width_cells().clamp(-reach, reach);
        let out_x = grid.output_x();

        let ports: PortList = match kind {
            GeometryKind::Straight | GeometryKind::Fallback => {
                fill_band(&mut eps, 0..nx, mid, hw, core);
                smallvec![grid.default_output()]
            }
            GeometryKind::SBend => {
                let final_center = draw_s_bend(&mut eps, params, mid, hw, core, reach);
                smallvec![GridCoord::new(out_x, grid.clamp_y(final_center))]
            }
            GeometryKind::YBranch => {
                let slope = params.branch_slope;
                fill_band(&mut eps, 0..BRANCH_STEM_END, mid, hw, core);
                for x in BRANCH_STEM_END..nx {
                    let shift = branch_shift(x, slope, reach);
                    if mid + hw + shift < grid.ny() as i64 {
                        fill_column(&mut eps, x, mid - hw + shift..mid + hw + shift, core);
                    }
                    if mid - hw - shift > 0 {
                        fill_column(&mut eps, x, mid - hw - shift..mid + hw - shift, core);
                    }
                }
                let shift = branch_shift(out_x as i64, slope, reach);
                smallvec![
                    GridCoord::new(out_x, grid.clamp_y(mid + shift)),
                    GridCoord::new(out_x, grid.clamp_y(mid - shift)),
                ]
            }
            GeometryKind::Mmi => {
                let n = i64::from(params.effective_ports());
                fill_band(&mut eps, 0..MMI_BODY_START, mid, MMI_PORT_HALF_WIDTH, core);
                let body_half = MMI_BODY_BASE + n * MMI_BODY_PER_PORT;
                fill_band(&mut eps, MMI_BODY_START..MMI_BODY_END, mid, body_half, core);

                let first = mid as f64 - ((n - 1) * MMI_PORT_SPACING) as f64 / 2.0;
                let mut ports = PortList::new();
                for i in 0..n {
                    let y = (first + (i * MMI_PORT_SPACING) as f64) as i64;
                    fill_band(&mut eps, MMI_BODY_END..nx, y, MMI_PORT_HALF_WIDTH, core);
                    ports.push(GridCoord::new(out_x, grid.clamp_y(y)));
                }
                ports
            }
            GeometryKind::Grating => {
                fill_band(&mut eps, 0..nx, mid, hw, core);
                let period = i64::try_from(params.grating_period()).map_or(reach, |p| p.min(reach));
                let tooth = period / 2;
                let mut x = GRATING_START;
                while x < GRATING_END {
                    fill_band(&mut eps, x..x + tooth, mid, hw + GRATING_TOOTH_EXTRA, core);
                    x += period;
                }
                smallvec![grid.default_output()]
            }
        };

        let output = ports[0];
        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "synthesized {kind} on {grid}: output {output}, {} port(s), {} core cells, core eps {core:.4}",
                ports.len(),
                core_cell_count(&eps)
            );
        }

        Synthesis {
            kind,
            permittivity: eps,
            source: grid.source_coord(),
            output,
            ports,
            core_permittivity: core,
        }
    }
}

/// Largest offset, in cells, that can still change which cells are
/// written. Lengths and offsets are clamped to `±reach` before any
/// integer arithmetic.
fn reach(grid: Grid) -> i64 {
    2 * (grid.nx() as i64 + grid.ny() as i64)
}

/// Lateral arm displacement at column `x`, truncated toward zero.
fn branch_shift(x: i64, slope: f64, reach: i64) -> i64 {
    (((x - BRANCH_STEM_END).max(0) as f64 * slope) as i64).clamp(-reach, reach)
}

/// Draw lead-in, raised-cosine transition, and lead-out. Returns the
/// lead-out centre row.
fn draw_s_bend(
    eps: &mut Field2D,
    params: &ShapeParams,
    mid: i64,
    hw: i64,
    core: f64,
    reach: i64,
) -> i64 {
    let nx = eps.nx() as i64;
    let offset = params.bend_offset;
    let span = params.bend_span.round().max(0.0) as i64;
    let limit = reach as f64;

    fill_band(eps, 0..BEND_START_X, mid, hw, core);

    let end_x = BEND_START_X.saturating_add(span);
    for x in BEND_START_X..end_x.min(nx) {
        let u = (x - BEND_START_X) as f64 / span as f64;
        let s = 0.5 * (1.0 - (std::f64::consts::PI * u).cos());
        let center = (mid as f64 + s * offset).clamp(-limit, limit) as i64;
        fill_column(eps, x, center - hw..center + hw, core);
    }

    let final_center = mid + offset.trunc().clamp(-limit, limit) as i64;
    if end_x < nx {
        fill_band(eps, end_x..nx, final_center, hw, core);
    }
    final_center
}
