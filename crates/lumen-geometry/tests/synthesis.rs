//! Property tests: synthesis is total, bounded, and deterministic for
//! arbitrary (including degenerate) shape parameters.

use lumen_core::Grid;
use lumen_geometry::{core_connected, GeometryKind, GeometrySynthesizer, ShapeParams};
use proptest::prelude::*;

fn arb_kind() -> impl Strategy<Value = GeometryKind> {
    prop::sample::select(GeometryKind::ALL.to_vec())
}

fn arb_params() -> impl Strategy<Value = ShapeParams> {
    (
        prop_oneof![4 => -4.0f64..20.0, 1 => extreme()],
        0.5f64..3.5,
        prop_oneof![4 => -120.0f64..120.0, 1 => extreme()],
        prop_oneof![4 => -10.0f64..300.0, 1 => extreme()],
        prop_oneof![4 => -2.0f64..2.0, 1 => extreme()],
        0u32..10,
        prop_oneof![4 => 0.1f64..4.0, 1 => extreme()],
    )
        .prop_map(|(hw, n, offset, span, slope, ports, wl)| ShapeParams {
            half_width: hw,
            core_index: n,
            bend_offset: offset,
            bend_span: span,
            branch_slope: slope,
            port_count: ports,
            grating_wavelength_um: wl,
        })
}

/// Out-of-range values that must clip rather than overflow.
fn extreme() -> impl Strategy<Value = f64> {
    prop::sample::select(vec![
        1e30,
        -1e30,
        1e300,
        -1e300,
        f64::MAX,
        f64::MIN,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::NAN,
    ])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn permittivity_never_below_cladding(kind in arb_kind(), params in arb_params()) {
        let s = GeometrySynthesizer::build(kind, Grid::default(), &params);
        prop_assert!(s.permittivity.min_value() >= 1.0);
        prop_assert!(s.output.x < 300 && s.output.y < 200);
        prop_assert_eq!(s.ports[0], s.output);
        prop_assert!(s.ports.len() <= 4);
    }

    #[test]
    fn synthesis_is_deterministic(kind in arb_kind(), params in arb_params()) {
        let a = GeometrySynthesizer::build(kind, Grid::default(), &params);
        let b = GeometrySynthesizer::build(kind, Grid::default(), &params);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn straight_like_kinds_connect_source_to_output(
        kind in prop::sample::select(vec![
            GeometryKind::Straight,
            GeometryKind::SBend,
            GeometryKind::Grating,
        ]),
        hw in 3.0f64..12.0,
        offset in -60.0f64..60.0,
        span in 60.0f64..200.0,
    ) {
        let params = ShapeParams::default()
            .with_half_width(hw)
            .with_bend(offset, span);
        let s = GeometrySynthesizer::build(kind, Grid::default(), &params);
        prop_assert!(core_connected(&s.permittivity, s.source, s.output));
    }
}

#[test]
fn extreme_parameters_rasterize_without_panicking() {
    let cases = [
        ShapeParams::default().with_half_width(1e30),
        ShapeParams::default().with_bend(1e30, 120.0),
        ShapeParams::default().with_bend(-1e30, f64::INFINITY),
        ShapeParams::default().with_branch_slope(1e300),
        ShapeParams::default().with_branch_slope(f64::NEG_INFINITY),
        ShapeParams::default().with_grating_wavelength_um(1e300),
    ];
    for params in &cases {
        for kind in GeometryKind::ALL {
            let s = GeometrySynthesizer::build(kind, Grid::default(), params);
            assert!(s.permittivity.min_value() >= 1.0, "{kind}");
            assert!(s.output.x < 300 && s.output.y < 200, "{kind}: {}", s.output);
        }
    }
}

#[test]
fn small_grid_clips_without_panicking() {
    let grid = Grid::new(40, 12).unwrap();
    for kind in GeometryKind::ALL {
        let s = GeometrySynthesizer::build(kind, grid, &ShapeParams::default());
        assert!(s.permittivity.min_value() >= 1.0, "{kind}");
        assert!(s.output.x < 40 && s.output.y < 12, "{kind}: {}", s.output);
    }
}
