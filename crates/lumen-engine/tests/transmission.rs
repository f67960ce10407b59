//! Integration tests: end-to-end runs on the reference grid.
//!
//! Each test builds a [`Simulation`] from a bench profile, steps it, and
//! checks recordings and transmission reports.

use lumen_bench::{mmi_profile, reference_profile, scenario, scenario_with, REFERENCE_STEPS};
use lumen_core::{AnalysisError, GridCoord, ProbeId};
use lumen_engine::{Polarization, Simulation};
use lumen_geometry::GeometryKind;

// ── Reference scenario ───────────────────────────────────────────────

/// Steps by which the source pulse has been injected (t0 + 4σ = 88) with
/// margin; port samples before this are start-up transient.
const SETTLE_STEPS: usize = 200;

// The guided mode travels about 1/3 cell per step in the core, so the
// pulse needs roughly 760 steps to cover the 240 cells from source to
// output. At 600 steps the output only sees the leading cladding field.

#[test]
fn straight_600_steps_reports_bounded_efficiency() {
    let mut sim = Simulation::new(reference_profile()).unwrap();
    sim.run(REFERENCE_STEPS);

    let detectors = sim.detectors();
    assert_eq!(detectors.input_history().len(), 600);
    assert_eq!(detectors.main().samples().len(), 600);
    assert_eq!(detectors.main().coord(), GridCoord::new(270, 100));

    let report = sim.analyze_output().unwrap();
    assert!(
        report.efficiency_percent > 0.0 && report.efficiency_percent < 1.0,
        "efficiency {}",
        report.efficiency_percent
    );
    assert_eq!(report.samples, 600);
    assert_eq!(report.ideal_percent, None);
    assert_eq!(report.port_share_percent, None);
}

#[test]
fn input_history_matches_steps_since_reset() {
    let mut sim = Simulation::new(reference_profile()).unwrap();
    sim.run(37);
    assert_eq!(sim.detectors().input_history().len(), 37);
    sim.reset();
    sim.run(5);
    assert_eq!(sim.detectors().input_history().len(), 5);
    assert_eq!(sim.current_step(), 5);
}

#[test]
fn zero_steps_leave_state_unchanged() {
    let mut sim = Simulation::new(reference_profile()).unwrap();
    sim.run(80);
    let fields = sim.fields().clone();
    let history = sim.detectors().input_history().to_vec();

    sim.run(0);
    sim.run_requested(Some("0"));

    assert_eq!(sim.fields(), &fields);
    assert_eq!(sim.detectors().input_history(), history.as_slice());
}

#[test]
fn runs_are_deterministic() {
    let mut a = Simulation::new(scenario(GeometryKind::YBranch)).unwrap();
    let mut b = Simulation::new(scenario(GeometryKind::YBranch)).unwrap();
    a.run(150);
    b.run(150);
    assert_eq!(a.primary(), b.primary());
    assert_eq!(a.detectors().main().samples(), b.detectors().main().samples());
}

// ── Geometry-dependent output ────────────────────────────────────────

#[test]
fn s_bend_output_sits_at_offset_row() {
    let sim = Simulation::new(scenario(GeometryKind::SBend)).unwrap();
    assert_eq!(sim.synthesis().output, GridCoord::new(270, 130));
    assert_eq!(sim.detectors().main().coord(), GridCoord::new(270, 130));
}

#[test]
fn every_topology_runs_both_polarizations() {
    for kind in GeometryKind::ALL {
        for pol in [Polarization::Tm, Polarization::Te] {
            let mut sim = Simulation::new(scenario_with(kind, pol)).unwrap();
            sim.run(120);
            let max = sim.primary().max_abs();
            assert!(max.is_finite() && max > 0.0, "{kind} {pol:?}: {max}");
            assert!(sim.analyze_output().is_ok());
        }
    }
}

#[test]
fn mmi_report_carries_ideal_share() {
    let mut sim = Simulation::new(mmi_profile(4)).unwrap();
    assert_eq!(sim.synthesis().port_count(), 4);
    sim.run(10);
    let report = sim.analyze_output().unwrap();
    assert_eq!(report.ideal_percent, Some(25.0));
    assert_eq!(report.port_peaks.len(), 4);
    assert_eq!(sim.detectors().ports().len(), 3);
}

// ── Probes ───────────────────────────────────────────────────────────

#[test]
fn user_probe_round_trip() {
    let mut sim = Simulation::new(reference_profile()).unwrap();
    let p = sim.detectors_mut().add(150, 100).unwrap();
    sim.run(50);
    assert_eq!(sim.detectors().samples(p).unwrap().len(), 50);
    assert!(sim.analyze(p).is_ok());

    sim.detectors_mut().remove(p).unwrap();
    assert!(matches!(sim.analyze(p), Err(AnalysisError::Probe(_))));

    let q = sim.detectors_mut().add(150, 100).unwrap();
    assert!(sim.detectors().samples(q).unwrap().is_empty());
    assert_eq!(sim.analyze(q), Err(AnalysisError::EmptySeries));

    sim.run(3);
    assert_eq!(sim.detectors().samples(q).unwrap().len(), 3);
    assert_eq!(sim.detectors().aligned_input(q).unwrap().len(), 3);
}

#[test]
fn out_of_grid_probe_is_rejected() {
    let mut sim = Simulation::new(reference_profile()).unwrap();
    assert!(sim.detectors_mut().add(300, 100).is_err());
    assert!(sim.detectors_mut().add(10, -1).is_err());
    assert_eq!(sim.detectors().len(), 1);
    assert_eq!(sim.detectors_mut().add(0, 0).unwrap(), ProbeId(1));
}

#[test]
fn restart_relocates_main_probe_and_clears_runs() {
    let mut sim = Simulation::new(reference_profile()).unwrap();
    let p = sim.detectors_mut().add(100, 100).unwrap();
    sim.run(40);

    sim.restart(scenario(GeometryKind::SBend)).unwrap();
    assert_eq!(sim.detectors().main().coord(), GridCoord::new(270, 130));
    assert!(sim.detectors().samples(p).unwrap().is_empty());
    assert!(sim.detectors().input_history().is_empty());

    sim.run(10);
    assert_eq!(sim.detectors().samples(p).unwrap().len(), 10);
}

// ── Full-length runs ─────────────────────────────────────────────────

#[test]
fn straight_full_run_delivers_the_guided_pulse() {
    for pol in [Polarization::Tm, Polarization::Te] {
        let mut sim = Simulation::new(scenario_with(GeometryKind::Straight, pol)).unwrap();
        sim.run(REFERENCE_STEPS);
        let early = sim.analyze_output().unwrap().efficiency_percent;
        sim.run(1500 - REFERENCE_STEPS);
        assert_eq!(sim.current_step(), 1500);

        let report = sim.analyze_output_after(SETTLE_STEPS).unwrap();
        assert!(report.efficiency_percent > 10.0, "{pol:?}: {}", report.efficiency_percent);
        assert!(report.efficiency_percent > 4.0 * early, "{pol:?}: {early}");
    }
}

#[test]
fn mmi_port_share_near_ideal_split() {
    for ports in 2..=4 {
        let mut sim = Simulation::new(mmi_profile(ports)).unwrap();
        sim.run_requested(None);
        let report = sim.analyze_output_after(SETTLE_STEPS).unwrap();

        let ideal = report.ideal_percent.unwrap();
        assert_eq!(ideal, 100.0 / f64::from(ports));
        assert_eq!(report.port_peaks.len(), ports as usize);
        assert_eq!(report.samples, 1500 - SETTLE_STEPS);
        let share = report.port_share_percent.unwrap();
        assert!(
            report.share_deviation().unwrap() <= 15.0,
            "{ports} ports: share {share} vs ideal {ideal}"
        );
        assert!(report.port_peaks.iter().all(|&p| p > 0.0));

        let tail = sim.analyze_output_after(1000).unwrap();
        assert_eq!(tail.samples, 500);
        assert!(tail.peak_output <= report.peak_output);
        assert_eq!(tail.peak_input, report.peak_input);
    }
}
