//! Lumen quickstart: synthesize a waveguide, run it, and read transmission.
//!
//! Run with: `cargo run --example quickstart -p lumen-engine`

use lumen_core::ProbeId;
use lumen_engine::{suggested_damping, Polarization, SimConfig, Simulation};
use lumen_geometry::{GeometryKind, ShapeParams};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Configure an S-bend on the default 300x200 grid.
    let shape = ShapeParams::default().with_bend(30.0, 120.0);
    let config = SimConfig::default()
        .with_geometry(GeometryKind::SBend)
        .with_shape(shape.clone())
        .with_polarization(Polarization::from_label("TM"))
        .with_damping(suggested_damping(GeometryKind::SBend, &shape));

    // 2. Build the simulation and add a probe halfway along the bend.
    let mut sim = Simulation::new(config)?;
    let mid_probe = sim.detectors_mut().add_labeled("bend", 120, 115)?;
    println!(
        "{} on {}: source {}, output {}",
        sim.synthesis().kind,
        sim.grid(),
        sim.synthesis().source,
        sim.synthesis().output
    );

    // 3. Run the default length (5 steps per column).
    sim.run_requested(None);
    println!(
        "{} steps, last step {} us",
        sim.current_step(),
        sim.last_metrics().total_us
    );

    // 4. Transmission at each probe.
    for id in [ProbeId::MAIN, mid_probe] {
        let report = sim.analyze(id)?;
        let label = sim.detectors().get(id).map(|p| p.label()).unwrap_or("?");
        println!(
            "  {label:>4}: {:6.2}% (peak {:.4} of {:.4})",
            report.efficiency_percent, report.peak_output, report.peak_input
        );
    }

    // 5. Restart as TE with a Y-branch on the same grid.
    sim.restart(
        SimConfig::default()
            .with_geometry(GeometryKind::YBranch)
            .with_polarization(Polarization::Te),
    )?;
    sim.run_requested(None);
    let report = sim.analyze_output_after(200)?;
    println!(
        "Y-branch TE: {:.2}% ({:.1}% of output power in the first arm)",
        report.efficiency_percent,
        report.port_share_percent.unwrap_or(100.0)
    );

    Ok(())
}
