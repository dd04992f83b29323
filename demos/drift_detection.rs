//! Drift Detection Example
//!
//! Demonstrates DDM on a synthetic classifier error stream: a random error
//! stream with a sustained error spike, followed by abrupt regime changes.
//!
//! Run with: cargo run --example drift_detection

use concept_drift::drift::{DdmConfig, DriftDetector, DDM};
use concept_drift::monitor::DriftMonitor;
use concept_drift::streaming::{MersenneBitStream, Regime, RegimeStream};

fn main() -> anyhow::Result<()> {
    println!("=== Concept Drift Detection Demo ===\n");

    // === Error spike ===
    println!("=== Random stream with errors forced on [999, 1500) ===\n");

    let mut ddm = DDM::default();
    let mut warnings = 0;

    for (i, observation) in MersenneBitStream::reference().enumerate() {
        let (in_drift, in_warning) = ddm.add_element(observation);
        if in_drift {
            println!(
                "  Change detected at index {}, input value: {}",
                i, observation
            );
        } else if in_warning {
            warnings += 1;
        }
    }
    println!("  Warning observations: {}", warnings);
    println!("  Final error rate: {:.4}", ddm.error_rate());

    // === Regime changes ===
    println!("\n=== Regime changes ===\n");

    let stream = RegimeStream::new(
        7,
        vec![
            Regime::new(0.10, 1000),
            Regime::new(0.40, 1000),
            Regime::new(0.05, 1000),
            Regime::new(0.30, 1000),
        ],
    )?;
    println!("  True change points: {:?}", stream.change_points());

    let config = DdmConfig::default().with_min_num_instances(50);
    let mut monitor = DriftMonitor::new(DDM::new(config)?);
    monitor.observe_all(stream);

    for event in monitor.events() {
        println!(
            "  {:?} at index {} (error rate: {:.4})",
            event.state, event.index, event.estimation
        );
    }

    let summary = monitor.summary();
    println!("\nDDM Summary:");
    println!("  Total drifts: {}", summary.drifts);
    println!("  Total warning observations: {}", summary.warnings);

    // Drop in error rate (0.40 -> 0.05) is not a drift for DDM
    println!("\nNote: DDM only reacts to increases in the error rate.");

    Ok(())
}
