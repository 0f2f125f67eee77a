//! Interactive views of a polysulfide speciation sweep.
//!
//! Runs the default sweep (1.8 V to 2.5 V in 1 mV steps) and opens a plot.
//!
//! # Usage
//!
//! ```text
//! cargo run --example cv --features plot -- concentrations
//! cargo run --example cv --features plot -- shares
//! cargo run --example cv --features plot -- current
//! cargo run --example cv --features plot -- current forward
//! ```
//!
//! Set `RUST_LOG=debug` to log every solved point.
//!
//! # Modes
//!
//! - **concentrations**: polysulfide concentrations against potential on a
//!   log scale, recorded live from the sweep.
//! - **shares**: percentage of the total sulfur held by each form.
//! - **current [backward|forward]**: pseudo-current from the change in
//!   speciation. Backward differencing is the default.

use std::error::Error;

use polysulfide_observers::{PlotObserver, ShowConfig, show_percentages, show_voltammogram};
use polysulfide_speciation::{DifferenceScheme, EquilibriumSolver, SweepConfig, sweep};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mode = std::env::args().nth(1).unwrap_or_else(|| "current".into());
    match mode.as_str() {
        "concentrations" => concentrations(),
        "shares" => {
            let trajectory = sweep::run(&SweepConfig::default())?;
            show_percentages(
                &trajectory,
                ShowConfig::new().title("Sulfur speciation").legend(),
            )?;
            Ok(())
        }
        "current" => {
            let scheme = match std::env::args().nth(2).as_deref() {
                None | Some("backward") => DifferenceScheme::Backward,
                Some("forward") => DifferenceScheme::Forward,
                Some(other) => {
                    eprintln!("Unknown difference scheme: {other}");
                    std::process::exit(1);
                }
            };
            let trajectory = sweep::run(&SweepConfig::default())?;
            show_voltammogram(
                &trajectory,
                scheme,
                ShowConfig::new().title("Simulated CV"),
            )?;
            Ok(())
        }
        other => {
            eprintln!("Unknown mode: {other}");
            eprintln!("Usage: cv [concentrations|shares|current [backward|forward]]");
            std::process::exit(1);
        }
    }
}

/// Records concentrations as the sweep runs, then plots them.
fn concentrations() -> Result<(), Box<dyn Error>> {
    let mut obs = PlotObserver::<4>::new(["Li₂S₈", "Li₂S₄", "Li₂S₆", "Li₂S"]);

    let trajectory = sweep::run_with(
        &SweepConfig::default(),
        &EquilibriumSolver::default(),
        &mut obs,
    )?;

    let flagged = trajectory.non_converged().count();
    if flagged > 0 {
        eprintln!("{flagged} points did not converge");
    }

    obs.show(
        ShowConfig::new()
            .title("Polysulfide concentrations")
            .axes("Potential (V)", "c (mol/L)")
            .legend()
            .log_y(),
    )?;
    Ok(())
}
