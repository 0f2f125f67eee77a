//! Potential sweeps with continuation.
//!
//! A sweep solves the equilibrium at every point of a uniform potential grid,
//! in increasing order. Each point starts from the previous point's solution,
//! and the first starts from [`SweepConfig::initial_guess`].
//!
//! # Observer Events
//!
//! The sweep emits one [`Event`] per solved point. Observers can return
//! [`Action::StopEarly`] to end the sweep and receive the points solved so
//! far with [`SweepStatus::StoppedByObserver`].

mod config;
mod event;

pub use config::{ConfigError, ConvergencePolicy, SweepConfig};
pub use event::{Action, Event};

use polysulfide_core::Observer;
use tracing::{debug, info, info_span, warn};
use uom::si::electric_potential::volt;

use crate::{EquilibriumSolver, Error, Trajectory};

/// How a sweep ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepStatus {
    /// Every grid point was solved.
    Complete,

    /// An observer stopped the sweep before the last point.
    StoppedByObserver,
}

/// Runs a sweep with the default solver and no observer.
///
/// # Errors
///
/// Returns the same errors as [`run_with`].
pub fn run(config: &SweepConfig) -> Result<Trajectory, Error> {
    run_with(config, &EquilibriumSolver::default(), ())
}

/// Runs a sweep with the given solver, reporting each point to `observer`.
///
/// Points that do not converge are handled according to
/// [`SweepConfig::on_nonconvergence`].
///
/// # Errors
///
/// Returns an error if the config is invalid, if a point fails to solve, or
/// if a point does not converge under [`ConvergencePolicy::Fail`].
pub fn run_with<Obs>(
    config: &SweepConfig,
    solver: &EquilibriumSolver,
    mut observer: Obs,
) -> Result<Trajectory, Error>
where
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let potentials = config.potentials()?;
    let spacing = config.spacing()?;
    let total = potentials.len();

    let span = info_span!(
        "sweep",
        start = config.start.get::<volt>(),
        stop = config.stop.get::<volt>(),
        points = total,
    );
    let _guard = span.enter();

    let mut points = Vec::with_capacity(total);
    let mut guess = config.initial_guess;
    let mut status = SweepStatus::Complete;

    for (index, potential) in potentials.into_iter().enumerate() {
        let point = solver.solve(potential, config.total_sulfur, guess)?;
        let volts = potential.get::<volt>();

        if point.is_converged() {
            debug!(potential = volts, iters = point.iters, "point converged");
        } else {
            match config.on_nonconvergence {
                ConvergencePolicy::Warn => warn!(
                    potential = volts,
                    iters = point.iters,
                    residual = point.residual_norm,
                    status = ?point.status,
                    "point did not converge"
                ),
                ConvergencePolicy::Fail => {
                    return Err(Error::NotConverged {
                        potential: volts,
                        residual_norm: point.residual_norm,
                    });
                }
            }
        }

        guess = point.state;
        let action = observer.observe(&Event {
            index,
            total,
            point: &point,
        });
        points.push(point);

        if let Some(Action::StopEarly) = action {
            status = SweepStatus::StoppedByObserver;
            break;
        }
    }

    let trajectory = Trajectory::new(config.total_sulfur, spacing, status, points);
    info!(
        points = trajectory.len(),
        non_converged = trajectory.non_converged().count(),
        "sweep finished"
    );

    Ok(trajectory)
}
