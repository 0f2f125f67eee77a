//! Equilibrium speciation at a single potential.
//!
//! Each point is solved with damped Newton iteration on the log-space
//! [`EquilibriumSystem`]. Below the [`Stabilization`] threshold the solver
//! first runs a trial solve on a relaxed system and uses its result as the
//! starting point for the real one.

mod solution;
mod stabilization;

pub use solution::PointSolution;
pub use stabilization::Stabilization;

use polysulfide_core::Observer;
use polysulfide_solvers::equation::newton;
use tracing::trace;
use uom::si::{electric_potential::volt, f64::ElectricPotential};

use crate::{EquilibriumConstants, EquilibriumSystem, Error, SpeciesState, SulfurBalance, ThermoParams};

/// Newton event emitted while solving a single point.
pub type StageEvent<'a> = newton::Event<'a, SpeciesState, f64, 4>;

/// Solves the equilibrium speciation at one potential.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquilibriumSolver {
    pub params: ThermoParams,
    pub stabilization: Stabilization,
    pub newton: newton::Config,
}

impl Default for EquilibriumSolver {
    /// Default parameters with Newton steps capped at 2 in `ln c`.
    ///
    /// Newton stops at `‖r‖∞ ≤ 1e-13`, which closes the sulfur balance to
    /// rounding.
    fn default() -> Self {
        let newton = newton::Config::new(200, 1e-13, 1e-12, 1e-12)
            .and_then(|config| config.with_max_step(2.0))
            .unwrap();
        Self {
            params: ThermoParams::default(),
            stabilization: Stabilization::default(),
            newton,
        }
    }
}

impl EquilibriumSolver {
    /// Solves for the equilibrium at `potential`, starting from `guess`.
    ///
    /// Running out of iterations is not an error. The returned point carries
    /// the Newton status and the caller decides what to do with it.
    ///
    /// # Errors
    ///
    /// Returns an error if `total_sulfur` is not finite and positive, if
    /// `guess` has a component that is not finite and positive, if the
    /// equilibrium constants cannot be represented, or if Newton iteration
    /// fails outright.
    pub fn solve(
        &self,
        potential: ElectricPotential,
        total_sulfur: f64,
        guess: SpeciesState,
    ) -> Result<PointSolution, Error> {
        self.solve_observed(potential, total_sulfur, guess, ())
    }

    /// Solves like [`solve`](Self::solve), reporting every Newton iterate.
    ///
    /// The observer sees the trial stage first (when it runs) and then the
    /// final stage. Stopping either stage early ends the point with
    /// [`newton::Status::StoppedByObserver`].
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`solve`](Self::solve).
    pub fn solve_observed<Obs>(
        &self,
        potential: ElectricPotential,
        total_sulfur: f64,
        guess: SpeciesState,
        mut observer: Obs,
    ) -> Result<PointSolution, Error>
    where
        Obs: for<'a> Observer<StageEvent<'a>, newton::Action>,
    {
        if !total_sulfur.is_finite() || total_sulfur <= 0.0 {
            return Err(Error::InvalidTotalSulfur(total_sulfur));
        }
        if !guess.is_positive() {
            return Err(Error::InvalidGuess(guess));
        }

        let stabilized = self.stabilization.applies(potential);
        let mut seed = guess.ln();
        let mut iters = 0;

        if stabilized {
            let constants =
                EquilibriumConstants::stabilized(potential, &self.params, &self.stabilization)?;
            let trial = self.stage(constants, potential, total_sulfur, seed, &mut observer)?;
            trace!(
                potential = potential.get::<volt>(),
                iters = trial.iters,
                residual = trial.residual_norm,
                status = ?trial.status,
                "trial stage finished"
            );

            iters += trial.iters;
            if trial.status == newton::Status::StoppedByObserver {
                return Ok(PointSolution::from_stage(potential, trial, iters, stabilized));
            }
            seed = trial.x;
        }

        let constants = EquilibriumConstants::at(potential, &self.params)?;
        let solution = self.stage(constants, potential, total_sulfur, seed, &mut observer)?;
        iters += solution.iters;

        Ok(PointSolution::from_stage(potential, solution, iters, stabilized))
    }

    /// The equilibrium system this solver targets at `potential`.
    ///
    /// # Errors
    ///
    /// Returns an error if the equilibrium constants cannot be represented.
    pub fn system_at(
        &self,
        potential: ElectricPotential,
        total_sulfur: f64,
    ) -> Result<EquilibriumSystem, Error> {
        let constants = EquilibriumConstants::at(potential, &self.params)?;
        Ok(EquilibriumSystem::new(constants, total_sulfur))
    }

    fn stage<Obs>(
        &self,
        constants: EquilibriumConstants,
        potential: ElectricPotential,
        total_sulfur: f64,
        seed: [f64; 4],
        observer: &mut Obs,
    ) -> Result<newton::Solution<SpeciesState, f64, 4>, Error>
    where
        Obs: for<'a> Observer<StageEvent<'a>, newton::Action>,
    {
        let model = SulfurBalance::new(total_sulfur);
        let system = EquilibriumSystem::new(constants, total_sulfur);

        newton::solve(&model, &system, seed, &self.newton, |event: &StageEvent<'_>| {
            observer.observe(event)
        })
        .map_err(|source| Error::Solver {
            potential: potential.get::<volt>(),
            source,
        })
    }
}
