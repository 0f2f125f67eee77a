use polysulfide_core::Observer;

use crate::traits::{CanStopEarly, HasResidual};

/// Stops a solver whose residual blows up.
///
/// The guard tracks the smallest residual seen so far and requests an early
/// stop when a residual is not finite or exceeds `factor` times that minimum.
/// Check [`tripped`](Self::tripped) after the solve to tell a guarded stop
/// from any other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DivergenceGuard {
    factor: f64,
    best: f64,
    tripped: bool,
}

impl DivergenceGuard {
    /// Creates a guard that trips at `factor` times the best residual.
    ///
    /// # Panics
    ///
    /// Panics if `factor` is not greater than one.
    #[must_use]
    pub fn new(factor: f64) -> Self {
        assert!(factor > 1.0, "divergence factor must exceed one");
        Self {
            factor,
            best: f64::INFINITY,
            tripped: false,
        }
    }

    #[must_use]
    pub fn tripped(&self) -> bool {
        self.tripped
    }

    /// Smallest residual observed so far.
    #[must_use]
    pub fn best(&self) -> f64 {
        self.best
    }
}

impl<E: HasResidual, A: CanStopEarly> Observer<E, A> for DivergenceGuard {
    fn observe(&mut self, event: &E) -> Option<A> {
        let residual = event.residual();
        if !residual.is_finite() || residual > self.factor * self.best {
            self.tripped = true;
            return Some(A::stop_early());
        }
        self.best = self.best.min(residual);
        None
    }
}

/// Allows `&mut DivergenceGuard` to be passed to solvers that take an
/// observer by value.
impl<E: HasResidual, A: CanStopEarly> Observer<E, A> for &mut DivergenceGuard {
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use polysulfide_solvers::equation::newton;
    use polysulfide_speciation::{EquilibriumSolver, SpeciesState};
    use uom::si::{electric_potential::volt, f64::ElectricPotential};

    struct Event(f64);

    impl HasResidual for Event {
        fn residual(&self) -> f64 {
            self.0
        }
    }

    #[derive(Debug, PartialEq)]
    struct Stop;

    impl CanStopEarly for Stop {
        fn stop_early() -> Self {
            Stop
        }
    }

    fn feed(guard: &mut DivergenceGuard, residuals: &[f64]) -> Option<usize> {
        residuals
            .iter()
            .position(|&r| Observer::<Event, Stop>::observe(guard, &Event(r)).is_some())
    }

    #[test]
    fn decreasing_residuals_pass() {
        let mut guard = DivergenceGuard::new(10.0);

        assert_eq!(feed(&mut guard, &[5.0, 1.0, 0.5, 0.01]), None);
        assert!(!guard.tripped());
        assert_eq!(guard.best(), 0.01);
    }

    #[test]
    fn moderate_growth_is_tolerated() {
        let mut guard = DivergenceGuard::new(10.0);

        assert_eq!(feed(&mut guard, &[1.0, 9.0, 0.5]), None);
    }

    #[test]
    fn trips_on_large_growth() {
        let mut guard = DivergenceGuard::new(10.0);

        assert_eq!(feed(&mut guard, &[1.0, 0.1, 2.0]), Some(2));
        assert!(guard.tripped());
    }

    #[test]
    fn trips_on_non_finite_residual() {
        let mut guard = DivergenceGuard::new(10.0);

        assert_eq!(feed(&mut guard, &[1.0, f64::NAN]), Some(1));
    }

    #[test]
    fn leaves_a_converging_solve_alone() {
        let mut guard = DivergenceGuard::new(1e12);
        let solver = EquilibriumSolver::default();
        let guess = SpeciesState::new(1.241e-7, 0.01, 0.0013, 0.216);

        let point = solver
            .solve_observed(ElectricPotential::new::<volt>(2.237), 0.054, guess, &mut guard)
            .unwrap();

        assert_eq!(point.status, newton::Status::Converged);
        assert!(!guard.tripped());
    }

    #[test]
    #[should_panic(expected = "must exceed one")]
    fn rejects_small_factor() {
        let _ = DivergenceGuard::new(0.5);
    }
}
