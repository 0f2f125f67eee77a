use polysulfide_solvers::equation::newton::{self, Status};
use uom::si::f64::ElectricPotential;

use crate::SpeciesState;

/// The equilibrium found at one potential.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSolution {
    pub potential: ElectricPotential,
    pub state: SpeciesState,

    /// Outcome of the final Newton stage.
    pub status: Status,

    /// Newton steps across both stages.
    pub iters: usize,

    /// Infinity norm of the log-space residuals at `state`.
    pub residual_norm: f64,

    /// Whether a trial stage ran before the final one.
    pub stabilized: bool,
}

impl PointSolution {
    pub(super) fn from_stage(
        potential: ElectricPotential,
        solution: newton::Solution<SpeciesState, f64, 4>,
        iters: usize,
        stabilized: bool,
    ) -> Self {
        Self {
            potential,
            state: solution.snapshot.input,
            status: solution.status,
            iters,
            residual_norm: solution.residual_norm,
            stabilized,
        }
    }

    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == Status::Converged
    }
}
