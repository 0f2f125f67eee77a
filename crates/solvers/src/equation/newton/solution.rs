use polysulfide_core::Snapshot;

use crate::equation::Evaluation;

/// Indicates how the Newton solver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Converged according to the configured tolerances.
    Converged,

    /// Reached the iteration limit without converging.
    MaxIters,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a Newton solve.
#[derive(Debug, Clone)]
pub struct Solution<I, O, const N: usize> {
    /// Final solver status.
    pub status: Status,

    /// The final iterate.
    pub x: [f64; N],

    /// Residuals at the final iterate.
    pub residuals: [f64; N],

    /// Infinity norm of the residuals at the final iterate.
    pub residual_norm: f64,

    /// Snapshot at the final iterate.
    pub snapshot: Snapshot<I, O>,

    /// Number of Newton steps taken.
    pub iters: usize,
}

impl<I, O, const N: usize> Solution<I, O, N> {
    /// Constructs a solution from an evaluation result.
    pub(super) fn from_eval(eval: Evaluation<I, O, N>, status: Status, iters: usize) -> Self {
        let residual_norm = eval.residual_norm();
        Self {
            status,
            x: eval.x,
            residuals: eval.residuals,
            residual_norm,
            snapshot: eval.snapshot,
            iters,
        }
    }

    /// Returns true if the solver converged.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == Status::Converged
    }
}
