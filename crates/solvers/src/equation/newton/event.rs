use crate::equation::Evaluation;

/// Event emitted by the Newton solver for each evaluated iterate.
///
/// Iteration 0 is the initial guess. Iteration `k` is the iterate reached
/// after `k` Newton steps.
#[derive(Debug)]
pub struct Event<'a, I, O, const N: usize> {
    /// Number of Newton steps taken to reach this iterate.
    pub iter: usize,

    /// Evaluation at the current iterate.
    pub eval: &'a Evaluation<I, O, N>,

    /// Infinity norm of the residuals at the current iterate.
    pub residual_norm: f64,
}
