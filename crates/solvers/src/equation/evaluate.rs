use thiserror::Error;

use polysulfide_core::{EquationProblem, Model, Snapshot};

/// The result of evaluating an equation problem at a given `x`.
#[derive(Debug, Clone)]
pub struct Evaluation<I, O, const N: usize> {
    pub x: [f64; N],
    pub residuals: [f64; N],
    pub snapshot: Snapshot<I, O>,
}

impl<I, O, const N: usize> Evaluation<I, O, N> {
    /// Returns the largest residual magnitude (the infinity norm).
    ///
    /// Returns `f64::NAN` if any residual is NaN.
    #[must_use]
    pub fn residual_norm(&self) -> f64 {
        max_abs(&self.residuals)
    }
}

/// Errors that can occur when evaluating an equation problem.
#[derive(Debug, Error)]
pub enum EvalError<ME, PE> {
    /// The model call failed.
    #[error("model call failed")]
    Model(#[source] ME),
    /// Failed to construct input or compute residuals.
    #[error("problem error")]
    Problem(#[source] PE),
}

/// Type alias for the result of [`evaluate`].
pub type EvaluateResult<M, P, const N: usize> = Result<
    Evaluation<<M as Model>::Input, <M as Model>::Output, N>,
    EvalError<<M as Model>::Error, <P as EquationProblem<N>>::Error>,
>;

/// Evaluates the model in the context of an equation problem.
///
/// This function maps `x` to model input, calls the model, then computes
/// residuals from the input and output.
///
/// # Errors
///
/// Returns an error if input mapping, model call, or residual computation fails.
pub fn evaluate<M, P, const N: usize>(
    model: &M,
    problem: &P,
    x: [f64; N],
) -> EvaluateResult<M, P, N>
where
    M: Model,
    P: EquationProblem<N, Input = M::Input, Output = M::Output>,
{
    let input = problem.input(&x).map_err(EvalError::Problem)?;
    let output = model.call(&input).map_err(EvalError::Model)?;
    let residuals = problem
        .residuals(&input, &output)
        .map_err(EvalError::Problem)?;

    Ok(Evaluation {
        x,
        residuals,
        snapshot: Snapshot::new(input, output),
    })
}

/// Infinity norm that propagates NaN instead of skipping it.
pub(crate) fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |acc, v| {
        if v.is_nan() || acc.is_nan() {
            f64::NAN
        } else {
            acc.max(v.abs())
        }
    })
}
