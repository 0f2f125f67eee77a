use polysulfide_core::{EquationProblem, Model};

use crate::equation::{Evaluation, evaluate};

use super::Error;

/// Builds a forward-difference Jacobian of the residuals around `base`.
///
/// Column `j` perturbs `x[j]` by `rel_step·max(|x[j]|, 1)`. The step actually
/// applied is recomputed from the perturbed value so that rounding in `x + h`
/// does not bias the difference quotient.
pub(super) fn forward_difference<M, P, const N: usize>(
    model: &M,
    problem: &P,
    base: &Evaluation<M::Input, M::Output, N>,
    rel_step: f64,
) -> Result<[[f64; N]; N], Error>
where
    M: Model,
    P: EquationProblem<N, Input = M::Input, Output = M::Output>,
{
    let mut jacobian = [[0.0; N]; N];

    for j in 0..N {
        let mut x = base.x;
        x[j] += rel_step * base.x[j].abs().max(1.0);
        let h = x[j] - base.x[j];

        let perturbed = evaluate(model, problem, x)?;
        for (row, (r, r0)) in jacobian
            .iter_mut()
            .zip(perturbed.residuals.iter().zip(&base.residuals))
        {
            row[j] = (r - r0) / h;
        }
    }

    Ok(jacobian)
}
