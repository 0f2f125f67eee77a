//! Damped Newton iteration for square systems of equations.
//!
//! # Algorithm
//!
//! Starting from an initial guess `x₀`, each iteration:
//!
//! 1. Evaluates the residuals `r(x)`.
//! 2. Builds a forward-difference Jacobian `J` column by column.
//! 3. Solves `J·dx = −r` with an LU decomposition.
//! 4. Scales `dx` down so that `‖dx‖∞ ≤ max_step` (a no-op by default).
//! 5. Steps to `x + dx`.
//!
//! The solver converges when `‖r‖∞ ≤ residual_tol`, or when the last step was
//! smaller than `x_abs_tol + x_rel_tol·|x|` in every component.
//!
//! # Non-convergence
//!
//! Running out of iterations is not an error. The solver returns the last
//! iterate with [`Status::MaxIters`] and leaves the policy to the caller.
//! Errors are reserved for conditions where no meaningful iterate exists:
//! non-finite values, a singular Jacobian, or a failing model or problem.
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per evaluated iterate, including the initial
//! guess (iteration 0). Observers can return [`Action::StopEarly`] to halt
//! and receive the current iterate with [`Status::StoppedByObserver`].

mod action;
mod config;
mod error;
mod event;
mod jacobian;
mod solution;


pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use nalgebra::{DMatrix, DVector};
use polysulfide_core::{EquationProblem, Model, Observer};

use crate::equation::{evaluate, evaluate::max_abs};

/// Finds a root of the equation problem using damped Newton iteration.
///
/// The observer receives an [`Event`] for every evaluated iterate.
/// See the [module docs](self) for the algorithm and termination rules.
///
/// # Errors
///
/// Returns an error if the initial guess is not finite, if a residual or
/// Jacobian entry becomes non-finite, if the Jacobian is singular, or if the
/// model or problem fails during evaluation.
pub fn solve<M, P, Obs, const N: usize>(
    model: &M,
    problem: &P,
    x0: [f64; N],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output, N>, Error>
where
    M: Model,
    P: EquationProblem<N, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M::Input, M::Output, N>, Action>,
{
    if let Some(index) = x0.iter().position(|value| !value.is_finite()) {
        return Err(Error::NonFiniteGuess {
            index,
            value: x0[index],
        });
    }

    let mut eval = evaluate(model, problem, x0)?;
    let mut last_step: Option<[f64; N]> = None;
    let mut iter = 0;

    loop {
        let residual_norm = eval.residual_norm();
        if !residual_norm.is_finite() {
            return Err(Error::NonFiniteResidual { iter });
        }

        let event = Event {
            iter,
            eval: &eval,
            residual_norm,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution::from_eval(eval, Status::StoppedByObserver, iter));
        }

        let step_converged = last_step.is_some_and(|step| config.is_step_converged(&step, &eval.x));
        if residual_norm <= config.residual_tol() || step_converged {
            return Ok(Solution::from_eval(eval, Status::Converged, iter));
        }

        if iter >= config.max_iters() {
            return Ok(Solution::from_eval(eval, Status::MaxIters, iter));
        }

        let jacobian = jacobian::forward_difference(model, problem, &eval, config.fd_rel_step())?;
        if jacobian.iter().flatten().any(|value| !value.is_finite()) {
            return Err(Error::NonFiniteJacobian { iter });
        }

        let step = newton_step(&jacobian, &eval.residuals).ok_or(Error::SingularJacobian { iter })?;
        let step = limit_step(step, config.max_step());

        let mut x = eval.x;
        for (xi, dx) in x.iter_mut().zip(step) {
            *xi += dx;
        }

        eval = evaluate(model, problem, x)?;
        last_step = Some(step);
        iter += 1;
    }
}

/// Finds a root of the equation problem without observation.
///
/// This is a convenience wrapper around [`solve`] that uses a no-op observer.
///
/// # Errors
///
/// Returns the same errors as [`solve`].
pub fn solve_unobserved<M, P, const N: usize>(
    model: &M,
    problem: &P,
    x0: [f64; N],
    config: &Config,
) -> Result<Solution<M::Input, M::Output, N>, Error>
where
    M: Model,
    P: EquationProblem<N, Input = M::Input, Output = M::Output>,
{
    solve(model, problem, x0, config, ())
}

/// Solves `J·dx = −r`, returning `None` if the system is singular.
fn newton_step<const N: usize>(jacobian: &[[f64; N]; N], residuals: &[f64; N]) -> Option<[f64; N]> {
    let matrix = DMatrix::from_fn(N, N, |i, j| jacobian[i][j]);
    let rhs = DVector::from_iterator(N, residuals.iter().map(|r| -r));

    let dx = matrix.lu().solve(&rhs)?;
    if dx.iter().any(|value| !value.is_finite()) {
        return None;
    }

    Some(std::array::from_fn(|i| dx[i]))
}

/// Scales the step so its largest component does not exceed `max_step`.
fn limit_step<const N: usize>(step: [f64; N], max_step: f64) -> [f64; N] {
    let largest = max_abs(&step);
    if largest <= max_step {
        return step;
    }
    let scale = max_step / largest;
    step.map(|dx| dx * scale)
}
