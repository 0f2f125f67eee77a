use std::error::Error as StdError;

use thiserror::Error;

use crate::equation::EvalError;

/// Errors that can occur during Newton iteration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("initial guess component {index} is not finite: {value}")]
    NonFiniteGuess { index: usize, value: f64 },

    #[error("non-finite residual at iteration {iter}")]
    NonFiniteResidual { iter: usize },

    #[error("non-finite jacobian at iteration {iter}")]
    NonFiniteJacobian { iter: usize },

    #[error("singular jacobian at iteration {iter}")]
    SingularJacobian { iter: usize },

    #[error("model call failed")]
    Model(#[source] Box<dyn StdError + Send + Sync>),

    #[error("problem error")]
    Problem(#[source] Box<dyn StdError + Send + Sync>),
}

impl<ME, PE> From<EvalError<ME, PE>> for Error
where
    ME: StdError + Send + Sync + 'static,
    PE: StdError + Send + Sync + 'static,
{
    fn from(err: EvalError<ME, PE>) -> Self {
        match err {
            EvalError::Model(e) => Self::Model(Box::new(e)),
            EvalError::Problem(e) => Self::Problem(Box::new(e)),
        }
    }
}
