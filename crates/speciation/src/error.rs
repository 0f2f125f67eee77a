use polysulfide_solvers::equation::newton;
use thiserror::Error;

use crate::{SpeciesState, sweep::ConfigError};

/// Errors that can occur while computing a speciation.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid thermodynamic parameters: {0}")]
    InvalidParams(&'static str),

    #[error("total sulfur must be finite and positive, got {0}")]
    InvalidTotalSulfur(f64),

    #[error("guess must be finite and strictly positive, got {0:?}")]
    InvalidGuess(SpeciesState),

    #[error("q{constant} is not representable at {potential} V (ln q = {ln_q})")]
    ConstantOutOfRange {
        constant: usize,
        potential: f64,
        ln_q: f64,
    },

    #[error("invalid sweep")]
    InvalidSweep(#[from] ConfigError),

    #[error("newton iteration failed at {potential} V")]
    Solver {
        potential: f64,
        #[source]
        source: newton::Error,
    },

    #[error("equilibrium did not converge at {potential} V (residual {residual_norm:e})")]
    NotConverged { potential: f64, residual_norm: f64 },
}
