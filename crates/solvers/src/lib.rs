//! Numerical solvers for problems defined with `polysulfide-core`.
//!
//! # Modules
//!
//! - [`equation`]: solvers that drive the residuals of an
//!   [`EquationProblem`](polysulfide_core::EquationProblem) to zero

pub mod equation;
