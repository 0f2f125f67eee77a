/// Defines a system of equations to be solved.
///
/// An equation problem maps solver variables to a model input, then computes
/// residuals from the model input and output. Solvers search for the `x` that
/// drives every residual to zero.
///
/// The const generic `N` is the number of solver variables and residuals.
/// For example, `N = 4` represents a square system of four equations in four
/// unknowns.
///
/// The solver variables need not be the model's natural variables. A problem
/// may, for instance, work in log space so that a strictly positive input is
/// guaranteed for every `x`.
pub trait EquationProblem<const N: usize> {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Maps solver variables (`x`) into a model input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the input cannot be constructed from `x`.
    fn input(&self, x: &[f64; N]) -> Result<Self::Input, Self::Error>;

    /// Computes residuals from model input/output.
    ///
    /// Solvers search for the input that makes every residual zero.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the residuals cannot be computed.
    fn residuals(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; N], Self::Error>;
}
