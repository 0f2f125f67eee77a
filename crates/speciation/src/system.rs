use std::convert::Infallible;

use polysulfide_core::{EquationProblem, Model};

use crate::{EquilibriumConstants, SpeciesState};

/// Closes the sulfur balance for a candidate speciation.
///
/// Given the four polysulfide concentrations, the model returns the free S₈
/// that makes the total sulfur add up to `total_sulfur`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SulfurBalance {
    total_sulfur: f64,
}

impl SulfurBalance {
    #[must_use]
    pub fn new(total_sulfur: f64) -> Self {
        Self { total_sulfur }
    }

    #[must_use]
    pub fn total_sulfur(&self) -> f64 {
        self.total_sulfur
    }
}

impl Model for SulfurBalance {
    type Input = SpeciesState;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, input: &SpeciesState) -> Result<f64, Infallible> {
        Ok(input.free_sulfur(self.total_sulfur))
    }
}

/// The mass-action and sulfur-balance equations at one potential.
///
/// In linear form the system is
///
/// ```text
/// f1 = c8·c4 − c6²/q2
/// f2 = q1·c8 − c4²
/// f3 = q3·s8 − c8          with s8 = total − c8 − c4/2 − 3·c6/4 − c1/8
/// f4 = q4·c4 − c1⁴
/// ```
///
/// As an [`EquationProblem`] the system is posed in log-concentration
/// variables `y = ln c`. The three mass-action laws become linear in `y`, and
/// the sulfur balance is scaled by the total sulfur. Every `y` maps to a
/// strictly positive state, so the solver cannot wander into negative
/// concentrations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquilibriumSystem {
    constants: EquilibriumConstants,
    total_sulfur: f64,
}

impl EquilibriumSystem {
    #[must_use]
    pub fn new(constants: EquilibriumConstants, total_sulfur: f64) -> Self {
        Self {
            constants,
            total_sulfur,
        }
    }

    #[must_use]
    pub fn constants(&self) -> &EquilibriumConstants {
        &self.constants
    }

    #[must_use]
    pub fn total_sulfur(&self) -> f64 {
        self.total_sulfur
    }

    /// Evaluates `[f1, f2, f3, f4]` in their linear form.
    #[must_use]
    pub fn mass_action_residuals(&self, state: &SpeciesState) -> [f64; 4] {
        self.scaled_terms(state).map(|(residual, _)| residual)
    }

    /// Evaluates each residual relative to the magnitude of its terms.
    ///
    /// The linear residuals of a single state can differ by dozens of orders
    /// of magnitude, so `fᵢ` divided by the sum of the magnitudes of its
    /// terms is what says whether a state is an equilibrium. For `f3` those
    /// terms are `q3·total`, `q3·bound`, and `c8`, since free S₈ is itself a
    /// difference. An equation whose terms are all zero scores zero.
    #[must_use]
    pub fn relative_residuals(&self, state: &SpeciesState) -> [f64; 4] {
        self.scaled_terms(state)
            .map(|(residual, scale)| if scale == 0.0 { 0.0 } else { residual / scale })
    }

    /// Pairs each linear residual with the sum of its term magnitudes.
    fn scaled_terms(&self, state: &SpeciesState) -> [(f64, f64); 4] {
        let SpeciesState {
            li2s8: c8,
            li2s4: c4,
            li2s6: c6,
            li2s: c1,
        } = *state;
        let c = &self.constants;
        let bound = state.bound_sulfur();
        let s8 = self.total_sulfur - bound;

        let pair = |lhs: f64, rhs: f64| (lhs - rhs, lhs.abs() + rhs.abs());
        let f3 = c.q3() * s8 - c8;
        let f3_scale = c.q3() * (self.total_sulfur.abs() + bound.abs()) + c8.abs();

        [
            pair(c8 * c4, c6 * c6 / c.q2()),
            pair(c.q1() * c8, c4 * c4),
            (f3, f3_scale),
            pair(c.q4() * c4, c1.powi(4)),
        ]
    }
}

impl EquationProblem<4> for EquilibriumSystem {
    type Input = SpeciesState;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 4]) -> Result<SpeciesState, Infallible> {
        Ok(SpeciesState::from_ln(*x))
    }

    fn residuals(&self, input: &SpeciesState, free_sulfur: &f64) -> Result<[f64; 4], Infallible> {
        let [ln_q1, ln_q2, ln_q3, ln_q4] = self.constants.ln_q();
        let [y8, y4, y6, y1] = input.ln();

        Ok([
            y8 + y4 + ln_q2 - 2.0 * y6,
            ln_q1 + y8 - 2.0 * y4,
            ((y8 - ln_q3).exp() - free_sulfur) / self.total_sulfur,
            ln_q4 + y4 - 4.0 * y1,
        ])
    }
}
