use uom::si::{electric_potential::volt, f64::ElectricPotential};

use crate::{Error, Stabilization, ThermoParams};

/// `ln(f64::MAX)`, the largest `ln q` whose exponential is representable.
const MAX_LN_Q: f64 = 709.782_712_893_384;

/// The four equilibrium constants at a single potential.
///
/// Constants are stored as natural logarithms. Across a typical sweep they
/// span more than forty orders of magnitude, and the equilibrium problem is
/// posed in log space, so `ln q` is what the solver consumes. The linear
/// values are available through [`q1`](Self::q1) to [`q4`](Self::q4).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquilibriumConstants {
    ln_q: [f64; 4],
}

impl EquilibriumConstants {
    /// Computes the constants at `potential`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParams`] if `params` fails validation, or
    /// [`Error::ConstantOutOfRange`] if any `q` would overflow or underflow.
    pub fn at(potential: ElectricPotential, params: &ThermoParams) -> Result<Self, Error> {
        Self::with_u03(potential, params, params.u03)
    }

    /// Computes the constants used by the trial solve below the threshold.
    ///
    /// `q1`, `q2`, and `q4` match [`at`](Self::at). `q3` is referenced to the
    /// shifted potential from [`Stabilization::reference`] instead of `u03`.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`at`](Self::at).
    pub fn stabilized(
        potential: ElectricPotential,
        params: &ThermoParams,
        stabilization: &Stabilization,
    ) -> Result<Self, Error> {
        Self::with_u03(potential, params, stabilization.reference(potential))
    }

    fn with_u03(
        potential: ElectricPotential,
        params: &ThermoParams,
        u03: ElectricPotential,
    ) -> Result<Self, Error> {
        params.validate()?;

        let kbt = params.thermal_voltage.get::<volt>();
        let u = potential.get::<volt>();
        let free_energies = [
            -2.0 * (u - params.u01.get::<volt>()),
            params.u02.get::<volt>(),
            -2.0 * (u - u03.get::<volt>()),
            -4.0 * (u - params.u04.get::<volt>()),
        ];
        let ln_q = free_energies.map(|dg| dg / kbt);

        if let Some(index) = ln_q
            .iter()
            .position(|value| !value.is_finite() || value.abs() > MAX_LN_Q)
        {
            return Err(Error::ConstantOutOfRange {
                constant: index + 1,
                potential: u,
                ln_q: ln_q[index],
            });
        }

        Ok(Self { ln_q })
    }

    /// Returns `[ln q1, ln q2, ln q3, ln q4]`.
    #[must_use]
    pub fn ln_q(&self) -> [f64; 4] {
        self.ln_q
    }

    /// `Li₂S₈ + 2e⁻ ⇌ 2 Li₂S₄`
    #[must_use]
    pub fn q1(&self) -> f64 {
        self.ln_q[0].exp()
    }

    /// `Li₂S₈ + Li₂S₄ ⇌ 2 Li₂S₆`
    #[must_use]
    pub fn q2(&self) -> f64 {
        self.ln_q[1].exp()
    }

    /// `S₈ + 2e⁻ ⇌ Li₂S₈`
    #[must_use]
    pub fn q3(&self) -> f64 {
        self.ln_q[2].exp()
    }

    /// `Li₂S₄ ⇌ 4 Li₂S`
    #[must_use]
    pub fn q4(&self) -> f64 {
        self.ln_q[3].exp()
    }
}
