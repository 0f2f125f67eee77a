use uom::si::{electric_potential::volt, f64::ElectricPotential};

use crate::Error;

/// Thermodynamic parameters of the lithium–sulfur redox network.
///
/// Each standard potential sets one equilibrium constant through
/// `ln q = −n·(U − U₀)/k_BT`, where `n` is the number of electrons exchanged.
/// The chemical step (`u02`) exchanges none and enters as a free energy in
/// electron-volts, which is numerically a voltage.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThermoParams {
    /// Thermal energy `k_B·T/e`.
    pub thermal_voltage: ElectricPotential,

    /// Standard potential of `Li₂S₈ + 2e⁻ ⇌ 2 Li₂S₄`.
    pub u01: ElectricPotential,

    /// Free energy of `Li₂S₈ + Li₂S₄ ⇌ 2 Li₂S₆`.
    pub u02: ElectricPotential,

    /// Standard potential of `S₈ + 2e⁻ ⇌ Li₂S₈`.
    pub u03: ElectricPotential,

    /// Standard potential of `Li₂S₄ ⇌ 4 Li₂S`, lumped as a four-electron step.
    pub u04: ElectricPotential,
}

impl Default for ThermoParams {
    /// Room temperature with the reference standard potentials.
    ///
    /// `u04` carries a −0.12 V correction on its tabulated 2.106 V.
    fn default() -> Self {
        Self {
            thermal_voltage: ElectricPotential::new::<volt>(0.0259),
            u01: ElectricPotential::new::<volt>(2.237),
            u02: ElectricPotential::new::<volt>(0.162),
            u03: ElectricPotential::new::<volt>(2.414),
            u04: ElectricPotential::new::<volt>(2.106 - 0.12),
        }
    }
}

impl ThermoParams {
    /// Checks that every parameter is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParams`] if the thermal voltage is not finite
    /// and positive, or if any standard potential is not finite.
    pub fn validate(&self) -> Result<(), Error> {
        let kbt = self.thermal_voltage.get::<volt>();
        if !kbt.is_finite() || kbt <= 0.0 {
            return Err(Error::InvalidParams("thermal_voltage must be finite and positive"));
        }

        let potentials = [
            (self.u01, "u01 must be finite"),
            (self.u02, "u02 must be finite"),
            (self.u03, "u03 must be finite"),
            (self.u04, "u04 must be finite"),
        ];
        for (value, reason) in potentials {
            if !value.get::<volt>().is_finite() {
                return Err(Error::InvalidParams(reason));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn default_carries_reference_values() {
        let params = ThermoParams::default();

        assert_relative_eq!(params.thermal_voltage.get::<volt>(), 0.0259);
        assert_relative_eq!(params.u01.get::<volt>(), 2.237);
        assert_relative_eq!(params.u02.get::<volt>(), 0.162);
        assert_relative_eq!(params.u03.get::<volt>(), 2.414);
        assert_relative_eq!(params.u04.get::<volt>(), 1.986, epsilon = 1e-12);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_thermal_voltage() {
        let params = ThermoParams {
            thermal_voltage: ElectricPotential::new::<volt>(0.0),
            ..ThermoParams::default()
        };
        assert!(matches!(params.validate(), Err(Error::InvalidParams(_))));
    }

    #[test]
    fn rejects_non_finite_potential() {
        let params = ThermoParams {
            u03: ElectricPotential::new::<volt>(f64::NAN),
            ..ThermoParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(Error::InvalidParams("u03 must be finite"))
        ));
    }
}
