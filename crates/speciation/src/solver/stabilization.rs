use uom::si::{electric_potential::volt, f64::ElectricPotential};

/// Settings for the trial solve that precedes low-potential points.
///
/// Below `threshold`, the final equilibrium can be far from any reasonable
/// guess. The solver first solves a relaxed system whose `S₈/Li₂S₈` constant
/// is referenced to [`reference`](Self::reference) rather than `u03`, then
/// starts the real solve from that result.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stabilization {
    /// Trial solves run strictly below this potential.
    pub threshold: ElectricPotential,

    /// Below this potential the reference is shifted by `shift`.
    pub shift_below: ElectricPotential,

    pub shift: ElectricPotential,
}

impl Default for Stabilization {
    fn default() -> Self {
        Self {
            threshold: ElectricPotential::new::<volt>(2.1),
            shift_below: ElectricPotential::new::<volt>(1.9),
            shift: ElectricPotential::new::<volt>(0.2),
        }
    }
}

impl Stabilization {
    /// Settings that never run a trial solve.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            threshold: ElectricPotential::new::<volt>(f64::NEG_INFINITY),
            ..Self::default()
        }
    }

    /// Returns true if a trial solve runs at `potential`.
    #[must_use]
    pub fn applies(&self, potential: ElectricPotential) -> bool {
        potential < self.threshold
    }

    /// The `S₈/Li₂S₈` reference potential used by the trial solve.
    ///
    /// This is `potential + shift` below `shift_below` and `potential`
    /// otherwise, which makes `q3 = 1` in the trial system.
    #[must_use]
    pub fn reference(&self, potential: ElectricPotential) -> ElectricPotential {
        if potential < self.shift_below {
            potential + self.shift
        } else {
            potential
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn volts(value: f64) -> ElectricPotential {
        ElectricPotential::new::<volt>(value)
    }

    #[test]
    fn applies_strictly_below_threshold() {
        let stabilization = Stabilization::default();

        assert!(stabilization.applies(volts(1.8)));
        assert!(stabilization.applies(volts(2.099)));
        assert!(!stabilization.applies(volts(2.1)));
        assert!(!stabilization.applies(volts(2.5)));
    }

    #[test]
    fn reference_shifts_only_below_1_9_volts() {
        let stabilization = Stabilization::default();

        assert_relative_eq!(stabilization.reference(volts(1.85)).get::<volt>(), 2.05, epsilon = 1e-12);
        assert_relative_eq!(stabilization.reference(volts(1.9)).get::<volt>(), 1.9);
        assert_relative_eq!(stabilization.reference(volts(2.0)).get::<volt>(), 2.0);
    }

    #[test]
    fn disabled_never_applies() {
        let stabilization = Stabilization::disabled();

        assert!(!stabilization.applies(volts(-10.0)));
        assert!(!stabilization.applies(volts(1.8)));
    }
}
