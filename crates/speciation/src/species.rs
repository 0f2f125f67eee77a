use std::fmt;

/// A lithium polysulfide tracked by the speciation model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Species {
    Li2S8,
    Li2S4,
    Li2S6,
    Li2S,
}

impl Species {
    /// Every species, in state order.
    pub const ALL: [Species; 4] = [Self::Li2S8, Self::Li2S4, Self::Li2S6, Self::Li2S];

    /// Sulfur atoms per formula unit.
    #[must_use]
    pub fn sulfur_atoms(self) -> u8 {
        match self {
            Self::Li2S8 => 8,
            Self::Li2S4 => 4,
            Self::Li2S6 => 6,
            Self::Li2S => 1,
        }
    }

    /// Sulfur per formula unit, expressed in S₈ equivalents.
    #[must_use]
    pub fn s8_equivalents(self) -> f64 {
        f64::from(self.sulfur_atoms()) / 8.0
    }

    /// Chemical formula with subscripts.
    #[must_use]
    pub fn formula(self) -> &'static str {
        match self {
            Self::Li2S8 => "Li₂S₈",
            Self::Li2S4 => "Li₂S₄",
            Self::Li2S6 => "Li₂S₆",
            Self::Li2S => "Li₂S",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.formula())
    }
}

/// Concentrations of the four polysulfides, in mol/L.
///
/// Free S₈ is not stored. It follows from the sulfur balance, see
/// [`SpeciesState::free_sulfur`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeciesState {
    pub li2s8: f64,
    pub li2s4: f64,
    pub li2s6: f64,
    pub li2s: f64,
}

impl SpeciesState {
    #[must_use]
    pub const fn new(li2s8: f64, li2s4: f64, li2s6: f64, li2s: f64) -> Self {
        Self {
            li2s8,
            li2s4,
            li2s6,
            li2s,
        }
    }

    /// Returns the concentration of a single species.
    #[must_use]
    pub fn get(&self, species: Species) -> f64 {
        match species {
            Species::Li2S8 => self.li2s8,
            Species::Li2S4 => self.li2s4,
            Species::Li2S6 => self.li2s6,
            Species::Li2S => self.li2s,
        }
    }

    /// Returns `[Li₂S₈, Li₂S₄, Li₂S₆, Li₂S]`.
    #[must_use]
    pub fn to_array(&self) -> [f64; 4] {
        Species::ALL.map(|species| self.get(species))
    }

    #[must_use]
    pub fn from_array([li2s8, li2s4, li2s6, li2s]: [f64; 4]) -> Self {
        Self::new(li2s8, li2s4, li2s6, li2s)
    }

    /// Natural logarithm of each concentration, in state order.
    pub(crate) fn ln(&self) -> [f64; 4] {
        self.to_array().map(f64::ln)
    }

    pub(crate) fn from_ln(ln_concentrations: [f64; 4]) -> Self {
        Self::from_array(ln_concentrations.map(f64::exp))
    }

    /// Sulfur held by the polysulfides, in S₈ equivalents.
    #[must_use]
    pub fn bound_sulfur(&self) -> f64 {
        Species::ALL
            .iter()
            .map(|&species| self.get(species) * species.s8_equivalents())
            .sum()
    }

    /// Free S₈ left over once the polysulfides are accounted for.
    ///
    /// The result is negative if the state holds more sulfur than
    /// `total_sulfur`, which no equilibrium state does.
    #[must_use]
    pub fn free_sulfur(&self, total_sulfur: f64) -> f64 {
        total_sulfur - self.bound_sulfur()
    }

    /// Returns true if every concentration is finite and strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.to_array()
            .iter()
            .all(|value| value.is_finite() && *value > 0.0)
    }

    /// Share of `total_sulfur` held by each species, in percent.
    #[must_use]
    pub fn shares(&self, total_sulfur: f64) -> SulfurShares {
        let percent = |s8_equivalents: f64| s8_equivalents / total_sulfur * 100.0;
        let share = |species: Species| percent(self.get(species) * species.s8_equivalents());

        SulfurShares {
            li2s8: share(Species::Li2S8),
            li2s4: share(Species::Li2S4),
            li2s6: share(Species::Li2S6),
            li2s: share(Species::Li2S),
            s8: percent(self.free_sulfur(total_sulfur)),
        }
    }
}

/// Percentage of the total sulfur held by each form at one potential.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SulfurShares {
    pub li2s8: f64,
    pub li2s4: f64,
    pub li2s6: f64,
    pub li2s: f64,
    pub s8: f64,
}

impl SulfurShares {
    /// Returns the share held by one polysulfide.
    #[must_use]
    pub fn get(&self, species: Species) -> f64 {
        match species {
            Species::Li2S8 => self.li2s8,
            Species::Li2S4 => self.li2s4,
            Species::Li2S6 => self.li2s6,
            Species::Li2S => self.li2s,
        }
    }

    /// Sum of every share. Equals 100 for a state that satisfies the balance.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.li2s8 + self.li2s4 + self.li2s6 + self.li2s + self.s8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn bound_sulfur_weights_by_sulfur_atoms() {
        let state = SpeciesState::new(1.0, 1.0, 1.0, 1.0);
        assert_relative_eq!(state.bound_sulfur(), 1.0 + 0.5 + 0.75 + 0.125);
    }

    #[test]
    fn free_sulfur_closes_the_balance() {
        let state = SpeciesState::new(0.01, 0.02, 0.004, 0.08);
        let total = 0.054;

        let free = state.free_sulfur(total);
        assert_relative_eq!(free, 0.054 - 0.01 - 0.01 - 0.003 - 0.01, epsilon = 1e-15);
        assert_relative_eq!(state.bound_sulfur() + free, total, epsilon = 1e-15);
    }

    #[test]
    fn shares_sum_to_one_hundred() {
        let state = SpeciesState::new(3.5e-4, 1.9e-2, 5.9e-2, 2.3e-5);
        let shares = state.shares(0.054);

        assert_relative_eq!(shares.total(), 100.0, epsilon = 1e-10);
        assert_relative_eq!(shares.li2s4, 1.9e-2 * 0.5 / 0.054 * 100.0, epsilon = 1e-12);
    }

    #[test]
    fn all_sulfur_as_li2s_is_one_hundred_percent() {
        let state = SpeciesState::new(0.0, 0.0, 0.0, 0.054 * 8.0);
        let shares = state.shares(0.054);

        assert_relative_eq!(shares.get(Species::Li2S), 100.0, epsilon = 1e-12);
        assert_relative_eq!(shares.s8, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn log_round_trip_preserves_state() {
        let state = SpeciesState::new(1.241e-7, 0.01, 0.0013, 0.216);
        let restored = SpeciesState::from_ln(state.ln());

        for (a, b) in state.to_array().iter().zip(restored.to_array()) {
            assert_relative_eq!(*a, b, max_relative = 1e-14);
        }
    }

    #[test]
    fn positivity_requires_every_component() {
        assert!(SpeciesState::new(1e-40, 1.0, 1.0, 1.0).is_positive());
        assert!(!SpeciesState::new(0.0, 1.0, 1.0, 1.0).is_positive());
        assert!(!SpeciesState::new(1.0, f64::NAN, 1.0, 1.0).is_positive());
        assert!(!SpeciesState::new(1.0, 1.0, 1.0, f64::INFINITY).is_positive());
    }

    #[test]
    fn species_metadata() {
        assert_eq!(Species::Li2S6.sulfur_atoms(), 6);
        assert_relative_eq!(Species::Li2S.s8_equivalents(), 0.125);
        assert_eq!(Species::Li2S8.to_string(), "Li₂S₈");
    }
}
