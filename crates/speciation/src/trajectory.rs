use uom::si::{electric_potential::volt, f64::ElectricPotential};

use crate::{
    DifferenceScheme, PointSolution, Species, SulfurShares, current::current, sweep::SweepStatus,
};

/// The ordered points of a completed or stopped sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    total_sulfur: f64,
    spacing: ElectricPotential,
    status: SweepStatus,
    points: Vec<PointSolution>,
}

/// Sulfur shares along a trajectory, one series per form, in percent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SulfurPercentages {
    pub li2s8: Vec<f64>,
    pub li2s4: Vec<f64>,
    pub li2s6: Vec<f64>,
    pub li2s: Vec<f64>,
    pub s8: Vec<f64>,
}

/// Pseudo-current against potential.
#[derive(Debug, Clone, PartialEq)]
pub struct Voltammogram {
    /// Potentials in volts.
    pub potential: Vec<f64>,
    pub current: Vec<f64>,
}

impl Trajectory {
    pub(crate) fn new(
        total_sulfur: f64,
        spacing: ElectricPotential,
        status: SweepStatus,
        points: Vec<PointSolution>,
    ) -> Self {
        Self {
            total_sulfur,
            spacing,
            status,
            points,
        }
    }

    #[must_use]
    pub fn total_sulfur(&self) -> f64 {
        self.total_sulfur
    }

    /// Spacing of the potential grid.
    #[must_use]
    pub fn spacing(&self) -> ElectricPotential {
        self.spacing
    }

    #[must_use]
    pub fn status(&self) -> SweepStatus {
        self.status
    }

    #[must_use]
    pub fn points(&self) -> &[PointSolution] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points whose final Newton stage did not converge.
    pub fn non_converged(&self) -> impl Iterator<Item = &PointSolution> {
        self.points.iter().filter(|point| !point.is_converged())
    }

    /// Potentials in volts.
    #[must_use]
    pub fn potentials(&self) -> Vec<f64> {
        self.points
            .iter()
            .map(|point| point.potential.get::<volt>())
            .collect()
    }

    /// Concentration of one species at every point, in mol/L.
    #[must_use]
    pub fn series(&self, species: Species) -> Vec<f64> {
        self.points
            .iter()
            .map(|point| point.state.get(species))
            .collect()
    }

    /// Free S₈ at every point, in mol/L.
    #[must_use]
    pub fn free_sulfur(&self) -> Vec<f64> {
        self.points
            .iter()
            .map(|point| point.state.free_sulfur(self.total_sulfur))
            .collect()
    }

    /// Share of the total sulfur in each point.
    #[must_use]
    pub fn shares(&self) -> Vec<SulfurShares> {
        self.points
            .iter()
            .map(|point| point.state.shares(self.total_sulfur))
            .collect()
    }

    /// Sulfur shares as one series per form.
    #[must_use]
    pub fn percentages(&self) -> SulfurPercentages {
        let mut percentages = SulfurPercentages::default();
        for shares in self.shares() {
            percentages.li2s8.push(shares.li2s8);
            percentages.li2s4.push(shares.li2s4);
            percentages.li2s6.push(shares.li2s6);
            percentages.li2s.push(shares.li2s);
            percentages.s8.push(shares.s8);
        }
        percentages
    }

    /// Pseudo-current at every point. See [`crate::current`].
    #[must_use]
    pub fn current(&self, scheme: DifferenceScheme) -> Vec<f64> {
        let series: Vec<_> = Species::ALL
            .iter()
            .map(|&species| self.series(species))
            .collect();
        current(&series, self.spacing.get::<volt>(), scheme)
    }

    #[must_use]
    pub fn voltammogram(&self, scheme: DifferenceScheme) -> Voltammogram {
        Voltammogram {
            potential: self.potentials(),
            current: self.current(scheme),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use polysulfide_solvers::equation::newton::Status;

    use crate::SpeciesState;

    fn point(potential: f64, state: SpeciesState, status: Status) -> PointSolution {
        PointSolution {
            potential: ElectricPotential::new::<volt>(potential),
            state,
            status,
            iters: 3,
            residual_norm: 0.0,
            stabilized: false,
        }
    }

    fn trajectory() -> Trajectory {
        let points = vec![
            point(2.0, SpeciesState::new(0.0, 0.0, 0.0, 0.8), Status::Converged),
            point(2.1, SpeciesState::new(0.0, 0.1, 0.0, 0.4), Status::MaxIters),
            point(2.2, SpeciesState::new(0.05, 0.1, 0.0, 0.0), Status::Converged),
        ];
        Trajectory::new(
            0.1,
            ElectricPotential::new::<volt>(0.1),
            SweepStatus::Complete,
            points,
        )
    }

    #[test]
    fn series_follow_point_order() {
        let trajectory = trajectory();

        assert_eq!(trajectory.series(Species::Li2S), vec![0.8, 0.4, 0.0]);
        assert_eq!(trajectory.potentials(), vec![2.0, 2.1, 2.2]);
    }

    #[test]
    fn percentages_track_the_sulfur_balance() {
        let percentages = trajectory().percentages();

        assert_relative_eq!(percentages.li2s[0], 100.0, epsilon = 1e-12);
        assert_relative_eq!(percentages.li2s4[1], 50.0, epsilon = 1e-12);
        assert_relative_eq!(percentages.li2s[1], 50.0, epsilon = 1e-12);
        assert_relative_eq!(percentages.li2s8[2], 50.0, epsilon = 1e-12);
        assert_relative_eq!(percentages.s8[2], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn reports_non_converged_points() {
        let trajectory = trajectory();
        let flagged: Vec<_> = trajectory.non_converged().map(|p| p.potential.get::<volt>()).collect();

        assert_eq!(flagged, vec![2.1]);
    }

    #[test]
    fn voltammogram_uses_backward_differences() {
        let voltammogram = trajectory().voltammogram(DifferenceScheme::Backward);

        assert_eq!(voltammogram.potential.len(), 3);
        assert_relative_eq!(voltammogram.current[0], 0.0);
        // Δ = 0.1 − 0.4 = −0.3, then 0.05 − 0.4 = −0.35
        assert_relative_eq!(voltammogram.current[1], -2.0 / 0.1 * -0.3, epsilon = 1e-12);
        assert_relative_eq!(voltammogram.current[2], -2.0 / 0.1 * -0.35, epsilon = 1e-12);
    }

    #[test]
    fn forward_scheme_pads_the_end() {
        let current = trajectory().current(DifferenceScheme::Forward);

        assert_relative_eq!(current[2], 0.0);
        // Δ = 0.8 − 0.4 − 0.1 = 0.3
        assert_relative_eq!(current[0], -2.0 / 0.1 * 0.3, epsilon = 1e-12);
    }
}
