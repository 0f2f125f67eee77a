use uom::si::{electric_potential::volt, f64::ElectricPotential};

use crate::PointSolution;

/// Event emitted by the sweep after each solved point.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    /// Position of the point on the potential grid.
    pub index: usize,

    /// Number of points in the full grid.
    pub total: usize,

    pub point: &'a PointSolution,
}

impl Event<'_> {
    #[must_use]
    pub fn potential(&self) -> ElectricPotential {
        self.point.potential
    }

    /// Potential of the point in volts.
    #[must_use]
    pub fn volts(&self) -> f64 {
        self.point.potential.get::<volt>()
    }
}

/// Control actions an observer can request from a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop after the current point and return the partial trajectory.
    StopEarly,
}
