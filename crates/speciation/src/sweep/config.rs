use thiserror::Error;
use uom::si::{electric_potential::volt, f64::ElectricPotential};

use crate::SpeciesState;

/// What a sweep does with a point whose Newton solve did not converge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConvergencePolicy {
    /// Log a warning, keep the point, and continue from it.
    #[default]
    Warn,

    /// Abort the sweep with [`Error::NotConverged`](crate::Error::NotConverged).
    Fail,
}

/// Configuration for a potential sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SweepConfig {
    /// First potential of the sweep.
    pub start: ElectricPotential,

    /// Last potential of the sweep, always included.
    pub stop: ElectricPotential,

    /// Nominal spacing. The grid uses the closest spacing that divides the
    /// range evenly.
    pub step: ElectricPotential,

    /// Total sulfur in mol/L of S₈.
    pub total_sulfur: f64,

    pub on_nonconvergence: ConvergencePolicy,

    /// Starting guess for the first point.
    pub initial_guess: SpeciesState,
}

/// Errors that can occur when validating a [`SweepConfig`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("sweep bounds must be finite")]
    NonFiniteBounds,

    #[error("sweep must increase: start {start} V is not below stop {stop} V")]
    EmptyRange { start: f64, stop: f64 },

    #[error("step must be finite and positive, got {0} V")]
    Step(f64),

    #[error("step {step} V exceeds the sweep range of {span} V")]
    StepExceedsRange { step: f64, span: f64 },

    #[error("total sulfur must be finite and positive, got {0}")]
    TotalSulfur(f64),

    #[error("initial guess must be finite and strictly positive")]
    InitialGuess,
}

impl Default for SweepConfig {
    /// 1.8 V to 2.5 V in 1 mV steps with 0.054 mol/L of sulfur.
    fn default() -> Self {
        let total_sulfur = 0.054;
        Self {
            start: ElectricPotential::new::<volt>(1.8),
            stop: ElectricPotential::new::<volt>(2.5),
            step: ElectricPotential::new::<volt>(0.001),
            total_sulfur,
            on_nonconvergence: ConvergencePolicy::Warn,
            initial_guess: SpeciesState::new(1.241e-7, 0.01, 0.0013, total_sulfur * 4.0),
        }
    }
}

impl SweepConfig {
    /// Checks the sweep bounds, step, total sulfur, and initial guess.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let start = self.start.get::<volt>();
        let stop = self.stop.get::<volt>();
        let step = self.step.get::<volt>();

        if !start.is_finite() || !stop.is_finite() {
            return Err(ConfigError::NonFiniteBounds);
        }
        if start >= stop {
            return Err(ConfigError::EmptyRange { start, stop });
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::Step(step));
        }
        let span = stop - start;
        if step > span {
            return Err(ConfigError::StepExceedsRange { step, span });
        }
        if !self.total_sulfur.is_finite() || self.total_sulfur <= 0.0 {
            return Err(ConfigError::TotalSulfur(self.total_sulfur));
        }
        if !self.initial_guess.is_positive() {
            return Err(ConfigError::InitialGuess);
        }

        Ok(())
    }

    /// Number of grid points, endpoints included.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid.
    pub fn num_points(&self) -> Result<usize, ConfigError> {
        self.validate()?;

        let span = (self.stop - self.start).get::<volt>();
        let intervals = (span / self.step.get::<volt>()).round();

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let intervals = intervals.max(1.0) as usize;
        Ok(intervals + 1)
    }

    /// Actual spacing between grid points.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid.
    pub fn spacing(&self) -> Result<ElectricPotential, ConfigError> {
        let intervals = self.num_points()? - 1;

        #[allow(clippy::cast_precision_loss)]
        let intervals = intervals as f64;
        Ok((self.stop - self.start) / intervals)
    }

    /// The potential grid, from `start` to exactly `stop`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid.
    pub fn potentials(&self) -> Result<Vec<ElectricPotential>, ConfigError> {
        let n = self.num_points()?;
        let spacing = self.spacing()?;

        Ok((0..n)
            .map(|i| {
                if i == n - 1 {
                    self.stop
                } else {
                    #[allow(clippy::cast_precision_loss)]
                    let offset = spacing * i as f64;
                    self.start + offset
                }
            })
            .collect())
    }
}
