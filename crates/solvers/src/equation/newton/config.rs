use thiserror::Error;

/// Configuration for the Newton solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_iters: usize,
    residual_tol: f64,
    x_abs_tol: f64,
    x_rel_tol: f64,
    max_step: f64,
    fd_rel_step: f64,
}

/// Errors that can occur when validating a Newton solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("residual_tol must be finite and non-negative")]
    ResidualTol,

    #[error("x_abs_tol must be finite and non-negative")]
    XAbs,

    #[error("x_rel_tol must be finite and non-negative")]
    XRel,

    #[error("max_step must be positive")]
    MaxStep,

    #[error("fd_rel_step must be finite and positive")]
    FdRelStep,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(200, 1e-10, 1e-12, 1e-12).unwrap()
    }
}

impl Config {
    /// Creates a new config with validated tolerances.
    ///
    /// Steps are undamped and the Jacobian uses a relative finite-difference
    /// step of `√ε`. Use [`Config::with_max_step`] and
    /// [`Config::with_fd_rel_step`] to change either.
    ///
    /// # Errors
    ///
    /// Returns an error if any tolerance is negative or non-finite.
    pub fn new(
        max_iters: usize,
        residual_tol: f64,
        x_abs_tol: f64,
        x_rel_tol: f64,
    ) -> Result<Self, ConfigError> {
        if !residual_tol.is_finite() || residual_tol < 0.0 {
            return Err(ConfigError::ResidualTol);
        }
        if !x_abs_tol.is_finite() || x_abs_tol < 0.0 {
            return Err(ConfigError::XAbs);
        }
        if !x_rel_tol.is_finite() || x_rel_tol < 0.0 {
            return Err(ConfigError::XRel);
        }

        Ok(Self {
            max_iters,
            residual_tol,
            x_abs_tol,
            x_rel_tol,
            max_step: f64::INFINITY,
            fd_rel_step: f64::EPSILON.sqrt(),
        })
    }

    /// Returns a copy with a different iteration limit.
    #[must_use]
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Returns a copy that limits every step to `‖dx‖∞ ≤ max_step`.
    ///
    /// `f64::INFINITY` disables damping.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_step` is NaN or not positive.
    pub fn with_max_step(mut self, max_step: f64) -> Result<Self, ConfigError> {
        if max_step.is_nan() || max_step <= 0.0 {
            return Err(ConfigError::MaxStep);
        }
        self.max_step = max_step;
        Ok(self)
    }

    /// Returns a copy with a different relative finite-difference step.
    ///
    /// # Errors
    ///
    /// Returns an error if `fd_rel_step` is not finite and positive.
    pub fn with_fd_rel_step(mut self, fd_rel_step: f64) -> Result<Self, ConfigError> {
        if !fd_rel_step.is_finite() || fd_rel_step <= 0.0 {
            return Err(ConfigError::FdRelStep);
        }
        self.fd_rel_step = fd_rel_step;
        Ok(self)
    }

    /// Returns the maximum number of Newton steps.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the residual tolerance (infinity norm).
    #[must_use]
    pub fn residual_tol(&self) -> f64 {
        self.residual_tol
    }

    /// Returns the absolute tolerance for step convergence.
    #[must_use]
    pub fn x_abs_tol(&self) -> f64 {
        self.x_abs_tol
    }

    /// Returns the relative tolerance for step convergence.
    #[must_use]
    pub fn x_rel_tol(&self) -> f64 {
        self.x_rel_tol
    }

    /// Returns the largest allowed step component.
    #[must_use]
    pub fn max_step(&self) -> f64 {
        self.max_step
    }

    /// Returns the relative finite-difference step for the Jacobian.
    #[must_use]
    pub fn fd_rel_step(&self) -> f64 {
        self.fd_rel_step
    }

    /// Returns true if every component of `step` is within the x tolerances.
    pub(super) fn is_step_converged(&self, step: &[f64], x: &[f64]) -> bool {
        step.iter()
            .zip(x)
            .all(|(dx, xi)| dx.abs() <= self.x_abs_tol + self.x_rel_tol * xi.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_undamped() {
        let config = Config::default();
        assert_eq!(config.max_iters(), 200);
        assert!(config.max_step().is_infinite());
    }

    #[test]
    fn rejects_bad_tolerances() {
        assert_eq!(Config::new(10, -1.0, 0.0, 0.0), Err(ConfigError::ResidualTol));
        assert_eq!(Config::new(10, 0.0, f64::NAN, 0.0), Err(ConfigError::XAbs));
        assert_eq!(Config::new(10, 0.0, 0.0, f64::INFINITY), Err(ConfigError::XRel));
    }

    #[test]
    fn rejects_bad_steps() {
        let config = Config::default();
        assert_eq!(config.with_max_step(0.0), Err(ConfigError::MaxStep));
        assert_eq!(config.with_max_step(f64::NAN), Err(ConfigError::MaxStep));
        assert_eq!(config.with_fd_rel_step(-1e-8), Err(ConfigError::FdRelStep));
        assert!(config.with_max_step(f64::INFINITY).is_ok());
    }

    #[test]
    fn step_convergence_scales_with_x() {
        let config = Config::new(10, 0.0, 1e-12, 1e-6).expect("valid config");
        assert!(config.is_step_converged(&[1e-5], &[100.0]));
        assert!(!config.is_step_converged(&[1e-5], &[1.0]));
        assert!(!config.is_step_converged(&[1e-13, 1.0], &[0.0, 0.0]));
    }
}
