//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event and action types, so one
//! observer can watch a Newton solve and a potential sweep alike.
//!
//! # Event traits
//!
//! - [`HasResidual`]: events that carry a residual norm
//!
//! # Action traits
//!
//! - [`CanStopEarly`]: actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use polysulfide_core::Observer;
//! use polysulfide_observers::traits::{CanStopEarly, HasResidual};
//!
//! struct GoodEnough {
//!     tolerance: f64,
//!     min_events: usize,
//!     seen: usize,
//! }
//!
//! impl<E: HasResidual, A: CanStopEarly> Observer<E, A> for GoodEnough {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         self.seen += 1;
//!         if self.seen >= self.min_events && event.residual() < self.tolerance {
//!             return Some(A::stop_early());
//!         }
//!         None
//!     }
//! }
//! ```

use polysulfide_solvers::equation::newton;
use polysulfide_speciation::sweep;

/// An event that carries a residual norm.
pub trait HasResidual {
    /// Returns the residual norm for this event.
    fn residual(&self) -> f64;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

impl<I, O, const N: usize> HasResidual for newton::Event<'_, I, O, N> {
    fn residual(&self) -> f64 {
        self.residual_norm
    }
}

/// The final log-space residual norm of the solved point.
impl HasResidual for sweep::Event<'_> {
    fn residual(&self) -> f64 {
        self.point.residual_norm
    }
}

impl CanStopEarly for newton::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

impl CanStopEarly for sweep::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
