//! Reusable observers for the polysulfide solvers and sweeps.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across the Newton solver and the potential sweep.
//!
//! - [`traits`]: capability traits for cross-solver observers
//!   ([`HasResidual`], [`CanStopEarly`])
//! - [`DivergenceGuard`]: stops a solve whose residual blows up
//! - [`TracingObserver`]: logs every event through `tracing`
//!
//! # Features
//!
//! - `plot`: enables [`PlotObserver`] and the trajectory plots, rendered with
//!   egui. This feature adds dependencies on `eframe` and `egui_plot`.
//!
//! [`Observer`]: polysulfide_core::Observer
//! [`HasResidual`]: traits::HasResidual
//! [`CanStopEarly`]: traits::CanStopEarly

mod guard;
mod logging;
pub mod traits;

#[cfg(feature = "plot")]
mod plot;

pub use guard::DivergenceGuard;
pub use logging::TracingObserver;

#[cfg(feature = "plot")]
pub use plot::{
    PlotObserver, Plottable, ShowConfig, percentages_plot, show_percentages, show_voltammogram,
    voltammogram_plot,
};
