//! Equilibrium speciation of lithium polysulfides.
//!
//! At a fixed electrode potential, sulfur in a lithium–sulfur cell is spread
//! across free S₈ and four polysulfides (Li₂S₈, Li₂S₆, Li₂S₄, Li₂S). Three
//! redox couples and one chemical step fix their ratios through equilibrium
//! constants, and a sulfur balance fixes the total. This crate:
//!
//! - computes the [`EquilibriumConstants`] at a potential from [`ThermoParams`]
//! - solves the resulting [`EquilibriumSystem`] with an [`EquilibriumSolver`]
//! - sweeps a potential grid with continuation ([`sweep`])
//! - derives sulfur shares and a pseudo-current from the [`Trajectory`]
//!
//! # Example
//!
//! ```
//! use polysulfide_speciation::{DifferenceScheme, SweepConfig, sweep};
//!
//! let trajectory = sweep::run(&SweepConfig::default())?;
//! assert_eq!(trajectory.len(), 701);
//!
//! let shares = trajectory.percentages();
//! assert!(shares.li2s[0] > 99.9);
//! assert!(shares.s8[700] > 99.0);
//!
//! let cv = trajectory.voltammogram(DifferenceScheme::Backward);
//! assert_eq!(cv.current.len(), trajectory.len());
//! # Ok::<(), polysulfide_speciation::Error>(())
//! ```

mod constants;
pub mod current;
mod error;
mod params;
mod solver;
mod species;
pub mod sweep;
mod system;
mod trajectory;

pub use constants::EquilibriumConstants;
pub use current::DifferenceScheme;
pub use error::Error;
pub use params::ThermoParams;
pub use solver::{EquilibriumSolver, PointSolution, Stabilization, StageEvent};
pub use species::{Species, SpeciesState, SulfurShares};
pub use sweep::{ConvergencePolicy, SweepConfig, SweepStatus};
pub use system::{EquilibriumSystem, SulfurBalance};
pub use trajectory::{SulfurPercentages, Trajectory, Voltammogram};
