//! On-screen plots of sweeps and solves.
//!
//! [`PlotObserver`] collects traces while a solver or sweep runs.
//! [`percentages_plot`] and [`voltammogram_plot`] build the same kind of
//! observer from a finished [`Trajectory`].

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use polysulfide_core::Observer;
use polysulfide_solvers::equation::newton;
use polysulfide_speciation::{DifferenceScheme, Species, Trajectory, sweep};

const POTENTIAL_LABEL: &str = "Potential (V)";

/// How a [`PlotObserver`] window is drawn.
///
/// ```ignore
/// obs.show(ShowConfig::new().title("Speciation").axes("U (V)", "c (mol/L)").log_y())?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowConfig {
    title: Option<String>,
    x_label: Option<String>,
    y_label: Option<String>,
    legend: bool,
    log_y: bool,
}

impl ShowConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Labels the x and y axes.
    #[must_use]
    pub fn axes(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = Some(x.into());
        self.y_label = Some(y.into());
        self
    }

    /// Shows a legend with each trace name.
    #[must_use]
    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    /// Plots `log₁₀ y`. Points with `y ≤ 0` are dropped.
    #[must_use]
    pub fn log_y(mut self) -> Self {
        self.log_y = true;
        self
    }
}

/// Extracts plot data from a solver or sweep event.
///
/// Returning `None` from [`x`](Plottable::x) skips the whole event, and a
/// `None` slot in [`traces`](Plottable::traces) skips just that trace.
///
/// Sweep events plot the four polysulfide concentrations against potential.
/// Newton events plot the residual norm against iteration.
pub trait Plottable<const N: usize> {
    fn x(&self) -> Option<f64>;

    fn traces(&self) -> [Option<f64>; N];
}

/// Collects `N` named traces and shows them in a native window.
///
/// Pass `&mut PlotObserver` to anything that emits [`Plottable`] events, or
/// call [`record`](Self::record) from a closure observer for anything else:
///
/// ```ignore
/// let mut obs = PlotObserver::<1>::new(["Newton steps"]);
/// sweep::run_with(&config, &solver, |event: &sweep::Event<'_>| {
///     obs.record(event.volts(), [Some(event.point.iters as f64)]);
///     None
/// })?;
/// obs.show(ShowConfig::new().axes("Potential (V)", "Steps"))?;
/// ```
#[derive(Debug, Clone)]
pub struct PlotObserver<const N: usize> {
    names: [String; N],
    data: [Vec<[f64; 2]>; N],
}

impl<const N: usize> PlotObserver<N> {
    pub fn new(names: [&str; N]) -> Self {
        Self {
            names: names.map(str::to_owned),
            data: std::array::from_fn(|_| Vec::new()),
        }
    }

    /// Adds a point at `x` to every trace whose slot is `Some`.
    pub fn record(&mut self, x: f64, traces: [Option<f64>; N]) {
        for (trace, y) in self.data.iter_mut().zip(traces) {
            if let Some(y) = y {
                trace.push([x, y]);
            }
        }
    }

    /// The `[x, y]` points recorded for trace `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    #[must_use]
    pub fn trace(&self, index: usize) -> &[[f64; 2]] {
        &self.data[index]
    }

    /// Opens a window with every trace and blocks until it is closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the native window cannot be created.
    pub fn show(self, config: ShowConfig) -> Result<(), eframe::Error> {
        let title = config.title.clone().unwrap_or_default();
        let traces: Vec<(String, Vec<[f64; 2]>)> = self
            .names
            .into_iter()
            .zip(self.data)
            .map(|(name, points)| (name, plot_points(&points, config.log_y)))
            .collect();

        eframe::run_native(
            &title,
            eframe::NativeOptions::default(),
            Box::new(move |_cc| Ok(Box::new(PlotApp { traces, config }))),
        )
    }
}

impl<const N: usize, E, A> Observer<E, A> for PlotObserver<N>
where
    E: Plottable<N>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if let Some(x) = event.x() {
            self.record(x, event.traces());
        }
        None
    }
}

/// Lets a sweep borrow the observer so it can still be shown afterwards.
impl<const N: usize, E, A> Observer<E, A> for &mut PlotObserver<N>
where
    E: Plottable<N>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}

impl Plottable<4> for sweep::Event<'_> {
    fn x(&self) -> Option<f64> {
        Some(self.volts())
    }

    fn traces(&self) -> [Option<f64>; 4] {
        Species::ALL.map(|species| Some(self.point.state.get(species)))
    }
}

impl<I, O, const N: usize> Plottable<1> for newton::Event<'_, I, O, N> {
    #[allow(clippy::cast_precision_loss)]
    fn x(&self) -> Option<f64> {
        Some(self.iter as f64)
    }

    fn traces(&self) -> [Option<f64>; 1] {
        [Some(self.residual_norm)]
    }
}

/// Share of the total sulfur held by each form, against potential.
#[must_use]
pub fn percentages_plot(trajectory: &Trajectory) -> PlotObserver<5> {
    let mut obs = PlotObserver::new(["Li₂S₈", "Li₂S₄", "Li₂S₆", "Li₂S", "S₈"]);
    for (potential, shares) in trajectory.potentials().into_iter().zip(trajectory.shares()) {
        let polysulfides = Species::ALL.map(|species| Some(shares.get(species)));
        let [li2s8, li2s4, li2s6, li2s] = polysulfides;
        obs.record(potential, [li2s8, li2s4, li2s6, li2s, Some(shares.s8)]);
    }
    obs
}

/// Pseudo-current against potential.
#[must_use]
pub fn voltammogram_plot(trajectory: &Trajectory, scheme: DifferenceScheme) -> PlotObserver<1> {
    let voltammogram = trajectory.voltammogram(scheme);
    let mut obs = PlotObserver::new(["Current"]);
    for (potential, current) in voltammogram.potential.into_iter().zip(voltammogram.current) {
        obs.record(potential, [Some(current)]);
    }
    obs
}

/// Shows [`percentages_plot`] and blocks until the window is closed.
///
/// # Errors
///
/// Returns an error if the native window cannot be created.
pub fn show_percentages(trajectory: &Trajectory, config: ShowConfig) -> Result<(), eframe::Error> {
    percentages_plot(trajectory).show(config.axes(POTENTIAL_LABEL, "Share of sulfur (%)"))
}

/// Shows [`voltammogram_plot`] and blocks until the window is closed.
///
/// # Errors
///
/// Returns an error if the native window cannot be created.
pub fn show_voltammogram(
    trajectory: &Trajectory,
    scheme: DifferenceScheme,
    config: ShowConfig,
) -> Result<(), eframe::Error> {
    voltammogram_plot(trajectory, scheme).show(config.axes(POTENTIAL_LABEL, "Current (a.u.)"))
}

/// Applies the y transform of a [`ShowConfig`].
fn plot_points(points: &[[f64; 2]], log_y: bool) -> Vec<[f64; 2]> {
    if !log_y {
        return points.to_vec();
    }
    points
        .iter()
        .filter(|[_, y]| *y > 0.0)
        .map(|&[x, y]| [x, y.log10()])
        .collect()
}

struct PlotApp {
    traces: Vec<(String, Vec<[f64; 2]>)>,
    config: ShowConfig,
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut plot = Plot::new("polysulfide_plot");
            if self.config.legend {
                plot = plot.legend(Legend::default());
            }
            if let Some(label) = &self.config.x_label {
                plot = plot.x_axis_label(label.clone());
            }
            let y_label = match (&self.config.y_label, self.config.log_y) {
                (Some(label), true) => Some(format!("log₁₀ {label}")),
                (Some(label), false) => Some(label.clone()),
                (None, true) => Some("log₁₀".to_owned()),
                (None, false) => None,
            };
            if let Some(label) = y_label {
                plot = plot.y_axis_label(label);
            }

            plot.show(ui, |plot_ui| {
                for (name, points) in &self.traces {
                    let points: PlotPoints = points.iter().copied().collect();
                    plot_ui.line(Line::new(points).name(name));
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use polysulfide_speciation::{EquilibriumSolver, SpeciesState, SweepConfig};
    use uom::si::{electric_potential::volt, f64::ElectricPotential};

    fn short_sweep() -> SweepConfig {
        SweepConfig {
            start: ElectricPotential::new::<volt>(2.2),
            stop: ElectricPotential::new::<volt>(2.3),
            step: ElectricPotential::new::<volt>(0.05),
            ..SweepConfig::default()
        }
    }

    #[test]
    fn record_skips_empty_slots() {
        let mut obs = PlotObserver::<2>::new(["a", "b"]);
        obs.record(1.0, [Some(10.0), None]);
        obs.record(2.0, [None, Some(20.0)]);

        assert_eq!(obs.trace(0), [[1.0, 10.0]]);
        assert_eq!(obs.trace(1), [[2.0, 20.0]]);
    }

    #[test]
    fn records_concentrations_from_sweep_events() {
        let mut obs = PlotObserver::<4>::new(["Li₂S₈", "Li₂S₄", "Li₂S₆", "Li₂S"]);

        let trajectory =
            sweep::run_with(&short_sweep(), &EquilibriumSolver::default(), &mut obs).unwrap();

        assert_eq!(obs.trace(2).len(), 3);
        for (recorded, point) in obs.trace(2).iter().zip(trajectory.points()) {
            assert_eq!(recorded[0], point.potential.get::<volt>());
            assert_eq!(recorded[1], point.state.li2s6);
        }
    }

    #[test]
    fn records_newton_residuals() {
        let mut obs = PlotObserver::<1>::new(["Residual"]);
        let guess = SpeciesState::new(1.241e-7, 0.01, 0.0013, 0.216);

        let point = EquilibriumSolver::default()
            .solve_observed(ElectricPotential::new::<volt>(2.3), 0.054, guess, &mut obs)
            .unwrap();

        let trace = obs.trace(0);
        assert_eq!(trace.len(), point.iters + 1);
        assert_eq!(trace[0][0], 0.0);
        assert_relative_eq!(trace[trace.len() - 1][1], point.residual_norm);
    }

    #[test]
    fn percentages_plot_sums_to_one_hundred() {
        let trajectory = sweep::run(&short_sweep()).unwrap();
        let obs = percentages_plot(&trajectory);

        for index in 0..trajectory.len() {
            let total: f64 = (0..5).map(|trace| obs.trace(trace)[index][1]).sum();
            assert_relative_eq!(total, 100.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn voltammogram_plot_starts_at_zero_for_backward_differences() {
        let trajectory = sweep::run(&short_sweep()).unwrap();
        let obs = voltammogram_plot(&trajectory, DifferenceScheme::Backward);

        assert_eq!(obs.trace(0).len(), trajectory.len());
        assert_eq!(obs.trace(0)[0][1], 0.0);
    }

    #[test]
    fn log_scale_drops_non_positive_values() {
        let points = [[1.0, 100.0], [2.0, 0.0], [3.0, -1.0], [4.0, 0.001]];

        assert_eq!(plot_points(&points, false), points.to_vec());

        let logged = plot_points(&points, true);
        assert_eq!(logged.len(), 2);
        assert_eq!(logged[1][0], 4.0);
        assert_relative_eq!(logged[0][1], 2.0, epsilon = 1e-12);
        assert_relative_eq!(logged[1][1], -3.0, epsilon = 1e-12);
    }
}
