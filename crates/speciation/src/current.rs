//! Pseudo-current from the change in speciation along a sweep.
//!
//! The current at each potential is approximated as
//!
//! ```text
//! i = −(n / ΔU) · Σₛ Δcₛ
//! ```
//!
//! where `Δcₛ` is the finite difference of each polysulfide concentration,
//! `ΔU` is the grid spacing, and every species carries the same electron
//! count `n = 2`.
//!
//! With [`DifferenceScheme::Backward`] the polysulfides lost to S₈ on a rising
//! sweep give positive current. [`DifferenceScheme::Forward`] differences
//! against the next point instead, so the same sweep gives negative current.

/// Electrons exchanged per unit change in any polysulfide concentration.
pub const ELECTRONS_PER_SPECIES: f64 = 2.0;

/// How adjacent concentrations are differenced.
///
/// Both schemes produce a series as long as their input. The edge point
/// that has no neighbour on the differenced side is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DifferenceScheme {
    /// `d[i] = c[i] − c[i−1]`, with `d[0] = 0`.
    #[default]
    Backward,

    /// `d[i] = c[i] − c[i+1]`, with the last entry zero.
    ///
    /// This is the trailing-pad convention: a zero predecessor is prepended,
    /// the last value is repeated, the two are subtracted and the first entry
    /// dropped.
    Forward,
}

impl DifferenceScheme {
    /// Differences a series of concentrations.
    #[must_use]
    pub fn apply(self, series: &[f64]) -> Vec<f64> {
        if series.is_empty() {
            return Vec::new();
        }

        let pairs = series.windows(2);
        match self {
            Self::Backward => std::iter::once(0.0)
                .chain(pairs.map(|pair| pair[1] - pair[0]))
                .collect(),
            Self::Forward => pairs
                .map(|pair| pair[0] - pair[1])
                .chain(std::iter::once(0.0))
                .collect(),
        }
    }
}

/// Current from a set of per-species concentration series.
///
/// Every series must have the same length. `spacing` is the potential step
/// in volts.
///
/// # Panics
///
/// Panics if the series lengths differ.
#[must_use]
pub fn current(series: &[Vec<f64>], spacing: f64, scheme: DifferenceScheme) -> Vec<f64> {
    let len = series.first().map_or(0, Vec::len);
    assert!(
        series.iter().all(|s| s.len() == len),
        "concentration series must have equal lengths"
    );

    let mut total = vec![0.0; len];
    for diff in series.iter().map(|s| scheme.apply(s)) {
        for (sum, d) in total.iter_mut().zip(diff) {
            *sum += d;
        }
    }

    let scale = -ELECTRONS_PER_SPECIES / spacing;
    total.into_iter().map(|d| d * scale).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn backward_pads_the_first_point() {
        let diff = DifferenceScheme::Backward.apply(&[1.0, 3.0, 6.0]);
        assert_eq!(diff, vec![0.0, 2.0, 3.0]);
    }

    #[test]
    fn forward_pads_the_last_point() {
        let diff = DifferenceScheme::Forward.apply(&[1.0, 3.0, 6.0]);
        assert_eq!(diff, vec![-2.0, -3.0, 0.0]);
    }

    /// Prepends a zero, appends the last value, subtracts and drops the head.
    fn padded_difference(series: &[f64]) -> Vec<f64> {
        let mut shifted = vec![0.0];
        shifted.extend_from_slice(series);
        let mut padded = series.to_vec();
        padded.push(series[series.len() - 1]);

        shifted
            .iter()
            .zip(&padded)
            .map(|(a, b)| a - b)
            .skip(1)
            .collect()
    }

    #[test]
    fn forward_matches_padded_difference() {
        let series = vec![vec![0.3, 0.1, 0.05, 0.6], vec![0.2, 0.4, 0.45, 0.0]];
        let spacing = 0.001;

        let mut expected = vec![0.0; 4];
        for s in &series {
            for (sum, d) in expected.iter_mut().zip(padded_difference(s)) {
                *sum += d * 2.0;
            }
        }

        let current = current(&series, spacing, DifferenceScheme::Forward);
        for (i, e) in current.iter().zip(expected) {
            assert_relative_eq!(*i, -e / spacing, max_relative = 1e-12);
        }
    }

    #[test]
    fn schemes_disagree_in_sign() {
        let series = vec![vec![1.0, 0.5, 0.2]];
        let backward = current(&series, 0.1, DifferenceScheme::Backward);
        let forward = current(&series, 0.1, DifferenceScheme::Forward);

        assert!(backward[1] > 0.0);
        assert_eq!(forward[0], -backward[1]);
        assert_eq!(forward[1], -backward[2]);
    }

    #[test]
    fn short_series() {
        assert!(DifferenceScheme::Backward.apply(&[]).is_empty());
        assert_eq!(DifferenceScheme::Forward.apply(&[4.0]), vec![0.0]);
    }

    #[test]
    fn current_sums_species_and_scales() {
        let series = vec![vec![0.0, 1.0, 1.5], vec![2.0, 1.0, 1.0]];
        let current = current(&series, 0.5, DifferenceScheme::Backward);

        assert_relative_eq!(current[0], 0.0);
        assert_relative_eq!(current[1], 0.0);
        assert_relative_eq!(current[2], -2.0 / 0.5 * 0.5);
    }

    #[test]
    fn integrated_current_matches_net_change() {
        let series = vec![vec![0.1, 0.4, 0.2, 0.9], vec![1.0, 0.7, 0.3, 0.0]];
        let spacing = 0.01;

        let net: f64 = series.iter().map(|s| s[s.len() - 1] - s[0]).sum();
        for (scheme, sign) in [(DifferenceScheme::Backward, -1.0), (DifferenceScheme::Forward, 1.0)] {
            let integral: f64 = current(&series, spacing, scheme).iter().sum::<f64>() * spacing;
            assert_relative_eq!(integral, sign * ELECTRONS_PER_SPECIES * net, epsilon = 1e-12);
        }
    }

    #[test]
    #[should_panic(expected = "equal lengths")]
    fn mismatched_series_panic() {
        let _ = current(&[vec![1.0, 2.0], vec![1.0]], 0.1, DifferenceScheme::Backward);
    }
}
