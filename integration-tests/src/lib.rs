//! Shared fixtures for the integration tests.

use std::error::Error;

use polysulfide_speciation::{SweepConfig, Trajectory};

/// Formats a sweep config can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
    Yaml,
}

/// Parses a sweep config. Fields missing from `text` keep their defaults.
///
/// # Errors
///
/// Returns an error if `text` is not a valid config in `format`.
pub fn parse_config(format: Format, text: &str) -> Result<SweepConfig, Box<dyn Error>> {
    let config = match format {
        Format::Json => serde_json::from_str(text)?,
        Format::Toml => toml::from_str(text)?,
        Format::Yaml => serde_yaml::from_str(text)?,
    };
    Ok(config)
}

/// Serializes a sweep config.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn write_config(format: Format, config: &SweepConfig) -> Result<String, Box<dyn Error>> {
    let text = match format {
        Format::Json => serde_json::to_string_pretty(config)?,
        Format::Toml => toml::to_string(config)?,
        Format::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(text)
}

/// Index of the grid point closest to `volts`.
///
/// # Panics
///
/// Panics if the trajectory is empty.
#[must_use]
pub fn nearest(trajectory: &Trajectory, volts: f64) -> usize {
    trajectory
        .potentials()
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (*a - volts).abs().total_cmp(&(*b - volts).abs()))
        .map(|(index, _)| index)
        .expect("trajectory is not empty")
}
