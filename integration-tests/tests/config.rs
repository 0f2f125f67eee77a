use integration_tests::{Format, parse_config, write_config};
use polysulfide_speciation::{ConvergencePolicy, SweepConfig, sweep};
use uom::si::electric_potential::volt;

#[test]
fn toml_file_matches_default_sweep() {
    let config = parse_config(Format::Toml, include_str!("../configs/default.toml")).unwrap();
    assert_eq!(config, SweepConfig::default());
}

#[test]
fn yaml_file_matches_default_sweep() {
    let config = parse_config(Format::Yaml, include_str!("../configs/default.yaml")).unwrap();
    assert_eq!(config, SweepConfig::default());
}

#[test]
fn partial_json_keeps_defaults() {
    let config = parse_config(Format::Json, include_str!("../configs/coarse.json")).unwrap();

    assert_eq!(config.on_nonconvergence, ConvergencePolicy::Fail);
    assert!((config.step.get::<volt>() - 0.01).abs() < 1e-15);
    assert_eq!(config.start, SweepConfig::default().start);
    assert_eq!(config.initial_guess, SweepConfig::default().initial_guess);
    assert_eq!(config.num_points().unwrap(), 71);
}

#[test]
fn coarse_config_sweeps_without_failures() {
    let config = parse_config(Format::Json, include_str!("../configs/coarse.json")).unwrap();
    let trajectory = sweep::run(&config).unwrap();

    assert_eq!(trajectory.len(), 71);
    assert_eq!(trajectory.non_converged().count(), 0);
}

#[test]
fn configs_round_trip_through_every_format() {
    let config = SweepConfig {
        on_nonconvergence: ConvergencePolicy::Fail,
        total_sulfur: 0.1,
        ..SweepConfig::default()
    };

    for format in [Format::Json, Format::Toml, Format::Yaml] {
        let text = write_config(format, &config).unwrap();
        let parsed = parse_config(format, &text).unwrap();
        assert_eq!(parsed, config, "{format:?} round trip");
    }
}

#[test]
fn rejects_unknown_policy() {
    let result = parse_config(Format::Json, r#"{ "on_nonconvergence": "ignore" }"#);
    assert!(result.is_err());
}
