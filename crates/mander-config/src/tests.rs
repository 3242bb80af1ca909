use super::*;

#[test]
fn test_default_config() {
    let config = EngineConfig::default();
    assert_eq!(config.random_seed, None);
    assert_eq!(config.partition.communities, 10);
    assert_eq!(config.partition.sample_cap, 100);
    assert_eq!(config.phases, vec![PhaseConfig::simulated_annealing()]);
    assert_eq!(config.balance_tolerance, 0.05);
}

#[test]
fn test_annealing_defaults_match_observed_constants() {
    let PhaseConfig::SimulatedAnnealing {
        starting_temperature,
        ending_temperature,
        cooling_factor,
        epochs,
    } = PhaseConfig::simulated_annealing()
    else {
        panic!("wrong phase kind");
    };
    assert_eq!(starting_temperature, 30.0);
    assert_eq!(ending_temperature, 1.0);
    assert_eq!(cooling_factor, 0.99976);
    assert_eq!(epochs, 40_000);
}

#[test]
fn test_parse_full_config() {
    let config = EngineConfig::from_toml_str(
        r#"
        random_seed = 42
        balance_tolerance = 0.02

        [partition]
        communities = 8
        sample_cap = 50

        [[phases]]
        type = "gradient_descent"
        step_limit = 250

        [[phases]]
        type = "simulated_annealing"
        starting_temperature = 10.0
        ending_temperature = 0.5
        cooling_factor = 0.999
        epochs = 1000
    "#,
    )
    .unwrap();

    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.partition.communities, 8);
    assert_eq!(config.partition.sample_cap, 50);
    assert_eq!(
        config.phases[0],
        PhaseConfig::GradientDescent { step_limit: 250 }
    );
    assert_eq!(
        config.phases[1],
        PhaseConfig::SimulatedAnnealing {
            starting_temperature: 10.0,
            ending_temperature: 0.5,
            cooling_factor: 0.999,
            epochs: 1000,
        }
    );
}

#[test]
fn test_phase_defaults_fill_in() {
    let config = EngineConfig::from_toml_str(
        r#"
        [[phases]]
        type = "simulated_annealing"
        epochs = 5
    "#,
    )
    .unwrap();

    let PhaseConfig::SimulatedAnnealing {
        starting_temperature,
        epochs,
        ..
    } = config.phases[0]
    else {
        panic!("wrong phase kind");
    };
    assert_eq!(starting_temperature, 30.0);
    assert_eq!(epochs, 5);
}

#[test]
fn test_unknown_phase_type_fails() {
    let result = EngineConfig::from_toml_str(
        r#"
        [[phases]]
        type = "tabu_search"
    "#,
    );
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}

#[test]
fn test_invalid_values_rejected() {
    assert!(EngineConfig::from_toml_str("[partition]\ncommunities = 0").is_err());
    assert!(EngineConfig::from_toml_str("balance_tolerance = 1.5").is_err());

    let result = EngineConfig::from_toml_str(
        r#"
        [[phases]]
        type = "simulated_annealing"
        cooling_factor = 1.0
    "#,
    );
    assert!(matches!(result, Err(ConfigError::Invalid(_))));

    let result = EngineConfig::from_toml_str(
        r#"
        [[phases]]
        type = "simulated_annealing"
        ending_temperature = 100.0
    "#,
    );
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let result = EngineConfig::load("/nonexistent/engine.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}
