//! Tests for parse options.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        disjunct_cost = 1.5
        verbosity = 5
        duplicate_cost_policy = "keep_lowest"
        expansion_threads = { count = 4 }

        [arena]
        disjunct_capacity = 512
        max_connectors = 100000

        [resources]
        time_limit_millis = 250
        max_disjuncts = 50000
    "#;

    let opts = ParseOptions::from_toml_str(toml).unwrap();
    assert_eq!(opts.disjunct_cost, 1.5);
    assert_eq!(opts.verbosity, 5);
    assert_eq!(opts.expansion_threads, ExpansionThreadCount::Count(4));
    assert_eq!(opts.arena.disjunct_capacity, 512);
    assert_eq!(opts.arena.connector_capacity, 8192);
    assert_eq!(opts.arena.max_connectors, Some(100000));
    let resources = opts.resources.unwrap();
    assert_eq!(resources.time_limit_millis, Some(250));
    assert_eq!(resources.max_disjuncts, Some(50000));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        disjunct_cost: 3.0
        duplicate_cost_policy: distinct
        expansion_threads: auto
        resources:
          time_limit_millis: 30
    "#;

    let opts = ParseOptions::from_yaml_str(yaml).unwrap();
    assert_eq!(opts.disjunct_cost, 3.0);
    assert_eq!(opts.duplicate_cost_policy, DuplicateCostPolicy::Distinct);
    assert_eq!(opts.expansion_threads, ExpansionThreadCount::Auto);
    assert_eq!(opts.time_limit(), Some(Duration::from_millis(30)));
}

#[test]
fn test_empty_toml_gives_defaults() {
    let opts = ParseOptions::from_toml_str("").unwrap();
    assert_eq!(opts, ParseOptions::default());
    assert_eq!(opts.disjunct_cost, DEFAULT_DISJUNCT_COST);
    assert_eq!(opts.expansion_threads, ExpansionThreadCount::None);
    assert!(opts.time_limit().is_none());
}

#[test]
fn test_builder() {
    let opts = ParseOptions::new()
        .with_disjunct_cost(0.5)
        .with_verbosity(102)
        .with_time_limit_millis(10)
        .with_max_disjuncts(99);

    assert_eq!(opts.disjunct_cost, 0.5);
    assert_eq!(opts.verbosity, 102);
    let resources = opts.resources.unwrap();
    assert_eq!(resources.time_limit_millis, Some(10));
    assert_eq!(resources.max_disjuncts, Some(99));
}

#[test]
fn test_negative_cutoff_rejected() {
    let err = ParseOptions::from_toml_str("disjunct_cost = -1.0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_zero_threads_rejected() {
    let opts = ParseOptions::new().with_expansion_threads(ExpansionThreadCount::Count(0));
    assert!(opts.validate().is_err());
}

#[test]
fn test_zero_arena_limit_rejected() {
    let err = ParseOptions::from_toml_str("[arena]\nmax_disjuncts = 0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_arena_limits_conversion() {
    let arena = ArenaConfig {
        disjunct_capacity: 16,
        connector_capacity: 64,
        max_disjuncts: Some(1000),
        max_connectors: None,
    };
    let limits = arena.limits();
    assert_eq!(limits.disjunct_capacity, 16);
    assert_eq!(limits.max_disjuncts, Some(1000));
}

#[test]
fn test_malformed_toml() {
    let err = ParseOptions::from_toml_str("disjunct_cost = \"high\"").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}
