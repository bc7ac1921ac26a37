//! Parse options for LinkForge.
//!
//! Load preparation options from TOML or YAML so the cost cutoff, duplicate
//! policy, arena sizing and resource budget can change without code changes.
//! Options are passed by reference into every preparation call; there is no
//! global verbosity or resource state.
//!
//! # Examples
//!
//! Load options from a TOML string:
//!
//! ```
//! use linkforge_config::{DuplicateCostPolicy, ParseOptions};
//! use std::time::Duration;
//!
//! let opts = ParseOptions::from_toml_str(r#"
//!     disjunct_cost = 2.0
//!     verbosity = 5
//!     duplicate_cost_policy = "distinct"
//!
//!     [arena]
//!     disjunct_capacity = 4096
//!
//!     [resources]
//!     time_limit_millis = 1500
//! "#).unwrap();
//!
//! assert_eq!(opts.disjunct_cost, 2.0);
//! assert_eq!(opts.duplicate_cost_policy, DuplicateCostPolicy::Distinct);
//! assert_eq!(opts.time_limit(), Some(Duration::from_millis(1500)));
//! ```
//!
//! Use defaults when the file is missing:
//!
//! ```
//! use linkforge_config::ParseOptions;
//!
//! let opts = ParseOptions::load("parse.toml").unwrap_or_default();
//! assert_eq!(opts.disjunct_cost, 2.7);
//! ```

use std::path::Path;
use std::time::Duration;

use linkforge_core::ArenaLimits;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default disjunct cost cutoff.
pub const DEFAULT_DISJUNCT_COST: f64 = 2.7;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Options consumed by sentence preparation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ParseOptions {
    /// Disjuncts costing more than this are never built.
    pub disjunct_cost: f64,

    /// Diagnostic verbosity. Count summaries start at 5, full dumps at 102.
    pub verbosity: u8,

    /// How duplicates with equal shape but different cost are resolved.
    pub duplicate_cost_policy: DuplicateCostPolicy,

    /// Threads used to expand words in parallel.
    pub expansion_threads: ExpansionThreadCount,

    /// Arena sizing.
    pub arena: ArenaConfig,

    /// Resource budget checked between words.
    pub resources: Option<ResourceConfig>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            disjunct_cost: DEFAULT_DISJUNCT_COST,
            verbosity: 1,
            duplicate_cost_policy: DuplicateCostPolicy::default(),
            expansion_threads: ExpansionThreadCount::default(),
            arena: ArenaConfig::default(),
            resources: None,
        }
    }
}

impl ParseOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads options from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads options from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses options from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let opts: Self = toml::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Loads options from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses options from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let opts: Self = serde_yaml::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Sets the cost cutoff.
    pub fn with_disjunct_cost(mut self, cost: f64) -> Self {
        self.disjunct_cost = cost;
        self
    }

    /// Sets the verbosity level.
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Sets the duplicate cost policy.
    pub fn with_duplicate_cost_policy(mut self, policy: DuplicateCostPolicy) -> Self {
        self.duplicate_cost_policy = policy;
        self
    }

    /// Sets the expansion thread count.
    pub fn with_expansion_threads(mut self, threads: ExpansionThreadCount) -> Self {
        self.expansion_threads = threads;
        self
    }

    /// Sets the preparation time limit.
    pub fn with_time_limit_millis(mut self, millis: u64) -> Self {
        self.resources = Some(ResourceConfig {
            time_limit_millis: Some(millis),
            ..self.resources.unwrap_or_default()
        });
        self
    }

    /// Sets the maximum number of disjuncts built per sentence.
    pub fn with_max_disjuncts(mut self, max: usize) -> Self {
        self.resources = Some(ResourceConfig {
            max_disjuncts: Some(max),
            ..self.resources.unwrap_or_default()
        });
        self
    }

    /// Sets the arena configuration.
    pub fn with_arena(mut self, arena: ArenaConfig) -> Self {
        self.arena = arena;
        self
    }

    /// Returns the preparation time limit, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.resources.as_ref().and_then(|r| r.time_limit())
    }

    /// Checks value ranges serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.disjunct_cost.is_finite() || self.disjunct_cost < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "disjunct_cost must be finite and non-negative, got {}",
                self.disjunct_cost
            )));
        }
        if let ExpansionThreadCount::Count(0) = self.expansion_threads {
            return Err(ConfigError::Invalid(
                "expansion_threads count must be positive".to_string(),
            ));
        }
        self.arena.validate()
    }
}

/// Resolution of duplicates whose connector chains match but disjunct costs
/// differ.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateCostPolicy {
    /// The disjunct cost is not part of the equality key; the cheapest record
    /// survives.
    #[default]
    KeepLowest,

    /// The disjunct cost is part of the equality key; differently priced
    /// copies remain.
    Distinct,
}

/// Expansion thread count configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionThreadCount {
    /// Use the global rayon pool.
    Auto,

    /// Expand words sequentially.
    #[default]
    None,

    /// Specific number of threads.
    Count(usize),
}

/// Arena sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ArenaConfig {
    /// Initial disjunct pool capacity.
    pub disjunct_capacity: usize,

    /// Initial connector pool capacity.
    pub connector_capacity: usize,

    /// Hard limit on disjunct records per sentence.
    pub max_disjuncts: Option<usize>,

    /// Hard limit on connector records per sentence.
    pub max_connectors: Option<usize>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        let limits = ArenaLimits::default();
        Self {
            disjunct_capacity: limits.disjunct_capacity,
            connector_capacity: limits.connector_capacity,
            max_disjuncts: limits.max_disjuncts,
            max_connectors: limits.max_connectors,
        }
    }
}

impl ArenaConfig {
    /// Converts to the limits understood by the sentence arena.
    pub fn limits(&self) -> ArenaLimits {
        ArenaLimits {
            disjunct_capacity: self.disjunct_capacity,
            connector_capacity: self.connector_capacity,
            max_disjuncts: self.max_disjuncts,
            max_connectors: self.max_connectors,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_disjuncts == Some(0) || self.max_connectors == Some(0) {
            return Err(ConfigError::Invalid(
                "arena limits must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resource budget for one sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ResourceConfig {
    /// Maximum milliseconds spent preparing.
    pub time_limit_millis: Option<u64>,

    /// Maximum disjuncts built before preparation is abandoned.
    pub max_disjuncts: Option<usize>,
}

impl ResourceConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_millis.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests;
