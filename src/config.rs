//! Solver configuration.
//!
//! Deserialized from JSON with the camelCase keys of the configuration
//! files (`solver`, `alpha`, `maxExecTime`, `localSearch`,
//! `neighborhoodStrategy`, `policy`, `seed`, `maxIterations`) and checked
//! with [`SolverConfig::validate`] before any solving begins.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Construction heuristic driving a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverKind {
    /// One greedy construction.
    #[default]
    Greedy,
    /// One construction with uniformly random picks.
    Random,
    /// Repeated randomized greedy constructions until the deadline.
    #[serde(rename = "GRASP")]
    Grasp,
    /// Population-based solver of older configuration files. Accepted when
    /// reading, rejected by [`SolverConfig::validate`].
    #[serde(rename = "BRKGA")]
    Brkga,
}

impl SolverKind {
    /// Name as written in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greedy => "Greedy",
            Self::Random => "Random",
            Self::Grasp => "GRASP",
            Self::Brkga => "BRKGA",
        }
    }
}

/// Move acceptance rule of the local search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Policy {
    /// Accept the first improving neighbor, scanning heavily loaded
    /// locations first.
    #[default]
    FirstImprovement,
    /// Scan the whole neighborhood and accept the best neighbor.
    BestImprovement,
}

/// Neighborhood explored by the local search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NeighborhoodStrategy {
    /// Move one `(city, role)` relation to another used location.
    #[default]
    Reassignment,
}

/// Configuration of a solver run.
///
/// # Examples
///
/// ```
/// use u_facility::config::{Policy, SolverConfig, SolverKind};
///
/// let config = SolverConfig::grasp(0.2, 5.0)
///     .with_local_search(Policy::BestImprovement)
///     .with_seed(7);
/// assert_eq!(config.solver, SolverKind::Grasp);
/// assert!(config.validate().is_ok());
///
/// let json = r#"{"solver": "Greedy", "localSearch": true,
///                "neighborhoodStrategy": "Reassignment", "policy": "FirstImprovement"}"#;
/// let config: SolverConfig = serde_json::from_str(json).unwrap();
/// assert!(config.local_search);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverConfig {
    /// Construction heuristic.
    pub solver: SolverKind,
    /// GRASP greediness in `[0, 1]` (0 = greedy, 1 = random).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    /// Wall-clock budget in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_exec_time: Option<f64>,
    /// Whether constructed solutions are refined by local search.
    #[serde(default)]
    pub local_search: bool,
    /// Neighborhood for local search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood_strategy: Option<NeighborhoodStrategy>,
    /// Acceptance rule for local search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<Policy>,
    /// Random seed (None for default seed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Cap on GRASP restarts, in addition to the deadline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<usize>,
}

impl SolverConfig {
    /// Seed used when none is configured.
    pub const DEFAULT_SEED: u64 = 42;

    /// Single greedy construction.
    pub fn greedy() -> Self {
        Self::default()
    }

    /// Single random construction.
    pub fn random() -> Self {
        Self {
            solver: SolverKind::Random,
            ..Self::default()
        }
    }

    /// GRASP with the given greediness and time budget in seconds.
    pub fn grasp(alpha: f64, max_exec_time: f64) -> Self {
        Self {
            solver: SolverKind::Grasp,
            alpha: Some(alpha),
            max_exec_time: Some(max_exec_time),
            ..Self::default()
        }
    }

    /// Enables reassignment local search with the given policy.
    pub fn with_local_search(mut self, policy: Policy) -> Self {
        self.local_search = true;
        self.neighborhood_strategy = Some(NeighborhoodStrategy::Reassignment);
        self.policy = Some(policy);
        self
    }

    /// Sets the GRASP greediness.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Sets the wall-clock budget in seconds.
    pub fn with_max_exec_time(mut self, secs: f64) -> Self {
        self.max_exec_time = Some(secs);
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Caps the number of GRASP restarts.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = Some(n);
        self
    }

    /// Seed for the run's random number generator.
    pub fn seed_or_default(&self) -> u64 {
        self.seed.unwrap_or(Self::DEFAULT_SEED)
    }

    /// Local search policy, if local search is enabled.
    pub fn local_search_policy(&self) -> Option<Policy> {
        if self.local_search {
            self.policy
        } else {
            None
        }
    }

    /// Checks per-solver required fields and value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.solver == SolverKind::Brkga {
            return Err(ConfigError::Unsupported {
                field: "solver",
                value: self.solver.as_str(),
            });
        }

        if let Some(t) = self.max_exec_time {
            if !t.is_finite() || t <= 0.0 {
                return Err(ConfigError::OutOfRange {
                    field: "maxExecTime",
                    value: t,
                    expected: "a positive real value",
                });
            }
        }

        if self.solver == SolverKind::Grasp {
            for (field, present) in [
                ("maxExecTime", self.max_exec_time.is_some()),
                ("alpha", self.alpha.is_some()),
            ] {
                if !present {
                    return Err(ConfigError::MissingField {
                        field,
                        required_by: "GRASP solver",
                    });
                }
            }
        }

        if let Some(alpha) = self.alpha {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(ConfigError::OutOfRange {
                    field: "alpha",
                    value: alpha,
                    expected: "a real value in range [0, 1]",
                });
            }
        }

        if self.local_search {
            if self.neighborhood_strategy.is_none() {
                return Err(ConfigError::MissingField {
                    field: "neighborhoodStrategy",
                    required_by: "local search",
                });
            }
            if self.policy.is_none() {
                return Err(ConfigError::MissingField {
                    field: "policy",
                    required_by: "local search",
                });
            }
        }

        Ok(())
    }
}
