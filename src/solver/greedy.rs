//! Single-construction solvers.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::SolverConfig;
use crate::constructive::{greedy_construction, random_construction};
use crate::deadline::Deadline;
use crate::local_search::improve;
use crate::models::Instance;

use super::{Solver, SolverResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Greedy,
    Random,
}

/// Builds one solution and optionally refines it with local search.
///
/// # Examples
///
/// ```
/// use u_facility::config::{Policy, SolverConfig};
/// use u_facility::models::{City, FacilityType, Instance, Location};
/// use u_facility::solver::{GreedySolver, Solver};
///
/// let instance = Instance::from_parts(
///     vec![City::new(0, 0.0, 0.0, 100.0)],
///     vec![Location::new(0, 1.0, 0.0), Location::new(1, 0.0, 1.0)],
///     vec![FacilityType::new(0, 2.0, 200.0, 10.0)],
///     1.0,
/// );
/// let config = SolverConfig::greedy().with_local_search(Policy::FirstImprovement);
/// let result = GreedySolver::new().solve(&instance, &config);
/// assert!(result.is_feasible());
/// assert_eq!(result.cost(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GreedySolver {
    selection: Selection,
}

impl GreedySolver {
    /// Minimum-cost construction.
    pub fn new() -> Self {
        Self {
            selection: Selection::Greedy,
        }
    }

    /// Uniformly random construction.
    pub fn random() -> Self {
        Self {
            selection: Selection::Random,
        }
    }
}

impl Default for GreedySolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for GreedySolver {
    fn name(&self) -> &'static str {
        match self.selection {
            Selection::Greedy => "Greedy",
            Selection::Random => "Random",
        }
    }

    fn solve<'a>(&self, instance: &'a Instance, config: &SolverConfig) -> SolverResult<'a> {
        let deadline = Deadline::from_secs(config.max_exec_time);
        let mut rng = StdRng::seed_from_u64(config.seed_or_default());

        let mut solution = match self.selection {
            Selection::Greedy => greedy_construction(instance, &mut rng),
            Selection::Random => random_construction(instance, &mut rng),
        };
        let constructed = solution.cost();

        if let (Some(policy), Some(strategy)) =
            (config.local_search_policy(), config.neighborhood_strategy)
        {
            let outcome = improve(solution, strategy, policy, &deadline);
            info!(
                solver = self.name(),
                moves = outcome.moves,
                scans = outcome.scans,
                "local search: {:.8} -> {:.8}",
                constructed,
                outcome.solution.cost()
            );
            solution = outcome.solution;
        }

        let elapsed = deadline.elapsed();
        if !solution.is_feasible() {
            return SolverResult::infeasible(solution, 1, elapsed);
        }
        info!(
            solver = self.name(),
            elapsed = elapsed.as_secs_f64(),
            cost = solution.cost(),
            "solution found"
        );
        SolverResult {
            solution,
            iterations: 1,
            elapsed,
            best_iteration: 1,
        }
    }
}
