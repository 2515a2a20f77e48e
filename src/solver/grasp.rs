//! GRASP solver.
//!
//! # Algorithm
//!
//! 1. While the deadline has not expired (and the optional iteration cap
//!    is not reached):
//!    a. Build a solution with the randomized greedy rule
//!    b. Refine it with local search if enabled
//!    c. Keep it if it is feasible and cheaper than the incumbent
//! 2. Return the incumbent, or an infeasible solution if none was found
//!
//! # Reference
//!
//! Feo, T.A. & Resende, M.G.C. (1995). "Greedy randomized adaptive search
//! procedures", *Journal of Global Optimization* 6, 109-133.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::config::SolverConfig;
use crate::constructive::grasp_construction;
use crate::deadline::Deadline;
use crate::local_search::improve;
use crate::models::{Instance, Solution};

use super::{Solver, SolverResult};

/// Repeated randomized greedy construction with an incumbent.
///
/// Reads `alpha`, `maxExecTime`, `maxIterations` and the local search
/// settings from the configuration. Without both a time budget and an
/// iteration cap, a single construction is performed.
///
/// # Examples
///
/// ```
/// use u_facility::config::SolverConfig;
/// use u_facility::models::{City, FacilityType, Instance, Location};
/// use u_facility::solver::{GraspSolver, Solver};
///
/// let instance = Instance::from_parts(
///     vec![City::new(0, 0.0, 0.0, 100.0)],
///     vec![Location::new(0, 1.0, 0.0), Location::new(1, 0.0, 1.0)],
///     vec![FacilityType::new(0, 2.0, 200.0, 10.0)],
///     1.0,
/// );
/// let config = SolverConfig::grasp(0.3, 10.0).with_max_iterations(5);
/// let result = GraspSolver.solve(&instance, &config);
/// assert!(result.is_feasible());
/// assert_eq!(result.iterations, 5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraspSolver;

impl Solver for GraspSolver {
    fn name(&self) -> &'static str {
        "GRASP"
    }

    fn solve<'a>(&self, instance: &'a Instance, config: &SolverConfig) -> SolverResult<'a> {
        let deadline = Deadline::from_secs(config.max_exec_time);
        let mut rng = StdRng::seed_from_u64(config.seed_or_default());
        let alpha = config.alpha.unwrap_or(0.0).clamp(0.0, 1.0);
        let max_iterations = match (config.max_iterations, config.max_exec_time) {
            (Some(n), _) => n,
            (None, Some(_)) => usize::MAX,
            (None, None) => 1,
        };
        let local_search = config
            .local_search_policy()
            .zip(config.neighborhood_strategy);

        let mut incumbent = Solution::infeasible(instance);
        let mut best_iteration = 0;
        let mut iteration = 0;

        while iteration < max_iterations && !deadline.expired() {
            iteration += 1;
            let mut solution = grasp_construction(instance, alpha, &mut rng);
            if let Some((policy, strategy)) = local_search {
                solution = improve(solution, strategy, policy, &deadline).solution;
            }

            if !solution.is_feasible() {
                debug!(iteration, "construction infeasible");
                continue;
            }
            if solution.cost() < incumbent.cost() {
                info!(
                    elapsed = deadline.elapsed().as_secs_f64(),
                    cost = solution.cost(),
                    iteration,
                    "new incumbent"
                );
                incumbent = solution;
                best_iteration = iteration;
            }
        }

        let elapsed = deadline.elapsed();
        if !incumbent.is_feasible() {
            warn!(iterations = iteration, "no feasible solution found");
            return SolverResult::infeasible(incumbent, iteration, elapsed);
        }
        info!(
            iterations = iteration,
            elapsed = elapsed.as_secs_f64(),
            cost = incumbent.cost(),
            "GRASP finished"
        );
        SolverResult {
            solution: incumbent,
            iterations: iteration,
            elapsed,
            best_iteration,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::Policy;
    use crate::constructive::test_instances::*;
    use crate::evaluation::SolutionChecker;
    use crate::solver::GreedySolver;

    #[test]
    fn test_grasp_respects_iteration_cap() {
        let instance = clustered();
        let config = SolverConfig::grasp(0.5, 60.0).with_max_iterations(8);
        let result = GraspSolver.solve(&instance, &config);
        assert_eq!(result.iterations, 8);
        assert!(result.best_iteration >= 1 && result.best_iteration <= 8);
        assert!(SolutionChecker::new(&instance)
            .check_complete(&result.solution)
            .is_empty());
    }

    #[test]
    fn test_grasp_alpha_zero_matches_greedy() {
        let instance = clustered();
        let greedy = GreedySolver::new().solve(&instance, &SolverConfig::greedy().with_seed(5));
        let grasp = GraspSolver.solve(
            &instance,
            &SolverConfig::grasp(0.0, 60.0)
                .with_seed(5)
                .with_max_iterations(1),
        );
        assert_eq!(greedy.cost(), grasp.cost());
    }

    #[test]
    fn test_more_iterations_never_worse() {
        let instance = clustered();
        let base = SolverConfig::grasp(0.4, 60.0)
            .with_seed(3)
            .with_local_search(Policy::FirstImprovement);
        let short = GraspSolver.solve(&instance, &base.clone().with_max_iterations(2));
        let long = GraspSolver.solve(&instance, &base.with_max_iterations(10));
        assert!(long.cost() <= short.cost());
    }

    #[test]
    fn test_grasp_infeasible_instance() {
        let instance = all_incompatible();
        let config = SolverConfig::grasp(0.5, 60.0).with_max_iterations(3);
        let result = GraspSolver.solve(&instance, &config);
        assert!(!result.is_feasible());
        assert_eq!(result.iterations, 3);
        assert_eq!(result.best_iteration, 0);
    }

    #[test]
    fn test_grasp_runs_until_deadline() {
        let instance = clustered();
        let config = SolverConfig::grasp(0.3, 0.05).with_local_search(Policy::FirstImprovement);
        assert_eq!(config.max_iterations, None);
        let result = GraspSolver.solve(&instance, &config);
        assert!(result.iterations >= 1);
        assert!(result.elapsed >= Duration::from_millis(50));
        assert!(result.elapsed < Duration::from_secs(5));
        assert!(result.is_feasible());
        assert!(SolutionChecker::new(&instance)
            .check_complete(&result.solution)
            .is_empty());
    }

    #[test]
    fn test_grasp_without_bounds_runs_once() {
        let instance = clustered();
        let config = SolverConfig {
            max_exec_time: None,
            ..SolverConfig::grasp(0.2, 1.0)
        };
        let result = GraspSolver.solve(&instance, &config);
        assert_eq!(result.iterations, 1);
    }
}
