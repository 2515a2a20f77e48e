//! Solver drivers.
//!
//! - [`GreedySolver`]: one greedy (or random) construction, optional local search
//! - [`GraspSolver`]: GRASP restarts until the deadline, keeping the incumbent
//! - [`solve`]: validates the configuration, pre-checks the instance and
//!   dispatches on [`SolverKind`]

mod grasp;
mod greedy;
mod result;

pub use grasp::GraspSolver;
pub use greedy::GreedySolver;
pub use result::SolverResult;

use std::time::Duration;

use tracing::{info, warn};

use crate::config::{SolverConfig, SolverKind};
use crate::error::ConfigError;
use crate::models::{Instance, Solution};

/// A strategy producing a solution for an instance.
pub trait Solver {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Runs the solver. Infeasibility is reported through the result, not
    /// as an error.
    fn solve<'a>(&self, instance: &'a Instance, config: &SolverConfig) -> SolverResult<'a>;
}

/// Validates `config`, pre-checks `instance`, and runs the configured solver.
///
/// An instance failing [`Instance::check`] yields an infeasible result
/// without any construction.
///
/// # Examples
///
/// ```
/// use u_facility::config::SolverConfig;
/// use u_facility::models::{City, FacilityType, Instance, Location};
/// use u_facility::solver::solve;
///
/// let instance = Instance::from_parts(
///     vec![City::new(0, 0.0, 0.0, 100.0)],
///     vec![Location::new(0, 1.0, 0.0), Location::new(1, 0.0, 1.0)],
///     vec![FacilityType::new(0, 2.0, 200.0, 10.0)],
///     1.0,
/// );
/// let result = solve(&instance, &SolverConfig::greedy()).unwrap();
/// assert_eq!(result.cost(), 20.0);
///
/// assert!(solve(&instance, &SolverConfig::grasp(2.0, 1.0)).is_err());
/// ```
pub fn solve<'a>(
    instance: &'a Instance,
    config: &SolverConfig,
) -> Result<SolverResult<'a>, ConfigError> {
    config.validate()?;

    if !instance.check() {
        warn!("instance pre-check failed: some city cannot be covered");
        return Ok(SolverResult::infeasible(
            Solution::infeasible(instance),
            0,
            Duration::ZERO,
        ));
    }

    let solver: Box<dyn Solver> = match config.solver {
        SolverKind::Greedy => Box::new(GreedySolver::new()),
        SolverKind::Random => Box::new(GreedySolver::random()),
        SolverKind::Grasp => Box::new(GraspSolver),
        SolverKind::Brkga => {
            return Err(ConfigError::Unsupported {
                field: "solver",
                value: config.solver.as_str(),
            })
        }
    };
    info!(
        solver = solver.name(),
        cities = instance.num_cities(),
        locations = instance.num_locations(),
        types = instance.num_types(),
        compatible_pairs = instance.compatibility().num_compatible_pairs(),
        "solving"
    );
    Ok(solver.solve(instance, config))
}
