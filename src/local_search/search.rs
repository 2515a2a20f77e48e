//! Local search driver.
//!
//! Repeats neighborhood scans on the incumbent until a scan finds no
//! improving neighbor or the deadline expires. Each accepted move replaces
//! the incumbent and restarts the scan.

use tracing::debug;

use crate::config::{NeighborhoodStrategy, Policy};
use crate::deadline::Deadline;
use crate::models::Solution;

use super::explore_reassignment;

/// Result of a local search run.
#[derive(Debug, Clone)]
pub struct LocalSearchOutcome<'a> {
    /// Local optimum (or the incumbent at the deadline).
    pub solution: Solution<'a>,
    /// Number of accepted improving moves.
    pub moves: usize,
    /// Number of neighborhood scans started.
    pub scans: usize,
}

/// Improves a complete solution with the reassignment neighborhood.
///
/// Infeasible or incomplete input is returned unchanged. The result never
/// costs more than the input.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_facility::config::Policy;
/// use u_facility::constructive::greedy_construction;
/// use u_facility::deadline::Deadline;
/// use u_facility::local_search::local_search;
/// use u_facility::models::{City, FacilityType, Instance, Location};
///
/// let instance = Instance::from_parts(
///     vec![City::new(0, 0.0, 0.0, 100.0), City::new(1, 2.0, 0.0, 100.0)],
///     vec![Location::new(0, 1.0, 0.0), Location::new(1, 1.0, 2.0)],
///     vec![FacilityType::new(0, 3.0, 500.0, 10.0)],
///     1.0,
/// );
/// let initial = greedy_construction(&instance, &mut StdRng::seed_from_u64(42));
/// let before = initial.cost();
/// let outcome = local_search(initial, Policy::FirstImprovement, &Deadline::unbounded());
/// assert!(outcome.solution.cost() <= before);
/// ```
pub fn local_search<'a>(
    solution: Solution<'a>,
    policy: Policy,
    deadline: &Deadline,
) -> LocalSearchOutcome<'a> {
    improve(solution, NeighborhoodStrategy::Reassignment, policy, deadline)
}

/// Improves a complete solution with the given neighborhood.
pub fn improve<'a>(
    mut solution: Solution<'a>,
    strategy: NeighborhoodStrategy,
    policy: Policy,
    deadline: &Deadline,
) -> LocalSearchOutcome<'a> {
    let mut moves = 0;
    let mut scans = 0;

    if solution.is_feasible() && solution.is_complete() {
        while !deadline.expired() {
            scans += 1;
            let accepted = match strategy {
                NeighborhoodStrategy::Reassignment => explore_reassignment(&mut solution, policy),
            };
            let Some(mv) = accepted else {
                break;
            };
            moves += 1;
            debug!(scan = scans, "local search move: {}", mv);
        }
    }

    LocalSearchOutcome {
        solution,
        moves,
        scans,
    }
}
