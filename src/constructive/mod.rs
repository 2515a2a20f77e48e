//! Constructive heuristics for building complete facility location solutions.
//!
//! All heuristics share one loop: enumerate every feasible assignment of the
//! current partial solution, let a selector pick one, apply it, and repeat
//! until every city has both centers. An empty candidate list makes the
//! solution infeasible.
//!
//! - [`greedy_construction`]: uniform pick among minimum-cost candidates
//! - [`random_construction`]: uniform pick among all candidates
//! - [`grasp_construction`]: uniform pick from the restricted candidate list
//!   (Feo & Resende, 1995)
//!
//! # Complexity
//!
//! Each step enumerates O(n·m·k) candidates (cities × locations × types),
//! and a complete solution takes 2n steps.

mod grasp;
mod greedy;
mod random;

pub use grasp::{grasp_construction, restricted_candidate_list};
pub use greedy::{greedy_construction, min_cost_candidates};
pub use random::random_construction;

use rand::Rng;
use tracing::{debug, warn};

use crate::models::{Assignment, Instance, Solution};

/// Absolute tolerance for treating two candidate costs as tied.
pub(crate) const TIE_EPSILON: f64 = 1e-9;

/// Runs the shared construction loop with the given candidate selector.
///
/// `select` receives the non-empty candidate list and returns the index of
/// the candidate to apply, or `None` to give up.
pub(crate) fn construct<'a, R, F>(
    instance: &'a Instance,
    rng: &mut R,
    mut select: F,
) -> Solution<'a>
where
    R: Rng,
    F: FnMut(&[Assignment], &mut R) -> Option<usize>,
{
    let mut solution = Solution::new(instance);

    while !solution.is_complete() {
        let candidates = solution.find_feasible_assignments();
        if candidates.is_empty() {
            warn!(
                used = solution.num_used_locations(),
                "no feasible assignment left, construction is infeasible"
            );
            solution.make_infeasible();
            break;
        }

        let Some(chosen) = select(&candidates, rng).and_then(|i| candidates.get(i)) else {
            warn!(
                candidates = candidates.len(),
                "selector rejected every candidate"
            );
            solution.make_infeasible();
            break;
        };

        debug!(
            candidates = candidates.len(),
            "construct: {}",
            chosen
        );
        if !solution.assign_candidate(chosen, true) {
            solution.make_infeasible();
            break;
        }
    }

    solution
}

#[cfg(test)]
pub(crate) mod test_instances {
    use crate::models::{City, FacilityType, Instance, Location};

    /// Four cities in two clusters, four sites, two types.
    pub(crate) fn clustered() -> Instance {
        Instance::from_parts(
            vec![
                City::new(0, 0.0, 0.0, 100.0),
                City::new(1, 1.0, 1.0, 60.0),
                City::new(2, 10.0, 0.0, 80.0),
                City::new(3, 11.0, 1.0, 40.0),
            ],
            vec![
                Location::new(0, 0.5, 0.5),
                Location::new(1, 10.5, 0.5),
                Location::new(2, 5.0, 0.0),
                Location::new(3, 5.0, 4.0),
            ],
            vec![
                FacilityType::new(0, 2.0, 200.0, 10.0),
                FacilityType::new(1, 6.0, 500.0, 30.0),
            ],
            3.0,
        )
    }

    /// Two cities, two mutually compatible sites, one roomy type.
    pub(crate) fn two_by_two() -> Instance {
        Instance::from_parts(
            vec![City::new(0, 0.0, 0.0, 50.0), City::new(1, 2.0, 0.0, 50.0)],
            vec![Location::new(0, 1.0, 0.0), Location::new(1, 1.0, 1.0)],
            vec![FacilityType::new(0, 3.0, 500.0, 7.0)],
            0.5,
        )
    }

    /// Every pair of sites closer than the minimum separation.
    pub(crate) fn all_incompatible() -> Instance {
        Instance::from_parts(
            vec![City::new(0, 0.0, 0.0, 10.0)],
            vec![
                Location::new(0, 1.0, 0.0),
                Location::new(1, 0.0, 1.0),
                Location::new(2, -1.0, 0.0),
            ],
            vec![FacilityType::new(0, 2.0, 100.0, 5.0)],
            10.0,
        )
    }

    /// One cheap site in range of every city, plus pricier alternatives.
    pub(crate) fn one_hub() -> Instance {
        Instance::from_parts(
            vec![
                City::new(0, 0.0, 0.0, 30.0),
                City::new(1, 2.0, 0.0, 30.0),
                City::new(2, 1.0, 2.0, 30.0),
            ],
            vec![
                Location::new(0, 1.0, 0.5),
                Location::new(1, 1.0, -5.0),
                Location::new(2, 1.0, 7.0),
            ],
            vec![
                FacilityType::new(0, 3.0, 1000.0, 1.0),
                FacilityType::new(1, 3.0, 1000.0, 50.0),
            ],
            2.0,
        )
    }
}
