//! Greedy construction.
//!
//! At every step, applies a candidate with the lowest resulting total cost.
//! Several `(city, role)` pairs often reach the same minimum (reusing an
//! open location costs nothing), so the tie is broken uniformly at random.

use rand::Rng;

use crate::models::{Assignment, Instance, Solution};

use super::{construct, TIE_EPSILON};

/// Indices of all candidates sharing the minimum resulting cost.
///
/// Returns an empty list for an empty input.
///
/// # Examples
///
/// ```
/// use u_facility::models::{Assignment, Role};
/// use u_facility::constructive::min_cost_candidates;
///
/// let candidates = vec![
///     Assignment::new(0, 0, 0, Role::Primary, 10.0),
///     Assignment::new(0, 1, 0, Role::Primary, 5.0),
///     Assignment::new(1, 1, 0, Role::Primary, 5.0),
/// ];
/// assert_eq!(min_cost_candidates(&candidates), vec![1, 2]);
/// ```
pub fn min_cost_candidates(candidates: &[Assignment]) -> Vec<usize> {
    let min = candidates
        .iter()
        .map(|a| a.cost)
        .fold(f64::INFINITY, f64::min);
    candidates
        .iter()
        .enumerate()
        .filter(|(_, a)| a.cost <= min + TIE_EPSILON)
        .map(|(i, _)| i)
        .collect()
}

pub(crate) fn select_greedy<R: Rng>(candidates: &[Assignment], rng: &mut R) -> Option<usize> {
    let ties = min_cost_candidates(candidates);
    if ties.is_empty() {
        return None;
    }
    Some(ties[rng.random_range(0..ties.len())])
}

/// Builds a solution by repeatedly applying a minimum-cost assignment.
///
/// Returns an infeasible solution if some partial state has no feasible
/// assignment left.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_facility::models::{City, FacilityType, Instance, Location};
/// use u_facility::constructive::greedy_construction;
///
/// let instance = Instance::from_parts(
///     vec![City::new(0, 0.0, 0.0, 100.0)],
///     vec![Location::new(0, 1.0, 0.0), Location::new(1, 0.0, 1.0)],
///     vec![FacilityType::new(0, 2.0, 200.0, 10.0)],
///     1.0,
/// );
/// let mut rng = StdRng::seed_from_u64(42);
/// let solution = greedy_construction(&instance, &mut rng);
/// assert!(solution.is_complete());
/// assert_eq!(solution.cost(), 20.0);
/// ```
pub fn greedy_construction<'a, R: Rng>(instance: &'a Instance, rng: &mut R) -> Solution<'a> {
    construct(instance, rng, select_greedy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::test_instances::*;
    use crate::evaluation::SolutionChecker;
    use crate::models::Role;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_min_cost_candidates_empty() {
        assert!(min_cost_candidates(&[]).is_empty());
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(select_greedy(&[], &mut rng), None);
    }

    #[test]
    fn test_select_greedy_picks_a_tie() {
        let candidates = vec![
            Assignment::new(0, 0, 0, Role::Primary, 3.0),
            Assignment::new(0, 1, 0, Role::Primary, 1.0),
            Assignment::new(1, 0, 0, Role::Primary, 1.0),
            Assignment::new(1, 1, 0, Role::Primary, 2.0),
        ];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let i = select_greedy(&candidates, &mut rng).expect("non-empty");
            assert!(i == 1 || i == 2);
        }
    }

    #[test]
    fn test_greedy_clustered_is_feasible() {
        let instance = clustered();
        let checker = SolutionChecker::new(&instance);
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let sol = greedy_construction(&instance, &mut rng);
            assert!(sol.is_complete());
            assert!(checker.check_complete(&sol).is_empty());
            assert!((sol.cost() - sol.recompute_cost()).abs() < 1e-10);
        }
    }

    #[test]
    fn test_greedy_same_seed_same_result() {
        let instance = clustered();
        let a = greedy_construction(&instance, &mut StdRng::seed_from_u64(3));
        let b = greedy_construction(&instance, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_greedy_two_by_two_scenario() {
        let instance = two_by_two();
        let mut rng = StdRng::seed_from_u64(42);
        let sol = greedy_construction(&instance, &mut rng);
        assert!(sol.is_complete());
        assert!(sol.num_used_locations() <= 2);
        assert_eq!(sol.cost(), sol.num_used_locations() as f64 * 7.0);
        assert!(SolutionChecker::new(&instance)
            .check_complete(&sol)
            .is_empty());
    }

    #[test]
    fn test_greedy_all_incompatible_is_infeasible() {
        let instance = all_incompatible();
        let mut rng = StdRng::seed_from_u64(42);
        let sol = greedy_construction(&instance, &mut rng);
        assert!(!sol.is_feasible());
        assert!(sol.cost().is_infinite());
    }

    #[test]
    fn test_greedy_one_hub_needs_two_sites() {
        // the secondary center must sit elsewhere, so the hub plus one
        // other site is the floor
        let instance = one_hub();
        let mut rng = StdRng::seed_from_u64(42);
        let sol = greedy_construction(&instance, &mut rng);
        assert!(sol.is_complete());
        assert_eq!(sol.location_type(0), Some(0));
        assert_eq!(sol.num_used_locations(), 2);
        for city in 0..instance.num_cities() {
            assert_eq!(sol.centers(city).primary, Some(0));
        }
    }
}
