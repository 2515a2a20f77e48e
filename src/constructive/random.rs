//! Random construction: every feasible candidate is equally likely.

use rand::Rng;

use crate::models::{Assignment, Instance, Solution};

use super::construct;

pub(crate) fn select_random<R: Rng>(candidates: &[Assignment], rng: &mut R) -> Option<usize> {
    if candidates.is_empty() {
        None
    } else {
        Some(rng.random_range(0..candidates.len()))
    }
}

/// Builds a solution by applying uniformly random feasible assignments.
///
/// Serves as a baseline for the greedy and GRASP heuristics.
pub fn random_construction<'a, R: Rng>(instance: &'a Instance, rng: &mut R) -> Solution<'a> {
    construct(instance, rng, select_random)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::test_instances::*;
    use crate::constructive::greedy_construction;
    use crate::evaluation::SolutionChecker;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_clustered_is_valid() {
        let instance = clustered();
        let checker = SolutionChecker::new(&instance);
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let sol = random_construction(&instance, &mut rng);
            // random choices may paint themselves into a corner
            if sol.is_feasible() {
                assert!(sol.is_complete());
                assert!(checker.check_complete(&sol).is_empty());
            } else {
                assert!(sol.cost().is_infinite());
            }
        }
    }

    #[test]
    fn test_random_not_cheaper_than_hub_floor() {
        let instance = one_hub();
        let greedy = greedy_construction(&instance, &mut StdRng::seed_from_u64(42));
        for seed in 0..10 {
            let sol = random_construction(&instance, &mut StdRng::seed_from_u64(seed));
            assert!(sol.cost() >= greedy.cost());
        }
    }

    #[test]
    fn test_select_random_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(select_random(&[], &mut rng), None);
    }
}
