//! GRASP construction with a restricted candidate list.
//!
//! # Algorithm
//!
//! 1. Enumerate all feasible assignments with their resulting cost
//! 2. `boundary = min + alpha * (max - min)`
//! 3. Keep every candidate with cost ≤ boundary, up to the greedy tie
//!    tolerance (the RCL)
//! 4. Apply one RCL member chosen uniformly at random
//!
//! `alpha = 0` keeps exactly the candidates greedy treats as tied (pure
//! greedy); `alpha = 1` keeps every candidate (pure random).
//!
//! # Reference
//!
//! Feo, T.A. & Resende, M.G.C. (1995). "Greedy randomized adaptive search
//! procedures", *Journal of Global Optimization* 6, 109-133.

use rand::Rng;

use crate::models::{Assignment, Instance, Solution};

use super::{construct, TIE_EPSILON};

/// Indices of the candidates in the restricted candidate list, in
/// enumeration order.
///
/// Uses the same tie tolerance as
/// [`min_cost_candidates`](super::min_cost_candidates), so `alpha = 0`
/// yields the greedy candidate pool.
///
/// # Examples
///
/// ```
/// use u_facility::models::{Assignment, Role};
/// use u_facility::constructive::restricted_candidate_list;
///
/// let candidates = vec![
///     Assignment::new(0, 0, 0, Role::Primary, 30.0),
///     Assignment::new(0, 1, 0, Role::Primary, 10.0),
///     Assignment::new(1, 0, 0, Role::Primary, 20.0),
/// ];
/// assert_eq!(restricted_candidate_list(&candidates, 0.0), vec![1]);
/// assert_eq!(restricted_candidate_list(&candidates, 0.5), vec![1, 2]);
/// assert_eq!(restricted_candidate_list(&candidates, 1.0), vec![0, 1, 2]);
/// ```
pub fn restricted_candidate_list(candidates: &[Assignment], alpha: f64) -> Vec<usize> {
    let (min, max) = candidates
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), a| {
            (lo.min(a.cost), hi.max(a.cost))
        });
    let boundary = min + alpha * (max - min) + TIE_EPSILON;

    candidates
        .iter()
        .enumerate()
        .filter(|(_, a)| a.cost <= boundary)
        .map(|(i, _)| i)
        .collect()
}

/// Builds a solution with the GRASP randomized greedy rule.
///
/// `alpha` is expected in `[0, 1]`; it is validated by
/// [`SolverConfig::validate`](crate::config::SolverConfig::validate).
pub fn grasp_construction<'a, R: Rng>(
    instance: &'a Instance,
    alpha: f64,
    rng: &mut R,
) -> Solution<'a> {
    construct(instance, rng, |candidates, rng| {
        let rcl = restricted_candidate_list(candidates, alpha);
        if rcl.is_empty() {
            return None;
        }
        Some(rcl[rng.random_range(0..rcl.len())])
    })
}
