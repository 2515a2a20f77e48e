//! Reassignment neighborhood.
//!
//! # Algorithm
//!
//! A neighbor moves one `(city, role)` relation from its current location
//! (the origin) to another location that is already in use (the target),
//! keeping the target's type. The predicted cost of the neighbor is:
//!
//! - incumbent − origin cost, if the origin serves nothing else;
//! - otherwise incumbent + (cheapest feasible type − current type) at the
//!   origin, where the cheapest type is searched over the cities the
//!   origin keeps.
//!
//! Improving candidates are applied tentatively under a checkpoint so that a
//! move whose application is refused is simply skipped.
//!
//! # Complexity
//!
//! O(u² · s + u · s · k) per scan, with u used locations, s cities served per
//! location and k types.

use std::fmt;

use crate::config::Policy;
use crate::models::{Role, Solution};

/// Minimum cost decrease counted as an improvement.
const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// A relocation of one `(city, role)` relation between used locations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move {
    /// City whose center moves.
    pub city: usize,
    /// Role of the moving center.
    pub role: Role,
    /// Location currently serving the city.
    pub from: usize,
    /// Used location that takes over.
    pub to: usize,
    /// New type of the origin, if it stays open and can be downgraded.
    pub origin_type: Option<usize>,
    /// Total cost of the solution after the move.
    pub cost: f64,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "c_{} {}: l_{} -> l_{}",
            self.city, self.role, self.from, self.to
        )?;
        if let Some(t) = self.origin_type {
            write!(f, " (l_{} becomes t_{t})", self.from)?;
        }
        write!(f, ", cost {:.2}", self.cost)
    }
}

/// Cheapest type that still covers everything `location` serves once
/// `(city, role)` leaves it.
///
/// The current type wins ties. Returns `None` if the location is unused.
pub fn cheapest_feasible_type(
    solution: &Solution<'_>,
    location: usize,
    city: usize,
    role: Role,
) -> Option<usize> {
    let current = solution.location_type(location)?;
    let instance = solution.instance();
    let remaining_load = solution.load(location) - instance.city(city).load(role);

    let mut best = current;
    let mut best_cost = instance.facility_type(current).cost();
    for ft in instance.types() {
        if ft.cost() >= best_cost || remaining_load > ft.capacity() {
            continue;
        }
        let covers_rest = solution
            .served_by(location)
            .iter()
            .filter(|&&(c, r)| !(c == city && r == role))
            .all(|&(c, r)| ft.covers(instance.distance(c, location), r));
        if covers_rest {
            best = ft.id();
            best_cost = ft.cost();
        }
    }
    Some(best)
}

fn is_feasible_reassignment(solution: &Solution<'_>, city: usize, role: Role, to: usize) -> bool {
    let Some(to_type) = solution.location_type(to) else {
        return false;
    };
    if solution.centers(city).get(role.other()) == Some(to) {
        return false;
    }
    let instance = solution.instance();
    let ft = instance.facility_type(to_type);
    ft.covers(instance.distance(city, to), role)
        && solution.load(to) + instance.city(city).load(role) <= ft.capacity()
}

/// Predicts the outcome of moving `(city, role)` from `from` to `to`.
///
/// Returns `None` if the relation does not exist or the target cannot take
/// it under its current type.
pub fn evaluate_move(
    solution: &Solution<'_>,
    city: usize,
    role: Role,
    from: usize,
    to: usize,
) -> Option<Move> {
    if from == to || solution.centers(city).get(role) != Some(from) {
        return None;
    }
    let from_type = solution.location_type(from)?;
    if !is_feasible_reassignment(solution, city, role, to) {
        return None;
    }

    let instance = solution.instance();
    let from_cost = instance.facility_type(from_type).cost();
    let (origin_type, cost) = if solution.served_by(from).len() == 1 {
        (None, solution.cost() - from_cost)
    } else {
        let cheapest = cheapest_feasible_type(solution, from, city, role)?;
        let cost = solution.cost() + (instance.facility_type(cheapest).cost() - from_cost);
        ((cheapest != from_type).then_some(cheapest), cost)
    };

    Some(Move {
        city,
        role,
        from,
        to,
        origin_type,
        cost,
    })
}

/// Applies the raw operations of a move. Partial effects are left in place
/// on failure; callers wrap this in a checkpoint.
fn try_apply(solution: &mut Solution<'_>, mv: &Move) -> bool {
    let (Some(from_type), Some(to_type)) =
        (solution.location_type(mv.from), solution.location_type(mv.to))
    else {
        return false;
    };
    if !solution.unassign(mv.city, mv.from, from_type, mv.role) {
        return false;
    }
    if !solution.assign(mv.city, mv.to, to_type, mv.role, true) {
        return false;
    }
    // unassign may have restored an earlier type at the origin
    if solution.location_type(mv.from).is_none() {
        return true;
    }
    solution.change_location_type(mv.from, mv.origin_type.unwrap_or(from_type))
}

/// Applies a move, leaving the solution untouched if any step is refused.
pub fn apply_move(solution: &mut Solution<'_>, mv: &Move) -> bool {
    let cp = solution.checkpoint();
    if try_apply(solution, mv) {
        solution.commit(cp);
        true
    } else {
        solution.rollback(cp);
        false
    }
}

/// Used locations in scan order.
///
/// First improvement visits the most loaded locations (by capacity ratio)
/// first; best improvement scans by id since it is exhaustive anyway.
fn scan_order(solution: &Solution<'_>, policy: Policy) -> Vec<usize> {
    let mut order: Vec<usize> = solution.used_locations().map(|(l, _)| l).collect();
    if policy == Policy::FirstImprovement {
        let ratio = |l: usize| solution.load_ratio(l).unwrap_or(0.0);
        order.sort_by(|&a, &b| ratio(b).total_cmp(&ratio(a)));
    }
    order
}

/// Scans the reassignment neighborhood once and applies an improving move.
///
/// Returns the applied move, or `None` (solution unchanged) if no neighbor
/// is strictly cheaper.
pub fn explore_reassignment(solution: &mut Solution<'_>, policy: Policy) -> Option<Move> {
    if !solution.is_feasible() || !solution.is_complete() {
        return None;
    }

    let incumbent = solution.cost();
    let order = scan_order(solution, policy);
    let mut best: Option<Move> = None;

    for &from in &order {
        let relations = solution.served_by(from).to_vec();
        for (city, role) in relations {
            for &to in &order {
                let Some(mv) = evaluate_move(solution, city, role, from, to) else {
                    continue;
                };
                let threshold = best.map_or(incumbent, |b| b.cost);
                if mv.cost >= threshold - IMPROVEMENT_EPSILON {
                    continue;
                }

                let cp = solution.checkpoint();
                if !try_apply(solution, &mv) {
                    solution.rollback(cp);
                    continue;
                }
                debug_assert!(
                    (solution.cost() - mv.cost).abs() <= 1e-6,
                    "realized cost {} differs from predicted {}",
                    solution.cost(),
                    mv.cost
                );

                match policy {
                    Policy::FirstImprovement => {
                        solution.commit(cp);
                        return Some(mv);
                    }
                    Policy::BestImprovement => {
                        solution.rollback(cp);
                        best = Some(mv);
                    }
                }
            }
        }
    }

    let mv = best?;
    apply_move(solution, &mv).then_some(mv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::SolutionChecker;
    use crate::models::{City, FacilityType, Instance, Location};

    /// Three sites on a line; city 1 sits between the outer two.
    fn line_instance() -> Instance {
        Instance::from_parts(
            vec![
                City::new(0, 0.0, 0.0, 100.0),
                City::new(1, 4.0, 0.0, 50.0),
                City::new(2, 8.0, 0.0, 100.0),
            ],
            vec![
                Location::new(0, 1.0, 0.0),
                Location::new(1, 7.0, 0.0),
                Location::new(2, 4.0, 0.0),
            ],
            vec![
                FacilityType::new(0, 3.0, 400.0, 10.0),
                FacilityType::new(1, 1.0, 400.0, 4.0),
            ],
            2.0,
        )
    }

    /// c0, c2 primary at the outer sites, c1 primary at the middle site,
    /// secondaries crossing over.
    fn spread_solution(instance: &Instance) -> Solution<'_> {
        let mut sol = Solution::new(instance);
        assert!(sol.assign(0, 0, 0, Role::Primary, true));
        assert!(sol.assign(2, 1, 0, Role::Primary, true));
        assert!(sol.assign(1, 2, 0, Role::Primary, true));
        assert!(sol.assign(0, 1, 0, Role::Secondary, true));
        assert!(sol.assign(1, 0, 0, Role::Secondary, true));
        assert!(sol.assign(2, 0, 0, Role::Secondary, true));
        assert!(sol.is_complete());
        sol
    }

    #[test]
    fn test_evaluate_move_closing_origin() {
        let instance = line_instance();
        let sol = spread_solution(&instance);
        // c1 primary is l2's only relation; l1 is 3 away (within 3)
        let mv = evaluate_move(&sol, 1, Role::Primary, 2, 1).expect("feasible");
        assert_eq!(mv.origin_type, None);
        assert_eq!(mv.cost, 20.0);
    }

    #[test]
    fn test_evaluate_move_rejects() {
        let instance = line_instance();
        let sol = spread_solution(&instance);
        // same location
        assert!(evaluate_move(&sol, 1, Role::Primary, 2, 2).is_none());
        // wrong origin
        assert!(evaluate_move(&sol, 1, Role::Primary, 0, 1).is_none());
        // target already serves c0 as secondary
        assert!(evaluate_move(&sol, 0, Role::Primary, 0, 1).is_none());
        // c0 is 4 away from l2, beyond primary radius 3
        assert!(evaluate_move(&sol, 0, Role::Primary, 0, 2).is_none());
    }

    #[test]
    fn test_cheapest_feasible_type_downgrades() {
        let instance = line_instance();
        let sol = spread_solution(&instance);
        // without c0 secondary, l1 keeps only c2 primary at distance 1
        assert_eq!(cheapest_feasible_type(&sol, 1, 0, Role::Secondary), Some(1));
        // c0 secondary at distance 7 is beyond type 1's secondary radius 3
        assert_eq!(cheapest_feasible_type(&sol, 1, 2, Role::Primary), Some(0));
        // c2 secondary keeps l0 on type 0
        assert_eq!(cheapest_feasible_type(&sol, 0, 1, Role::Secondary), Some(0));
        assert_eq!(cheapest_feasible_type(&sol, 2, 1, Role::Primary), Some(1));
        // without it, type 1 covers c0 primary and c1 secondary at their bounds
        assert_eq!(cheapest_feasible_type(&sol, 0, 2, Role::Secondary), Some(1));
    }

    #[test]
    fn test_apply_move_matches_prediction() {
        let instance = line_instance();
        let mut sol = spread_solution(&instance);
        let mv = evaluate_move(&sol, 1, Role::Primary, 2, 1).expect("feasible");
        assert!(apply_move(&mut sol, &mv));
        assert_eq!(sol.cost(), mv.cost);
        assert_eq!(sol.location_type(2), None);
        assert_eq!(sol.centers(1).primary, Some(1));
        assert!(SolutionChecker::new(&instance)
            .check_complete(&sol)
            .is_empty());
    }

    #[test]
    fn test_apply_move_refused_leaves_state() {
        let instance = line_instance();
        let mut sol = spread_solution(&instance);
        let before = sol.clone();
        let bogus = Move {
            city: 0,
            role: Role::Primary,
            from: 0,
            to: 2,
            origin_type: None,
            cost: 0.0,
        };
        assert!(!apply_move(&mut sol, &bogus));
        assert_eq!(sol, before);
    }

    #[test]
    fn test_explore_first_improvement() {
        let instance = line_instance();
        let mut sol = spread_solution(&instance);
        let before = sol.cost();
        let mv = explore_reassignment(&mut sol, Policy::FirstImprovement).expect("improves");
        assert!(sol.cost() < before);
        assert_eq!(sol.cost(), mv.cost);
        assert!(SolutionChecker::new(&instance)
            .check_complete(&sol)
            .is_empty());
    }

    #[test]
    fn test_first_improvement_scans_heaviest_location_first() {
        let instance = line_instance();
        let mut sol = spread_solution(&instance);
        // load ratios: l0 115/400, l1 110/400, l2 50/400
        assert_eq!(scan_order(&sol, Policy::FirstImprovement), vec![0, 1, 2]);
        assert_eq!(scan_order(&sol, Policy::BestImprovement), vec![0, 1, 2]);

        // closing l2 (cost 20) is the best move, but l0 is scanned first and
        // moving c2 secondary away lets it downgrade to type 1 (cost 24)
        let mv = explore_reassignment(&mut sol, Policy::FirstImprovement).expect("improves");
        assert_eq!((mv.city, mv.role, mv.from, mv.to), (2, Role::Secondary, 0, 2));
        assert_eq!(mv.origin_type, Some(1));
        assert_eq!(sol.cost(), 24.0);
        assert_eq!(sol.location_type(0), Some(1));

        let mut best = spread_solution(&instance);
        let mv = explore_reassignment(&mut best, Policy::BestImprovement).expect("improves");
        assert_eq!((mv.city, mv.role, mv.from, mv.to), (1, Role::Primary, 2, 1));
        assert_eq!(best.cost(), 20.0);
    }

    #[test]
    fn test_first_improvement_prefers_loaded_origin_over_lower_id() {
        let instance = line_instance();
        // mirror of the spread layout: l1 carries two secondaries
        let mut sol = Solution::new(&instance);
        assert!(sol.assign(0, 0, 0, Role::Primary, true));
        assert!(sol.assign(2, 1, 0, Role::Primary, true));
        assert!(sol.assign(1, 2, 0, Role::Primary, true));
        assert!(sol.assign(2, 0, 0, Role::Secondary, true));
        assert!(sol.assign(1, 1, 0, Role::Secondary, true));
        assert!(sol.assign(0, 1, 0, Role::Secondary, true));
        assert!(sol.is_complete());
        // load ratios: l1 115/400, l0 110/400, l2 50/400
        assert_eq!(scan_order(&sol, Policy::FirstImprovement), vec![1, 0, 2]);

        // both l0 and l1 can shed a secondary to l2 and downgrade; l1 wins
        let mv = explore_reassignment(&mut sol, Policy::FirstImprovement).expect("improves");
        assert_eq!((mv.city, mv.role, mv.from, mv.to), (0, Role::Secondary, 1, 2));
        assert_eq!(sol.cost(), 24.0);
        assert_eq!(sol.location_type(1), Some(1));
        assert_eq!(sol.location_type(0), Some(0));
    }

    #[test]
    fn test_explore_best_not_worse_than_first() {
        let instance = line_instance();
        let mut first = spread_solution(&instance);
        let mut best = spread_solution(&instance);
        explore_reassignment(&mut first, Policy::FirstImprovement);
        explore_reassignment(&mut best, Policy::BestImprovement);
        assert!(best.cost() <= first.cost());
        assert!(SolutionChecker::new(&instance)
            .check_complete(&best)
            .is_empty());
    }

    #[test]
    fn test_explore_incomplete_is_noop() {
        let instance = line_instance();
        let mut sol = Solution::new(&instance);
        assert!(sol.assign(0, 0, 0, Role::Primary, true));
        let before = sol.clone();
        assert!(explore_reassignment(&mut sol, Policy::BestImprovement).is_none());
        assert_eq!(sol, before);
    }

    #[test]
    fn test_move_display() {
        let mv = Move {
            city: 1,
            role: Role::Secondary,
            from: 2,
            to: 0,
            origin_type: Some(1),
            cost: 14.0,
        };
        assert_eq!(
            mv.to_string(),
            "c_1 secondary: l_2 -> l_0 (l_2 becomes t_1), cost 14.00"
        );
    }
}
