//! Independent feasibility checker for solutions.

use std::collections::BTreeSet;

use crate::models::{Instance, Role, Solution};

use super::{Violation, ViolationType};

/// Relative tolerance when comparing the stored cost with the recomputed one.
const COST_TOLERANCE: f64 = 1e-9;

/// Re-derives loads, coverage and cost of a solution from its city centers
/// alone and reports every broken constraint.
///
/// The incremental bookkeeping of [`Solution`] is not trusted: loads and the
/// set of open locations are rebuilt from scratch.
///
/// # Examples
///
/// ```
/// use u_facility::models::{City, FacilityType, Instance, Location, Role, Solution};
/// use u_facility::evaluation::SolutionChecker;
///
/// let instance = Instance::from_parts(
///     vec![City::new(0, 0.0, 0.0, 100.0)],
///     vec![Location::new(0, 1.0, 0.0), Location::new(1, 0.0, 1.0)],
///     vec![FacilityType::new(0, 2.0, 200.0, 10.0)],
///     1.0,
/// );
/// let mut sol = Solution::new(&instance);
/// sol.assign(0, 0, 0, Role::Primary, true);
/// sol.assign(0, 1, 0, Role::Secondary, true);
///
/// let checker = SolutionChecker::new(&instance);
/// assert!(checker.check_complete(&sol).is_empty());
/// ```
pub struct SolutionChecker<'a> {
    instance: &'a Instance,
}

impl<'a> SolutionChecker<'a> {
    /// Creates a checker for the given instance.
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }

    /// Checks every assigned role. Open roles are not reported.
    pub fn check(&self, solution: &Solution<'_>) -> Vec<Violation> {
        self.collect(solution, false)
    }

    /// Checks every assigned role and additionally reports open roles.
    pub fn check_complete(&self, solution: &Solution<'_>) -> Vec<Violation> {
        self.collect(solution, true)
    }

    fn collect(&self, solution: &Solution<'_>, require_complete: bool) -> Vec<Violation> {
        let instance = self.instance;
        let mut violations = Vec::new();
        let mut load = vec![0.0; instance.num_locations()];
        let mut open = BTreeSet::new();

        for city in 0..instance.num_cities() {
            let centers = solution.centers(city);
            if let (Some(p), Some(s)) = (centers.primary, centers.secondary) {
                if p == s {
                    violations.push(Violation::new(ViolationType::SameCenter {
                        city,
                        location: p,
                    }));
                }
            }

            for role in Role::ALL {
                let Some(location) = centers.get(role) else {
                    if require_complete {
                        violations.push(Violation::new(ViolationType::Unassigned { city, role }));
                    }
                    continue;
                };
                let Some(type_id) = solution.location_type(location) else {
                    violations.push(Violation::new(ViolationType::UntypedLocation { location }));
                    continue;
                };

                open.insert(location);
                load[location] += instance.city(city).load(role);

                let ft = instance.facility_type(type_id);
                let distance = instance.distance(city, location);
                if !ft.covers(distance, role) {
                    violations.push(Violation::new(ViolationType::DistanceExceeded {
                        city,
                        location,
                        role,
                        distance,
                        max_distance: ft.max_distance(role),
                    }));
                }
            }
        }

        for &location in &open {
            if let Some(type_id) = solution.location_type(location) {
                let capacity = instance.facility_type(type_id).capacity();
                if load[location] > capacity {
                    violations.push(Violation::new(ViolationType::CapacityExceeded {
                        location,
                        load: load[location],
                        capacity,
                    }));
                }
            }
        }

        let open: Vec<usize> = open.into_iter().collect();
        for (i, &a) in open.iter().enumerate() {
            for &b in &open[i + 1..] {
                if !instance.compatible(a, b) {
                    violations.push(Violation::new(ViolationType::Incompatible { a, b }));
                }
            }
        }

        if solution.is_feasible() {
            let expected: f64 = open
                .iter()
                .filter_map(|&l| solution.location_type(l))
                .map(|t| instance.facility_type(t).cost())
                .sum();
            let stored = solution.cost();
            if (stored - expected).abs() > COST_TOLERANCE * expected.abs().max(1.0) {
                violations.push(Violation::new(ViolationType::CostMismatch { stored, expected }));
            }
        }

        violations
    }
}
