//! Incremental assignment state for the two-tier facility location problem.
//!
//! # State machine
//!
//! A [`Solution`] starts *partial* (no roles filled), becomes *complete* once
//! every city has both a primary and a secondary center, and may be turned
//! *infeasible* (cost = +∞, no assignments, terminal) when construction
//! cannot finish. Transitions happen only through [`Solution::assign`],
//! [`Solution::unassign`] and [`Solution::make_infeasible`];
//! [`Solution::change_location_type`] changes cost but never the state.
//!
//! # Bookkeeping
//!
//! All maps are dense vectors indexed by id, with `None` as the unset slot:
//!
//! - `location_types[l]`: type installed at location `l`
//! - `served[l]`: `(city, role)` pairs served by location `l`
//! - `centers[c]`: primary and secondary location of city `c`
//! - `load[l]`: weighted population absorbed by location `l`
//! - `admissions[l]`: relations whose assignment switched the type of `l`,
//!   with the type they replaced
//!
//! `cost` is maintained incrementally as the sum of the installation cost
//! of every used location. [`Solution::recompute_cost`] derives it from
//! scratch for verification.
//!
//! # Speculation
//!
//! [`Solution::checkpoint`] / [`Solution::rollback`] journal every mutation
//! so that candidate evaluation can apply a change, read the cost, and
//! restore the exact prior state.

use std::fmt;

use super::undo::{Admission, Checkpoint, UndoEntry, UndoLog};
use super::{Assignment, FacilityType, Instance, Role};

/// Primary and secondary location of one city.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Centers {
    /// Location of the primary center, if assigned.
    pub primary: Option<usize>,
    /// Location of the secondary center, if assigned.
    pub secondary: Option<usize>,
}

impl Centers {
    /// Location serving the city in `role`.
    pub fn get(&self, role: Role) -> Option<usize> {
        match role {
            Role::Primary => self.primary,
            Role::Secondary => self.secondary,
        }
    }

    fn set(&mut self, role: Role, location: Option<usize>) {
        match role {
            Role::Primary => self.primary = location,
            Role::Secondary => self.secondary = location,
        }
    }

    /// Returns `true` if both roles are filled.
    pub fn is_complete(&self) -> bool {
        self.primary.is_some() && self.secondary.is_some()
    }
}

/// A (possibly partial) assignment of cities to centers.
///
/// # Examples
///
/// ```
/// use u_facility::models::{City, FacilityType, Instance, Location, Role, Solution};
///
/// let instance = Instance::from_parts(
///     vec![City::new(0, 0.0, 0.0, 100.0)],
///     vec![Location::new(0, 1.0, 0.0), Location::new(1, 0.0, 1.0)],
///     vec![FacilityType::new(0, 2.0, 200.0, 10.0)],
///     1.0,
/// );
/// let mut sol = Solution::new(&instance);
/// assert!(sol.assign(0, 0, 0, Role::Primary, true));
/// assert!(!sol.is_complete());
/// assert!(sol.assign(0, 1, 0, Role::Secondary, true));
/// assert!(sol.is_complete());
/// assert_eq!(sol.cost(), 20.0);
/// ```
#[derive(Debug, Clone)]
pub struct Solution<'a> {
    instance: &'a Instance,
    cost: f64,
    location_types: Vec<Option<usize>>,
    served: Vec<Vec<(usize, Role)>>,
    centers: Vec<Centers>,
    load: Vec<f64>,
    admissions: Vec<Vec<Admission>>,
    used_count: usize,
    filled_roles: usize,
    complete: bool,
    feasible: bool,
    undo: UndoLog,
}

impl<'a> Solution<'a> {
    /// Creates an empty solution for the given instance.
    pub fn new(instance: &'a Instance) -> Self {
        let n_locations = instance.num_locations();
        let n_cities = instance.num_cities();
        Self {
            instance,
            cost: 0.0,
            location_types: vec![None; n_locations],
            served: vec![Vec::new(); n_locations],
            centers: vec![Centers::default(); n_cities],
            load: vec![0.0; n_locations],
            admissions: vec![Vec::new(); n_locations],
            used_count: 0,
            filled_roles: 0,
            complete: n_cities == 0,
            feasible: true,
            undo: UndoLog::default(),
        }
    }

    /// Creates a solution already in the infeasible state.
    pub fn infeasible(instance: &'a Instance) -> Self {
        let mut solution = Self::new(instance);
        solution.make_infeasible();
        solution
    }

    /// The instance this solution refers to.
    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// Total installation cost (+∞ when infeasible).
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Returns `false` once the solution was marked infeasible.
    pub fn is_feasible(&self) -> bool {
        self.feasible
    }

    /// Returns `true` if the last completeness check found every role filled.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Type installed at `location`, if the location is in use.
    pub fn location_type(&self, location: usize) -> Option<usize> {
        self.location_types[location]
    }

    /// Primary and secondary centers of `city`.
    pub fn centers(&self, city: usize) -> Centers {
        self.centers[city]
    }

    /// `(city, role)` pairs served by `location`, in assignment order.
    pub fn served_by(&self, location: usize) -> &[(usize, Role)] {
        &self.served[location]
    }

    /// Weighted population absorbed by `location`.
    pub fn load(&self, location: usize) -> f64 {
        self.load[location]
    }

    /// Fraction of the installed capacity consumed at `location`.
    ///
    /// Returns `None` if the location is unused.
    pub fn load_ratio(&self, location: usize) -> Option<f64> {
        let t = self.location_types[location]?;
        let capacity = self.instance.facility_type(t).capacity();
        Some(if capacity > 0.0 {
            self.load[location] / capacity
        } else {
            0.0
        })
    }

    /// Iterates `(location, type)` over the used locations, by location id.
    pub fn used_locations(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.location_types
            .iter()
            .enumerate()
            .filter_map(|(l, t)| t.map(|t| (l, t)))
    }

    /// Number of locations currently hosting a center.
    pub fn num_used_locations(&self) -> usize {
        self.used_count
    }

    /// Recomputes the total cost from the used locations.
    pub fn recompute_cost(&self) -> f64 {
        if !self.feasible {
            return f64::INFINITY;
        }
        self.used_locations()
            .map(|(_, t)| self.instance.facility_type(t).cost())
            .sum()
    }

    /// Returns `true` if serving `city` from `location` with `type_id` in
    /// `role` keeps every invariant.
    ///
    /// Checks that the role is still free and the other role is not served
    /// by the same location, the coverage radius, and the capacity. If the
    /// location already hosts a different type, every city it serves must
    /// remain feasible under `type_id`. If the location is unused, it must
    /// be compatible with every used location.
    pub fn is_feasible_to_assign(
        &self,
        city: usize,
        location: usize,
        type_id: usize,
        role: Role,
    ) -> bool {
        if !self.feasible || !self.in_bounds(city, location, type_id) {
            return false;
        }
        let centers = self.centers[city];
        if centers.get(role).is_some() || centers.get(role.other()) == Some(location) {
            return false;
        }

        let ft = self.instance.facility_type(type_id);
        if !ft.covers(self.instance.distance(city, location), role) {
            return false;
        }

        let added = self.instance.city(city).load(role);
        match self.location_types[location] {
            Some(current) if current == type_id => self.load[location] + added <= ft.capacity(),
            Some(_) => self.type_fits(location, ft, added),
            None => added <= ft.capacity() && self.compatible_with_used(location),
        }
    }

    /// Returns `true` if `city` is served from `location` in `role` and the
    /// location currently has type `type_id`.
    pub fn is_feasible_to_unassign(
        &self,
        city: usize,
        location: usize,
        type_id: usize,
        role: Role,
    ) -> bool {
        self.feasible
            && self.in_bounds(city, location, type_id)
            && self.centers[city].get(role) == Some(location)
            && self.location_types[location] == Some(type_id)
    }

    /// Serves `city` from `location` with `type_id` in `role`.
    ///
    /// Opening a location adds its full type cost; switching the type of a
    /// used location adds the cost difference. With `finalize_check` set the
    /// completeness flag is re-evaluated. Returns `false` without mutating
    /// anything if the assignment is infeasible.
    pub fn assign(
        &mut self,
        city: usize,
        location: usize,
        type_id: usize,
        role: Role,
        finalize_check: bool,
    ) -> bool {
        if !self.is_feasible_to_assign(city, location, type_id, role) {
            return false;
        }

        let prev_type = self.location_types[location];
        let switched = prev_type.is_some_and(|t| t != type_id);
        self.undo.record(UndoEntry::Assign {
            city,
            location,
            role,
            prev_type,
            switched,
            prev_load: self.load[location],
            prev_cost: self.cost,
            prev_complete: self.complete,
        });

        let new_cost = self.instance.facility_type(type_id).cost();
        match prev_type {
            None => {
                self.cost += new_cost;
                self.used_count += 1;
            }
            Some(current) if current != type_id => {
                self.cost += new_cost - self.instance.facility_type(current).cost();
                self.admissions[location].push(Admission {
                    city,
                    role,
                    prev_type: current,
                    admitted_type: type_id,
                });
            }
            Some(_) => {}
        }

        self.location_types[location] = Some(type_id);
        self.served[location].push((city, role));
        self.centers[city].set(role, Some(location));
        self.load[location] += self.instance.city(city).load(role);
        self.filled_roles += 1;

        if finalize_check {
            self.complete = self.filled_roles == 2 * self.instance.num_cities();
        }
        true
    }

    /// Applies a candidate produced by [`Solution::find_feasible_assignments`].
    pub fn assign_candidate(&mut self, candidate: &Assignment, finalize_check: bool) -> bool {
        self.assign(
            candidate.city,
            candidate.location,
            candidate.facility_type,
            candidate.role,
            finalize_check,
        )
    }

    /// Stops serving `city` from `location` in `role`.
    ///
    /// A location left without served cities is closed and its cost
    /// subtracted. If assigning this relation switched the location's type
    /// and the location still has that type, the previous type is restored
    /// when it covers the cities left; an assign directly followed by its
    /// unassign is therefore a round trip. Returns `false` without mutating
    /// anything if the triple does not match the current state.
    pub fn unassign(&mut self, city: usize, location: usize, type_id: usize, role: Role) -> bool {
        if !self.is_feasible_to_unassign(city, location, type_id, role) {
            return false;
        }
        let Some(index) = self.served[location]
            .iter()
            .position(|&(c, r)| c == city && r == role)
        else {
            return false;
        };
        let admission = self.admissions[location]
            .iter()
            .position(|a| a.city == city && a.role == role)
            .map(|i| (i, self.admissions[location].remove(i)));

        self.undo.record(UndoEntry::Unassign {
            city,
            location,
            role,
            type_id,
            index,
            admission,
            prev_load: self.load[location],
            prev_cost: self.cost,
            prev_complete: self.complete,
        });

        self.served[location].remove(index);
        self.centers[city].set(role, None);
        self.filled_roles -= 1;
        self.complete = false;

        if self.served[location].is_empty() {
            self.location_types[location] = None;
            self.load[location] = 0.0;
            self.used_count -= 1;
            self.cost = if self.used_count == 0 {
                0.0
            } else {
                self.cost - self.instance.facility_type(type_id).cost()
            };
        } else {
            self.load[location] -= self.instance.city(city).load(role);
            if let Some((_, a)) = admission {
                self.restore_type(location, type_id, a);
            }
        }
        true
    }

    fn restore_type(&mut self, location: usize, current: usize, admission: Admission) {
        let instance = self.instance;
        let prev = instance.facility_type(admission.prev_type);
        if admission.admitted_type != current || !self.type_fits(location, prev, 0.0) {
            return;
        }
        self.cost += prev.cost() - instance.facility_type(current).cost();
        self.location_types[location] = Some(admission.prev_type);
    }

    /// Switches the type installed at a used location.
    ///
    /// Every city served by `location` must stay within the new type's
    /// radius for its role, and the current load must fit the new capacity.
    pub fn change_location_type(&mut self, location: usize, new_type: usize) -> bool {
        if !self.feasible || location >= self.location_types.len() {
            return false;
        }
        if new_type >= self.instance.num_types() {
            return false;
        }
        let Some(current) = self.location_types[location] else {
            return false;
        };
        if current == new_type {
            return true;
        }
        let ft = self.instance.facility_type(new_type);
        if !self.type_fits(location, ft, 0.0) {
            return false;
        }

        self.undo.record(UndoEntry::ChangeType {
            location,
            prev_type: current,
            prev_cost: self.cost,
        });
        self.cost += ft.cost() - self.instance.facility_type(current).cost();
        self.location_types[location] = Some(new_type);
        true
    }

    /// Turns this solution into the terminal infeasible state.
    ///
    /// Clears every assignment and sets the cost to +∞.
    pub fn make_infeasible(&mut self) {
        debug_assert!(
            !self.undo.is_recording(),
            "make_infeasible inside an open checkpoint"
        );
        self.location_types.fill(None);
        self.served.iter_mut().for_each(Vec::clear);
        self.centers.fill(Centers::default());
        self.load.fill(0.0);
        self.admissions.iter_mut().for_each(Vec::clear);
        self.used_count = 0;
        self.filled_roles = 0;
        self.complete = false;
        self.feasible = false;
        self.cost = f64::INFINITY;
        self.undo.reset();
    }

    /// Opens a journaled region; see [`Solution::rollback`].
    pub fn checkpoint(&mut self) -> Checkpoint {
        self.undo.open()
    }

    /// Reverts every mutation made since `checkpoint` and closes it.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        while let Some(entry) = self.undo.pop_since(checkpoint) {
            self.revert(entry);
        }
        self.undo.close(checkpoint);
    }

    /// Keeps every mutation made since `checkpoint` and closes it.
    pub fn commit(&mut self, checkpoint: Checkpoint) {
        self.undo.close(checkpoint);
    }

    fn revert(&mut self, entry: UndoEntry) {
        match entry {
            UndoEntry::Assign {
                city,
                location,
                role,
                prev_type,
                switched,
                prev_load,
                prev_cost,
                prev_complete,
            } => {
                if switched {
                    self.admissions[location].pop();
                }
                let popped = self.served[location].pop();
                debug_assert_eq!(popped, Some((city, role)));
                self.centers[city].set(role, None);
                self.location_types[location] = prev_type;
                self.load[location] = prev_load;
                self.cost = prev_cost;
                self.complete = prev_complete;
                self.filled_roles -= 1;
                if prev_type.is_none() {
                    self.used_count -= 1;
                }
            }
            UndoEntry::Unassign {
                city,
                location,
                role,
                type_id,
                index,
                admission,
                prev_load,
                prev_cost,
                prev_complete,
            } => {
                if let Some((i, a)) = admission {
                    self.admissions[location].insert(i, a);
                }
                if self.served[location].is_empty() {
                    self.used_count += 1;
                }
                self.served[location].insert(index, (city, role));
                self.centers[city].set(role, Some(location));
                self.location_types[location] = Some(type_id);
                self.load[location] = prev_load;
                self.cost = prev_cost;
                self.complete = prev_complete;
                self.filled_roles += 1;
            }
            UndoEntry::ChangeType {
                location,
                prev_type,
                prev_cost,
            } => {
                self.location_types[location] = Some(prev_type);
                self.cost = prev_cost;
            }
        }
    }

    /// Enumerates every feasible assignment for roles not yet filled.
    ///
    /// The cost of each entry is measured by applying it, reading the total
    /// cost and rolling back, so `self` is left unchanged.
    pub fn find_feasible_assignments(&mut self) -> Vec<Assignment> {
        let mut candidates = Vec::new();
        self.for_each_feasible(|a| candidates.push(a));
        candidates
    }

    /// Returns the feasible assignment with the lowest resulting cost.
    ///
    /// Ties keep the first candidate in enumeration order.
    pub fn find_best_feasible_assignment(&mut self) -> Option<Assignment> {
        let mut best: Option<Assignment> = None;
        self.for_each_feasible(|a| {
            if best.is_none_or(|b| a.cost < b.cost) {
                best = Some(a);
            }
        });
        best
    }

    fn for_each_feasible<F: FnMut(Assignment)>(&mut self, mut visit: F) {
        if !self.feasible {
            return;
        }
        let instance = self.instance;
        for city in 0..instance.num_cities() {
            for role in Role::ALL {
                if self.centers[city].get(role).is_some() {
                    continue;
                }
                for location in 0..instance.num_locations() {
                    for type_id in 0..instance.num_types() {
                        let cp = self.checkpoint();
                        if self.assign(city, location, type_id, role, false) {
                            visit(Assignment::new(city, location, type_id, role, self.cost));
                        }
                        self.rollback(cp);
                    }
                }
            }
        }
    }

    fn in_bounds(&self, city: usize, location: usize, type_id: usize) -> bool {
        city < self.centers.len()
            && location < self.location_types.len()
            && type_id < self.instance.num_types()
    }

    /// Whether every city served by `location` stays feasible under `ft`
    /// with `extra` additional load.
    fn type_fits(&self, location: usize, ft: &FacilityType, extra: f64) -> bool {
        self.load[location] + extra <= ft.capacity()
            && self.served[location]
                .iter()
                .all(|&(c, r)| ft.covers(self.instance.distance(c, location), r))
    }

    fn compatible_with_used(&self, location: usize) -> bool {
        self.instance.compatibility().compatible_with_all(
            location,
            self.used_locations()
                .map(|(l, _)| l)
                .filter(|&l| l != location),
        )
    }
}

/// Two solutions are equal when they refer to the same instance and hold
/// the same assignment state. The undo journal is not compared.
impl PartialEq for Solution<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.instance, other.instance)
            && self.cost.to_bits() == other.cost.to_bits()
            && self.location_types == other.location_types
            && self.served == other.served
            && self.centers == other.centers
            && self.load.len() == other.load.len()
            && self
                .load
                .iter()
                .zip(&other.load)
                .all(|(a, b)| a.to_bits() == b.to_bits())
            && self.admissions == other.admissions
            && self.used_count == other.used_count
            && self.filled_roles == other.filled_roles
            && self.complete == other.complete
            && self.feasible == other.feasible
    }
}

impl fmt::Display for Solution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.feasible {
            return writeln!(f, "z = inf;");
        }
        writeln!(f, "z = {:.8};", self.cost)?;

        writeln!(f, "locations:")?;
        for (location, type_id) in self.used_locations() {
            let ft = self.instance.facility_type(type_id);
            write!(
                f,
                "  l_{location}: type t_{type_id} (cost {:.2}, load {:.2}/{:.2}) serves [",
                ft.cost(),
                self.load[location],
                ft.capacity()
            )?;
            for (i, (city, role)) in self.served[location].iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "c_{city} ({role})")?;
            }
            writeln!(f, "]")?;
        }

        writeln!(f, "cities:")?;
        for city in 0..self.instance.num_cities() {
            write!(f, "  c_{city}:")?;
            for role in Role::ALL {
                match self.centers[city].get(role) {
                    Some(location) => {
                        let bound = self
                            .location_types[location]
                            .map(|t| self.instance.facility_type(t).max_distance(role))
                            .unwrap_or(0.0);
                        write!(
                            f,
                            " {role} l_{location} (d = {:.2} <= {:.2})",
                            self.instance.distance(city, location),
                            bound
                        )?;
                    }
                    None => write!(f, " {role} -")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
