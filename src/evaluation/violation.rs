//! Constraint violation types reported by the checker.

use crate::models::Role;

/// A type of constraint violation in a solution.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// A city has no center for the given role.
    Unassigned {
        /// City missing a center.
        city: usize,
        /// Role left open.
        role: Role,
    },
    /// Primary and secondary center of a city share one location.
    SameCenter {
        /// Affected city.
        city: usize,
        /// Location used for both roles.
        location: usize,
    },
    /// A city is farther from its center than the type allows for the role.
    DistanceExceeded {
        /// Affected city.
        city: usize,
        /// Serving location.
        location: usize,
        /// Role of the serving center.
        role: Role,
        /// Realized distance.
        distance: f64,
        /// Maximum distance of the installed type for this role.
        max_distance: f64,
    },
    /// Load at a location exceeds the installed capacity.
    CapacityExceeded {
        /// Overloaded location.
        location: usize,
        /// Weighted population assigned.
        load: f64,
        /// Capacity of the installed type.
        capacity: f64,
    },
    /// Two used locations are closer than the minimum separation.
    Incompatible {
        /// First location (lower id).
        a: usize,
        /// Second location.
        b: usize,
    },
    /// A city is served by a location with no installed type.
    UntypedLocation {
        /// Location referenced without a type.
        location: usize,
    },
    /// Stored cost differs from the cost of the installed types.
    CostMismatch {
        /// Cost stored in the solution.
        stored: f64,
        /// Cost recomputed from the centers.
        expected: f64,
    },
}

/// A constraint violation in a solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}
