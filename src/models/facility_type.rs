//! Facility types and service roles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Secondary coverage radius as a multiple of the primary radius.
pub const SECONDARY_RADIUS_FACTOR: f64 = 3.0;

/// Fraction of a city's population a secondary center must absorb.
pub const SECONDARY_LOAD_FACTOR: f64 = 0.1;

/// The role a center plays for a city.
///
/// Every city needs exactly one primary and one secondary center, and they
/// must be installed at different locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Main center, within the type's working distance, absorbing the full population.
    Primary,
    /// Backup center, within three times the working distance, absorbing 10%.
    Secondary,
}

impl Role {
    /// Both roles, primary first.
    pub const ALL: [Role; 2] = [Role::Primary, Role::Secondary];

    /// The opposite role.
    pub fn other(self) -> Role {
        match self {
            Role::Primary => Role::Secondary,
            Role::Secondary => Role::Primary,
        }
    }

    /// Multiplier applied to a city's population for this role.
    pub fn load_factor(self) -> f64 {
        match self {
            Role::Primary => 1.0,
            Role::Secondary => SECONDARY_LOAD_FACTOR,
        }
    }

    /// Multiplier applied to a type's working distance for this role.
    pub fn radius_factor(self) -> f64 {
        match self {
            Role::Primary => 1.0,
            Role::Secondary => SECONDARY_RADIUS_FACTOR,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Primary => write!(f, "primary"),
            Role::Secondary => write!(f, "secondary"),
        }
    }
}

/// A kind of logistic center that can be installed at a location.
///
/// # Examples
///
/// ```
/// use u_facility::models::{FacilityType, Role};
///
/// let t = FacilityType::new(0, 10.0, 500.0, 80.0);
/// assert_eq!(t.max_distance(Role::Primary), 10.0);
/// assert_eq!(t.max_distance(Role::Secondary), 30.0);
/// assert!(t.covers(25.0, Role::Secondary));
/// assert!(!t.covers(25.0, Role::Primary));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacilityType {
    id: usize,
    max_primary_distance: f64,
    capacity: f64,
    cost: f64,
}

impl FacilityType {
    /// Creates a new facility type.
    pub fn new(id: usize, max_primary_distance: f64, capacity: f64, cost: f64) -> Self {
        Self {
            id,
            max_primary_distance,
            capacity,
            cost,
        }
    }

    /// Type ID (index into the instance's type list).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Working distance for primary service.
    pub fn max_primary_distance(&self) -> f64 {
        self.max_primary_distance
    }

    /// Maximum weighted population this center can absorb.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Installation cost.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Coverage radius for the given role.
    pub fn max_distance(&self, role: Role) -> f64 {
        self.max_primary_distance * role.radius_factor()
    }

    /// Returns `true` if a city at `distance` can be served in `role`.
    pub fn covers(&self, distance: f64, role: Role) -> bool {
        distance <= self.max_distance(role)
    }
}
