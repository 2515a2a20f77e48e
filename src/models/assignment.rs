//! Candidate assignments produced during construction.

use std::fmt;

use super::Role;

/// A proposed `(city, location, type, role)` tuple together with the total
/// solution cost that applying it would produce.
///
/// Only used while searching; never stored in a solution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assignment {
    /// City to serve.
    pub city: usize,
    /// Location hosting the center.
    pub location: usize,
    /// Facility type the location would have afterwards.
    pub facility_type: usize,
    /// Role the center plays for the city.
    pub role: Role,
    /// Total solution cost after applying this assignment.
    pub cost: f64,
}

impl Assignment {
    /// Creates a new candidate assignment.
    pub fn new(city: usize, location: usize, facility_type: usize, role: Role, cost: f64) -> Self {
        Self {
            city,
            location,
            facility_type,
            role,
            cost,
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<c_{}, l_{}, t_{}, {}>: cost {:.2}",
            self.city, self.location, self.facility_type, self.role, self.cost
        )
    }
}
