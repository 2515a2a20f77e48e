//! Candidate sites and demand points.

/// A candidate site where a facility may be installed.
///
/// # Examples
///
/// ```
/// use u_facility::models::Location;
///
/// let a = Location::new(0, 0.0, 0.0);
/// let b = Location::new(1, 3.0, 4.0);
/// assert_eq!(b.id(), 1);
/// assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    id: usize,
    x: f64,
    y: f64,
}

impl Location {
    /// Creates a new location.
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Location ID (index into the instance's location list).
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to another location.
    pub fn distance_to(&self, other: &Location) -> f64 {
        euclidean(self.x, self.y, other.x, other.y)
    }
}

/// A demand point with a population to be covered twice: once by a
/// primary center and once by a secondary (backup) center.
///
/// # Examples
///
/// ```
/// use u_facility::models::{City, Location, Role};
///
/// let c = City::new(0, 0.0, 0.0, 100.0);
/// assert_eq!(c.load(Role::Primary), 100.0);
/// assert!((c.load(Role::Secondary) - 10.0).abs() < 1e-10);
/// assert!((c.distance_to(&Location::new(0, 0.0, 2.0)) - 2.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    id: usize,
    x: f64,
    y: f64,
    population: f64,
}

impl City {
    /// Creates a new city.
    pub fn new(id: usize, x: f64, y: f64, population: f64) -> Self {
        Self {
            id,
            x,
            y,
            population,
        }
    }

    /// City ID (index into the instance's city list).
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Population living at this city.
    pub fn population(&self) -> f64 {
        self.population
    }

    /// Weighted population load this city puts on a center serving it in `role`.
    pub fn load(&self, role: super::Role) -> f64 {
        self.population * role.load_factor()
    }

    /// Euclidean distance to a candidate site.
    pub fn distance_to(&self, location: &Location) -> f64 {
        euclidean(self.x, self.y, location.x(), location.y())
    }
}

fn euclidean(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x1 - x2;
    let dy = y1 - y2;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_location_new() {
        let l = Location::new(3, 1.5, 2.5);
        assert_eq!(l.id(), 3);
        assert_eq!(l.x(), 1.5);
        assert_eq!(l.y(), 2.5);
    }

    #[test]
    fn test_location_distance_symmetric() {
        let a = Location::new(0, 1.0, 2.0);
        let b = Location::new(1, 4.0, 6.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-10);
    }

    #[test]
    fn test_city_loads() {
        let c = City::new(2, 0.0, 0.0, 250.0);
        assert_eq!(c.id(), 2);
        assert_eq!(c.population(), 250.0);
        assert_eq!(c.load(Role::Primary), 250.0);
        assert!((c.load(Role::Secondary) - 25.0).abs() < 1e-10);
    }

    #[test]
    fn test_city_distance_to_location() {
        let c = City::new(0, 3.0, 0.0, 1.0);
        let l = Location::new(0, 0.0, 4.0);
        assert!((c.distance_to(&l) - 5.0).abs() < 1e-10);
    }
}
