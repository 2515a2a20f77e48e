//! Dense city-to-location distance table.

use crate::models::{City, Location};

/// A dense `rows × cols` distance table stored in row-major order.
///
/// Rows are cities and columns are candidate locations; entries are
/// Euclidean distances computed from coordinates.
///
/// # Examples
///
/// ```
/// use u_facility::models::{City, Location};
/// use u_facility::distance::DistanceMatrix;
///
/// let cities = vec![City::new(0, 0.0, 0.0, 10.0)];
/// let locations = vec![Location::new(0, 3.0, 4.0), Location::new(1, 0.0, 1.0)];
/// let dm = DistanceMatrix::between(&cities, &locations);
/// assert!((dm.get(0, 0) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.rows(), 1);
/// assert_eq!(dm.cols(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl DistanceMatrix {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Computes Euclidean distances from every city to every location.
    pub fn between(cities: &[City], locations: &[Location]) -> Self {
        let mut dm = Self::new(cities.len(), locations.len());
        for city in cities {
            for location in locations {
                dm.set(city.id(), location.id(), city.distance_to(location));
            }
        }
        dm
    }

    /// Returns the distance from city `city` to location `location`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, city: usize, location: usize) -> f64 {
        self.data[city * self.cols + location]
    }

    fn set(&mut self, city: usize, location: usize, distance: f64) {
        self.data[city * self.cols + location] = distance;
    }

    /// Number of cities (rows).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of locations (columns).
    pub fn cols(&self) -> usize {
        self.cols
    }
}
