//! Pairwise location compatibility.

use crate::models::Location;

/// Symmetric relation telling which pairs of locations may host centers
/// at the same time.
///
/// Two distinct locations are compatible when they are at least
/// `min_separation` apart. A location is always compatible with itself.
///
/// # Examples
///
/// ```
/// use u_facility::models::Location;
/// use u_facility::distance::CompatibilityMatrix;
///
/// let locations = vec![
///     Location::new(0, 0.0, 0.0),
///     Location::new(1, 1.0, 0.0),
///     Location::new(2, 5.0, 0.0),
/// ];
/// let cm = CompatibilityMatrix::from_locations(&locations, 2.0);
/// assert!(!cm.compatible(0, 1));
/// assert!(cm.compatible(0, 2));
/// assert!(cm.compatible(1, 1));
/// ```
#[derive(Debug, Clone)]
pub struct CompatibilityMatrix {
    data: Vec<bool>,
    size: usize,
    min_separation: f64,
}

impl CompatibilityMatrix {
    /// Derives the relation from location coordinates.
    pub fn from_locations(locations: &[Location], min_separation: f64) -> Self {
        let size = locations.len();
        let mut data = vec![false; size * size];
        for a in locations {
            for b in locations {
                data[a.id() * size + b.id()] =
                    a.id() == b.id() || a.distance_to(b) >= min_separation;
            }
        }
        Self {
            data,
            size,
            min_separation,
        }
    }

    /// Returns `true` if centers may be open at `a` and `b` simultaneously.
    pub fn compatible(&self, a: usize, b: usize) -> bool {
        self.data[a * self.size + b]
    }

    /// Returns `true` if `location` is compatible with every location in `others`.
    pub fn compatible_with_all<I>(&self, location: usize, others: I) -> bool
    where
        I: IntoIterator<Item = usize>,
    {
        others
            .into_iter()
            .all(|other| self.compatible(location, other))
    }

    /// Number of unordered pairs of distinct, compatible locations.
    pub fn num_compatible_pairs(&self) -> usize {
        let mut count = 0;
        for a in 0..self.size {
            for b in (a + 1)..self.size {
                if self.compatible(a, b) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Minimum separation this relation was derived from.
    pub fn min_separation(&self) -> f64 {
        self.min_separation
    }

    /// Number of locations.
    pub fn size(&self) -> usize {
        self.size
    }
}
