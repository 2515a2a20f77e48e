//! Raw input data and the immutable problem instance derived from it.

use serde::{Deserialize, Serialize};

use super::{City, FacilityType, Location, Role};
use crate::distance::{CompatibilityMatrix, DistanceMatrix};
use crate::error::InstanceError;

/// Instance fields as read from an input file.
///
/// Field names follow the input format (`nLocations`, `posCities`,
/// `d_city`, ...). Positions are `[x, y]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceData {
    pub n_locations: usize,
    pub n_cities: usize,
    pub n_types: usize,
    /// Population per city.
    pub p: Vec<f64>,
    pub pos_cities: Vec<[f64; 2]>,
    pub pos_locations: Vec<[f64; 2]>,
    /// Primary working distance per type.
    #[serde(rename = "d_city")]
    pub d_city: Vec<f64>,
    /// Capacity per type.
    pub cap: Vec<f64>,
    /// Installation cost per type.
    pub cost: Vec<f64>,
    /// Minimum separation between two open centers.
    #[serde(rename = "d_center")]
    pub d_center: f64,
}

impl InstanceData {
    /// Checks counts, array lengths and value ranges.
    ///
    /// Does not decide whether the instance admits a feasible solution;
    /// see [`Instance::check`] for that.
    pub fn validate(&self) -> Result<(), InstanceError> {
        positive("nLocations", self.n_locations)?;
        positive("nCities", self.n_cities)?;
        positive("nTypes", self.n_types)?;

        same_len("p", self.p.len(), "nCities", self.n_cities)?;
        same_len("posCities", self.pos_cities.len(), "nCities", self.n_cities)?;
        same_len(
            "posLocations",
            self.pos_locations.len(),
            "nLocations",
            self.n_locations,
        )?;
        same_len("d_city", self.d_city.len(), "nTypes", self.n_types)?;
        same_len("cap", self.cap.len(), "nTypes", self.n_types)?;
        same_len("cost", self.cost.len(), "nTypes", self.n_types)?;

        non_negative_all("p", &self.p)?;
        for (index, pos) in self.pos_cities.iter().enumerate() {
            non_negative_at("posCities", index, pos)?;
        }
        for (index, pos) in self.pos_locations.iter().enumerate() {
            non_negative_at("posLocations", index, pos)?;
        }
        non_negative_all("d_city", &self.d_city)?;
        non_negative_all("cap", &self.cap)?;
        non_negative_all("cost", &self.cost)?;

        if !self.d_center.is_finite() || self.d_center < 0.0 {
            return Err(InstanceError::Negative {
                field: "d_center",
                value: self.d_center,
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: usize) -> Result<(), InstanceError> {
    if value == 0 {
        return Err(InstanceError::NonPositive { field, value });
    }
    Ok(())
}

fn same_len(
    field: &'static str,
    len: usize,
    expected_field: &'static str,
    expected: usize,
) -> Result<(), InstanceError> {
    if len != expected {
        return Err(InstanceError::LengthMismatch {
            field,
            len,
            expected_field,
            expected,
        });
    }
    Ok(())
}

fn non_negative_at(field: &'static str, index: usize, values: &[f64]) -> Result<(), InstanceError> {
    match values.iter().find(|v| !v.is_finite() || **v < 0.0) {
        Some(&value) => Err(InstanceError::InvalidValue {
            field,
            index,
            value,
        }),
        None => Ok(()),
    }
}

fn non_negative_all(field: &'static str, values: &[f64]) -> Result<(), InstanceError> {
    for (index, &value) in values.iter().enumerate() {
        non_negative_at(field, index, &[value])?;
    }
    Ok(())
}

/// An immutable facility-location instance.
///
/// Holds cities, candidate locations, facility types, the city-to-location
/// distance table and the location compatibility relation. Built once from
/// validated [`InstanceData`] and shared by reference with every solution.
///
/// # Examples
///
/// ```
/// use u_facility::models::{Instance, InstanceData};
///
/// let data = InstanceData {
///     n_locations: 2,
///     n_cities: 1,
///     n_types: 1,
///     p: vec![100.0],
///     pos_cities: vec![[0.0, 0.0]],
///     pos_locations: vec![[1.0, 0.0], [0.0, 1.0]],
///     d_city: vec![2.0],
///     cap: vec![200.0],
///     cost: vec![10.0],
///     d_center: 1.0,
/// };
/// let instance = Instance::new(&data).unwrap();
/// assert_eq!(instance.num_cities(), 1);
/// assert!((instance.distance(0, 0) - 1.0).abs() < 1e-10);
/// assert!(instance.compatible(0, 1));
/// assert!(instance.check());
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    cities: Vec<City>,
    locations: Vec<Location>,
    types: Vec<FacilityType>,
    distances: DistanceMatrix,
    compatibility: CompatibilityMatrix,
}

impl Instance {
    /// Validates raw data and derives the instance from it.
    pub fn new(data: &InstanceData) -> Result<Self, InstanceError> {
        data.validate()?;

        let cities = data
            .p
            .iter()
            .zip(&data.pos_cities)
            .enumerate()
            .map(|(id, (&population, pos))| City::new(id, pos[0], pos[1], population))
            .collect();
        let locations = data
            .pos_locations
            .iter()
            .enumerate()
            .map(|(id, pos)| Location::new(id, pos[0], pos[1]))
            .collect();
        let types = (0..data.n_types)
            .map(|id| FacilityType::new(id, data.d_city[id], data.cap[id], data.cost[id]))
            .collect();

        Ok(Self::from_parts(cities, locations, types, data.d_center))
    }

    /// Builds an instance from already constructed parts.
    ///
    /// IDs must equal positions in their respective vectors.
    pub fn from_parts(
        cities: Vec<City>,
        locations: Vec<Location>,
        types: Vec<FacilityType>,
        min_separation: f64,
    ) -> Self {
        debug_assert!(cities.iter().enumerate().all(|(i, c)| c.id() == i));
        debug_assert!(locations.iter().enumerate().all(|(i, l)| l.id() == i));
        debug_assert!(types.iter().enumerate().all(|(i, t)| t.id() == i));

        let distances = DistanceMatrix::between(&cities, &locations);
        let compatibility = CompatibilityMatrix::from_locations(&locations, min_separation);
        Self {
            cities,
            locations,
            types,
            distances,
            compatibility,
        }
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn types(&self) -> &[FacilityType] {
        &self.types
    }

    pub fn city(&self, id: usize) -> &City {
        &self.cities[id]
    }

    pub fn location(&self, id: usize) -> &Location {
        &self.locations[id]
    }

    pub fn facility_type(&self, id: usize) -> &FacilityType {
        &self.types[id]
    }

    pub fn num_cities(&self) -> usize {
        self.cities.len()
    }

    pub fn num_locations(&self) -> usize {
        self.locations.len()
    }

    pub fn num_types(&self) -> usize {
        self.types.len()
    }

    /// Distance from a city to a candidate location.
    pub fn distance(&self, city: usize, location: usize) -> f64 {
        self.distances.get(city, location)
    }

    /// City-to-location distance table.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Returns `true` if centers may be open at both `a` and `b`.
    pub fn compatible(&self, a: usize, b: usize) -> bool {
        self.compatibility.compatible(a, b)
    }

    /// Location compatibility relation.
    pub fn compatibility(&self) -> &CompatibilityMatrix {
        &self.compatibility
    }

    /// Cheap necessary condition for feasibility.
    ///
    /// Every city must be reachable as primary from some location with a
    /// type whose capacity fits its population, and as secondary from a
    /// *different* location. Returns `false` if some city cannot be covered
    /// even in isolation.
    pub fn check(&self) -> bool {
        self.cities.iter().all(|city| {
            let primary = self.reachable_locations(city, Role::Primary);
            let secondary = self.reachable_locations(city, Role::Secondary);
            primary
                .iter()
                .any(|&lp| secondary.iter().any(|&ls| ls != lp))
        })
    }

    fn reachable_locations(&self, city: &City, role: Role) -> Vec<usize> {
        let load = city.load(role);
        self.locations
            .iter()
            .filter(|location| {
                let d = self.distance(city.id(), location.id());
                self.types
                    .iter()
                    .any(|t| t.covers(d, role) && load <= t.capacity())
            })
            .map(Location::id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> InstanceData {
        InstanceData {
            n_locations: 3,
            n_cities: 2,
            n_types: 2,
            p: vec![100.0, 50.0],
            pos_cities: vec![[0.0, 0.0], [4.0, 0.0]],
            pos_locations: vec![[1.0, 0.0], [3.0, 0.0], [2.0, 5.0]],
            d_city: vec![2.0, 6.0],
            cap: vec![120.0, 400.0],
            cost: vec![10.0, 25.0],
            d_center: 2.0,
        }
    }

    #[test]
    fn test_new_builds_parts() {
        let instance = Instance::new(&sample_data()).expect("valid");
        assert_eq!(instance.num_cities(), 2);
        assert_eq!(instance.num_locations(), 3);
        assert_eq!(instance.num_types(), 2);
        assert_eq!(instance.city(1).population(), 50.0);
        assert_eq!(instance.location(2).y(), 5.0);
        assert_eq!(instance.facility_type(1).cost(), 25.0);
        assert!((instance.distance(1, 1) - 1.0).abs() < 1e-10);
        assert!(instance.compatible(0, 1));
        assert_eq!(instance.distances().cols(), 3);
        assert_eq!(instance.compatibility().size(), 3);
    }

    #[test]
    fn test_check_feasible() {
        let instance = Instance::new(&sample_data()).expect("valid");
        assert!(instance.check());
    }

    #[test]
    fn test_check_single_location_is_infeasible() {
        let mut data = sample_data();
        data.n_locations = 1;
        data.pos_locations = vec![[1.0, 0.0]];
        let instance = Instance::new(&data).expect("valid");
        assert!(!instance.check());
    }

    #[test]
    fn test_check_population_exceeds_capacity() {
        let mut data = sample_data();
        data.p = vec![1000.0, 50.0];
        let instance = Instance::new(&data).expect("valid");
        assert!(!instance.check());
    }

    #[test]
    fn test_validate_non_positive_count() {
        let mut data = sample_data();
        data.n_types = 0;
        assert_eq!(
            data.validate(),
            Err(InstanceError::NonPositive {
                field: "nTypes",
                value: 0
            })
        );
    }

    #[test]
    fn test_validate_length_mismatch() {
        let mut data = sample_data();
        data.cap.pop();
        assert_eq!(
            data.validate(),
            Err(InstanceError::LengthMismatch {
                field: "cap",
                len: 1,
                expected_field: "nTypes",
                expected: 2,
            })
        );
    }

    #[test]
    fn test_validate_negative_values() {
        let mut data = sample_data();
        data.pos_locations[1] = [3.0, -1.0];
        assert_eq!(
            data.validate(),
            Err(InstanceError::InvalidValue {
                field: "posLocations",
                index: 1,
                value: -1.0,
            })
        );

        let mut data = sample_data();
        data.d_center = -0.5;
        assert!(matches!(
            data.validate(),
            Err(InstanceError::Negative {
                field: "d_center",
                ..
            })
        ));
    }

    #[test]
    fn test_deserialize_input_field_names() {
        let json = r#"{
            "nLocations": 2, "nCities": 1, "nTypes": 1,
            "p": [10],
            "posCities": [[0, 0]],
            "posLocations": [[1, 0], [0, 1]],
            "d_city": [3], "cap": [20], "cost": [5],
            "d_center": 1.0
        }"#;
        let data: InstanceData = serde_json::from_str(json).expect("valid json");
        assert_eq!(data.n_locations, 2);
        assert_eq!(data.d_city, vec![3.0]);
        assert_eq!(data.pos_locations[1], [0.0, 1.0]);
        assert!(Instance::new(&data).is_ok());
    }
}
