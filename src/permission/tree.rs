use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::registry::{City, Country, Province};

/// Materialized set of regions a single distributor may operate in.
///
/// The containers belong to this tree alone; city leaves are shared with the
/// location registry and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RegionTree {
    countries: BTreeMap<String, CountryGrant>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CountryGrant {
    pub code: String,
    pub provinces: BTreeMap<String, ProvinceGrant>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProvinceGrant {
    pub code: String,
    pub cities: BTreeMap<String, Arc<City>>,
}

impl RegionTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn countries(&self) -> impl Iterator<Item = (&String, &CountryGrant)> {
        self.countries.iter()
    }

    pub fn country(&self, name: &str) -> Option<&CountryGrant> {
        self.countries.get(name)
    }

    /// Entry for `name`, created empty with the registry's code if missing.
    pub(crate) fn country_entry(&mut self, name: &str, source: &Country) -> &mut CountryGrant {
        self.countries
            .entry(name.to_string())
            .or_insert_with(|| CountryGrant {
                code: source.code.clone(),
                provinces: BTreeMap::new(),
            })
    }

    pub(crate) fn country_mut(&mut self, name: &str) -> Option<&mut CountryGrant> {
        self.countries.get_mut(name)
    }

    pub(crate) fn remove_country(&mut self, name: &str) -> bool {
        self.countries.remove(name).is_some()
    }

    pub fn city_count(&self) -> usize {
        self.countries
            .values()
            .flat_map(|c| c.provinces.values())
            .map(|p| p.cities.len())
            .sum()
    }
}

impl CountryGrant {
    pub fn province(&self, name: &str) -> Option<&ProvinceGrant> {
        self.provinces.get(name)
    }

    pub(crate) fn province_entry(&mut self, name: &str, source: &Province) -> &mut ProvinceGrant {
        self.provinces
            .entry(name.to_string())
            .or_insert_with(|| ProvinceGrant {
                code: source.code.clone(),
                cities: BTreeMap::new(),
            })
    }

    /// Add every province and city of `source`, keeping what is already there.
    pub(crate) fn merge_all(&mut self, source: &Country) {
        for (name, province) in &source.provinces {
            self.province_entry(name, province).merge_all(province);
        }
    }
}

impl ProvinceGrant {
    pub fn city(&self, name: &str) -> Option<&Arc<City>> {
        self.cities.get(name)
    }

    pub(crate) fn merge_all(&mut self, source: &Province) {
        for (name, city) in &source.cities {
            self.insert_city(name, city);
        }
    }

    pub(crate) fn insert_city(&mut self, name: &str, city: &Arc<City>) {
        self.cities
            .entry(name.to_string())
            .or_insert_with(|| Arc::clone(city));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{LocationRegistry, LocationRow};

    #[test]
    fn test_merge_shares_city_leaves() {
        let mut registry = LocationRegistry::new();
        registry.insert(LocationRow::named("LA", "CA", "US"));
        let us = registry.country("US").unwrap();

        let mut tree = RegionTree::new();
        tree.country_entry("US", us).merge_all(us);

        let shared = tree.country("US").unwrap().province("CA").unwrap().city("LA").unwrap();
        let original = us.province("CA").unwrap().city("LA").unwrap();
        assert!(Arc::ptr_eq(shared, original));
        assert_eq!(tree.city_count(), 1);
    }

    #[test]
    fn test_serializes_as_nested_maps() {
        let mut registry = LocationRegistry::new();
        registry.insert(LocationRow {
            city_code: "LAX".into(),
            province_code: "CA".into(),
            country_code: "US".into(),
            city_name: "LOS ANGELES".into(),
            province_name: "CALIFORNIA".into(),
            country_name: "UNITED STATES".into(),
        });
        let us = registry.country("UNITED STATES").unwrap();

        let mut tree = RegionTree::new();
        tree.country_entry("UNITED STATES", us).merge_all(us);

        let value = serde_json::to_value(&tree).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "UNITED STATES": {
                    "code": "US",
                    "provinces": {
                        "CALIFORNIA": {
                            "code": "CA",
                            "cities": { "LOS ANGELES": { "code": "LAX" } }
                        }
                    }
                }
            })
        );
    }
}
