pub mod loader;

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

/// Leaf of the location hierarchy. Shared read-only between the registry and
/// every distributor tree that grants it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct City {
    pub code: String,
}

#[derive(Debug, Clone, Default)]
pub struct Province {
    pub code: String,
    /// city name -> city
    pub cities: HashMap<String, Arc<City>>,
}

#[derive(Debug, Clone, Default)]
pub struct Country {
    pub code: String,
    /// province name -> province
    pub provinces: HashMap<String, Province>,
}

/// Reference hierarchy of every known country, province and city, keyed by
/// canonical name at each level.
/// Immutable after construction; loaded once at startup.
#[derive(Debug, Default)]
pub struct LocationRegistry {
    countries: HashMap<String, Country>,
}

impl LocationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one city together with its province and country. Existing entries
    /// keep the code they were first registered with.
    pub fn insert(&mut self, row: LocationRow) {
        let country = self
            .countries
            .entry(row.country_name)
            .or_insert_with(|| Country {
                code: row.country_code,
                provinces: HashMap::new(),
            });

        let province = country
            .provinces
            .entry(row.province_name)
            .or_insert_with(|| Province {
                code: row.province_code,
                cities: HashMap::new(),
            });

        province
            .cities
            .entry(row.city_name)
            .or_insert_with(|| Arc::new(City {
                code: row.city_code,
            }));
    }

    pub fn country(&self, name: &str) -> Option<&Country> {
        self.countries.get(name)
    }

    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    pub fn province_count(&self) -> usize {
        self.countries.values().map(|c| c.provinces.len()).sum()
    }

    pub fn city_count(&self) -> usize {
        self.countries
            .values()
            .flat_map(|c| c.provinces.values())
            .map(|p| p.cities.len())
            .sum()
    }
}

impl Country {
    pub fn province(&self, name: &str) -> Option<&Province> {
        self.provinces.get(name)
    }
}

impl Province {
    pub fn city(&self, name: &str) -> Option<&Arc<City>> {
        self.cities.get(name)
    }
}

/// One canonicalized record of the location source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationRow {
    pub city_code: String,
    pub province_code: String,
    pub country_code: String,
    pub city_name: String,
    pub province_name: String,
    pub country_name: String,
}

impl LocationRow {
    /// Shorthand used where code and name coincide.
    pub fn named(city: &str, province: &str, country: &str) -> Self {
        Self {
            city_code: city.to_string(),
            province_code: province.to_string(),
            country_code: country.to_string(),
            city_name: city.to_string(),
            province_name: province.to_string(),
            country_name: country.to_string(),
        }
    }
}
