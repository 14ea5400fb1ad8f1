use std::fmt;

use crate::permission::errors::PermissionError;

/// Separator between the segments of a region path.
pub const SEPARATOR: char = '-';

/// Trim surrounding whitespace and upper-case. Applied to every name before it
/// is compared, stored or hashed.
pub fn canonicalize(s: &str) -> String {
    s.trim().to_uppercase()
}

/// A canonical country, optionally narrowed to a province, optionally narrowed
/// to a city.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionPath {
    pub country: String,
    pub province: Option<ProvincePath>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProvincePath {
    pub name: String,
    pub city: Option<String>,
}

impl RegionPath {
    pub fn country(country: &str) -> Self {
        Self {
            country: canonicalize(country),
            province: None,
        }
    }

    pub fn province(province: &str, country: &str) -> Self {
        Self {
            country: canonicalize(country),
            province: Some(ProvincePath {
                name: canonicalize(province),
                city: None,
            }),
        }
    }

    pub fn city(city: &str, province: &str, country: &str) -> Self {
        Self {
            country: canonicalize(country),
            province: Some(ProvincePath {
                name: canonicalize(province),
                city: Some(canonicalize(city)),
            }),
        }
    }

    /// Parse "CITY-PROVINCE-COUNTRY", "PROVINCE-COUNTRY" or "COUNTRY".
    /// Purely syntactic: nothing is checked against the registry here.
    pub fn parse(raw: &str) -> Result<Self, PermissionError> {
        if raw.trim().is_empty() {
            return Err(PermissionError::InvalidFormat(
                "region must not be empty".into(),
            ));
        }

        let segments: Vec<String> = raw.split(SEPARATOR).map(canonicalize).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(PermissionError::InvalidFormat(format!(
                "region `{raw}` contains an empty segment"
            )));
        }

        match segments.as_slice() {
            [country] => Ok(Self::country(country)),
            [province, country] => Ok(Self::province(province, country)),
            [city, province, country] => Ok(Self::city(city, province, country)),
            _ => Err(PermissionError::InvalidFormat(format!(
                "region `{raw}` has {} segments (expected 1 to 3)",
                segments.len()
            ))),
        }
    }

    pub fn province_name(&self) -> Option<&str> {
        self.province.as_ref().map(|p| p.name.as_str())
    }

    pub fn city_name(&self) -> Option<&str> {
        self.province.as_ref().and_then(|p| p.city.as_deref())
    }
}

impl fmt::Display for RegionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(province) = &self.province {
            if let Some(city) = &province.city {
                write!(f, "{city}{SEPARATOR}")?;
            }
            write!(f, "{}{SEPARATOR}", province.name)?;
        }
        write!(f, "{}", self.country)
    }
}

/// Parse every entry of a submitted path list.
pub fn parse_all(raw: &[String]) -> Result<Vec<RegionPath>, PermissionError> {
    raw.iter().map(|r| RegionPath::parse(r)).collect()
}
