use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::permission::tree::RegionTree;

// ---------- API request/response types ----------

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDistributorRequest {
    pub name: String,
    /// Name of an existing distributor whose regions bound this one.
    #[serde(default)]
    pub parent: Option<String>,
    /// e.g. "US", "CA-US", "LA-CA-US"
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DistributorResponse {
    pub name: String,
    pub locations: Arc<RegionTree>,
}

#[derive(Debug, Deserialize)]
pub struct CheckAccessQuery {
    /// Missing is treated like an empty region.
    #[serde(default)]
    pub region: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccessDecision {
    Yes,
    No,
}

impl From<bool> for AccessDecision {
    fn from(allowed: bool) -> Self {
        if allowed {
            AccessDecision::Yes
        } else {
            AccessDecision::No
        }
    }
}

impl fmt::Display for AccessDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessDecision::Yes => f.write_str("YES"),
            AccessDecision::No => f.write_str("NO"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckAccessResponse {
    pub name: String,
    pub region: String,
    pub access: AccessDecision,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults() {
        let req: CreateDistributorRequest =
            serde_json::from_str(r#"{ "name": "d1", "include": ["US"] }"#).unwrap();
        assert_eq!(req.name, "d1");
        assert!(req.parent.is_none());
        assert_eq!(req.include, vec!["US"]);
        assert!(req.exclude.is_empty());
    }

    #[test]
    fn test_access_decision_rendering() {
        assert_eq!(AccessDecision::from(true).to_string(), "YES");
        assert_eq!(AccessDecision::from(false).to_string(), "NO");
        assert_eq!(serde_json::to_value(AccessDecision::Yes).unwrap(), "YES");
        assert_eq!(serde_json::to_value(AccessDecision::No).unwrap(), "NO");
    }
}
