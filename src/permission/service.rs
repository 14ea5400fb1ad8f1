use crate::permission::builder;
use crate::permission::engine::{is_authorized, validate_within_parent};
use crate::permission::errors::PermissionError;
use crate::permission::path::{canonicalize, parse_all, RegionPath};
use crate::permission::types::{
    AccessDecision, CheckAccessResponse, CreateDistributorRequest, DistributorResponse,
};
use crate::permission::PermissionState;

/// Create a distributor from `request` and return its authorized regions.
///
/// All paths are parsed before the store is locked; the parent check, the
/// build and the install then happen under a single write lock.
pub fn create(
    state: &PermissionState,
    request: &CreateDistributorRequest,
) -> Result<DistributorResponse, PermissionError> {
    let name = canonicalize(&request.name);
    if name.is_empty() {
        return Err(PermissionError::InvalidFormat("Invalid Name".into()));
    }

    let parent = match &request.parent {
        Some(raw) => {
            let parent = canonicalize(raw);
            if parent.is_empty() {
                return Err(PermissionError::InvalidFormat("Invalid Parent Name".into()));
            }
            Some(parent)
        }
        None => None,
    };

    let include = parse_all(&request.include)?;
    let exclude = parse_all(&request.exclude)?;

    let tree = state.store.create_with(&name, |distributors| {
        if let Some(parent) = &parent {
            let parent_tree = distributors.get(parent)?;
            validate_within_parent(include.iter().chain(&exclude), parent, parent_tree)?;
        }
        builder::build(&include, &exclude, &state.registry)
    });

    match &tree {
        Ok(tree) => tracing::info!(
            distributor = %name,
            parent = parent.as_deref(),
            countries = tree.countries().count(),
            cities = tree.city_count(),
            "Created distributor"
        ),
        Err(e) => tracing::info!(
            distributor = %name,
            parent = parent.as_deref(),
            kind = e.kind(),
            error = %e,
            "Rejected distributor"
        ),
    }

    Ok(DistributorResponse {
        name,
        locations: tree?,
    })
}

pub fn get(state: &PermissionState, name: &str) -> Result<DistributorResponse, PermissionError> {
    let name = canonicalize(name);
    let locations = state.store.get(&name)?;
    Ok(DistributorResponse { name, locations })
}

/// Answer whether distributor `name` may operate in `region`.
/// An unknown distributor is reported before the region is parsed; the answer
/// echoes the canonical form of both.
pub fn check_access(
    state: &PermissionState,
    name: &str,
    region: &str,
) -> Result<CheckAccessResponse, PermissionError> {
    let name = canonicalize(name);
    let (path, access) = state.store.with_tree(&name, |tree| -> Result<_, PermissionError> {
        let path = RegionPath::parse(region)?;
        let access = AccessDecision::from(is_authorized(tree, &path));
        Ok((path, access))
    })??;
    tracing::debug!(distributor = %name, region = %path, %access, "Checked access");

    Ok(CheckAccessResponse {
        name,
        region: path.to_string(),
        access,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{LocationRegistry, LocationRow};

    fn make_state() -> PermissionState {
        let mut registry = LocationRegistry::new();
        registry.insert(LocationRow::named("LA", "CA", "US"));
        registry.insert(LocationRow::named("NYC", "NY", "US"));
        registry.insert(LocationRow::named("AUSTIN", "TX", "US"));
        PermissionState::new(registry)
    }

    fn request(name: &str, parent: Option<&str>, include: &[&str], exclude: &[&str]) -> CreateDistributorRequest {
        CreateDistributorRequest {
            name: name.to_string(),
            parent: parent.map(str::to_string),
            include: include.iter().map(|s| s.to_string()).collect(),
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_create_canonicalizes_name() {
        let state = make_state();
        let resp = create(&state, &request("  d1 ", None, &["us"], &[])).unwrap();
        assert_eq!(resp.name, "D1");
        assert!(get(&state, "d1").is_ok());
    }

    #[test]
    fn test_create_rejects_blank_names() {
        let state = make_state();
        let err = create(&state, &request("   ", None, &["US"], &[])).unwrap_err();
        assert_eq!(err.kind(), "InvalidFormat");
        let err = create(&state, &request("D1", Some(" "), &["US"], &[])).unwrap_err();
        assert_eq!(err.kind(), "InvalidFormat");
    }

    #[test]
    fn test_create_duplicate_is_case_insensitive() {
        let state = make_state();
        create(&state, &request("Acme", None, &["US"], &[])).unwrap();
        let err = create(&state, &request(" ACME ", None, &["CA-US"], &[])).unwrap_err();
        assert_eq!(err, PermissionError::AlreadyExists("ACME".into()));
    }

    #[test]
    fn test_create_with_unknown_parent() {
        let state = make_state();
        let err = create(&state, &request("D2", Some("ghost"), &["US"], &[])).unwrap_err();
        assert_eq!(err, PermissionError::NotFound("GHOST".into()));
        assert!(state.store.is_empty());
    }

    #[test]
    fn test_parent_scope_covers_excludes() {
        let state = make_state();
        create(&state, &request("D1", None, &["US"], &["TX-US"])).unwrap();

        let err = create(&state, &request("D2", Some("d1"), &["CA-US"], &["AUSTIN-TX-US"])).unwrap_err();
        assert_eq!(
            err,
            PermissionError::OutOfParentScope {
                region: "AUSTIN-TX-US".into(),
                parent: "D1".into(),
            }
        );
        assert!(get(&state, "D2").is_err());
    }

    #[test]
    fn test_invalid_path_rejected_before_anything_is_stored() {
        let state = make_state();
        let err = create(&state, &request("D1", None, &["US", "A-B-C-D"], &[])).unwrap_err();
        assert_eq!(err.kind(), "InvalidFormat");
        let err = create(&state, &request("D1", None, &["US"], &[""])).unwrap_err();
        assert_eq!(err.kind(), "InvalidFormat");
        assert!(state.store.is_empty());
    }

    #[test]
    fn test_check_access() {
        let state = make_state();
        create(&state, &request("D1", None, &["US"], &["TX-US"])).unwrap();

        assert_eq!(check_access(&state, "d1", "la-ca-us").unwrap().access, AccessDecision::Yes);
        assert_eq!(check_access(&state, "D1", "TX-US").unwrap().access, AccessDecision::No);
        assert_eq!(
            check_access(&state, "D9", "US").unwrap_err(),
            PermissionError::NotFound("D9".into())
        );
        assert_eq!(check_access(&state, "D1", "A-B-C-D").unwrap_err().kind(), "InvalidFormat");
        assert_eq!(check_access(&state, "D1", "").unwrap_err().kind(), "InvalidFormat");
    }

    #[test]
    fn test_check_access_echoes_canonical_path() {
        let state = make_state();
        create(&state, &request("D1", None, &["US"], &[])).unwrap();

        let resp = check_access(&state, " d1 ", " la - ca - us ").unwrap();
        assert_eq!(resp.name, "D1");
        assert_eq!(resp.region, "LA-CA-US");
        assert_eq!(resp.access, AccessDecision::Yes);
    }

    #[test]
    fn test_unknown_distributor_wins_over_bad_region() {
        let state = make_state();
        let err = check_access(&state, "D9", "A-B-C-D").unwrap_err();
        assert_eq!(err.kind(), "NotFound");
    }
}
