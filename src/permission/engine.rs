use crate::permission::errors::PermissionError;
use crate::permission::path::RegionPath;
use crate::permission::tree::RegionTree;

/// Check if `path` is authorized in `tree`.
///
/// Only key presence along the path is tested: a country or province whose
/// children were all excluded still counts as authorized at its own level.
pub fn is_authorized(tree: &RegionTree, path: &RegionPath) -> bool {
    let Some(country) = tree.country(&path.country) else {
        return false;
    };

    let Some(province_path) = &path.province else {
        return true;
    };
    let Some(province) = country.province(&province_path.name) else {
        return false;
    };

    match &province_path.city {
        Some(city) => province.city(city).is_some(),
        None => true,
    }
}

/// Require every path a child distributor names (includes and excludes alike)
/// to lie within its parent's authorized tree.
pub fn validate_within_parent<'a>(
    paths: impl IntoIterator<Item = &'a RegionPath>,
    parent_name: &str,
    parent_tree: &RegionTree,
) -> Result<(), PermissionError> {
    for path in paths {
        if !is_authorized(parent_tree, path) {
            tracing::debug!(
                region = %path,
                parent = parent_name,
                "Region outside parent scope"
            );
            return Err(PermissionError::OutOfParentScope {
                region: path.to_string(),
                parent: parent_name.to_string(),
            });
        }
    }
    Ok(())
}
