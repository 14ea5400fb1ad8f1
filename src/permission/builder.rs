use crate::permission::errors::PermissionError;
use crate::permission::path::RegionPath;
use crate::permission::tree::RegionTree;
use crate::registry::LocationRegistry;

/// Expand `include` against the registry, then carve every `exclude` out of
/// the result. Excludes are applied only after all includes, whatever order the
/// lists were submitted in.
pub fn build(
    include: &[RegionPath],
    exclude: &[RegionPath],
    registry: &LocationRegistry,
) -> Result<RegionTree, PermissionError> {
    if include.is_empty() {
        return Err(PermissionError::EmptyIncludeSet);
    }

    let mut tree = RegionTree::new();
    for path in include {
        merge_include(&mut tree, path, registry)?;
    }
    for path in exclude {
        remove_exclude(&mut tree, path);
    }

    tracing::debug!(
        include = include.len(),
        exclude = exclude.len(),
        empty = tree.is_empty(),
        countries = tree.countries().count(),
        cities = tree.city_count(),
        "Built region tree"
    );

    Ok(tree)
}

/// Resolve one include path in the registry and copy the resolved subtree into
/// `tree`. Repeated and overlapping includes are harmless.
fn merge_include(
    tree: &mut RegionTree,
    path: &RegionPath,
    registry: &LocationRegistry,
) -> Result<(), PermissionError> {
    let country = registry.country(&path.country).ok_or_else(|| {
        PermissionError::UnknownRegion(format!("Country {} not found", path.country))
    })?;

    let Some(province_path) = &path.province else {
        tree.country_entry(&path.country, country).merge_all(country);
        return Ok(());
    };

    let province = country.province(&province_path.name).ok_or_else(|| {
        PermissionError::UnknownRegion(format!(
            "Province {} not found in country {}",
            province_path.name, path.country
        ))
    })?;

    let city = match &province_path.city {
        Some(city_name) => Some((
            city_name,
            province.city(city_name).ok_or_else(|| {
                PermissionError::UnknownRegion(format!(
                    "City {} not found in province {}, country {}",
                    city_name, province_path.name, path.country
                ))
            })?,
        )),
        None => None,
    };

    // Everything resolved; only now touch the tree.
    let grant = tree
        .country_entry(&path.country, country)
        .province_entry(&province_path.name, province);
    match city {
        Some((name, city)) => grant.insert_city(name, city),
        None => grant.merge_all(province),
    }

    Ok(())
}

/// Remove one exclude path from the tree built so far. Paths that are not in
/// the tree are ignored.
fn remove_exclude(tree: &mut RegionTree, path: &RegionPath) {
    let Some(province_path) = &path.province else {
        tree.remove_country(&path.country);
        return;
    };

    let Some(country) = tree.country_mut(&path.country) else {
        return;
    };

    match &province_path.city {
        None => {
            country.provinces.remove(&province_path.name);
        }
        Some(city) => {
            if let Some(province) = country.provinces.get_mut(&province_path.name) {
                province.cities.remove(city);
            }
        }
    }
}
