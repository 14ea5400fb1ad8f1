use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::permission::errors::PermissionError;
use crate::permission::tree::RegionTree;

/// Read-only view of the stored trees, handed to the builder closure of
/// [`DistributorStore::create_with`] while the write lock is held.
pub struct Distributors<'a> {
    inner: &'a HashMap<String, Arc<RegionTree>>,
}

impl Distributors<'_> {
    pub fn get(&self, name: &str) -> Result<&RegionTree, PermissionError> {
        self.inner
            .get(name)
            .map(|t| t.as_ref())
            .ok_or_else(|| PermissionError::NotFound(name.to_string()))
    }
}

/// Distributor name -> authorized region tree.
///
/// Reads share the lock. A create holds the write lock from the duplicate check
/// until the finished tree is installed, so readers never see a partial tree
/// and creates never interleave.
#[derive(Debug, Default)]
pub struct DistributorStore {
    distributors: RwLock<HashMap<String, Arc<RegionTree>>>,
}

impl DistributorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the tree produced by `build` under `name`.
    /// Fails with `AlreadyExists` before `build` runs if the name is taken;
    /// nothing is stored if `build` fails.
    pub fn create_with<F>(&self, name: &str, build: F) -> Result<Arc<RegionTree>, PermissionError>
    where
        F: FnOnce(&Distributors<'_>) -> Result<RegionTree, PermissionError>,
    {
        let mut distributors = self.distributors.write();
        if distributors.contains_key(name) {
            return Err(PermissionError::AlreadyExists(name.to_string()));
        }

        let tree = Arc::new(build(&Distributors {
            inner: &*distributors,
        })?);
        distributors.insert(name.to_string(), Arc::clone(&tree));
        Ok(tree)
    }

    pub fn get(&self, name: &str) -> Result<Arc<RegionTree>, PermissionError> {
        self.distributors
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| PermissionError::NotFound(name.to_string()))
    }

    /// Run `f` against the stored tree while holding the read lock.
    pub fn with_tree<T>(
        &self,
        name: &str,
        f: impl FnOnce(&RegionTree) -> T,
    ) -> Result<T, PermissionError> {
        let distributors = self.distributors.read();
        let tree = distributors
            .get(name)
            .ok_or_else(|| PermissionError::NotFound(name.to_string()))?;
        Ok(f(tree))
    }

    pub fn len(&self) -> usize {
        self.distributors.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
