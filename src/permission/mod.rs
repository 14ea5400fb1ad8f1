pub mod builder;
pub mod engine;
pub mod errors;
pub mod path;
pub mod service;
pub mod store;
pub mod tree;
pub mod types;
pub mod web;

use std::sync::Arc;

use crate::registry::LocationRegistry;
use store::DistributorStore;

/// Everything the permission handlers share: the immutable location registry
/// and the distributor store. Built once at startup and passed around by `Arc`.
#[derive(Debug)]
pub struct PermissionState {
    pub registry: Arc<LocationRegistry>,
    pub store: DistributorStore,
}

impl PermissionState {
    pub fn new(registry: LocationRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            store: DistributorStore::new(),
        }
    }
}
