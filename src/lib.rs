//! Territory - hierarchical region permissions for distributors
//!
//! Distributors are granted countries, provinces and cities from a fixed
//! location registry, optionally bounded by a parent distributor, and queried
//! with partial region paths. All modules are exposed for testing purposes.

pub mod errors;
pub mod permission;
pub mod registry;
pub mod settings;
pub mod web;
