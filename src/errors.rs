use miette::Diagnostic;
use thiserror::Error;

use crate::registry::loader::LoadError;

/// Failures that stop the service from starting.
#[derive(Debug, Error, Diagnostic)]
pub enum TerritoryError {
    #[error("Failed to bind {addr}")]
    #[diagnostic(
        code(territory::bind),
        help("Check that the port is free, or change `server.port` / TERRITORY__SERVER__PORT")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Locations(#[from] LoadError),
}
