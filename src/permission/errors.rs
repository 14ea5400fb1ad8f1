use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use miette::Diagnostic;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum PermissionError {
    #[error("Invalid format: {0}")]
    #[diagnostic(
        code(territory::permission::invalid_format),
        help("Regions are written most-specific first: \"CITY-PROVINCE-COUNTRY\", \"PROVINCE-COUNTRY\" or \"COUNTRY\"")
    )]
    InvalidFormat(String),

    #[error("Distributor doesn't have access to any region to start with")]
    #[diagnostic(
        code(territory::permission::empty_include),
        help("Provide at least one region in `include`")
    )]
    EmptyIncludeSet,

    #[error("{0}")]
    #[diagnostic(
        code(territory::permission::unknown_region),
        help("Included regions must exist in the location registry")
    )]
    UnknownRegion(String),

    #[error("Region {region} is outside the authorized area of parent distributor {parent}")]
    #[diagnostic(
        code(territory::permission::out_of_parent_scope),
        help("A distributor can only include or exclude regions its parent is authorized for")
    )]
    OutOfParentScope { region: String, parent: String },

    #[error("Distributor {0} already exists")]
    #[diagnostic(code(territory::permission::already_exists))]
    AlreadyExists(String),

    #[error("Distributor {0} not found")]
    #[diagnostic(code(territory::permission::not_found))]
    NotFound(String),
}

impl PermissionError {
    /// Stable, machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            PermissionError::InvalidFormat(_) => "InvalidFormat",
            PermissionError::EmptyIncludeSet => "EmptyIncludeSet",
            PermissionError::UnknownRegion(_) => "UnknownRegion",
            PermissionError::OutOfParentScope { .. } => "OutOfParentScope",
            PermissionError::AlreadyExists(_) => "AlreadyExists",
            PermissionError::NotFound(_) => "NotFound",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            PermissionError::InvalidFormat(_)
            | PermissionError::EmptyIncludeSet
            | PermissionError::UnknownRegion(_)
            | PermissionError::OutOfParentScope { .. } => StatusCode::BAD_REQUEST,
            PermissionError::NotFound(_) => StatusCode::NOT_FOUND,
            PermissionError::AlreadyExists(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for PermissionError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({
            "error": {
                "kind": self.kind(),
                "code": status.as_u16(),
                "reason": self.to_string(),
            }
        });
        (status, Json(body)).into_response()
    }
}
