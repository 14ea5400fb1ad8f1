pub mod builders;

pub use builders::DistributorBuilder;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use territory::permission::PermissionState;
use territory::registry::loader::read_locations;

/// US -> CA -> LA, SF; US -> NY -> NYC; US -> TX -> AUSTIN; IN -> TN -> CHENNAI.
/// Codes equal names so region paths can use either.
pub const LOCATIONS_CSV: &str = "\
City Code,Province Code,Country Code,City Name,Province Name,Country Name
LA,CA,US,LA,CA,US
SF,CA,US,SF,CA,US
NYC,NY,US,NYC,NY,US
AUSTIN,TX,US,Austin,TX,US
CHENNAI,TN,IN,Chennai,TN,IN
";

pub fn test_app() -> Router {
    let registry = read_locations(LOCATIONS_CSV.as_bytes()).expect("Failed to read fixture");
    territory::web::app(Arc::new(PermissionState::new(registry)))
}

/// Send one request through the router and decode the JSON body (Null if empty
/// or not JSON).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("Router failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub async fn create(app: &Router, distributor: &DistributorBuilder) -> (StatusCode, Value) {
    let request = Request::post("/distributor")
        .header("content-type", "application/json")
        .body(Body::from(distributor.body().to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn get(app: &Router, name: &str) -> (StatusCode, Value) {
    let request = Request::get(format!("/distributor/{name}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// `region` must already be URL-safe.
pub async fn check(app: &Router, name: &str, region: &str) -> (StatusCode, Value) {
    let request = Request::get(format!("/distributor/{name}/permission?region={region}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}
