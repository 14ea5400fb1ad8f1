//! HTTP server bootstrap. Routes live in `permission::web`.
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Request};
use axum::middleware::{self, Next};
use axum::response::IntoResponse;
use axum::Router;
use miette::IntoDiagnostic;
use tower_http::trace::TraceLayer;

use crate::errors::TerritoryError;
use crate::permission::PermissionState;
use crate::settings::Settings;

// Security headers middleware
async fn security_headers(request: Request<Body>, next: Next) -> impl IntoResponse {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );
    headers.insert(
        HeaderName::from_static("cache-control"),
        HeaderValue::from_static("no-store"),
    );

    response
}

/// Full application router: permission routes plus the common layers.
pub fn app(state: Arc<PermissionState>) -> Router {
    crate::permission::web::router(state)
        .layer(middleware::from_fn(security_headers))
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(settings: Settings, state: PermissionState) -> miette::Result<()> {
    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .map_err(|e| miette::miette!("bad listen addr: {e}"))?;

    let router = app(Arc::new(state));

    tracing::info!(%addr, "Distributor permission API listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| TerritoryError::Bind {
            addr: addr.to_string(),
            source,
        })?;
    axum::serve(listener, router).await.into_diagnostic()?;
    Ok(())
}
