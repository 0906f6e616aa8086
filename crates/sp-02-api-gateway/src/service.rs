//! API Gateway service - HTTP entry point for provider selection.
//!
//! Routes:
//! - `GET /api/providers?size_bytes=N[&source_ip=A]`
//! - `GET /api/provider/info?addr=ID`
//! - `GET /health`

use crate::domain::{
    ApiError, ApiResult, GatewayConfig, GatewayError, ProviderInfoQuery, ProvidersQuery,
};
use crate::middleware::{create_cors_layer, TracingLayer};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::Uri,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use sp_01_provider_selection::{ProviderRecord, ProviderSelectionApi, SelectionError};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tracing::{debug, info, warn};

/// API Gateway service state
pub struct ApiGatewayService {
    config: GatewayConfig,
    api: Arc<dyn ProviderSelectionApi>,
}

impl ApiGatewayService {
    /// Create a new API Gateway service
    pub fn new(
        config: GatewayConfig,
        api: Arc<dyn ProviderSelectionApi>,
    ) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        Ok(Self { config, api })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Build the HTTP router with its middleware stack
    pub fn router(&self) -> Router {
        let state = AppState {
            api: Arc::clone(&self.api),
            request_timeout: self.config.request_timeout,
        };

        let mut router = Router::new()
            .route("/api/providers", get(select_provider))
            .route("/api/provider/info", get(provider_info))
            .route("/health", get(health_check))
            .fallback(route_not_found)
            .with_state(state);

        if let Some(cors) = create_cors_layer(&self.config.cors) {
            router = router.layer(cors);
        }

        router.layer(ServiceBuilder::new().layer(TracingLayer::new()))
    }

    /// Bind the configured address and serve until `shutdown` resolves
    pub async fn start<F>(self, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.http_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{addr}: {e}")))?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener
            .local_addr()
            .map_err(|e| GatewayError::Bind(e.to_string()))?;
        info!(addr = %addr, "Starting HTTP server");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| GatewayError::Serve(e.to_string()))?;

        info!("API Gateway stopped");
        Ok(())
    }
}

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    api: Arc<dyn ProviderSelectionApi>,
    request_timeout: Duration,
}

/// Run one selection call under the request deadline. A missed deadline is
/// answered with the JSON error body like any other server-side failure.
async fn within_deadline<T, F>(deadline: Duration, call: F) -> ApiResult<T>
where
    F: Future<Output = Result<T, SelectionError>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(_) => {
            warn!(timeout = ?deadline, "request deadline exceeded");
            Err(ApiError::internal(format!(
                "request did not complete within {deadline:?}"
            )))
        }
    }
}

/// `GET /api/providers`
async fn select_provider(
    State(state): State<AppState>,
    query: Result<Query<ProvidersQuery>, QueryRejection>,
) -> ApiResult<Json<ProviderRecord>> {
    let Query(query) = query.map_err(|e| ApiError::invalid_request(e.body_text()))?;
    let request = query.into_request()?;
    debug!(
        size_bytes = request.size_bytes,
        origin = ?request.origin.as_ref().map(|o| o.as_str()),
        "selecting provider"
    );

    let chosen =
        within_deadline(state.request_timeout, state.api.select_provider(request)).await?;
    Ok(Json(chosen.into_record()))
}

/// `GET /api/provider/info`
async fn provider_info(
    State(state): State<AppState>,
    query: Result<Query<ProviderInfoQuery>, QueryRejection>,
) -> ApiResult<Json<ProviderRecord>> {
    let Query(query) = query.map_err(|e| ApiError::invalid_request(e.body_text()))?;
    let provider_id = query.provider_id()?;
    let record =
        within_deadline(state.request_timeout, state.api.provider_info(provider_id)).await?;
    Ok(Json(record))
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "provider-locator",
        "version": crate::VERSION
    }))
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("no route for {}", uri.path()))
}
