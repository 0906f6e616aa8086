//! # Mock Upstream Services
//!
//! One local axum server standing in for both collaborators:
//!
//! - `GET /api/providers` and `GET /api/providers/:id` (directory)
//! - `GET /geo/:ip` (ipinfo-style geolocation)
//!
//! Every geolocation hit is logged so tests can count outbound lookups.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Configurable fake of the directory and geolocation APIs.
#[derive(Default)]
pub struct MockUpstream {
    providers: Vec<Value>,
    locations: HashMap<String, String>,
    slow: HashMap<String, Duration>,
    directory_status: Option<StatusCode>,
    geo_hits: Mutex<Vec<String>>,
}

impl MockUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider record as the directory would publish it.
    pub fn with_provider(mut self, id: &str, ips: &[&str], min: u64, max: u64) -> Self {
        let addresses: Vec<String> = ips.iter().map(|ip| format!("/ip4/{ip}/tcp/24001")).collect();
        self.providers.push(json!({
            "id": id,
            "address": format!("{id}-owner"),
            "peer_id": format!("12D3KooW{id}"),
            "min_piece_size_bytes": min.to_string(),
            "max_piece_size_bytes": max.to_string(),
            "price_attofil": "0",
            "multiaddrs": {"addresses": addresses},
            "raw_power_bytes": "1125899906842624",
        }));
        self
    }

    /// Answer lookups of `ip` with an ipinfo `loc` string.
    pub fn with_location(mut self, ip: &str, latitude: f64, longitude: f64) -> Self {
        self.locations
            .insert(ip.to_string(), format!("{latitude},{longitude}"));
        self
    }

    /// Delay lookups of `ip`.
    pub fn with_slow_lookup(mut self, ip: &str, delay: Duration) -> Self {
        self.slow.insert(ip.to_string(), delay);
        self
    }

    /// Make every directory call fail with `status`.
    pub fn with_directory_status(mut self, status: StatusCode) -> Self {
        self.directory_status = Some(status);
        self
    }

    pub fn geo_hits(&self) -> Vec<String> {
        self.geo_hits.lock().clone()
    }

    /// Serve on an ephemeral port until the returned handle is dropped.
    pub async fn spawn(self) -> RunningUpstream {
        let state = Arc::new(self);
        let router = Router::new()
            .route("/api/providers", get(list_providers))
            .route("/api/providers/:id", get(get_provider))
            .route("/geo/:ip", get(locate))
            .with_state(Arc::clone(&state));

        let (addr, shutdown) = serve(router).await;
        RunningUpstream {
            addr,
            state,
            _shutdown: shutdown,
        }
    }
}

/// A running mock upstream.
pub struct RunningUpstream {
    pub addr: SocketAddr,
    pub state: Arc<MockUpstream>,
    _shutdown: oneshot::Sender<()>,
}

impl RunningUpstream {
    pub fn directory_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn geolocation_template(&self) -> String {
        format!("http://{}/geo/{{ip}}", self.addr)
    }
}

/// Serve `router` on 127.0.0.1 with an OS-assigned port. Dropping the
/// returned sender stops the server.
pub async fn serve(router: Router) -> (SocketAddr, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = rx.await;
            })
            .await;
    });
    (addr, tx)
}

async fn list_providers(State(state): State<Arc<MockUpstream>>) -> Response {
    if let Some(status) = state.directory_status {
        return (status, "directory unavailable").into_response();
    }
    Json(json!({ "storageProviders": state.providers })).into_response()
}

async fn get_provider(
    State(state): State<Arc<MockUpstream>>,
    Path(id): Path<String>,
) -> Response {
    if let Some(status) = state.directory_status {
        return (status, "directory unavailable").into_response();
    }
    match state.providers.iter().find(|p| p["id"] == id.as_str()) {
        Some(record) => Json(json!({ "0": record })).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn locate(State(state): State<Arc<MockUpstream>>, Path(ip): Path<String>) -> Response {
    state.geo_hits.lock().push(ip.clone());

    if let Some(delay) = state.slow.get(&ip) {
        tokio::time::sleep(*delay).await;
    }

    match state.locations.get(&ip) {
        Some(loc) => Json(json!({ "ip": ip, "loc": loc })).into_response(),
        None => Json(json!({ "ip": ip, "bogon": true })).into_response(),
    }
}
