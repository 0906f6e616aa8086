//! # End-to-End Flows
//!
//! The real stack over real sockets:
//!
//! ```text
//! reqwest ──→ ApiGatewayService ──→ ProviderSelectionService
//!                                        │            │
//!                          HttpProviderDirectory  HttpGeolocator
//!                                        │            │
//!                                        └── MockUpstream ──┘
//! ```

#[cfg(test)]
mod tests {
    use super::super::upstream::{serve, MockUpstream, RunningUpstream};
    use axum::http::StatusCode;
    use serde_json::Value;
    use sp_01_provider_selection::{
        HttpGeolocator, HttpProviderDirectory, ProviderSelectionService, SelectionConfig,
    };
    use sp_02_api_gateway::{ApiGatewayService, GatewayConfig, REQUEST_ID_HEADER};
    use sp_runtime::{build_gateway, LocatorConfig};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::oneshot;

    const CALLER: &str = "198.51.100.1";

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Providers spread east of the caller, who sits at (0, 0).
    fn marketplace() -> MockUpstream {
        MockUpstream::new()
            .with_provider("f01000", &["203.0.113.10"], 0, 1 << 20)
            .with_provider("f02000", &["203.0.113.20", "203.0.113.21"], 1024, 1 << 30)
            .with_provider("f03000", &["203.0.113.30"], 1 << 30, 1 << 35)
            .with_location(CALLER, 0.0, 0.0)
            .with_location("203.0.113.10", 0.0, 5.0)
            .with_location("203.0.113.20", 0.0, 3.0)
            .with_location("203.0.113.21", 0.0, 1.0)
            .with_location("203.0.113.30", 0.0, 0.5)
    }

    struct Stack {
        gateway: SocketAddr,
        upstream: RunningUpstream,
        _shutdown: oneshot::Sender<()>,
    }

    impl Stack {
        fn url(&self, path_and_query: &str) -> String {
            format!("http://{}{}", self.gateway, path_and_query)
        }

        async fn get(&self, path_and_query: &str) -> (StatusCode, Value) {
            let response = reqwest::get(self.url(path_and_query)).await.unwrap();
            let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
            (status, response.json().await.unwrap())
        }
    }

    async fn start_stack(upstream: MockUpstream, selection: SelectionConfig) -> Stack {
        let upstream = upstream.spawn().await;

        let directory =
            HttpProviderDirectory::new(&upstream.directory_url(), Duration::from_secs(2)).unwrap();
        let geolocator =
            HttpGeolocator::new(upstream.geolocation_template(), None, Duration::from_secs(2))
                .unwrap();
        let service =
            ProviderSelectionService::new(Arc::new(directory), Arc::new(geolocator), selection);
        let gateway = ApiGatewayService::new(GatewayConfig::default(), Arc::new(service)).unwrap();

        let (gateway_addr, shutdown) = serve(gateway.router()).await;
        Stack {
            gateway: gateway_addr,
            upstream,
            _shutdown: shutdown,
        }
    }

    // =============================================================================
    // SELECTION OVER HTTP
    // =============================================================================

    #[tokio::test]
    async fn test_nearest_provider_end_to_end() {
        let stack = start_stack(marketplace(), SelectionConfig::for_testing()).await;

        let (status, body) = stack
            .get(&format!("/api/providers?size_bytes=4096&source_ip={CALLER}"))
            .await;

        assert_eq!(status, StatusCode::OK);
        // f02000's second address (1°) beats f01000 (5°); f03000 is too big
        assert_eq!(body["id"], "f02000");
        // Unknown upstream fields survive the round trip
        assert_eq!(body["raw_power_bytes"], "1125899906842624");

        let hits = stack.upstream.state.geo_hits();
        assert_eq!(hits[0], CALLER);
        assert!(!hits.contains(&"203.0.113.30".to_string()));
    }

    #[tokio::test]
    async fn test_random_provider_end_to_end() {
        let stack = start_stack(marketplace(), SelectionConfig::for_testing()).await;

        let (status, body) = stack.get("/api/providers?size_bytes=2048").await;

        assert_eq!(status, StatusCode::OK);
        let id = body["id"].as_str().unwrap();
        assert!(id == "f01000" || id == "f02000");
        assert!(stack.upstream.state.geo_hits().is_empty());
    }

    #[tokio::test]
    async fn test_lookups_are_deduplicated_per_request() {
        let upstream = MockUpstream::new()
            .with_provider("f01000", &["203.0.113.10"], 0, 100)
            .with_provider("f01001", &["203.0.113.10"], 0, 100)
            .with_provider("f01002", &["203.0.113.10", CALLER], 0, 100)
            .with_location(CALLER, 0.0, 0.0)
            .with_location("203.0.113.10", 10.0, 10.0);
        let stack = start_stack(upstream, SelectionConfig::for_testing()).await;

        let (status, body) = stack
            .get(&format!("/api/providers?size_bytes=50&source_ip={CALLER}"))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "f01000");
        assert_eq!(
            stack.upstream.state.geo_hits(),
            vec![CALLER.to_string(), "203.0.113.10".to_string()]
        );
    }

    #[tokio::test]
    async fn test_slow_lookup_is_skipped() {
        let upstream = marketplace().with_slow_lookup("203.0.113.21", Duration::from_millis(600));
        let stack = start_stack(upstream, SelectionConfig::for_testing()).await;

        let (status, body) = stack
            .get(&format!("/api/providers?size_bytes=4096&source_ip={CALLER}"))
            .await;

        assert_eq!(status, StatusCode::OK);
        // Without the 1° address f02000 still wins through its 3° address
        assert_eq!(body["id"], "f02000");
    }

    #[tokio::test]
    async fn test_unlocatable_candidates_are_404() {
        let upstream = MockUpstream::new()
            .with_provider("f05000", &["192.0.2.50"], 0, 100)
            .with_location(CALLER, 0.0, 0.0);
        let stack = start_stack(upstream, SelectionConfig::for_testing()).await;

        let (status, body) = stack
            .get(&format!("/api/providers?size_bytes=1&source_ip={CALLER}"))
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn test_unlocatable_caller_is_500_without_candidate_lookups() {
        let stack = start_stack(marketplace(), SelectionConfig::for_testing()).await;

        let (status, _) = stack
            .get("/api/providers?size_bytes=4096&source_ip=192.0.2.1")
            .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(stack.upstream.state.geo_hits(), vec!["192.0.2.1".to_string()]);
    }

    #[tokio::test]
    async fn test_directory_outage_is_500() {
        let upstream = marketplace().with_directory_status(StatusCode::BAD_GATEWAY);
        let stack = start_stack(upstream, SelectionConfig::for_testing()).await;

        let (status, body) = stack.get("/api/providers?size_bytes=1").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"]["message"].as_str().unwrap().contains("502"));
    }

    #[tokio::test]
    async fn test_provider_info_end_to_end() {
        let stack = start_stack(marketplace(), SelectionConfig::for_testing()).await;

        let (status, body) = stack.get("/api/provider/info?addr=f03000").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "f03000");
        assert_eq!(body["peer_id"], "12D3KooWf03000");

        let (status, _) = stack.get("/api/provider/info?addr=f09999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_request_id_header_over_the_wire() {
        let stack = start_stack(marketplace(), SelectionConfig::for_testing()).await;

        let response = reqwest::get(stack.url("/health")).await.unwrap();
        assert!(response.status().is_success());
        assert!(response.headers().contains_key(REQUEST_ID_HEADER.as_str()));
    }

    // =============================================================================
    // RUNTIME WIRING
    // =============================================================================

    #[tokio::test]
    async fn test_runtime_wiring_from_config_file() {
        let upstream = marketplace().spawn().await;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locator.toml");
        std::fs::write(
            &path,
            format!(
                r#"
[directory]
base_url = "{}"
request_timeout = "2s"

[geolocation]
url_template = "{}"

[selection]
lookup_timeout = "1s"
random_seed = 3
"#,
                upstream.directory_url(),
                upstream.geolocation_template()
            ),
        )
        .unwrap();

        let config = LocatorConfig::from_file(&path).unwrap();
        config.validate().unwrap();
        let gateway = build_gateway(&config).unwrap();
        let (addr, _shutdown) = serve(gateway.router()).await;

        let response = reqwest::get(format!(
            "http://{addr}/api/providers?size_bytes={}&source_ip={CALLER}",
            1u64 << 31
        ))
        .await
        .unwrap();
        assert!(response.status().is_success());
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["id"], "f03000");
    }
}
