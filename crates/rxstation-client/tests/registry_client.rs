#![allow(unused_crate_dependencies)]
#![allow(clippy::tests_outside_test_module, reason = "integration tests live in tests/ dir")]
#![allow(clippy::expect_used, reason = "integration test: panics are the assertion mechanism")]

use rxstation_client::{ClientError, RegistryClient};
use rxstation_types::models::{
    DeviceHashUpdate, FingerprintHash, NewDevice, RegistryConfig, RetryConfig,
};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

fn hash() -> FingerprintHash {
    FingerprintHash::parse(&"c0ffee00".repeat(8)).expect("valid hash")
}

fn client_for(server: &MockServer, page_size: u32) -> RegistryClient {
    RegistryClient::new(RegistryConfig {
        base_url: server.uri(),
        token: None,
        timeout_secs: 2,
        page_size,
        auto_register: false,
        retry: RetryConfig { max_retries: 2, base_delay_ms: 1, max_delay_ms: 5 },
    })
    .expect("client builds")
}

#[tokio::test]
async fn test_list_walks_all_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/device-fingerprints"))
        .and(query_param("page", "0"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [{"id": 1, "stationId": 10, "fingerprintHash": "a"},
                        {"id": 2, "stationId": 11, "fingerprintHash": "b"}],
            "totalPages": 2,
            "number": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/device-fingerprints"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [{"id": 3, "fingerprintHash": "c"}],
            "totalPages": 2,
            "number": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let devices = client_for(&server, 2).list_devices(TOKEN).await.expect("listing succeeds");
    let ids: Vec<i64> = devices.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_list_stops_on_empty_page_despite_last_false() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/device-fingerprints"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"content": [], "last": false})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let listing = tokio::time::timeout(
        std::time::Duration::from_secs(3),
        client_for(&server, 50).list_devices(TOKEN),
    )
    .await
    .expect("listing terminates");
    assert!(listing.expect("listing succeeds").is_empty());
}

#[tokio::test]
async fn test_list_stops_when_registry_ignores_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/device-fingerprints"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [{"id": 1, "fingerprintHash": "a"}],
            "last": false,
            "number": 0,
            "totalPages": 5
        })))
        .expect(2)
        .mount(&server)
        .await;

    let listing = tokio::time::timeout(
        std::time::Duration::from_secs(3),
        client_for(&server, 1).list_devices(TOKEN),
    )
    .await
    .expect("listing terminates");
    let ids: Vec<i64> = listing.expect("listing succeeds").iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![1]);
}

#[tokio::test]
async fn test_list_accepts_bare_array() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/device-fingerprints"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"id": 7, "stationId": 3, "fingerprintHash": "x"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let devices = client_for(&server, 1).list_devices(TOKEN).await.expect("listing succeeds");
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].station_id, Some(3));
}

#[tokio::test]
async fn test_transient_failure_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/device-fingerprints"))
        .respond_with(ResponseTemplate::new(503).set_body_string("warming up"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/device-fingerprints"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let devices = client_for(&server, 50).list_devices(TOKEN).await.expect("retry recovers");
    assert!(devices.is_empty());
}

#[tokio::test]
async fn test_retries_exhausted_returns_last_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/device-fingerprints"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(3)
        .mount(&server)
        .await;

    let err = client_for(&server, 50).list_devices(TOKEN).await.expect_err("should fail");
    assert!(matches!(err, ClientError::ServerError { status: 500, .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/device-fingerprints"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server, 50).list_devices(TOKEN).await.expect_err("should fail");
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_create_posts_device_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/device-fingerprints/"))
        .and(body_partial_json(serde_json::json!({
            "fingerprintHash": hash().as_str(),
            "accessCount": 1,
            "department": "Pharmacy"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 42,
            "fingerprintHash": hash().as_str(),
            "accessCount": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let new_device = NewDevice {
        fingerprint_hash: hash(),
        department: "Pharmacy".to_string(),
        location: "Front Counter".to_string(),
        browser_user_agent: "agent".to_string(),
        screen_resolution: "1920x1080".to_string(),
        timezone: "America/Chicago".to_string(),
        access_count: 1,
        is_active: true,
    };

    let created =
        client_for(&server, 50).create_device(TOKEN, &new_device).await.expect("created");
    assert_eq!(created.id, 42);
}

#[tokio::test]
async fn test_update_and_delete_missing_device() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/device-fingerprints/9/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/device-fingerprints/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server, 50);
    let err = client
        .update_device_hash(TOKEN, 9, &DeviceHashUpdate { fingerprint_hash: hash() })
        .await
        .expect_err("missing device");
    assert!(matches!(err, ClientError::NotFound(9)));

    let err = client.delete_device(TOKEN, 9).await.expect_err("missing device");
    assert!(matches!(err, ClientError::NotFound(9)));
}

#[tokio::test]
async fn test_delete_succeeds_without_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/device-fingerprints/5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server, 50).delete_device(TOKEN, 5).await.expect("deleted");
}
