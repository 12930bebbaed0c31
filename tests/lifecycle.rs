//! Lifecycle tests: readiness, double start, missing configuration,
//! idempotent stop, restart with a fresh backend.

use std::time::Duration;

use embedded_harness::{HarnessConfig, HarnessError, ServerHarness};

mod common;

#[tokio::test]
async fn readiness_implies_reachability() {
    let mut harness = common::harness_on(17601);
    harness.start().await.expect("start must succeed");

    // No sleep: start() returning means the listener accepts requests.
    let base = harness.base_address().expect("running instance").to_string();
    let response = common::client().get(&base).send().await.expect("server reachable");
    assert_eq!(response.status(), 200);

    harness.stop().await;
}

#[tokio::test]
async fn reference_fixture_scenario() {
    embedded_harness::observability::init_test_logging();
    let mut harness = ServerHarness::default();

    let started = tokio::time::Instant::now();
    harness.start().await.expect("default fixture must start");
    assert!(started.elapsed() < Duration::from_secs(5));

    assert_eq!(harness.base_address(), Some("http://localhost:7473/"));
    assert_eq!(harness.hostname(), "localhost");
    assert_eq!(harness.port(), 7473);

    let client = common::client();
    let response = client
        .get("http://localhost:7473/")
        .send()
        .await
        .expect("server reachable");
    assert_eq!(response.status(), 200);

    // Populate, then restart: the next instance gets a fresh backend.
    let created: serde_json::Value = client
        .post("http://localhost:7473/db/data/entity")
        .json(&serde_json::json!({ "name": "before-restart" }))
        .send()
        .await
        .expect("create entity")
        .json()
        .await
        .expect("entity json");
    let id = created["id"].as_str().expect("entity id").to_string();
    assert_eq!(harness.backend().expect("running").count(), 1);

    harness.stop().await;
    harness.start().await.expect("restart must succeed");

    assert_eq!(harness.backend().expect("running").count(), 0);
    let lookup = client
        .get(format!("http://localhost:7473/db/data/entity/{id}"))
        .send()
        .await
        .expect("server reachable");
    assert_eq!(lookup.status(), 404, "old entity must not survive restart");

    harness.stop().await;
}

#[tokio::test]
async fn second_start_is_a_usage_error_and_leaves_instance_untouched() {
    let mut harness = common::harness_on(17602);
    harness.start().await.expect("first start must succeed");
    let base = harness.base_address().expect("running instance").to_string();

    assert!(matches!(
        harness.start().await,
        Err(HarnessError::AlreadyRunning)
    ));

    // Original instance still serving.
    assert_eq!(harness.base_address(), Some(base.as_str()));
    let response = common::client().get(&base).send().await.expect("still reachable");
    assert_eq!(response.status(), 200);

    harness.stop().await;
}

#[tokio::test]
async fn missing_properties_resource_fails_before_any_bind() {
    let mut harness = ServerHarness::new(
        HarnessConfig::new("127.0.0.1", 17603).with_properties_resource("absent.toml"),
    );

    match harness.start().await {
        Err(HarnessError::ConfigurationMissing { resource }) => {
            assert_eq!(resource, "absent.toml");
        }
        other => panic!("expected ConfigurationMissing, got {other:?}"),
    }
    assert!(!harness.is_running());

    // No listener was constructed: nothing accepts on the port.
    assert!(tokio::net::TcpStream::connect("127.0.0.1:17603").await.is_err());
}

#[tokio::test]
async fn stop_clears_the_handle_and_is_idempotent() {
    let mut harness = common::harness_on(17604);
    harness.start().await.expect("start must succeed");
    assert!(harness.is_running());

    harness.stop().await;
    assert!(!harness.is_running());
    assert!(harness.base_address().is_none());
    assert!(harness.backend().is_none());

    // Second stop is a no-op, not a panic.
    harness.stop().await;
    assert!(!harness.is_running());
}

#[tokio::test]
async fn failed_start_leaves_harness_stopped_and_retryable() {
    // Occupy the port so the listener's bind fails.
    let occupier = tokio::net::TcpListener::bind("127.0.0.1:17605")
        .await
        .expect("occupy port");

    let mut harness = common::harness_on(17605);
    match harness.start().await {
        Err(HarnessError::StartupFailed(_)) => {}
        other => panic!("expected StartupFailed, got {other:?}"),
    }
    assert!(!harness.is_running());

    drop(occupier);
    // Give the OS a moment to release the port.
    tokio::time::sleep(Duration::from_millis(100)).await;

    harness.start().await.expect("retry after failure must succeed");
    assert!(harness.is_running());
    harness.stop().await;
}

#[tokio::test]
async fn module_surfaces_are_mounted() {
    let mut harness = common::harness_on(17606);
    harness.start().await.expect("start must succeed");
    let client = common::client();

    let pong = client
        .get("http://127.0.0.1:17606/ext/ping")
        .send()
        .await
        .expect("extension surface reachable")
        .text()
        .await
        .expect("body");
    assert_eq!(pong, "pong");

    let discovery: serde_json::Value = client
        .get("http://127.0.0.1:17606/ext")
        .send()
        .await
        .expect("extension index reachable")
        .json()
        .await
        .expect("index json");
    assert_eq!(discovery["extensions"][0], "ping");

    // Entity CRUD through the primary surface.
    let created: serde_json::Value = client
        .post("http://127.0.0.1:17606/db/data/entity")
        .json(&serde_json::json!({ "kind": "smoke" }))
        .send()
        .await
        .expect("create entity")
        .json()
        .await
        .expect("entity json");
    let id = created["id"].as_str().expect("entity id").to_string();

    let fetched: serde_json::Value = client
        .get(format!("http://127.0.0.1:17606/db/data/entity/{id}"))
        .send()
        .await
        .expect("get entity")
        .json()
        .await
        .expect("entity json");
    assert_eq!(fetched["properties"]["kind"], "smoke");

    let deleted = client
        .delete(format!("http://127.0.0.1:17606/db/data/entity/{id}"))
        .send()
        .await
        .expect("delete entity");
    assert_eq!(deleted.status(), 204);

    let gone = client
        .get(format!("http://127.0.0.1:17606/db/data/entity/{id}"))
        .send()
        .await
        .expect("get entity");
    assert_eq!(gone.status(), 404);

    harness.stop().await;
}
