use std::time::Duration;

use dirmirror_core::DiscoveryError;
use dirmirror_engine::{EngineConfig, EngineEvent, EngineHandle, MirrorError, MirrorRequest};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn collect_until_finished(engine: EngineHandle) -> Vec<EngineEvent> {
    let mut events = Vec::new();
    while let Some(event) = engine.recv_timeout(Duration::from_secs(10)) {
        let done = matches!(event, EngineEvent::MirrorFinished { .. });
        events.push(event);
        if done {
            break;
        }
    }
    events
}

#[tokio::test(flavor = "multi_thread")]
async fn enqueued_job_reports_progress_and_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/__files.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["a.txt"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/a.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("a"))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let engine = EngineHandle::new(EngineConfig::default_with_storage(temp.path().to_path_buf()))
        .unwrap();
    engine.enqueue(MirrorRequest {
        job_id: 9,
        source: format!("{}/", server.uri()),
        target: "site".to_string(),
    });

    let events = tokio::task::spawn_blocking(move || collect_until_finished(engine))
        .await
        .unwrap();

    assert!(matches!(events.first(), Some(EngineEvent::ScanStarted { .. })));
    match events.last() {
        Some(EngineEvent::MirrorFinished { job_id, result }) => {
            assert_eq!(*job_id, 9);
            let result = result.as_ref().unwrap();
            assert_eq!((result.ok, result.skipped, result.total), (1, 0, 1));
        }
        other => panic!("unexpected final event {other:?}"),
    }
    assert!(temp.path().join("site/a.txt").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_source_fails_the_job() {
    let temp = TempDir::new().unwrap();
    let engine = EngineHandle::new(EngineConfig::default_with_storage(temp.path().to_path_buf()))
        .unwrap();
    engine.enqueue(MirrorRequest {
        job_id: 1,
        source: "not a url".to_string(),
        target: "site".to_string(),
    });

    let events = tokio::task::spawn_blocking(move || collect_until_finished(engine))
        .await
        .unwrap();

    assert!(matches!(
        events.last(),
        Some(EngineEvent::MirrorFinished {
            result: Err(MirrorError::InvalidSource(_)),
            ..
        })
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_source_fails_with_no_listing() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let engine = EngineHandle::new(EngineConfig::default_with_storage(temp.path().to_path_buf()))
        .unwrap();
    engine.enqueue(MirrorRequest {
        job_id: 2,
        source: format!("{}/nothing/", server.uri()),
        target: "site".to_string(),
    });

    let events = tokio::task::spawn_blocking(move || collect_until_finished(engine))
        .await
        .unwrap();

    assert!(matches!(
        events.last(),
        Some(EngineEvent::MirrorFinished {
            result: Err(MirrorError::Discovery(DiscoveryError::NoListing { .. })),
            ..
        })
    ));
}
