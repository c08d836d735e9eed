//! Integration tests for BIF download and parsing.

mod common;

use std::time::{Duration, Instant};

use assert_matches::assert_matches;
use common::{
    jpeg, sample_bif, serve, serve_chunked_then_stall, serve_sample_bif, serve_slowly,
    test_service,
};
use tokio_util::sync::CancellationToken;
use trickplay::bif::FrameImageSource;
use trickplay::config::HttpConfig;
use trickplay::service::{BifService, ServiceError};
use wiremock::ResponseTemplate;

#[tokio::test]
async fn fetch_parses_bif() {
    let server = serve_sample_bif().await;
    let service = test_service();

    let source = service
        .fetch_frame_image_source(&format!("{}/title.bif", server.uri()))
        .await
        .unwrap()
        .expect("sample BIF should parse");

    assert_eq!(source.frame_count(), 3);
    assert_eq!(source.image_data(12_000).unwrap().as_ref(), jpeg(2).as_slice());
    assert!(source
        .base64_image(0)
        .unwrap()
        .starts_with("data:image/jpeg;base64,"));
}

#[tokio::test]
async fn fetch_not_found_is_error_with_status() {
    let server = serve("/title.bif", ResponseTemplate::new(404)).await;
    let service = test_service();

    let err = service
        .fetch_frame_image_source(&format!("{}/title.bif", server.uri()))
        .await
        .unwrap_err();

    assert_matches!(err, ServiceError::HttpStatus { .. });
    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn fetch_server_error_is_error() {
    let server = serve("/title.bif", ResponseTemplate::new(503)).await;
    let service = test_service();

    let err = service
        .fetch_frame_image_source(&format!("{}/title.bif", server.uri()))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn fetch_non_bif_body_is_none() {
    let server = serve(
        "/title.bif",
        ResponseTemplate::new(200).set_body_string("<html>not found</html>"),
    )
    .await;
    let service = test_service();

    let source = service
        .fetch_frame_image_source(&format!("{}/title.bif", server.uri()))
        .await
        .unwrap();
    assert!(source.is_none());
}

#[tokio::test]
async fn fetch_truncated_bif_is_none() {
    let mut data = sample_bif();
    data.truncate(70);
    let server = serve("/title.bif", ResponseTemplate::new(200).set_body_bytes(data)).await;
    let service = test_service();

    let source = service
        .fetch_frame_image_source(&format!("{}/title.bif", server.uri()))
        .await
        .unwrap();
    assert!(source.is_none());
}

#[tokio::test]
async fn fetch_rejects_oversized_body() {
    let server = serve_sample_bif().await;
    let service = BifService::new(&HttpConfig {
        max_bif_bytes: 80,
        ..HttpConfig::default()
    });

    let err = service
        .fetch_frame_image_source(&format!("{}/title.bif", server.uri()))
        .await
        .unwrap_err();

    assert_matches!(err, ServiceError::TooLarge { limit: 80, .. });
}

#[tokio::test]
async fn fetch_rejects_oversized_chunked_body_without_waiting() {
    let addr = serve_chunked_then_stall(vec![0u8; 1000]).await;
    let service = BifService::new(&HttpConfig {
        timeout_secs: 30,
        max_bif_bytes: 100,
        ..HttpConfig::default()
    });

    let started = Instant::now();
    let result = tokio::time::timeout(
        Duration::from_secs(5),
        service.fetch_frame_image_source(&format!("http://{addr}/title.bif")),
    )
    .await
    .expect("size limit should fail before the body ends");

    assert_matches!(
        result,
        Err(ServiceError::TooLarge {
            size: 1000,
            limit: 100,
            ..
        })
    );
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn fetch_connection_refused_is_request_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = test_service()
        .fetch_frame_image_source(&format!("http://{addr}/title.bif"))
        .await
        .unwrap_err();

    assert_matches!(err, ServiceError::Request { .. });
    assert!(std::error::Error::source(&err).is_some());
}

#[tokio::test]
async fn fetch_cancellable_stops_waiting() {
    let server = serve_slowly(Duration::from_secs(3)).await;
    let service = test_service();
    let token = CancellationToken::new();

    let cancel = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
    });

    let started = Instant::now();
    let result = service
        .fetch_cancellable(&format!("{}/slow.bif", server.uri()), &token)
        .await;

    assert_matches!(result, Err(ServiceError::Cancelled { .. }));
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn fetch_cancellable_completes_without_cancel() {
    let server = serve_sample_bif().await;
    let token = CancellationToken::new();

    let source = test_service()
        .fetch_cancellable(&format!("{}/title.bif", server.uri()), &token)
        .await
        .unwrap();
    assert!(source.is_some());
}
