//! Shared fixtures for integration tests.
//!
//! Provides a small BIF file built with [`BifWriter`] and helpers to serve it
//! from a [`wiremock::MockServer`].

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use trickplay::bif::BifWriter;
use trickplay::config::HttpConfig;
use trickplay::service::BifService;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// JPEG-shaped payload tagged with `tag`.
pub fn jpeg(tag: u8) -> Vec<u8> {
    vec![0xFF, 0xD8, 0xFF, 0xE0, tag, 0xFF, 0xD9]
}

/// Three frames at 0 s, 10 s and 20 s.
pub fn sample_bif() -> Vec<u8> {
    BifWriter::new()
        .frame(0, jpeg(0))
        .frame(10, jpeg(1))
        .frame(20, jpeg(2))
        .finish()
        .expect("failed to build sample BIF")
}

/// Service with a short timeout suitable for tests.
pub fn test_service() -> BifService {
    BifService::new(&HttpConfig {
        timeout_secs: 5,
        ..HttpConfig::default()
    })
}

/// Start a mock server answering `GET route` with `response`.
pub async fn serve(route: &str, response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

/// Start a mock server that serves [`sample_bif`] at `/title.bif`.
pub async fn serve_sample_bif() -> MockServer {
    serve(
        "/title.bif",
        ResponseTemplate::new(200)
            .insert_header("content-type", "application/octet-stream")
            .set_body_bytes(sample_bif()),
    )
    .await
}

/// Start a mock server that answers after `delay`.
pub async fn serve_slowly(delay: Duration) -> MockServer {
    serve(
        "/slow.bif",
        ResponseTemplate::new(200)
            .set_body_bytes(sample_bif())
            .set_delay(delay),
    )
    .await
}

/// Start a raw HTTP server that answers one request with a chunked 200
/// carrying `chunk`, then keeps the connection open without finishing the
/// body. No Content-Length header is sent.
pub async fn serve_chunked_then_stall(chunk: Vec<u8>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await;

        let mut response = b"HTTP/1.1 200 OK\r\n\
            Content-Type: application/octet-stream\r\n\
            Transfer-Encoding: chunked\r\n\r\n"
            .to_vec();
        response.extend_from_slice(format!("{:x}\r\n", chunk.len()).as_bytes());
        response.extend_from_slice(&chunk);
        response.extend_from_slice(b"\r\n");
        socket.write_all(&response).await.unwrap();
        socket.flush().await.unwrap();

        tokio::time::sleep(Duration::from_secs(60)).await;
        drop(socket);
    });

    addr
}
