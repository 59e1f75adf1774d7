//! Status mapping against a local server serving canned HTTP responses.

use serpapi_client::{SearchParams, SerpApiClient, SerpApiError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve exactly one canned response and return the base URL plus a handle
/// resolving to the raw request line.
async fn serve_once(
    status_line: &'static str,
    body: &'static str,
) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 8192];
        let mut request = Vec::new();
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            request.extend_from_slice(&buf[..n]);
            if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        String::from_utf8_lossy(&request)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    });

    (format!("http://{}", addr), handle)
}

#[tokio::test]
async fn test_success_returns_organic_results_in_order() {
    let (base, handle) = serve_once(
        "200 OK",
        r#"{"organic_results":[
            {"position":1,"title":"First","snippet":"a","link":"https://a.com"},
            {"position":2,"title":"Second","snippet":"b","link":"https://b.com"}
        ]}"#,
    )
    .await;

    let client = SerpApiClient::new("secret-key").with_base_url(base);
    let params = SearchParams::google("steel plant").country("in").num(10);
    let response = client.search(&params).await.unwrap();

    assert_eq!(response.organic_results.len(), 2);
    assert_eq!(response.organic_results[0].title.as_deref(), Some("First"));
    assert_eq!(response.organic_results[1].link.as_deref(), Some("https://b.com"));

    let request_line = handle.await.unwrap();
    assert!(request_line.starts_with("GET /search?"));
    assert!(request_line.contains("gl=in"));
    assert!(request_line.contains("api_key=secret-key"));
}

#[tokio::test]
async fn test_401_maps_to_unauthorized() {
    let (base, _handle) = serve_once("401 Unauthorized", r#"{"error":"Invalid API key."}"#).await;

    let client = SerpApiClient::new("bad").with_base_url(base);
    let err = client
        .search(&SearchParams::google("steel"))
        .await
        .unwrap_err();

    match err {
        SerpApiError::Unauthorized { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid API key.");
        }
        other => panic!("expected Unauthorized, got {other:?}"),
    }
}

#[tokio::test]
async fn test_500_maps_to_api_error_with_body() {
    let (base, _handle) = serve_once("500 Internal Server Error", "upstream exploded").await;

    let client = SerpApiClient::new("key").with_base_url(base);
    let err = client
        .search(&SearchParams::google("steel"))
        .await
        .unwrap_err();

    match err {
        SerpApiError::Api {
            status,
            message,
            body,
        } => {
            assert_eq!(status, 500);
            assert_eq!(message, "upstream exploded");
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_json_error_keeps_raw_body() {
    let raw = r#"{"error":"Your account has run out of searches.","plan":"free"}"#;
    let (base, _handle) = serve_once("429 Too Many Requests", raw).await;

    let client = SerpApiClient::new("key").with_base_url(base);
    let err = client
        .search(&SearchParams::google("steel"))
        .await
        .unwrap_err();

    match err {
        SerpApiError::Api {
            status,
            message,
            body,
        } => {
            assert_eq!(status, 429);
            assert_eq!(message, "Your account has run out of searches.");
            assert_eq!(body, raw);
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_in_band_no_results_is_empty_success() {
    let (base, _handle) = serve_once(
        "200 OK",
        r#"{"error":"Google hasn't returned any results for this query."}"#,
    )
    .await;

    let client = SerpApiClient::new("key").with_base_url(base);
    let response = client.search(&SearchParams::google("nothing")).await.unwrap();
    assert!(response.organic_results.is_empty());
}
