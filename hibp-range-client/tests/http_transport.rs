#![cfg(feature = "reqwest")]

use std::time::Duration;

use hibp_range_client::{
    Error, HttpTransport, LookupOptions, RangeChecker, RangeTransport, Verdict, split,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Accepts a single connection, captures the request head and answers with
/// `status_line` and `body`.
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let head = read_request_head(&mut socket).await;
        let _ = tx.send(head);

        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: text/plain\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });

    (format!("http://{addr}"), rx)
}

async fn read_request_head(socket: &mut tokio::net::TcpStream) -> String {
    let mut head = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        head.extend_from_slice(&chunk[..n]);
        if head.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    String::from_utf8_lossy(&head).to_ascii_lowercase()
}

fn transport(base_url: &str) -> HttpTransport {
    HttpTransport::builder()
        .base_url(base_url)
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_range_request_shape() {
    init_tracing();
    let (base_url, head) = serve_once("200 OK", "1E4C9B93F3F0682250B6CF8331B7EE68FD8:3730471\r\n").await;

    let (prefix, _) = split("password");
    let response = transport(&base_url).fetch_range(&prefix, false).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, "1E4C9B93F3F0682250B6CF8331B7EE68FD8:3730471\r\n");

    let head = head.await.unwrap();
    assert!(head.starts_with("get /range/5baa6 http/1.1\r\n"), "{head}");
    assert!(head.contains("user-agent: hibp-range-client/"), "{head}");
    assert!(!head.contains("add-padding"), "{head}");
    // the suffix never leaves the process
    assert!(!head.contains("1e4c9b93f3f0682250b6cf8331b7ee68fd8"), "{head}");
}

#[tokio::test]
async fn test_padding_header_sent() {
    init_tracing();
    let (base_url, head) = serve_once("200 OK", "").await;

    let checker = RangeChecker::new(transport(&base_url), LookupOptions::new(1, true).unwrap());
    let verdict = checker.check("password").await.unwrap();
    assert_eq!(verdict, Verdict { is_pwned: false, occurrence_count: 0 });

    let head = head.await.unwrap();
    assert!(head.contains("add-padding: true"), "{head}");
}

#[tokio::test]
async fn test_custom_user_agent() {
    init_tracing();
    let (base_url, head) = serve_once("200 OK", "").await;

    let transport = HttpTransport::builder()
        .base_url(base_url)
        .user_agent("my-service/2.0")
        .build()
        .unwrap();
    let (prefix, _) = split("password");
    transport.fetch_range(&prefix, false).await.unwrap();

    assert!(head.await.unwrap().contains("user-agent: my-service/2.0"));
}

#[tokio::test]
async fn test_caller_supplied_client() {
    init_tracing();
    let (base_url, head) = serve_once("200 OK", "1E4C9B93F3F0682250B6CF8331B7EE68FD8:12\r\n").await;

    let client = reqwest::Client::builder().user_agent("custom-client/1.0").build().unwrap();
    let transport = HttpTransport::with_client(client, &format!("{base_url}/")).unwrap();
    let checker = RangeChecker::new(transport, LookupOptions::default());

    let verdict = checker.check("password").await.unwrap();
    assert_eq!(verdict, Verdict { is_pwned: true, occurrence_count: 12 });

    let head = head.await.unwrap();
    assert!(head.starts_with("get /range/5baa6 http/1.1\r\n"), "{head}");
    assert!(head.contains("user-agent: custom-client/1.0"), "{head}");
}

#[tokio::test]
async fn test_no_content_is_transport_failure() {
    init_tracing();
    let (base_url, _head) = serve_once("204 No Content", "").await;

    let checker = RangeChecker::new(transport(&base_url), LookupOptions::default());
    let err = checker.check("password").await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 204, .. }), "{err}");
}

#[tokio::test]
async fn test_breached_password_end_to_end() {
    init_tracing();
    let body = "0018A45C4D1DEF81644B54AB7F969B88D65:0\r\n\
                1e4c9b93f3f0682250b6cf8331b7ee68fd8:3730471\r\n\
                00D4F6E8FA6EECAD2A3AA415EEC418D38EC:2\r\n";
    let (base_url, _head) = serve_once("200 OK", body).await;

    let checker = RangeChecker::new(transport(&base_url), LookupOptions::default());
    let verdict = checker.check("password").await.unwrap();
    assert_eq!(verdict, Verdict { is_pwned: true, occurrence_count: 3730471 });
}

#[tokio::test]
async fn test_service_unavailable() {
    init_tracing();
    let (base_url, _head) = serve_once("503 Service Unavailable", "try later").await;

    let checker = RangeChecker::new(transport(&base_url), LookupOptions::default());
    let err = checker.check("password").await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 503, .. }), "{err}");
    assert!(err.is_transport_failure());
}

#[tokio::test]
async fn test_connection_refused() {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let checker = RangeChecker::new(transport(&format!("http://{addr}")), LookupOptions::default());
    let err = checker.check("password").await.unwrap_err();
    assert!(matches!(err, Error::HttpRequest { .. }), "{err}");
    assert!(err.is_transport_failure());
}

#[tokio::test]
async fn test_timeout() {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request_head(&mut socket).await;
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    let transport = HttpTransport::builder()
        .base_url(format!("http://{addr}"))
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let checker = RangeChecker::new(transport, LookupOptions::default());

    let err = checker.check("password").await.unwrap_err();
    assert!(matches!(err, Error::Timeout { .. }), "{err}");
}

#[tokio::test]
#[ignore = "requires network access"]
async fn test_public_api() {
    init_tracing();
    let checker = RangeChecker::with_minimum_frequency_and_padding(1, true).unwrap();

    // "password" is one of the most breached passwords
    let verdict = checker.check("password").await.unwrap();
    assert!(verdict.is_pwned);
    assert!(verdict.occurrence_count > 1_000_000);

    let verdict = checker.check("01KFC4WS41FAJ3ACEJXTF8HV44-hAwT?}cuC:r#kW5").await.unwrap();
    assert!(!verdict.is_pwned);
}
