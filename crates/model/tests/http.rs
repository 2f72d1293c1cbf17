//! Tests for the HTTP transport

use pcore::{Error, Message, Model, Request};
use parley_model::{Auth, Client, HttpProvider, OAuth, StaticToken, reqwest::header};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

/// Serve a single canned HTTP response and return the endpoint URL.
async fn serve(status: &str, body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request(&mut socket).await;
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });
    format!("http://{addr}/chat")
}

/// Drain the request head and its body.
async fn read_request(socket: &mut tokio::net::TcpStream) {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
            return;
        }
        data.extend_from_slice(&buf[..n]);
        let text = String::from_utf8_lossy(&data);
        let Some(end) = text.find("\r\n\r\n") else {
            continue;
        };
        let length = text[..end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        if data.len() >= end + 4 + length {
            return;
        }
    }
}

fn request() -> Request {
    Request::default().with_messages(vec![Message::user("hello")])
}

#[test]
fn bearer_headers() {
    let provider = HttpProvider::bearer(Client::new(), "secret", "http://localhost/chat").unwrap();
    let headers = provider.headers();
    assert_eq!(headers[header::AUTHORIZATION], "Bearer secret");
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert!(headers.contains_key(header::USER_AGENT));
    assert_eq!(provider.endpoint(), "http://localhost/chat");
}

#[test]
fn bearer_rejects_invalid_token() {
    assert!(HttpProvider::bearer(Client::new(), "bad\ntoken", "http://localhost").is_err());
}

#[tokio::test]
async fn static_token_passes_through() {
    let token = StaticToken.token(&Client::new(), "issued").await.unwrap();
    assert_eq!(token, "issued");
}

#[tokio::test]
async fn send_parses_response() {
    let endpoint = serve(
        "200 OK",
        r#"{"choices":[{"message":{"role":"assistant","content":"hi there"},"finish_reason":"stop"}],"usage":{"prompt_tokens":4,"completion_tokens":2,"total_tokens":6}}"#,
    )
    .await;
    let provider = HttpProvider::bearer(Client::new(), "t", &endpoint).unwrap();
    let response = provider.send(&request()).await.unwrap();
    assert_eq!(response.content(), Some("hi there"));
    assert_eq!(response.usage.total_tokens, 6);
}

#[tokio::test]
async fn send_surfaces_status_and_body() {
    let endpoint = serve("401 Unauthorized", r#"{"message":"token expired"}"#).await;
    let provider = HttpProvider::bearer(Client::new(), "t", &endpoint).unwrap();
    let err = provider.send(&request()).await.unwrap_err();
    match err {
        Error::Status { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("token expired"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn send_reports_invalid_json() {
    let endpoint = serve("200 OK", "not json").await;
    let provider = HttpProvider::bearer(Client::new(), "t", &endpoint).unwrap();
    let err = provider.send(&request()).await.unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[tokio::test]
async fn oauth_reads_access_token() {
    let endpoint = serve("200 OK", r#"{"access_token":"abc","expires_at":1}"#).await;
    let token = OAuth::new(endpoint, "SCOPE")
        .token(&Client::new(), "Y3JlZA==")
        .await
        .unwrap();
    assert_eq!(token, "abc");
}

#[tokio::test]
async fn connect_uses_acquired_token() {
    let endpoint = serve("200 OK", r#"{"access_token":"fresh"}"#).await;
    let auth = OAuth::new(endpoint, "SCOPE");
    let provider = HttpProvider::connect(Client::new(), &auth, "Y3JlZA==", "http://localhost/chat")
        .await
        .unwrap();
    assert_eq!(provider.headers()[header::AUTHORIZATION], "Bearer fresh");
}

#[tokio::test]
async fn oauth_failure_is_error() {
    let endpoint = serve("400 Bad Request", r#"{"code":4}"#).await;
    let result = OAuth::new(endpoint, "SCOPE")
        .token(&Client::new(), "bad")
        .await;
    assert!(result.is_err());
}
