use std::time::Duration;

use assistant_engine::{BackendClient, ClientSettings, FailureKind, ReqwestBackendClient};
use bytes::Bytes;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestBackendClient {
    let settings = ClientSettings::new(&server.uri()).expect("valid base url");
    ReqwestBackendClient::new(settings).expect("client")
}

/// Base url of a port nothing listens on.
fn unreachable_base() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/")
}

#[tokio::test]
async fn query_posts_prompt_and_returns_response_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "prompt": "average age?" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "37.5" })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server).query("average age?").await.expect("reply");
    assert_eq!(reply, "37.5");
}

#[tokio::test]
async fn query_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).query("hi").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn query_without_response_field_is_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "detail": "nope" })))
        .mount(&server)
        .await;

    let err = client_for(&server).query("hi").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn query_to_unreachable_backend_is_network_failure() {
    let settings = ClientSettings::new(&unreachable_base()).unwrap();
    let client = ReqwestBackendClient::new(settings).unwrap();

    let err = client.query("hi").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}

#[tokio::test]
async fn query_times_out_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "response": "late" })),
        )
        .mount(&server)
        .await;

    let mut settings = ClientSettings::new(&server.uri()).unwrap();
    settings.request_timeout = Some(Duration::from_millis(50));
    let client = ReqwestBackendClient::new(settings).unwrap();

    let err = client.query("hi").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn upload_sends_multipart_file_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/uploadfile/"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"people.csv\""))
        .and(body_string_contains("name,age\nAda,36\n"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let receipt = client_for(&server)
        .upload("people.csv", Bytes::from_static(b"name,age\nAda,36\n"))
        .await
        .expect("upload ok");
    assert_eq!(receipt.status, 200);
}

#[tokio::test]
async fn upload_ignores_response_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/uploadfile/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let receipt = client_for(&server)
        .upload("a.csv", Bytes::from_static(b"a\n1\n"))
        .await
        .expect("body is not inspected");
    assert_eq!(receipt.status, 200);
}

#[tokio::test]
async fn upload_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/uploadfile/"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .upload("a.csv", Bytes::from_static(b"a\n1\n"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(422));
}

#[tokio::test]
async fn upload_to_unreachable_backend_is_network_failure() {
    let settings = ClientSettings::new(&unreachable_base()).unwrap();
    let client = ReqwestBackendClient::new(settings).unwrap();

    let err = client
        .upload("a.csv", Bytes::from_static(b"a\n1\n"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}
