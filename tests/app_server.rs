//! Token fetcher tests against a local mock app server.

use chatsession::{ApiError, AppServerClient, Config, Credentials};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> AppServerClient {
    let config = Config::new(
        format!("{}/app/user/login", server.uri()),
        format!("{}/app/user/register", server.uri()),
    );
    AppServerClient::new(&config).expect("client should build")
}

fn creds() -> Credentials {
    Credentials::new("u1", "p1")
}

#[tokio::test]
async fn fetch_token_returns_token_on_200() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/app/user/login"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"userAccount": "u1", "userPassword": "p1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "abc123"})))
        .expect(1)
        .mount(&server)
        .await;

    let token = client_for(&server).fetch_token(&creds()).await.unwrap();
    assert_eq!(token, "abc123");
}

#[tokio::test]
async fn fetch_token_empty_username_issues_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .fetch_token(&Credentials::new("", "p1"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::MissingCredentials));

    let err = client
        .fetch_token(&Credentials::new("u1", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::MissingCredentials));
}

#[tokio::test]
async fn fetch_token_non_200_is_server_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/app/user/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_token(&creds()).await.unwrap_err();
    match err {
        ApiError::ServerRejected { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "bad credentials");
        }
        other => panic!("expected ServerRejected, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_token_200_with_empty_body_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/app/user/login"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_token(&creds()).await.unwrap_err();
    assert!(matches!(err, ApiError::EmptyResponse));
}

#[tokio::test]
async fn fetch_token_unparsable_body_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/app/user/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_token(&creds()).await.unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse(_)));
}

#[tokio::test]
async fn fetch_token_missing_field_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/app/user/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "wrong-field"})))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_token(&creds()).await.unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse(_)));
}

#[tokio::test]
async fn fetch_token_unreachable_server_is_transport_error() {
    // Port 1 is never listening; the connection itself fails.
    let config = Config::new(
        "http://127.0.0.1:1/app/user/login",
        "http://127.0.0.1:1/app/user/register",
    );
    let client = AppServerClient::new(&config).unwrap();

    let err = client.fetch_token(&creds()).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn register_res_ok_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/app/user/register"))
        .and(body_json(json!({"userAccount": "u1", "userPassword": "p1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": "RES_OK"})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).register(&creds()).await.unwrap();
}

#[tokio::test]
async fn register_failure_surfaces_error_info() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/app/user/register"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": "ERR", "errorInfo": "exists"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).register(&creds()).await.unwrap_err();
    match err {
        ApiError::RegistrationRejected(message) => assert_eq!(message, "exists"),
        other => panic!("expected RegistrationRejected, got {other:?}"),
    }
}

#[tokio::test]
async fn register_non_200_is_server_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/app/user/register"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client_for(&server).register(&creds()).await.unwrap_err();
    assert!(matches!(err, ApiError::ServerRejected { status: 500, .. }));
}
