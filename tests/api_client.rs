//! Wire-level tests for the backend HTTP client: bearer auth, token
//! rotation via the response header, 401 handling, and error bodies.

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use foliofront::api::{ApiClient, TokenCell, AUTH_TOKEN_HEADER};
use foliofront::config::AppConfig;
use foliofront::errors::AppError;

fn config(base_url: &str) -> AppConfig {
    AppConfig {
        api_base_url: base_url.to_string(),
        session_secret: "0123456789abcdef0123456789abcdef".to_string(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        environment: "development".to_string(),
    }
}

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&config(&server.uri())).unwrap()
}

#[tokio::test]
async fn attaches_the_bearer_token_under_the_versioned_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/portfolio/summary"))
        .and(header("authorization", "Bearer session-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "totalValue": 100.0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cell = TokenCell::new(Some("session-token".to_string()));
    let body: serde_json::Value = client(&server)
        .get("/portfolio/summary", &cell)
        .await
        .unwrap();
    assert_eq!(body["totalValue"], 100.0);
}

#[tokio::test]
async fn anonymous_calls_carry_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let cell = TokenCell::anonymous();
    let _: serde_json::Value = client(&server)
        .post("/auth/login", &serde_json::json!({"email": "a@b.c"}), &cell)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn query_parameters_are_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/stocks/top"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let cell = TokenCell::new(Some("tok".to_string()));
    let stocks: Vec<serde_json::Value> = client(&server)
        .get_query("/stocks/top", &[("limit", "5".to_string())], &cell)
        .await
        .unwrap();
    assert!(stocks.is_empty());
}

#[tokio::test]
async fn rotated_token_from_the_response_header_lands_in_the_cell() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/stocks"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(AUTH_TOKEN_HEADER, "fresh-token")
                .set_body_json(serde_json::json!([])),
        )
        .mount(&server)
        .await;

    let cell = TokenCell::new(Some("stale-token".to_string()));
    let _: Vec<serde_json::Value> = client(&server).get("/stocks", &cell).await.unwrap();

    assert_eq!(cell.current().as_deref(), Some("fresh-token"));
    assert_eq!(cell.rotated_token().as_deref(), Some("fresh-token"));
    assert!(!cell.is_invalidated());
}

#[tokio::test]
async fn a_401_invalidates_the_cell_and_surfaces_as_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/portfolio/performance"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let cell = TokenCell::new(Some("expired".to_string()));
    let result: Result<serde_json::Value, AppError> =
        client(&server).get("/portfolio/performance", &cell).await;

    assert!(matches!(result, Err(AppError::Unauthorized)));
    assert!(cell.is_invalidated());
    assert_eq!(cell.current(), None);
}

#[tokio::test]
async fn backend_error_bodies_become_readable_messages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/transactions/sell"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "message": "Insufficient shares",
            "status": 400
        })))
        .mount(&server)
        .await;

    let cell = TokenCell::new(Some("tok".to_string()));
    let result: Result<serde_json::Value, AppError> = client(&server)
        .post("/transactions/sell", &serde_json::json!({}), &cell)
        .await;

    match result {
        Err(AppError::Api { status, message }) => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(message, "Insufficient shares");
        }
        other => panic!("expected Api error, got {:?}", other.map(|_| ())),
    }
    assert!(!cell.is_invalidated());
}

#[tokio::test]
async fn empty_success_bodies_are_accepted_for_void_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/stocks/cache/clear"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let cell = TokenCell::new(Some("tok".to_string()));
    let result: Result<(), AppError> = client(&server).post_empty("/stocks/cache/clear", &cell).await;
    assert!(result.is_ok());
}
