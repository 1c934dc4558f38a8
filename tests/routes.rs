//! Full-router tests: session cookie lifecycle, auth redirects, the
//! defensive dashboard, and form validation short-circuits. The backend
//! REST service is stood in for by wiremock.

use axum::body::Body;
use axum::Router;
use http::header;
use http::{Request, StatusCode};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use foliofront::api::{ApiClient, AUTH_TOKEN_HEADER};
use foliofront::app::create_app;
use foliofront::config::AppConfig;
use foliofront::state::AppState;

fn test_app(server: &MockServer) -> Router {
    let config = AppConfig {
        api_base_url: server.uri(),
        session_secret: "0123456789abcdef0123456789abcdef".to_string(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        environment: "development".to_string(),
    };
    let api = ApiClient::new(&config).unwrap();
    create_app(AppState::new(config, api))
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

fn post_form(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn set_cookie(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should set a cookie")
        .to_str()
        .unwrap()
        .to_string()
}

/// Runs the login flow against a mocked backend and returns the session
/// cookie pair to replay on later requests.
async fn sign_in(app: &Router, server: &MockServer) -> String {
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "session-token",
            "tokenType": "Bearer",
            "email": "user@example.com",
            "firstName": "Pat",
            "lastName": "Doe",
            "role": "USER"
        })))
        .mount(server)
        .await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/login",
            None,
            "email=user%40example.com&password=secret",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let cookie = set_cookie(&response);
    cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn anonymous_visitors_are_sent_to_login_with_a_return_path() {
    let server = MockServer::start().await;
    let app = test_app(&server);

    let response = app.oneshot(get("/dashboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/login?redirectTo=%2Fdashboard"
    );
}

#[tokio::test]
async fn login_sets_a_signed_week_long_session_cookie() {
    let server = MockServer::start().await;
    let app = test_app(&server);

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "session-token",
            "tokenType": "Bearer",
            "email": "user@example.com",
            "firstName": "Pat",
            "lastName": "Doe",
            "role": "USER"
        })))
        .mount(&server)
        .await;

    let response = app
        .oneshot(post_form(
            "/login",
            None,
            "email=user%40example.com&password=secret",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/dashboard");

    let cookie = set_cookie(&response);
    assert!(cookie.starts_with("__session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=604800"));
    // The payload is signed, not plaintext.
    assert!(!cookie.contains("session-token"));
}

#[tokio::test]
async fn rejected_credentials_render_a_friendly_error() {
    let server = MockServer::start().await;
    let app = test_app(&server);

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let response = app
        .oneshot(post_form(
            "/login",
            None,
            "email=user%40example.com&password=wrong",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_text(response).await;
    assert!(body.contains("Invalid email or password"));
}

#[tokio::test]
async fn dashboard_substitutes_defaults_when_a_widget_fails() {
    let server = MockServer::start().await;
    let app = test_app(&server);
    let cookie = sign_in(&app, &server).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/portfolio/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "totalValue": 12500.0,
            "totalPositions": 3,
            "totalGain": 1500.0,
            "percentageReturn": 12.5
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/portfolio/top-holdings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/portfolio/allocation"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let response = app
        .oneshot(get_with_cookie("/dashboard", &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("$12,500.00"));
    assert!(body.contains("No data available"));
}

#[tokio::test]
async fn a_backend_401_bounces_to_login_and_destroys_the_cookie() {
    let server = MockServer::start().await;
    let app = test_app(&server);
    let cookie = sign_in(&app, &server).await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let response = app
        .oneshot(get_with_cookie("/dashboard", &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");

    let removal = set_cookie(&response);
    assert!(removal.starts_with("__session="));
    assert!(removal.contains("Max-Age=0"));
}

#[tokio::test]
async fn a_rotated_token_is_written_back_into_the_cookie() {
    let server = MockServer::start().await;
    let app = test_app(&server);
    let cookie = sign_in(&app, &server).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/stocks/top"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(AUTH_TOKEN_HEADER, "fresh-token")
                .set_body_json(serde_json::json!([])),
        )
        .mount(&server)
        .await;

    let response = app
        .oneshot(get_with_cookie("/stocks", &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let rewritten = set_cookie(&response);
    assert!(rewritten.starts_with("__session="));
    assert!(rewritten.contains("Max-Age=604800"));
}

#[tokio::test]
async fn an_invalid_sell_never_reaches_the_backend() {
    let server = MockServer::start().await;
    let app = test_app(&server);
    let cookie = sign_in(&app, &server).await;

    let response = app
        .oneshot(post_form(
            "/transactions/sell",
            Some(&cookie),
            "stockTicker=AAPL&quantity=0&price=150&fee=&transactionDate=",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_text(response).await;
    assert!(body.contains("Quantity must be greater than 0"));

    let requests = server.received_requests().await.unwrap();
    assert!(requests
        .iter()
        .all(|r| !r.url.path().contains("/transactions/sell")));
}

#[tokio::test]
async fn a_valid_sell_posts_to_the_backend_and_redirects() {
    let server = MockServer::start().await;
    let app = test_app(&server);
    let cookie = sign_in(&app, &server).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/transactions/sell"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "stockTicker": "AAPL",
            "transactionType": "SELL",
            "quantity": 2.0,
            "price": 150.0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = app
        .oneshot(post_form(
            "/transactions/sell",
            Some(&cookie),
            "stockTicker=aapl&quantity=2&price=150&fee=1.99&transactionDate=2025-06-01",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/portfolio/positions");
}

#[tokio::test]
async fn logout_clears_the_session_and_rejects_get() {
    let server = MockServer::start().await;
    let app = test_app(&server);
    let cookie = sign_in(&app, &server).await;

    let response = app
        .clone()
        .oneshot(post_form("/logout", Some(&cookie), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
    assert!(set_cookie(&response).contains("Max-Age=0"));

    let response = app.oneshot(get("/logout")).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn devtools_probes_get_an_empty_json_404() {
    let server = MockServer::start().await;
    let app = test_app(&server);

    let response = app
        .oneshot(get("/.well-known/appspecific/com.chrome.devtools.json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "{}");
}

#[tokio::test]
async fn unknown_paths_render_the_error_page() {
    let server = MockServer::start().await;
    let app = test_app(&server);

    let response = app.oneshot(get("/no-such-page")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_text(response).await;
    assert!(body.contains("404"));
}
