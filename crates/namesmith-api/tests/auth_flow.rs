//! End-to-end tests of the HTTP API against in-memory stores.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;

use namesmith_api::{AppState, build_router};
use namesmith_auth::{AuthService, TokenKind};
use namesmith_core::config::{AppConfig, AuthConfig};
use namesmith_core::error::AppError;
use namesmith_core::result::AppResult;
use namesmith_core::traits::{MailMessage, Mailer};
use namesmith_core::types::PrincipalId;
use namesmith_database::Stores;
use namesmith_database::memory::{MemoryEmailCodeStore, MemoryUserStore};

const EMAIL: &str = "alice@example.com";
const PASSWORD: &str = "secret1";

#[derive(Debug, Default)]
struct RecordingMailer {
    sent: Mutex<Vec<MailMessage>>,
}

impl RecordingMailer {
    fn last_code(&self) -> String {
        let sent = self.sent.lock().unwrap();
        let body = &sent.last().expect("no mail sent").body;
        body.split_whitespace()
            .nth(4)
            .unwrap()
            .trim_end_matches('.')
            .to_string()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: MailMessage) -> AppResult<()> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

#[derive(Debug)]
struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _message: MailMessage) -> AppResult<()> {
        Err(AppError::external_service("SMTP connection refused"))
    }
}

struct TestApp {
    router: Router,
    auth: &'static AuthService,
    codes: Arc<MemoryEmailCodeStore>,
    mailer: Arc<RecordingMailer>,
}

fn setup() -> TestApp {
    let mailer = Arc::new(RecordingMailer::default());
    let (router, auth, codes) = build(mailer.clone());
    TestApp {
        router,
        auth,
        codes,
        mailer,
    }
}

fn build(mailer: Arc<dyn Mailer>) -> (Router, &'static AuthService, Arc<MemoryEmailCodeStore>) {
    build_with(
        AppConfig::with_auth(AuthConfig::with_secret("api-test-secret")),
        mailer,
    )
}

fn build_with(
    config: AppConfig,
    mailer: Arc<dyn Mailer>,
) -> (Router, &'static AuthService, Arc<MemoryEmailCodeStore>) {
    let auth: &'static AuthService =
        Box::leak(Box::new(AuthService::new(&config.auth).unwrap()));

    let codes = Arc::new(MemoryEmailCodeStore::new());
    let stores = Stores {
        users: Arc::new(MemoryUserStore::new()),
        codes: codes.clone(),
        pool: None,
    };

    let state = AppState::new(Arc::new(config), auth, stores, mailer);
    (build_router(state), auth, codes)
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn get_with_auth(uri: &str, authorization: &str) -> Request<Body> {
    Request::get(uri)
        .header(header::AUTHORIZATION, authorization)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn register_body(code: &str) -> Value {
    json!({
        "email": EMAIL,
        "username": "alice",
        "password": PASSWORD,
        "confirm_password": PASSWORD,
        "code": code,
    })
}

async fn request_code(app: &TestApp) -> String {
    let (status, body) = send(&app.router, get(&format!("/auth/code?email={EMAIL}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"result": "success"}));
    app.mailer.last_code()
}

async fn register(app: &TestApp) -> Value {
    let code = request_code(app).await;
    let (status, body) = send(&app.router, post_json("/auth/register", register_body(&code))).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body
}

async fn login(app: &TestApp) -> (String, String) {
    let (status, body) = send(
        &app.router,
        post_json("/auth/login", json!({"email": EMAIL, "password": PASSWORD})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    (
        body["access_token"].as_str().unwrap().to_string(),
        body["refresh_token"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn test_greetings_and_health() {
    let app = setup();

    let (status, body) = send(&app.router, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Hello World"}));

    let (_, body) = send(&app.router, get("/hello/Bob")).await;
    assert_eq!(body, json!({"message": "Hello Bob"}));

    let (status, body) = send(&app.router, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "memory");
}

#[tokio::test]
async fn test_full_token_flow() {
    let app = setup();

    let registered = register(&app).await;
    assert_eq!(registered["user"]["email"], EMAIL);
    assert_eq!(registered["user"]["username"], "alice");
    assert!(registered["user"].get("password_hash").is_none());
    let user_id = registered["user"]["id"].as_i64().unwrap();

    let (access, refresh) = login(&app).await;
    assert_ne!(access, refresh);

    let (status, body) =
        send(&app.router, get_with_auth("/auth/me", &format!("Bearer {access}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], user_id);

    let (status, body) = send(
        &app.router,
        post_json("/auth/refresh", json!({"refresh_token": refresh})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_object().unwrap().len(), 1);
    let refreshed = body["access_token"].as_str().unwrap();

    let (status, _) =
        send(&app.router, get_with_auth("/auth/me", &format!("Bearer {refreshed}"))).await;
    assert_eq!(status, StatusCode::OK);

    // The refresh token is not rotated.
    let (status, _) = send(
        &app.router,
        post_json("/auth/refresh", json!({"refresh_token": refresh})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_token_kinds_are_not_interchangeable() {
    let app = setup();
    register(&app).await;
    let (access, refresh) = login(&app).await;

    let (status, body) =
        send(&app.router, get_with_auth("/auth/me", &format!("Bearer {refresh}"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");

    let (status, body) = send(
        &app.router,
        post_json("/auth/refresh", json!({"refresh_token": access})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_guard_rejects_with_forbidden() {
    let app = setup();

    let (status, _) = send(&app.router, get("/auth/me")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    for header in ["Bearer not-a-token", "Basic dXNlcjpwYXNz", "Bearer "] {
        let (status, _) = send(&app.router, get_with_auth("/auth/me", header)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{header}");
    }

    let expired = app
        .auth
        .issuer()
        .issue_at(
            TokenKind::Access,
            PrincipalId::new(1),
            Utc::now() - Duration::hours(2),
        )
        .unwrap();
    let (status, body) =
        send(&app.router, get_with_auth("/auth/me", &format!("Bearer {expired}"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Access token has expired");
}

#[tokio::test]
async fn test_refresh_rejects_with_unauthorized() {
    let app = setup();

    let (status, _) = send(
        &app.router,
        post_json("/auth/refresh", json!({"refresh_token": "garbage"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let expired = app
        .auth
        .issuer()
        .issue_at(
            TokenKind::Refresh,
            PrincipalId::new(1),
            Utc::now() - Duration::days(30),
        )
        .unwrap();
    let (status, _) = send(
        &app.router,
        post_json("/auth/refresh", json!({"refresh_token": expired})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app.router, post_json("/auth/refresh", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_code_request_validation() {
    let app = setup();

    let (status, _) = send(&app.router, get("/auth/code?email=not-an-email")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app.router, get("/auth/code")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(app.mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_mail_failure_stores_nothing() {
    let (router, _, codes) = build(Arc::new(FailingMailer));

    let (status, body) = send(&router, get(&format!("/auth/code?email={EMAIL}"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "EXTERNAL_SERVICE_ERROR");
    assert!(!body["message"].as_str().unwrap().contains("SMTP"));

    use namesmith_database::EmailCodeStore;
    assert_eq!(codes.delete_for(EMAIL).await.unwrap(), 0);
}

#[tokio::test]
async fn test_register_rejects_bad_codes() {
    let app = setup();

    let (status, body) = send(&app.router, post_json("/auth/register", register_body("0000"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid or expired verification code");

    app.codes
        .create_at(EMAIL, "4321", Utc::now() - Duration::minutes(11));
    let (status, _) = send(&app.router, post_json("/auth/register", register_body("4321"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    app.codes.create_at(EMAIL, "4321", Utc::now() - Duration::minutes(9));
    let (status, _) = send(&app.router, post_json("/auth/register", register_body("4321"))).await;
    assert_eq!(status, StatusCode::OK);

    // Consumed by the successful registration.
    let (status, _) = send(&app.router, post_json("/auth/register", register_body("4321"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_field_validation() {
    let app = setup();
    let code = request_code(&app).await;

    let cases = [
        json!({"email": "nope", "username": "alice", "password": PASSWORD, "confirm_password": PASSWORD, "code": code}),
        json!({"email": EMAIL, "username": "al", "password": PASSWORD, "confirm_password": PASSWORD, "code": code}),
        json!({"email": EMAIL, "username": "a".repeat(21), "password": PASSWORD, "confirm_password": PASSWORD, "code": code}),
        json!({"email": EMAIL, "username": "alice", "password": "12345", "confirm_password": "12345", "code": code}),
        json!({"email": EMAIL, "username": "alice", "password": "x".repeat(21), "confirm_password": "x".repeat(21), "code": code}),
        json!({"email": EMAIL, "username": "alice", "password": PASSWORD, "confirm_password": "secret2", "code": code}),
        json!({"email": EMAIL, "username": "alice", "password": PASSWORD, "confirm_password": PASSWORD, "code": "123"}),
        json!({"email": EMAIL, "username": "alice", "password": PASSWORD}),
    ];

    for case in cases {
        let (status, body) = send(&app.router, post_json("/auth/register", case.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{case} -> {body}");
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    // The code survived every rejected attempt.
    let (status, _) = send(&app.router, post_json("/auth/register", register_body(&code))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_register_follows_configured_code_length() {
    let mut config = AppConfig::with_auth(AuthConfig::with_secret("api-test-secret"));
    config.mail.code_length = 6;
    let mailer = Arc::new(RecordingMailer::default());
    let (router, _, codes) = build_with(config, mailer.clone());

    let (status, _) = send(&router, get(&format!("/auth/code?email={EMAIL}"))).await;
    assert_eq!(status, StatusCode::OK);
    let code = mailer.last_code();
    assert_eq!(code.len(), 6);

    codes.create_at(EMAIL, "1234", Utc::now());
    let (status, body) = send(&router, post_json("/auth/register", register_body("1234"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Verification code must be 6 digits");

    let (status, body) = send(&router, post_json("/auth/register", register_body(&code))).await;
    assert_eq!(status, StatusCode::OK, "{body}");
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = setup();
    register(&app).await;

    let code = request_code(&app).await;
    let (status, body) = send(&app.router, post_json("/auth/register", register_body(&code))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_login_failures_are_unauthorized() {
    let app = setup();
    register(&app).await;

    for body in [
        json!({"email": EMAIL, "password": "wrong-password"}),
        json!({"email": "nobody@example.com", "password": PASSWORD}),
    ] {
        let (status, response) = send(&app.router, post_json("/auth/login", body)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(response["message"], "Invalid email or password");
    }
}
