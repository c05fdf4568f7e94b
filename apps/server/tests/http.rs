use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use contest_kernel::domain::settings::Settings;
use contest_kernel::server::ApiState;
use contest_kernel::settings::SettingsLoader;
use http_body_util::BodyExt;
use serde_json::Value;
use std::path::Path;
use tower::ServiceExt;

fn settings_in(base_dir: &Path, vars: &[(&str, &str)]) -> Settings {
    SettingsLoader::new().base_dir(base_dir).load_from(vars).expect("settings")
}

fn settings(vars: &[(&str, &str)]) -> Settings {
    settings_in(&std::env::temp_dir(), vars)
}

fn app_with(settings: Settings, secure: bool) -> Router {
    let state =
        ApiState::builder().settings(settings).secure(secure).build().expect("state builds");
    contest_server::app(state)
}

fn dev_app() -> Router {
    app_with(settings(&[]), false)
}

fn request(method: Method, uri: &str, host: &str) -> axum::http::request::Builder {
    Request::builder().method(method).uri(uri).header(header::HOST, host)
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn health_reports_debug_mode() {
    let response = dev_app()
        .oneshot(request(Method::GET, "/health", "localhost:8000").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::PRAGMA], "no-cache");
    let body = json_body(response).await;
    assert_eq!(body["status"], "up");
    assert_eq!(body["debug"], true);
}

#[tokio::test]
async fn quiz_policy_exposes_constants() {
    let response = dev_app()
        .oneshot(request(Method::GET, "/api/quiz/policy", "127.0.0.1").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["deadlineSeconds"], 900);
    assert_eq!(body["questionsPerResponse"], 3);
}

#[tokio::test]
async fn security_headers_are_set() {
    let response = dev_app()
        .oneshot(request(Method::GET, "/health", "contest.bitnp.net").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(headers[header::REFERRER_POLICY], "same-origin");
    assert_eq!(headers["cross-origin-opener-policy"], "same-origin");
    assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
}

#[tokio::test]
async fn disallowed_host_is_rejected() {
    let response = dev_app()
        .oneshot(request(Method::GET, "/health", "attacker.example").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    // Outer layers still decorate the rejection.
    assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
}

#[tokio::test]
async fn subdomain_of_localhost_is_allowed() {
    let response = dev_app()
        .oneshot(request(Method::GET, "/health", "quiz.localhost:8000").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unsafe_request_without_origin_is_forbidden() {
    let response = dev_app()
        .oneshot(request(Method::POST, "/health", "localhost").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unsafe_request_from_untrusted_origin_is_forbidden() {
    let response = dev_app()
        .oneshot(
            request(Method::POST, "/health", "contest.bitnp.net")
                .header(header::ORIGIN, "https://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn trusted_origin_passes_csrf_check() {
    let response = app_with(settings(&[("DJANGO_PRODUCTION", "1"), ("SECRET_KEY", "k")]), true)
        .oneshot(
            request(Method::POST, "/health", "contest.bitnp.net")
                .header(header::ORIGIN, "https://contest.bitnp.net")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Past the guards, the GET-only route answers 405.
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn same_origin_passes_csrf_check() {
    let response = dev_app()
        .oneshot(
            request(Method::POST, "/health", "127.0.0.1:8000")
                .header(header::ORIGIN, "http://127.0.0.1:8000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn cas_endpoint_builds_login_url() {
    let response = dev_app()
        .oneshot(
            request(Method::GET, "/api/cas?service=https%3A%2F%2Fcontest.bitnp.net%2F", "localhost")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["serverUrl"], "https://login.bit.edu.cn/devcas/");
    assert_eq!(body["loginUrlName"], "login");
    assert_eq!(body["logoutUrlName"], "logout");
    assert_eq!(body["checkNext"], false);
    assert_eq!(
        body["loginUrl"],
        "https://login.bit.edu.cn/devcas/login?service=https%3A%2F%2Fcontest.bitnp.net%2F"
    );
    assert_eq!(body["logoutUrl"], "https://login.bit.edu.cn/devcas/logout");
}

#[tokio::test]
async fn cas_endpoint_omits_login_url_without_service() {
    let response = dev_app()
        .oneshot(request(Method::GET, "/api/cas", "localhost").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let body = json_body(response).await;
    assert!(body.get("loginUrl").is_none());
}

#[tokio::test]
async fn static_files_are_served_from_base_dir() {
    let base = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir_all(base.path().join("static")).expect("static dir");
    std::fs::write(base.path().join("static/app.css"), "body{}").expect("asset");

    let response = app_with(settings_in(base.path(), &[]), false)
        .oneshot(request(Method::GET, "/static/app.css", "localhost").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    assert_eq!(&bytes[..], b"body{}");
}

#[test]
fn builder_fails_fast_without_production_secret() {
    let debug = contest_server::Server::builder()
        .settings(settings(&[]))
        .build()
        .map(|server| server.state().settings.debug);
    assert_eq!(debug.ok(), Some(true));

    let loaded = SettingsLoader::new().load_from(&[("DJANGO_PRODUCTION", "1")]);
    assert!(loaded.is_err(), "production without SECRET_KEY must not resolve");
}
