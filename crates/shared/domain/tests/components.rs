use contest_domain::components::{App, Middleware};
use contest_domain::settings::{SecretKey, INSECURE_DEVELOPMENT_KEY};

#[test]
fn component_paths_match_module_names() {
    assert_eq!(App::Quiz.path(), "quiz.apps.QuizConfig");
    assert_eq!(App::BrowserReload.to_string(), "django_browser_reload");
    assert_eq!(Middleware::Cas.path(), "django_cas_ng.middleware.CASMiddleware");
}

#[test]
fn components_serialize_as_paths() {
    let value = serde_json::to_value([Middleware::Security, Middleware::Clickjacking])
        .expect("serialize middleware");
    assert_eq!(
        value,
        serde_json::json!([
            "django.middleware.security.SecurityMiddleware",
            "django.middleware.clickjacking.XFrameOptionsMiddleware"
        ])
    );
}

#[test]
fn only_browser_reload_is_debug_only() {
    assert!(Middleware::BrowserReload.is_debug_only());
    assert!(!Middleware::Csrf.is_debug_only());
    assert!(App::BrowserReload.is_debug_only());
    assert!(!App::Tailwind.is_debug_only());
}

#[test]
fn secret_key_debug_is_redacted() {
    let key = SecretKey::new("hunter2");
    assert_eq!(format!("{key:?}"), "SecretKey(**redacted**)");
    assert_eq!(key.expose(), "hunter2");
    assert!(SecretKey::new(INSECURE_DEVELOPMENT_KEY).is_insecure_default());
}

#[test]
fn http_layers_are_the_four_enforced_by_the_server() {
    let http: Vec<_> = [
        Middleware::Security,
        Middleware::Sessions,
        Middleware::Common,
        Middleware::Csrf,
        Middleware::Authentication,
        Middleware::Messages,
        Middleware::Clickjacking,
        Middleware::BrowserReload,
        Middleware::Cas,
    ]
    .into_iter()
    .filter(|m| m.is_http_layer())
    .collect();
    assert_eq!(
        http,
        [Middleware::Security, Middleware::Common, Middleware::Csrf, Middleware::Clickjacking]
    );
}
