//! Resolved application settings.
//!
//! A [`Settings`] value is produced once at startup by the kernel and shared read-only afterwards.

use crate::components::{
    App, AuthBackend, ContextProcessor, DatabaseEngine, Middleware, PasswordValidator,
};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Secret key used outside production when `SECRET_KEY` is not provided.
pub const INSECURE_DEVELOPMENT_KEY: &str =
    "django-insecure-$cwq@cw1*q!9490s%a-%b=#vf*l(hhed$swpy5eu#f0&ahx=v4";

/// Host patterns accepted in the `Host` header.
pub const ALLOWED_HOSTS: &[&str] = &[
    ".localhost",
    "127.0.0.1",
    "[::1]",
    "contest.bitnp.net",
    "contest-test.bitnp.net",
    "everything411.top",
];

/// Origins trusted for unsafe (state-changing) requests.
pub const CSRF_TRUSTED_ORIGINS: &[&str] =
    &["https://contest.bitnp.net", "https://contest-test.bitnp.net", "https://everything411.top"];

pub const CAS_SERVER_URL: &str = "https://login.bit.edu.cn/devcas/";
pub const LOGIN_URL: &str = "login";
pub const LOGOUT_URL: &str = "logout";
pub const LOGIN_REDIRECT_URL: &str = "quiz:index";
pub const ROOT_URLCONF: &str = "contest.urls";
pub const AUTH_USER_MODEL: &str = "quiz.User";
pub const DATABASE_FILE: &str = "db.sqlite3";

/// Deployment mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    #[must_use]
    pub const fn is_debug(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Production => "production",
        })
    }
}

/// Signing secret. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl SecretKey {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// True when the key is the built-in development key.
    #[must_use]
    pub fn is_insecure_default(&self) -> bool {
        self.0 == INSECURE_DEVELOPMENT_KEY
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(**redacted**)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateSettings {
    pub dirs: Vec<PathBuf>,
    pub app_dirs: bool,
    pub context_processors: Vec<ContextProcessor>,
    pub debug: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseSettings {
    pub engine: DatabaseEngine,
    pub name: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct I18nSettings {
    pub language_code: String,
    pub time_zone: String,
    pub use_i18n: bool,
    pub use_tz: bool,
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            language_code: "zh-hans".to_owned(),
            time_zone: "Asia/Shanghai".to_owned(),
            use_i18n: true,
            use_tz: true,
        }
    }
}

/// Static asset serving: URL prefix and directory, relative to the base dir.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaticSettings {
    pub url: String,
    pub root: PathBuf,
}

impl Default for StaticSettings {
    fn default() -> Self {
        Self { url: "static/".to_owned(), root: PathBuf::from("static/") }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthSettings {
    pub user_model: String,
    pub login_url: String,
    pub login_redirect_url: String,
    pub backends: Vec<AuthBackend>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            user_model: AUTH_USER_MODEL.to_owned(),
            login_url: LOGIN_URL.to_owned(),
            login_redirect_url: LOGIN_REDIRECT_URL.to_owned(),
            backends: vec![AuthBackend::Model, AuthBackend::Cas],
        }
    }
}

/// CAS single sign-on wiring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CasSettings {
    pub server_url: String,
    pub login_url_name: String,
    /// Also used by built-in admin templates.
    pub logout_url_name: String,
    pub redirect_url: String,
    pub check_next: bool,
}

impl CasSettings {
    /// CAS settings that follow the login routes of `auth`.
    #[must_use]
    pub fn for_auth(auth: &AuthSettings) -> Self {
        Self {
            server_url: CAS_SERVER_URL.to_owned(),
            login_url_name: auth.login_url.clone(),
            logout_url_name: LOGOUT_URL.to_owned(),
            redirect_url: auth.login_redirect_url.clone(),
            check_next: false,
        }
    }
}

/// Frontend tooling, present only in development.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TailwindSettings {
    pub app_name: String,
    pub internal_ips: Vec<String>,
    /// `pnpm` executable, when one is on `PATH`.
    pub npm_bin_path: Option<PathBuf>,
}

/// The full, resolved settings snapshot.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_dir: PathBuf,
    pub mode: Mode,
    pub debug: bool,
    pub secret_key: SecretKey,
    pub allowed_hosts: Vec<String>,
    pub installed_apps: Vec<App>,
    pub middleware: Vec<Middleware>,
    pub root_urlconf: String,
    pub templates: TemplateSettings,
    pub database: DatabaseSettings,
    pub password_validators: Vec<PasswordValidator>,
    pub i18n: I18nSettings,
    pub static_files: StaticSettings,
    pub auth: AuthSettings,
    pub cas: CasSettings,
    pub csrf_trusted_origins: Vec<String>,
    pub tailwind: Option<TailwindSettings>,
}

impl Settings {
    /// Absolute directory static assets are served from.
    #[must_use]
    pub fn static_dir(&self) -> PathBuf {
        self.base_dir.join(&self.static_files.root)
    }
}
