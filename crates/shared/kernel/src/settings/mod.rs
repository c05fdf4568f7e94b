//! Startup resolution of [`Settings`] from the environment.
//!
//! `DJANGO_PRODUCTION` selects the mode: any non-empty value means production, which turns debug
//! off and makes `SECRET_KEY` mandatory. Without it the service runs in development mode with
//! the built-in insecure key unless `SECRET_KEY` is provided.

mod env;
mod tooling;

pub use env::{EnvSource, ProcessEnv};
pub use tooling::find_executable;

use contest_domain::components::{
    App, ContextProcessor, DatabaseEngine, Middleware, PasswordValidator,
};
use contest_domain::settings::{
    ALLOWED_HOSTS, AuthSettings, CSRF_TRUSTED_ORIGINS, CasSettings, DATABASE_FILE,
    DatabaseSettings, I18nSettings, INSECURE_DEVELOPMENT_KEY, Mode, ROOT_URLCONF, SecretKey,
    Settings, StaticSettings, TailwindSettings, TemplateSettings,
};
use std::borrow::Cow;
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub const PRODUCTION_VAR: &str = "DJANGO_PRODUCTION";
pub const SECRET_KEY_VAR: &str = "SECRET_KEY";

/// Host patterns used when debug is on and no hosts are configured.
pub const DEBUG_FALLBACK_HOSTS: &[&str] = &[".localhost", "127.0.0.1", "[::1]"];

const TAILWIND_APP_NAME: &str = "theme";
const NPM_PROGRAM: &str = "pnpm";

#[contest_derive::contest_error]
pub enum SettingsError {
    #[error(
        "Missing required environment variable{}: {variable} must be set when DJANGO_PRODUCTION is set",
        format_context(.context)
    )]
    MissingSecretKey { variable: &'static str, context: Option<Cow<'static, str>> },

    #[error(
        "Invalid environment variable{}: {variable} is not valid Unicode",
        format_context(.context)
    )]
    NotUnicode { variable: &'static str, context: Option<Cow<'static, str>> },

    #[error("Base directory error{}: {source}", format_context(.context))]
    BaseDir { source: std::io::Error, context: Option<Cow<'static, str>> },
}

/// Yields `items` only in debug mode.
///
/// Used to splice development-only entries into ordered lists without disturbing the order of
/// the surrounding entries:
///
/// ```rust
/// use contest_kernel::settings::debug_only;
///
/// let build = |debug| -> Vec<&str> {
///     std::iter::once("pre").chain(debug_only(debug, ["dev"])).chain(["post"]).collect()
/// };
/// assert_eq!(build(true), ["pre", "dev", "post"]);
/// assert_eq!(build(false), ["pre", "post"]);
/// ```
pub fn debug_only<I>(debug: bool, items: I) -> impl Iterator<Item = I::Item>
where
    I: IntoIterator,
{
    items.into_iter().filter(move |_| debug)
}

/// Deployment mode selected by `DJANGO_PRODUCTION`.
pub fn resolve_mode(env: &(impl EnvSource + ?Sized)) -> Mode {
    if env.flag(PRODUCTION_VAR) { Mode::Production } else { Mode::Development }
}

/// Secret key for `mode`.
///
/// # Errors
/// * [`SettingsError::MissingSecretKey`] in production when `SECRET_KEY` is absent.
/// * [`SettingsError::NotUnicode`] when `SECRET_KEY` is not valid Unicode, in any mode.
pub fn resolve_secret_key(
    env: &(impl EnvSource + ?Sized),
    mode: Mode,
) -> Result<SecretKey, SettingsError> {
    let key = env
        .var(SECRET_KEY_VAR)
        .map_err(|_| SettingsError::NotUnicode { variable: SECRET_KEY_VAR, context: None })?;

    match (mode, key) {
        (_, Some(key)) => Ok(SecretKey::new(key)),
        (Mode::Production, None) => {
            Err(SettingsError::MissingSecretKey { variable: SECRET_KEY_VAR, context: None })
        }
        (Mode::Development, None) => Ok(SecretKey::new(INSECURE_DEVELOPMENT_KEY)),
    }
}

/// Builds a [`Settings`] snapshot from an environment source.
///
/// # Example
/// ```rust
/// use contest_kernel::settings::SettingsLoader;
///
/// let settings = SettingsLoader::new()
///     .base_dir("/srv/contest")
///     .load_from(&[("SECRET_KEY", "s3cr3t")])
///     .unwrap();
/// assert!(settings.debug);
/// assert_eq!(settings.database.name, std::path::Path::new("/srv/contest/db.sqlite3"));
/// ```
#[derive(Debug, Default)]
#[must_use = "call .load() to resolve the settings"]
pub struct SettingsLoader {
    base_dir: Option<PathBuf>,
    allowed_hosts: Option<Vec<String>>,
}

impl SettingsLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project root; defaults to the working directory.
    pub fn base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Replaces the built-in host allowlist.
    pub fn allowed_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_hosts = Some(hosts.into_iter().map(Into::into).collect());
        self
    }

    /// Resolves against the process environment.
    ///
    /// # Errors
    /// See [`SettingsLoader::load_from`].
    pub fn load(self) -> Result<Settings, SettingsError> {
        self.load_from(&ProcessEnv)
    }

    /// Resolves against `env`.
    ///
    /// # Errors
    /// * [`SettingsError::MissingSecretKey`] in production without `SECRET_KEY`.
    /// * [`SettingsError::NotUnicode`] when `SECRET_KEY` is not valid Unicode.
    /// * [`SettingsError::BaseDir`] when no base dir is set and the working directory is
    ///   unavailable.
    pub fn load_from(self, env: &(impl EnvSource + ?Sized)) -> Result<Settings, SettingsError> {
        let mode = resolve_mode(env);
        let secret_key = resolve_secret_key(env, mode)?;
        let debug = mode.is_debug();

        let base_dir = match self.base_dir {
            Some(dir) => dir,
            None => std::env::current_dir().context("Resolving working directory")?,
        };

        if !debug && secret_key.is_insecure_default() {
            warn!("SECURITY: production is running with the development secret key");
        }

        let allowed_hosts = self
            .allowed_hosts
            .unwrap_or_else(|| ALLOWED_HOSTS.iter().map(|h| (*h).to_owned()).collect());

        let auth = AuthSettings::default();
        let cas = CasSettings::for_auth(&auth);

        let settings = Settings {
            database: DatabaseSettings {
                engine: DatabaseEngine::Sqlite,
                name: base_dir.join(DATABASE_FILE),
            },
            tailwind: debug.then(|| tailwind_settings(env)),
            base_dir,
            mode,
            debug,
            secret_key,
            allowed_hosts,
            installed_apps: installed_apps(debug),
            middleware: middleware(debug),
            root_urlconf: ROOT_URLCONF.to_owned(),
            templates: TemplateSettings {
                dirs: Vec::new(),
                app_dirs: true,
                context_processors: vec![
                    ContextProcessor::Debug,
                    ContextProcessor::Request,
                    ContextProcessor::Auth,
                    ContextProcessor::Messages,
                ],
                debug,
            },
            password_validators: vec![
                PasswordValidator::UserAttributeSimilarity,
                PasswordValidator::MinimumLength,
                PasswordValidator::CommonPassword,
                PasswordValidator::Numeric,
            ],
            i18n: I18nSettings::default(),
            static_files: StaticSettings::default(),
            auth,
            cas,
            csrf_trusted_origins: CSRF_TRUSTED_ORIGINS.iter().map(|o| (*o).to_owned()).collect(),
        };

        info!(
            mode = %settings.mode,
            debug = settings.debug,
            hosts = settings.allowed_hosts.len(),
            base_dir = %settings.base_dir.display(),
            "Settings resolved"
        );

        Ok(settings)
    }
}

/// Host patterns actually enforced: the configured list, or the local fallbacks when debug is
/// on and nothing is configured.
#[must_use]
pub fn effective_allowed_hosts(settings: &Settings) -> Vec<String> {
    if settings.debug && settings.allowed_hosts.is_empty() {
        DEBUG_FALLBACK_HOSTS.iter().map(|h| (*h).to_owned()).collect()
    } else {
        settings.allowed_hosts.clone()
    }
}

fn installed_apps(debug: bool) -> Vec<App> {
    [
        App::Quiz,
        App::QuizTemplateTags,
        App::Humanize,
        App::Admin,
        App::Auth,
        App::ContentTypes,
        App::Sessions,
        App::Messages,
        App::StaticFiles,
        App::Cas,
        App::Tailwind,
        App::Theme,
        App::Js,
    ]
    .into_iter()
    .chain(debug_only(debug, [App::BrowserReload]))
    .collect()
}

fn middleware(debug: bool) -> Vec<Middleware> {
    [
        Middleware::Security,
        Middleware::Sessions,
        Middleware::Common,
        Middleware::Csrf,
        Middleware::Authentication,
        Middleware::Messages,
        Middleware::Clickjacking,
    ]
    .into_iter()
    .chain(debug_only(debug, [Middleware::BrowserReload]))
    .chain([Middleware::Cas])
    .collect()
}

fn tailwind_settings(env: &(impl EnvSource + ?Sized)) -> TailwindSettings {
    let search_path = env.var_os("PATH");
    let npm_bin_path = find_executable(NPM_PROGRAM, search_path.as_deref());
    if npm_bin_path.is_none() {
        debug!("{NPM_PROGRAM} not found on PATH; frontend tooling is unavailable");
    }

    TailwindSettings {
        app_name: TAILWIND_APP_NAME.to_owned(),
        internal_ips: vec!["127.0.0.1".to_owned()],
        npm_bin_path,
    }
}
