use config::{Config, Environment, File, Map};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of environment overrides for the service file (`CONTEST__SERVER__PORT=8080`).
pub const ENV_PREFIX: &str = "CONTEST";

/// Service file looked up when no path is given (any supported extension, e.g. `contest.toml`).
pub const DEFAULT_CONFIG_FILE: &str = "contest";

#[contest_derive::contest_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads the service configuration from an optional file and `CONTEST__*` overrides.
///
/// Layers, lowest priority first:
/// 1. **Base File**: `path`, or `contest` in the working directory. A missing file is not an
///    error; every field of the target type is expected to have a default.
/// 2. **Environment Overrides**: variables prefixed with `CONTEST__`, nested with `__`
///    (`CONTEST__LOGGING__JSON=true` maps to `logging.json`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is malformed or the merged values do not fit `T`.
///
/// # Example
/// ```rust
/// use contest_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// #[serde(default)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("does/not/exist")).unwrap_or_default();
/// assert_eq!(cfg.port, 0);
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_layers(path, None)
}

/// Same as [`load_config`], with the environment layer read from `vars` instead of the process.
///
/// # Errors
/// See [`load_config`].
pub fn load_config_with_env<T>(
    path: Option<impl AsRef<Path>>,
    vars: Map<String, String>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_layers(path, Some(vars))
}

fn load_layers<T>(
    path: Option<impl AsRef<Path>>,
    vars: Option<Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .convert_case(config::Case::Snake)
                .source(vars),
        );

    info!("Loading service config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contest_domain::config::ServiceConfig;
    use std::io::Write;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg: ServiceConfig =
            load_config_with_env(Some("no/such/contest.toml"), Map::new()).expect("defaults");
        assert_eq!(cfg.server.port, 8000);
        assert!(cfg.server.ssl.is_none());
    }

    #[test]
    fn file_values_are_read() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().expect("temp file");
        writeln!(file, "[server]\nport = 9001\n\n[logging]\nlevel = \"warn\"").expect("write");

        let cfg: ServiceConfig = load_config_with_env(Some(file.path()), Map::new()).expect("load");
        assert_eq!(cfg.server.port, 9001);
        assert_eq!(cfg.logging.level.as_deref(), Some("warn"));
    }

    #[test]
    fn environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().expect("temp file");
        writeln!(file, "[server]\nport = 9001").expect("write");

        let vars = Map::from([
            ("CONTEST__SERVER__PORT".to_owned(), "9100".to_owned()),
            ("CONTEST__LOGGING__JSON".to_owned(), "true".to_owned()),
        ]);
        let cfg: ServiceConfig = load_config_with_env(Some(file.path()), vars).expect("load");
        assert_eq!(cfg.server.port, 9100);
        assert!(cfg.logging.json);
    }

    #[test]
    fn malformed_values_are_reported() {
        let vars = Map::from([("CONTEST__SERVER__PORT".to_owned(), "not-a-port".to_owned())]);
        let err = load_config_with_env::<ServiceConfig>(None::<&str>, vars).expect_err("bad port");
        assert!(err.to_string().contains("Failed to deserialize config"));
    }
}
