use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Deployment knobs read from the optional service file and `CONTEST__*` overrides.
///
/// Application settings (hosts, apps, CAS, quiz policy) are not part of this file; they are
/// resolved from the environment by the kernel.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfigInner {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(flatten, default)]
    inner: Arc<ServiceConfigInner>,
}

impl Deref for ServiceConfig {
    type Target = ServiceConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ServiceConfig {
    fn deref_mut(&mut self) -> &mut ServiceConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Log output configuration.
///
/// `level` is a `tracing` level name; when absent it follows the resolved mode
/// (`debug` in development, `info` in production).
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub directory: Option<PathBuf>,
    pub json: bool,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::LOCALHOST), port: 8000, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}
