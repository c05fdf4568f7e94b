//! Kernel utilities shared by the contest binaries.
//! Keep this crate lightweight: settings resolution, request security checks and the quiz
//! policy live here; anything that needs a socket belongs to the apps.
//!
//! ## Settings
//! ```rust
//! use contest_kernel::settings::SettingsLoader;
//!
//! let settings = SettingsLoader::new().base_dir(".").load_from(&[("PATH", "")]).unwrap();
//! assert!(settings.debug);
//! assert!(settings.secret_key.is_insecure_default());
//! ```
//!
//! ## Service config
//! ```rust,no_run
//! use contest_kernel::domain::config::ServiceConfig;
//! use contest_kernel::config::load_config;
//!
//! let cfg: ServiceConfig = load_config(Some("contest")).unwrap();
//! ```
pub mod cas;
pub mod config;
pub mod prelude;
pub mod quiz;
pub mod security;
#[cfg(feature = "server")]
pub mod server;
pub mod settings;

pub use contest_domain as domain;
