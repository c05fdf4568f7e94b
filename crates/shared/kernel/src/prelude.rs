pub use crate::cas::CasUrls;
pub use crate::config::{ConfigError, load_config};
pub use crate::quiz::ResponseDeadline;
pub use crate::security::{AllowedHosts, TrustedOrigins};
#[cfg(feature = "server")]
pub use crate::server::{ApiState, apply_middleware, system_router};
pub use crate::settings::{SettingsError, SettingsLoader};
pub use contest_domain::constants::{CONSTANTS, QuizConstants};
pub use contest_domain::settings::{Mode, Settings};
