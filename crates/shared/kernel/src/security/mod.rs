//! Request checks driven by the settings: `Host` header validation against the allowlist and
//! origin verification for unsafe requests.

pub mod csrf;
pub mod host;

pub use csrf::TrustedOrigins;
pub use host::{AllowedHosts, HostParts, is_same_domain, split_domain_port};
