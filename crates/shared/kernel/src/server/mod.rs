//! Shared HTTP surface: state, system routes and the middleware guards.

mod cas;
pub mod guards;
mod health;
mod quiz;
pub mod router;
pub mod state;

pub use guards::apply_middleware;
pub use router::system_router;
pub use state::{ApiState, ApiStateBuilder, ApiStateError};

pub const SYSTEM_TAG: &str = "System";
pub const QUIZ_TAG: &str = "Quiz";
pub const AUTH_TAG: &str = "Auth";
