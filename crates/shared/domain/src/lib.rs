//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`).
//! Keep it lean: no I/O, networking, or environment access. Just data and simple helpers.
//! Resolution of these types from the process environment lives in `contest-kernel`.

pub mod components;
pub mod config;
pub mod constants;
pub mod settings;
