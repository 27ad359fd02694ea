//! # alchemy-rs-core
//!
//! Core types for alchemy-rs: the shared error type, settings and their
//! loading, and tracing-based logging setup. This crate has no framework
//! dependencies and is the foundation for the other crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - The settings struct
//! - [`settings_loader`] - Loading settings from TOML and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{OrmError, OrmResult};
pub use settings::Settings;
