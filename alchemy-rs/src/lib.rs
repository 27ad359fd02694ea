//! # alchemy-rs
//!
//! An ORM attribute layer for Rust with hybrid attributes.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient access.
//! You can depend on `alchemy-rs` to get everything, or depend on individual
//! crates for finer-grained control.

/// Core types, settings, logging, and error types.
pub use alchemy_rs_core as core;

/// ORM: models, values, expressions, SQL compilation, and mapped attributes.
pub use alchemy_rs_orm as orm;

/// Hybrid properties, hybrid methods, and comparators.
#[cfg(feature = "ext")]
pub use alchemy_rs_ext as ext;

/// Re-exported third-party crates.
pub use chrono;
pub use tracing;
pub use tracing_subscriber;

/// The most commonly used types, for glob import.
pub mod prelude {
    pub use alchemy_rs_core::{OrmError, OrmResult, Settings};
    pub use alchemy_rs_orm::attributes::Receiver;
    pub use alchemy_rs_orm::{
        DatabaseBackendType, Expression, FieldDef, FieldType, Mapper, Model, ModelMeta, Operand,
        Operator, Query, SqlCompiler, Value,
    };

    #[cfg(feature = "ext")]
    pub use alchemy_rs_ext::{Comparator, HybridMethod, HybridProperty};
}
