//! # alchemy-rs-orm
//!
//! ORM layer for alchemy-rs. Provides the [`Model`](model::Model) trait for
//! describing mapped tables, the backend-agnostic [`Value`](value::Value),
//! the [`Expression`](query::Expression) tree used to build query clauses,
//! an [`SqlCompiler`](query::SqlCompiler) that renders it to parameterised
//! SQL, and the attribute system through which mapped attributes are read.
//!
//! ## Architecture
//!
//! Every attribute read goes through a [`Mapper`](attributes::Mapper) and a
//! [`Receiver`](attributes::Receiver). Reading through the class yields a
//! class-side [`Operand`](query::Operand) (an expression), reading through
//! an instance yields an in-memory value. Operators on operands either
//! evaluate immediately or build expressions, so the same code serves both
//! query building and in-memory evaluation.
//!
//! ## Module Overview
//!
//! - [`model`] - The [`Model`](model::Model) trait and [`ModelMeta`](model::ModelMeta)
//! - [`fields`] - Field definitions ([`FieldDef`](fields::FieldDef)) and types
//! - [`value`] - The backend-agnostic [`Value`](value::Value) enum
//! - [`query`] - Expressions, operands, and compilation
//! - [`attributes`] - Descriptors, mappers, comparators, and proxies

// These clippy lints are intentionally allowed for the ORM crate:
// - cast_precision_loss: i64-to-f64 casts are acceptable for mixed arithmetic
// - result_large_err: OrmError is the shared error type and is used consistently
// - format_push_string: format! with push_str is clearer than write! for SQL generation
// - doc_markdown: backtick requirements for documentation items are too strict
// - needless_pass_by_value: operator methods take operands by value
// - return_self_not_must_use: builder pattern methods are self-documenting
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::result_large_err)]
#![allow(clippy::format_push_string)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::should_implement_trait)]

pub mod attributes;
pub mod fields;
pub mod model;
pub mod query;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use attributes::{
    create_proxied_attribute, Attribute, BoundMethod, ClauseAdapter, ClauseSource,
    ColumnAttribute, ColumnComparator, Descriptor, HasClauseElement, Mapper, MethodFn,
    PropComparator, ProxiedAttribute, ProxyFactory, Receiver,
};
pub use fields::{FieldDef, FieldType};
pub use model::{Model, ModelMeta};
pub use query::{
    DatabaseBackendType, Expression, FromItem, Operand, Operator, OrderBy, Query, SqlCompiler,
};
pub use value::Value;
