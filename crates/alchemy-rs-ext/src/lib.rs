//! # alchemy-rs-ext
//!
//! Hybrid attributes for alchemy-rs. A hybrid attribute is written once and
//! behaves differently depending on how it is reached: read through a loaded
//! instance it evaluates in memory, read through the mapped class it builds
//! a query expression. Both behaviours come from the same function because
//! [`Operand`](alchemy_rs_orm::Operand) operators evaluate values and build
//! expressions alike.
//!
//! ## Modules
//!
//! - [`property`] - [`HybridProperty`], with optional setter, deleter,
//!   expression, and comparator
//! - [`method`] - [`HybridMethod`], bound to an instance or the class
//! - [`comparator`] - [`Comparator`], the base for custom comparators
//!
//! Hybrids are attached to a model with
//! [`Mapper::register`](alchemy_rs_orm::Mapper::register).

#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]

pub mod comparator;
pub mod method;
pub mod property;

pub use comparator::Comparator;
pub use method::HybridMethod;
pub use property::{ComparatorFactory, DeleterFn, HybridProperty, PropertyFn, SetterFn};
