//! The mapped-attribute system.
//!
//! Attribute access on a mapped model goes through a [`Mapper`], which
//! holds one [`Descriptor`] per attribute name. Descriptors decide what
//! reading, writing, and deleting an attribute means; column attributes are
//! registered automatically and extensions attach their own.
//!
//! - [`descriptor`] - The descriptor protocol, receivers, and bound methods
//! - [`mapper`] - Per-model registries and column attributes
//! - [`comparator`] - Comparators, clause unwrapping, and clause adaptation
//! - [`proxy`] - Comparator-backed proxied attributes

pub mod comparator;
pub mod descriptor;
pub mod mapper;
pub mod proxy;

pub use comparator::{
    ClauseAdapter, ClauseSource, ColumnComparator, HasClauseElement, PropComparator,
};
pub use descriptor::{Attribute, BoundMethod, Descriptor, MethodFn, Receiver};
pub use mapper::{ColumnAttribute, Mapper};
pub use proxy::{create_proxied_attribute, ProxiedAttribute, ProxyFactory};
