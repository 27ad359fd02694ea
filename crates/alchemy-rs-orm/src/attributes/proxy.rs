//! Proxied attributes.
//!
//! A [`ProxiedAttribute`] stands in for a descriptor at class level: it keeps
//! the attribute's key, owner and documentation, and forwards every operator
//! to a custom [`PropComparator`]. Descriptors obtain a [`ProxyFactory`] from
//! [`create_proxied_attribute`] and build proxies from it on each class
//! access.

use std::fmt;
use std::sync::Arc;

use alchemy_rs_core::OrmResult;

use super::comparator::{ClauseAdapter, ClauseSource, HasClauseElement, PropComparator};
use super::descriptor::Descriptor;
use crate::model::Model;
use crate::query::expressions::{Expression, Operator};
use crate::query::operand::Operand;

/// Returns a factory for proxies standing in for `descriptor`.
pub fn create_proxied_attribute<M, D>(descriptor: &D) -> ProxyFactory
where
    M: Model,
    D: Descriptor<M> + ?Sized,
{
    tracing::trace!(attribute = descriptor.name(), "creating proxied attribute factory");
    ProxyFactory {
        descriptor_type: std::any::type_name::<D>(),
    }
}

/// Builds [`ProxiedAttribute`]s for one kind of descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxyFactory {
    descriptor_type: &'static str,
}

impl ProxyFactory {
    /// The type name of the descriptor this factory proxies.
    pub const fn descriptor_type(&self) -> &'static str {
        self.descriptor_type
    }

    /// Builds a proxy for `descriptor`, registered as `key` on `owner`,
    /// whose operators are answered by `comparator`.
    pub fn create<M: Model>(
        &self,
        owner: impl Into<String>,
        key: impl Into<String>,
        descriptor: &dyn Descriptor<M>,
        comparator: Arc<dyn PropComparator>,
    ) -> ProxiedAttribute {
        ProxiedAttribute {
            owner: owner.into(),
            key: key.into(),
            doc: descriptor.doc().map(str::to_string),
            descriptor_type: self.descriptor_type,
            comparator,
        }
    }
}

/// A class-level attribute whose operators are defined by a comparator.
pub struct ProxiedAttribute {
    owner: String,
    key: String,
    doc: Option<String>,
    descriptor_type: &'static str,
    comparator: Arc<dyn PropComparator>,
}

impl fmt::Debug for ProxiedAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxiedAttribute")
            .field("owner", &self.owner)
            .field("key", &self.key)
            .field("descriptor_type", &self.descriptor_type)
            .field("comparator", &self.comparator)
            .finish()
    }
}

impl ProxiedAttribute {
    /// The attribute name.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The table or alias the attribute was read through.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The proxied descriptor's documentation.
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// The type name of the proxied descriptor.
    pub const fn descriptor_type(&self) -> &'static str {
        self.descriptor_type
    }

    /// The comparator answering this attribute's operators.
    pub const fn comparator(&self) -> &Arc<dyn PropComparator> {
        &self.comparator
    }

    /// The comparator's clause element.
    pub fn clause_element(&self) -> Expression {
        self.comparator.clause_element()
    }

    /// Applies `op` with this attribute on the left.
    pub fn operate(&self, op: Operator, other: Operand) -> OrmResult<Expression> {
        self.comparator.operate(op, other)
    }

    /// Applies `op` with this attribute on the right.
    pub fn reverse_operate(&self, op: Operator, other: Operand) -> OrmResult<Expression> {
        self.comparator.reverse_operate(op, other)
    }

    /// Returns this attribute re-targeted at the adapter's alias.
    pub fn adapted(&self, adapter: &ClauseAdapter) -> Self {
        Self {
            owner: adapter.alias().to_string(),
            key: self.key.clone(),
            doc: self.doc.clone(),
            descriptor_type: self.descriptor_type,
            comparator: Arc::clone(&self.comparator).adapted(adapter),
        }
    }
}

impl HasClauseElement for ProxiedAttribute {
    fn unwrap_clause(&self) -> ClauseSource {
        ClauseSource::Element(self.clause_element())
    }
}
