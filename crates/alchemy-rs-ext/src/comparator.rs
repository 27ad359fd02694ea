//! A comparator over an arbitrary clause-like value.
//!
//! [`Comparator`] is the usual base for custom comparators handed to
//! [`HybridProperty::comparator`](crate::HybridProperty::comparator). It
//! holds an expression that may need several unwrap steps before it yields
//! a plain clause element, and answers operators against that element.

use std::sync::Arc;

use alchemy_rs_orm::attributes::{ClauseAdapter, ClauseSource, HasClauseElement, PropComparator};
use alchemy_rs_orm::Expression;

/// A comparator wrapping one clause-like value.
#[derive(Debug, Clone)]
pub struct Comparator {
    expression: ClauseSource,
}

impl Comparator {
    /// Wraps `expression`.
    pub fn new(expression: impl Into<ClauseSource>) -> Self {
        Self {
            expression: expression.into(),
        }
    }

    /// The wrapped value, before unwrapping.
    pub const fn expression(&self) -> &ClauseSource {
        &self.expression
    }
}

impl HasClauseElement for Comparator {
    fn unwrap_clause(&self) -> ClauseSource {
        ClauseSource::Element(self.clause_element())
    }
}

impl PropComparator for Comparator {
    /// Unwraps the held value until a terminal clause element is reached.
    fn clause_element(&self) -> Expression {
        let mut source = self.expression.clone();
        loop {
            match source {
                ClauseSource::Element(expr) => return expr,
                ClauseSource::Wrapped(inner) => source = inner.unwrap_clause(),
            }
        }
    }

    /// Returns the comparator unchanged.
    // TODO: rewrite the held expression through the adapter once aliased
    // comparator properties need it; ColumnComparator::adapted shows how.
    fn adapted(self: Arc<Self>, _adapter: &ClauseAdapter) -> Arc<dyn PropComparator> {
        self
    }
}
