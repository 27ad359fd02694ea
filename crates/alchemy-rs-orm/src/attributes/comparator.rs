//! Comparators and clause adaptation.
//!
//! A [`PropComparator`] decides how operators applied to a class-level
//! attribute turn into SQL. The default behaviour compares the comparator's
//! clause element with the other operand; implementations can override
//! [`PropComparator::operate`] to rewrite either side (e.g. to compare
//! case-insensitively).
//!
//! [`HasClauseElement`] is the narrow "can be unwrapped into a clause
//! element" capability. Unwrapping may take several steps, so a single step
//! yields a [`ClauseSource`], which is either terminal or wraps another
//! unwrappable value.

use std::fmt;
use std::sync::Arc;

use alchemy_rs_core::OrmResult;

use crate::query::expressions::{Expression, Operator};
use crate::query::operand::Operand;

/// A value that can be unwrapped one step towards a query-clause element.
pub trait HasClauseElement: fmt::Debug + Send + Sync {
    /// Performs one unwrap step.
    fn unwrap_clause(&self) -> ClauseSource;
}

/// Either a terminal clause element or a value that unwraps further.
#[derive(Debug, Clone)]
pub enum ClauseSource {
    /// A terminal clause element.
    Element(Expression),
    /// A value exposing another unwrap step.
    Wrapped(Arc<dyn HasClauseElement>),
}

impl ClauseSource {
    /// Wraps an unwrappable value.
    pub fn wrap(source: impl HasClauseElement + 'static) -> Self {
        Self::Wrapped(Arc::new(source))
    }
}

impl From<Expression> for ClauseSource {
    fn from(expr: Expression) -> Self {
        Self::Element(expr)
    }
}

/// Defines operator behaviour for a class-level attribute.
pub trait PropComparator: fmt::Debug + Send + Sync {
    /// The terminal clause element this comparator stands for.
    fn clause_element(&self) -> Expression;

    /// Applies `op` with this comparator's element on the left.
    fn operate(&self, op: Operator, other: Operand) -> OrmResult<Expression> {
        Ok(Expression::operate(
            op,
            self.clause_element(),
            other.into_expression(),
        ))
    }

    /// Applies `op` with this comparator's element on the right.
    ///
    /// Operators with a swapped form (`other < self` is `self > other`) go
    /// through [`operate`](Self::operate), so overriding `operate` covers
    /// both operand orders. Only `-` and `/` build the reversed expression
    /// directly.
    fn reverse_operate(&self, op: Operator, other: Operand) -> OrmResult<Expression> {
        match op.swapped() {
            Some(swapped) => self.operate(swapped, other),
            None => Ok(Expression::operate(
                op,
                other.into_expression(),
                self.clause_element(),
            )),
        }
    }

    /// Returns a comparator whose clause element has been rewritten by
    /// `adapter`.
    fn adapted(self: Arc<Self>, adapter: &ClauseAdapter) -> Arc<dyn PropComparator>;
}

/// Rewrites column references of one table to an alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseAdapter {
    table: String,
    alias: String,
}

impl ClauseAdapter {
    /// Creates an adapter rewriting `table` columns to `alias`.
    pub fn new(table: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            alias: alias.into(),
        }
    }

    /// The table being rewritten.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The alias written in its place.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Returns a copy of `expr` with every column of the adapted table
    /// qualified by the alias instead.
    pub fn traverse(&self, expr: &Expression) -> Expression {
        expr.transform(&|node| match node {
            Expression::Column {
                table: Some(table),
                name,
            } if *table == self.table => Some(Expression::column(self.alias.as_str(), name.as_str())),
            _ => None,
        })
    }
}

/// The plain comparator over a fixed clause element, typically a column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnComparator {
    element: Expression,
}

impl ColumnComparator {
    /// Creates a comparator over `element`.
    pub fn new(element: Expression) -> Self {
        Self { element }
    }
}

impl PropComparator for ColumnComparator {
    fn clause_element(&self) -> Expression {
        self.element.clone()
    }

    fn adapted(self: Arc<Self>, adapter: &ClauseAdapter) -> Arc<dyn PropComparator> {
        Arc::new(Self {
            element: adapter.traverse(&self.element),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_adapter_rewrites_matching_table_only() {
        let expr = Expression::binary(
            Operator::Lt,
            Expression::column("interval", "start"),
            Expression::column("event", "at"),
        );
        let adapter = ClauseAdapter::new("interval", "i2");
        assert_eq!(
            adapter.traverse(&expr),
            Expression::binary(
                Operator::Lt,
                Expression::column("i2", "start"),
                Expression::column("event", "at"),
            )
        );
    }

    #[test]
    fn test_column_comparator_default_operate() {
        let cmp = ColumnComparator::new(Expression::column("interval", "end"));
        let expr = cmp.operate(Operator::Gt, Operand::from(3)).unwrap();
        assert_eq!(
            expr,
            Expression::binary(
                Operator::Gt,
                Expression::column("interval", "end"),
                Expression::value(3),
            )
        );

        // 3 < end is written end > 3.
        let expr = cmp.reverse_operate(Operator::Lt, Operand::from(3)).unwrap();
        assert_eq!(
            expr,
            Expression::binary(
                Operator::Gt,
                Expression::column("interval", "end"),
                Expression::value(3),
            )
        );

        let expr = cmp.reverse_operate(Operator::Sub, Operand::from(3)).unwrap();
        assert_eq!(
            expr,
            Expression::binary(
                Operator::Sub,
                Expression::value(3),
                Expression::column("interval", "end"),
            )
        );
    }

    #[derive(Debug)]
    struct Upper(Expression);

    impl PropComparator for Upper {
        fn clause_element(&self) -> Expression {
            self.0.clone()
        }

        fn operate(&self, op: Operator, other: Operand) -> OrmResult<Expression> {
            Ok(Expression::operate(
                op,
                Expression::func("upper", vec![self.clause_element()]),
                Expression::func("upper", vec![other.into_expression()]),
            ))
        }

        fn adapted(self: Arc<Self>, _adapter: &ClauseAdapter) -> Arc<dyn PropComparator> {
            self
        }
    }

    #[test]
    fn test_reverse_operate_goes_through_overridden_operate() {
        let cmp = Upper(Expression::column("tag", "name"));
        let forward = cmp.operate(Operator::Eq, Operand::from("x")).unwrap();
        let reverse = cmp.reverse_operate(Operator::Eq, Operand::from("x")).unwrap();
        assert_eq!(forward, reverse);

        let reverse = cmp.reverse_operate(Operator::Le, Operand::from("x")).unwrap();
        assert_eq!(
            reverse,
            Expression::binary(
                Operator::Ge,
                Expression::func("upper", vec![Expression::column("tag", "name")]),
                Expression::func("upper", vec![Expression::value("x")]),
            )
        );
    }

    #[test]
    fn test_reverse_null_comparison() {
        let cmp = ColumnComparator::new(Expression::column("interval", "end"));
        let expr = cmp
            .reverse_operate(Operator::Ne, Operand::from(Value::Null))
            .unwrap();
        assert_eq!(expr, Expression::column("interval", "end").is_not_null());
    }

    #[test]
    fn test_column_comparator_null_comparison() {
        let cmp = ColumnComparator::new(Expression::column("interval", "end"));
        let expr = cmp.operate(Operator::Eq, Operand::from(Value::Null)).unwrap();
        assert_eq!(expr, Expression::column("interval", "end").is_null());
    }

    #[test]
    fn test_column_comparator_adapted() {
        let cmp: Arc<dyn PropComparator> =
            Arc::new(ColumnComparator::new(Expression::column("interval", "end")));
        let adapted = cmp.adapted(&ClauseAdapter::new("interval", "i2"));
        assert_eq!(adapted.clause_element(), Expression::column("i2", "end"));
    }
}
