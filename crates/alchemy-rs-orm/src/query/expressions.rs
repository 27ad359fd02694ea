//! Query-clause elements.
//!
//! [`Expression`] is the tree the SQL compiler renders. Class-level attribute
//! access produces expressions: a column attribute yields
//! [`Expression::Column`], and hybrid attributes combine those with
//! [`Operator`]s into larger trees.
//!
//! # Examples
//!
//! ```
//! use alchemy_rs_orm::query::expressions::{Expression, Operator};
//!
//! // "interval"."end" - "interval"."start"
//! let length = Expression::binary(
//!     Operator::Sub,
//!     Expression::column("interval", "end"),
//!     Expression::column("interval", "start"),
//! );
//! assert!(matches!(length, Expression::Binary { op: Operator::Sub, .. }));
//! ```

use std::fmt;

use crate::value::Value;

/// Binary operators shared by in-memory evaluation and SQL generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `=`
    Eq,
    /// `!=` / `<>`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `AND`
    And,
    /// `OR`
    Or,
}

impl Operator {
    /// Returns the SQL spelling of this operator.
    pub const fn sql(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    /// Returns `true` for `= <> < <= > >=`.
    pub const fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Eq | Self::Ne | Self::Lt | Self::Le | Self::Gt | Self::Ge
        )
    }

    /// Returns `true` for `AND` and `OR`.
    pub const fn is_logical(&self) -> bool {
        matches!(self, Self::And | Self::Or)
    }

    /// Returns `true` for `+ - * /`.
    pub const fn is_arithmetic(&self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Mul | Self::Div)
    }

    /// The operator to use when the operands are swapped, if one exists.
    ///
    /// `a < b` is `b > a`; `a - b` has no swapped form.
    pub const fn swapped(&self) -> Option<Self> {
        match self {
            Self::Lt => Some(Self::Gt),
            Self::Le => Some(Self::Ge),
            Self::Gt => Some(Self::Lt),
            Self::Ge => Some(Self::Le),
            Self::Eq | Self::Ne | Self::Add | Self::Mul | Self::And | Self::Or => Some(*self),
            Self::Sub | Self::Div => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql())
    }
}

/// A query-clause element.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A column reference, optionally qualified by a table or alias.
    Column {
        /// The table name or alias.
        table: Option<String>,
        /// The column name.
        name: String,
    },
    /// A literal value, rendered as a bound parameter.
    Value(Value),
    /// A database function call.
    Func {
        /// Function name (e.g., "LOWER", "COALESCE").
        name: String,
        /// Function arguments.
        args: Vec<Expression>,
    },
    /// A binary operation.
    Binary {
        /// The operator.
        op: Operator,
        /// Left operand.
        lhs: Box<Expression>,
        /// Right operand.
        rhs: Box<Expression>,
    },
    /// Logical negation.
    Not(Box<Expression>),
    /// `expr IS NULL` / `expr IS NOT NULL`.
    IsNull {
        /// The tested expression.
        expr: Box<Expression>,
        /// Whether this is `IS NOT NULL`.
        negated: bool,
    },
    /// `expr AS name`.
    Label {
        /// The label.
        name: String,
        /// The labelled expression.
        expr: Box<Expression>,
    },
}

impl Expression {
    /// Creates a table-qualified column reference.
    pub fn column(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Column {
            table: Some(table.into()),
            name: name.into(),
        }
    }

    /// Creates an unqualified column reference.
    pub fn bare_column(name: impl Into<String>) -> Self {
        Self::Column {
            table: None,
            name: name.into(),
        }
    }

    /// Creates a literal value expression.
    pub fn value(v: impl Into<Value>) -> Self {
        Self::Value(v.into())
    }

    /// Creates a function call expression.
    pub fn func(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Self::Func {
            name: name.into(),
            args,
        }
    }

    /// Creates a binary expression.
    pub fn binary(op: Operator, lhs: Expression, rhs: Expression) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Combines two operands with `op`, turning `= NULL` and `<> NULL`
    /// into `IS NULL` and `IS NOT NULL` whichever side the null is on.
    pub fn operate(op: Operator, lhs: Expression, rhs: Expression) -> Self {
        match (op, lhs, rhs) {
            (Operator::Eq, other, Self::Value(Value::Null))
            | (Operator::Eq, Self::Value(Value::Null), other) => other.is_null(),
            (Operator::Ne, other, Self::Value(Value::Null))
            | (Operator::Ne, Self::Value(Value::Null), other) => other.is_not_null(),
            (op, lhs, rhs) => Self::binary(op, lhs, rhs),
        }
    }

    /// Wraps this expression in `NOT (...)`. Double negation cancels.
    pub fn negate(self) -> Self {
        match self {
            Self::Not(inner) => *inner,
            other => Self::Not(Box::new(other)),
        }
    }

    /// `self IS NULL`.
    pub fn is_null(self) -> Self {
        Self::IsNull {
            expr: Box::new(self),
            negated: false,
        }
    }

    /// `self IS NOT NULL`.
    pub fn is_not_null(self) -> Self {
        Self::IsNull {
            expr: Box::new(self),
            negated: true,
        }
    }

    /// `self AS name`.
    pub fn label(self, name: impl Into<String>) -> Self {
        Self::Label {
            name: name.into(),
            expr: Box::new(self),
        }
    }

    /// Rebuilds the tree bottom-up, giving `f` a chance to replace each node.
    ///
    /// `f` returns `Some(replacement)` to substitute a node, or `None` to
    /// keep it (with its children already transformed).
    pub fn transform<F>(&self, f: &F) -> Self
    where
        F: Fn(&Expression) -> Option<Expression>,
    {
        if let Some(replaced) = f(self) {
            return replaced;
        }
        match self {
            Self::Column { .. } | Self::Value(_) => self.clone(),
            Self::Func { name, args } => Self::Func {
                name: name.clone(),
                args: args.iter().map(|a| a.transform(f)).collect(),
            },
            Self::Binary { op, lhs, rhs } => Self::Binary {
                op: *op,
                lhs: Box::new(lhs.transform(f)),
                rhs: Box::new(rhs.transform(f)),
            },
            Self::Not(inner) => Self::Not(Box::new(inner.transform(f))),
            Self::IsNull { expr, negated } => Self::IsNull {
                expr: Box::new(expr.transform(f)),
                negated: *negated,
            },
            Self::Label { name, expr } => Self::Label {
                name: name.clone(),
                expr: Box::new(expr.transform(f)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_expression() {
        let expr = Expression::column("interval", "start");
        assert_eq!(
            expr,
            Expression::Column {
                table: Some("interval".into()),
                name: "start".into()
            }
        );
    }

    #[test]
    fn test_value_expression() {
        assert_eq!(Expression::value(42), Expression::Value(Value::Int(42)));
    }

    #[test]
    fn test_func_expression() {
        let expr = Expression::func("LOWER", vec![Expression::bare_column("name")]);
        if let Expression::Func { name, args } = &expr {
            assert_eq!(name, "LOWER");
            assert_eq!(args.len(), 1);
        } else {
            panic!("Expected Func");
        }
    }

    #[test]
    fn test_operate_null_becomes_is_null() {
        let col = Expression::bare_column("deleted_at");
        assert_eq!(
            Expression::operate(Operator::Eq, col.clone(), Expression::Value(Value::Null)),
            col.clone().is_null()
        );
        assert_eq!(
            Expression::operate(Operator::Ne, col.clone(), Expression::Value(Value::Null)),
            col.clone().is_not_null()
        );
        assert_eq!(
            Expression::operate(Operator::Ne, Expression::Value(Value::Null), col.clone()),
            col.is_not_null()
        );
    }

    #[test]
    fn test_double_negation() {
        let expr = Expression::bare_column("active");
        assert_eq!(expr.clone().negate().negate(), expr);
    }

    #[test]
    fn test_operator_classes() {
        assert!(Operator::Lt.is_comparison());
        assert!(Operator::And.is_logical());
        assert!(Operator::Div.is_arithmetic());
        assert!(!Operator::Add.is_comparison());
        assert_eq!(Operator::Ne.to_string(), "<>");
    }

    #[test]
    fn test_operator_swapped() {
        assert_eq!(Operator::Lt.swapped(), Some(Operator::Gt));
        assert_eq!(Operator::Ge.swapped(), Some(Operator::Le));
        assert_eq!(Operator::Eq.swapped(), Some(Operator::Eq));
        assert_eq!(Operator::Sub.swapped(), None);
    }

    #[test]
    fn test_transform_replaces_columns() {
        let expr = Expression::binary(
            Operator::Sub,
            Expression::column("interval", "end"),
            Expression::column("interval", "start"),
        )
        .label("length");

        let renamed = expr.transform(&|e| match e {
            Expression::Column { name, .. } => Some(Expression::column("i2", name.clone())),
            _ => None,
        });

        let expected = Expression::binary(
            Operator::Sub,
            Expression::column("i2", "end"),
            Expression::column("i2", "start"),
        )
        .label("length");
        assert_eq!(renamed, expected);
    }
}
