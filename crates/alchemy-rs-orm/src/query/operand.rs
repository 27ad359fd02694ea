//! The result of reading an attribute.
//!
//! Reading an attribute through a loaded instance yields an
//! [`Operand::Value`]; reading it through the mapped class yields an
//! [`Operand::Expression`] or, for comparator-backed attributes, an
//! [`Operand::Proxy`]. The operators defined here are what lets one function
//! body serve both sides: values are combined in memory, anything else
//! builds a larger expression tree.
//!
//! # Examples
//!
//! ```
//! use alchemy_rs_orm::query::{Expression, Operand};
//! use alchemy_rs_orm::value::Value;
//!
//! // Instance side: plain arithmetic.
//! let length = (Operand::from(10) - Operand::from(4)).unwrap();
//! assert_eq!(length.as_value(), Some(&Value::Int(6)));
//!
//! // Class side: an expression.
//! let end = Operand::from(Expression::column("interval", "end"));
//! let start = Operand::from(Expression::column("interval", "start"));
//! let length = (end - start).unwrap();
//! assert!(length.is_class_side());
//! ```

use std::ops;
use std::sync::Arc;

use alchemy_rs_core::{OrmError, OrmResult};

use super::expressions::{Expression, Operator};
use crate::attributes::{ClauseSource, ProxiedAttribute};
use crate::value::Value;

/// An attribute value from either side of a mapped model.
#[derive(Debug, Clone)]
pub enum Operand {
    /// An in-memory value read from an instance.
    Value(Value),
    /// A query-clause element built at class level.
    Expression(Expression),
    /// A comparator-backed class-level attribute.
    Proxy(Arc<ProxiedAttribute>),
}

impl Operand {
    /// Returns `true` unless this is an in-memory value.
    pub const fn is_class_side(&self) -> bool {
        !matches!(self, Self::Value(_))
    }

    /// Returns the in-memory value, if this is one.
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the expression, if this is a plain class-level expression.
    pub const fn as_expression(&self) -> Option<&Expression> {
        match self {
            Self::Expression(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the proxied attribute, if this is one.
    pub const fn as_proxy(&self) -> Option<&Arc<ProxiedAttribute>> {
        match self {
            Self::Proxy(p) => Some(p),
            _ => None,
        }
    }

    /// Consumes the operand, returning the in-memory value.
    ///
    /// # Errors
    ///
    /// Returns [`OrmError::TypeError`] for class-side operands.
    pub fn into_value(self) -> OrmResult<Value> {
        match self {
            Self::Value(v) => Ok(v),
            other => Err(OrmError::TypeError(format!(
                "expected an instance value, got a class-level expression: {:?}",
                other.into_expression()
            ))),
        }
    }

    /// Converts the operand into a query-clause element. Values become bound
    /// literals; proxies are unwrapped through their comparator.
    pub fn into_expression(self) -> Expression {
        match self {
            Self::Value(v) => Expression::Value(v),
            Self::Expression(e) => e,
            Self::Proxy(p) => p.clause_element(),
        }
    }

    /// Applies `op` with `self` on the left.
    ///
    /// Two values are evaluated in memory. A proxy on either side answers
    /// through its comparator. Anything else builds an expression.
    pub fn operate(self, op: Operator, other: impl Into<Operand>) -> OrmResult<Operand> {
        match (self, other.into()) {
            (Self::Value(a), Self::Value(b)) => a.apply(op, &b).map(Self::Value),
            (Self::Proxy(p), rhs) => p.operate(op, rhs).map(Self::Expression),
            (lhs, Self::Proxy(p)) => p.reverse_operate(op, lhs).map(Self::Expression),
            (lhs, rhs) => Ok(Self::Expression(Expression::operate(
                op,
                lhs.into_expression(),
                rhs.into_expression(),
            ))),
        }
    }

    /// `self = other`
    pub fn equals(self, other: impl Into<Operand>) -> OrmResult<Operand> {
        self.operate(Operator::Eq, other)
    }

    /// `self <> other`
    pub fn not_equals(self, other: impl Into<Operand>) -> OrmResult<Operand> {
        self.operate(Operator::Ne, other)
    }

    /// `self < other`
    pub fn lt(self, other: impl Into<Operand>) -> OrmResult<Operand> {
        self.operate(Operator::Lt, other)
    }

    /// `self <= other`
    pub fn le(self, other: impl Into<Operand>) -> OrmResult<Operand> {
        self.operate(Operator::Le, other)
    }

    /// `self > other`
    pub fn gt(self, other: impl Into<Operand>) -> OrmResult<Operand> {
        self.operate(Operator::Gt, other)
    }

    /// `self >= other`
    pub fn ge(self, other: impl Into<Operand>) -> OrmResult<Operand> {
        self.operate(Operator::Ge, other)
    }

    /// `self AND other`
    pub fn and(self, other: impl Into<Operand>) -> OrmResult<Operand> {
        self.operate(Operator::And, other)
    }

    /// `self OR other`
    pub fn or(self, other: impl Into<Operand>) -> OrmResult<Operand> {
        self.operate(Operator::Or, other)
    }

    /// `NOT self`
    pub fn negate(self) -> OrmResult<Operand> {
        match self {
            Self::Value(v) => v.negate().map(Self::Value),
            other => Ok(Self::Expression(other.into_expression().negate())),
        }
    }

    /// `self IS NULL`, or a null test of the in-memory value.
    pub fn is_null(self) -> Operand {
        match self {
            Self::Value(v) => Self::Value(Value::Bool(v.is_null())),
            other => Self::Expression(other.into_expression().is_null()),
        }
    }
}

// ── Conversions ────────────────────────────────────────────────────────

impl From<Value> for Operand {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

impl From<Expression> for Operand {
    fn from(e: Expression) -> Self {
        Self::Expression(e)
    }
}

impl From<Arc<ProxiedAttribute>> for Operand {
    fn from(p: Arc<ProxiedAttribute>) -> Self {
        Self::Proxy(p)
    }
}

impl From<ProxiedAttribute> for Operand {
    fn from(p: ProxiedAttribute) -> Self {
        Self::Proxy(Arc::new(p))
    }
}

impl From<bool> for Operand {
    fn from(v: bool) -> Self {
        Self::Value(v.into())
    }
}

impl From<i32> for Operand {
    fn from(v: i32) -> Self {
        Self::Value(v.into())
    }
}

impl From<i64> for Operand {
    fn from(v: i64) -> Self {
        Self::Value(v.into())
    }
}

impl From<f64> for Operand {
    fn from(v: f64) -> Self {
        Self::Value(v.into())
    }
}

impl From<&str> for Operand {
    fn from(v: &str) -> Self {
        Self::Value(v.into())
    }
}

impl From<String> for Operand {
    fn from(v: String) -> Self {
        Self::Value(v.into())
    }
}

impl From<Operand> for ClauseSource {
    fn from(operand: Operand) -> Self {
        match operand {
            Operand::Proxy(p) => Self::Wrapped(p),
            other => Self::Element(other.into_expression()),
        }
    }
}

// ── Operators ──────────────────────────────────────────────────────────
//
// Arithmetic on values can fail (overflow, type mismatch), so every
// operator yields `OrmResult<Operand>`.

impl<T: Into<Operand>> ops::Add<T> for Operand {
    type Output = OrmResult<Operand>;
    fn add(self, rhs: T) -> Self::Output {
        self.operate(Operator::Add, rhs)
    }
}

impl<T: Into<Operand>> ops::Sub<T> for Operand {
    type Output = OrmResult<Operand>;
    fn sub(self, rhs: T) -> Self::Output {
        self.operate(Operator::Sub, rhs)
    }
}

impl<T: Into<Operand>> ops::Mul<T> for Operand {
    type Output = OrmResult<Operand>;
    fn mul(self, rhs: T) -> Self::Output {
        self.operate(Operator::Mul, rhs)
    }
}

impl<T: Into<Operand>> ops::Div<T> for Operand {
    type Output = OrmResult<Operand>;
    fn div(self, rhs: T) -> Self::Output {
        self.operate(Operator::Div, rhs)
    }
}

impl<T: Into<Operand>> ops::BitAnd<T> for Operand {
    type Output = OrmResult<Operand>;
    fn bitand(self, rhs: T) -> Self::Output {
        self.operate(Operator::And, rhs)
    }
}

impl<T: Into<Operand>> ops::BitOr<T> for Operand {
    type Output = OrmResult<Operand>;
    fn bitor(self, rhs: T) -> Self::Output {
        self.operate(Operator::Or, rhs)
    }
}

impl ops::Not for Operand {
    type Output = OrmResult<Operand>;
    fn not(self) -> Self::Output {
        self.negate()
    }
}
