//! Backend-agnostic values and their in-memory evaluation.
//!
//! [`Value`] is what an attribute yields when it is read from a loaded model
//! instance. Hybrid attributes combine values with the same [`Operator`]s
//! that build SQL expressions on the class side, so the evaluation rules here
//! follow SQL rather than Rust: any comparison or arithmetic involving `NULL`
//! is `NULL`, `AND`/`OR` use three-valued logic, and integer division
//! truncates.

use std::cmp::Ordering;
use std::fmt;

use alchemy_rs_core::{OrmError, OrmResult};

use crate::query::expressions::Operator;

/// A backend-agnostic representation of a database value.
///
/// # Examples
///
/// ```
/// use alchemy_rs_orm::value::Value;
///
/// assert_eq!(Value::from(42_i64), Value::Int(42));
/// assert_eq!(Value::from("hello"), Value::String("hello".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// A boolean value.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A UTF-8 string.
    String(String),
    /// A date without time.
    Date(chrono::NaiveDate),
    /// A date and time without timezone.
    DateTime(chrono::NaiveDateTime),
    /// A duration / interval.
    Duration(chrono::Duration),
    /// A UUID value.
    Uuid(uuid::Uuid),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::DateTime(dt) => write!(f, "{dt}"),
            Self::Duration(d) => write!(f, "{d}"),
            Self::Uuid(u) => write!(f, "{u}"),
        }
    }
}

// ── From implementations ───────────────────────────────────────────────

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<chrono::NaiveDate> for Value {
    fn from(v: chrono::NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<chrono::NaiveDateTime> for Value {
    fn from(v: chrono::NaiveDateTime) -> Self {
        Self::DateTime(v)
    }
}

impl From<chrono::Duration> for Value {
    fn from(v: chrono::Duration) -> Self {
        Self::Duration(v)
    }
}

impl From<uuid::Uuid> for Value {
    fn from(v: uuid::Uuid) -> Self {
        Self::Uuid(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Self::Null,
        }
    }
}

impl Value {
    /// Returns `true` if this value is `Null`.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Attempts to extract a boolean value.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract an integer value.
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to extract a float value. Integers are widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The SQL-ish name of this value's type, used in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Date(_) => "date",
            Self::DateTime(_) => "datetime",
            Self::Duration(_) => "interval",
            Self::Uuid(_) => "uuid",
        }
    }

    /// Evaluates `self <op> rhs` in memory.
    ///
    /// `=` and `<>` against `NULL` answer like `IS NULL` and `IS NOT NULL`,
    /// matching what [`Expression::operate`](crate::Expression::operate)
    /// renders for the same comparison. Every other operator propagates
    /// `NULL`.
    ///
    /// # Errors
    ///
    /// Returns [`OrmError::TypeError`] when the operand types do not support
    /// `op`, and [`OrmError::ArithmeticError`] on integer overflow or
    /// division by zero.
    pub fn apply(&self, op: Operator, rhs: &Self) -> OrmResult<Self> {
        if op.is_logical() {
            return self.logical(op, rhs);
        }
        if self.is_null() || rhs.is_null() {
            return Ok(match op {
                Operator::Eq => Self::Bool(self.is_null() && rhs.is_null()),
                Operator::Ne => Self::Bool(self.is_null() != rhs.is_null()),
                _ => Self::Null,
            });
        }
        if op.is_arithmetic() {
            return self.arithmetic(op, rhs);
        }
        self.compare(op, rhs).map(Self::Bool)
    }

    /// Logical negation. `NOT NULL` is `NULL`.
    pub fn negate(&self) -> OrmResult<Self> {
        match self.truth()? {
            Some(b) => Ok(Self::Bool(!b)),
            None => Ok(Self::Null),
        }
    }

    fn truth(&self) -> OrmResult<Option<bool>> {
        match self {
            Self::Null => Ok(None),
            Self::Bool(b) => Ok(Some(*b)),
            other => Err(OrmError::TypeError(format!(
                "expected a boolean, got {}",
                other.type_name()
            ))),
        }
    }

    fn logical(&self, op: Operator, rhs: &Self) -> OrmResult<Self> {
        let (a, b) = (self.truth()?, rhs.truth()?);
        let result = match op {
            Operator::And => match (a, b) {
                (Some(false), _) | (_, Some(false)) => Some(false),
                (Some(true), Some(true)) => Some(true),
                _ => None,
            },
            Operator::Or => match (a, b) {
                (Some(true), _) | (_, Some(true)) => Some(true),
                (Some(false), Some(false)) => Some(false),
                _ => None,
            },
            other => return Err(self.unsupported(other, rhs)),
        };
        Ok(result.map_or(Self::Null, Self::Bool))
    }

    fn compare(&self, op: Operator, rhs: &Self) -> OrmResult<bool> {
        let ordering = match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_)) => {
                match (self.as_float(), rhs.as_float()) {
                    (Some(a), Some(b)) => a.partial_cmp(&b),
                    _ => None,
                }
            }
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::String(a), Self::String(b)) => Some(a.cmp(b)),
            (Self::Date(a), Self::Date(b)) => Some(a.cmp(b)),
            (Self::DateTime(a), Self::DateTime(b)) => Some(a.cmp(b)),
            (Self::Duration(a), Self::Duration(b)) => Some(a.cmp(b)),
            (Self::Uuid(a), Self::Uuid(b)) => Some(a.cmp(b)),
            _ => {
                return match op {
                    Operator::Eq => Ok(false),
                    Operator::Ne => Ok(true),
                    other => Err(self.unsupported(other, rhs)),
                }
            }
        };

        // NaN compares unequal to everything.
        let Some(ordering) = ordering else {
            return Ok(op == Operator::Ne);
        };

        match op {
            Operator::Eq => Ok(ordering == Ordering::Equal),
            Operator::Ne => Ok(ordering != Ordering::Equal),
            Operator::Lt => Ok(ordering == Ordering::Less),
            Operator::Le => Ok(ordering != Ordering::Greater),
            Operator::Gt => Ok(ordering == Ordering::Greater),
            Operator::Ge => Ok(ordering != Ordering::Less),
            other => Err(self.unsupported(other, rhs)),
        }
    }

    fn arithmetic(&self, op: Operator, rhs: &Self) -> OrmResult<Self> {
        let overflow = || {
            OrmError::ArithmeticError(format!("overflow evaluating {self} {op} {rhs}"))
        };

        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => {
                let result = match op {
                    Operator::Add => a.checked_add(*b),
                    Operator::Sub => a.checked_sub(*b),
                    Operator::Mul => a.checked_mul(*b),
                    Operator::Div if *b == 0 => {
                        return Err(OrmError::ArithmeticError(
                            "integer division by zero".to_string(),
                        ))
                    }
                    Operator::Div => a.checked_div(*b),
                    other => return Err(self.unsupported(other, rhs)),
                };
                result.map(Self::Int).ok_or_else(overflow)
            }
            (Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_)) => {
                let (Some(a), Some(b)) = (self.as_float(), rhs.as_float()) else {
                    return Err(self.unsupported(op, rhs));
                };
                match op {
                    Operator::Add => Ok(Self::Float(a + b)),
                    Operator::Sub => Ok(Self::Float(a - b)),
                    Operator::Mul => Ok(Self::Float(a * b)),
                    Operator::Div => Ok(Self::Float(a / b)),
                    other => Err(self.unsupported(other, rhs)),
                }
            }
            (Self::String(a), Self::String(b)) if op == Operator::Add => {
                Ok(Self::String(format!("{a}{b}")))
            }
            (Self::Date(a), Self::Date(b)) if op == Operator::Sub => {
                Ok(Self::Duration(a.signed_duration_since(*b)))
            }
            (Self::DateTime(a), Self::DateTime(b)) if op == Operator::Sub => {
                Ok(Self::Duration(a.signed_duration_since(*b)))
            }
            (Self::Date(a), Self::Duration(d)) => match op {
                Operator::Add => a.checked_add_signed(*d).map(Self::Date).ok_or_else(overflow),
                Operator::Sub => a.checked_sub_signed(*d).map(Self::Date).ok_or_else(overflow),
                other => Err(self.unsupported(other, rhs)),
            },
            (Self::DateTime(a), Self::Duration(d)) => match op {
                Operator::Add => a
                    .checked_add_signed(*d)
                    .map(Self::DateTime)
                    .ok_or_else(overflow),
                Operator::Sub => a
                    .checked_sub_signed(*d)
                    .map(Self::DateTime)
                    .ok_or_else(overflow),
                other => Err(self.unsupported(other, rhs)),
            },
            (Self::Duration(a), Self::Duration(b)) => match op {
                Operator::Add => a.checked_add(b).map(Self::Duration).ok_or_else(overflow),
                Operator::Sub => a.checked_sub(b).map(Self::Duration).ok_or_else(overflow),
                other => Err(self.unsupported(other, rhs)),
            },
            _ => Err(self.unsupported(op, rhs)),
        }
    }

    fn unsupported(&self, op: Operator, rhs: &Self) -> OrmError {
        OrmError::TypeError(format!(
            "unsupported operand types for {op}: {} and {}",
            self.type_name(),
            rhs.type_name()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
        chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(7_i32), Value::Int(7));
        assert_eq!(Value::from(1.5_f64), Value::Float(1.5));
        assert_eq!(Value::from("x"), Value::String("x".into()));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(3_i64)), Value::Int(3));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::from(date(2024, 1, 15)).to_string(), "2024-01-15");
    }

    #[test]
    fn test_int_arithmetic() {
        assert_eq!(Value::Int(10).apply(Operator::Sub, &Value::Int(4)).unwrap(), Value::Int(6));
        assert_eq!(Value::Int(3).apply(Operator::Mul, &Value::Int(4)).unwrap(), Value::Int(12));
        assert_eq!(Value::Int(7).apply(Operator::Div, &Value::Int(2)).unwrap(), Value::Int(3));
    }

    #[test]
    fn test_int_division_by_zero() {
        let err = Value::Int(1).apply(Operator::Div, &Value::Int(0)).unwrap_err();
        assert!(matches!(err, OrmError::ArithmeticError(_)));
    }

    #[test]
    fn test_int_overflow() {
        let err = Value::Int(i64::MAX).apply(Operator::Add, &Value::Int(1)).unwrap_err();
        assert!(matches!(err, OrmError::ArithmeticError(_)));
    }

    #[test]
    fn test_mixed_numeric_promotes_to_float() {
        assert_eq!(
            Value::Int(1).apply(Operator::Add, &Value::Float(0.5)).unwrap(),
            Value::Float(1.5)
        );
    }

    #[test]
    fn test_string_concat() {
        assert_eq!(
            Value::from("ab").apply(Operator::Add, &Value::from("cd")).unwrap(),
            Value::from("abcd")
        );
        assert!(Value::from("ab").apply(Operator::Sub, &Value::from("cd")).is_err());
    }

    #[test]
    fn test_date_arithmetic() {
        let diff = Value::from(date(2024, 3, 1))
            .apply(Operator::Sub, &Value::from(date(2024, 2, 1)))
            .unwrap();
        assert_eq!(diff, Value::Duration(chrono::Duration::days(29)));

        let later = Value::from(date(2024, 2, 1))
            .apply(Operator::Add, &Value::Duration(chrono::Duration::days(29)))
            .unwrap();
        assert_eq!(later, Value::from(date(2024, 3, 1)));
    }

    #[test]
    fn test_null_propagation() {
        assert_eq!(Value::Null.apply(Operator::Add, &Value::Int(1)).unwrap(), Value::Null);
        assert_eq!(Value::Int(1).apply(Operator::Lt, &Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn test_null_equality_answers_like_is_null() {
        let one = Value::Int(1);
        assert_eq!(Value::Null.apply(Operator::Eq, &Value::Null).unwrap(), Value::Bool(true));
        assert_eq!(one.apply(Operator::Eq, &Value::Null).unwrap(), Value::Bool(false));
        assert_eq!(Value::Null.apply(Operator::Eq, &one).unwrap(), Value::Bool(false));
        assert_eq!(one.apply(Operator::Ne, &Value::Null).unwrap(), Value::Bool(true));
        assert_eq!(Value::Null.apply(Operator::Ne, &Value::Null).unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(Value::Int(1).apply(Operator::Lt, &Value::Int(2)).unwrap(), Value::Bool(true));
        assert_eq!(Value::Int(2).apply(Operator::Le, &Value::Int(2)).unwrap(), Value::Bool(true));
        assert_eq!(Value::Float(2.5).apply(Operator::Gt, &Value::Int(2)).unwrap(), Value::Bool(true));
        assert_eq!(
            Value::from("a").apply(Operator::Ge, &Value::from("b")).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn test_mismatched_comparison() {
        assert_eq!(
            Value::Int(1).apply(Operator::Eq, &Value::from("1")).unwrap(),
            Value::Bool(false)
        );
        assert!(Value::Int(1).apply(Operator::Lt, &Value::from("1")).is_err());
    }

    #[test]
    fn test_nan_comparison() {
        let nan = Value::Float(f64::NAN);
        assert_eq!(nan.apply(Operator::Eq, &nan).unwrap(), Value::Bool(false));
        assert_eq!(nan.apply(Operator::Ne, &nan).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_three_valued_logic() {
        let t = Value::Bool(true);
        let f = Value::Bool(false);
        assert_eq!(f.apply(Operator::And, &Value::Null).unwrap(), f);
        assert_eq!(t.apply(Operator::And, &Value::Null).unwrap(), Value::Null);
        assert_eq!(t.apply(Operator::Or, &Value::Null).unwrap(), t);
        assert_eq!(f.apply(Operator::Or, &f).unwrap(), f);
        assert!(Value::Int(1).apply(Operator::And, &t).is_err());
    }

    #[test]
    fn test_negate() {
        assert_eq!(Value::Bool(true).negate().unwrap(), Value::Bool(false));
        assert_eq!(Value::Null.negate().unwrap(), Value::Null);
        assert!(Value::Int(0).negate().is_err());
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Int(3).as_float(), Some(3.0));
        assert_eq!(Value::Int(3).as_int(), Some(3));
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::from("s").as_str(), Some("s"));
        assert_eq!(Value::Null.as_str(), None);
    }
}
