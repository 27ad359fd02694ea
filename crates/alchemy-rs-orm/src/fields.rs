//! Field definitions for mapped models.
//!
//! Every [`FieldDef`] in a model's metadata becomes a column attribute on the
//! model's [`Mapper`](crate::attributes::Mapper).

use crate::value::Value;

/// The type of a model field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Auto-incrementing 64-bit integer primary key.
    AutoField,
    /// 64-bit signed integer.
    IntegerField,
    /// 64-bit floating-point number.
    FloatField,
    /// Variable-length string.
    CharField,
    /// Boolean (true/false).
    BooleanField,
    /// Date without time.
    DateField,
    /// Date and time.
    DateTimeField,
    /// Duration / interval.
    DurationField,
    /// UUID field.
    UuidField,
}

impl FieldType {
    /// Returns `true` if a non-null `value` can be stored in this field.
    /// Integers are accepted by float fields.
    pub const fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::AutoField | Self::IntegerField, Value::Int(_))
                | (Self::FloatField, Value::Float(_) | Value::Int(_))
                | (Self::CharField, Value::String(_))
                | (Self::BooleanField, Value::Bool(_))
                | (Self::DateField, Value::Date(_))
                | (Self::DateTimeField, Value::DateTime(_))
                | (Self::DurationField, Value::Duration(_))
                | (Self::UuidField, Value::Uuid(_))
        )
    }
}

/// Metadata about a single model field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// The attribute name of this field.
    pub name: &'static str,
    /// The database column name (may differ from `name`).
    pub column: String,
    /// The field type.
    pub field_type: FieldType,
    /// Whether the column accepts NULL.
    pub null: bool,
}

impl FieldDef {
    /// Creates a non-null field whose column name matches its attribute name.
    pub fn new(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            column: name.to_string(),
            field_type,
            null: false,
        }
    }

    /// Sets the database column name.
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    /// Marks the field as nullable.
    pub const fn nullable(mut self) -> Self {
        self.null = true;
        self
    }
}
