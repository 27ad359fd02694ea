//! Model trait and metadata.
//!
//! The [`Model`] trait is what every mapped struct implements: static
//! metadata describing its table and fields, plus dynamic read and write
//! access to field values by name. The attribute system builds on the latter
//! to serve column attributes from instances.

use alchemy_rs_core::OrmResult;

use crate::fields::FieldDef;
use crate::value::Value;

/// The core trait for mapped models.
///
/// # Examples
///
/// ```
/// use std::sync::OnceLock;
/// use alchemy_rs_core::{OrmError, OrmResult};
/// use alchemy_rs_orm::fields::{FieldDef, FieldType};
/// use alchemy_rs_orm::model::{Model, ModelMeta};
/// use alchemy_rs_orm::value::Value;
///
/// struct Interval {
///     start: i64,
///     end: i64,
/// }
///
/// impl Model for Interval {
///     fn meta() -> &'static ModelMeta {
///         static META: OnceLock<ModelMeta> = OnceLock::new();
///         META.get_or_init(|| {
///             ModelMeta::new("geo", "interval", "interval")
///                 .field(FieldDef::new("start", FieldType::IntegerField))
///                 .field(FieldDef::new("end", FieldType::IntegerField))
///         })
///     }
///
///     fn field_value(&self, name: &str) -> Option<Value> {
///         match name {
///             "start" => Some(Value::Int(self.start)),
///             "end" => Some(Value::Int(self.end)),
///             _ => None,
///         }
///     }
///
///     fn set_field_value(&mut self, name: &str, value: Value) -> OrmResult<()> {
///         let v = value
///             .as_int()
///             .ok_or_else(|| OrmError::TypeError(format!("{name} must be an integer")))?;
///         match name {
///             "start" => self.start = v,
///             "end" => self.end = v,
///             _ => return Err(OrmError::AttributeError(name.to_string())),
///         }
///         Ok(())
///     }
/// }
///
/// assert_eq!(Interval::table_name(), "interval");
/// ```
pub trait Model: Send + Sync + 'static {
    /// Returns the static metadata for this model type.
    fn meta() -> &'static ModelMeta;

    /// Returns the database table name.
    fn table_name() -> &'static str {
        &Self::meta().db_table
    }

    /// Reads a field value by attribute name, or `None` if there is no such field.
    fn field_value(&self, name: &str) -> Option<Value>;

    /// Writes a field value by attribute name.
    fn set_field_value(&mut self, name: &str, value: Value) -> OrmResult<()>;
}

/// Metadata about a model.
#[derive(Debug, Clone)]
pub struct ModelMeta {
    /// The application label (e.g., "scheduling").
    pub app_label: &'static str,
    /// The model name in lowercase (e.g., "interval").
    pub model_name: &'static str,
    /// The database table name.
    pub db_table: String,
    /// Field definitions for this model.
    pub fields: Vec<FieldDef>,
}

impl ModelMeta {
    /// Creates metadata with no fields.
    pub fn new(
        app_label: &'static str,
        model_name: &'static str,
        db_table: impl Into<String>,
    ) -> Self {
        Self {
            app_label,
            model_name,
            db_table: db_table.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field definition.
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldType;

    fn meta() -> ModelMeta {
        ModelMeta::new("scheduling", "interval", "scheduling_interval")
            .field(FieldDef::new("id", FieldType::AutoField))
            .field(FieldDef::new("start", FieldType::IntegerField))
            .field(FieldDef::new("end", FieldType::IntegerField).column("end_at"))
    }

    #[test]
    fn test_fields_keep_declaration_order() {
        let m = meta();
        let names: Vec<&str> = m.fields.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["id", "start", "end"]);
        assert_eq!(m.fields[2].column, "end_at");
        assert_eq!(m.db_table, "scheduling_interval");
    }
}
