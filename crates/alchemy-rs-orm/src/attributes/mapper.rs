//! Per-model attribute registries.
//!
//! A [`Mapper`] is the set of attributes attached to one mapped class.
//! Creating it attaches a [`ColumnAttribute`] for every field in the model's
//! metadata; further descriptors (such as hybrid attributes) are attached
//! with [`Mapper::register`]. Reads go through a [`Receiver`], so the same
//! name resolves against the class or an instance depending only on how it
//! was reached.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use alchemy_rs_core::logging::attribute_span;
use alchemy_rs_core::{OrmError, OrmResult};

use super::descriptor::{Attribute, Descriptor, Receiver};
use crate::fields::{FieldDef, FieldType};
use crate::model::Model;
use crate::query::expressions::Expression;
use crate::query::operand::Operand;
use crate::value::Value;

/// The attribute registry of one mapped model.
pub struct Mapper<M: Model> {
    attributes: HashMap<String, Arc<dyn Descriptor<M>>>,
}

impl<M: Model> fmt::Debug for Mapper<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.attributes.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Mapper")
            .field("table", &M::table_name())
            .field("attributes", &names)
            .finish()
    }
}

impl<M: Model> Default for Mapper<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Model> Mapper<M> {
    /// Creates a mapper with one column attribute per declared field.
    pub fn new() -> Self {
        let mut mapper = Self {
            attributes: HashMap::new(),
        };
        for field in &M::meta().fields {
            mapper.register(ColumnAttribute::new(field));
        }
        mapper
    }

    /// Attaches a descriptor under its own name, replacing any attribute of
    /// the same name.
    pub fn register<D>(&mut self, descriptor: D) -> &mut Self
    where
        D: Descriptor<M> + 'static,
    {
        let name = descriptor.name().to_string();
        let replaced = self
            .attributes
            .insert(name.clone(), Arc::new(descriptor))
            .is_some();
        tracing::debug!(
            model = M::meta().model_name,
            attribute = %name,
            replaced,
            "registered mapped attribute"
        );
        self
    }

    /// Returns `true` if an attribute of that name is attached.
    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Returns the descriptor attached under `name`.
    pub fn descriptor(&self, name: &str) -> Option<&Arc<dyn Descriptor<M>>> {
        self.attributes.get(name)
    }

    /// Returns the attached attribute names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.attributes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// A receiver for class-level access.
    pub const fn class(&self) -> Receiver<'_, M> {
        Receiver::Class {
            mapper: self,
            alias: None,
        }
    }

    /// A receiver for class-level access under an alias, as used for
    /// self-joins.
    pub const fn aliased<'a>(&'a self, alias: &'a str) -> Receiver<'a, M> {
        Receiver::Class {
            mapper: self,
            alias: Some(alias),
        }
    }

    /// A receiver for access through a loaded instance.
    pub const fn instance<'a>(&'a self, instance: &'a M) -> Receiver<'a, M> {
        Receiver::Instance {
            mapper: self,
            instance,
        }
    }

    /// Reads the attribute `name` through `receiver`.
    ///
    /// # Errors
    ///
    /// Returns an attribute error if nothing is attached under `name`, and
    /// propagates any error raised by the descriptor.
    pub fn get<'a>(&'a self, receiver: Receiver<'a, M>, name: &str) -> OrmResult<Attribute<'a, M>> {
        let span = attribute_span(M::meta().model_name, name, receiver.side());
        let _guard = span.enter();
        let descriptor = self.lookup(name)?;
        descriptor.get(receiver)
    }

    /// Assigns `value` to the attribute `name` on `instance`.
    pub fn set(&self, instance: &mut M, name: &str, value: impl Into<Value>) -> OrmResult<()> {
        self.lookup(name)?.set(instance, value.into())
    }

    /// Deletes the attribute `name` on `instance`.
    pub fn delete(&self, instance: &mut M, name: &str) -> OrmResult<()> {
        self.lookup(name)?.delete(instance)
    }

    fn lookup(&self, name: &str) -> OrmResult<&Arc<dyn Descriptor<M>>> {
        self.attributes.get(name).ok_or_else(|| {
            OrmError::AttributeError(format!(
                "model '{}' has no attribute '{name}'",
                M::meta().model_name
            ))
        })
    }
}

/// The attribute attached for each mapped field.
///
/// Class access yields the (alias-qualified) column; instance access yields
/// the field's current value. Assignment is checked against the field type
/// before it reaches the model, and deleting writes NULL, which only
/// nullable fields accept.
#[derive(Debug, Clone)]
pub struct ColumnAttribute {
    name: &'static str,
    column: String,
    field_type: FieldType,
    null: bool,
}

impl ColumnAttribute {
    /// Creates the attribute for a field.
    pub fn new(field: &FieldDef) -> Self {
        Self {
            name: field.name,
            column: field.column.clone(),
            field_type: field.field_type,
            null: field.null,
        }
    }

    /// The database column name.
    pub fn column(&self) -> &str {
        &self.column
    }

    fn check(&self, model: &str, value: &Value) -> OrmResult<()> {
        let ok = if value.is_null() {
            self.null
        } else {
            self.field_type.accepts(value)
        };
        if ok {
            return Ok(());
        }
        Err(OrmError::TypeError(format!(
            "cannot assign {} to {model}.{} ({:?})",
            value.type_name(),
            self.name,
            self.field_type
        )))
    }
}

impl<M: Model> Descriptor<M> for ColumnAttribute {
    fn name(&self) -> &str {
        self.name
    }

    fn get<'a>(&'a self, receiver: Receiver<'a, M>) -> OrmResult<Attribute<'a, M>> {
        let operand = match receiver.instance() {
            None => Operand::Expression(Expression::column(
                receiver.owner_name(),
                self.column.as_str(),
            )),
            Some(instance) => Operand::Value(instance.field_value(self.name).ok_or_else(|| {
                OrmError::AttributeError(format!(
                    "instance of '{}' has no value for '{}'",
                    M::meta().model_name,
                    self.name
                ))
            })?),
        };
        Ok(Attribute::Operand(operand))
    }

    fn set(&self, instance: &mut M, value: Value) -> OrmResult<()> {
        self.check(M::meta().model_name, &value)?;
        instance.set_field_value(self.name, value)
    }

    fn delete(&self, instance: &mut M) -> OrmResult<()> {
        self.check(M::meta().model_name, &Value::Null)?;
        instance.set_field_value(self.name, Value::Null)
    }
}
