//! The descriptor protocol for mapped attributes.
//!
//! A [`Descriptor`] decides what reading an attribute produces. It is handed
//! a [`Receiver`]: either the mapped class (possibly under an alias) or one
//! loaded instance. Reads yield an [`Attribute`], which is either an
//! [`Operand`] or a [`BoundMethod`] ready to be called.

use std::fmt;

use alchemy_rs_core::{OrmError, OrmResult};

use super::mapper::Mapper;
use crate::model::Model;
use crate::query::operand::Operand;
use crate::value::Value;

/// The signature of a method body: the implicit receiver plus call arguments.
pub type MethodFn<M> =
    dyn for<'r> Fn(&Receiver<'r, M>, &[Operand]) -> OrmResult<Operand> + Send + Sync;

/// Controls attribute access on a mapped model.
pub trait Descriptor<M: Model>: Send + Sync {
    /// The attribute name this descriptor is registered under.
    fn name(&self) -> &str;

    /// Reads the attribute through `receiver`.
    fn get<'a>(&'a self, receiver: Receiver<'a, M>) -> OrmResult<Attribute<'a, M>>;

    /// Writes the attribute on an instance.
    ///
    /// The default refuses with the "missing callable" attribute error.
    fn set(&self, instance: &mut M, value: Value) -> OrmResult<()> {
        let _ = (instance, value);
        Err(OrmError::missing_callable(self.name(), "set"))
    }

    /// Deletes the attribute on an instance.
    ///
    /// The default refuses with the "missing callable" attribute error.
    fn delete(&self, instance: &mut M) -> OrmResult<()> {
        let _ = instance;
        Err(OrmError::missing_callable(self.name(), "delete"))
    }

    /// Documentation for the attribute, if any.
    fn doc(&self) -> Option<&str> {
        None
    }
}

/// Who an attribute is being read through.
pub enum Receiver<'a, M: Model> {
    /// The mapped class itself, optionally under an alias.
    Class {
        /// The model's attribute registry.
        mapper: &'a Mapper<M>,
        /// The alias the class is referenced by, if any.
        alias: Option<&'a str>,
    },
    /// A loaded instance.
    Instance {
        /// The model's attribute registry.
        mapper: &'a Mapper<M>,
        /// The instance.
        instance: &'a M,
    },
}

impl<M: Model> Clone for Receiver<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: Model> Copy for Receiver<'_, M> {}

impl<M: Model> fmt::Debug for Receiver<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class { alias, .. } => f
                .debug_struct("Class")
                .field("table", &M::table_name())
                .field("alias", alias)
                .finish(),
            Self::Instance { .. } => f
                .debug_struct("Instance")
                .field("table", &M::table_name())
                .finish_non_exhaustive(),
        }
    }
}

impl<'a, M: Model> Receiver<'a, M> {
    /// The attribute registry this receiver resolves names against.
    pub const fn mapper(&self) -> &'a Mapper<M> {
        match self {
            Self::Class { mapper, .. } | Self::Instance { mapper, .. } => *mapper,
        }
    }

    /// Returns `true` when the access goes through the class.
    pub const fn is_class(&self) -> bool {
        matches!(self, Self::Class { .. })
    }

    /// Returns the instance, for instance access.
    pub const fn instance(&self) -> Option<&'a M> {
        match self {
            Self::Instance { instance, .. } => Some(*instance),
            Self::Class { .. } => None,
        }
    }

    /// Returns the alias, for aliased class access.
    pub const fn alias(&self) -> Option<&'a str> {
        match self {
            Self::Class { alias, .. } => *alias,
            Self::Instance { .. } => None,
        }
    }

    /// The name columns are qualified with: the alias if there is one,
    /// otherwise the table name.
    pub fn owner_name(&self) -> &'a str {
        self.alias().unwrap_or(M::table_name())
    }

    /// "class" or "instance", for logging.
    pub const fn side(&self) -> &'static str {
        if self.is_class() {
            "class"
        } else {
            "instance"
        }
    }

    /// Reads another attribute through the same receiver.
    pub fn attr(&self, name: &str) -> OrmResult<Operand> {
        self.mapper().get(*self, name)?.into_operand(name)
    }

    /// Binds another attribute's method to the same receiver.
    pub fn method(&self, name: &str) -> OrmResult<BoundMethod<'a, M>> {
        self.mapper().get(*self, name)?.into_method(name)
    }
}

/// The result of reading an attribute.
pub enum Attribute<'a, M: Model> {
    /// A value or expression.
    Operand(Operand),
    /// A method bound to its receiver.
    Method(BoundMethod<'a, M>),
}

impl<M: Model> fmt::Debug for Attribute<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operand(op) => f.debug_tuple("Operand").field(op).finish(),
            Self::Method(m) => f.debug_tuple("Method").field(m).finish(),
        }
    }
}

impl<'a, M: Model> Attribute<'a, M> {
    /// Unwraps an operand.
    ///
    /// # Errors
    ///
    /// Returns an attribute error naming `name` if this is a method.
    pub fn into_operand(self, name: &str) -> OrmResult<Operand> {
        match self {
            Self::Operand(op) => Ok(op),
            Self::Method(_) => Err(OrmError::AttributeError(format!(
                "'{name}' is a method; bind it with method() and call it"
            ))),
        }
    }

    /// Unwraps a bound method.
    ///
    /// # Errors
    ///
    /// Returns an attribute error naming `name` if this is not callable.
    pub fn into_method(self, name: &str) -> OrmResult<BoundMethod<'a, M>> {
        match self {
            Self::Method(m) => Ok(m),
            Self::Operand(_) => Err(OrmError::AttributeError(format!(
                "'{name}' is not callable"
            ))),
        }
    }
}

/// A method body bound to the receiver it was read through.
pub struct BoundMethod<'a, M: Model> {
    name: &'a str,
    receiver: Receiver<'a, M>,
    func: &'a MethodFn<M>,
}

impl<M: Model> fmt::Debug for BoundMethod<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundMethod")
            .field("name", &self.name)
            .field("receiver", &self.receiver)
            .finish_non_exhaustive()
    }
}

impl<'a, M: Model> BoundMethod<'a, M> {
    /// Binds `func` to `receiver`.
    pub fn new(name: &'a str, receiver: Receiver<'a, M>, func: &'a MethodFn<M>) -> Self {
        Self {
            name,
            receiver,
            func,
        }
    }

    /// The method name.
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// The receiver the method is bound to.
    pub const fn receiver(&self) -> &Receiver<'a, M> {
        &self.receiver
    }

    /// Calls the method with the bound receiver and `args`.
    pub fn call(&self, args: &[Operand]) -> OrmResult<Operand> {
        tracing::trace!(method = self.name, side = self.receiver.side(), "calling bound method");
        (self.func)(&self.receiver, args)
    }
}
