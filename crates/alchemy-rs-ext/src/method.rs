//! Hybrid methods.
//!
//! A [`HybridMethod`] reads as a [`BoundMethod`]. Through an instance the
//! method body is bound to the instance; through the class the expression
//! body (the method body unless one was registered) is bound to the class.

use std::fmt;
use std::sync::Arc;

use alchemy_rs_core::OrmResult;
use alchemy_rs_orm::attributes::{Attribute, BoundMethod, Descriptor, MethodFn, Receiver};
use alchemy_rs_orm::{Model, Operand};

/// A method callable on instances and on the class.
pub struct HybridMethod<M: Model> {
    name: String,
    doc: Option<String>,
    func: Arc<MethodFn<M>>,
    expr: Arc<MethodFn<M>>,
}

impl<M: Model> fmt::Debug for HybridMethod<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HybridMethod")
            .field("name", &self.name)
            .field("doc", &self.doc)
            .field("separate_expression", &!Arc::ptr_eq(&self.func, &self.expr))
            .finish()
    }
}

impl<M: Model> HybridMethod<M> {
    /// Creates a method named `name` whose body also serves as its
    /// class-level expression.
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: for<'r> Fn(&Receiver<'r, M>, &[Operand]) -> OrmResult<Operand> + Send + Sync + 'static,
    {
        let func: Arc<MethodFn<M>> = Arc::new(func);
        Self {
            name: name.into(),
            doc: None,
            expr: Arc::clone(&func),
            func,
        }
    }

    /// Attaches documentation.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Registers a separate class-level body. The instance body is left
    /// untouched.
    pub fn expression<F>(&mut self, expr: F) -> &mut Self
    where
        F: for<'r> Fn(&Receiver<'r, M>, &[Operand]) -> OrmResult<Operand> + Send + Sync + 'static,
    {
        self.expr = Arc::new(expr);
        self
    }
}

impl<M: Model> Descriptor<M> for HybridMethod<M> {
    fn name(&self) -> &str {
        &self.name
    }

    fn get<'a>(&'a self, receiver: Receiver<'a, M>) -> OrmResult<Attribute<'a, M>> {
        tracing::trace!(
            attribute = %self.name,
            side = receiver.side(),
            "hybrid method access"
        );
        let body: &MethodFn<M> = if receiver.is_class() {
            &*self.expr
        } else {
            &*self.func
        };
        Ok(Attribute::Method(BoundMethod::new(&self.name, receiver, body)))
    }

    fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }
}
