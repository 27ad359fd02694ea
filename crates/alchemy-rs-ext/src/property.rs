//! Hybrid properties.
//!
//! A [`HybridProperty`] is read like a plain attribute. Through an instance
//! it runs its getter and yields a value; through the class it runs its
//! expression function (the getter itself unless one was registered) and
//! yields a query-clause element.
//!
//! ```
//! use alchemy_rs_ext::HybridProperty;
//! use alchemy_rs_orm::attributes::Receiver;
//! # use std::sync::OnceLock;
//! # use alchemy_rs_core::{OrmError, OrmResult};
//! # use alchemy_rs_orm::{FieldDef, FieldType, Mapper, Model, ModelMeta, Value};
//! # struct Interval { start: i64, end: i64 }
//! # impl Model for Interval {
//! #     fn meta() -> &'static ModelMeta {
//! #         static META: OnceLock<ModelMeta> = OnceLock::new();
//! #         META.get_or_init(|| {
//! #             ModelMeta::new("geo", "interval", "interval")
//! #                 .field(FieldDef::new("start", FieldType::IntegerField))
//! #                 .field(FieldDef::new("end", FieldType::IntegerField))
//! #         })
//! #     }
//! #     fn field_value(&self, name: &str) -> Option<Value> {
//! #         match name {
//! #             "start" => Some(Value::Int(self.start)),
//! #             "end" => Some(Value::Int(self.end)),
//! #             _ => None,
//! #         }
//! #     }
//! #     fn set_field_value(&mut self, name: &str, _: Value) -> OrmResult<()> {
//! #         Err(OrmError::AttributeError(name.to_string()))
//! #     }
//! # }
//!
//! let mut mapper = Mapper::<Interval>::new();
//! mapper.register(HybridProperty::new(
//!     "length",
//!     |this: &Receiver<'_, Interval>| this.attr("end")? - this.attr("start")?,
//! ));
//!
//! let i = Interval { start: 2, end: 7 };
//! let length = mapper.instance(&i).attr("length").unwrap();
//! assert_eq!(length.as_value(), Some(&Value::Int(5)));
//!
//! let length = mapper.class().attr("length").unwrap();
//! assert!(length.is_class_side());
//! ```

use std::fmt;
use std::sync::Arc;

use alchemy_rs_core::{OrmError, OrmResult};
use alchemy_rs_orm::attributes::{
    create_proxied_attribute, Attribute, Descriptor, PropComparator, ProxyFactory, Receiver,
};
use alchemy_rs_orm::{Model, Operand, Value};

/// A getter or expression function.
pub type PropertyFn<M> = dyn for<'r> Fn(&Receiver<'r, M>) -> OrmResult<Operand> + Send + Sync;

/// A setter function.
pub type SetterFn<M> = dyn Fn(&mut M, Value) -> OrmResult<()> + Send + Sync;

/// A deleter function.
pub type DeleterFn<M> = dyn Fn(&mut M) -> OrmResult<()> + Send + Sync;

/// Produces the comparator for a class-level access.
pub type ComparatorFactory<M> =
    dyn for<'r> Fn(&Receiver<'r, M>) -> OrmResult<Arc<dyn PropComparator>> + Send + Sync;

/// What a class-level read evaluates.
enum ClassExpr<M: Model> {
    Function(Arc<PropertyFn<M>>),
    Proxy {
        factory: ProxyFactory,
        comparator: Arc<ComparatorFactory<M>>,
    },
}

/// An attribute that computes a value on instances and an expression on the
/// class.
pub struct HybridProperty<M: Model> {
    name: String,
    doc: Option<String>,
    fget: Arc<PropertyFn<M>>,
    expr: ClassExpr<M>,
    fset: Option<Arc<SetterFn<M>>>,
    fdel: Option<Arc<DeleterFn<M>>>,
}

impl<M: Model> fmt::Debug for HybridProperty<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expr = match &self.expr {
            ClassExpr::Function(_) => "function",
            ClassExpr::Proxy { .. } => "proxy",
        };
        f.debug_struct("HybridProperty")
            .field("name", &self.name)
            .field("doc", &self.doc)
            .field("expr", &expr)
            .field("has_setter", &self.fset.is_some())
            .field("has_deleter", &self.fdel.is_some())
            .finish()
    }
}

impl<M: Model> HybridProperty<M> {
    /// Creates a property named `name` whose getter also serves as its
    /// class-level expression.
    pub fn new<F>(name: impl Into<String>, fget: F) -> Self
    where
        F: for<'r> Fn(&Receiver<'r, M>) -> OrmResult<Operand> + Send + Sync + 'static,
    {
        let fget: Arc<PropertyFn<M>> = Arc::new(fget);
        Self {
            name: name.into(),
            doc: None,
            expr: ClassExpr::Function(Arc::clone(&fget)),
            fget,
            fset: None,
            fdel: None,
        }
    }

    /// Attaches documentation, exposed through [`Descriptor::doc`] and on
    /// proxies built by [`comparator`](Self::comparator).
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// The attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers the setter.
    pub fn setter<F>(&mut self, fset: F) -> &mut Self
    where
        F: Fn(&mut M, Value) -> OrmResult<()> + Send + Sync + 'static,
    {
        self.fset = Some(Arc::new(fset));
        self
    }

    /// Registers the deleter.
    pub fn deleter<F>(&mut self, fdel: F) -> &mut Self
    where
        F: Fn(&mut M) -> OrmResult<()> + Send + Sync + 'static,
    {
        self.fdel = Some(Arc::new(fdel));
        self
    }

    /// Registers a separate class-level expression function. The getter is
    /// left untouched.
    pub fn expression<F>(&mut self, expr: F) -> &mut Self
    where
        F: for<'r> Fn(&Receiver<'r, M>) -> OrmResult<Operand> + Send + Sync + 'static,
    {
        self.expr = ClassExpr::Function(Arc::new(expr));
        self
    }

    /// Makes class-level reads yield a [`ProxiedAttribute`] whose operators
    /// are answered by the comparator `factory` builds for the receiver.
    ///
    /// [`ProxiedAttribute`]: alchemy_rs_orm::attributes::ProxiedAttribute
    pub fn comparator<F, C>(&mut self, factory: F) -> &mut Self
    where
        F: for<'r> Fn(&Receiver<'r, M>) -> OrmResult<C> + Send + Sync + 'static,
        C: PropComparator + 'static,
    {
        let proxy = create_proxied_attribute::<M, Self>(self);
        self.expr = ClassExpr::Proxy {
            factory: proxy,
            comparator: erase_comparator(move |receiver| {
                factory(receiver).map(|c| Arc::new(c) as Arc<dyn PropComparator>)
            }),
        };
        self
    }

    /// Runs the getter against `receiver`, bypassing class/instance dispatch.
    pub fn call_getter(&self, receiver: &Receiver<'_, M>) -> OrmResult<Operand> {
        (self.fget)(receiver)
    }

    /// Runs the class-level expression against `receiver`.
    pub fn call_expression(&self, receiver: &Receiver<'_, M>) -> OrmResult<Operand> {
        match &self.expr {
            ClassExpr::Function(expr) => expr(receiver),
            ClassExpr::Proxy {
                factory,
                comparator,
            } => {
                let comparator = comparator(receiver)?;
                let proxy = factory.create::<M>(
                    receiver.owner_name(),
                    self.name.as_str(),
                    self,
                    comparator,
                );
                Ok(Operand::Proxy(Arc::new(proxy)))
            }
        }
    }
}

fn erase_comparator<M, F>(factory: F) -> Arc<ComparatorFactory<M>>
where
    M: Model,
    F: for<'r> Fn(&Receiver<'r, M>) -> OrmResult<Arc<dyn PropComparator>> + Send + Sync + 'static,
{
    Arc::new(factory)
}

impl<M: Model> Descriptor<M> for HybridProperty<M> {
    fn name(&self) -> &str {
        &self.name
    }

    fn get<'a>(&'a self, receiver: Receiver<'a, M>) -> OrmResult<Attribute<'a, M>> {
        tracing::trace!(
            attribute = %self.name,
            side = receiver.side(),
            "hybrid property access"
        );
        let operand = if receiver.is_class() {
            self.call_expression(&receiver)?
        } else {
            self.call_getter(&receiver)?
        };
        Ok(Attribute::Operand(operand))
    }

    fn set(&self, instance: &mut M, value: Value) -> OrmResult<()> {
        match &self.fset {
            Some(fset) => fset(instance, value),
            None => Err(OrmError::missing_callable(&self.name, "set")),
        }
    }

    fn delete(&self, instance: &mut M) -> OrmResult<()> {
        match &self.fdel {
            Some(fdel) => fdel(instance),
            None => Err(OrmError::missing_callable(&self.name, "delete")),
        }
    }

    fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use alchemy_rs_orm::attributes::{ColumnComparator, Mapper};
    use alchemy_rs_orm::{Expression, FieldDef, FieldType, ModelMeta, Operator};

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Span {
        lo: i64,
        hi: i64,
    }

    impl Model for Span {
        fn meta() -> &'static ModelMeta {
            static META: OnceLock<ModelMeta> = OnceLock::new();
            META.get_or_init(|| {
                ModelMeta::new("test", "span", "span")
                    .field(FieldDef::new("lo", FieldType::IntegerField))
                    .field(FieldDef::new("hi", FieldType::IntegerField))
            })
        }

        fn field_value(&self, name: &str) -> Option<Value> {
            match name {
                "lo" => Some(Value::Int(self.lo)),
                "hi" => Some(Value::Int(self.hi)),
                _ => None,
            }
        }

        fn set_field_value(&mut self, name: &str, value: Value) -> OrmResult<()> {
            let v = value
                .as_int()
                .ok_or_else(|| OrmError::TypeError(format!("{name} must be an integer")))?;
            match name {
                "lo" => self.lo = v,
                "hi" => self.hi = v,
                _ => return Err(OrmError::AttributeError(name.to_string())),
            }
            Ok(())
        }
    }

    fn width() -> HybridProperty<Span> {
        HybridProperty::new("width", |this: &Receiver<'_, Span>| {
            this.attr("hi")? - this.attr("lo")?
        })
    }

    #[test]
    fn test_instance_and_class_dispatch() {
        let mapper = Mapper::<Span>::new();
        let prop = width();
        let s = Span { lo: 1, hi: 4 };

        let Attribute::Operand(v) = prop.get(mapper.instance(&s)).unwrap() else {
            panic!("expected an operand");
        };
        assert_eq!(v.as_value(), Some(&Value::Int(3)));

        let Attribute::Operand(e) = prop.get(mapper.class()).unwrap() else {
            panic!("expected an operand");
        };
        assert_eq!(
            e.as_expression(),
            Some(&Expression::binary(
                Operator::Sub,
                Expression::column("span", "hi"),
                Expression::column("span", "lo"),
            ))
        );
    }

    #[test]
    fn test_expression_replaces_only_class_side() {
        let mapper = Mapper::<Span>::new();
        let mut prop = width();
        prop.expression(|_: &Receiver<'_, Span>| Ok(Operand::from(Expression::func("w", vec![]))));
        let s = Span { lo: 1, hi: 4 };

        let v = prop.call_getter(&mapper.instance(&s)).unwrap();
        assert_eq!(v.as_value(), Some(&Value::Int(3)));
        let e = prop.call_expression(&mapper.class()).unwrap();
        assert_eq!(e.as_expression(), Some(&Expression::func("w", vec![])));
    }

    #[test]
    fn test_setter_and_deleter() {
        let mut prop = width();
        prop.setter(|span: &mut Span, value: Value| {
            let w = value.as_int().unwrap_or_default();
            span.hi = span.lo + w;
            Ok(())
        })
        .deleter(|span: &mut Span| {
            span.hi = span.lo;
            Ok(())
        });

        let mut s = Span { lo: 2, hi: 3 };
        prop.set(&mut s, Value::Int(10)).unwrap();
        assert_eq!(s, Span { lo: 2, hi: 12 });
        prop.delete(&mut s).unwrap();
        assert_eq!(s, Span { lo: 2, hi: 2 });
    }

    #[test]
    fn test_missing_setter_and_deleter() {
        let prop = width();
        let mut s = Span { lo: 2, hi: 3 };
        let err = prop.set(&mut s, Value::Int(1)).unwrap_err();
        assert!(err.is_missing_callable());
        assert!(err.to_string().contains("can't set attribute 'width'"));
        let err = prop.delete(&mut s).unwrap_err();
        assert!(err.is_missing_callable());
        assert_eq!(s, Span { lo: 2, hi: 3 });
    }

    #[test]
    fn test_chaining_preserves_identity() {
        let mut prop = width();
        let before: *const HybridProperty<Span> = &prop;
        let after: *const HybridProperty<Span> = prop
            .setter(|_: &mut Span, _: Value| Ok(()))
            .deleter(|_: &mut Span| Ok(()))
            .expression(|this: &Receiver<'_, Span>| this.attr("lo"));
        assert!(std::ptr::eq(before, after));
    }

    #[test]
    fn test_comparator_yields_proxy() {
        let mapper = Mapper::<Span>::new();
        let mut prop = width().with_doc("Distance between the bounds.");
        prop.comparator(|this: &Receiver<'_, Span>| {
            Ok(ColumnComparator::new(
                Expression::column(this.owner_name(), "hi"),
            ))
        });

        let Attribute::Operand(op) = prop.get(mapper.aliased("s2")).unwrap() else {
            panic!("expected an operand");
        };
        let proxy = op.as_proxy().unwrap();
        assert_eq!(proxy.key(), "width");
        assert_eq!(proxy.owner(), "s2");
        assert_eq!(proxy.doc(), Some("Distance between the bounds."));
        assert!(proxy.descriptor_type().contains("HybridProperty"));
        assert_eq!(proxy.clause_element(), Expression::column("s2", "hi"));

        let s = Span { lo: 0, hi: 9 };
        let v = prop.call_getter(&mapper.instance(&s)).unwrap();
        assert_eq!(v.as_value(), Some(&Value::Int(9)));
    }

    #[test]
    fn test_getter_errors_propagate() {
        let mapper = Mapper::<Span>::new();
        let prop = HybridProperty::new("broken", |this: &Receiver<'_, Span>| this.attr("nope"));
        let s = Span { lo: 0, hi: 1 };
        let err = prop.get(mapper.instance(&s)).unwrap_err();
        assert!(matches!(err, OrmError::AttributeError(_)));
    }
}
