//! Free-function builders mirroring the entity constructors.
//!
//! These helpers are handy when composing packs in a declarative style:
//!
//! ```
//! use fmtexpr::prelude::*;
//!
//! let int = declare_primitive(Descriptor::field("int", IntegerField::I32));
//! let d = declare_typed_variable("d", &int);
//! let four = bind(&d, 4);
//! assert_eq!(four.binding(), Some(d.ident()));
//! assert_eq!(four.descriptor(), int.descriptor());
//! ```
use std::sync::Arc;

use crate::{
    descriptor::Descriptor,
    entity::{BinaryOp, Bindable, Entity, Expression, Payload, Primitive, Value, Variable},
};

/// Declare an untyped variable.
#[inline]
pub fn declare_variable(name: impl Into<Arc<str>>) -> Variable {
    Variable::declare(name)
}

/// Declare a typed variable. Wrapped descriptors are minimized once here.
#[inline]
pub fn declare_typed_variable(
    name: impl Into<Arc<str>>,
    descriptor: impl Into<Descriptor>,
) -> Variable {
    Variable::typed(name, descriptor)
}

/// Declare a schema-only primitive.
#[inline]
pub fn declare_primitive(descriptor: impl Into<Descriptor>) -> Primitive {
    Primitive::declare(descriptor)
}

/// Bind a variable or primitive to `payload`.
#[inline]
pub fn bind<B: Bindable>(source: &B, payload: impl Into<Payload>) -> Value {
    source.bind(payload)
}

/// Combine two entities with `op`.
#[inline]
pub fn combine(op: BinaryOp, lhs: impl Into<Entity>, rhs: impl Into<Entity>) -> Expression {
    Expression::new(op, lhs, rhs)
}
