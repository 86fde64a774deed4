//! Entities: the things a pack is made of.
//!
//! Role
//! - [`Variable`]: a named slot, optionally typed by a [`Descriptor`].
//! - [`Primitive`]: a schema-only declaration wrapping a descriptor, with no name.
//! - [`Value`]: a variable or primitive bound to a concrete [`Payload`].
//! - [`Expression`]: a deferred binary operation over two sub-entities.
//! - [`Entity`]: the closed tagged union of all of the above, plus bare literals.
//!
//! Every kind answers the same three questions through [`Introspect`]: which identities it
//! depends on, which variable it binds, and which descriptor shapes it. Construction is always
//! total; consistency is a property of a whole [`crate::pack::Pack`] and is checked there.
//!
//! Example
//! ```
//! use fmtexpr::prelude::*;
//!
//! let a = declare_variable("a");
//! let c = declare_variable("c");
//! let sum = &a + &c;
//! assert_eq!(sum.dependencies(), &[a.ident().clone(), c.ident().clone()]);
//!
//! let value = sum.apply(&Payload::Integer(2)).unwrap();
//! assert_eq!(value.payload(), &Payload::Integer(4));
//! ```
mod expr;
pub mod func;
mod ops;
mod value;
mod variable;

pub use expr::*;
pub use value::*;
pub use variable::*;

use strum::{EnumDiscriminants, EnumIs, EnumIter, EnumTryAs, IntoEnumIterator};

use crate::{
    descriptor::Descriptor,
    error::Result,
    ident::{Ident, LabelProvider},
    set::DependencySet,
};

/// Capability set shared by every entity kind.
pub trait Introspect {
    /// Identities this entity references, without duplicates, in first-seen order.
    ///
    /// A variable's own identity is not part of its own dependencies.
    fn dependencies(&self) -> &[Ident];

    /// Variable this entity satisfies, if any.
    fn binding(&self) -> Option<&Ident> {
        None
    }

    /// Declared shape of this entity, if any.
    fn descriptor(&self) -> Option<&Descriptor> {
        None
    }

    /// Identities contributed to an entity that references this one.
    ///
    /// Defaults to [`Introspect::dependencies`]. Variables prepend their own identity.
    fn reference_dependencies(&self) -> DependencySet {
        self.dependencies().iter().cloned().collect()
    }
}

/// Declarations that can be bound to a payload to produce a [`Value`].
pub trait Bindable {
    /// Variable identity the produced value binds, `None` for primitives.
    fn bound_ident(&self) -> Option<&Ident>;

    /// Descriptor the produced value is interpreted with.
    fn bound_descriptor(&self) -> &Descriptor;

    /// Bind `payload`. Binding never fails and never checks for duplicates.
    fn bind(&self, payload: impl Into<Payload>) -> Value {
        Value::new(
            self.bound_ident().cloned(),
            self.bound_descriptor().clone(),
            payload.into(),
        )
    }
}

/// Any entity that can be placed in a pack.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs, EnumTryAs, EnumDiscriminants)]
#[strum_discriminants(name(EntityKind), derive(Hash, EnumIter))]
pub enum Entity {
    /// A bare payload with no declaration attached.
    Literal(Literal),
    Variable(Variable),
    Primitive(Primitive),
    Value(Value),
    Expression(Expression),
}

impl EntityKind {
    /// Creates an [`EntityKind`] from its string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        EntityKind::iter().find(|kind| kind.to_str() == s)
    }

    /// Returns the string representation of the [`EntityKind`].
    pub fn to_str(&self) -> &'static str {
        match self {
            EntityKind::Literal => "literal",
            EntityKind::Variable => "variable",
            EntityKind::Primitive => "primitive",
            EntityKind::Value => "value",
            EntityKind::Expression => "expression",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl Entity {
    /// Kind of this entity.
    pub fn kind(&self) -> EntityKind {
        self.into()
    }

    /// Apply this entity to an external input.
    ///
    /// - Declarations bind `input`.
    /// - Values return themselves.
    /// - Literals become unbound values.
    /// - Expressions apply both operands to `input`, then their operator.
    pub fn apply(&self, input: &Payload) -> Result<Value> {
        match self {
            Entity::Literal(literal) => Ok(Value::new(
                None,
                Descriptor::Unspecified,
                literal.payload().clone(),
            )),
            Entity::Variable(variable) => Ok(variable.bind(input.clone())),
            Entity::Primitive(primitive) => Ok(primitive.bind(input.clone())),
            Entity::Value(value) => Ok(value.clone()),
            Entity::Expression(expression) => expression.apply(input),
        }
    }

    /// Label describing the declared type of this entity, e.g. `value<a, int: i32>`.
    pub fn type_label(&self, labels: &dyn LabelProvider) -> String {
        match self {
            Entity::Literal(literal) => format!("literal<{}>", literal.payload().kind_str()),
            Entity::Variable(variable) if variable.descriptor().is_unspecified() => {
                format!("variable<{}>", labels.label(variable.ident()))
            }
            Entity::Variable(variable) => format!(
                "typed_variable<{}, {}>",
                labels.label(variable.ident()),
                variable.descriptor().label(labels)
            ),
            Entity::Primitive(primitive) => {
                format!("primitive<{}>", primitive.descriptor().label(labels))
            }
            Entity::Value(value) => format!(
                "value<{}, {}, {}>",
                value
                    .binding()
                    .map(|ident| labels.label(ident))
                    .unwrap_or_else(|| "none".to_string()),
                value.descriptor().label(labels),
                value.payload().kind_str()
            ),
            Entity::Expression(expression) => format!(
                "expression<{}, {}, {}>",
                expression.op(),
                expression.lhs().kind(),
                expression.rhs().kind()
            ),
        }
    }
}

impl Introspect for Entity {
    fn dependencies(&self) -> &[Ident] {
        match self {
            Entity::Literal(literal) => Introspect::dependencies(literal),
            Entity::Variable(variable) => Introspect::dependencies(variable),
            Entity::Primitive(primitive) => Introspect::dependencies(primitive),
            Entity::Value(value) => Introspect::dependencies(value),
            Entity::Expression(expression) => Introspect::dependencies(expression),
        }
    }

    fn binding(&self) -> Option<&Ident> {
        match self {
            Entity::Value(value) => value.binding(),
            _ => None,
        }
    }

    fn descriptor(&self) -> Option<&Descriptor> {
        match self {
            Entity::Literal(_) | Entity::Expression(_) => None,
            Entity::Variable(variable) => Some(variable.descriptor()),
            Entity::Primitive(primitive) => Some(primitive.descriptor()),
            Entity::Value(value) => Some(value.descriptor()),
        }
    }

    fn reference_dependencies(&self) -> DependencySet {
        match self {
            Entity::Variable(variable) => variable.reference_dependencies(),
            other => other.dependencies().iter().cloned().collect(),
        }
    }
}

macro_rules! impl_from_for_entity {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Entity {
                fn from(value: $variant) -> Self {
                    Entity::$variant(value)
                }
            }

            impl From<&$variant> for Entity {
                fn from(value: &$variant) -> Self {
                    Entity::$variant(value.clone())
                }
            }
        )*
    };
}

impl_from_for_entity!(Literal, Variable, Primitive, Value, Expression);

impl From<Payload> for Entity {
    fn from(value: Payload) -> Self {
        Entity::Literal(Literal::new(value))
    }
}

impl From<&Entity> for Entity {
    fn from(value: &Entity) -> Self {
        value.clone()
    }
}

macro_rules! impl_literal_for_entity {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Entity {
                fn from(value: $t) -> Self {
                    Entity::Literal(Literal::new(value))
                }
            }
        )*
    };
}

impl_literal_for_entity!(i8, i16, i32, i64, u8, u16, u32, u64, bool, &str, String);
