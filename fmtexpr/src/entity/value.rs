use std::sync::Arc;

use strum::{EnumIs, EnumTryAs};

use crate::{
    descriptor::Descriptor,
    entity::{Entity, Introspect},
    error::{Error, Result},
    field::FieldType,
    ident::{Ident, LabelStyle},
    set::{DependencySet, join, unique},
};

/// Concrete data carried by a [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs, EnumTryAs)]
pub enum Payload {
    Integer(i128),
    Boolean(bool),
    Text(Arc<str>),
    /// Another entity used as data. Its dependencies become dependencies of the value.
    Entity(Box<Entity>),
}

impl Payload {
    /// Short name of the payload kind, used in diagnostics.
    pub fn kind_str(&self) -> &'static str {
        match self {
            Payload::Integer(_) => "integer",
            Payload::Boolean(_) => "bool",
            Payload::Text(_) => "text",
            Payload::Entity(_) => "entity",
        }
    }

    /// Identities referenced through an entity payload. Plain data references nothing.
    pub fn dependencies(&self) -> DependencySet {
        match self {
            Payload::Entity(entity) => entity.reference_dependencies(),
            _ => DependencySet::new(),
        }
    }
}

impl std::fmt::Display for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Payload::Integer(value) => write!(f, "{}", value),
            Payload::Boolean(value) => write!(f, "{}", value),
            Payload::Text(value) => write!(f, "{:?}", value),
            Payload::Entity(entity) => write!(f, "<{}>", entity.kind()),
        }
    }
}

macro_rules! impl_integer_payload {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Payload {
                fn from(value: $t) -> Self {
                    Payload::Integer(value as i128)
                }
            }
        )*
    };
}

impl_integer_payload!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl From<bool> for Payload {
    fn from(value: bool) -> Self {
        Payload::Boolean(value)
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::Text(value.into())
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::Text(value.into())
    }
}

impl From<Entity> for Payload {
    fn from(value: Entity) -> Self {
        Payload::Entity(Box::new(value))
    }
}

impl From<&Payload> for Payload {
    fn from(value: &Payload) -> Self {
        value.clone()
    }
}

/// A bare payload placed in a pack without any declaration.
///
/// A literal binds nothing and has no descriptor. A literal wrapping an entity depends on
/// that entity's reference dependencies, exactly like a value carrying the same payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    payload: Payload,
    dependencies: DependencySet,
}

impl Literal {
    pub fn new(payload: impl Into<Payload>) -> Self {
        let payload = payload.into();
        let dependencies = payload.dependencies();
        Self {
            payload,
            dependencies,
        }
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }
}

impl Introspect for Literal {
    fn dependencies(&self) -> &[Ident] {
        &self.dependencies
    }
}

impl From<Payload> for Literal {
    fn from(value: Payload) -> Self {
        Literal::new(value)
    }
}

/// A variable or primitive bound to a concrete payload.
///
/// Dependencies are computed once at construction:
/// `unique(join(dependencies(descriptor), dependencies(payload)))`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Value {
    variable: Option<Ident>,
    descriptor: Descriptor,
    payload: Payload,
    dependencies: DependencySet,
}

impl Value {
    /// Build a value. `variable` is `None` for values produced from primitives or literals.
    pub fn new(variable: Option<Ident>, descriptor: Descriptor, payload: Payload) -> Self {
        let payload_dependencies = payload.dependencies();
        let dependencies = unique(join([
            descriptor.dependencies(),
            payload_dependencies.as_slice(),
        ]));
        Self {
            variable,
            descriptor,
            payload,
            dependencies,
        }
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Consume the value, keeping its payload.
    pub fn into_payload(self) -> Payload {
        self.payload
    }

    /// Serialize the payload through the integer field of the descriptor.
    ///
    /// Returns the number of bytes written.
    pub fn serialize(&self, out: &mut [u8]) -> Result<usize> {
        let Some(FieldType::Integer(field)) = self.descriptor.field_type() else {
            return Err(Error::NotSerializable {
                descriptor: self.descriptor.label(&LabelStyle::Name),
            });
        };

        match &self.payload {
            Payload::Integer(value) => field.serialize(*value, out),
            other => Err(Error::PayloadMismatch {
                field: field.to_str().to_string(),
                found: other.kind_str(),
            }),
        }
    }
}

impl Introspect for Value {
    fn dependencies(&self) -> &[Ident] {
        &self.dependencies
    }

    fn binding(&self) -> Option<&Ident> {
        self.variable.as_ref()
    }

    fn descriptor(&self) -> Option<&Descriptor> {
        Some(&self.descriptor)
    }
}
