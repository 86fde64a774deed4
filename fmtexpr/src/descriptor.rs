//! Descriptors: the declared shape of a field.
//!
//! A descriptor tells how a payload is interpreted and may itself reference other variables
//! or descriptors, which then become dependencies of everything it describes.
//!
//! Descriptors compose: declaring a primitive wraps its descriptor, and typing a variable with
//! a primitive would produce a descriptor of a descriptor. [`Descriptor::minimize`] collapses
//! that one level of indirection and is applied once, when a typed variable is declared.
//!
//! Example
//! ```
//! use fmtexpr::descriptor::{Descriptor, FieldDescriptor};
//! use fmtexpr::field::{FieldType, IntegerField};
//! use fmtexpr::ident::Ident;
//!
//! let len = Ident::variable("len");
//! let payload = FieldDescriptor::new("payload", FieldType::Text).depends_on(&len);
//! let desc = Descriptor::from(payload);
//! assert_eq!(desc.dependencies(), &[len]);
//! assert_eq!(desc.clone().wrap().minimize(), desc);
//! ```
use std::sync::Arc;

use strum::{EnumIs, EnumTryAs};

use crate::{
    field::FieldType,
    ident::{Ident, LabelProvider},
    set::{DependencySet, unique_append},
};

/// Declaration of a primitive field: its identity, shape, and the identities it references.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    ident: Ident,
    ty: FieldType,
    dependencies: DependencySet,
}

impl FieldDescriptor {
    /// Declare a new field descriptor with no dependencies.
    pub fn new(name: impl Into<Arc<str>>, ty: impl Into<FieldType>) -> Self {
        Self {
            ident: Ident::descriptor(name),
            ty: ty.into(),
            dependencies: DependencySet::new(),
        }
    }

    /// Add `dependency` to the identities referenced by this descriptor. Adding an identity
    /// twice has no effect.
    pub fn depends_on(self, dependency: &Ident) -> Self {
        Self {
            dependencies: unique_append(self.dependencies, [dependency.clone()]),
            ..self
        }
    }

    pub fn ident(&self) -> &Ident {
        &self.ident
    }

    pub fn field_type(&self) -> FieldType {
        self.ty
    }

    pub fn dependencies(&self) -> &[Ident] {
        &self.dependencies
    }
}

/// Declared shape of an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, EnumIs, EnumTryAs)]
pub enum Descriptor {
    /// No shape was declared (untyped variables).
    #[default]
    Unspecified,

    /// A primitive field.
    Field(Arc<FieldDescriptor>),

    /// A descriptor describing another descriptor, as produced when a primitive declaration
    /// is used where a descriptor is expected.
    Wrapped(Box<Descriptor>),
}

impl Descriptor {
    /// Shorthand for declaring a dependency-free field descriptor.
    pub fn field(name: impl Into<Arc<str>>, ty: impl Into<FieldType>) -> Self {
        FieldDescriptor::new(name, ty).into()
    }

    /// Wrap this descriptor one level.
    pub fn wrap(self) -> Self {
        Descriptor::Wrapped(Box::new(self))
    }

    /// Collapse exactly one level of wrapping; any other descriptor is returned unchanged.
    pub fn minimize(self) -> Self {
        match self {
            Descriptor::Wrapped(inner) => *inner,
            other => other,
        }
    }

    /// Identities referenced by this descriptor.
    pub fn dependencies(&self) -> &[Ident] {
        match self {
            Descriptor::Unspecified => &[],
            Descriptor::Field(field) => field.dependencies(),
            Descriptor::Wrapped(inner) => inner.dependencies(),
        }
    }

    /// Identity of the innermost field descriptor, if any.
    pub fn ident(&self) -> Option<&Ident> {
        match self {
            Descriptor::Unspecified => None,
            Descriptor::Field(field) => Some(field.ident()),
            Descriptor::Wrapped(inner) => inner.ident(),
        }
    }

    /// Shape of the innermost field descriptor, if any.
    pub fn field_type(&self) -> Option<FieldType> {
        match self {
            Descriptor::Unspecified => None,
            Descriptor::Field(field) => Some(field.field_type()),
            Descriptor::Wrapped(inner) => inner.field_type(),
        }
    }

    /// Human-readable label, e.g. `int: i32` or `primitive<int: i32>`.
    pub fn label(&self, labels: &dyn LabelProvider) -> String {
        match self {
            Descriptor::Unspecified => "unspecified".to_string(),
            Descriptor::Field(field) => {
                format!("{}: {}", labels.label(field.ident()), field.field_type())
            }
            Descriptor::Wrapped(inner) => format!("primitive<{}>", inner.label(labels)),
        }
    }
}

impl From<FieldDescriptor> for Descriptor {
    fn from(value: FieldDescriptor) -> Self {
        Descriptor::Field(Arc::new(value))
    }
}

impl From<Arc<FieldDescriptor>> for Descriptor {
    fn from(value: Arc<FieldDescriptor>) -> Self {
        Descriptor::Field(value)
    }
}

impl From<&Descriptor> for Descriptor {
    fn from(value: &Descriptor) -> Self {
        value.clone()
    }
}
