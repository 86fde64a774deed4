use std::sync::Arc;

use crate::{
    descriptor::Descriptor,
    entity::{Bindable, Introspect},
    ident::Ident,
    set::{DependencySet, unique_append},
};

/// A named, unbound slot.
///
/// An untyped variable has an [`Descriptor::Unspecified`] descriptor; a typed variable carries
/// the descriptor its values are interpreted with. The variable's own identity is never part
/// of its dependencies, only of the dependencies of entities referencing it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    ident: Ident,
    descriptor: Descriptor,
}

impl Variable {
    /// Declare an untyped variable.
    pub fn declare(name: impl Into<Arc<str>>) -> Self {
        Self {
            ident: Ident::variable(name),
            descriptor: Descriptor::Unspecified,
        }
    }

    /// Declare a typed variable.
    ///
    /// The descriptor is minimized once here, so typing with a [`Primitive`] behaves exactly
    /// like typing with the descriptor that primitive wraps.
    pub fn typed(name: impl Into<Arc<str>>, descriptor: impl Into<Descriptor>) -> Self {
        Self {
            ident: Ident::variable(name),
            descriptor: descriptor.into().minimize(),
        }
    }

    /// Same variable identity, typed with `descriptor` (minimized).
    pub fn retyped(&self, descriptor: impl Into<Descriptor>) -> Self {
        Self {
            ident: self.ident.clone(),
            descriptor: descriptor.into().minimize(),
        }
    }

    pub fn ident(&self) -> &Ident {
        &self.ident
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub fn is_typed(&self) -> bool {
        !self.descriptor.is_unspecified()
    }
}

impl Introspect for Variable {
    fn dependencies(&self) -> &[Ident] {
        self.descriptor.dependencies()
    }

    fn descriptor(&self) -> Option<&Descriptor> {
        Some(&self.descriptor)
    }

    fn reference_dependencies(&self) -> DependencySet {
        let own: DependencySet = [self.ident.clone()].into_iter().collect();
        unique_append(own, self.descriptor.dependencies().iter().cloned())
    }
}

impl Bindable for Variable {
    fn bound_ident(&self) -> Option<&Ident> {
        Some(&self.ident)
    }

    fn bound_descriptor(&self) -> &Descriptor {
        &self.descriptor
    }
}

/// A schema-only declaration: a descriptor that can be bound without naming a variable.
///
/// Values produced from a primitive satisfy no variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Primitive {
    descriptor: Descriptor,
}

impl Primitive {
    pub fn declare(descriptor: impl Into<Descriptor>) -> Self {
        Self {
            descriptor: descriptor.into(),
        }
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }
}

impl Introspect for Primitive {
    fn dependencies(&self) -> &[Ident] {
        self.descriptor.dependencies()
    }

    fn descriptor(&self) -> Option<&Descriptor> {
        Some(&self.descriptor)
    }
}

impl Bindable for Primitive {
    fn bound_ident(&self) -> Option<&Ident> {
        None
    }

    fn bound_descriptor(&self) -> &Descriptor {
        &self.descriptor
    }
}

/// Using a primitive where a descriptor is expected yields a descriptor of its descriptor.
impl From<&Primitive> for Descriptor {
    fn from(value: &Primitive) -> Self {
        value.descriptor.clone().wrap()
    }
}

impl From<Primitive> for Descriptor {
    fn from(value: Primitive) -> Self {
        value.descriptor.wrap()
    }
}
