//! Identities of declared things.
//!
//! Every variable and every field descriptor receives a distinct [`Ident`] when it is declared.
//! Identities compare by declaration, never by name: two variables both called `a` are two
//! different dependencies.
use std::{
    hash::{Hash, Hasher},
    sync::Arc,
};

use log::trace;
use strum::{EnumIs, EnumIter, IntoEnumIterator};
use uuid::Uuid;

/// What kind of declaration an [`Ident`] stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIs, EnumIter)]
pub enum IdentKind {
    /// A named slot, typed or untyped.
    Variable,
    /// A field descriptor, such as a fixed-width integer.
    Descriptor,
}

impl IdentKind {
    /// Creates an [`IdentKind`] from its string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        IdentKind::iter().find(|kind| kind.to_str() == s)
    }

    /// Returns the string representation of the [`IdentKind`].
    pub fn to_str(&self) -> &'static str {
        match self {
            IdentKind::Variable => "var",
            IdentKind::Descriptor => "desc",
        }
    }
}

/// Opaque, comparable token standing for a distinct declared thing.
///
/// Equality, ordering and hashing only consider the underlying UUID. The name is carried
/// for diagnostics.
///
/// Display
/// - With default formatting: the declared name.
/// - With alternate formatting (`{:#}`): `name@xxxxxxxx` where the suffix is the first 8
///   hexadecimal digits of the UUID, to tell homonyms apart.
#[derive(Debug, Clone)]
pub struct Ident {
    uuid: Uuid,
    kind: IdentKind,
    name: Arc<str>,
}

impl Ident {
    /// Allocate a fresh identity.
    pub fn new(kind: IdentKind, name: impl Into<Arc<str>>) -> Self {
        let ident = Self {
            uuid: Uuid::new_v4(),
            kind,
            name: name.into(),
        };
        trace!(
            "Declared {} `{}` with UUID {}",
            kind.to_str(),
            ident.name,
            ident.uuid
        );
        ident
    }

    /// Allocate a fresh variable identity.
    pub fn variable(name: impl Into<Arc<str>>) -> Self {
        Self::new(IdentKind::Variable, name)
    }

    /// Allocate a fresh descriptor identity.
    pub fn descriptor(name: impl Into<Arc<str>>) -> Self {
        Self::new(IdentKind::Descriptor, name)
    }

    /// The unique identifier of this declaration.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn kind(&self) -> IdentKind {
        self.kind
    }

    /// Declared name. Not unique.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Ident {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl Eq for Ident {}

impl PartialOrd for Ident {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ident {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.uuid.cmp(&other.uuid)
    }
}

impl Hash for Ident {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            let simple = self.uuid.simple().to_string();
            write!(f, "{}@{}", self.name, &simple[..8])
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// Provides human-readable labels for identities in diagnostics.
///
/// Labels are display-only; nothing in the dependency computation depends on them.
pub trait LabelProvider {
    fn label(&self, ident: &Ident) -> String;
}

/// Built-in labelling strategies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum LabelStyle {
    /// Declared name only.
    #[default]
    Name,
    /// Declared name followed by a short UUID prefix.
    Qualified,
}

impl LabelProvider for LabelStyle {
    fn label(&self, ident: &Ident) -> String {
        match self {
            LabelStyle::Name => format!("{}", ident),
            LabelStyle::Qualified => format!("{:#}", ident),
        }
    }
}

