//! Fmtexpr: heterogeneous packs of format entities with dependency introspection.
//!
//! A pack is a fixed, ordered collection of entities (variables, typed variables, primitive
//! type declarations, bound values, deferred expressions and bare literals). Every entity can
//! report which variable identities it depends on, which variable it binds and which
//! descriptor shapes it. From that, a pack computes its aggregate dependencies, the variables
//! bound more than once and the dependencies nothing binds.
//!
//! Model
//!  - Identities are UUID-backed: two variables declared with the same name are distinct.
//!  - Entity sets keep first-seen order and never hold duplicates once deduplicated.
//!  - Construction is total; consistency is checked on demand with [`pack::Pack::validate`].
//!
//! Example
//! ```
//! use fmtexpr::prelude::*;
//!
//! let int = declare_primitive(Descriptor::field("int", IntegerField::I32));
//! let a = declare_variable("a");
//! let b = declare_typed_variable("b", &int);
//! let c = declare_variable("c");
//!
//! let pack = pack![a.bind(1), b.bind(2), &a + &c];
//! let report = pack.dependency_report();
//! assert_eq!(report.unsatisfied_dependencies(), &[c.ident().clone()]);
//!
//! let consistent = pack![a.bind(1), c.bind(3), &a + &c];
//! assert!(consistent.validate().is_ok());
//! ```

/// Type descriptors and field descriptors.
pub mod descriptor;
/// Entities, payloads, operators and evaluation.
pub mod entity;
/// Errors raised while evaluating or serializing entities.
pub mod error;
/// Wire field types.
pub mod field;
/// UUID-backed identities and labelling.
pub mod ident;
/// Ordered immutable entity packs.
pub mod pack;
/// Colored, width-aware introspection printer.
pub mod pretty;
/// Per-element and aggregate introspection reports.
pub mod report;
/// First-seen ordered set algebra.
pub mod set;
/// Pack consistency checks.
pub mod validate;

pub mod prelude {
    //! Convenient re-exports for end users.
    //!
    //! - Entity types with the `Introspect` and `Bindable` capabilities
    //! - Free-function builders from `entity::func::*`
    //! - The `pack!` macro, reports and validation
    //! - Pretty-printing via `PrettyIntrospection`
    pub use crate::descriptor::{Descriptor, FieldDescriptor};
    pub use crate::entity::{
        BinaryOp, Bindable, Entity, EntityKind, Expression, Introspect, Literal, Payload, Primitive,
        Value, Variable, func::*,
    };
    pub use crate::error::Error;
    pub use crate::field::{FieldType, IntegerField, IntegerWidth, Signedness};
    pub use crate::ident::{Ident, LabelProvider, LabelStyle};
    pub use crate::pack;
    pub use crate::pack::Pack;
    pub use crate::pretty::{PrettyIntrospection, RenderOptions};
    pub use crate::report::{DependencyReport, ElementReport, PayloadSummary};
    pub use crate::validate::{ValidationError, ValidationErrors, validate};
}
