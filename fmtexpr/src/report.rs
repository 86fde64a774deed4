//! Introspection reports.
//!
//! [`ElementReport`] is the per-element projection produced by
//! [`Pack::element_reports`](crate::pack::Pack::element_reports); [`DependencyReport`] is the
//! aggregate classification produced by
//! [`Pack::dependency_report`](crate::pack::Pack::dependency_report).
use crate::{
    descriptor::Descriptor,
    entity::{Entity, EntityKind, Introspect, Payload},
    ident::{Ident, LabelProvider},
    set::DependencySet,
};

/// What an element carries as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadSummary<'a> {
    /// A value bound to a concrete payload.
    Value(&'a Payload),
    /// A bare literal, not attached to any declaration.
    Literal(&'a Payload),
    /// A variable or primitive that was never bound.
    UnevaluatedDeclaration,
    /// An expression that was never applied.
    UnevaluatedExpression,
}

impl std::fmt::Display for PayloadSummary<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadSummary::Value(payload) | PayloadSummary::Literal(payload) => {
                write!(f, "{} ({})", payload, payload.kind_str())
            }
            PayloadSummary::UnevaluatedDeclaration => write!(f, "(unevaluated statement)"),
            PayloadSummary::UnevaluatedExpression => write!(f, "(unevaluated expression)"),
        }
    }
}

/// Metadata recovered for a single pack element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementReport<'a> {
    pub index: usize,
    pub entity: &'a Entity,
}

impl<'a> ElementReport<'a> {
    pub fn new(index: usize, entity: &'a Entity) -> Self {
        Self { index, entity }
    }

    pub fn kind(&self) -> EntityKind {
        self.entity.kind()
    }

    /// Label of the declared type, e.g. `value<a, unspecified, integer>`.
    pub fn declared_type(&self, labels: &dyn LabelProvider) -> String {
        self.entity.type_label(labels)
    }

    /// Variable the element satisfies, if any.
    pub fn binding(&self) -> Option<&'a Ident> {
        self.entity.binding()
    }

    /// Label of the bound variable, or `none`.
    pub fn binding_label(&self, labels: &dyn LabelProvider) -> String {
        self.binding()
            .map(|ident| labels.label(ident))
            .unwrap_or_else(|| "none".to_string())
    }

    /// The element's own dependencies.
    pub fn dependencies(&self) -> &'a [Ident] {
        self.entity.dependencies()
    }

    pub fn descriptor(&self) -> Option<&'a Descriptor> {
        self.entity.descriptor()
    }

    /// Label of the descriptor, or `none` for expressions and literals.
    pub fn descriptor_label(&self, labels: &dyn LabelProvider) -> String {
        self.descriptor()
            .map(|descriptor| descriptor.label(labels))
            .unwrap_or_else(|| "none".to_string())
    }

    pub fn payload(&self) -> PayloadSummary<'a> {
        match self.entity {
            Entity::Literal(literal) => PayloadSummary::Literal(literal.payload()),
            Entity::Value(value) => PayloadSummary::Value(value.payload()),
            Entity::Variable(_) | Entity::Primitive(_) => PayloadSummary::UnevaluatedDeclaration,
            Entity::Expression(_) => PayloadSummary::UnevaluatedExpression,
        }
    }
}

/// Aggregate dependency classification of a pack.
///
/// Every set preserves first-seen order when scanning the pack left to right.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DependencyReport {
    all_dependencies: DependencySet,
    bound_variables: DependencySet,
    duplicate_bindings: DependencySet,
    unsatisfied_dependencies: DependencySet,
}

impl DependencyReport {
    pub fn new(
        all_dependencies: DependencySet,
        bound_variables: DependencySet,
        duplicate_bindings: DependencySet,
        unsatisfied_dependencies: DependencySet,
    ) -> Self {
        Self {
            all_dependencies,
            bound_variables,
            duplicate_bindings,
            unsatisfied_dependencies,
        }
    }

    /// Union of every element's own dependencies.
    pub fn all_dependencies(&self) -> &[Ident] {
        &self.all_dependencies
    }

    /// Distinct variables bound by at least one element. These are the satisfied bindings.
    pub fn bound_variables(&self) -> &[Ident] {
        &self.bound_variables
    }

    /// Every binding occurrence beyond the first one of its variable.
    pub fn duplicate_bindings(&self) -> &[Ident] {
        &self.duplicate_bindings
    }

    /// Dependencies no element binds.
    pub fn unsatisfied_dependencies(&self) -> &[Ident] {
        &self.unsatisfied_dependencies
    }

    /// Dependencies some element binds, in [`Self::all_dependencies`] order.
    pub fn satisfied_dependencies(&self) -> DependencySet {
        self.all_dependencies
            .iter()
            .filter(|ident| self.bound_variables.contains(ident))
            .cloned()
            .collect()
    }

    /// Returns true if nothing is bound twice and every dependency is bound.
    pub fn is_consistent(&self) -> bool {
        self.duplicate_bindings.is_empty() && self.unsatisfied_dependencies.is_empty()
    }
}
