//! Packs: fixed, ordered, immutable collections of entities.
//!
//! A pack is built once and never mutated. Its order is significant: it drives traversal for
//! introspection and breaks ties ("first seen") when detecting duplicate bindings. Building a
//! pack performs no validation; call [`Pack::dependency_report`] and [`Pack::validate`] on
//! demand.
//!
//! Example
//! ```
//! use fmtexpr::prelude::*;
//!
//! let a = declare_variable("a");
//! let c = declare_variable("c");
//! let pack = pack![a.bind(1), &a + &c];
//!
//! let report = pack.dependency_report();
//! assert_eq!(report.unsatisfied_dependencies(), &[c.ident().clone()]);
//! assert!(report.duplicate_bindings().is_empty());
//! assert!(pack.validate().is_err());
//! ```
use std::sync::Arc;

use log::debug;

use crate::{
    entity::{Entity, Introspect},
    report::{DependencyReport, ElementReport},
    set::{difference_by_prefix, join, remove_if, unique, unique_partition},
    validate::{ValidationErrors, validate},
};

/// Build a [`Pack`] from a comma-separated list of anything convertible into an
/// [`Entity`](crate::entity::Entity).
#[macro_export]
macro_rules! pack {
    ($($entity:expr),* $(,)?) => {
        $crate::pack::Pack::new::<$crate::entity::Entity, _>([
            $($crate::entity::Entity::from($entity)),*
        ])
    };
}

/// Fixed-length, ordered, heterogeneous collection of entities.
///
/// Cloning a pack is cheap and shares the underlying storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pack {
    elements: Arc<[Entity]>,
}

impl Pack {
    /// Build a pack, preserving the order of `entities`.
    pub fn new<E, I>(entities: I) -> Self
    where
        E: Into<Entity>,
        I: IntoIterator<Item = E>,
    {
        Self {
            elements: entities.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.elements.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[Entity] {
        &self.elements
    }

    /// Read-only, restartable projection of every element into an [`ElementReport`].
    pub fn element_reports(&self) -> ElementReports<'_> {
        ElementReports {
            inner: self.elements.iter().enumerate(),
        }
    }

    /// Classify the dependencies of the whole pack.
    ///
    /// 1. `all = unique(join(dependencies(e) for e in pack))`
    /// 2. `raw = [binding(e) for e in pack if binding(e) is some]`
    /// 3. `(bound, duplicates) = unique_partition(raw)`
    /// 4. `unsatisfied = difference_by_prefix(all, bound)`
    pub fn dependency_report(&self) -> DependencyReport {
        let all_dependencies = unique(join(self.elements.iter().map(Introspect::dependencies)));
        let raw_bindings = remove_if(
            self.elements.iter().map(|entity| entity.binding().cloned()),
            Option::is_none,
        );
        let partition = unique_partition(raw_bindings.into_iter().flatten());
        let unsatisfied_dependencies =
            difference_by_prefix(&all_dependencies, &partition.first_seen);

        debug!(
            "Pack of {} elements: {} dependencies, {} bound, {} duplicated, {} unsatisfied",
            self.len(),
            all_dependencies.len(),
            partition.first_seen.len(),
            partition.duplicates.len(),
            unsatisfied_dependencies.len()
        );

        DependencyReport::new(
            all_dependencies,
            partition.first_seen,
            partition.duplicates,
            unsatisfied_dependencies,
        )
    }

    /// Compute the dependency report and validate it.
    ///
    /// Returns the report when the pack is fully self-consistent, every violation otherwise.
    pub fn validate(&self) -> Result<DependencyReport, ValidationErrors> {
        let report = self.dependency_report();
        validate(&report)?;
        Ok(report)
    }
}

impl<E: Into<Entity>> FromIterator<E> for Pack {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Pack::new(iter)
    }
}

impl<'a> IntoIterator for &'a Pack {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// Iterator over the [`ElementReport`]s of a pack, in pack order.
///
/// Call [`Pack::element_reports`] again to re-traverse; the pack is immutable, so every
/// traversal yields identical reports.
#[derive(Debug, Clone)]
pub struct ElementReports<'a> {
    inner: std::iter::Enumerate<std::slice::Iter<'a, Entity>>,
}

impl<'a> Iterator for ElementReports<'a> {
    type Item = ElementReport<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(index, entity)| ElementReport::new(index, entity))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ElementReports<'_> {}
