//! Ordered sets with first-seen ordering.
//!
//! Role
//! - Provide the small set algebra every dependency computation is built on: concatenation,
//!   stable deduplication, partitioning of repeated elements, and differencing.
//! - Sets are plain ordered sequences. Insertion order is significant and drives the
//!   determinism of every diagnostic; uniqueness is only guaranteed after [`unique`],
//!   [`unique_append`] or [`unique_partition`].
//!
//! Performance
//! - Storage is a [`SmallVec`] keeping up to 8 elements inline, which covers the typical
//!   dependency list of a single entity without touching the heap.
//! - Membership checks are linear scans. Sets here are small and statically bounded, and the
//!   element type only needs [`PartialEq`].
//!
//! Example
//! ```
//! use fmtexpr::set::{unique, unique_partition};
//!
//! assert_eq!(unique(['a', 'b', 'a', 'c', 'b']).as_slice(), &['a', 'b', 'c']);
//!
//! let partition = unique_partition(['b', 'b', 'a', 'b']);
//! assert_eq!(partition.first_seen.as_slice(), &['b', 'a']);
//! assert_eq!(partition.duplicates.as_slice(), &['b', 'b']);
//! ```
use std::ops::Deref;

use smallvec::SmallVec;

use crate::ident::Ident;

/// Ordered sequence of elements, semantically a set once deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderedSet<T>(SmallVec<[T; 8]>);

/// Ordered set of identities referenced or bound by entities.
pub type DependencySet = OrderedSet<Ident>;

impl<T> OrderedSet<T> {
    /// Create an empty set.
    #[inline]
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// Borrow the elements in order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.0.as_slice()
    }

    /// Append an element without any uniqueness check.
    #[inline]
    pub fn push(&mut self, item: T) {
        self.0.push(item);
    }

    /// Consume the set into a plain vector.
    pub fn into_vec(self) -> Vec<T> {
        self.0.into_vec()
    }
}

impl<T: PartialEq> OrderedSet<T> {
    /// Append `item` only if no equal element is already present.
    ///
    /// Returns `true` if the element was inserted.
    pub fn insert(&mut self, item: T) -> bool {
        if self.0.contains(&item) {
            false
        } else {
            self.0.push(item);
            true
        }
    }
}

impl<T> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for OrderedSet<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T> AsRef<[T]> for OrderedSet<T> {
    fn as_ref(&self) -> &[T] {
        &self.0
    }
}

impl<T> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<T> IntoIterator for OrderedSet<T> {
    type Item = T;
    type IntoIter = smallvec::IntoIter<[T; 8]>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Result of [`unique_partition`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Partition<T> {
    /// First occurrence of every distinct element, in order of appearance.
    pub first_seen: OrderedSet<T>,
    /// Every extra occurrence (2nd, 3rd, ...) of an element, in order of appearance.
    pub duplicates: OrderedSet<T>,
}

impl<T> Default for Partition<T> {
    fn default() -> Self {
        Self {
            first_seen: OrderedSet::new(),
            duplicates: OrderedSet::new(),
        }
    }
}

/// Concatenate all `sets` in order. No deduplication is performed.
pub fn join<T, S, I>(sets: I) -> OrderedSet<T>
where
    T: Clone,
    S: AsRef<[T]>,
    I: IntoIterator<Item = S>,
{
    let mut out = OrderedSet::new();
    for set in sets {
        out.extend(set.as_ref().iter().cloned());
    }
    out
}

/// Keep only the first occurrence of every distinct element, preserving order.
///
/// Idempotent: `unique(unique(s)) == unique(s)`.
pub fn unique<T: PartialEq>(items: impl IntoIterator<Item = T>) -> OrderedSet<T> {
    unique_append(OrderedSet::new(), items)
}

/// Fold `items` into `acc`, appending an item only if it is not already present in the
/// running accumulator.
///
/// Elements already in `acc` are left untouched, duplicated or not.
pub fn unique_append<T: PartialEq>(
    acc: OrderedSet<T>,
    items: impl IntoIterator<Item = T>,
) -> OrderedSet<T> {
    items.into_iter().fold(acc, |mut acc, item| {
        acc.insert(item);
        acc
    })
}

/// Split `items` into first occurrences and extra occurrences in a single pass.
pub fn unique_partition<T: PartialEq>(items: impl IntoIterator<Item = T>) -> Partition<T> {
    items
        .into_iter()
        .fold(Partition::default(), |mut partition, item| {
            if partition.first_seen.contains(&item) {
                partition.duplicates.push(item);
            } else {
                partition.first_seen.push(item);
            }
            partition
        })
}

/// Drop every element satisfying `predicate`, preserving the order of the others.
pub fn remove_if<T>(
    items: impl IntoIterator<Item = T>,
    mut predicate: impl FnMut(&T) -> bool,
) -> OrderedSet<T> {
    items.into_iter().filter(|item| !predicate(item)).collect()
}

/// Elements of `full` that are not present in `prefix`, in `full`'s order.
///
/// Computed by unique-appending `full` onto `prefix` and dropping the first `prefix.len()`
/// elements of the result. `prefix` is expected to be free of internal duplicates.
pub fn difference_by_prefix<T: PartialEq + Clone>(full: &[T], prefix: &[T]) -> OrderedSet<T> {
    let seed: OrderedSet<T> = prefix.iter().cloned().collect();
    unique_append(seed, full.iter().cloned())
        .into_iter()
        .skip(prefix.len())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_keeps_every_occurrence() {
        let joined = join([vec![1, 2], vec![], vec![2, 3]]);
        assert_eq!(joined.as_slice(), &[1, 2, 2, 3]);
    }

    #[test]
    fn empty_inputs_are_identities() {
        let empty: [Vec<u8>; 0] = [];
        assert!(join(empty).is_empty());
        assert!(unique(Vec::<u8>::new()).is_empty());
        let partition = unique_partition(Vec::<u8>::new());
        assert!(partition.first_seen.is_empty());
        assert!(partition.duplicates.is_empty());
    }

    #[test]
    fn unique_append_checks_running_accumulator() {
        let acc: OrderedSet<_> = [3, 1].into_iter().collect();
        let out = unique_append(acc, [1, 2, 2, 3, 4]);
        assert_eq!(out.as_slice(), &[3, 1, 2, 4]);
    }

    #[test]
    fn partition_keeps_every_extra_occurrence() {
        let partition = unique_partition(["b", "a", "b", "b", "c", "a"]);
        assert_eq!(partition.first_seen.as_slice(), &["b", "a", "c"]);
        assert_eq!(partition.duplicates.as_slice(), &["b", "b", "a"]);
    }

    #[test]
    fn remove_if_filters_sentinels() {
        let out = remove_if([Some(1), None, Some(2), None], Option::is_none);
        assert_eq!(out.as_slice(), &[Some(1), Some(2)]);
    }

    #[test]
    fn difference_preserves_full_order() {
        let out = difference_by_prefix(&[5, 4, 3, 2, 1], &[4, 2]);
        assert_eq!(out.as_slice(), &[5, 3, 1]);
    }

    #[test]
    fn difference_tolerates_prefix_outside_full() {
        let out = difference_by_prefix(&['a', 'c'], &['b', 'a']);
        assert_eq!(out.as_slice(), &['c']);
    }
}
