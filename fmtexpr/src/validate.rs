//! Pack validation.
//!
//! A pack is self-consistent when no variable is bound more than once and every dependency is
//! bound by some element. [`validate`] is exhaustive: it reports every violation found in a
//! [`DependencyReport`], duplicates first, then missing bindings, each group in report order.
use log::warn;
use strum::EnumIs;
use thiserror::Error;

use crate::{ident::Ident, report::DependencyReport};

/// A single consistency violation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs, Error)]
pub enum ValidationError {
    /// The variable is bound by more than one element. One error per extra binding.
    #[error("Variable `{name}` is bound more than once.")]
    DuplicateBinding { name: Ident },
    /// The variable is referenced but no element binds it.
    #[error("Variable `{name}` is referenced but never bound.")]
    MissingBinding { name: Ident },
}

impl ValidationError {
    /// Identity of the offending variable.
    pub fn name(&self) -> &Ident {
        match self {
            ValidationError::DuplicateBinding { name } | ValidationError::MissingBinding { name } => {
                name
            }
        }
    }
}

/// Every violation found while validating a pack. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("Pack validation failed with {} error(s): {}", .0.len(), display_list(.0))]
pub struct ValidationErrors(Vec<ValidationError>);

fn display_list(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Check a dependency report for duplicate and missing bindings.
///
/// Returns `Ok(())` if the report is consistent, all violations otherwise.
pub fn validate(report: &DependencyReport) -> Result<(), ValidationErrors> {
    let duplicates = report
        .duplicate_bindings()
        .iter()
        .map(|name| ValidationError::DuplicateBinding { name: name.clone() });
    let missing = report
        .unsatisfied_dependencies()
        .iter()
        .map(|name| ValidationError::MissingBinding { name: name.clone() });

    let errors: Vec<ValidationError> = duplicates.chain(missing).collect();
    if errors.is_empty() {
        return Ok(());
    }

    for error in &errors {
        warn!("{}", error);
    }
    Err(ValidationErrors(errors))
}
