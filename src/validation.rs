//! Catalog seed validation.
//!
//! Checks structural integrity of the venues, works and groups handed to
//! the scheduler before any entry is placed. Detects:
//! - Duplicate IDs (per entity kind)
//! - Group members referencing unknown works
//! - The same work listed twice in one group
//! - Blank IDs
//!
//! Runtimes are not validated: unparseable runtimes count as 0 by design of
//! the runtime rules, and display contexts must still render them.

use std::collections::HashSet;

use crate::catalog::CatalogSeed;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of the same kind share an ID.
    DuplicateId,
    /// An ID is empty or whitespace.
    BlankId,
    /// A group member references a work that doesn't exist.
    UnknownMember,
    /// A group lists the same work more than once.
    DuplicateMember,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a catalog seed.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_seed(seed: &CatalogSeed) -> ValidationResult {
    let mut errors = Vec::new();

    let mut venue_ids = HashSet::new();
    for venue in &seed.venues {
        check_id(&mut errors, "venue", venue.id.as_str());
        if !venue_ids.insert(venue.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate venue ID: {}", venue.id),
            ));
        }
    }

    let mut work_ids = HashSet::new();
    for work in &seed.works {
        check_id(&mut errors, "work", work.id.as_str());
        if !work_ids.insert(work.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate work ID: {}", work.id),
            ));
        }
    }

    let mut group_ids = HashSet::new();
    for group in &seed.groups {
        check_id(&mut errors, "group", group.id.as_str());
        if !group_ids.insert(group.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate group ID: {}", group.id),
            ));
        }

        let mut members = HashSet::new();
        for member in &group.members {
            if !work_ids.contains(member.work_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownMember,
                    format!(
                        "Group '{}' references unknown work '{}'",
                        group.id, member.work_id
                    ),
                ));
            }
            if !members.insert(member.work_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateMember,
                    format!("Group '{}' lists work '{}' twice", group.id, member.work_id),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_id(errors: &mut Vec<ValidationError>, kind: &str, id: &str) {
    if id.trim().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::BlankId,
            format!("A {kind} has a blank ID"),
        ));
    }
}
