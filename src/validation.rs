//! Input validation for board tables.
//!
//! Checks the structural integrity of a table before it is laid out.
//! Detects:
//! - Duplicate line IDs
//! - Lines using the identity reserved for the blank separator
//! - Self-links
//! - Links to lines that are not rows of this board
//! - Repeated extra columns on one line
//!
//! All problems are collected, so a caller can report them at once.

use crate::board::BLANK_ROW_ID;
use crate::models::{LineKind, Table};
use std::collections::{HashMap, HashSet};

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
    /// Two lines share the same ID.
    DuplicateId,
    /// A line uses the blank separator's identity.
    ReservedId,
    /// A room line links to itself.
    SelfLink,
    /// A room line links to a line that is not a row of this board.
    InvalidLinkTarget,
    /// A room line carries two values for one column type.
    DuplicateColumn,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a table before layout.
///
/// Checks:
/// 1. No duplicate line IDs
/// 2. No line uses [`BLANK_ROW_ID`]
/// 3. No room line links to itself
/// 4. Every link target is a room line, a chamber line or the blank separator
/// 5. No room line repeats a column type
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_table(table: &Table) -> ValidationResult {
    let mut errors = Vec::new();

    let mut ids = HashSet::new();
    let mut board_rows: HashMap<&str, bool> = HashMap::new();
    for line in &table.lines {
        if !ids.insert(line.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate line ID: {}", line.id),
            ));
        }
        if line.id == BLANK_ROW_ID {
            errors.push(ValidationError::new(
                ValidationErrorKind::ReservedId,
                format!("Line ID '{}' is reserved for the blank separator", line.id),
            ));
        }
        board_rows
            .entry(line.id.as_str())
            .or_insert_with(|| line.is_board_row());
    }

    for line in &table.lines {
        let LineKind::Room(room_line) = &line.kind else {
            continue;
        };

        if let Some(target) = room_line.link.as_deref() {
            if target == line.id {
                errors.push(ValidationError::new(
                    ValidationErrorKind::SelfLink,
                    format!("Line '{}' links to itself", line.id),
                ));
            } else if target != BLANK_ROW_ID {
                match board_rows.get(target) {
                    None => errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidLinkTarget,
                        format!("Line '{}' links to unknown line '{target}'", line.id),
                    )),
                    Some(false) => errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidLinkTarget,
                        format!(
                            "Line '{}' links to '{target}', which is not a board row",
                            line.id
                        ),
                    )),
                    Some(true) => {}
                }
            }
        }

        let mut column_ids = HashSet::new();
        for value in &room_line.columns {
            if !column_ids.insert(value.column_type.id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateColumn,
                    format!(
                        "Line '{}' has more than one value for column '{}'",
                        line.id, value.column_type.name
                    ),
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
