//! Extra table columns.
//!
//! Each [`ColumnType`] is an additional short column on room lines (one per
//! anaesthesia kind). The set of column types is configured at run time, so
//! the room-line field list is built per request from the stored column
//! definitions instead of being fixed.

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

/// Key prefix of column fields (`col_<column type id>`).
pub const COL_PREFIX: &str = "col_";

/// Maximum length of a column value, in characters.
pub const MAX_COLUMN_VALUE_LEN: usize = 8;

/// Fixed room-line fields placed before the column fields.
const LEADING_FIELDS: [&str; 3] = ["room", "begin_time", "dept"];

/// Fixed room-line fields placed after the column fields.
const TRAILING_FIELDS: [&str; 6] = ["doctor", "resident", "nurse", "oair", "link", "comment"];

/// A configurable extra column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnType {
    /// Unique column type identifier (sort key).
    pub id: u32,
    /// Short column header.
    pub name: String,
}

/// A value of one extra column on one room line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnValue {
    /// Column the value belongs to.
    pub column_type: ColumnType,
    /// Cell text.
    pub value: String,
}

/// An input field of the room-line form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field key.
    pub key: String,
    /// Field label. Empty for fixed fields, whose labels the form owns.
    pub label: String,
    /// Maximum input length, if limited.
    pub max_length: Option<usize>,
    /// Whether the field must be filled in.
    pub required: bool,
}

impl ColumnType {
    /// Creates a new column type.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Form field key of this column.
    pub fn field_key(&self) -> String {
        format!("{COL_PREFIX}{}", self.id)
    }
}

impl ColumnValue {
    /// Creates a new column value.
    pub fn new(column_type: ColumnType, value: impl Into<String>) -> Self {
        Self {
            column_type,
            value: value.into(),
        }
    }
}

impl FieldSpec {
    fn fixed(key: &str) -> Self {
        Self {
            key: key.to_string(),
            label: String::new(),
            max_length: None,
            required: false,
        }
    }
}

/// Parses a `col_<id>` field key. Returns `Ok(None)` for other keys.
///
/// # Errors
/// [`BoardError::UnknownColumn`] when the key has the prefix but no numeric id.
pub fn parse_column_key(key: &str) -> Result<Option<u32>, BoardError> {
    match key.strip_prefix(COL_PREFIX) {
        None => Ok(None),
        Some(id) => id.parse::<u32>().map(Some).map_err(|_| BoardError::UnknownColumn {
            key: key.to_string(),
        }),
    }
}

/// Builds one optional text field per column type.
pub fn column_fields(column_types: &[ColumnType]) -> Vec<FieldSpec> {
    column_types
        .iter()
        .map(|ct| FieldSpec {
            key: ct.field_key(),
            label: ct.name.clone(),
            max_length: Some(MAX_COLUMN_VALUE_LEN),
            required: false,
        })
        .collect()
}

/// Complete room-line field order with the column fields in the middle.
///
/// `room, begin_time, dept`, then one field per column type, then
/// `doctor, resident, nurse, oair, link, comment`.
pub fn room_line_fieldset(column_types: &[ColumnType]) -> Vec<FieldSpec> {
    LEADING_FIELDS
        .iter()
        .map(|key| FieldSpec::fixed(key))
        .chain(column_fields(column_types))
        .chain(TRAILING_FIELDS.iter().map(|key| FieldSpec::fixed(key)))
        .collect()
}
