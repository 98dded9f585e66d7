//! Board line model.
//!
//! A line is one assignment on a table. Room lines, chamber lines and
//! vacation lines share the staff fields and differ by [`LineKind`].
//! Only room and chamber lines become rows of the board; vacation lines are
//! listed separately.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Chamber, ColumnType, ColumnValue, Department, Employee, Room};
use super::column::{parse_column_key, MAX_COLUMN_VALUE_LEN};
use crate::error::BoardError;

/// One assignment on a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Unique line identifier within its table. Link targets refer to it.
    pub id: String,
    /// Assigned anesthesiologist.
    #[serde(default)]
    pub doctor: Option<Employee>,
    /// Assigned resident.
    #[serde(default)]
    pub resident: Option<Employee>,
    /// Kind-specific payload.
    pub kind: LineKind,
}

/// Closed set of line kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LineKind {
    /// Operating room assignment.
    Room(RoomLine),
    /// Ward chamber assignment.
    Chamber(ChamberLine),
    /// Employee on leave for the day.
    Vacation(VacationLine),
}

/// Operating room assignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomLine {
    /// The room; `None` when the room was removed.
    pub room: Option<Room>,
    /// Id of the line this one points to (patient moved, staff shared).
    #[serde(default)]
    pub link: Option<String>,
    /// Departments operating today, used when the room is `free_dept`.
    #[serde(default)]
    pub departments: Vec<Department>,
    /// Free-text comment.
    #[serde(default)]
    pub comment: String,
    /// Assigned nurse.
    #[serde(default)]
    pub nurse: Option<Employee>,
    /// Start time as entered ("8:30").
    #[serde(default)]
    pub begin_time: Option<String>,
    /// Number of patients transferred to the ICU.
    #[serde(default)]
    pub oair: Option<i32>,
    /// Extra column values.
    #[serde(default)]
    pub columns: Vec<ColumnValue>,
}

/// Ward assignment covering one or more chambers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChamberLine {
    /// Chambers covered by the line. The smallest name is the sort key.
    #[serde(default)]
    pub chambers: Vec<Chamber>,
}

/// An employee on leave.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VacationLine {
    /// Who is on leave.
    pub employee: Option<Employee>,
}

impl Line {
    fn with_kind(id: impl Into<String>, kind: LineKind) -> Self {
        Self {
            id: id.into(),
            doctor: None,
            resident: None,
            kind,
        }
    }

    /// Creates a room line.
    pub fn room(id: impl Into<String>, room: Room) -> Self {
        Self::with_kind(
            id,
            LineKind::Room(RoomLine {
                room: Some(room),
                ..RoomLine::default()
            }),
        )
    }

    /// Creates a chamber line.
    pub fn chamber(id: impl Into<String>, chambers: Vec<Chamber>) -> Self {
        Self::with_kind(id, LineKind::Chamber(ChamberLine { chambers }))
    }

    /// Creates a vacation line.
    pub fn vacation(id: impl Into<String>, employee: Employee) -> Self {
        Self::with_kind(
            id,
            LineKind::Vacation(VacationLine {
                employee: Some(employee),
            }),
        )
    }

    /// Sets the anesthesiologist.
    pub fn with_doctor(mut self, doctor: Employee) -> Self {
        self.doctor = Some(doctor);
        self
    }

    /// Sets the resident.
    pub fn with_resident(mut self, resident: Employee) -> Self {
        self.resident = Some(resident);
        self
    }

    /// Sets the link target. No effect on non-room lines.
    pub fn with_link(mut self, target: impl Into<String>) -> Self {
        if let LineKind::Room(ref mut room_line) = self.kind {
            room_line.link = Some(target.into());
        }
        self
    }

    /// Room payload, if this is a room line.
    pub fn as_room(&self) -> Option<&RoomLine> {
        match &self.kind {
            LineKind::Room(room_line) => Some(room_line),
            _ => None,
        }
    }

    /// Mutable room payload, if this is a room line.
    pub fn as_room_mut(&mut self) -> Option<&mut RoomLine> {
        match &mut self.kind {
            LineKind::Room(room_line) => Some(room_line),
            _ => None,
        }
    }

    /// Chamber payload, if this is a chamber line.
    pub fn as_chamber(&self) -> Option<&ChamberLine> {
        match &self.kind {
            LineKind::Chamber(chamber_line) => Some(chamber_line),
            _ => None,
        }
    }

    /// Vacation payload, if this is a vacation line.
    pub fn as_vacation(&self) -> Option<&VacationLine> {
        match &self.kind {
            LineKind::Vacation(vacation) => Some(vacation),
            _ => None,
        }
    }

    /// Whether the line is drawn as a row of the board.
    pub fn is_board_row(&self) -> bool {
        !matches!(self.kind, LineKind::Vacation(_))
    }

    /// Outgoing link target, if any.
    pub fn link(&self) -> Option<&str> {
        self.as_room().and_then(|r| r.link.as_deref())
    }
}

impl RoomLine {
    /// Column values keyed by column type id.
    pub fn column_map(&self) -> BTreeMap<u32, &str> {
        self.columns
            .iter()
            .map(|v| (v.column_type.id, v.value.as_str()))
            .collect()
    }

    /// Department text shown on the board.
    ///
    /// For rooms shared between departments this is the line's own list,
    /// otherwise the room's department.
    pub fn departments_label(&self) -> String {
        match &self.room {
            None => String::new(),
            Some(room) if room.free_dept => self
                .departments
                .iter()
                .map(|d| d.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            Some(room) => room
                .department
                .as_ref()
                .map(|d| d.name.clone())
                .unwrap_or_default(),
        }
    }

    /// Replaces all column values with the non-empty `col_<id>` fields.
    ///
    /// Fields without the column prefix are ignored. Fields are checked in
    /// key order, so the first bad key is the one reported.
    ///
    /// # Errors
    /// - [`BoardError::UnknownColumn`] for a malformed key or an id not in
    ///   `column_types`.
    /// - [`BoardError::ColumnValueTooLong`] for values over 8 characters.
    ///
    /// On error the line is left unchanged.
    pub fn apply_column_fields(
        &mut self,
        column_types: &[ColumnType],
        cleaned: &BTreeMap<String, String>,
    ) -> Result<(), BoardError> {
        let mut columns = Vec::new();
        for (key, value) in cleaned {
            let Some(id) = parse_column_key(key)? else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            let column_type = column_types
                .iter()
                .find(|ct| ct.id == id)
                .ok_or_else(|| BoardError::UnknownColumn { key: key.clone() })?;
            if value.chars().count() > MAX_COLUMN_VALUE_LEN {
                return Err(BoardError::ColumnValueTooLong {
                    key: key.clone(),
                    max: MAX_COLUMN_VALUE_LEN,
                });
            }
            columns.push(ColumnValue::new(column_type.clone(), value.clone()));
        }
        columns.sort_by_key(|v| v.column_type.id);
        self.columns = columns;
        Ok(())
    }
}

impl ChamberLine {
    /// Name of the first chamber in name order, or an empty string.
    pub fn first_name(&self) -> &str {
        self.chambers
            .iter()
            .map(|c| c.name.as_str())
            .min()
            .unwrap_or("")
    }

    /// All chamber names in name order, joined by `"; "`.
    pub fn label(&self) -> String {
        let mut names: Vec<&str> = self.chambers.iter().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names.join("; ")
    }
}
