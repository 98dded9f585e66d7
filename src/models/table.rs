//! Daily table (the board for one date).

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{Chamber, ChamberLine, ColumnType, Line, Room, RoomLine, VacationLine};

/// Genitive month names used in the date caption.
const MONTHS_GENITIVE: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// Assignments for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Unique table identifier.
    pub id: u32,
    /// Date the table is for.
    pub date: NaiveDate,
    /// Free-text comment printed under the board.
    #[serde(default)]
    pub comment: String,
    /// All lines of the table, in storage order.
    #[serde(default)]
    pub lines: Vec<Line>,
}

impl Table {
    /// Creates an empty table.
    pub fn new(id: u32, date: NaiveDate) -> Self {
        Self {
            id,
            date,
            comment: String::new(),
            lines: Vec::new(),
        }
    }

    /// Sets the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Adds a line.
    pub fn with_line(mut self, line: Line) -> Self {
        self.lines.push(line);
        self
    }

    /// Creates tomorrow's table pre-filled from template places.
    ///
    /// Adds one empty room line per enabled template room (`r<id>`), then
    /// one chamber line per enabled template chamber (`c<id>`).
    pub fn autocreate(id: u32, today: NaiveDate, rooms: &[Room], chambers: &[Chamber]) -> Self {
        let date = today.checked_add_days(Days::new(1)).unwrap_or(today);
        let mut table = Self::new(id, date);

        for room in rooms.iter().filter(|r| r.template && r.enable) {
            table
                .lines
                .push(Line::room(format!("r{}", room.id), room.clone()));
        }
        for chamber in chambers.iter().filter(|c| c.template && c.enable) {
            table
                .lines
                .push(Line::chamber(format!("c{}", chamber.id), vec![chamber.clone()]));
        }

        table
    }

    /// Caption like `22 февраля`.
    pub fn date_caption(&self) -> String {
        format!(
            "{} {}",
            self.date.day(),
            MONTHS_GENITIVE[self.date.month0() as usize]
        )
    }

    /// Finds a line by id.
    pub fn line(&self, id: &str) -> Option<&Line> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Room lines with their payload, in storage order.
    pub fn room_lines(&self) -> impl Iterator<Item = (&Line, &RoomLine)> {
        self.lines.iter().filter_map(|l| l.as_room().map(|r| (l, r)))
    }

    /// Chamber lines with their payload, in storage order.
    pub fn chamber_lines(&self) -> impl Iterator<Item = (&Line, &ChamberLine)> {
        self.lines
            .iter()
            .filter_map(|l| l.as_chamber().map(|c| (l, c)))
    }

    /// Vacation lines with their payload, in storage order.
    pub fn vacation_lines(&self) -> impl Iterator<Item = (&Line, &VacationLine)> {
        self.lines
            .iter()
            .filter_map(|l| l.as_vacation().map(|v| (l, v)))
    }

    /// Distinct column types used by this table's room lines, by id.
    pub fn column_types(&self) -> Vec<ColumnType> {
        let mut types: Vec<ColumnType> = self
            .room_lines()
            .flat_map(|(_, r)| r.columns.iter().map(|v| v.column_type.clone()))
            .collect();
        types.sort_by_key(|ct| ct.id);
        types.dedup_by_key(|ct| ct.id);
        types
    }
}
