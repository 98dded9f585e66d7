//! Board view: everything a renderer needs to draw one table.

use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::lanes::{comment_indent, Marker, Placement};
use super::sequencer::{normalize_links, RowKind, RowSequence};
use crate::config::BoardConfig;
use crate::error::BoardError;
use crate::models::{Building, ColumnType, Line, Table};
use crate::validation::validate_table;

/// One row of the board with its link markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardRow {
    /// Position in the board.
    pub index: usize,
    /// Row kind.
    pub kind: RowKind,
    /// The line shown; `None` for the blank separator.
    pub line: Option<Line>,
    /// Link markers in drawing order.
    pub markers: Vec<Marker>,
}

/// Laid-out table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    /// Table identifier.
    pub table_id: u32,
    /// Table date.
    pub date: NaiveDate,
    /// Caption like `22 февраля`.
    pub date_caption: String,
    /// Table comment.
    pub comment: String,
    /// Room rows, the blank separator, then chamber rows.
    pub rows: Vec<BoardRow>,
    /// Allocated link lanes, in normalized link order.
    pub placements: Vec<Placement>,
    /// Horizontal space reserved for connectors left of the comments.
    pub comment_indent: u32,
    /// Vacation lines by employee name.
    pub vacations: Vec<Line>,
    /// Building legend, by name.
    pub buildings: Vec<Building>,
    /// Extra columns used by this table.
    pub column_types: Vec<ColumnType>,
}

impl BoardView {
    /// Lays out a table.
    ///
    /// The table is validated first; any validation error fails the whole
    /// layout.
    ///
    /// # Errors
    /// - [`BoardError::Invalid`] with every validation problem found.
    /// - [`BoardError::UnknownLinkTarget`] / [`BoardError::SelfLink`] for
    ///   links that do not resolve to another row.
    pub fn build(
        table: &Table,
        buildings: &[Building],
        config: &BoardConfig,
    ) -> Result<Self, BoardError> {
        info!(table_id = table.id, lines = table.lines.len(); "Laying out board");
        validate_table(table)?;

        let sequence = RowSequence::from_table(table);
        let raw = sequence.resolve_links()?;
        let links = normalize_links(&raw)?;

        let allocator = config.allocator();
        let placements = allocator.place(&links);
        let markers = allocator.markers(&placements, sequence.len());
        let indent = comment_indent(&markers);

        let rows: Vec<BoardRow> = markers
            .into_iter()
            .enumerate()
            .filter_map(|(index, markers)| {
                sequence.kind_at(index).map(|kind| BoardRow {
                    index,
                    kind,
                    line: sequence.line_at(index).cloned(),
                    markers,
                })
            })
            .collect();

        let mut vacations: Vec<Line> = table.vacation_lines().map(|(l, _)| l.clone()).collect();
        vacations.sort_by(|a, b| employee_name(a).cmp(employee_name(b)));

        let mut buildings = buildings.to_vec();
        buildings.sort_by(|a, b| a.name.cmp(&b.name));

        debug!(
            rows = rows.len(),
            links = placements.len(),
            comment_indent = indent;
            "Board laid out"
        );

        Ok(Self {
            table_id: table.id,
            date: table.date,
            date_caption: table.date_caption(),
            comment: table.comment.clone(),
            rows,
            placements,
            comment_indent: indent,
            vacations,
            buildings,
            column_types: table.column_types(),
        })
    }

    /// Room rows in board order.
    pub fn room_rows(&self) -> impl Iterator<Item = &BoardRow> {
        self.rows_of(RowKind::Room)
    }

    /// Chamber rows in board order.
    pub fn chamber_rows(&self) -> impl Iterator<Item = &BoardRow> {
        self.rows_of(RowKind::Chamber)
    }

    /// The blank separator row.
    pub fn blank_row(&self) -> Option<&BoardRow> {
        self.rows_of(RowKind::Blank).next()
    }

    /// Whether any link is drawn.
    pub fn has_links(&self) -> bool {
        !self.placements.is_empty()
    }

    fn rows_of(&self, kind: RowKind) -> impl Iterator<Item = &BoardRow> {
        self.rows.iter().filter(move |r| r.kind == kind)
    }
}

fn employee_name(line: &Line) -> &str {
    line.as_vacation()
        .and_then(|v| v.employee.as_ref())
        .map(|e| e.name.as_str())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{MarkerKind, BLANK_ROW_ID};
    use crate::config::LayoutConfig;
    use crate::models::{Chamber, ColumnValue, Employee, Room};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 2, 22).unwrap()
    }

    fn room(id: &str, number: &str) -> Line {
        Line::room(id, Room::new(0, 2, number).in_building("A"))
    }

    fn sample_table() -> Table {
        // rows: r1=0, r2=1, r3=2, r4=3, blank=4, c1=5
        Table::new(7, date())
            .with_comment("Duty: 2 nurses")
            .with_line(room("r4", "4").with_link("r1"))
            .with_line(room("r1", "1"))
            .with_line(room("r2", "2").with_link("r3"))
            .with_line(room("r3", "3"))
            .with_line(Line::chamber("c1", vec![Chamber::new(1, "Ward 1")]))
            .with_line(Line::vacation("v2", Employee::doctor(2, "Petrov")))
            .with_line(Line::vacation("v1", Employee::nurse(1, "Ivanova")))
    }

    fn kinds(row: &BoardRow) -> Vec<(MarkerKind, u32)> {
        row.markers.iter().map(|m| (m.kind, m.offset)).collect()
    }

    #[test]
    fn test_build_sample_board() {
        let buildings = vec![Building::new(2, "B"), Building::new(1, "A")];
        let view = BoardView::build(&sample_table(), &buildings, &BoardConfig::default()).unwrap();

        assert_eq!(view.table_id, 7);
        assert_eq!(view.date_caption, "22 февраля");
        assert_eq!(view.comment, "Duty: 2 nurses");
        assert_eq!(view.rows.len(), 6);

        let room_ids: Vec<&str> = view
            .room_rows()
            .map(|r| r.line.as_ref().unwrap().id.as_str())
            .collect();
        assert_eq!(room_ids, vec!["r1", "r2", "r3", "r4"]);
        assert_eq!(view.blank_row().unwrap().index, 4);
        assert_eq!(view.chamber_rows().count(), 1);

        // (0,3) reversed contains (1,2): the container moves to lane 2.
        use crate::board::MarkerKind::*;
        assert_eq!(kinds(&view.rows[0]), vec![(Out, 32), (ArrowBack, 0)]);
        assert_eq!(kinds(&view.rows[1]), vec![(Down, 32), (Out, 16)]);
        assert_eq!(
            kinds(&view.rows[2]),
            vec![(Down, 32), (In, 16), (ArrowForward, 0)]
        );
        assert_eq!(kinds(&view.rows[3]), vec![(In, 32)]);
        assert!(view.blank_row().unwrap().markers.is_empty());
        assert_eq!(view.comment_indent, 32);
        assert!(view.has_links());

        let vacation_names: Vec<&str> = view
            .vacations
            .iter()
            .map(|l| l.as_vacation().unwrap().employee.as_ref().unwrap().name.as_str())
            .collect();
        assert_eq!(vacation_names, vec!["Ivanova", "Petrov"]);

        let building_names: Vec<&str> = view.buildings.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(building_names, vec!["A", "B"]);
    }

    #[test]
    fn test_links_to_blank_and_chamber_rows() {
        let table = Table::new(1, date())
            .with_line(room("r1", "1").with_link(BLANK_ROW_ID))
            .with_line(room("r2", "2").with_link("c1"))
            .with_line(Line::chamber("c1", vec![Chamber::new(1, "Ward 1")]));
        // rows: r1=0, r2=1, blank=2, c1=3
        let view = BoardView::build(&table, &[], &BoardConfig::default()).unwrap();

        use crate::board::MarkerKind::*;
        assert_eq!(
            kinds(view.blank_row().unwrap()),
            vec![(In, 16), (ArrowForward, 0), (Down, 32)]
        );
        assert_eq!(
            kinds(view.chamber_rows().next().unwrap()),
            vec![(In, 32), (ArrowForward, 0)]
        );
    }

    #[test]
    fn test_no_links_gives_zero_indent() {
        let table = Table::new(1, date()).with_line(room("r1", "1"));
        let view = BoardView::build(&table, &[], &BoardConfig::default()).unwrap();
        assert!(!view.has_links());
        assert_eq!(view.comment_indent, 0);
        assert!(view.rows.iter().all(|r| r.markers.is_empty()));
    }

    #[test]
    fn test_empty_table() {
        let view = BoardView::build(&Table::new(1, date()), &[], &BoardConfig::default()).unwrap();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].kind, RowKind::Blank);
        assert!(view.rows[0].line.is_none());
    }

    #[test]
    fn test_invalid_table_fails_whole_layout() {
        let table = Table::new(1, date())
            .with_line(room("r1", "1").with_link("gone"))
            .with_line(room("r2", "2").with_link("r2"));
        let err = BoardView::build(&table, &[], &BoardConfig::default()).unwrap_err();
        match err {
            BoardError::Invalid(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_configured_arrow_width() {
        let config = BoardConfig::new(LayoutConfig::new(10));
        let view = BoardView::build(&sample_table(), &[], &config).unwrap();
        assert_eq!(view.comment_indent, 20);
    }

    #[test]
    fn test_column_types_exposed() {
        let eta = ColumnType::new(1, "ETA");
        let mut line = room("r1", "1");
        line.as_room_mut().unwrap().columns = vec![ColumnValue::new(eta.clone(), "2")];
        let table = Table::new(1, date()).with_line(line);
        let view = BoardView::build(&table, &[], &BoardConfig::default()).unwrap();
        assert_eq!(view.column_types, vec![eta]);
    }

    #[test]
    fn test_json_round_trip() {
        let view = BoardView::build(&sample_table(), &[], &BoardConfig::default()).unwrap();
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"arrow-back\""));
        assert!(json.contains("\"blank\""));
        let back: BoardView = serde_json::from_str(&json).unwrap();
        assert_eq!(back, view);
    }
}
