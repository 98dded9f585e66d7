//! Row sequencing and link resolution.
//!
//! The board is one flat list of rows:
//!
//! 1. room lines, by building name, then floor from the top down, then room
//!    number;
//! 2. exactly one blank separator;
//! 3. chamber lines, by the name of their first chamber.
//!
//! Links are resolved against this list into row index pairs. The blank
//! separator is a valid link target under [`BLANK_ROW_ID`].

use std::cmp::Ordering;
use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use super::lanes::NormalizedLink;
use crate::error::BoardError;
use crate::models::{Line, Table};

/// Identity of the blank separator row.
pub const BLANK_ROW_ID: &str = "__blank__";

/// Kind of a board row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowKind {
    /// Operating room line.
    Room,
    /// The separator between rooms and chambers.
    Blank,
    /// Ward chamber line.
    Chamber,
}

/// A link resolved to row indices, before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLink<'a> {
    /// Id of the linking line.
    pub line: &'a str,
    /// Row index of the linking line.
    pub source: usize,
    /// Row index of the link target.
    pub target: usize,
}

/// Ordered board rows of one table.
#[derive(Debug, Clone)]
pub struct RowSequence<'a> {
    room_lines: Vec<&'a Line>,
    chamber_lines: Vec<&'a Line>,
}

impl<'a> RowSequence<'a> {
    /// Sequences the room and chamber lines of a table.
    ///
    /// Vacation lines are not rows and are skipped.
    pub fn from_table(table: &'a Table) -> Self {
        Self::from_lines(
            table.lines.iter().filter(|l| l.as_room().is_some()).collect(),
            table.lines.iter().filter(|l| l.as_chamber().is_some()).collect(),
        )
    }

    /// Sequences the given lines. Sorting is stable.
    pub fn from_lines(mut room_lines: Vec<&'a Line>, mut chamber_lines: Vec<&'a Line>) -> Self {
        room_lines.sort_by(|a, b| compare_rooms(a, b));
        chamber_lines.sort_by(|a, b| chamber_key(a).cmp(chamber_key(b)));
        Self {
            room_lines,
            chamber_lines,
        }
    }

    /// Number of rows, blank separator included.
    pub fn len(&self) -> usize {
        self.room_lines.len() + 1 + self.chamber_lines.len()
    }

    /// Always `false`: the blank separator is always present.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Index of the blank separator.
    pub fn blank_index(&self) -> usize {
        self.room_lines.len()
    }

    /// Room lines in row order.
    pub fn room_lines(&self) -> &[&'a Line] {
        &self.room_lines
    }

    /// Chamber lines in row order.
    pub fn chamber_lines(&self) -> &[&'a Line] {
        &self.chamber_lines
    }

    /// Kind of the row at `index`.
    pub fn kind_at(&self, index: usize) -> Option<RowKind> {
        let blank = self.blank_index();
        match index.cmp(&blank) {
            Ordering::Less => Some(RowKind::Room),
            Ordering::Equal => Some(RowKind::Blank),
            Ordering::Greater if index < self.len() => Some(RowKind::Chamber),
            Ordering::Greater => None,
        }
    }

    /// Line shown at `index`; `None` for the blank separator or out of range.
    pub fn line_at(&self, index: usize) -> Option<&'a Line> {
        let blank = self.blank_index();
        match index.cmp(&blank) {
            Ordering::Less => Some(self.room_lines[index]),
            Ordering::Equal => None,
            Ordering::Greater => self.chamber_lines.get(index - blank - 1).copied(),
        }
    }

    /// Row index of every addressable identity. The first line wins on
    /// duplicate ids.
    fn index_map(&self) -> HashMap<&'a str, usize> {
        let mut map = HashMap::with_capacity(self.len());
        for (i, &line) in self.room_lines.iter().enumerate() {
            map.entry(line.id.as_str()).or_insert(i);
        }
        map.entry(BLANK_ROW_ID).or_insert(self.blank_index());
        let offset = self.blank_index() + 1;
        for (j, &line) in self.chamber_lines.iter().enumerate() {
            map.entry(line.id.as_str()).or_insert(offset + j);
        }
        map
    }

    /// Row index of the line (or blank separator) with the given id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_map().get(id).copied()
    }

    /// Resolves every room line's link into row indices.
    ///
    /// Links are returned in room row order.
    ///
    /// # Errors
    /// - [`BoardError::SelfLink`] if a line links to itself.
    /// - [`BoardError::UnknownLinkTarget`] if a target is not a row of this
    ///   board.
    pub fn resolve_links(&self) -> Result<Vec<RawLink<'a>>, BoardError> {
        let index = self.index_map();
        let mut links = Vec::new();

        for (source, &line) in self.room_lines.iter().enumerate() {
            let Some(target_id) = line.link() else {
                continue;
            };
            if target_id == line.id {
                return Err(BoardError::SelfLink {
                    line: line.id.clone(),
                });
            }
            let target = *index
                .get(target_id)
                .ok_or_else(|| BoardError::UnknownLinkTarget {
                    source_line: line.id.clone(),
                    target: target_id.to_string(),
                })?;
            links.push(RawLink {
                line: line.id.as_str(),
                source,
                target,
            });
        }

        debug!(
            rooms = self.room_lines.len(),
            chambers = self.chamber_lines.len(),
            links = links.len();
            "Sequenced board rows"
        );
        Ok(links)
    }
}

/// Normalizes raw links and sorts them by ascending `from` (stable).
///
/// # Errors
/// [`BoardError::SelfLink`] if a link resolves to its own row.
pub fn normalize_links(raw: &[RawLink<'_>]) -> Result<Vec<NormalizedLink>, BoardError> {
    let mut links = raw
        .iter()
        .map(|r| {
            NormalizedLink::from_raw(r.source, r.target).ok_or_else(|| BoardError::SelfLink {
                line: r.line.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    links.sort_by_key(|l| l.from());
    Ok(links)
}

fn compare_rooms(a: &Line, b: &Line) -> Ordering {
    let key = |line: &Line| {
        line.as_room()
            .and_then(|r| r.room.as_ref())
            .map(|room| (room.building_name().to_string(), room.floor, room.number.clone()))
            .unwrap_or_default()
    };
    let (a_building, a_floor, a_number) = key(a);
    let (b_building, b_floor, b_number) = key(b);

    a_building
        .cmp(&b_building)
        .then(b_floor.cmp(&a_floor))
        .then(a_number.cmp(&b_number))
}

fn chamber_key<'l>(line: &'l Line) -> &'l str {
    line.as_chamber().map(|c| c.first_name()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Chamber, Room};
    use chrono::NaiveDate;

    fn room_line(id: &str, building: &str, floor: i32, number: &str) -> Line {
        Line::room(id, Room::new(0, floor, number).in_building(building))
    }

    fn chamber_line(id: &str, names: &[&str]) -> Line {
        let chambers = names
            .iter()
            .enumerate()
            .map(|(i, n)| Chamber::new(i as u32, *n))
            .collect();
        Line::chamber(id, chambers)
    }

    fn table(lines: Vec<Line>) -> Table {
        let mut t = Table::new(1, NaiveDate::from_ymd_opt(2018, 2, 22).unwrap());
        t.lines = lines;
        t
    }

    fn ids(lines: &[&Line]) -> Vec<String> {
        lines.iter().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn test_room_order() {
        let t = table(vec![
            room_line("b-low", "B", 1, "1"),
            room_line("a-low-2", "A", 1, "2"),
            room_line("a-high", "A", 3, "9"),
            room_line("a-low-1", "A", 1, "1"),
        ]);
        let seq = RowSequence::from_table(&t);
        assert_eq!(
            ids(seq.room_lines()),
            vec!["a-high", "a-low-1", "a-low-2", "b-low"]
        );
    }

    #[test]
    fn test_room_number_is_compared_as_text() {
        let t = table(vec![
            room_line("n10", "A", 1, "10"),
            room_line("n9", "A", 1, "9"),
        ]);
        let seq = RowSequence::from_table(&t);
        assert_eq!(ids(seq.room_lines()), vec!["n10", "n9"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let t = table(vec![
            room_line("first", "A", 1, "1"),
            room_line("second", "A", 1, "1"),
            chamber_line("c-first", &["Ward"]),
            chamber_line("c-second", &["Ward"]),
        ]);
        let seq = RowSequence::from_table(&t);
        assert_eq!(ids(seq.room_lines()), vec!["first", "second"]);
        assert_eq!(ids(seq.chamber_lines()), vec!["c-first", "c-second"]);
    }

    #[test]
    fn test_missing_room_sorts_first() {
        let mut orphan = room_line("orphan", "A", 1, "1");
        orphan.as_room_mut().unwrap().room = None;
        let t = table(vec![room_line("a", "A", 1, "1"), orphan]);
        let seq = RowSequence::from_table(&t);
        assert_eq!(ids(seq.room_lines()), vec!["orphan", "a"]);
    }

    #[test]
    fn test_chamber_order_by_first_name() {
        let t = table(vec![
            chamber_line("c", &["Ward 3", "Ward 1"]),
            chamber_line("a", &["Ward 1"]),
            chamber_line("empty", &[]),
        ]);
        let seq = RowSequence::from_table(&t);
        assert_eq!(ids(seq.chamber_lines()), vec!["empty", "c", "a"]);
    }

    #[test]
    fn test_link_into_multi_chamber_line() {
        let t = table(vec![
            room_line("r1", "A", 1, "1").with_link("c_multi"),
            chamber_line("c_b", &["B"]),
            chamber_line("c_multi", &["C", "A"]),
        ]);
        let seq = RowSequence::from_table(&t);
        assert_eq!(ids(seq.chamber_lines()), vec!["c_multi", "c_b"]);

        let raw = seq.resolve_links().unwrap();
        assert_eq!((raw[0].source, raw[0].target), (0, 2));
    }

    #[test]
    fn test_layout_of_rows() {
        let t = table(vec![
            chamber_line("c1", &["Ward"]),
            room_line("r1", "A", 1, "1"),
            Line::vacation("v1", crate::models::Employee::doctor(1, "D")),
            room_line("r2", "A", 1, "2"),
        ]);
        let seq = RowSequence::from_table(&t);
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.blank_index(), 2);
        assert_eq!(seq.kind_at(0), Some(RowKind::Room));
        assert_eq!(seq.kind_at(2), Some(RowKind::Blank));
        assert_eq!(seq.kind_at(3), Some(RowKind::Chamber));
        assert_eq!(seq.kind_at(4), None);
        assert_eq!(seq.line_at(1).map(|l| l.id.as_str()), Some("r2"));
        assert!(seq.line_at(2).is_none());
        assert_eq!(seq.line_at(3).map(|l| l.id.as_str()), Some("c1"));
        assert!(seq.line_at(4).is_none());
        assert_eq!(seq.index_of("c1"), Some(3));
        assert_eq!(seq.index_of(BLANK_ROW_ID), Some(2));
        assert_eq!(seq.index_of("v1"), None);
    }

    #[test]
    fn test_empty_table_has_only_blank_row() {
        let t = table(vec![]);
        let seq = RowSequence::from_table(&t);
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.kind_at(0), Some(RowKind::Blank));
        assert!(seq.resolve_links().unwrap().is_empty());
    }

    #[test]
    fn test_resolve_links() {
        let t = table(vec![
            room_line("r2", "A", 1, "2").with_link("r1"),
            room_line("r1", "A", 1, "1").with_link("c1"),
            room_line("r3", "A", 1, "3").with_link(BLANK_ROW_ID),
            chamber_line("c1", &["Ward"]),
        ]);
        let seq = RowSequence::from_table(&t);
        let raw = seq.resolve_links().unwrap();
        let pairs: Vec<(usize, usize)> = raw.iter().map(|r| (r.source, r.target)).collect();
        // rows: r1=0, r2=1, r3=2, blank=3, c1=4
        assert_eq!(pairs, vec![(0, 4), (1, 0), (2, 3)]);
        assert_eq!(raw[1].line, "r2");
    }

    #[test]
    fn test_resolve_unknown_target() {
        let t = table(vec![room_line("r1", "A", 1, "1").with_link("elsewhere")]);
        let err = RowSequence::from_table(&t).resolve_links().unwrap_err();
        assert!(matches!(
            err,
            BoardError::UnknownLinkTarget { ref source_line, ref target }
                if source_line == "r1" && target == "elsewhere"
        ));
    }

    #[test]
    fn test_resolve_self_link() {
        let t = table(vec![room_line("r1", "A", 1, "1").with_link("r1")]);
        let err = RowSequence::from_table(&t).resolve_links().unwrap_err();
        assert!(matches!(err, BoardError::SelfLink { ref line } if line == "r1"));
    }

    #[test]
    fn test_normalize_links() {
        let raw = [
            RawLink { line: "a", source: 3, target: 1 },
            RawLink { line: "b", source: 0, target: 4 },
            RawLink { line: "c", source: 1, target: 2 },
        ];
        let links = normalize_links(&raw).unwrap();
        assert_eq!(
            links,
            vec![
                NormalizedLink::new(0, 4, false),
                NormalizedLink::new(1, 3, true),
                NormalizedLink::new(1, 2, false),
            ]
        );
    }

    #[test]
    fn test_normalize_rejects_self_link() {
        let raw = [RawLink { line: "x", source: 2, target: 2 }];
        assert!(matches!(
            normalize_links(&raw),
            Err(BoardError::SelfLink { .. })
        ));
    }
}
