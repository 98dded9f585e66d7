//! Operating room and ward assignment board.
//!
//! Keeps the daily table of who (anesthesiologist, resident, nurse) works in
//! which operating room or ward chamber, and lays it out for rendering with
//! link arrows between related rows.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Table`, `Line` (room / chamber / vacation),
//!   `Room`, `Chamber`, `Building`, `Employee`, extra `ColumnType`s
//! - **`validation`**: Table integrity checks (duplicate IDs, broken links)
//! - **`board`**: Row sequencing, link lane allocation, `BoardView`
//! - **`config`**: TOML configuration shared with the renderer
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use u_board::board::BoardView;
//! use u_board::config::BoardConfig;
//! use u_board::models::{Chamber, Line, Room, Table};
//!
//! let table = Table::new(1, NaiveDate::from_ymd_opt(2018, 2, 22).unwrap())
//!     .with_line(Line::room("r1", Room::new(1, 2, "1")).with_link("c1"))
//!     .with_line(Line::chamber("c1", vec![Chamber::new(1, "Ward 1")]));
//!
//! let view = BoardView::build(&table, &[], &BoardConfig::default()).unwrap();
//! assert_eq!(view.rows.len(), 3);
//! assert_eq!(view.comment_indent, 16);
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod models;
pub mod validation;

pub use error::BoardError;
