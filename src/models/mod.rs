//! Board domain models.
//!
//! Places (buildings, rooms, chambers), staff, the daily [`Table`] and its
//! [`Line`]s. Line kinds are a closed tagged variant ([`LineKind`]) resolved
//! by explicit dispatch.
//!
//! # Board rows
//!
//! | Line kind | On the board |
//! |-----------|--------------|
//! | Room | Row above the separator, may link to another row |
//! | Chamber | Row below the separator |
//! | Vacation | Listed apart, never a row |

pub mod column;
mod employee;
mod line;
mod place;
mod table;

pub use column::{ColumnType, ColumnValue, FieldSpec};
pub use employee::{Employee, EmployeeRole};
pub use line::{ChamberLine, Line, LineKind, RoomLine, VacationLine};
pub use place::{Building, Chamber, Department, Room, DEFAULT_BUILDING_COLOR};
pub use table::Table;
