//! Place models: buildings, departments, operating rooms and ward chambers.
//!
//! Rooms and chambers are the two kinds of places a board row can stand for.
//! Rooms are ordered physically (building, floor from the top down, number);
//! chambers are ordered by name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Roman numerals used to print floors 1 through 15.
const ROMAN_FLOORS: [&str; 16] = [
    "0", "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII", "XIII", "XIV",
    "XV",
];

/// Default row colour for buildings.
pub const DEFAULT_BUILDING_COLOR: &str = "#ffffff";

/// A hospital building.
///
/// The odd/even colours stripe the rows of rooms located in this building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    /// Unique building identifier.
    pub id: u32,
    /// Short building name (sort key).
    pub name: String,
    /// Colour of odd rows (`#rrggbb`).
    #[serde(default = "default_color")]
    pub odd_color: String,
    /// Colour of even rows (`#rrggbb`).
    #[serde(default = "default_color")]
    pub even_color: String,
}

fn default_color() -> String {
    DEFAULT_BUILDING_COLOR.to_string()
}

/// A hospital department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Unique department identifier.
    pub id: u32,
    /// Department name.
    pub name: String,
}

/// An operating room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: u32,
    /// Name of the building the room is in, if known.
    pub building: Option<String>,
    /// Floor number. Higher floors are listed first on the board.
    pub floor: i32,
    /// Room number. Not necessarily numeric ("3a", "ICU").
    #[serde(default)]
    pub number: String,
    /// Department the room is permanently assigned to.
    pub department: Option<Department>,
    /// When set, departments are chosen per line and `department` is ignored.
    #[serde(default)]
    pub free_dept: bool,
    /// Whether the room is offered for new lines.
    #[serde(default = "enabled")]
    pub enable: bool,
    /// Whether auto-created tables get a line for this room.
    #[serde(default)]
    pub template: bool,
}

/// A ward chamber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chamber {
    /// Unique chamber identifier.
    pub id: u32,
    /// Chamber name (sort key).
    pub name: String,
    /// Whether the chamber is offered for new lines.
    #[serde(default = "enabled")]
    pub enable: bool,
    /// Whether auto-created tables get a line for this chamber.
    #[serde(default)]
    pub template: bool,
}

fn enabled() -> bool {
    true
}

impl Building {
    /// Creates a building with white row colours.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            odd_color: default_color(),
            even_color: default_color(),
        }
    }

    /// Sets the odd/even row colours.
    pub fn with_colors(mut self, odd: impl Into<String>, even: impl Into<String>) -> Self {
        self.odd_color = odd.into();
        self.even_color = even.into();
        self
    }
}

impl Department {
    /// Creates a new department.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Room {
    /// Creates an enabled room without building or department.
    pub fn new(id: u32, floor: i32, number: impl Into<String>) -> Self {
        Self {
            id,
            building: None,
            floor,
            number: number.into(),
            department: None,
            free_dept: false,
            enable: true,
            template: false,
        }
    }

    /// Sets the building name.
    pub fn in_building(mut self, building: impl Into<String>) -> Self {
        self.building = Some(building.into());
        self
    }

    /// Assigns a fixed department.
    pub fn with_department(mut self, department: Department) -> Self {
        self.department = Some(department);
        self
    }

    /// Lets each line choose its own departments.
    pub fn with_free_dept(mut self) -> Self {
        self.free_dept = true;
        self
    }

    /// Marks the room as a template for auto-created tables.
    pub fn as_template(mut self) -> Self {
        self.template = true;
        self
    }

    /// Sets the enable flag.
    pub fn with_enable(mut self, enable: bool) -> Self {
        self.enable = enable;
        self
    }

    /// Floor as a Roman numeral (1..=15), or the plain number otherwise.
    pub fn floor_roman(&self) -> String {
        match usize::try_from(self.floor) {
            Ok(floor) if floor > 0 && floor < ROMAN_FLOORS.len() => ROMAN_FLOORS[floor].to_string(),
            _ => self.floor.to_string(),
        }
    }

    /// Room number with a `№` prefix for purely numeric numbers.
    ///
    /// Any Unicode numeric character counts as a digit.
    pub fn number_label(&self) -> String {
        let numeric = !self.number.is_empty() && self.number.chars().all(char::is_numeric);
        if numeric {
            format!("№{}", self.number)
        } else {
            self.number.clone()
        }
    }

    /// Building name or an empty string.
    pub fn building_name(&self) -> &str {
        self.building.as_deref().unwrap_or("")
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let department = match (&self.department, self.free_dept) {
            (Some(dept), false) => dept.name.as_str(),
            _ => "",
        };
        write!(
            f,
            "{}:{} {} {}",
            self.building_name(),
            self.floor_roman(),
            self.number_label(),
            department
        )
    }
}

impl Chamber {
    /// Creates an enabled chamber.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            enable: true,
            template: false,
        }
    }

    /// Marks the chamber as a template for auto-created tables.
    pub fn as_template(mut self) -> Self {
        self.template = true;
        self
    }

    /// Sets the enable flag.
    pub fn with_enable(mut self, enable: bool) -> Self {
        self.enable = enable;
        self
    }
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
