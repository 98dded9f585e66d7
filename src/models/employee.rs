//! Staff model.
//!
//! Anesthesiologists, residents and nurses share one record type and differ
//! only by role.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A staff member who can be put on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique employee identifier.
    pub id: u32,
    /// Full name (sort key).
    pub name: String,
    /// Staff role.
    pub role: EmployeeRole,
    /// Whether the employee is offered for new lines.
    #[serde(default = "enabled")]
    pub enable: bool,
}

/// Staff role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmployeeRole {
    /// Anesthesiologist.
    Doctor,
    /// Resident physician.
    Resident,
    /// Nurse anesthetist.
    Nurse,
}

fn enabled() -> bool {
    true
}

impl Employee {
    /// Creates an enabled employee.
    pub fn new(id: u32, name: impl Into<String>, role: EmployeeRole) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            enable: true,
        }
    }

    /// Creates an anesthesiologist.
    pub fn doctor(id: u32, name: impl Into<String>) -> Self {
        Self::new(id, name, EmployeeRole::Doctor)
    }

    /// Creates a resident.
    pub fn resident(id: u32, name: impl Into<String>) -> Self {
        Self::new(id, name, EmployeeRole::Resident)
    }

    /// Creates a nurse.
    pub fn nurse(id: u32, name: impl Into<String>) -> Self {
        Self::new(id, name, EmployeeRole::Nurse)
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
