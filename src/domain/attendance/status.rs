//! Attendance status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Attendance status. Any status may be overwritten by any other; there is
/// no transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    #[default]
    Registered,
    #[serde(alias = "ATTENDED")]
    Present,
    Absent,
    Cancelled,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Registered => "REGISTERED",
            AttendanceStatus::Present => "PRESENT",
            AttendanceStatus::Absent => "ABSENT",
            AttendanceStatus::Cancelled => "CANCELLED",
        }
    }

    /// Whether the attendee still expects to go (shown in calendar feeds).
    pub fn is_active(&self) -> bool {
        !matches!(self, AttendanceStatus::Cancelled)
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REGISTERED" => Ok(AttendanceStatus::Registered),
            "PRESENT" | "ATTENDED" => Ok(AttendanceStatus::Present),
            "ABSENT" => Ok(AttendanceStatus::Absent),
            "CANCELLED" => Ok(AttendanceStatus::Cancelled),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown attendance status '{}'", other),
            )),
        }
    }
}
