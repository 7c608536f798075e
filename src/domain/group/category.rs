//! Degree-programme category shared by a group and its sessions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    #[default]
    CsBscMeng,
    RoboticsAiMeng,
    CsMathsMeng,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::CsBscMeng => "CS_BSC_MENG",
            Category::RoboticsAiMeng => "ROBOTICS_AI_MENG",
            Category::CsMathsMeng => "CS_MATHS_MENG",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CS_BSC_MENG" => Ok(Category::CsBscMeng),
            "ROBOTICS_AI_MENG" => Ok(Category::RoboticsAiMeng),
            "CS_MATHS_MENG" => Ok(Category::CsMathsMeng),
            other => Err(ValidationError::invalid_format(
                "category",
                format!("unknown category '{}'", other),
            )),
        }
    }
}
