use core::str::FromStr;

use serde::{Deserialize, Serialize};

use hostelgate_core::DomainError;

/// Declared direction of movement through the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Exit,
    Entry,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Exit => "exit",
            Action::Entry => "entry",
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Action::Exit => f.write_str("Exit"),
            Action::Entry => f.write_str("Entry"),
        }
    }
}

impl FromStr for Action {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exit" => Ok(Action::Exit),
            "entry" => Ok(Action::Entry),
            other => Err(DomainError::validation(format!(
                "action must be one of: exit, entry (got '{other}')"
            ))),
        }
    }
}
