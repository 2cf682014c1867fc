//! Per-person pairing state and the rejections it produces.

use serde::Serialize;
use thiserror::Error;

use hostelgate_core::RollNo;

use crate::action::Action;
use crate::event::AccessEvent;

/// Where a resident stands today, derived from their last row only.
///
/// `row` is the index of that last row within the day ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PairingState {
    /// No row for this resident today.
    NoRecord,
    /// Exit recorded, entry pending.
    Open { row: usize },
    /// Both times recorded.
    Closed { row: usize },
    /// Neither time recorded. Only reachable through hand-edited data.
    Malformed { row: usize },
    /// Entry recorded without an exit. Only reachable through hand-edited data.
    EntryOnly { row: usize },
}

impl PairingState {
    /// Classify the last row of a resident (`None` when they have no rows).
    pub fn classify(last: Option<(usize, &AccessEvent)>) -> Self {
        let Some((row, event)) = last else {
            return PairingState::NoRecord;
        };
        match (event.exit_time.is_some(), event.entry_time.is_some()) {
            (true, false) => PairingState::Open { row },
            (true, true) => PairingState::Closed { row },
            (false, false) => PairingState::Malformed { row },
            (false, true) => PairingState::EntryOnly { row },
        }
    }

    /// The single action this state accepts.
    pub fn allowed_action(&self) -> Action {
        match self {
            PairingState::Open { .. } => Action::Entry,
            PairingState::NoRecord
            | PairingState::Closed { .. }
            | PairingState::Malformed { .. }
            | PairingState::EntryOnly { .. } => Action::Exit,
        }
    }

    /// The rule broken by attempting anything other than `allowed_action`.
    pub fn rule(&self) -> PairingRule {
        match self {
            PairingState::NoRecord => PairingRule::FirstActionMustBeExit,
            PairingState::Open { .. } => PairingRule::OpenExitNeedsEntry,
            PairingState::Closed { .. } => PairingRule::MustRecordExitNext,
            PairingState::Malformed { .. } => PairingRule::MalformedNeedsExit,
            PairingState::EntryOnly { .. } => PairingRule::EntryOnlyNeedsExit,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PairingState::NoRecord => "no_record",
            PairingState::Open { .. } => "open",
            PairingState::Closed { .. } => "closed",
            PairingState::Malformed { .. } => "malformed",
            PairingState::EntryOnly { .. } => "entry_only",
        }
    }
}

/// Pairing rule names; `Display` is the user-facing reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingRule {
    #[error("first action today must be Exit")]
    FirstActionMustBeExit,

    #[error("must complete the open Exit with an Entry before a new Exit")]
    OpenExitNeedsEntry,

    #[error("must record Exit next")]
    MustRecordExitNext,

    #[error("invalid state: record Exit first")]
    MalformedNeedsExit,

    #[error("cannot record Entry now: record Exit first")]
    EntryOnlyNeedsExit,
}

/// A requested action that the pairing discipline does not allow.
///
/// Expected and user-correctable; the ledger is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{attempted} rejected for {roll_no}: {rule}")]
pub struct PolicyViolation {
    pub roll_no: RollNo,
    pub state: PairingState,
    pub attempted: Action,
    pub rule: PairingRule,
}

impl PolicyViolation {
    /// Human-readable reason only (no roll number or action prefix).
    pub fn reason(&self) -> String {
        self.rule.to_string()
    }
}
