use serde::{Deserialize, Serialize};

use hostelgate_core::RollNo;
use hostelgate_roster::PersonRecord;

use crate::time::TimeOfDay;

/// One ledger row: a single exit→entry cycle for one resident on one day.
///
/// Person attributes are copied at creation so the row stays readable even if
/// the roster changes later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessEvent {
    pub roll_no: RollNo,
    pub erp: String,
    pub name: String,
    pub room_no: String,
    pub mobile_no: String,
    pub exit_time: Option<TimeOfDay>,
    pub entry_time: Option<TimeOfDay>,
}

impl AccessEvent {
    /// A fresh row for `person` with the exit recorded and the entry pending.
    pub fn opened(person: &PersonRecord, exit_time: TimeOfDay) -> Self {
        Self {
            exit_time: Some(exit_time),
            ..Self::blank(person)
        }
    }

    /// A row with neither time set.
    pub fn blank(person: &PersonRecord) -> Self {
        Self {
            roll_no: person.roll_no.clone(),
            erp: person.erp.clone(),
            name: person.name.clone(),
            room_no: person.room_no.clone(),
            mobile_no: person.mobile_no.clone(),
            exit_time: None,
            entry_time: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.exit_time.is_some() && self.entry_time.is_some()
    }
}
