use serde::{Deserialize, Serialize};

use hostelgate_core::{RollNo, ValueObject};

/// A resolved resident, as handed to the access ledger.
///
/// Only `roll_no` takes part in ledger logic; the other attributes are copied
/// into ledger rows for display and reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub roll_no: RollNo,
    pub erp: String,
    pub name: String,
    pub room_no: String,
    pub mobile_no: String,
}

impl ValueObject for PersonRecord {}

impl PersonRecord {
    pub fn new(
        roll_no: RollNo,
        erp: impl Into<String>,
        name: impl Into<String>,
        room_no: impl Into<String>,
        mobile_no: impl Into<String>,
    ) -> Self {
        Self {
            roll_no,
            erp: erp.into(),
            name: name.into(),
            room_no: room_no.into(),
            mobile_no: mobile_no.into(),
        }
    }
}
