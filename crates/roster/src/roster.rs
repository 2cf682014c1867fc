use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use hostelgate_core::{DomainError, DomainResult, RollNo};

use crate::encoding::FaceEncoding;
use crate::person::PersonRecord;

/// One roster line as kept on disk: the person plus an optional reference
/// encoding. Residents without an encoding are listed but cannot be resolved
/// by face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(flatten)]
    pub person: PersonRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<FaceEncoding>,
}

/// Immutable snapshot of known residents.
///
/// Built once at startup and shared behind an `Arc`. Reloading means building
/// a new snapshot and swapping it in explicitly.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
    by_roll: HashMap<RollNo, usize>,
}

impl Roster {
    /// Build a snapshot, rejecting duplicate roll numbers.
    pub fn from_entries(entries: Vec<RosterEntry>) -> DomainResult<Self> {
        let mut by_roll = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            if by_roll.insert(entry.person.roll_no.clone(), idx).is_some() {
                return Err(DomainError::conflict(format!(
                    "duplicate roll number {} in roster",
                    entry.person.roll_no
                )));
            }
        }
        Ok(Self { entries, by_roll })
    }

    /// The three-resident roster written when no roster file exists yet.
    pub fn sample_entries() -> Vec<RosterEntry> {
        let rows = [
            ("2021001", "ERP001", "John Doe", "A101", "9876543210"),
            ("2021002", "ERP002", "Jane Smith", "A102", "9876543211"),
            ("2021003", "ERP003", "Mike Johnson", "B101", "9876543212"),
        ];
        rows.iter()
            .filter_map(|(roll, erp, name, room, mobile)| {
                let roll_no = RollNo::new(roll).ok()?;
                Some(RosterEntry {
                    person: PersonRecord::new(roll_no, *erp, *name, *room, *mobile),
                    encoding: None,
                })
            })
            .collect()
    }

    pub fn get(&self, roll_no: &RollNo) -> Option<&PersonRecord> {
        self.by_roll.get(roll_no).map(|&idx| &self.entries[idx].person)
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Residents that carry a reference encoding, in roster order.
    pub fn gallery(&self) -> impl Iterator<Item = (&PersonRecord, &FaceEncoding)> {
        self.entries
            .iter()
            .filter_map(|e| e.encoding.as_ref().map(|enc| (&e.person, enc)))
    }
}
