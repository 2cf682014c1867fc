use serde::{Deserialize, Serialize};

use hostelgate_core::{Aggregate, AggregateRoot, RollNo};
use hostelgate_roster::PersonRecord;

use crate::action::Action;
use crate::event::AccessEvent;
use crate::state::{PairingState, PolicyViolation};
use crate::time::{LedgerDate, TimeOfDay};

/// Command: record one gate action for a resolved resident at `time`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessCommand {
    pub person: PersonRecord,
    pub action: Action,
    pub time: TimeOfDay,
}

/// A single accepted mutation of a day ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerChange {
    /// Append a new row with the exit recorded.
    ExitOpened { event: AccessEvent },
    /// Complete an open row in place.
    EntryRecorded { row: usize, time: TimeOfDay },
    /// Fill the missing exit of an existing row in place.
    ExitFilled { row: usize, time: TimeOfDay },
}

/// Outcome of `DayLedger::record`: the applied change and the row it touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedChange {
    pub change: LedgerChange,
    pub row: usize,
}

/// Aggregate root: all access rows for one calendar date, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayLedger {
    date: LedgerDate,
    events: Vec<AccessEvent>,
    version: u64,
}

impl DayLedger {
    /// An empty ledger for a day nobody has used yet.
    pub fn empty(date: LedgerDate) -> Self {
        Self::from_events(date, Vec::new())
    }

    /// Rehydrate from stored rows (order must be the original append order).
    pub fn from_events(date: LedgerDate, events: Vec<AccessEvent>) -> Self {
        Self {
            date,
            events,
            version: 0,
        }
    }

    pub fn date(&self) -> LedgerDate {
        self.date
    }

    pub fn events(&self) -> &[AccessEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<AccessEvent> {
        self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Rows belonging to `roll_no`, with their ledger indices.
    pub fn events_for<'a>(
        &'a self,
        roll_no: &'a RollNo,
    ) -> impl Iterator<Item = (usize, &'a AccessEvent)> + 'a {
        self.events
            .iter()
            .enumerate()
            .filter(move |(_, e)| &e.roll_no == roll_no)
    }

    pub fn last_for(&self, roll_no: &RollNo) -> Option<(usize, &AccessEvent)> {
        self.events
            .iter()
            .enumerate()
            .rev()
            .find(|(_, e)| &e.roll_no == roll_no)
    }

    pub fn state_of(&self, roll_no: &RollNo) -> PairingState {
        PairingState::classify(self.last_for(roll_no))
    }

    /// Decide and apply in one step.
    pub fn record(&mut self, command: &AccessCommand) -> Result<RecordedChange, PolicyViolation> {
        let change = self.decide(command)?;
        self.apply(&change);
        let row = match &change {
            LedgerChange::ExitOpened { .. } => self.events.len() - 1,
            LedgerChange::EntryRecorded { row, .. } | LedgerChange::ExitFilled { row, .. } => *row,
        };
        Ok(RecordedChange { change, row })
    }

    fn decide(&self, cmd: &AccessCommand) -> Result<LedgerChange, PolicyViolation> {
        let state = self.state_of(&cmd.person.roll_no);
        if cmd.action != state.allowed_action() {
            return Err(PolicyViolation {
                roll_no: cmd.person.roll_no.clone(),
                state,
                attempted: cmd.action,
                rule: state.rule(),
            });
        }

        Ok(match state {
            PairingState::NoRecord | PairingState::Closed { .. } => LedgerChange::ExitOpened {
                event: AccessEvent::opened(&cmd.person, cmd.time),
            },
            PairingState::Open { row } => LedgerChange::EntryRecorded {
                row,
                time: cmd.time,
            },
            PairingState::Malformed { row } | PairingState::EntryOnly { row } => {
                LedgerChange::ExitFilled {
                    row,
                    time: cmd.time,
                }
            }
        })
    }
}

impl AggregateRoot for DayLedger {
    type Id = LedgerDate;

    fn id(&self) -> &Self::Id {
        &self.date
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for DayLedger {
    type Command = AccessCommand;
    type Event = LedgerChange;
    type Error = PolicyViolation;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            LedgerChange::ExitOpened { event } => self.events.push(event.clone()),
            LedgerChange::EntryRecorded { row, time } => {
                if let Some(e) = self.events.get_mut(*row) {
                    e.entry_time = Some(*time);
                }
            }
            LedgerChange::ExitFilled { row, time } => {
                if let Some(e) = self.events.get_mut(*row) {
                    e.exit_time = Some(*time);
                }
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        self.decide(command).map(|change| vec![change])
    }
}
