//! Gate action recording (application-level orchestration).
//!
//! ```text
//! (PersonRecord, Action)
//!   ↓
//! 1. Read the clock once: date selects the day, time is written
//!   ↓
//! 2. Take the day lock (held until the end)
//!   ↓
//! 3. Ensure the day exists, load it
//!   ↓
//! 4. Classify + decide (pure, DayLedger::record)
//!   ↓  rejected → return PolicyViolation, nothing written
//! 5. Save the whole day; report success only after the save returns Ok
//! ```

use thiserror::Error;

use hostelgate_access::{
    AccessCommand, AccessEvent, Action, DayLedger, LedgerDate, PolicyViolation, TimeOfDay,
};
use hostelgate_roster::PersonRecord;

use crate::clock::{Clock, SystemClock};
use crate::day_locks::DayLocks;
use crate::ledger_store::{LedgerStore, StoreError};

/// Infrastructure failure while recording. Pairing rejections are not errors.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger store failure: {0}")]
    Store(#[from] StoreError),

    #[error("lock failure: {0}")]
    Lock(String),

    #[error("ledger invariant violated: {0}")]
    Invariant(String),
}

/// A successfully recorded gate action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub action: Action,
    pub date: LedgerDate,
    pub time: TimeOfDay,
    /// Index of the affected row in the day ledger.
    pub row: usize,
    /// The affected row after the change.
    pub event: AccessEvent,
}

/// Outcome of `AccessLedger::record_action` when the infrastructure works.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Recorded(Recorded),
    Rejected(PolicyViolation),
}

impl RecordOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, RecordOutcome::Recorded(_))
    }

    pub fn recorded(&self) -> Option<&Recorded> {
        match self {
            RecordOutcome::Recorded(r) => Some(r),
            RecordOutcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&PolicyViolation> {
        match self {
            RecordOutcome::Recorded(_) => None,
            RecordOutcome::Rejected(v) => Some(v),
        }
    }
}

/// Owns read-modify-write access to day ledgers.
///
/// Generic over the store and the clock so tests run against
/// `InMemoryLedgerStore` + `ManualClock` and production against
/// `FileLedgerStore` + `SystemClock`.
#[derive(Debug)]
pub struct AccessLedger<S, C = SystemClock> {
    store: S,
    clock: C,
    locks: DayLocks,
}

impl<S> AccessLedger<S, SystemClock> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S, C> AccessLedger<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            locks: DayLocks::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<S, C> AccessLedger<S, C>
where
    S: LedgerStore,
    C: Clock,
{
    /// Record `action` for an already-identified resident.
    ///
    /// Returns `Ok(Rejected)` when the pairing rules forbid the action (no
    /// write happens) and `Err` only for store or lock failures. The day's
    /// change is durable once this returns `Ok(Recorded)`.
    pub fn record_action(
        &self,
        person: &PersonRecord,
        action: Action,
    ) -> Result<RecordOutcome, LedgerError> {
        let (date, time) = LedgerDate::split(self.clock.now());

        let day_lock = self.locks.for_date(date).map_err(LedgerError::Lock)?;
        let _guard = day_lock
            .lock()
            .map_err(|_| LedgerError::Lock(format!("day lock for {} poisoned", date.file_stem())))?;

        self.store.ensure_day(date)?;
        let mut ledger = self.store.load_day(date)?;

        let command = AccessCommand {
            person: person.clone(),
            action,
            time,
        };

        let recorded = match ledger.record(&command) {
            Ok(r) => r,
            Err(violation) => {
                tracing::info!(
                    roll_no = %person.roll_no,
                    action = action.as_str(),
                    state = violation.state.as_str(),
                    reason = %violation.rule,
                    "gate action rejected"
                );
                return Ok(RecordOutcome::Rejected(violation));
            }
        };

        if let Err(e) = self.store.save_day(date, &ledger) {
            tracing::error!(
                roll_no = %person.roll_no,
                action = action.as_str(),
                date = %date.file_stem(),
                "failed to persist day ledger: {e}"
            );
            return Err(e.into());
        }

        let event = ledger.events().get(recorded.row).cloned().ok_or_else(|| {
            LedgerError::Invariant(format!(
                "recorded row {} missing from ledger of {} rows",
                recorded.row,
                ledger.len()
            ))
        })?;

        tracing::info!(
            roll_no = %person.roll_no,
            action = action.as_str(),
            date = %date.file_stem(),
            time = %time,
            row = recorded.row,
            "gate action recorded"
        );

        Ok(RecordOutcome::Recorded(Recorded {
            action,
            date,
            time,
            row: recorded.row,
            event,
        }))
    }

    /// The date `record_action` would write to right now.
    pub fn today(&self) -> LedgerDate {
        LedgerDate::split(self.clock.now()).0
    }

    /// Today's rows as currently stored. Does not create the day.
    pub fn load_today(&self) -> Result<DayLedger, LedgerError> {
        Ok(self.store.load_day(self.today())?)
    }
}
