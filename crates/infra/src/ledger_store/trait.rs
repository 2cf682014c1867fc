use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use hostelgate_access::{DayLedger, LedgerDate};

/// Ledger store operation error.
///
/// These are **infrastructure errors** (IO, corruption) as opposed to pairing
/// rejections, which never reach the store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("corrupt day ledger {date}: {reason}")]
    Corrupt { date: String, reason: String },

    #[error("serialization failed: {0}")]
    Serialize(String),

    #[error("store lock poisoned: {0}")]
    Lock(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(date: LedgerDate, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            date: date.file_stem(),
            reason: reason.into(),
        }
    }
}

/// Whole-day ledger persistence.
///
/// ## Load Semantics
///
/// `load_day()`:
/// - Returns an empty ledger if nothing is stored for the date (never an error)
/// - Does not create anything as a side effect
/// - Returns rows in their original append order
///
/// ## Save Semantics
///
/// `save_day()`:
/// - Replaces everything stored for the date with the given ledger
/// - Is all-or-nothing: after an `Err`, a later `load_day()` sees the previous
///   contents, never a partial write
///
/// ## Day Creation
///
/// `ensure_day()` creates the empty persisted unit for a date if it is
/// missing. Idempotent: repeated calls leave exactly one unit.
///
/// Callers serialise load→save per date themselves (see `DayLocks`); stores
/// are not required to detect lost updates.
pub trait LedgerStore: Send + Sync {
    fn load_day(&self, date: LedgerDate) -> Result<DayLedger, StoreError>;

    fn save_day(&self, date: LedgerDate, ledger: &DayLedger) -> Result<(), StoreError>;

    fn ensure_day(&self, date: LedgerDate) -> Result<(), StoreError>;
}

impl<S> LedgerStore for Arc<S>
where
    S: LedgerStore + ?Sized,
{
    fn load_day(&self, date: LedgerDate) -> Result<DayLedger, StoreError> {
        (**self).load_day(date)
    }

    fn save_day(&self, date: LedgerDate, ledger: &DayLedger) -> Result<(), StoreError> {
        (**self).save_day(date, ledger)
    }

    fn ensure_day(&self, date: LedgerDate) -> Result<(), StoreError> {
        (**self).ensure_day(date)
    }
}
