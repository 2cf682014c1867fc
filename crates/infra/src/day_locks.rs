//! Per-date mutual exclusion for whole-day read-modify-write.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use hostelgate_access::LedgerDate;

/// Registry of one mutex per calendar date.
///
/// Everyone recording on the same date shares one lock, whichever resident
/// they are; different dates never contend. Locks for other dates are dropped
/// once nobody holds them.
#[derive(Debug, Default)]
pub struct DayLocks {
    inner: Mutex<HashMap<LedgerDate, Arc<Mutex<()>>>>,
}

impl DayLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock for `date`; callers hold its guard for the whole
    /// critical section.
    pub fn for_date(&self, date: LedgerDate) -> Result<Arc<Mutex<()>>, String> {
        let mut map = self
            .inner
            .lock()
            .map_err(|_| "day lock registry poisoned".to_string())?;

        map.retain(|d, lock| *d == date || Arc::strong_count(lock) > 1);
        Ok(map.entry(date).or_default().clone())
    }

    /// Number of dates currently tracked.
    pub fn len(&self) -> usize {
        self.inner.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
