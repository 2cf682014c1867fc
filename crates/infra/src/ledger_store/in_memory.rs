use std::collections::HashMap;
use std::sync::RwLock;

use hostelgate_access::{AccessEvent, DayLedger, LedgerDate};

use super::r#trait::{LedgerStore, StoreError};

/// In-memory day ledger store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    days: RwLock<HashMap<LedgerDate, Vec<AccessEvent>>>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of days that have a stored unit (created or saved).
    pub fn day_count(&self) -> usize {
        self.days.read().map(|d| d.len()).unwrap_or(0)
    }

    /// Seed a day directly, bypassing the pairing rules (fixtures for
    /// hand-edited or legacy data).
    pub fn insert_day(&self, date: LedgerDate, events: Vec<AccessEvent>) -> Result<(), StoreError> {
        let mut days = self
            .days
            .write()
            .map_err(|_| StoreError::Lock("in-memory ledger store".to_string()))?;
        days.insert(date, events);
        Ok(())
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn load_day(&self, date: LedgerDate) -> Result<DayLedger, StoreError> {
        let days = self
            .days
            .read()
            .map_err(|_| StoreError::Lock("in-memory ledger store".to_string()))?;

        Ok(DayLedger::from_events(
            date,
            days.get(&date).cloned().unwrap_or_default(),
        ))
    }

    fn save_day(&self, date: LedgerDate, ledger: &DayLedger) -> Result<(), StoreError> {
        self.insert_day(date, ledger.events().to_vec())
    }

    fn ensure_day(&self, date: LedgerDate) -> Result<(), StoreError> {
        let mut days = self
            .days
            .write()
            .map_err(|_| StoreError::Lock("in-memory ledger store".to_string()))?;
        days.entry(date).or_default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> LedgerDate {
        LedgerDate::from_ymd(2024, 3, 7).unwrap()
    }

    #[test]
    fn loading_an_unknown_day_is_empty_and_creates_nothing() {
        let store = InMemoryLedgerStore::new();
        let first = store.load_day(date()).unwrap();
        let second = store.load_day(date()).unwrap();
        assert!(first.is_empty());
        assert_eq!(first, second);
        assert_eq!(store.day_count(), 0);
    }

    #[test]
    fn ensure_day_is_idempotent() {
        let store = InMemoryLedgerStore::new();
        store.ensure_day(date()).unwrap();
        store.ensure_day(date()).unwrap();
        assert_eq!(store.day_count(), 1);
        assert!(store.load_day(date()).unwrap().is_empty());
    }
}
