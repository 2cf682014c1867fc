//! Integration tests for the full recording pipeline.
//!
//! Tests: (PersonRecord, Action) → AccessLedger → DayLocks → LedgerStore
//!
//! Verifies:
//! - Concurrent recorders on one day lose no updates
//! - Residents never touch each other's rows
//! - The file-backed store behaves like the in-memory one

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use chrono::{NaiveDate, NaiveDateTime};
    use tempfile::tempdir;

    use hostelgate_access::{Action, PairingRule};
    use hostelgate_core::RollNo;
    use hostelgate_roster::{FaceEncoding, PersonRecord, Roster, RosterEntry};

    use crate::access_ledger::AccessLedger;
    use crate::clock::ManualClock;
    use crate::identity::{IdentityResolver, NearestEncodingResolver};
    use crate::ledger_store::{FileLedgerStore, InMemoryLedgerStore, LedgerStore};

    fn morning() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn resident(n: usize) -> PersonRecord {
        PersonRecord::new(
            RollNo::new(format!("20210{n:02}")).unwrap(),
            format!("ERP{n:03}"),
            format!("Resident {n}"),
            "A101",
            "9876543210",
        )
    }

    fn hammer<S: LedgerStore + 'static>(ledger: Arc<AccessLedger<S, ManualClock>>, residents: usize) {
        let handles: Vec<_> = (0..residents)
            .map(|n| {
                let ledger = ledger.clone();
                thread::spawn(move || {
                    let p = resident(n);
                    for action in [Action::Exit, Action::Entry, Action::Exit, Action::Entry] {
                        let outcome = ledger.record_action(&p, action).unwrap();
                        assert!(outcome.is_recorded(), "{action} for {} rejected", p.roll_no);
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
    }

    #[test]
    fn concurrent_residents_on_one_day_lose_no_updates() {
        let store = Arc::new(InMemoryLedgerStore::new());
        let ledger = Arc::new(AccessLedger::with_clock(store.clone(), ManualClock::new(morning())));

        hammer(ledger.clone(), 16);

        let day = ledger.load_today().unwrap();
        assert_eq!(day.len(), 32);
        for n in 0..16 {
            let p = resident(n);
            let rows: Vec<_> = day.events_for(&p.roll_no).collect();
            assert_eq!(rows.len(), 2);
            assert!(rows.iter().all(|(_, e)| e.is_complete()));
            assert!(rows.iter().all(|(_, e)| e.erp == p.erp));
        }
    }

    #[test]
    fn concurrent_residents_with_file_store() {
        let dir = tempdir().unwrap();
        let store = FileLedgerStore::open(dir.path()).unwrap();
        let ledger = Arc::new(AccessLedger::with_clock(store, ManualClock::new(morning())));

        hammer(ledger.clone(), 8);

        let reopened = FileLedgerStore::open(dir.path()).unwrap();
        let day = reopened.load_day(ledger.today()).unwrap();
        assert_eq!(day.len(), 16);
        assert!(day.events().iter().all(|e| e.is_complete()));
    }

    #[test]
    fn one_residents_actions_do_not_change_anothers_rows() {
        let store = Arc::new(InMemoryLedgerStore::new());
        let ledger = AccessLedger::with_clock(store, ManualClock::new(morning()));
        let a = resident(1);
        let b = resident(2);

        ledger.record_action(&a, Action::Exit).unwrap();
        let b_before: Vec<_> = ledger.load_today().unwrap().events_for(&b.roll_no).map(|(_, e)| e.clone()).collect();
        assert!(b_before.is_empty());

        ledger.record_action(&b, Action::Exit).unwrap();
        let a_rows_before: Vec<_> = ledger.load_today().unwrap().events_for(&a.roll_no).map(|(_, e)| e.clone()).collect();

        ledger.record_action(&b, Action::Entry).unwrap();
        ledger.record_action(&b, Action::Exit).unwrap();
        let a_rows_after: Vec<_> = ledger.load_today().unwrap().events_for(&a.roll_no).map(|(_, e)| e.clone()).collect();
        assert_eq!(a_rows_before, a_rows_after);

        let outcome = ledger.record_action(&a, Action::Exit).unwrap();
        assert_eq!(outcome.rejection().unwrap().rule, PairingRule::OpenExitNeedsEntry);
    }

    #[test]
    fn resolve_then_record() {
        let roster = Roster::from_entries(vec![RosterEntry {
            person: resident(1),
            encoding: Some(FaceEncoding::new(vec![0.2, 0.4, 0.6])),
        }])
        .unwrap();
        let resolver = NearestEncodingResolver::from_roster(&roster, 0.6);
        let ledger = AccessLedger::with_clock(InMemoryLedgerStore::new(), ManualClock::new(morning()));

        let unknown = resolver.resolve(&FaceEncoding::new(vec![9.0, 9.0, 9.0]));
        assert!(unknown.is_none());

        let person = resolver
            .resolve(&FaceEncoding::new(vec![0.25, 0.4, 0.6]))
            .unwrap();
        let outcome = ledger.record_action(&person, Action::Exit).unwrap();
        assert_eq!(outcome.recorded().unwrap().event.name, "Resident 1");
    }
}
