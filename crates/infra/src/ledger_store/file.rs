//! One JSON document per day, named `DD_MM_YYYY.json`.
//!
//! Rows keep the spreadsheet column names of the existing day files
//! (`rollno`, `erp`, `name`, `Exit Time`, `Entry Time`, `room no`,
//! `phone no`) so exported data stays recognisable. An absent time is written
//! as `""`; on load, `""`, whitespace, `null` and a missing column all mean
//! "not filled".

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use hostelgate_access::{AccessEvent, DayLedger, LedgerDate, TimeOfDay};
use hostelgate_core::RollNo;

use super::r#trait::{LedgerStore, StoreError};

const EMPTY_DAY: &[u8] = b"[]\n";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct LedgerRow {
    #[serde(rename = "rollno", deserialize_with = "text_or_blank")]
    roll_no: String,
    #[serde(default, deserialize_with = "text_or_blank")]
    erp: String,
    #[serde(default, deserialize_with = "text_or_blank")]
    name: String,
    #[serde(rename = "Exit Time", default, deserialize_with = "text_or_blank")]
    exit_time: String,
    #[serde(rename = "Entry Time", default, deserialize_with = "text_or_blank")]
    entry_time: String,
    #[serde(rename = "room no", default, deserialize_with = "text_or_blank")]
    room_no: String,
    #[serde(rename = "phone no", default, deserialize_with = "text_or_blank")]
    phone_no: String,
}

/// Accept strings, numbers (roll and phone numbers are often typed as
/// numbers by hand) and `null`.
fn text_or_blank<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected text, found {other}"
        ))),
    }
}

impl LedgerRow {
    fn from_event(event: &AccessEvent) -> Self {
        Self {
            roll_no: event.roll_no.to_string(),
            erp: event.erp.clone(),
            name: event.name.clone(),
            exit_time: event.exit_time.map(|t| t.to_string()).unwrap_or_default(),
            entry_time: event.entry_time.map(|t| t.to_string()).unwrap_or_default(),
            room_no: event.room_no.clone(),
            phone_no: event.mobile_no.clone(),
        }
    }

    fn into_event(self, date: LedgerDate, idx: usize) -> Result<AccessEvent, StoreError> {
        let corrupt = |e: hostelgate_core::DomainError| {
            StoreError::corrupt(date, format!("row {idx}: {e}"))
        };
        Ok(AccessEvent {
            roll_no: RollNo::new(&self.roll_no).map_err(corrupt)?,
            exit_time: TimeOfDay::parse_slot(Some(&self.exit_time)).map_err(corrupt)?,
            entry_time: TimeOfDay::parse_slot(Some(&self.entry_time)).map_err(corrupt)?,
            erp: self.erp,
            name: self.name,
            room_no: self.room_no,
            mobile_no: self.phone_no,
        })
    }
}

/// File-backed day ledger store rooted at one directory.
#[derive(Debug, Clone)]
pub struct FileLedgerStore {
    root: PathBuf,
}

impl FileLedgerStore {
    /// Open (and create if needed) the day-file directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| StoreError::io(&root, e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn day_path(&self, date: LedgerDate) -> PathBuf {
        self.root.join(format!("{}.json", date.file_stem()))
    }

    fn write_atomically(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        let tmp = path.with_extension("json.tmp");
        let result = (|| {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(bytes)?;
            file.sync_all()?;
            fs::rename(&tmp, path)
        })();

        if let Err(e) = result {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::io(path, e));
        }
        Ok(())
    }
}

impl LedgerStore for FileLedgerStore {
    fn load_day(&self, date: LedgerDate) -> Result<DayLedger, StoreError> {
        let path = self.day_path(date);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(DayLedger::empty(date)),
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        if text.trim().is_empty() {
            return Ok(DayLedger::empty(date));
        }

        let rows: Vec<LedgerRow> =
            serde_json::from_str(&text).map_err(|e| StoreError::corrupt(date, e.to_string()))?;

        let events = rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| row.into_event(date, idx))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DayLedger::from_events(date, events))
    }

    fn save_day(&self, date: LedgerDate, ledger: &DayLedger) -> Result<(), StoreError> {
        let rows: Vec<LedgerRow> = ledger.events().iter().map(LedgerRow::from_event).collect();
        let mut bytes =
            serde_json::to_vec_pretty(&rows).map_err(|e| StoreError::Serialize(e.to_string()))?;
        bytes.push(b'\n');
        self.write_atomically(&self.day_path(date), &bytes)
    }

    fn ensure_day(&self, date: LedgerDate) -> Result<(), StoreError> {
        let path = self.day_path(date);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(EMPTY_DAY)
                    .and_then(|_| file.sync_all())
                    .map_err(|e| StoreError::io(&path, e))?;
                tracing::debug!(path = %path.display(), "created day ledger file");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostelgate_roster::PersonRecord;
    use tempfile::tempdir;

    fn date() -> LedgerDate {
        LedgerDate::from_ymd(2024, 3, 7).unwrap()
    }

    fn person(roll: &str) -> PersonRecord {
        PersonRecord::new(RollNo::new(roll).unwrap(), "ERP001", "John Doe", "A101", "9876543210")
    }

    fn json_files(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn day_file_uses_dd_mm_yyyy_name() {
        let dir = tempdir().unwrap();
        let store = FileLedgerStore::open(dir.path()).unwrap();
        assert_eq!(store.day_path(date()), dir.path().join("07_03_2024.json"));
    }

    #[test]
    fn load_of_absent_day_writes_nothing() {
        let dir = tempdir().unwrap();
        let store = FileLedgerStore::open(dir.path()).unwrap();

        let first = store.load_day(date()).unwrap();
        let second = store.load_day(date()).unwrap();
        assert!(first.is_empty());
        assert_eq!(first, second);
        assert!(json_files(dir.path()).is_empty());
    }

    #[test]
    fn ensure_day_creates_exactly_one_file() {
        let dir = tempdir().unwrap();
        let store = FileLedgerStore::open(dir.path()).unwrap();

        store.ensure_day(date()).unwrap();
        store.ensure_day(date()).unwrap();
        assert_eq!(json_files(dir.path()), vec!["07_03_2024.json".to_string()]);
        assert!(store.load_day(date()).unwrap().is_empty());
    }

    #[test]
    fn ensure_day_keeps_existing_rows() {
        let dir = tempdir().unwrap();
        let store = FileLedgerStore::open(dir.path()).unwrap();
        let ledger = DayLedger::from_events(
            date(),
            vec![AccessEvent::opened(&person("2021001"), TimeOfDay::from_hms(9, 0, 0).unwrap())],
        );
        store.save_day(date(), &ledger).unwrap();

        store.ensure_day(date()).unwrap();
        assert_eq!(store.load_day(date()).unwrap().len(), 1);
    }

    #[test]
    fn save_then_load_preserves_columns_and_order() {
        let dir = tempdir().unwrap();
        let store = FileLedgerStore::open(dir.path()).unwrap();

        let mut closed = AccessEvent::opened(&person("2021001"), TimeOfDay::from_hms(9, 0, 0).unwrap());
        closed.entry_time = Some(TimeOfDay::from_hms(18, 30, 0).unwrap());
        let open = AccessEvent::opened(&person("2021002"), TimeOfDay::from_hms(10, 0, 0).unwrap());
        let reopened = AccessEvent::opened(&person("2021001"), TimeOfDay::from_hms(20, 0, 0).unwrap());
        let ledger = DayLedger::from_events(date(), vec![closed, open, reopened]);

        store.save_day(date(), &ledger).unwrap();
        let loaded = store.load_day(date()).unwrap();
        assert_eq!(loaded.events(), ledger.events());

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.day_path(date())).unwrap()).unwrap();
        let first = &raw[0];
        assert_eq!(first["rollno"], "2021001");
        assert_eq!(first["erp"], "ERP001");
        assert_eq!(first["name"], "John Doe");
        assert_eq!(first["Exit Time"], "09:00:00");
        assert_eq!(first["Entry Time"], "18:30:00");
        assert_eq!(first["room no"], "A101");
        assert_eq!(first["phone no"], "9876543210");
        assert_eq!(raw[1]["Entry Time"], "");
        assert!(!dir.path().join("07_03_2024.json.tmp").exists());
    }

    #[test]
    fn blank_null_and_missing_times_load_as_unfilled() {
        let dir = tempdir().unwrap();
        let store = FileLedgerStore::open(dir.path()).unwrap();
        fs::write(
            store.day_path(date()),
            r#"[
                {"rollno": 2021001, "erp": "ERP001", "name": "John Doe", "Exit Time": "   ", "Entry Time": null, "room no": "A101", "phone no": 9876543210},
                {"rollno": "2021002", "Exit Time": "08:15:00"}
            ]"#,
        )
        .unwrap();

        let ledger = store.load_day(date()).unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.events()[0].roll_no.as_str(), "2021001");
        assert_eq!(ledger.events()[0].mobile_no, "9876543210");
        assert_eq!(ledger.events()[0].exit_time, None);
        assert_eq!(ledger.events()[0].entry_time, None);
        assert_eq!(ledger.events()[1].exit_time, Some(TimeOfDay::from_hms(8, 15, 0).unwrap()));
        assert_eq!(ledger.events()[1].entry_time, None);
    }

    #[test]
    fn unreadable_time_is_corruption() {
        let dir = tempdir().unwrap();
        let store = FileLedgerStore::open(dir.path()).unwrap();
        fs::write(store.day_path(date()), r#"[{"rollno": "1", "Exit Time": "lunch"}]"#).unwrap();

        match store.load_day(date()).unwrap_err() {
            StoreError::Corrupt { date, reason } => {
                assert_eq!(date, "07_03_2024");
                assert!(reason.contains("row 0"));
            }
            other => panic!("Expected Corrupt error, got {other:?}"),
        }
    }

    #[test]
    fn truncated_file_is_corruption() {
        let dir = tempdir().unwrap();
        let store = FileLedgerStore::open(dir.path()).unwrap();
        fs::write(store.day_path(date()), r#"[{"rollno": "1", "Exit"#).unwrap();

        assert!(matches!(store.load_day(date()), Err(StoreError::Corrupt { .. })));
    }
}
