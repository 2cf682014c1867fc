//! Roster snapshot on disk: a JSON array of `RosterEntry`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use hostelgate_core::DomainError;
use hostelgate_roster::{Roster, RosterEntry};

#[derive(Debug, Error)]
pub enum RosterFileError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse roster {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("invalid roster: {0}")]
    Invalid(#[from] DomainError),
}

/// Read and validate a roster snapshot.
pub fn load_roster(path: &Path) -> Result<Roster, RosterFileError> {
    let text = fs::read_to_string(path).map_err(|source| RosterFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let entries: Vec<RosterEntry> =
        serde_json::from_str(&text).map_err(|e| RosterFileError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let roster = Roster::from_entries(entries)?;
    tracing::info!(
        path = %path.display(),
        residents = roster.len(),
        with_encoding = roster.gallery().count(),
        "loaded roster"
    );
    Ok(roster)
}

/// Write a roster snapshot (pretty JSON).
pub fn write_roster(path: &Path, entries: &[RosterEntry]) -> Result<(), RosterFileError> {
    let io_err = |source| RosterFileError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let text = serde_json::to_string_pretty(entries).map_err(|e| RosterFileError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    fs::write(path, text).map_err(io_err)
}

/// Load the roster, or write and use the sample roster when the file is
/// missing. Any other failure is returned as is.
pub fn load_or_create_sample(path: &Path) -> Result<Roster, RosterFileError> {
    match fs::metadata(path) {
        Ok(_) => load_roster(path),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "roster file not found; writing sample roster");
            let entries = Roster::sample_entries();
            write_roster(path, &entries)?;
            Ok(Roster::from_entries(entries)?)
        }
        Err(source) => Err(RosterFileError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_roster_is_replaced_by_sample() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roster.json");

        let roster = load_or_create_sample(&path).unwrap();
        assert_eq!(roster.len(), 3);
        assert!(path.exists());

        let reloaded = load_roster(&path).unwrap();
        assert_eq!(reloaded.entries(), roster.entries());
    }

    #[test]
    fn duplicate_roll_numbers_fail_to_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roster.json");
        let mut entries = Roster::sample_entries();
        entries.push(entries[0].clone());
        write_roster(&path, &entries).unwrap();

        assert!(matches!(
            load_roster(&path),
            Err(RosterFileError::Invalid(DomainError::Conflict(_)))
        ));
    }

    #[test]
    fn unparseable_roster_is_not_replaced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roster.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            load_or_create_sample(&path),
            Err(RosterFileError::Parse { .. })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
    }
}
