//! Infrastructure layer: ledger persistence, clocks, identity resolution,
//! configuration, and the `AccessLedger` orchestration that ties them to the
//! pure pairing rules.

pub mod access_ledger;
pub mod clock;
pub mod config;
pub mod day_locks;
pub mod identity;
pub mod ledger_store;
pub mod roster_file;

mod integration_tests;

pub use access_ledger::{AccessLedger, LedgerError, RecordOutcome, Recorded};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AppConfig, ConfigError};
pub use identity::{IdentityResolver, NearestEncodingResolver};
pub use ledger_store::{FileLedgerStore, InMemoryLedgerStore, LedgerStore, StoreError};
