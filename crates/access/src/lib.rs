//! Access ledger domain module.
//!
//! Business rules for pairing resident exits and entries within one calendar
//! day, implemented purely as deterministic domain logic (no IO, no clock, no
//! storage). Time is always supplied by the caller.

pub mod action;
pub mod event;
pub mod ledger;
pub mod state;
pub mod time;

pub use action::Action;
pub use event::AccessEvent;
pub use ledger::{AccessCommand, DayLedger, LedgerChange, RecordedChange};
pub use state::{PairingRule, PairingState, PolicyViolation};
pub use time::{LedgerDate, TimeOfDay};
