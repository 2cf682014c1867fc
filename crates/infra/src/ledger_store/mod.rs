//! Day ledger persistence boundary.
//!
//! One persisted unit per calendar date, rewritten whole on every accepted
//! action. The trait makes no assumption about the backing format.

pub mod file;
pub mod in_memory;
pub mod r#trait;

pub use file::FileLedgerStore;
pub use in_memory::InMemoryLedgerStore;
pub use r#trait::{LedgerStore, StoreError};
