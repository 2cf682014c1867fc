//! Resident roster module.
//!
//! Holds the immutable snapshot of known residents and their face encodings.
//! Loading the snapshot from disk is an infrastructure concern (see
//! `hostelgate-infra::roster_file`); this crate only models and validates it.

pub mod encoding;
pub mod person;
pub mod roster;

pub use encoding::FaceEncoding;
pub use person::PersonRecord;
pub use roster::{Roster, RosterEntry};
