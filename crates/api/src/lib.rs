//! HTTP API: a thin JSON surface over identity resolution and the access
//! ledger.

pub mod app;
