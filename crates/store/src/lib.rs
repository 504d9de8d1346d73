//! JSON file persistence for SplitLedger.
//!
//! This crate provides:
//! - Serializable records mirroring the on-disk ledger layout
//! - A file-backed store that loads and saves whole ledgers
//! - Storage error types

pub mod error;
pub mod records;
pub mod store;

pub use error::StoreError;
pub use records::{ExpenseRecord, LedgerFile, MemberRecord};
pub use store::JsonLedgerStore;
