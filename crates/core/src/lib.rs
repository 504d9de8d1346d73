//! Core business logic for SplitLedger.
//!
//! This crate contains pure business logic with ZERO file or network dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Members, expenses and the validated in-memory ledger
//! - `balance` - Net balance computation and debt settlement planning

pub mod balance;
pub mod ledger;

pub use balance::{NetBalances, Settlement, compute_net_balances, settle_balances};
pub use ledger::{Expense, Ledger, LedgerError, Member};
