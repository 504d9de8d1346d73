//! Shared expense ledger.
//!
//! This module implements the ledger that feeds balance computation:
//! - Members and the expenses they pay for
//! - Input types for adding members and expenses
//! - Referential-integrity and amount validation
//! - Error types for ledger operations
//! - The insertion-ordered in-memory `Ledger`

pub mod book;
pub mod error;
pub mod expense;
pub mod member;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use book::Ledger;
pub use error::LedgerError;
pub use expense::Expense;
pub use member::Member;
pub use types::{CreateExpenseInput, CreateMemberInput};
pub use validation::{validate_amount, validate_member_input, validate_references};
