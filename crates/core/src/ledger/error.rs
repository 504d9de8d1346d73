//! Ledger error types for validation and lookup errors.

use rust_decimal::Decimal;
use splitledger_shared::AppError;
use splitledger_shared::types::{ExpenseId, MemberId};
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Member name is empty or whitespace.
    #[error("Member name cannot be empty")]
    EmptyName,

    /// Contact address is not an email address.
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// Expense amount cannot be negative.
    #[error("Expense amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    /// Expense amount has sub-cent digits.
    #[error("Expense amount has more than two fractional digits: {0}")]
    ExcessPrecision(Decimal),

    /// Summing amounts exceeded the range of `Decimal`.
    #[error("Amounts are too large to add up exactly")]
    AmountOverflow,

    // ========== Reference Errors ==========
    /// Payer is not a member of the ledger.
    #[error("Payer not found in ledger: {0}")]
    PayerNotFound(MemberId),

    /// A participant is not a member of the ledger.
    #[error("Participant not found in ledger: {0}")]
    ParticipantNotFound(MemberId),

    /// Balance lookup for an id that was never registered.
    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    // ========== Restore Errors ==========
    /// The same member id appears twice.
    #[error("Duplicate member id: {0}")]
    DuplicateMember(MemberId),

    /// The same expense id appears twice.
    #[error("Duplicate expense id: {0}")]
    DuplicateExpense(ExpenseId),
}

impl LedgerError {
    /// Returns the stable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "EMPTY_NAME",
            Self::InvalidEmail(_) => "INVALID_EMAIL",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::ExcessPrecision(_) => "EXCESS_PRECISION",
            Self::AmountOverflow => "AMOUNT_OVERFLOW",
            Self::PayerNotFound(_) => "PAYER_NOT_FOUND",
            Self::ParticipantNotFound(_) => "PARTICIPANT_NOT_FOUND",
            Self::MemberNotFound(_) => "MEMBER_NOT_FOUND",
            Self::DuplicateMember(_) => "DUPLICATE_MEMBER",
            Self::DuplicateExpense(_) => "DUPLICATE_EXPENSE",
        }
    }

    /// Returns true if the error refers to an unknown member.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PayerNotFound(_) | Self::ParticipantNotFound(_) | Self::MemberNotFound(_)
        )
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            // Only reachable when a caller bypasses `Ledger` validation.
            LedgerError::MemberNotFound(_) => Self::Internal(err.to_string()),
            _ if err.is_not_found() => Self::NotFound(err.to_string()),
            _ => Self::Validation(err.to_string()),
        }
    }
}
