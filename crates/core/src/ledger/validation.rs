//! Business rule validation for ledger operations.

use rust_decimal::Decimal;
use splitledger_shared::types::{MemberId, has_cent_precision};

use super::error::LedgerError;
use super::types::CreateMemberInput;

/// Validates a new member's name and contact address.
///
/// # Errors
///
/// Returns an error if the name is blank or the email has no `@`.
pub fn validate_member_input(input: &CreateMemberInput) -> Result<(), LedgerError> {
    if input.name.trim().is_empty() {
        return Err(LedgerError::EmptyName);
    }

    if let Some(email) = &input.email {
        let email = email.trim();
        let valid = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
        if !valid {
            return Err(LedgerError::InvalidEmail(email.to_string()));
        }
    }

    Ok(())
}

/// Validates an expense amount: non-negative with at most cent resolution.
///
/// Zero is allowed.
///
/// # Errors
///
/// Returns an error if the amount is negative or has sub-cent digits.
pub fn validate_amount(amount: Decimal) -> Result<(), LedgerError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(LedgerError::NegativeAmount(amount));
    }
    if !has_cent_precision(amount) {
        return Err(LedgerError::ExcessPrecision(amount));
    }
    Ok(())
}

/// Validates that the payer and every participant are known members.
///
/// # Errors
///
/// Returns the first unknown reference, payer first.
pub fn validate_references<F>(
    payer_id: MemberId,
    participants: &[MemberId],
    is_member: F,
) -> Result<(), LedgerError>
where
    F: Fn(MemberId) -> bool,
{
    if !is_member(payer_id) {
        return Err(LedgerError::PayerNotFound(payer_id));
    }

    if let Some(unknown) = participants.iter().copied().find(|id| !is_member(*id)) {
        return Err(LedgerError::ParticipantNotFound(unknown));
    }

    Ok(())
}
