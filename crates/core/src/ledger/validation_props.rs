//! Property-based tests for ledger validation.
//!
//! - Amounts at cent resolution are accepted, negatives and sub-cent amounts rejected
//! - Referential integrity is enforced on every insertion path

use proptest::prelude::*;
use rust_decimal::Decimal;
use splitledger_shared::types::MemberId;

use super::book::Ledger;
use super::error::LedgerError;
use super::types::{CreateExpenseInput, CreateMemberInput};
use super::validation::validate_amount;

/// Strategy to generate non-negative cent amounts (0.00 to 100,000.00).
fn cent_amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn ledger_with_members(count: usize) -> (Ledger, Vec<MemberId>) {
    let mut ledger = Ledger::new();
    let ids = (0..count)
        .map(|i| {
            ledger
                .add_member(CreateMemberInput::new(format!("Member {i}")))
                .unwrap()
                .id
        })
        .collect();
    (ledger, ids)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every non-negative cent amount is accepted.
    #[test]
    fn prop_cent_amounts_accepted(amount in cent_amount()) {
        prop_assert!(validate_amount(amount).is_ok());
    }

    /// Every strictly negative amount is rejected.
    #[test]
    fn prop_negative_amounts_rejected(cents in 1i64..10_000_000i64) {
        let result = validate_amount(Decimal::new(-cents, 2));
        prop_assert!(matches!(result, Err(LedgerError::NegativeAmount(_))));
    }

    /// Amounts with a non-zero third fractional digit are rejected.
    #[test]
    fn prop_sub_cent_amounts_rejected(mills in 0i64..10_000_000i64) {
        prop_assume!(mills % 10 != 0);
        let result = validate_amount(Decimal::new(mills, 3));
        prop_assert!(matches!(result, Err(LedgerError::ExcessPrecision(_))));
    }

    /// An expense naming a stranger never enters the ledger.
    #[test]
    fn prop_stranger_participant_rejected(
        member_count in 1usize..6,
        amount in cent_amount(),
        position in 0usize..6,
    ) {
        let (mut ledger, ids) = ledger_with_members(member_count);
        let mut participants = ids.clone();
        let insert_at = position.min(participants.len());
        participants.insert(insert_at, MemberId::new());

        let result = ledger.add_expense(CreateExpenseInput::new(ids[0], amount, participants));

        prop_assert!(matches!(result, Err(LedgerError::ParticipantNotFound(_))));
        prop_assert_eq!(ledger.expense_count(), 0);
    }

    /// Valid expenses are stored at cent scale with their participants intact.
    #[test]
    fn prop_valid_expense_stored(
        member_count in 1usize..6,
        amount in cent_amount(),
    ) {
        let (mut ledger, ids) = ledger_with_members(member_count);
        let expense = ledger
            .add_expense(CreateExpenseInput::new(ids[0], amount, ids.clone()))
            .unwrap()
            .clone();

        prop_assert_eq!(expense.amount, amount);
        prop_assert_eq!(expense.amount.scale(), 2);
        prop_assert_eq!(&expense.participants, &ids);
        prop_assert_eq!(ledger.expense_count(), 1);
    }
}
