//! Property-based tests for the balance calculator.
//!
//! - Balances always sum to exactly zero
//! - Uninvolved members stay at zero
//! - Every balance carries cent scale
//! - Output is deterministic for a fixed snapshot

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;
use splitledger_shared::types::{ExpenseId, MemberId};

use super::calculator::compute_net_balances;
use crate::ledger::Expense;

/// Expense shape before member ids exist: (payer index, cents, participant indexes).
type ExpenseShape = (usize, i64, Vec<usize>);

/// Strategy to generate an expense against a group of `members` people.
///
/// Participant lists may be empty, may repeat a member and may omit the payer.
fn expense_shape(members: usize) -> impl Strategy<Value = ExpenseShape> {
    (
        0..members,
        0i64..10_000_000i64,
        prop::collection::vec(0..members, 0..=members + 1),
    )
}

/// Strategy to generate a group size and its expenses.
fn ledger_shape() -> impl Strategy<Value = (usize, Vec<ExpenseShape>)> {
    (1usize..8).prop_flat_map(|members| {
        (
            Just(members),
            prop::collection::vec(expense_shape(members), 0..20),
        )
    })
}

fn build(members: usize, shapes: &[ExpenseShape]) -> (Vec<MemberId>, Vec<Expense>) {
    let ids: Vec<MemberId> = (0..members).map(|_| MemberId::new()).collect();
    let expenses = shapes
        .iter()
        .map(|(payer, cents, participants)| Expense {
            id: ExpenseId::new(),
            payer_id: ids[*payer],
            amount: Decimal::new(*cents, 2),
            participants: participants.iter().map(|p| ids[*p]).collect(),
            description: String::new(),
            created_at: Utc::now(),
        })
        .collect();
    (ids, expenses)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* set of expenses, the balances sum to exactly 0.00.
    #[test]
    fn prop_balances_sum_to_zero((members, shapes) in ledger_shape()) {
        let (ids, expenses) = build(members, &shapes);
        let balances = compute_net_balances(ids, &expenses).unwrap();

        prop_assert_eq!(balances.total(), Some(Decimal::ZERO));
    }

    /// *For any* member absent from every expense, the balance is exactly 0.00.
    #[test]
    fn prop_uninvolved_member_is_zero((members, shapes) in ledger_shape()) {
        let (mut ids, expenses) = build(members, &shapes);
        // Registered last, so it never absorbs the residual.
        let bystander = MemberId::new();
        ids.push(bystander);

        let balances = compute_net_balances(ids, &expenses).unwrap();

        prop_assert_eq!(balances.get(bystander), Some(Decimal::ZERO));
    }

    /// *For any* result, every balance is held at exactly two fractional digits.
    #[test]
    fn prop_balances_have_cent_scale((members, shapes) in ledger_shape()) {
        let (ids, expenses) = build(members, &shapes);
        let balances = compute_net_balances(ids, &expenses).unwrap();

        for (_, balance) in balances.iter() {
            prop_assert_eq!(balance.scale(), 2);
        }
    }

    /// *For any* snapshot, computing twice yields identical balances in identical order.
    #[test]
    fn prop_deterministic((members, shapes) in ledger_shape()) {
        let (ids, expenses) = build(members, &shapes);

        let first = compute_net_balances(ids.clone(), &expenses).unwrap();
        let second = compute_net_balances(ids.clone(), &expenses).unwrap();

        prop_assert_eq!(&first, &second);
        let order: Vec<MemberId> = first.iter().map(|(id, _)| id).collect();
        prop_assert_eq!(order, ids);
    }

    /// *For any* expense, the residual moved onto the first member is bounded
    /// by one cent per participant.
    #[test]
    fn prop_residual_is_small(
        cents in 0i64..10_000_000i64,
        participants in 1usize..8,
    ) {
        let shapes = vec![(0, cents, (0..participants).collect::<Vec<_>>())];
        let (ids, expenses) = build(participants, &shapes);
        let share = expenses[0].share().unwrap();

        let balances = compute_net_balances(ids.clone(), &expenses).unwrap();

        // Without the residual the payer would hold amount - share.
        let expected_payer = expenses[0].amount - share;
        let drift = (balances.get(ids[0]).unwrap() - expected_payer).abs();
        prop_assert!(drift <= Decimal::new(i64::try_from(participants).unwrap(), 2));
    }
}
