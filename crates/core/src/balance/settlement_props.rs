//! Property-based tests for the settlement planner.
//!
//! - Applying the plan to zero-sum balances settles everyone
//! - Every transfer is strictly positive and flows debtor to creditor
//! - The plan never exceeds `creditors + debtors - 1` transfers

use proptest::prelude::*;
use rust_decimal::Decimal;
use splitledger_shared::types::MemberId;

use super::net::NetBalances;
use super::settlement::settle_balances;

/// Strategy to generate zero-sum cent balances for 0 to 10 members.
///
/// The last member takes the negated sum of the others.
fn zero_sum_balances() -> impl Strategy<Value = NetBalances> {
    prop::collection::vec(-1_000_000i64..1_000_000i64, 0..10).prop_map(|cents| {
        let mut balances: Vec<Decimal> = cents.iter().map(|c| Decimal::new(*c, 2)).collect();
        let total: Decimal = balances.iter().copied().sum();
        balances.push(-total);
        balances
            .into_iter()
            .map(|balance| (MemberId::new(), balance))
            .collect()
    })
}

/// Strategy to generate arbitrary cent balances (not necessarily zero-sum).
fn arbitrary_balances() -> impl Strategy<Value = NetBalances> {
    prop::collection::vec(-1_000_000i64..1_000_000i64, 0..10).prop_map(|cents| {
        cents
            .into_iter()
            .map(|c| (MemberId::new(), Decimal::new(c, 2)))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* zero-sum balances, applying the plan drives every balance to 0.00.
    #[test]
    fn prop_plan_settles_everyone(balances in zero_sum_balances()) {
        let plan = settle_balances(&balances);
        let after = balances.apply(&plan).unwrap();

        prop_assert!(after.is_settled(), "unsettled after plan: {:?}", after);
    }

    /// *For any* balances, every transfer is positive and goes from a debtor to a creditor.
    #[test]
    fn prop_transfers_positive_and_directed(balances in arbitrary_balances()) {
        for settlement in settle_balances(&balances) {
            prop_assert!(settlement.amount > Decimal::ZERO);
            prop_assert!(balances.get(settlement.from).unwrap() < Decimal::ZERO);
            prop_assert!(balances.get(settlement.to).unwrap() > Decimal::ZERO);
        }
    }

    /// *For any* balances, each step retires at least one side.
    #[test]
    fn prop_plan_length_bounded(balances in arbitrary_balances()) {
        let plan = settle_balances(&balances);
        let parties = balances.creditors().len() + balances.debtors().len();

        prop_assert!(plan.len() <= parties.saturating_sub(1));
    }

    /// *For any* balances, no member pays more than it owes or receives more than it is owed.
    #[test]
    fn prop_no_overshoot(balances in arbitrary_balances()) {
        let after = balances.apply(&settle_balances(&balances)).unwrap();

        for ((_, before), (_, remaining)) in balances.iter().zip(after.iter()) {
            prop_assert!(remaining.abs() <= before.abs());
            prop_assert!(remaining.is_zero() || remaining.is_sign_negative() == before.is_sign_negative());
        }
    }
}
