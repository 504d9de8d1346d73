//! Greedy debt settlement.

use splitledger_shared::types::quantize_amount;
use tracing::{debug, warn};

use super::net::{NetBalances, Settlement};

/// Plans transfers that settle the given balances.
///
/// Creditors are taken largest first and debtors most negative first (ties
/// keep registration order). Two cursors walk both lists; each step pays
/// `min(credit, |debt|)` from the current debtor to the current creditor
/// and advances whichever side reached exactly zero.
///
/// The plan is a heuristic, not a minimal cash-flow solution, but it emits
/// at most `creditors + debtors - 1` transfers, each strictly positive.
/// Balances that do not sum to zero still terminate, leaving a residual.
#[must_use]
pub fn settle_balances(balances: &NetBalances) -> Vec<Settlement> {
    let mut creditors = balances.creditors();
    let mut debtors = balances.debtors();

    // `sort_by` is stable, so equal balances stay in registration order.
    creditors.sort_by(|a, b| b.1.cmp(&a.1));
    debtors.sort_by(|a, b| a.1.cmp(&b.1));

    let mut settlements = Vec::with_capacity(creditors.len() + debtors.len());
    let (mut i, mut j) = (0, 0);

    while i < creditors.len() && j < debtors.len() {
        let (creditor, credit) = &mut creditors[i];
        let (debtor, debt) = &mut debtors[j];

        let amount = quantize_amount((*credit).min(-*debt));
        if amount.is_zero() {
            debug!(%creditor, %debtor, "Stopping on sub-cent remainder");
            break;
        }

        settlements.push(Settlement {
            from: *debtor,
            to: *creditor,
            amount,
        });

        *credit = quantize_amount(*credit - amount);
        *debt = quantize_amount(*debt + amount);

        if credit.is_zero() {
            i += 1;
        }
        if debt.is_zero() {
            j += 1;
        }
    }

    match balances.total() {
        Some(residual) if residual.is_zero() => {}
        Some(residual) => {
            warn!(%residual, "Balances do not sum to zero; settlement plan leaves a residual");
        }
        None => warn!("Balance total overflows; settlement plan may leave a residual"),
    }

    settlements
}
