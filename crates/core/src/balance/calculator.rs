//! Net balance calculation.

use splitledger_shared::types::{MemberId, quantize_amount};
use tracing::debug;

use super::net::NetBalances;
use crate::ledger::{Expense, LedgerError};

/// Computes every member's net balance from a set of expenses.
///
/// For each expense with participants, the payer is credited the full
/// amount and every participant is debited the per-head share rounded
/// half-up to cents. Expenses without participants are skipped. Members
/// who appear in no expense keep a balance of `0.00`.
///
/// Because shares are rounded independently, the raw balances can miss
/// zero by a few cents. That residual is taken from the first member in
/// `members` order so the result always sums to exactly zero. The choice
/// of member is arbitrary, not fair.
///
/// # Errors
///
/// Returns `LedgerError::MemberNotFound` if an expense references an id
/// missing from `members`. Callers going through `Ledger` never see this.
/// Returns `LedgerError::AmountOverflow` if a running balance leaves the
/// range of `Decimal`.
pub fn compute_net_balances<'a, M, E>(members: M, expenses: E) -> Result<NetBalances, LedgerError>
where
    M: IntoIterator<Item = MemberId>,
    E: IntoIterator<Item = &'a Expense>,
{
    let mut balances = NetBalances::zeroed(members);

    for expense in expenses {
        let Some(share) = expense.share() else {
            continue;
        };

        let payer = balances.balance_mut(expense.payer_id)?;
        *payer = payer
            .checked_add(expense.amount)
            .ok_or(LedgerError::AmountOverflow)?;
        for participant in &expense.participants {
            let balance = balances.balance_mut(*participant)?;
            *balance = balance
                .checked_sub(share)
                .ok_or(LedgerError::AmountOverflow)?;
        }
    }

    balances.quantize_all();

    let residual = balances.total().ok_or(LedgerError::AmountOverflow)?;
    if !residual.is_zero()
        && let Some((member_id, balance)) = balances.first_mut()
    {
        *balance = quantize_amount(
            balance
                .checked_sub(residual)
                .ok_or(LedgerError::AmountOverflow)?,
        );
        debug!(%member_id, %residual, "Assigned rounding residual");
    }

    Ok(balances)
}
