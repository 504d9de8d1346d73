//! Net balance and settlement types.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_shared::types::{MemberId, quantize_amount};

use crate::ledger::LedgerError;

/// A transfer from a debtor to a creditor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Member who pays (net payable).
    pub from: MemberId,
    /// Member who receives (net receivable).
    pub to: MemberId,
    /// Amount transferred, always positive.
    pub amount: Decimal,
}

/// Net balance per member, in member registration order.
///
/// Positive balances are receivable, negative balances payable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetBalances(IndexMap<MemberId, Decimal>);

impl NetBalances {
    /// Creates a zero balance for every member, keeping the given order.
    pub fn zeroed<I>(members: I) -> Self
    where
        I: IntoIterator<Item = MemberId>,
    {
        Self(
            members
                .into_iter()
                .map(|id| (id, quantize_amount(Decimal::ZERO)))
                .collect(),
        )
    }

    /// Mutable access to a member's balance.
    pub(crate) fn balance_mut(&mut self, id: MemberId) -> Result<&mut Decimal, LedgerError> {
        self.0.get_mut(&id).ok_or(LedgerError::MemberNotFound(id))
    }

    /// Balance of the first registered member.
    pub(crate) fn first_mut(&mut self) -> Option<(MemberId, &mut Decimal)> {
        self.0.first_mut().map(|(id, balance)| (*id, balance))
    }

    /// Quantizes every balance to cents.
    pub(crate) fn quantize_all(&mut self) {
        for balance in self.0.values_mut() {
            *balance = quantize_amount(*balance);
        }
    }

    /// Returns a member's balance.
    #[must_use]
    pub fn get(&self, id: MemberId) -> Option<Decimal> {
        self.0.get(&id).copied()
    }

    /// Iterates balances in registration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (MemberId, Decimal)> + '_ {
        self.0.iter().map(|(id, balance)| (*id, *balance))
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all balances, or `None` if the sum overflows.
    ///
    /// `Some(0.00)` for calculator output.
    #[must_use]
    pub fn total(&self) -> Option<Decimal> {
        self.0
            .values()
            .try_fold(Decimal::ZERO, |sum, balance| sum.checked_add(*balance))
    }

    /// Returns true if every balance is exactly zero.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.0.values().all(Decimal::is_zero)
    }

    /// Members with a positive balance, in registration order.
    #[must_use]
    pub fn creditors(&self) -> Vec<(MemberId, Decimal)> {
        self.iter().filter(|(_, b)| b.is_sign_positive() && !b.is_zero()).collect()
    }

    /// Members with a negative balance, in registration order.
    #[must_use]
    pub fn debtors(&self) -> Vec<(MemberId, Decimal)> {
        self.iter().filter(|(_, b)| b.is_sign_negative() && !b.is_zero()).collect()
    }

    /// Balances after carrying out the given transfers.
    ///
    /// Each payer moves `amount` toward zero from below and each payee
    /// moves `amount` toward zero from above. A correct plan applied to
    /// its own input yields all-zero balances.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::MemberNotFound` if a transfer names an
    /// unknown member, or `LedgerError::AmountOverflow` if a balance
    /// leaves the range of `Decimal`.
    pub fn apply(&self, settlements: &[Settlement]) -> Result<Self, LedgerError> {
        let mut after = self.clone();
        for settlement in settlements {
            let from = after.balance_mut(settlement.from)?;
            *from = quantize_amount(
                from.checked_add(settlement.amount)
                    .ok_or(LedgerError::AmountOverflow)?,
            );
            let to = after.balance_mut(settlement.to)?;
            *to = quantize_amount(
                to.checked_sub(settlement.amount)
                    .ok_or(LedgerError::AmountOverflow)?,
            );
        }
        Ok(after)
    }
}

impl FromIterator<(MemberId, Decimal)> for NetBalances {
    fn from_iter<T: IntoIterator<Item = (MemberId, Decimal)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
