//! In-memory shared expense ledger.

use chrono::Utc;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use splitledger_shared::types::{ExpenseId, MemberId, quantize_amount};
use tracing::debug;

use super::error::LedgerError;
use super::expense::Expense;
use super::member::Member;
use super::types::{CreateExpenseInput, CreateMemberInput};
use super::validation::{validate_amount, validate_member_input, validate_references};
use crate::balance::{NetBalances, Settlement, compute_net_balances, settle_balances};

/// Members and expenses of one group, in insertion order.
///
/// Every expense in a `Ledger` references registered members only, so the
/// balance calculator never observes a dangling id. Member order matters:
/// the first registered member absorbs any rounding residual.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    members: IndexMap<MemberId, Member>,
    expenses: IndexMap<ExpenseId, Expense>,
}

impl Ledger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a ledger from persisted records, preserving their order.
    ///
    /// Applies the same rules as `add_expense` so a hand-edited file cannot
    /// smuggle in dangling references.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` on duplicate ids, invalid amounts or unknown
    /// payer/participant references.
    pub fn restore<M, E>(members: M, expenses: E) -> Result<Self, LedgerError>
    where
        M: IntoIterator<Item = Member>,
        E: IntoIterator<Item = Expense>,
    {
        let mut ledger = Self::new();

        for member in members {
            if ledger.members.contains_key(&member.id) {
                return Err(LedgerError::DuplicateMember(member.id));
            }
            ledger.members.insert(member.id, member);
        }

        for mut expense in expenses {
            if ledger.expenses.contains_key(&expense.id) {
                return Err(LedgerError::DuplicateExpense(expense.id));
            }
            validate_amount(expense.amount)?;
            validate_references(expense.payer_id, &expense.participants, |id| {
                ledger.members.contains_key(&id)
            })?;
            expense.amount = quantize_amount(expense.amount);
            ledger.expenses.insert(expense.id, expense);
        }

        Ok(ledger)
    }

    /// Registers a new member.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if the name is blank or the email is malformed.
    pub fn add_member(&mut self, input: CreateMemberInput) -> Result<&Member, LedgerError> {
        validate_member_input(&input)?;

        let member = Member {
            id: MemberId::new(),
            name: input.name.trim().to_string(),
            email: input.email.map(|email| email.trim().to_string()),
        };
        debug!(member_id = %member.id, name = %member.name, "Member added");

        Ok(self.members.entry(member.id).or_insert(member))
    }

    /// Records a new expense.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if the amount is invalid or the payer or any
    /// participant is not a member.
    pub fn add_expense(&mut self, input: CreateExpenseInput) -> Result<&Expense, LedgerError> {
        validate_amount(input.amount)?;
        validate_references(input.payer_id, &input.participants, |id| {
            self.members.contains_key(&id)
        })?;

        let expense = Expense {
            id: ExpenseId::new(),
            payer_id: input.payer_id,
            amount: quantize_amount(input.amount),
            participants: input.participants,
            description: input.description,
            created_at: Utc::now(),
        };
        debug!(
            expense_id = %expense.id,
            payer_id = %expense.payer_id,
            amount = %expense.amount,
            participants = expense.participants.len(),
            "Expense recorded"
        );

        Ok(self.expenses.entry(expense.id).or_insert(expense))
    }

    /// Looks up a member by id.
    #[must_use]
    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.get(&id)
    }

    /// Finds a member by id string or case-insensitive name.
    ///
    /// Ids win over names; among equal names the first registered wins.
    #[must_use]
    pub fn find_member(&self, reference: &str) -> Option<&Member> {
        let reference = reference.trim();
        self.members
            .values()
            .find(|m| m.id.to_string() == reference)
            .or_else(|| self.members.values().find(|m| m.matches(reference)))
    }

    /// Members in registration order.
    pub fn members(&self) -> impl ExactSizeIterator<Item = &Member> {
        self.members.values()
    }

    /// Member ids in registration order.
    pub fn member_ids(&self) -> impl ExactSizeIterator<Item = MemberId> + '_ {
        self.members.keys().copied()
    }

    /// Expenses in recording order.
    pub fn expenses(&self) -> impl ExactSizeIterator<Item = &Expense> {
        self.expenses.values()
    }

    /// Number of registered members.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Number of recorded expenses.
    #[must_use]
    pub fn expense_count(&self) -> usize {
        self.expenses.len()
    }

    /// Sum of all expense amounts.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AmountOverflow` if the sum leaves the range of
    /// `Decimal`.
    pub fn total_spent(&self) -> Result<Decimal, LedgerError> {
        self.expenses
            .values()
            .try_fold(Decimal::ZERO, |sum, expense| sum.checked_add(expense.amount))
            .map(quantize_amount)
            .ok_or(LedgerError::AmountOverflow)
    }

    /// Net balance of every member over the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AmountOverflow` if the amounts are too large to
    /// add up in a `Decimal`.
    pub fn net_balances(&self) -> Result<NetBalances, LedgerError> {
        compute_net_balances(self.member_ids(), self.expenses())
    }

    /// Transfers that settle every balance.
    ///
    /// # Errors
    ///
    /// See [`Ledger::net_balances`].
    pub fn settlement_plan(&self) -> Result<Vec<Settlement>, LedgerError> {
        Ok(settle_balances(&self.net_balances()?))
    }
}
