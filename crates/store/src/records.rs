//! On-disk ledger records.
//!
//! The file is a single JSON object with `members` and `expenses` maps keyed
//! by id. Amounts are written as decimal strings so no precision is lost.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use splitledger_core::{Expense, Ledger, Member};
use splitledger_shared::types::{ExpenseId, MemberId};

use crate::error::StoreError;

/// Persisted member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    /// Member id.
    pub id: MemberId,
    /// Display name.
    pub name: String,
    /// Optional contact address.
    #[serde(default)]
    pub email: Option<String>,
}

/// Persisted expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Expense id.
    pub id: ExpenseId,
    /// Member who paid.
    pub payer_id: MemberId,
    /// Amount as a decimal string, e.g. `"45.50"`.
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// Members sharing the cost.
    #[serde(default)]
    pub participants: Vec<MemberId>,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// RFC 3339 timestamp. Missing or empty values load as the Unix epoch.
    #[serde(default = "epoch", deserialize_with = "lenient_date")]
    pub date: DateTime<Utc>,
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

fn lenient_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(epoch()),
        Some(text) => DateTime::parse_from_rfc3339(text)
            .map(|date| date.with_timezone(&Utc))
            .map_err(serde::de::Error::custom),
    }
}

/// Whole ledger document. Map order is the ledger's insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerFile {
    /// Members keyed by id.
    #[serde(default)]
    pub members: IndexMap<MemberId, MemberRecord>,
    /// Expenses keyed by id.
    #[serde(default)]
    pub expenses: IndexMap<ExpenseId, ExpenseRecord>,
}

impl From<&Member> for MemberRecord {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            name: member.name.clone(),
            email: member.email.clone(),
        }
    }
}

impl From<MemberRecord> for Member {
    fn from(record: MemberRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
        }
    }
}

impl From<&Expense> for ExpenseRecord {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id,
            payer_id: expense.payer_id,
            amount: expense.amount,
            participants: expense.participants.clone(),
            description: expense.description.clone(),
            date: expense.created_at,
        }
    }
}

impl From<ExpenseRecord> for Expense {
    fn from(record: ExpenseRecord) -> Self {
        Self {
            id: record.id,
            payer_id: record.payer_id,
            amount: record.amount,
            participants: record.participants,
            description: record.description,
            created_at: record.date,
        }
    }
}

impl LedgerFile {
    /// Snapshots a ledger into its file form.
    #[must_use]
    pub fn from_ledger(ledger: &Ledger) -> Self {
        Self {
            members: ledger.members().map(|m| (m.id, m.into())).collect(),
            expenses: ledger.expenses().map(|e| (e.id, e.into())).collect(),
        }
    }

    /// Validates the records and rebuilds the ledger.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidRecord` if a record's `id` differs from
    /// its key, or `StoreError::Ledger` if the records break ledger rules.
    pub fn into_ledger(self) -> Result<Ledger, StoreError> {
        if let Some((key, record)) = self.members.iter().find(|(key, r)| **key != r.id) {
            return Err(StoreError::InvalidRecord(format!(
                "member stored under {key} has id {}",
                record.id
            )));
        }
        if let Some((key, record)) = self.expenses.iter().find(|(key, r)| **key != r.id) {
            return Err(StoreError::InvalidRecord(format!(
                "expense stored under {key} has id {}",
                record.id
            )));
        }

        let ledger = Ledger::restore(
            self.members.into_values().map(Member::from),
            self.expenses.into_values().map(Expense::from),
        )?;
        Ok(ledger)
    }
}
