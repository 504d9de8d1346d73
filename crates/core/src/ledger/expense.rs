//! Expense domain type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_shared::types::{ExpenseId, MemberId, quantize_amount};

/// A payment made by one member and split equally among participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier.
    pub id: ExpenseId,
    /// Member who paid.
    pub payer_id: MemberId,
    /// Amount paid (non-negative, cent resolution).
    pub amount: Decimal,
    /// Members sharing the cost, in the order they were given.
    ///
    /// May include the payer. An empty list leaves every balance untouched.
    pub participants: Vec<MemberId>,
    /// Free-text description.
    pub description: String,
    /// When the expense was recorded.
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Per-participant share, rounded half-up to cents.
    ///
    /// Returns `None` when there are no participants.
    #[must_use]
    pub fn share(&self) -> Option<Decimal> {
        if self.participants.is_empty() {
            return None;
        }
        let count = Decimal::from(self.participants.len());
        Some(quantize_amount(self.amount / count))
    }
}
