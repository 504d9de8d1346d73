//! Input types for adding members and expenses to a ledger.

use rust_decimal::Decimal;
use splitledger_shared::types::MemberId;

/// Input for registering a new member.
#[derive(Debug, Clone)]
pub struct CreateMemberInput {
    /// Display name (must not be blank).
    pub name: String,
    /// Optional contact address.
    pub email: Option<String>,
}

impl CreateMemberInput {
    /// Creates input for a member without contact details.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
        }
    }

    /// Attaches a contact address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Input for recording a new expense.
///
/// The ledger assigns the id and timestamp.
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    /// Member who paid.
    pub payer_id: MemberId,
    /// Amount paid (non-negative, at most two fractional digits).
    pub amount: Decimal,
    /// Members sharing the cost.
    pub participants: Vec<MemberId>,
    /// Free-text description.
    pub description: String,
}

impl CreateExpenseInput {
    /// Creates input for an expense without a description.
    #[must_use]
    pub fn new(payer_id: MemberId, amount: Decimal, participants: Vec<MemberId>) -> Self {
        Self {
            payer_id,
            amount,
            participants,
            description: String::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
