//! Ledger member domain type.

use serde::{Deserialize, Serialize};
use splitledger_shared::types::MemberId;

/// A participant in the shared ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier for this member.
    pub id: MemberId,
    /// Display name.
    pub name: String,
    /// Optional contact address.
    pub email: Option<String>,
}

impl Member {
    /// Returns true if `reference` names this member, either by id or by
    /// case-insensitive display name.
    #[must_use]
    pub fn matches(&self, reference: &str) -> bool {
        let reference = reference.trim();
        self.id.to_string() == reference || self.name.eq_ignore_ascii_case(reference)
    }
}
