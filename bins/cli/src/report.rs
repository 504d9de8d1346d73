//! Plain-text report lines.

use rust_decimal::Decimal;
use splitledger_core::{Ledger, LedgerError, NetBalances, Settlement, settle_balances};
use splitledger_shared::types::MemberId;

/// Formats an amount with two decimals. Zero never carries a sign.
pub fn format_amount(amount: Decimal) -> String {
    if amount.is_zero() {
        "0.00".to_string()
    } else {
        format!("{amount:.2}")
    }
}

fn display_name(ledger: &Ledger, id: MemberId) -> String {
    ledger
        .member(id)
        .map_or_else(|| id.to_string(), |member| member.name.clone())
}

/// One `Name: amount` line per member, in ledger order.
pub fn balance_lines(ledger: &Ledger, balances: &NetBalances) -> Vec<String> {
    balances
        .iter()
        .map(|(id, amount)| format!("{}: {}", display_name(ledger, id), format_amount(amount)))
        .collect()
}

/// One `Debtor -> Creditor: amount` line per transfer.
pub fn settlement_lines(ledger: &Ledger, settlements: &[Settlement]) -> Vec<String> {
    settlements
        .iter()
        .map(|s| {
            format!(
                "{} -> {}: {}",
                display_name(ledger, s.from),
                display_name(ledger, s.to),
                format_amount(s.amount)
            )
        })
        .collect()
}

/// Full report: balances, transfers, then what is left after the transfers.
///
/// # Errors
///
/// Propagates ledger errors from balance computation.
pub fn full_report(ledger: &Ledger) -> Result<Vec<String>, LedgerError> {
    let balances = ledger.net_balances()?;
    let settlements = settle_balances(&balances);
    let remaining = balances.apply(&settlements)?;

    let mut lines = vec![
        format!("Total spent: {}", format_amount(ledger.total_spent()?)),
        String::new(),
        "== Balances ==".to_string(),
    ];
    lines.extend(balance_lines(ledger, &balances));
    lines.push(String::new());
    lines.push("== Settlements (who pays who) ==".to_string());
    if settlements.is_empty() {
        lines.push("Nothing to settle.".to_string());
    } else {
        lines.extend(settlement_lines(ledger, &settlements));
    }
    lines.push(String::new());
    if remaining.is_settled() {
        lines.push("All settled.".to_string());
    } else {
        lines.push("Remaining after settlement:".to_string());
        let leftovers: NetBalances = remaining.iter().filter(|(_, v)| !v.is_zero()).collect();
        lines.extend(balance_lines(ledger, &leftovers));
    }
    Ok(lines)
}
