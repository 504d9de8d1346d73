//! Net balance computation and debt settlement.
//!
//! Two pure functions over a ledger snapshot:
//! - `compute_net_balances` derives each member's net position from expenses
//! - `settle_balances` turns net positions into pairwise transfers
//!
//! Both use exact decimal arithmetic quantized half-up to cents.

pub mod calculator;
pub mod net;
pub mod settlement;

#[cfg(test)]
mod calculator_props;
#[cfg(test)]
mod settlement_props;

pub use calculator::compute_net_balances;
pub use net::{NetBalances, Settlement};
pub use settlement::settle_balances;
