//! Subcommand parsing and execution.

use rust_decimal::Decimal;
use splitledger_core::Ledger;
use splitledger_core::ledger::{CreateExpenseInput, CreateMemberInput};
use splitledger_shared::types::MemberId;
use splitledger_shared::{AppError, AppResult};
use splitledger_store::JsonLedgerStore;
use tracing::{info, warn};

use crate::report::{balance_lines, format_amount, full_report, settlement_lines};

const USAGE: &str = "\
Usage: splitledger <command> [args...]

Commands:
  demo                                   Show balances for a sample dinner and taxi
  add-member <name> [email]              Register a member
  add-expense <payer> <amount> <participant>... [--desc <text>]
                                         Record an expense split equally
  balances                               Print net balances
  settle                                 Print the settlement plan
  report                                 Totals, balances, settlements and residual check
  help                                   Show this message";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Demo,
    AddMember {
        name: String,
        email: Option<String>,
    },
    AddExpense {
        payer: String,
        amount: Decimal,
        participants: Vec<String>,
        description: String,
    },
    Balances,
    Settle,
    Report,
    Help,
}

fn usage_error(message: &str) -> AppError {
    AppError::Validation(format!("{message}\n\n{USAGE}"))
}

impl Command {
    /// Parses arguments (without the program name).
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for unknown commands or bad arguments.
    pub fn parse(args: &[String]) -> AppResult<Self> {
        let Some((command, rest)) = args.split_first() else {
            return Ok(Self::Help);
        };

        match command.as_str() {
            "demo" => Ok(Self::Demo),
            "balances" => Ok(Self::Balances),
            "settle" => Ok(Self::Settle),
            "report" => Ok(Self::Report),
            "help" | "-h" | "--help" => Ok(Self::Help),
            "add-member" => match rest {
                [name] => Ok(Self::AddMember {
                    name: name.clone(),
                    email: None,
                }),
                [name, email] => Ok(Self::AddMember {
                    name: name.clone(),
                    email: Some(email.clone()),
                }),
                _ => Err(usage_error("add-member takes a name and an optional email")),
            },
            "add-expense" => Self::parse_add_expense(rest),
            other => Err(usage_error(&format!("Unknown command '{other}'"))),
        }
    }

    fn parse_add_expense(rest: &[String]) -> AppResult<Self> {
        let mut positional = Vec::new();
        let mut description = String::new();
        let mut iter = rest.iter();
        while let Some(arg) = iter.next() {
            if arg == "--desc" {
                description = iter
                    .next()
                    .ok_or_else(|| usage_error("--desc needs a value"))?
                    .clone();
            } else {
                positional.push(arg.clone());
            }
        }

        let [payer, amount, participants @ ..] = positional.as_slice() else {
            return Err(usage_error("add-expense needs a payer and an amount"));
        };
        let amount = amount
            .parse::<Decimal>()
            .map_err(|_| AppError::Validation(format!("'{amount}' is not a valid amount")))?;

        Ok(Self::AddExpense {
            payer: payer.clone(),
            amount,
            participants: participants.to_vec(),
            description,
        })
    }

    /// Executes the command and returns the lines to print.
    ///
    /// # Errors
    ///
    /// Returns ledger, storage or lookup errors.
    pub fn run(self, store: &JsonLedgerStore) -> AppResult<Vec<String>> {
        match self {
            Self::Help => Ok(USAGE.lines().map(str::to_string).collect()),
            Self::Demo => Ok(full_report(&demo_ledger()?)?),
            Self::AddMember { name, email } => {
                let mut ledger = store.load_or_default()?;
                let input = match email {
                    Some(email) => CreateMemberInput::new(name).with_email(email),
                    None => CreateMemberInput::new(name),
                };
                let member = ledger.add_member(input)?;
                let line = format!("Added member {} ({})", member.name, member.id);
                store.save(&ledger)?;
                Ok(vec![line])
            }
            Self::AddExpense {
                payer,
                amount,
                participants,
                description,
            } => {
                let mut ledger = store.load_or_default()?;
                let payer_id = resolve(&ledger, &payer)?;
                let participant_ids = participants
                    .iter()
                    .map(|reference| resolve(&ledger, reference))
                    .collect::<AppResult<Vec<_>>>()?;
                if participant_ids.is_empty() {
                    warn!("Expense has no participants and will not affect balances");
                }

                let expense = ledger.add_expense(
                    CreateExpenseInput::new(payer_id, amount, participant_ids)
                        .with_description(description),
                )?;
                let line = format!(
                    "Added expense {} of {} split {} ways",
                    expense.id,
                    format_amount(expense.amount),
                    expense.participants.len()
                );
                store.save(&ledger)?;
                Ok(vec![line])
            }
            Self::Balances => {
                let ledger = store.load_or_default()?;
                let balances = ledger.net_balances()?;
                Ok(balance_lines(&ledger, &balances))
            }
            Self::Settle => {
                let ledger = store.load_or_default()?;
                let plan = ledger.settlement_plan()?;
                info!(transfers = plan.len(), "Settlement plan computed");
                Ok(settlement_lines(&ledger, &plan))
            }
            Self::Report => {
                let ledger = store.load_or_default()?;
                Ok(full_report(&ledger)?)
            }
        }
    }
}

fn resolve(ledger: &Ledger, reference: &str) -> AppResult<MemberId> {
    ledger
        .find_member(reference)
        .map(|member| member.id)
        .ok_or_else(|| AppError::NotFound(format!("No member named or identified by '{reference}'")))
}

/// Alice pays a 120.00 dinner for three, Bob a 45.50 taxi for two.
fn demo_ledger() -> AppResult<Ledger> {
    let mut ledger = Ledger::new();
    let alice = ledger.add_member(CreateMemberInput::new("Alice"))?.id;
    let bob = ledger.add_member(CreateMemberInput::new("Bob"))?.id;
    let charlie = ledger.add_member(CreateMemberInput::new("Charlie"))?.id;

    ledger.add_expense(
        CreateExpenseInput::new(alice, Decimal::new(12000, 2), vec![alice, bob, charlie])
            .with_description("Dinner"),
    )?;
    ledger.add_expense(
        CreateExpenseInput::new(bob, Decimal::new(4550, 2), vec![alice, bob])
            .with_description("Taxi"),
    )?;
    Ok(ledger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn temp_store() -> (TempDir, JsonLedgerStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonLedgerStore::new(dir.path().join("data.json"), true);
        (dir, store)
    }

    fn run(store: &JsonLedgerStore, list: &[&str]) -> AppResult<Vec<String>> {
        Command::parse(&args(list))?.run(store)
    }

    #[rstest]
    #[case(&[], Command::Help)]
    #[case(&["demo"], Command::Demo)]
    #[case(&["balances"], Command::Balances)]
    #[case(&["settle"], Command::Settle)]
    #[case(&["report"], Command::Report)]
    #[case(&["--help"], Command::Help)]
    #[case(&["add-member", "Alice"], Command::AddMember { name: "Alice".into(), email: None })]
    fn test_parse_simple(#[case] input: &[&str], #[case] expected: Command) {
        assert_eq!(Command::parse(&args(input)).unwrap(), expected);
    }

    #[test]
    fn test_parse_add_expense() {
        let command =
            Command::parse(&args(&["add-expense", "Bob", "45.50", "Alice", "--desc", "Taxi", "Bob"]))
                .unwrap();
        assert_eq!(
            command,
            Command::AddExpense {
                payer: "Bob".into(),
                amount: dec!(45.50),
                participants: vec!["Alice".into(), "Bob".into()],
                description: "Taxi".into(),
            }
        );
    }

    #[rstest]
    #[case(&["frobnicate"])]
    #[case(&["add-member"])]
    #[case(&["add-member", "a", "b", "c"])]
    #[case(&["add-expense", "Bob"])]
    #[case(&["add-expense", "Bob", "lots", "Alice"])]
    #[case(&["add-expense", "Bob", "10", "--desc"])]
    fn test_parse_rejects(#[case] input: &[&str]) {
        let err = Command::parse(&args(input)).unwrap_err();
        assert_eq!(err.exit_code(), 65);
    }

    #[test]
    fn test_demo_report() {
        let (_dir, store) = temp_store();
        let lines = run(&store, &["demo"]).unwrap();

        assert!(lines.contains(&"Alice: 57.25".to_string()));
        assert!(lines.contains(&"Bob: -17.25".to_string()));
        assert!(lines.contains(&"Charlie: -40.00".to_string()));
        assert!(lines.contains(&"Charlie -> Alice: 40.00".to_string()));
        assert!(lines.contains(&"Bob -> Alice: 17.25".to_string()));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_add_then_report() {
        let (_dir, store) = temp_store();
        run(&store, &["add-member", "Alice"]).unwrap();
        run(&store, &["add-member", "Bob", "bob@example.com"]).unwrap();
        run(&store, &["add-expense", "alice", "30", "Alice", "Bob", "--desc", "Lunch"]).unwrap();

        assert_eq!(
            run(&store, &["balances"]).unwrap(),
            vec!["Alice: 15.00", "Bob: -15.00"]
        );
        assert_eq!(run(&store, &["settle"]).unwrap(), vec!["Bob -> Alice: 15.00"]);
    }

    #[test]
    fn test_unknown_participant() {
        let (_dir, store) = temp_store();
        run(&store, &["add-member", "Alice"]).unwrap();

        let err = run(&store, &["add-expense", "Alice", "10", "Zed"]).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(store.load().unwrap().expense_count(), 0);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let (_dir, store) = temp_store();
        run(&store, &["add-member", "Alice"]).unwrap();

        let err = run(&store, &["add-expense", "Alice", "-5", "Alice"]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_empty_store_reports_nothing() {
        let (_dir, store) = temp_store();
        assert!(run(&store, &["balances"]).unwrap().is_empty());
        assert!(run(&store, &["settle"]).unwrap().is_empty());
    }

    #[test]
    fn test_oversized_amounts_report_an_error() {
        let (_dir, store) = temp_store();
        run(&store, &["add-member", "Alice"]).unwrap();
        run(&store, &["add-member", "Bob"]).unwrap();
        for _ in 0..2 {
            run(&store, &["add-expense", "Alice", "40000000000000000000000000000", "Bob"]).unwrap();
        }

        for command in ["balances", "settle", "report"] {
            let err = run(&store, &[command]).unwrap_err();
            assert_eq!(err.exit_code(), 65, "{command}");
        }
    }
}
