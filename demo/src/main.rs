//! Relay Billing Reference Runtime — Demo CLI
//!
//! Runs one or all of the three billing demo scenarios. Each scenario uses
//! real Relay components (rule store, action registry, telemetry, engine)
//! wired together with demo handlers.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- invoice-overdue
//!   cargo run -p demo -- payment-failed
//!   cargo run -p demo -- ticket-escalation
//!   cargo run -p demo -- vocabulary

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use relay_contracts::vocabulary::Vocabulary;
use relay_ref_billing::{billing_vocabulary, scenarios};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Relay — automation rule engine billing demo.
///
/// Each subcommand runs one or all of the three back-office scenarios,
/// demonstrating condition evaluation, priority ordering, partial action
/// failure, dry runs, and execution telemetry.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "Relay billing reference runtime demo",
    long_about = "Runs Relay billing demo scenarios showing condition evaluation,\n\
                  priority ordering, partial action failure, dry-run testing,\n\
                  and execution telemetry."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three billing scenarios in sequence.
    RunAll,
    /// Scenario 1: Overdue invoice dunning (thresholds, VIP escalation).
    InvoiceOverdue,
    /// Scenario 2: Repeated payment failure (partial action failure).
    PaymentFailed,
    /// Scenario 3: SLA breach lifecycle (test rule, live, deactivate).
    TicketEscalation,
    /// Print the registered trigger, operator, and action listings.
    Vocabulary,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = match cli.command {
        Command::RunAll => run_all(),
        Command::InvoiceOverdue => scenarios::invoice_overdue::run_scenario(),
        Command::PaymentFailed => scenarios::payment_failed::run_scenario(),
        Command::TicketEscalation => scenarios::ticket_escalation::run_scenario(),
        Command::Vocabulary => {
            print_vocabulary();
            Ok(())
        }
    };

    match result {
        Ok(()) => {
            println!("All selected scenarios completed successfully.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

fn run_all() -> relay_contracts::error::RelayResult<()> {
    scenarios::invoice_overdue::run_scenario()?;
    scenarios::payment_failed::run_scenario()?;
    scenarios::ticket_escalation::run_scenario()?;
    Ok(())
}

// ── Listings ──────────────────────────────────────────────────────────────────

fn print_vocabulary() {
    let vocab = billing_vocabulary();

    println!("Trigger events:");
    for (key, label) in vocab.triggers() {
        println!("    {:<24} {}", key, label);
    }
    println!();
    println!("Condition operators:");
    for (key, label) in Vocabulary::operators() {
        println!("    {:<24} {}", key, label);
    }
    println!();
    println!("Action types:");
    for (key, label) in vocab.actions() {
        println!("    {:<24} {}", key, label);
    }
    println!();
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("Relay — Automation Rule Engine");
    println!("Billing Reference Demo");
    println!("==============================");
    println!();
    println!("Relay pipeline per firing:");
    println!("  [1] Fetch active rules for the trigger (priority desc, creation order on ties)");
    println!("  [2] Evaluate each rule's conditions (flat AND, coerced comparisons)");
    println!("  [3] Dispatch matched rules' actions in declaration order");
    println!("  [4] Record per-rule execution telemetry (skipped on dry runs)");
    println!();
}
