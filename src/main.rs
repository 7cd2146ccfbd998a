//! splitledger CLI
//!
//! Compute group balances and suggested transfers from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Per-member balances for a group snapshot
//! splitledger balances --input group.json
//!
//! # Balances plus "who pays whom", as JSON
//! splitledger simplify --input group.json --format json
//!
//! # Zero-decimal currency
//! splitledger simplify --input group.json --scale 0
//!
//! # Generate a random group for testing
//! splitledger generate --members 6 --expenses 40 --output group.json
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use splitledger::prelude::*;
use splitledger::simulation::random_group::{generate_random_group, GroupConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use thiserror::Error;

#[derive(Parser)]
#[command(
    name = "splitledger",
    version,
    about = "Group expense balances and debt simplification"
)]
struct Cli {
    /// JSON file with engine settings (`tolerance`, `scale`).
    #[arg(long, global = true, env = "SPLITLEDGER_CONFIG")]
    config: Option<PathBuf>,

    /// Number of decimal places in output. Without --config the tolerance
    /// becomes one minor unit.
    #[arg(long, global = true)]
    scale: Option<u32>,

    /// Amounts at or below this are treated as zero.
    #[arg(long, global = true)]
    tolerance: Option<Decimal>,

    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show each member's paid, owed and net totals.
    Balances(ReportArgs),
    /// Show balances and the simplified list of transfers.
    Simplify(ReportArgs),
    /// Generate a random group snapshot.
    Generate(GenerateArgs),
}

#[derive(Args)]
struct ReportArgs {
    /// Path to a JSON group snapshot.
    #[arg(long)]
    input: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Args)]
struct GenerateArgs {
    #[arg(long, default_value_t = 5)]
    members: usize,

    #[arg(long, default_value_t = 20)]
    expenses: usize,

    #[arg(long, default_value_t = 0)]
    settlements: usize,

    /// Seed for a reproducible group.
    #[arg(long)]
    seed: Option<u64>,

    /// Write to file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("cannot write '{path}': {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid JSON in '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// JSON output schema for a member balance.
#[derive(serde::Serialize)]
struct BalanceOutput<'a> {
    member: &'a str,
    name: &'a str,
    total_paid: Decimal,
    total_owed: Decimal,
    net: Decimal,
    status: BalanceStatus,
}

/// JSON output schema for a suggested transfer.
#[derive(serde::Serialize)]
struct TransferOutput<'a> {
    from: &'a str,
    from_name: &'a str,
    to: &'a str,
    to_name: &'a str,
    amount: Decimal,
}

#[derive(serde::Serialize)]
struct ReportOutput<'a> {
    total_spent: Decimal,
    balances: Vec<BalanceOutput<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transfers: Option<Vec<TransferOutput<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_outstanding: Option<Decimal>,
}

fn resolve_config(cli: &Cli) -> Result<EngineConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_json_str(&read_file(path)?)?,
        None => EngineConfig::default(),
    };
    if let Some(scale) = cli.scale {
        config = config.with_scale(scale)?;
        // A tolerance from the settings file wins over the derived one.
        if cli.config.is_none() {
            config.tolerance = config.minor_unit();
        }
    }
    if let Some(tolerance) = cli.tolerance {
        config = config.with_tolerance(tolerance);
    }
    config.validate()?;
    log::debug!("tolerance {} at scale {}", config.tolerance, config.scale);
    Ok(config)
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn load_snapshot(path: &Path) -> Result<GroupSnapshot, CliError> {
    let content = read_file(path)?;
    GroupSnapshot::from_json_str(&content).map_err(|source| CliError::Json {
        path: path.display().to_string(),
        source,
    })
}

fn cmd_report(
    args: &ReportArgs,
    config: &EngineConfig,
    with_transfers: bool,
) -> Result<(), CliError> {
    let snapshot = load_snapshot(&args.input)?;
    let engine = SettlementEngine::new(config.clone())?;
    let report = engine.compute_group_debts(
        &snapshot.members,
        &snapshot.expenses,
        &snapshot.settlements,
    )?;
    let spent = total_spent(&snapshot.expenses)?;

    match args.format {
        Format::Json => {
            let balances: Vec<BalanceOutput<'_>> = report
                .balances()
                .iter()
                .map(|b| {
                    let rounded = b.rounded(config);
                    BalanceOutput {
                        member: b.member.as_str(),
                        name: report.name_of(&b.member),
                        total_paid: rounded.total_paid,
                        total_owed: rounded.total_owed,
                        net: rounded.net,
                        status: b.status(config),
                    }
                })
                .collect();
            let transfers: Option<Vec<TransferOutput<'_>>> = with_transfers.then(|| {
                report
                    .debts()
                    .iter()
                    .map(|d| TransferOutput {
                        from: d.from.as_str(),
                        from_name: report.name_of(&d.from),
                        to: d.to.as_str(),
                        to_name: report.name_of(&d.to),
                        amount: d.amount,
                    })
                    .collect()
            });
            let output = ReportOutput {
                total_spent: config.round(spent),
                balances,
                transfers,
                total_outstanding: with_transfers.then(|| report.total_outstanding()),
            };
            let json = serde_json::to_string_pretty(&output).map_err(|source| CliError::Json {
                path: "<stdout>".to_string(),
                source,
            })?;
            println!("{}", json);
        }
        Format::Text => {
            println!("Total spent:    {}\n", config.round(spent));
            if with_transfers {
                println!("{}", report);
            } else {
                for balance in report.balances() {
                    let rounded = balance.rounded(config);
                    println!(
                        "  {:<20} {:>12}  [{}]",
                        report.name_of(&balance.member),
                        rounded.net,
                        balance.status(config)
                    );
                }
            }
        }
    }
    Ok(())
}

fn cmd_generate(args: &GenerateArgs) -> Result<(), CliError> {
    let config = GroupConfig {
        member_count: args.members,
        expense_count: args.expenses,
        settlement_count: args.settlements,
        seed: args.seed,
        ..Default::default()
    };
    let snapshot = generate_random_group(&config);
    let json = serde_json::to_string_pretty(&snapshot).map_err(|source| CliError::Json {
        path: "<generated>".to_string(),
        source,
    })?;

    match &args.output {
        Some(path) => {
            fs::write(path, &json).map_err(|source| CliError::Write {
                path: path.display().to_string(),
                source,
            })?;
            eprintln!(
                "Generated {} expenses and {} settlements across {} members → {}",
                snapshot.expenses.len(),
                snapshot.settlements.len(),
                snapshot.members.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Balances(args) => cmd_report(args, &resolve_config(cli)?, false),
        Command::Simplify(args) => cmd_report(args, &resolve_config(cli)?, true),
        Command::Generate(args) => cmd_generate(args),
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(err) = run(&cli) {
        match &err {
            CliError::Ledger(ledger) if ledger.is_integrity_fault() => {
                eprintln!("The group records are out of sync: {}", ledger);
                eprintln!("Reload the group's members, expenses and settlements together and retry.");
            }
            _ => eprintln!("Error: {}", err),
        }
        process::exit(1);
    }
}
