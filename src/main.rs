//! Ledger P&L CLI
//!
//! Records transactions into a CSV ledger and prints statements and summaries.
//!
//! # Usage
//!
//! ```bash
//! ledger-pnl classify --direction outflow "请客户吃饭"
//! ledger-pnl add ledger.csv --date 2024-03-15 --direction inflow --amount 1000 --note "销售3月货款"
//! ledger-pnl statement ledger.csv --year 2024 --month 3 --month 4
//! ledger-pnl summary ledger.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use ledger_pnl::{
    summary, Amount, Classifier, Config, Direction, EngineError, EntryMode, Ledger, Period,
    Result, Transaction,
};
use log::info;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "ledger-pnl", version, about = "Transaction classifier and P&L statement builder")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the category a note would be classified as
    Classify {
        #[arg(long)]
        direction: Direction,
        note: String,
    },

    /// Append a transaction to a ledger file, creating it if needed
    Add {
        ledger: PathBuf,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        direction: Direction,
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "")]
        note: String,
        /// Category chosen by hand; required in personal mode
        #[arg(long)]
        category: Option<String>,
        #[arg(long, value_enum, default_value_t = Mode::Business)]
        mode: Mode,
    },

    /// Print the profit statement for a year, optionally restricted to months
    Statement {
        ledger: PathBuf,
        #[arg(long)]
        year: i32,
        #[arg(long = "month", value_parser = clap::value_parser!(u32).range(1..=12))]
        months: Vec<u32>,
    },

    /// Print income/expense totals and per-category breakdowns
    Summary { ledger: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Business,
    Personal,
}

impl From<Mode> for EntryMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Business => EntryMode::Business,
            Mode::Personal => EntryMode::Personal,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let classifier = config.classifier()?;

    match cli.command {
        Command::Classify { direction, note } => {
            println!("{}", classifier.classify(direction, &note));
        }
        Command::Add {
            ledger,
            date,
            direction,
            amount,
            note,
            category,
            mode,
        } => {
            let amount =
                Amount::parse_non_negative(&amount).ok_or(EngineError::InvalidAmount(amount))?;
            let category = resolve_category(&classifier, mode.into(), direction, &note, category)?;

            // Any unreadable row aborts before the file is rewritten.
            let mut book = if ledger.exists() {
                let file = File::open(&ledger)?;
                Ledger::read_csv_strict(BufReader::new(file), Some(&classifier))?
            } else {
                Ledger::new()
            };
            book.append(Transaction::new(date, direction, category.clone(), amount, note));
            book.save(&ledger)?;

            info!("Ledger {} now has {} records", ledger.display(), book.len());
            println!("Recorded: {}", category);
        }
        Command::Statement {
            ledger,
            year,
            months,
        } => {
            let book = load_ledger(&ledger, &classifier)?;
            let period = Period::months(year, months);
            let statement = config.statement_builder().build(&book.snapshot(), &period);
            statement.write_csv(io::stdout().lock())?;
        }
        Command::Summary { ledger } => {
            let book = load_ledger(&ledger, &classifier)?;
            summary::write_csv(&book.snapshot(), io::stdout().lock())?;
        }
    }

    Ok(())
}

fn load_ledger(path: &Path, classifier: &Classifier) -> Result<Ledger> {
    let file = File::open(path)?;
    Ledger::read_csv_with(BufReader::new(file), Some(classifier))
}

/// Picks the category for a new entry.
///
/// Business mode classifies unless a category is given by hand; personal mode
/// only accepts its own small category set.
fn resolve_category(
    classifier: &Classifier,
    mode: EntryMode,
    direction: Direction,
    note: &str,
    chosen: Option<String>,
) -> Result<String> {
    match (mode, chosen) {
        (EntryMode::Business, Some(category)) => Ok(category),
        (EntryMode::Business, None) => Ok(classifier.classify(direction, note).to_string()),
        (EntryMode::Personal, chosen) => {
            let category = chosen.unwrap_or_default();
            if mode.allows(direction, &category) {
                Ok(category)
            } else {
                Err(EngineError::InvalidCategory {
                    category,
                    mode: mode.name().to_string(),
                })
            }
        }
    }
}
