//! Command-line front end for the paysheet core.
//!
//! Each mutating command runs the same flow the data-entry form did:
//! validate the fields, resolve the role through the fixed-employee table,
//! compute pay, mutate the store, save the sheet. Query commands only read
//! the loaded store.

mod input;
mod logging;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::warn;

use paysheet_core::models::title_case;
use paysheet_core::{
    PayCalculator, PayInput, PayPolicy, PaymentRecord, PaysheetConfig, Period, RecordStore,
};

/// Record and compute employee work-shift payments backed by a CSV sheet.
///
/// Pay is the role's daily rate × days worked, plus the extra amount
/// (uplifted by 10% under the extended policy), minus any advance
/// (extended policy only, floored at zero).
#[derive(Parser, Debug)]
#[command(name = "paysheet")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "paysheet.toml")]
    config: PathBuf,

    /// Sheet file to operate on (defaults to the configured path)
    #[arg(short, long)]
    sheet: Option<PathBuf>,

    /// Calculation policy override: "simple" or "extended"
    #[arg(short, long)]
    policy: Option<String>,

    #[command(subcommand)]
    command: Command,
}

/// The data-entry fields shared by `add` and `edit`.
#[derive(Args, Debug, Clone)]
struct EntryArgs {
    /// Employee name
    #[arg(long)]
    name: String,

    /// Role; may be omitted for fixed employees, whose role is forced
    #[arg(long, default_value = "")]
    role: String,

    /// Days worked
    #[arg(long)]
    days: u32,

    /// Extra bonus amount
    #[arg(long, default_value = "0")]
    extra: String,

    /// Reason for the bonus (required when an extra amount is entered)
    #[arg(long, default_value = "")]
    reason: String,

    /// Advance already paid out; only used under the extended policy
    #[arg(long, default_value = "0")]
    advance: String,

    /// Record date as day/month/year (defaults to today)
    #[arg(long)]
    date: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Append a new payment record and save the sheet
    Add(EntryArgs),

    /// Replace the record at the given position and save the sheet
    Edit {
        /// Zero-based position of the record to replace
        index: usize,
        #[command(flatten)]
        entry: EntryArgs,
    },

    /// Delete the record at the given position and save the sheet
    Remove {
        /// Zero-based position of the record to delete
        index: usize,
    },

    /// Print every record with its position
    List,

    /// Print gross, net and advance totals for the whole sheet
    Totals,

    /// Print the records for one employee
    ForName { name: String },

    /// Print the records entered on one date (day/month/year)
    ForDate { date: String },

    /// Print the distinct dates present in the sheet, ascending
    Dates,

    /// Print totals grouped by calendar period
    Report {
        /// "week" or "month"
        #[arg(long, default_value = "month")]
        period: String,
    },
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let config = PaysheetConfig::load(&cli.config)
        .with_context(|| format!("failed to load config: {}", cli.config.display()))?;

    let policy = match &cli.policy {
        Some(value) => PayPolicy::parse(value).with_context(|| {
            format!("unknown policy '{value}' (expected 'simple' or 'extended')")
        })?,
        None => config.policy,
    };
    let sheet_path = cli.sheet.clone().unwrap_or_else(|| config.sheet_path.clone());

    let mut store = RecordStore::load(&sheet_path, policy)
        .with_context(|| format!("failed to load sheet: {}", sheet_path.display()))?;

    match cli.command {
        Command::Add(entry) => {
            let record = build_record(&config, policy, &entry)?;
            println!("Added: {}", render_row(&record));
            store.append(record);
            save_sheet(&store, &sheet_path)?;
        }
        Command::Edit { index, entry } => {
            let record = build_record(&config, policy, &entry)?;
            store
                .update_at(index, record)
                .context("cannot edit: no record at that position")?;
            println!("Updated record {index}.");
            save_sheet(&store, &sheet_path)?;
        }
        Command::Remove { index } => {
            let removed = store
                .remove_at(index)
                .context("cannot delete: no record at that position")?;
            println!("Removed: {}", render_row(&removed));
            save_sheet(&store, &sheet_path)?;
        }
        Command::List => {
            for (index, record) in store.records().iter().enumerate() {
                println!("{index:>3}  {}", render_row(record));
            }
            let totals = store.totals();
            println!("Total a receber: R${:.2}", totals.net_sum);
        }
        Command::Totals => {
            let totals = store.totals();
            println!("Gross total:   R${:.2}", totals.gross_sum);
            println!("Advance total: R${:.2}", totals.advance_sum);
            println!("Net total:     R${:.2}", totals.net_sum);
        }
        Command::ForName { name } => {
            for record in store.records_for_name(&name) {
                println!("{}", render_row(record));
            }
        }
        Command::ForDate { date } => {
            let date = input::parse_date(&date)?;
            for record in store.records_for_date(date) {
                println!("{}", render_row(record));
            }
        }
        Command::Dates => {
            for date in store.distinct_dates() {
                println!("{}", date.format(input::DATE_FORMAT));
            }
        }
        Command::Report { period } => {
            let period = Period::parse(&period)
                .with_context(|| format!("unknown period '{period}' (expected 'week' or 'month')"))?;
            for (label, totals) in store.group_by_period(period) {
                println!(
                    "{label}  gross R${:.2}  advances R${:.2}  net R${:.2}",
                    totals.gross_sum, totals.advance_sum, totals.net_sum
                );
            }
        }
    }

    Ok(())
}

/// Validate the entry fields, resolve the role, compute pay and assemble
/// the record. The store is untouched if anything here fails.
fn build_record(
    config: &PaysheetConfig,
    policy: PayPolicy,
    entry: &EntryArgs,
) -> Result<PaymentRecord> {
    let name = input::require_name(&entry.name)?;
    let role = config.fixed_employees.resolve(name, entry.role.trim());
    let role = input::require_role(&role)?.to_string();

    let extra_amount = input::parse_amount("extra amount", &entry.extra)?;
    input::require_reason(extra_amount, &entry.reason)?;
    let advance_amount = input::parse_amount("advance amount", &entry.advance)?;
    if policy == PayPolicy::Simple && advance_amount > Decimal::ZERO {
        warn!(%advance_amount, "advance ignored: the simple policy has no advance concept");
    }
    let advance_amount = match policy {
        PayPolicy::Simple => Decimal::ZERO,
        PayPolicy::Extended => advance_amount,
    };

    let date = match &entry.date {
        Some(value) => input::parse_date(value)?,
        None => Local::now().date_naive(),
    };

    let calculator = PayCalculator::new(&config.rates, policy);
    let amounts = calculator.calculate(&PayInput {
        role: role.clone(),
        days_worked: entry.days,
        extra_amount,
        advance_amount,
    })?;

    Ok(PaymentRecord {
        date,
        name: title_case(name),
        role,
        days_worked: entry.days,
        extra_amount,
        extra_reason: entry.reason.trim().to_string(),
        advance_amount,
        gross_pay: amounts.gross_pay,
        net_pay: amounts.net_pay,
    })
}

fn render_row(record: &PaymentRecord) -> String {
    format!(
        "{} | {} | {} | {} dias | R${:.2} a receber",
        record.date.format(input::DATE_FORMAT),
        record.name,
        record.role,
        record.days_worked,
        record.net_pay
    )
}

fn save_sheet(
    store: &RecordStore,
    path: &Path,
) -> Result<()> {
    store
        .save(path)
        .with_context(|| format!("failed to save sheet: {}", path.display()))
}
