//! On-disk sheet format: one CSV file, header row, one data row per record.
//!
//! ## Columns
//!
//! Headers are matched by name when reading, so column order does not
//! matter on input; writing uses the fixed order below for the configured
//! policy.
//!
//! | Column | Simple | Extended | Type |
//! |------------------|--------|----------|----------------------------|
//! | `date` | yes | yes | `dd/mm/yyyy` |
//! | `name` | yes | yes | string, title-cased |
//! | `role` | yes | yes | string |
//! | `days_worked` | yes | yes | non-negative integer |
//! | `extra_amount` | yes | yes | decimal |
//! | `extra_reason` | yes | yes | string |
//! | `advance_amount` | no | yes | decimal, absent reads as 0 |
//! | `gross_pay` | yes | yes | decimal |
//! | `net_pay` | no | yes | decimal, absent reads as gross |
//!
//! Money cells are rounded to two decimal places before writing. Saving is
//! atomic: the sheet is written to `<path>.tmp` and renamed over the
//! target, so a failed save leaves the prior file untouched.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::calculations::common::round_half_up;
use crate::models::{PayPolicy, PaymentRecord};

/// Date format used in sheet cells, as the tool has always written them.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Columns every sheet must carry, in the order they are written.
const BASE_COLUMNS: [&str; 7] = [
    "date",
    "name",
    "role",
    "days_worked",
    "extra_amount",
    "extra_reason",
    "gross_pay",
];

/// Errors that can occur while reading or writing a sheet file.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    /// The file could not be read, written, or replaced.
    #[error("cannot access sheet file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The underlying CSV (de)serialisation failed (bad structure, type
    /// mismatch, unparseable cell).
    #[error("sheet format error: {0}")]
    Parse(#[from] csv::Error),

    /// The header row lacks a column the schema requires.
    #[error("sheet is missing required column '{0}'")]
    MissingColumn(&'static str),
}

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SheetRow {
    #[serde(deserialize_with = "deserialize_date")]
    date: NaiveDate,
    name: String,
    role: String,
    days_worked: u32,
    extra_amount: Decimal,
    extra_reason: String,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    advance_amount: Option<Decimal>,
    gross_pay: Decimal,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    net_pay: Option<Decimal>,
}

impl From<SheetRow> for PaymentRecord {
    fn from(row: SheetRow) -> Self {
        // Simple-schema sheets have no advance column; an absent advance is
        // zero and an absent net equals gross.
        let net_pay = row.net_pay.unwrap_or(row.gross_pay);
        PaymentRecord {
            date: row.date,
            name: row.name,
            role: row.role,
            days_worked: row.days_worked,
            extra_amount: row.extra_amount,
            extra_reason: row.extra_reason,
            advance_amount: row.advance_amount.unwrap_or(Decimal::ZERO),
            gross_pay: row.gross_pay,
            net_pay,
        }
    }
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(serde::de::Error::custom)
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Parse sheet text (the full file contents) into records, in file order.
///
/// # Errors
///
/// * [`SheetError::MissingColumn`] — a required header is absent.
/// * [`SheetError::Parse`] — a cell cannot be deserialised.
pub fn parse_sheet(input: &str) -> Result<Vec<PaymentRecord>, SheetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    // An entirely empty file has no headers and no rows: a valid empty sheet.
    let headers = reader.headers()?.clone();
    if !headers.is_empty() || !input.is_empty() {
        for column in BASE_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(SheetError::MissingColumn(column));
            }
        }
    }

    reader
        .deserialize::<SheetRow>()
        .map(|result| Ok(PaymentRecord::from(result?)))
        .collect()
}

/// Read a sheet file from disk. A missing file is an empty sheet, never an
/// error: the store must not treat first launch as a failure, and must not
/// clobber an existing file it failed to read.
pub fn read_sheet(path: &Path) -> Result<Vec<PaymentRecord>, SheetError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "sheet file not found, starting empty");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(SheetError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    parse_sheet(&contents)
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

fn money_cell(value: Decimal) -> String {
    round_half_up(value).to_string()
}

/// Render records as CSV text under the given policy's column set.
pub fn render_sheet(
    policy: PayPolicy,
    records: &[PaymentRecord],
) -> Result<String, SheetError> {
    let mut buf = Vec::new();
    let mut writer = csv::Writer::from_writer(&mut buf);

    match policy {
        PayPolicy::Simple => writer.write_record(BASE_COLUMNS)?,
        PayPolicy::Extended => writer.write_record([
            "date",
            "name",
            "role",
            "days_worked",
            "extra_amount",
            "extra_reason",
            "advance_amount",
            "gross_pay",
            "net_pay",
        ])?,
    }

    for record in records {
        let date = record.date.format(DATE_FORMAT).to_string();
        let days = record.days_worked.to_string();
        match policy {
            PayPolicy::Simple => writer.write_record([
                date.as_str(),
                &record.name,
                &record.role,
                &days,
                &money_cell(record.extra_amount),
                &record.extra_reason,
                &money_cell(record.gross_pay),
            ])?,
            PayPolicy::Extended => writer.write_record([
                date.as_str(),
                &record.name,
                &record.role,
                &days,
                &money_cell(record.extra_amount),
                &record.extra_reason,
                &money_cell(record.advance_amount),
                &money_cell(record.gross_pay),
                &money_cell(record.net_pay),
            ])?,
        }
    }

    writer.flush().map_err(csv::Error::from)?;
    drop(writer);

    // The writer only ever receives UTF-8 cells.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("paysheet.csv"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write the full record sequence to `path`, overwriting any existing
/// sheet. The write goes to a sibling `.tmp` file first and is renamed
/// into place, so on failure the previous sheet survives intact.
pub fn write_sheet(
    path: &Path,
    policy: PayPolicy,
    records: &[PaymentRecord],
) -> Result<(), SheetError> {
    let contents = render_sheet(policy, records)?;
    let tmp = temp_path(path);

    fs::write(&tmp, contents).map_err(|source| SheetError::Io {
        path: tmp.clone(),
        source,
    })?;

    if let Err(source) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(SheetError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
