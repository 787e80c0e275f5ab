//! Rate configuration stored as `name,value` csv rows.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::warn;

use crate::Amount;
use crate::amount::{AmountParseError, Rate};
use crate::model::PolicyNumber;

/// Errors that can occur when reading or writing the rate configuration
#[derive(Debug, Error)]
pub enum RatesError {
    #[error("failed to open rate file {path}: {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: u64, source: csv::Error },

    #[error("line {line}: {key} has invalid value: {source}")]
    InvalidValue {
        line: u64,
        key: RateKey,
        source: AmountParseError,
    },

    #[error("line {line}: {key} must not be negative")]
    Negative { line: u64, key: RateKey },

    #[error("line {line}: NextPolicyNumber must be a non-negative integer, got '{value}'")]
    InvalidPolicyNumber { line: u64, value: String },

    #[error("missing required keys: {0}")]
    Missing(String),

    #[error("failed to write rate file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Names of the required configuration rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateKey {
    BasicPremium,
    Discount,
    ExtraLiability,
    GlassCoverage,
    LoanerCar,
    Hst,
    ProcessingFee,
    NextPolicyNumber,
}

impl RateKey {
    pub const ALL: [RateKey; 8] = [
        RateKey::BasicPremium,
        RateKey::Discount,
        RateKey::ExtraLiability,
        RateKey::GlassCoverage,
        RateKey::LoanerCar,
        RateKey::Hst,
        RateKey::ProcessingFee,
        RateKey::NextPolicyNumber,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RateKey::BasicPremium => "BasicPremium",
            RateKey::Discount => "Discount",
            RateKey::ExtraLiability => "ExtraLiability",
            RateKey::GlassCoverage => "GlassCoverage",
            RateKey::LoanerCar => "LoanerCar",
            RateKey::Hst => "HST",
            RateKey::ProcessingFee => "ProcessingFee",
            RateKey::NextPolicyNumber => "NextPolicyNumber",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        RateKey::ALL.into_iter().find(|k| k.name() == name)
    }
}

impl fmt::Display for RateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rates and the policy sequence counter, loaded once per process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateConfiguration {
    /// Premium for the first car.
    pub basic_premium: Amount,
    /// Discount applied to the basic premium of every additional car.
    pub discount: Rate,
    /// Per-car cost of each optional coverage.
    pub extra_liability: Amount,
    pub glass_coverage: Amount,
    pub loaner_car: Amount,
    pub hst: Rate,
    /// Charged on monthly and down-payment plans.
    pub processing_fee: Amount,
    pub next_policy_number: PolicyNumber,
    /// Rows with unrecognised names, in file order, written back on save.
    pub other_rows: Vec<(String, String)>,
}

impl RateConfiguration {
    /// Textual value of each row, in canonical order.
    pub fn rows(&self) -> impl Iterator<Item = (RateKey, String)> + '_ {
        RateKey::ALL.into_iter().map(move |key| {
            let value = match key {
                RateKey::BasicPremium => self.basic_premium.to_string(),
                RateKey::Discount => self.discount.to_string(),
                RateKey::ExtraLiability => self.extra_liability.to_string(),
                RateKey::GlassCoverage => self.glass_coverage.to_string(),
                RateKey::LoanerCar => self.loaner_car.to_string(),
                RateKey::Hst => self.hst.to_string(),
                RateKey::ProcessingFee => self.processing_fee.to_string(),
                RateKey::NextPolicyNumber => self.next_policy_number.to_string(),
            };
            (key, value)
        })
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct RateRow {
    name: String,
    value: String,
}

/// Parsed value of one row. Integers and decimals are told apart by the
/// presence of a decimal point.
enum RateValue {
    Rate(Amount),
    Counter(PolicyNumber),
}

/// Read the rate configuration from a csv file
pub fn load_rates(path: impl AsRef<Path>) -> Result<RateConfiguration, RatesError> {
    let path = path.as_ref();
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| RatesError::Open {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
    read_rates(reader)
}

/// Read the rate configuration from any csv source
pub fn read_rates<R: io::Read>(
    mut reader: csv::Reader<R>,
) -> Result<RateConfiguration, RatesError> {
    let mut values: HashMap<RateKey, RateValue> = HashMap::new();
    let mut other_rows = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|source| RatesError::Parse {
            line: source.position().map_or(0, |p| p.line()),
            source,
        })?;
        let line = record.position().map_or(0, |p| p.line());
        // Columns past the value are free-form notes
        let fields: csv::StringRecord = record.iter().take(2).collect();
        let row: RateRow = fields
            .deserialize(None)
            .map_err(|source| RatesError::Parse { line, source })?;

        let Some(key) = RateKey::from_name(&row.name) else {
            warn!(line, name = %row.name, "unknown rate kept as is");
            other_rows.push((row.name, row.value));
            continue;
        };

        let value = parse_value(line, key, &row.value)?;
        if values.insert(key, value).is_some() {
            warn!(line, key = %key, "duplicate rate overrides earlier value");
        }
    }

    let missing: Vec<&str> = RateKey::ALL
        .into_iter()
        .filter(|k| !values.contains_key(k))
        .map(RateKey::name)
        .collect();
    if !missing.is_empty() {
        return Err(RatesError::Missing(missing.join(", ")));
    }

    let rate = |key: RateKey| match values.get(&key) {
        Some(RateValue::Rate(amount)) => *amount,
        _ => Amount::ZERO,
    };
    let next_policy_number = match values.get(&RateKey::NextPolicyNumber) {
        Some(RateValue::Counter(n)) => *n,
        _ => 0,
    };

    Ok(RateConfiguration {
        basic_premium: rate(RateKey::BasicPremium),
        discount: rate(RateKey::Discount),
        extra_liability: rate(RateKey::ExtraLiability),
        glass_coverage: rate(RateKey::GlassCoverage),
        loaner_car: rate(RateKey::LoanerCar),
        hst: rate(RateKey::Hst),
        processing_fee: rate(RateKey::ProcessingFee),
        next_policy_number,
        other_rows,
    })
}

fn parse_value(line: u64, key: RateKey, value: &str) -> Result<RateValue, RatesError> {
    if key == RateKey::NextPolicyNumber {
        return value
            .parse()
            .map(RateValue::Counter)
            .map_err(|_| RatesError::InvalidPolicyNumber {
                line,
                value: value.to_string(),
            });
    }

    let amount: Amount = value
        .parse()
        .map_err(|source| RatesError::InvalidValue { line, key, source })?;
    if amount.is_negative() {
        return Err(RatesError::Negative { line, key });
    }
    Ok(RateValue::Rate(amount))
}

/// Write the rate configuration back to `path`, replacing it atomically
pub fn save_rates(path: impl AsRef<Path>, rates: &RateConfiguration) -> Result<(), RatesError> {
    let path = path.as_ref();
    let write_err = |source: io::Error| RatesError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;

    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(&mut file);
        let known = rates.rows().map(|(key, value)| (key.name().to_string(), value));
        let other = rates.other_rows.iter().cloned();
        for (name, value) in known.chain(other) {
            writer
                .serialize(RateRow { name, value })
                .map_err(|e| write_err(e.into()))?;
        }
        writer.flush().map_err(write_err)?;
    }

    file.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
