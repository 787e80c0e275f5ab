//! Policy recording.
//!
//! A policy is stored as a small text file named after its number. Writing the
//! file and advancing the sequence counter happen as one step: the counter
//! only moves once the file (and, when attached, the rate file carrying the
//! counter) has been written. Numbers whose file already exists are skipped.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};

use crate::Amount;
use crate::format::format_currency;
use crate::model::{CustomerRecord, PolicyNumber};
use crate::rates::{RateConfiguration, RatesError, save_rates};

/// Errors that can occur while recording a policy
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to write policy file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("policy {0} already exists")]
    AlreadyExists(PolicyNumber),

    #[error("policy number sequence exhausted")]
    SequenceExhausted,

    #[error("failed to persist policy counter: {0}")]
    Counter(#[source] RatesError),
}

/// Writes policy summaries into a directory.
#[derive(Debug, Clone)]
pub struct PolicyRecorder {
    dir: PathBuf,
    /// Rate file that receives the advanced counter.
    rates_file: Option<PathBuf>,
}

impl PolicyRecorder {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            rates_file: None,
        }
    }

    /// Persist the advanced policy counter to `path` on every record.
    pub fn with_rates_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.rates_file = Some(path.into());
        self
    }

    pub fn policy_path(&self, policy: PolicyNumber) -> PathBuf {
        self.dir.join(format!("Policy_{policy}.txt"))
    }

    /// Record a policy under the next free sequence number:
    /// - Write the summary file, moving past numbers whose file already exists
    /// - Persist the advanced counter, removing the summary again on failure
    /// - Advance the in-memory counter
    pub fn record_policy(
        &self,
        customer: &CustomerRecord,
        total_premium: Amount,
        rates: &mut RateConfiguration,
    ) -> Result<PolicyNumber, RecordError> {
        let mut policy = rates.next_policy_number;
        let (path, next) = loop {
            let next = policy
                .checked_add(1)
                .ok_or(RecordError::SequenceExhausted)?;
            let path = self.policy_path(policy);
            let summary = policy_summary(policy, customer, total_premium);
            match self.write_new(&path, policy, &summary) {
                Ok(()) => break (path, next),
                Err(RecordError::AlreadyExists(taken)) => {
                    warn!(
                        policy = taken,
                        path = %path.display(),
                        "policy file exists, skipping number"
                    );
                    policy = next;
                }
                Err(e) => return Err(e),
            }
        };

        if let Some(rates_file) = &self.rates_file {
            let advanced = RateConfiguration {
                next_policy_number: next,
                ..rates.clone()
            };
            if let Err(e) = save_rates(rates_file, &advanced) {
                if let Err(remove) = fs::remove_file(&path) {
                    warn!(
                        path = %path.display(),
                        reason = %remove,
                        "could not roll back policy file"
                    );
                }
                return Err(RecordError::Counter(e));
            }
        }

        rates.next_policy_number = next;
        debug!(policy, path = %path.display(), "policy file written");
        Ok(policy)
    }
}

/// Private API
impl PolicyRecorder {
    /// Write through a temporary file so a policy file is never half written
    fn write_new(
        &self,
        path: &Path,
        policy: PolicyNumber,
        contents: &str,
    ) -> Result<(), RecordError> {
        let write_err = |source: io::Error| RecordError::Write {
            path: path.to_path_buf(),
            source,
        };

        let mut file = NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        file.write_all(contents.as_bytes()).map_err(write_err)?;
        file.flush().map_err(write_err)?;

        file.persist_noclobber(path).map_err(|e| {
            if e.error.kind() == io::ErrorKind::AlreadyExists {
                RecordError::AlreadyExists(policy)
            } else {
                write_err(e.error)
            }
        })?;
        Ok(())
    }
}

/// The four-line summary stored for each policy.
pub fn policy_summary(
    policy: PolicyNumber,
    customer: &CustomerRecord,
    total_premium: Amount,
) -> String {
    format!(
        "Policy Number: {policy}\n\
         Customer: {}\n\
         Total Premium: {}\n\
         Claims: {}\n",
        customer.full_name(),
        format_currency(total_premium),
        customer.claims.len()
    )
}
