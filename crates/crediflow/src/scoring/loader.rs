//! CSV record loading for both ledger kinds.
//!
//! Loading is infallible by design: a missing file yields an empty record
//! set, an undecodable row is skipped, and numeric cells fall back to 0
//! through [`numeric::parse_or_zero`]. Scoring always proceeds on whatever
//! survives.

use super::domain::{IncomeRecord, TransactionKind, TransactionRecord};
use super::numeric;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

pub fn transactions_from_path<P: AsRef<Path>>(path: P) -> Vec<TransactionRecord> {
    match std::fs::File::open(path.as_ref()) {
        Ok(file) => transactions_from_reader(file),
        Err(err) => {
            warn!(path = %path.as_ref().display(), %err, "transaction ledger unreadable");
            Vec::new()
        }
    }
}

pub fn transactions_from_reader<R: Read>(reader: R) -> Vec<TransactionRecord> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<TransactionRow>() {
        match row {
            Ok(row) => records.push(row.into_record()),
            Err(err) => debug!(%err, "skipping undecodable transaction row"),
        }
    }

    records
}

pub fn income_from_path<P: AsRef<Path>>(path: P) -> Vec<IncomeRecord> {
    match std::fs::File::open(path.as_ref()) {
        Ok(file) => income_from_reader(file),
        Err(err) => {
            warn!(path = %path.as_ref().display(), %err, "income ledger unreadable");
            Vec::new()
        }
    }
}

pub fn income_from_reader<R: Read>(reader: R) -> Vec<IncomeRecord> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<IncomeRow>() {
        match row {
            Ok(row) => records.push(row.into_record()),
            Err(err) => debug!(%err, "skipping undecodable income row"),
        }
    }

    records
}

#[derive(Debug, Deserialize)]
struct TransactionRow {
    #[serde(default)]
    transaction_date: Option<String>,
    #[serde(default)]
    transaction_type: Option<String>,
    #[serde(default)]
    amount: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    linked_pan: Option<String>,
}

impl TransactionRow {
    fn into_record(self) -> TransactionRecord {
        TransactionRecord {
            date: self.transaction_date.unwrap_or_default(),
            kind: TransactionKind::from_raw(self.transaction_type.as_deref().unwrap_or_default()),
            amount: numeric::parse_or_zero(self.amount.as_deref()),
            category: self.category.unwrap_or_default(),
            subject_link: self.linked_pan.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct IncomeRow {
    #[serde(default)]
    work_date: Option<String>,
    #[serde(default)]
    net_daily_income: Option<String>,
    #[serde(default)]
    fuel_expense: Option<String>,
    #[serde(default)]
    pan_number: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    bank_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    account_last4: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    full_name: Option<String>,
}

impl IncomeRow {
    fn into_record(self) -> IncomeRecord {
        IncomeRecord {
            work_date: self.work_date.unwrap_or_default(),
            net_daily_income: numeric::parse_or_zero(self.net_daily_income.as_deref()),
            fuel_expense: numeric::parse_or_zero(self.fuel_expense.as_deref()),
            subject_id: self.pan_number.unwrap_or_default(),
            bank_name: self.bank_name,
            account_last4: self.account_last4,
            full_name: self.full_name,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
