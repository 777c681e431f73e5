use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for the individual being scored. Seed data uses
/// PAN-format strings; the engine only ever compares them for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub String);

impl SubjectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Closed transaction direction set. The wire marker is free text; anything
/// other than a literal `CREDIT` is treated as a debit so downstream
/// partitioning stays total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Credit,
    Debit,
}

impl TransactionKind {
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim() == "CREDIT" {
            Self::Credit
        } else {
            Self::Debit
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TransactionKind::Credit => "CREDIT",
            TransactionKind::Debit => "DEBIT",
        }
    }
}

/// One bank ledger row after defensive parsing. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: String,
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    pub subject_link: String,
}

impl TransactionRecord {
    pub fn month_key(&self) -> Option<&str> {
        month_key(&self.date)
    }
}

/// One daily income ledger row after defensive parsing. The identity
/// fields are optional; when present they enrich the subject profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub work_date: String,
    pub net_daily_income: f64,
    pub fuel_expense: f64,
    pub subject_id: String,
    pub bank_name: Option<String>,
    pub account_last4: Option<String>,
    pub full_name: Option<String>,
}

impl IncomeRecord {
    pub fn month_key(&self) -> Option<&str> {
        month_key(&self.work_date)
    }
}

/// Externally visible scoring outcome: the bounded composite score plus
/// its deterministic narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub final_score: u16,
    pub narrative: String,
}

/// Calendar-month grouping token: up to the first seven characters of a
/// date string, treated as opaque. The format is deliberately not
/// validated; an empty date yields no key and the record drops out of
/// monthly grouping.
pub fn month_key(date: &str) -> Option<&str> {
    if date.is_empty() {
        return None;
    }
    let end = date
        .char_indices()
        .nth(7)
        .map(|(index, _)| index)
        .unwrap_or(date.len());
    Some(&date[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_key_truncates_to_seven_chars() {
        assert_eq!(month_key("2025-03-14"), Some("2025-03"));
        assert_eq!(month_key("2025-03"), Some("2025-03"));
    }

    #[test]
    fn month_key_keeps_short_dates_opaque() {
        // Shorter strings still group; only emptiness drops a record.
        assert_eq!(month_key("2025-3"), Some("2025-3"));
        assert_eq!(month_key(""), None);
    }

    #[test]
    fn transaction_kind_defaults_to_debit() {
        assert_eq!(TransactionKind::from_raw("CREDIT"), TransactionKind::Credit);
        assert_eq!(TransactionKind::from_raw(" CREDIT "), TransactionKind::Credit);
        assert_eq!(TransactionKind::from_raw("DEBIT"), TransactionKind::Debit);
        assert_eq!(TransactionKind::from_raw("credit"), TransactionKind::Debit);
        assert_eq!(TransactionKind::from_raw("TRANSFER"), TransactionKind::Debit);
        assert_eq!(TransactionKind::from_raw(""), TransactionKind::Debit);
    }
}
