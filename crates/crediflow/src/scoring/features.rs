//! Feature extraction: turn raw ledger records into the monthly
//! aggregates and classified subsets the index and risk calculators
//! consume. Grouping keys are opaque month prefixes; records without a
//! date drop out of monthly grouping but still count toward per-record
//! averages and totals.

use super::domain::{IncomeRecord, TransactionKind, TransactionRecord};
use super::numeric::{mean_or, stddev_floor_one};
use std::collections::BTreeMap;

/// Debit categories treated as high-risk spending, matched exactly
/// (case-insensitive) against the category field.
const HIGH_RISK_CATEGORIES: [&str; 8] = [
    "gambling",
    "liquor",
    "alcohol",
    "entertainment",
    "luxury",
    "betting",
    "personal expense",
    "food & fuel",
];

/// Per-month credit/debit sums for one subject's bank activity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MonthlyBankActivity {
    pub credit: f64,
    pub debit: f64,
}

impl MonthlyBankActivity {
    pub fn net_savings(&self) -> f64 {
        self.credit - self.debit
    }
}

/// Aggregates derived from one subject's ledgers. Built fresh per scoring
/// request and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    pub avg_monthly_income: f64,
    pub avg_daily_income: f64,
    pub avg_daily_expense: f64,
    pub monthly_income_stddev: f64,
    pub monthly_income_sums: Vec<f64>,
    pub avg_monthly_savings: f64,
    pub monthly_net_savings: Vec<f64>,
    pub transaction_months: usize,
    pub total_transactions: usize,
    pub credit_transactions: usize,
    pub emi_transactions: usize,
    pub avg_monthly_emi: f64,
    pub high_risk_debit_amount: f64,
    pub total_debit_amount: f64,
    pub irregular_transactions: usize,
}

pub fn extract(transactions: &[TransactionRecord], income: &[IncomeRecord]) -> FeatureSet {
    // Income side.
    let daily_incomes: Vec<f64> = income.iter().map(|r| r.net_daily_income).collect();
    let daily_expenses: Vec<f64> = income.iter().map(|r| r.fuel_expense).collect();

    let mut monthly_income: BTreeMap<&str, f64> = BTreeMap::new();
    for record in income {
        if let Some(month) = record.month_key() {
            *monthly_income.entry(month).or_insert(0.0) += record.net_daily_income;
        }
    }
    let monthly_income_sums: Vec<f64> = monthly_income.values().copied().collect();

    // Transaction side.
    let mut monthly_bank: BTreeMap<&str, MonthlyBankActivity> = BTreeMap::new();
    for record in transactions {
        if let Some(month) = record.month_key() {
            let entry = monthly_bank.entry(month).or_default();
            match record.kind {
                TransactionKind::Credit => entry.credit += record.amount,
                TransactionKind::Debit => entry.debit += record.amount,
            }
        }
    }
    let monthly_net_savings: Vec<f64> = monthly_bank
        .values()
        .map(MonthlyBankActivity::net_savings)
        .collect();
    let transaction_months = monthly_bank.len();

    let emi_total: f64 = transactions
        .iter()
        .filter(|r| is_emi_category(&r.category))
        .map(|r| r.amount)
        .sum();
    let emi_transactions = transactions
        .iter()
        .filter(|r| is_emi_category(&r.category))
        .count();

    let debits = transactions
        .iter()
        .filter(|r| r.kind == TransactionKind::Debit);
    let mut total_debit_amount = 0.0;
    let mut high_risk_debit_amount = 0.0;
    for record in debits {
        total_debit_amount += record.amount;
        if is_high_risk_category(&record.category) {
            high_risk_debit_amount += record.amount;
        }
    }

    FeatureSet {
        avg_monthly_income: mean_or(&monthly_income_sums, 1.0),
        avg_daily_income: mean_or(&daily_incomes, 1.0),
        avg_daily_expense: mean_or(&daily_expenses, 1.0),
        monthly_income_stddev: stddev_floor_one(&monthly_income_sums),
        monthly_income_sums,
        // Defaults to 0 with no observed months: savings strength needs
        // evidence, and the empty-input score baseline depends on it.
        avg_monthly_savings: mean_or(&monthly_net_savings, 0.0),
        monthly_net_savings,
        transaction_months,
        total_transactions: transactions.len(),
        credit_transactions: transactions
            .iter()
            .filter(|r| r.kind == TransactionKind::Credit)
            .count(),
        emi_transactions,
        avg_monthly_emi: emi_total / transaction_months.max(1) as f64,
        high_risk_debit_amount,
        total_debit_amount,
        irregular_transactions: transactions
            .iter()
            .filter(|r| is_irregular_category(&r.category))
            .count(),
    }
}

/// EMI-related spend; the "loan emi" label is covered by the plain "emi"
/// substring.
fn is_emi_category(category: &str) -> bool {
    category.to_lowercase().contains("emi")
}

fn is_high_risk_category(category: &str) -> bool {
    let lowered = category.to_lowercase();
    HIGH_RISK_CATEGORIES.contains(&lowered.as_str())
}

/// Savings transfers are treated as irregular outflows: money moved out
/// without a clear spending category.
fn is_irregular_category(category: &str) -> bool {
    category.to_lowercase().contains("savings transfer")
}
