//! Pipeline orchestration: resolve, load, extract, score, narrate. One
//! pass, no shared mutable state between requests, and resolution fully
//! completes before any computation starts.

use super::domain::{IncomeRecord, ScoreResult, SubjectId};
use super::engine::{ScoreBreakdown, ScoringEngine};
use super::narrative;
use super::repository::{LoanAccount, LoanRepository};
use super::resolver::DatasetResolver;
use super::{features, loader};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Service composing the resolver, loader, extractor, and engine behind a
/// single synchronous entry point.
pub struct TrustScoreService<L> {
    resolver: DatasetResolver,
    repository: Arc<L>,
    engine: ScoringEngine,
}

impl<L> TrustScoreService<L>
where
    L: LoanRepository + 'static,
{
    pub fn new(resolver: DatasetResolver, repository: Arc<L>) -> Self {
        Self::with_engine(resolver, repository, ScoringEngine::default())
    }

    pub fn with_engine(resolver: DatasetResolver, repository: Arc<L>, engine: ScoringEngine) -> Self {
        Self {
            resolver,
            repository,
            engine,
        }
    }

    /// Score one subject. The only failure is total absence of any
    /// matching dataset; every other condition degrades to a best-effort
    /// score.
    pub fn score_subject(&self, subject: &SubjectId) -> Result<ScoreReport, ScoreServiceError> {
        let datasets = self.resolver.resolve(subject);
        if datasets.is_empty() {
            return Err(ScoreServiceError::NoDataset {
                subject: subject.clone(),
            });
        }

        let transactions = datasets
            .transaction_ledger
            .as_deref()
            .map(loader::transactions_from_path)
            .unwrap_or_default();
        let income = datasets
            .income_ledger
            .as_deref()
            .map(loader::income_from_path)
            .unwrap_or_default();

        let feature_set = features::extract(&transactions, &income);
        let active_loans = self.repository.active_loan_count(subject);
        let breakdown = self.engine.score(&feature_set, active_loans);
        let narrative = narrative::render(&breakdown);

        let loan_book = self.repository.loan_book(subject);
        let profile = SubjectProfile::compose(
            &income,
            loan_book.as_ref().map(|book| book.holder_name.clone()),
        );
        let loans = loan_book.map(|book| book.loans).unwrap_or_default();

        info!(
            subject = %subject,
            final_score = breakdown.final_score,
            risk_factor = breakdown.risk_factor,
            "trust score computed"
        );

        Ok(ScoreReport {
            subject: subject.clone(),
            generated_at: Utc::now(),
            result: ScoreResult {
                final_score: breakdown.final_score,
                narrative,
            },
            breakdown,
            profile,
            loans,
        })
    }
}

/// Scoring outcome plus the subject metadata downstream reporting merges
/// in: identity details from the income ledger and the loan book.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub subject: SubjectId,
    pub generated_at: DateTime<Utc>,
    pub result: ScoreResult,
    pub breakdown: ScoreBreakdown,
    pub profile: SubjectProfile,
    pub loans: Vec<LoanAccount>,
}

/// Identity details lifted from the income ledger's leading row, with the
/// loan book's holder name as a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectProfile {
    pub full_name: Option<String>,
    pub bank_name: Option<String>,
    pub account_last4: Option<String>,
}

impl SubjectProfile {
    fn compose(income: &[IncomeRecord], holder_name: Option<String>) -> Self {
        let first = income.first();
        Self {
            full_name: first
                .and_then(|record| record.full_name.clone())
                .or(holder_name),
            bank_name: first.and_then(|record| record.bank_name.clone()),
            account_last4: first.and_then(|record| record.account_last4.clone()),
        }
    }
}

/// Error raised by the scoring service.
#[derive(Debug, thiserror::Error)]
pub enum ScoreServiceError {
    #[error("no dataset available for subject {subject}")]
    NoDataset { subject: SubjectId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_prefers_ledger_identity_over_loan_book() {
        let income = vec![IncomeRecord {
            work_date: "2025-01-05".to_string(),
            net_daily_income: 900.0,
            fuel_expense: 100.0,
            subject_id: "ABCDE1234F".to_string(),
            bank_name: Some("HDFC Bank".to_string()),
            account_last4: Some("4421".to_string()),
            full_name: Some("Rahul Sharma".to_string()),
        }];
        let profile = SubjectProfile::compose(&income, Some("Loan Book Name".to_string()));
        assert_eq!(profile.full_name.as_deref(), Some("Rahul Sharma"));
        assert_eq!(profile.bank_name.as_deref(), Some("HDFC Bank"));
    }

    #[test]
    fn profile_falls_back_to_loan_book_holder() {
        let profile = SubjectProfile::compose(&[], Some("Rohit Kulkarni".to_string()));
        assert_eq!(profile.full_name.as_deref(), Some("Rohit Kulkarni"));
        assert!(profile.bank_name.is_none());
        assert!(profile.account_last4.is_none());
    }
}
