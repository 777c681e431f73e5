use super::super::features::FeatureSet;
use super::super::numeric::{clamp01, non_zero};
use serde::{Deserialize, Serialize};

/// When no EMI payments can be expected (no active loans, or no observed
/// months), reliability is assumed reasonable rather than zero.
const DEFAULT_REPAYMENT_RELIABILITY: f64 = 0.8;

/// The five positive indices, each clamped to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrustIndices {
    pub income_stability: f64,
    pub saving_strength: f64,
    pub spending_behavior: f64,
    pub repayment_reliability: f64,
    pub transaction_credibility: f64,
}

/// Derive the indices from the extracted features and the count of
/// currently active loans.
///
/// Known approximation: repayment reliability expects one EMI transaction
/// per active loan per observed month, regardless of whether the loan's
/// tenure actually overlaps the observed window. Loans outside their
/// active period therefore inflate the expected count.
pub(crate) fn compute(features: &FeatureSet, active_loans: usize) -> TrustIndices {
    let income_stability =
        clamp01(features.avg_monthly_income / (3.0 * features.monthly_income_stddev));

    let saving_strength =
        clamp01(features.avg_monthly_savings / non_zero(features.avg_monthly_income));

    let spending_behavior =
        clamp01(features.avg_daily_income / non_zero(5.0 * features.avg_daily_expense));

    let expected_emi = active_loans * features.transaction_months;
    let repayment_reliability = if expected_emi > 0 {
        clamp01(features.emi_transactions as f64 / expected_emi as f64)
    } else {
        DEFAULT_REPAYMENT_RELIABILITY
    };

    let transaction_credibility =
        clamp01(features.credit_transactions as f64 / features.total_transactions.max(1) as f64);

    TrustIndices {
        income_stability,
        saving_strength,
        spending_behavior,
        repayment_reliability,
        transaction_credibility,
    }
}
