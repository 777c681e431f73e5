use super::super::features::FeatureSet;
use super::super::numeric::{clamp01, non_zero};
use serde::{Deserialize, Serialize};

/// Months earning below this fraction of the monthly average count as
/// low-income months.
const LOW_INCOME_FRACTION: f64 = 0.70;

/// The five risk ratios, each clamped to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskRatios {
    pub income_risk: f64,
    pub debt_ratio: f64,
    pub spending_risk: f64,
    pub transaction_risk: f64,
    pub behavioral_risk: f64,
}

pub(crate) fn compute(features: &FeatureSet) -> RiskRatios {
    let threshold = LOW_INCOME_FRACTION * features.avg_monthly_income;
    let low_income_months = features
        .monthly_income_sums
        .iter()
        .filter(|sum| **sum < threshold)
        .count();
    let income_risk = clamp01(
        low_income_months as f64 / features.monthly_income_sums.len().max(1) as f64,
    );

    let debt_ratio = clamp01(features.avg_monthly_emi / non_zero(features.avg_monthly_income));

    let spending_risk =
        clamp01(features.high_risk_debit_amount / non_zero(features.total_debit_amount));

    let transaction_risk = clamp01(
        features.irregular_transactions as f64 / features.total_transactions.max(1) as f64,
    );

    let negative_saving_months = features
        .monthly_net_savings
        .iter()
        .filter(|net| **net < 0.0)
        .count();
    let behavioral_risk = clamp01(
        negative_saving_months as f64 / features.monthly_net_savings.len().max(1) as f64,
    );

    RiskRatios {
        income_risk,
        debt_ratio,
        spending_risk,
        transaction_risk,
        behavioral_risk,
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::features::extract;
    use super::*;

    #[test]
    fn empty_features_carry_no_risk() {
        let risks = compute(&extract(&[], &[]));
        assert_eq!(risks.income_risk, 0.0);
        assert_eq!(risks.debt_ratio, 0.0);
        assert_eq!(risks.spending_risk, 0.0);
        assert_eq!(risks.transaction_risk, 0.0);
        assert_eq!(risks.behavioral_risk, 0.0);
    }

    #[test]
    fn income_risk_counts_months_below_seventy_percent() {
        let mut features = extract(&[], &[]);
        features.monthly_income_sums = vec![1000.0, 1000.0, 500.0, 900.0];
        features.avg_monthly_income = 850.0; // threshold 595
        let risks = compute(&features);
        assert_eq!(risks.income_risk, 0.25);
    }

    #[test]
    fn spending_risk_denominator_floors_with_no_debits() {
        let mut features = extract(&[], &[]);
        features.high_risk_debit_amount = 0.0;
        features.total_debit_amount = 0.0;
        assert_eq!(compute(&features).spending_risk, 0.0);
    }

    #[test]
    fn debt_ratio_clamps_heavy_emi_load() {
        let mut features = extract(&[], &[]);
        features.avg_monthly_emi = 5000.0;
        features.avg_monthly_income = 2000.0;
        assert_eq!(compute(&features).debt_ratio, 1.0);
    }

    #[test]
    fn behavioral_risk_counts_negative_saving_months() {
        let mut features = extract(&[], &[]);
        features.monthly_net_savings = vec![500.0, -100.0, -50.0, 200.0];
        assert_eq!(compute(&features).behavioral_risk, 0.5);
    }
}
