use serde::{Deserialize, Serialize};

/// Fixed policy weights for the composite model. Each row sums to 1.0,
/// which is what keeps the aggregate risk factor inside the unit interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub income_stability: f64,
    pub repayment_reliability: f64,
    pub spending_behavior: f64,
    pub saving_strength: f64,
    pub transaction_credibility: f64,

    pub income_risk: f64,
    pub debt_ratio: f64,
    pub spending_risk: f64,
    pub transaction_risk: f64,
    pub behavioral_risk: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            income_stability: 0.30,
            repayment_reliability: 0.25,
            spending_behavior: 0.20,
            saving_strength: 0.15,
            transaction_credibility: 0.10,

            income_risk: 0.30,
            debt_ratio: 0.25,
            spending_risk: 0.20,
            transaction_risk: 0.15,
            behavioral_risk: 0.10,
        }
    }
}
