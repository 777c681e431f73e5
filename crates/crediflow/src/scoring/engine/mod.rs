//! The weighted scoring model: five positive indices build a base score,
//! five risk ratios build a discount factor, and the adjusted result is
//! rounded and clamped into the published band.

mod indices;
mod risk;
mod weights;

pub use indices::TrustIndices;
pub use risk::RiskRatios;
pub use weights::ScoreWeights;

use super::features::FeatureSet;
use serde::{Deserialize, Serialize};

/// Published score band.
pub const SCORE_FLOOR: f64 = 300.0;
pub const SCORE_CEILING: f64 = 1000.0;

const BASE_SCALE: f64 = 1000.0;

/// Stateless calculator applying the fixed weighted model to a feature
/// set. Scoring is pure: identical features and loan counts always yield
/// an identical breakdown.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    weights: ScoreWeights,
}

impl ScoringEngine {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn score(&self, features: &FeatureSet, active_loans: usize) -> ScoreBreakdown {
        let w = &self.weights;

        let indices = indices::compute(features, active_loans);
        let base_score = BASE_SCALE
            * (w.income_stability * indices.income_stability
                + w.repayment_reliability * indices.repayment_reliability
                + w.spending_behavior * indices.spending_behavior
                + w.saving_strength * indices.saving_strength
                + w.transaction_credibility * indices.transaction_credibility);

        let risks = risk::compute(features);
        let risk_factor = w.income_risk * risks.income_risk
            + w.debt_ratio * risks.debt_ratio
            + w.spending_risk * risks.spending_risk
            + w.transaction_risk * risks.transaction_risk
            + w.behavioral_risk * risks.behavioral_risk;

        let adjusted_score = base_score * (1.0 - risk_factor);
        let final_score = adjusted_score.clamp(SCORE_FLOOR, SCORE_CEILING).round() as u16;

        ScoreBreakdown {
            indices,
            base_score,
            risks,
            risk_factor,
            adjusted_score,
            final_score,
        }
    }
}

/// Full numeric trail from features to the final bounded score, kept so
/// the narrative and API responses can expose every intermediate value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub indices: TrustIndices,
    pub base_score: f64,
    pub risks: RiskRatios,
    pub risk_factor: f64,
    pub adjusted_score: f64,
    pub final_score: u16,
}
