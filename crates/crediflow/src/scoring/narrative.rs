//! Narrative rendering. Purely a formatting step over an already-computed
//! breakdown, so presentation changes can never alter the score itself.

use super::engine::ScoreBreakdown;

/// Render the deterministic analysis narrative for a computed breakdown.
/// Indices and risk ratios print at two decimals, base and adjusted
/// scores at one.
pub fn render(breakdown: &ScoreBreakdown) -> String {
    let indices = &breakdown.indices;
    let risks = &breakdown.risks;

    [
        format!("Crediflow Score: {}.", breakdown.final_score),
        format!(
            "ISI={:.2} (Income Stability), SSI={:.2} (Saving Strength),",
            indices.income_stability, indices.saving_strength
        ),
        format!(
            "SBI={:.2} (Spending Behavior), RRI={:.2} (Repayment), TCI={:.2} (Transaction Credibility).",
            indices.spending_behavior, indices.repayment_reliability, indices.transaction_credibility
        ),
        format!(
            "Risk: IR={:.2}, DR={:.2}, SR={:.2}, TR={:.2}, BR={:.2} -> RF={:.2}.",
            risks.income_risk,
            risks.debt_ratio,
            risks.spending_risk,
            risks.transaction_risk,
            risks.behavioral_risk,
            breakdown.risk_factor
        ),
        format!(
            "Base={:.1}, Adjusted={:.1}.",
            breakdown.base_score, breakdown.adjusted_score
        ),
    ]
    .join(" ")
}
