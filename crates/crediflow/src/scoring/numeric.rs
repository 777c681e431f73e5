//! Defensive numeric helpers shared by the loader, extractor, and engine.
//!
//! The parse-or-default-to-zero coercion is deliberate policy, not an
//! oversight: ledger exports routinely carry blank or garbled cells, and a
//! scoring request must degrade silently to a best-effort score instead of
//! failing. Keeping the coercion in one place keeps that policy testable.

/// Parse a numeric field, coercing missing, unparsable, or non-finite
/// input to 0.0.
pub(crate) fn parse_or_zero(raw: Option<&str>) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Clamp into the unit interval. Adding 0.0 normalizes an IEEE negative
/// zero (e.g. from summing an empty iterator), which `clamp` would
/// otherwise pass through and render as "-0.00".
pub(crate) fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0) + 0.0
}

/// Mean of a slice, or `default` when empty.
pub(crate) fn mean_or(values: &[f64], default: f64) -> f64 {
    if values.is_empty() {
        default
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Population standard deviation with a floor of 1 so it is always a safe
/// divisor. Fewer than two data points is defined as 1.
pub(crate) fn stddev_floor_one(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 1.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64;
    variance.sqrt().max(1.0)
}

/// Substitute 1.0 for an exactly-zero denominator.
pub(crate) fn non_zero(value: f64) -> f64 {
    if value == 0.0 {
        1.0
    } else {
        value
    }
}
