//! Formatting helpers for presenting prediction values.

/// Placeholder shown wherever a value cannot be displayed.
pub const MISSING: &str = "—";

/// `0.9423` → `Some("94.23")`. Non-finite input yields `None`.
pub fn confidence_percent(confidence: f64) -> Option<String> {
    confidence
        .is_finite()
        .then(|| format!("{:.2}", confidence * 100.0))
}

/// Percentage label with a `%` suffix, or the missing placeholder.
pub fn format_confidence(confidence: f64) -> String {
    confidence_percent(confidence)
        .map(|pct| format!("{pct}%"))
        .unwrap_or_else(|| MISSING.to_string())
}

/// Fill width for the confidence bar, clamped to `[0, 100]` even though the label is not.
pub fn bar_width(confidence: f64) -> f64 {
    if confidence.is_finite() {
        (confidence * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}
