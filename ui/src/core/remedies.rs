//! Static remedy suggestions keyed by disease keyword.
//!
//! Matching is a lower-cased substring test against each key in declaration
//! order; the first hit wins. A disease name containing two keys therefore
//! resolves to whichever appears first in [`REMEDIES`].

pub const REMEDIES: &[(&str, &[&str])] = &[
    (
        "early blight",
        &[
            "Remove infected leaves and debris",
            "Use copper-based fungicide",
            "Avoid overhead watering",
        ],
    ),
    (
        "late blight",
        &[
            "Use systemic fungicide",
            "Remove heavily infected plants immediately",
        ],
    ),
    ("healthy", &["Plant appears healthy — monitor regularly"]),
];

/// Returned when the disease matches no key.
pub const UNMATCHED: &[&str] = &["Inspect severity and consult local agronomist."];

/// Returned when no disease name is available at all.
pub const NO_DISEASE: &[&str] = &["No recommendation available."];

pub fn remedies_for(disease: Option<&str>) -> &'static [&'static str] {
    let Some(disease) = disease.filter(|d| !d.is_empty()) else {
        return NO_DISEASE;
    };

    let lower = disease.to_lowercase();
    REMEDIES
        .iter()
        .find(|(key, _)| lower.contains(key))
        .map(|(_, actions)| *actions)
        .unwrap_or(UNMATCHED)
}
