//! Parsing of classifier labels of the form `<Crop>___<Disease>`.

/// Separator between crop and disease in a raw label.
pub const DELIMITER: &str = "___";

/// Crop name used when the label carries none.
pub const UNKNOWN_CROP: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLabel {
    pub crop: String,
    pub disease: String,
    pub healthy: bool,
}

/// Split a raw label once on [`DELIMITER`]. Empty input yields `None`.
///
/// Everything after the first delimiter belongs to the disease; underscores in
/// either half become spaces.
pub fn parse_label(raw: &str) -> Option<ParsedLabel> {
    if raw.is_empty() {
        return None;
    }

    let (crop, disease) = match raw.split_once(DELIMITER) {
        Some((crop, rest)) => {
            let crop = humanize(crop);
            let crop = if crop.trim().is_empty() {
                UNKNOWN_CROP.to_string()
            } else {
                crop
            };
            (crop, humanize(rest))
        }
        None => (UNKNOWN_CROP.to_string(), raw.to_string()),
    };

    let healthy = is_healthy(&disease);
    Some(ParsedLabel {
        crop,
        disease,
        healthy,
    })
}

pub fn is_healthy(disease: &str) -> bool {
    disease.to_lowercase().contains("healthy")
}

fn humanize(segment: &str) -> String {
    segment.replace('_', " ")
}
