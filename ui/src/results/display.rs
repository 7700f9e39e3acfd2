//! Pure mapping from a prediction to what the result card shows.

use crate::core::format::{bar_width, format_confidence};
use crate::core::label::parse_label;
use crate::core::remedies::remedies_for;

/// Derived on every render; never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayModel {
    pub crop_name: String,
    pub disease_name: String,
    pub is_healthy: bool,
    pub confidence: String,
    pub bar_width: f64,
    pub remedies: Vec<String>,
    pub image: Option<String>,
}

impl DisplayModel {
    /// `None` when there is no label to show yet.
    pub fn build(raw_label: &str, confidence: f64, image: Option<String>) -> Option<Self> {
        let parsed = parse_label(raw_label)?;
        let remedies = remedies_for(Some(&parsed.disease))
            .iter()
            .map(|r| r.to_string())
            .collect();

        Some(Self {
            crop_name: parsed.crop,
            disease_name: parsed.disease,
            is_healthy: parsed.healthy,
            confidence: format_confidence(confidence),
            bar_width: bar_width(confidence),
            remedies,
            image,
        })
    }

    /// Disease as shown in the headline: healthy leaves read "Healthy".
    pub fn display_disease(&self) -> &str {
        if self.is_healthy {
            "Healthy"
        } else {
            &self.disease_name
        }
    }

    pub fn headline(&self) -> String {
        format!("{} - {}", self.crop_name, self.display_disease())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::format::MISSING;

    #[test]
    fn late_blight_scenario() {
        let model = DisplayModel::build("Tomato___Late_blight", 0.9423, None).unwrap();
        assert_eq!(model.crop_name, "Tomato");
        assert_eq!(model.disease_name, "Late blight");
        assert!(!model.is_healthy);
        assert_eq!(model.confidence, "94.23%");
        assert_eq!(
            model.remedies,
            vec![
                "Use systemic fungicide".to_string(),
                "Remove heavily infected plants immediately".to_string()
            ]
        );
        assert_eq!(model.headline(), "Tomato - Late blight");
    }

    #[test]
    fn healthy_scenario() {
        let model = DisplayModel::build("Tomato___healthy", 0.99, None).unwrap();
        assert!(model.is_healthy);
        assert_eq!(model.display_disease(), "Healthy");
        assert_eq!(
            model.remedies,
            vec!["Plant appears healthy — monitor regularly".to_string()]
        );
    }

    #[test]
    fn nan_confidence_shows_placeholder_and_empty_bar() {
        let model = DisplayModel::build("Tomato___Leaf_Mold", f64::NAN, None).unwrap();
        assert_eq!(model.confidence, MISSING);
        assert_eq!(model.bar_width, 0.0);
    }

    #[test]
    fn empty_label_renders_nothing() {
        assert!(DisplayModel::build("", 0.5, None).is_none());
    }

    #[test]
    fn image_is_carried_through() {
        let model =
            DisplayModel::build("Tomato___healthy", 0.5, Some("data:image/png;base64,".into()))
                .unwrap();
        assert_eq!(model.image.as_deref(), Some("data:image/png;base64,"));
    }
}
