use dioxus::prelude::*;

use crate::results::{DisplayModel, ReportExportButton};

/// Headline, confidence and remedies for one prediction.
#[component]
pub fn ResultSummary(model: DisplayModel) -> Element {
    let (tone, icon) = if model.is_healthy {
        ("result-line--healthy", "✓")
    } else {
        ("result-line--disease", "!")
    };
    let headline = model.headline();
    let bar_style = format!("width: {:.2}%", model.bar_width);

    rsx! {
        div { class: "result-summary",
            div { class: "result-line {tone}",
                span { class: "result-line__icon", "{icon}" }
                span { class: "result-line__text", "{headline}" }
            }

            div { class: "confidence",
                div { class: "confidence__label", {crate::t!("result-confidence")} }
                div { class: "confidence__value", "{model.confidence}" }
            }

            div { class: "confidence-bar",
                div { class: "confidence-bar__outer",
                    div { class: "confidence-bar__inner", style: "{bar_style}" }
                }
                div { class: "confidence-bar__small", "{model.confidence}" }
            }

            div { class: "remedies",
                h4 { {crate::t!("result-remedies-heading")} }
                ul {
                    for remedy in model.remedies.iter() {
                        li { "{remedy}" }
                    }
                }
            }

            ReportExportButton { model: model.clone() }
        }
    }
}
