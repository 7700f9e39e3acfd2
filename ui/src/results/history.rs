use dioxus::prelude::*;

use crate::{
    core::{format::format_confidence, history::PredictionRecord},
    results::history_stamp,
};

#[component]
pub fn HistoryPanel(
    records: Vec<PredictionRecord>,
    on_select: EventHandler<PredictionRecord>,
    on_clear: EventHandler<()>,
) -> Element {
    rsx! {
        section { class: "history",
            div { class: "history__header",
                h4 { {crate::t!("history-heading")} }
                div { class: "history__actions",
                    button {
                        r#type: "button",
                        class: "button button--small",
                        onclick: move |_| on_clear.call(()),
                        {crate::t!("history-clear")}
                    }
                }
            }

            if records.is_empty() {
                p { class: "history__empty", {crate::t!("history-empty")} }
            } else {
                div { class: "history__list",
                    for record in records.into_iter() {
                        {render_history_item(record, on_select)}
                    }
                }
            }
        }
    }
}

fn render_history_item(
    record: PredictionRecord,
    on_select: EventHandler<PredictionRecord>,
) -> Element {
    let title = format!("{} — {}", record.crop, record.disease);
    let confidence = format_confidence(record.confidence);
    let stamp = history_stamp(&record);
    let thumb = record.image.clone();
    let key = record.id.to_string();

    rsx! {
        button {
            key: "{key}",
            r#type: "button",
            class: "history__item",
            onclick: move |_| on_select.call(record.clone()),

            div { class: "history__thumb",
                if let Some(src) = thumb {
                    img { src: "{src}", alt: "" }
                } else {
                    div { class: "history__no-thumb", {crate::t!("history-no-image")} }
                }
            }
            div { class: "history__meta",
                div { class: "history__title", "{title}" }
                div { class: "history__confidence", "{confidence}" }
                div { class: "history__time", "{stamp}" }
            }
        }
    }
}
