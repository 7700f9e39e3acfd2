use dioxus::prelude::*;

use crate::components::start_link;

#[cfg(debug_assertions)]
fn log_home_render(lang: &str) {
    tracing::trace!("home render (lang_marker={lang})");
}

/// Landing view: headline, short pitch and a call-to-action into the upload flow.
#[component]
pub fn Home() -> Element {
    // Subscribe to global language code (if provided) so we re-render on change.
    let _lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_current = _lang_code
        .as_ref()
        .map(|s| s())
        .unwrap_or_else(|| "en-US".to_string());

    #[cfg(debug_assertions)]
    {
        log_home_render(&_lang_current);
    }

    let cta = start_link(&crate::t!("home-cta"));

    rsx! {
        section { class: "page page-home",
            div { class: "hero",
                div { class: "hero__copy",
                    span { class: "hero__tag", {crate::t!("home-tag")} }
                    h1 { class: "hero__title",
                        span { class: "hero__title-accent", {crate::t!("home-title-crop")} }
                        " "
                        span { {crate::t!("home-title-disease")} }
                        br {}
                        span { {crate::t!("home-title-detection")} }
                        " "
                        span { class: "hero__title-accent", {crate::t!("home-title-ai")} }
                    }
                    p { class: "hero__subtitle", {crate::t!("home-subtitle")} }
                    if let Some(cta) = cta {
                        div { class: "hero__cta", {cta} }
                    }
                }
                div { class: "hero__graphic", aria_hidden: "true",
                    div { class: "hero__leaf", "🌱" }
                    span { class: "hero__graphic-tag", {crate::t!("home-graphic-tag")} }
                }
            }
        }
    }
}
