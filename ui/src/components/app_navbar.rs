use crate::i18n;
use crate::t;
use dioxus::prelude::*;
use once_cell::sync::OnceCell;
use tracing::warn;

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");
const NAVBAR_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/navbar.css"
));

/// Link builders supplied by each platform shell, so `ui` never needs the
/// shell's `Route` enum.
///
/// Each function receives the localized label and returns a `Link` that
/// already contains it, e.g.
/// ```ignore
/// register_nav(NavBuilder {
///     home: |label| rsx!( Link { class: "navbar__link", to: Route::Home {}, "{label}" } ),
///     predict: |label| rsx!( Link { class: "navbar__link", to: Route::Predict {}, "{label}" } ),
///     start: |label| rsx!( Link { class: "button button--primary", to: Route::Predict {}, "{label}" } ),
/// });
/// ```
pub struct NavBuilder {
    pub home: fn(label: &str) -> Element,
    pub predict: fn(label: &str) -> Element,
    /// Call-to-action on the landing view, pointing at the upload route.
    pub start: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

/// Landing-page call-to-action, if a shell registered one.
pub fn start_link(label: &str) -> Option<Element> {
    NAV_BUILDER.get().map(|b| (b.start)(label))
}

#[component]
pub fn AppNavbar() -> Element {
    i18n::init();

    let mut current_lang = use_signal(i18n::current_language);
    let langs = use_signal(i18n::available_languages);
    let show_switcher = langs().len() > 1;
    // Global language code signal, if the shell provided one.
    let lang_code_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_marker = lang_code_ctx.as_ref().map(|c| c()).unwrap_or_default();

    let on_change = move |evt: dioxus::events::FormEvent| {
        match i18n::set_language(&evt.value()) {
            Ok(code) => {
                current_lang.set(code.clone());
                if let Some(mut ctx) = lang_code_ctx {
                    ctx.set(code);
                }
            }
            Err(err) => warn!("language switch ignored: {err}"),
        }
    };

    let links = NAV_BUILDER.get().map(|b| {
        let home = (b.home)(&t!("nav-home"));
        let predict = (b.predict)(&t!("nav-predict"));
        rsx! {
            nav { class: "navbar__links",
                {home}
                {predict}
            }
        }
    });

    let tagline = t!("tagline");

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{NAVBAR_CSS_INLINE}" }
        }

        header {
            id: "navbar",
            class: "navbar",
            // Hidden marker keeps a dependency on the global language signal.
            div { style: "display:none", "{_lang_marker}" }
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-leaf", aria_hidden: "true", "🌿" }
                        span { class: "navbar__brand-mark", "AgriPredAI" }
                    }
                    span { class: "navbar__brand-subtitle", "{tagline}" }
                }

                if let Some(links) = links {
                    {links}
                }

                if show_switcher {
                    div { class: "navbar__locale",
                        label {
                            class: "visually-hidden",
                            r#for: "locale-select",
                            {t!("nav-language-label")}
                        }
                        select {
                            id: "locale-select",
                            value: "{current_lang()}",
                            oninput: on_change,
                            { langs().iter().map(|code| {
                                let c = code.clone();
                                rsx!{
                                    option { key: "{c}", value: "{c}", "{c}" }
                                }
                            })}
                        }
                    }
                }
            }
        }
    }
}
