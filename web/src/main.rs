use dioxus::logger::tracing::{debug, Level};
use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::views::{Home, Predict};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Home {},
    #[route("/upload")]
    Predict {},
    #[route("/:..segments")]
    PageNotFound { segments: Vec<String> },
}

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn nav_home(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Home {},
        "{label}"
    })
}
fn nav_predict(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Predict {},
        "{label}"
    })
}
fn nav_start(label: &str) -> Element {
    rsx!(Link {
        class: "button button--primary",
        to: Route::Predict {},
        "{label}"
    })
}

fn main() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("logger already initialised: {err}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    {
        ui::i18n::init();
        register_nav(NavBuilder {
            home: nav_home,
            predict: nav_predict,
            start: nav_start,
        });
    }

    let lang_code = use_signal(ui::i18n::current_language);
    use_context_provider(|| lang_code);

    rsx! {
        document::Title { "AgriPredAI" }
        document::Style { "{MAIN_CSS_INLINE}" }

        div {
            key: "{lang_code()}",
            Router::<Route> {}
        }
    }
}

/// A web-specific Router around the shared navbar component
/// which allows us to use the web-specific `Route` enum.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar { }
        Outlet::<Route> {}
    }
}

/// Unknown paths land back on the home view.
#[component]
fn PageNotFound(segments: Vec<String>) -> Element {
    let nav = navigator();
    use_effect(move || {
        debug!("redirecting unknown path /{}", segments.join("/"));
        let _ = nav.replace(Route::Home {});
    });
    rsx! {}
}
