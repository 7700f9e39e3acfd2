//! Shared UI crate for AgriPredAI. Classification logic and views live here;
//! the platform shells only own routing and window setup.

pub mod core;
pub mod i18n;
pub mod results;
pub mod views;

pub mod components {
    // Localized application navbar (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::start_link;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}
