//! Localized strings for the AgriPredAI screens.
//!
//! Messages live in `i18n/<lang>/agripred-ui.ftl` and are embedded at compile
//! time; `en-US` is the fallback every other locale is checked against.
//! Components look strings up through [`t!`](crate::t), which is compile-time
//! checked against the fallback bundle:
//! ```ignore
//! let footer = t!("footer-endpoint", endpoint = client.endpoint());
//! ```
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::LanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use thiserror::Error;
use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl;

/// Looks a message up in the shared loader. Arguments are passed as
/// `name = value` pairs and must match the placeholders of the message.
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

const DOMAIN: &str = "agripred-ui";
const FALLBACK: &str = "en-US";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = FALLBACK.parse().expect("valid fallback language identifier");
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

#[derive(Debug, Error, PartialEq)]
pub enum LanguageError {
    #[error("not a language tag: {0}")]
    InvalidTag(String),
    #[error("no translation bundled for {0}")]
    NotBundled(String),
    #[error("failed to load translations: {0}")]
    Load(String),
}

/// Pick the best bundled language for the user's environment. Runs once.
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        match i18n_embed::select(&*LOADER, &Localizations, &requested) {
            Ok(selected) => debug!(?selected, "translations selected"),
            Err(err) => warn!("failed selecting languages ({err}); continuing with {FALLBACK}"),
        }
    });
}

/// Switch the UI language. The current bundle stays active on error.
pub fn set_language(tag: &str) -> Result<String, LanguageError> {
    let lang: LanguageIdentifier = tag
        .parse()
        .map_err(|_| LanguageError::InvalidTag(tag.to_string()))?;
    let code = lang.to_string();
    if !available_languages().contains(&code) {
        return Err(LanguageError::NotBundled(code));
    }
    i18n_embed::select(&*LOADER, &Localizations, &[lang])
        .map_err(|err| LanguageError::Load(err.to_string()))?;
    Ok(code)
}

/// Language the loader currently resolves messages from.
pub fn current_language() -> String {
    LOADER
        .current_languages()
        .first()
        .map(|lang| lang.to_string())
        .unwrap_or_else(|| FALLBACK.to_string())
}

/// Bundled language codes, sorted.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(str::to_string))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}
