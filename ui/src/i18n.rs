//! Localized strings for chart chrome (legend controls, tooltips, placeholders).
//!
//! `i18n-embed` selects the language and loads bundles, `rust-embed` compiles
//! the `.ftl` files into the binary and `i18n-embed-fl` checks keys at compile
//! time through the [`t!`](crate::t) macro.
//!
//! ```text
//! i18n.toml
//! i18n/
//!   en-US/chartroom-ui.ftl   (fallback/reference)
//!   es-ES/chartroom-ui.ftl
//! ```
//!
//! Desktop builds ask the OS for preferred languages; web builds read
//! `navigator.languages`.
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl;

/// Translation lookup through the shared loader.
///
/// ```ignore
/// t!("legend-toggle-all")
/// t!("chart-total", total = "20")
/// ```
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fluent domain; the fallback file is `i18n/en-US/{DOMAIN}.ftl`.
const DOMAIN: &str = "chartroom-ui";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = "en-US".parse().expect("valid fallback language identifier");
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

/// Load bundles for the user's preferred languages (idempotent).
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        if let Err(err) = i18n_embed::select(&*LOADER, &Localizations, &requested) {
            tracing::warn!(%err, "failed selecting languages; continuing with fallback");
        }
    });
}

/// Switch language at runtime. Unparsable tags are ignored.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let lang: LanguageIdentifier = match tag.parse() {
        Ok(l) => l,
        Err(_) => return Ok(()),
    };
    i18n_embed::select(&*LOADER, &Localizations, &[lang]).map(|_| ())
}

/// Embedded language tags, sorted.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_language_is_present() {
        assert!(available_languages().iter().any(|l| l == "en-US"));
    }

    #[test]
    fn unknown_language_keeps_current_bundle() {
        init();
        let before = fl!(&*LOADER, "legend-toggle-all");
        let _ = set_language("zz-ZZ");
        let after = fl!(&*LOADER, "legend-toggle-all");
        assert_eq!(before, after);
    }
}
