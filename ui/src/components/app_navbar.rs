use crate::core::storage;
use crate::i18n;
use crate::t;
use dioxus::prelude::*;
use once_cell::sync::OnceCell;

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");
const NAVBAR_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/navbar.css"
));

/// Platform crates register a `NavBuilder` so the shared navbar can render
/// localized `Link`s without knowing each platform's `Route` enum. Each
/// closure receives the localized label and returns a link containing it.
///
/// ```ignore
/// register_nav(NavBuilder {
///     home: |label| rsx!( Link { class: "navbar__link", to: Route::Home {}, "{label}" } ),
///     dashboard: |label| rsx!( Link { class: "navbar__link", to: Route::Dashboard {}, "{label}" } ),
/// });
/// ```
pub struct NavBuilder {
    pub home: fn(label: &str) -> Element,
    pub dashboard: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

/// Dark-mode flag shared through context. The platform root provides it via
/// [`use_dark_mode_provider`]; the navbar flips and persists it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DarkMode(pub Signal<bool>);

impl DarkMode {
    pub fn enabled(&self) -> bool {
        *self.0.read()
    }

    pub fn theme_class(&self) -> &'static str {
        if self.enabled() {
            "app theme-dark"
        } else {
            "app theme-light"
        }
    }
}

/// Read the stored preference once and provide it to the subtree.
pub fn use_dark_mode_provider() -> DarkMode {
    use_context_provider(|| DarkMode(Signal::new(storage::load_dark_mode())))
}

#[component]
pub fn AppNavbar(children: Element) -> Element {
    i18n::init();

    let mut current_lang = use_signal(|| "en-US".to_string());
    let langs = use_signal(i18n::available_languages);
    let show_switcher = langs().len() > 1;
    let lang_code_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_marker = lang_code_ctx.as_ref().map(|c| c()).unwrap_or_default();
    let dark_mode: Option<DarkMode> = try_use_context::<DarkMode>();

    tracing::debug!(lang = %_lang_marker, "navbar render");

    let on_change = move |evt: dioxus::events::FormEvent| {
        let val = evt.value();
        match i18n::set_language(&val) {
            Ok(()) => {
                current_lang.set(val.clone());
                if let Some(mut code) = lang_code_ctx {
                    code.set(val);
                }
            }
            Err(err) => tracing::warn!(%err, lang = %val, "language switch failed"),
        }
    };

    let on_toggle_theme = move |_: MouseEvent| {
        let Some(DarkMode(mut flag)) = dark_mode else {
            return;
        };
        let next = !flag();
        flag.set(next);
        if let Err(err) = storage::save_dark_mode(next) {
            tracing::warn!(%err, "could not persist dark-mode preference");
        }
    };

    let internal_nav: Option<Element> = NAV_BUILDER.get().map(|b| {
        let home = (b.home)(&t!("nav-home"));
        let dashboard = (b.dashboard)(&t!("nav-dashboard"));
        rsx! {
            nav { class: "navbar__links",
                {home}
                {dashboard}
            }
        }
    });

    let tagline = t!("tagline");
    let theme_label = match dark_mode {
        Some(mode) if mode.enabled() => t!("theme-light"),
        _ => t!("theme-dark"),
    };

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{NAVBAR_CSS_INLINE}" }
        }

        header {
            id: "navbar",
            class: "navbar",
            div { style: "display:none", "{_lang_marker}" }
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", "Chartroom" }
                    }
                    span { class: "navbar__brand-subtitle", "{tagline}" }
                }

                if let Some(nav) = internal_nav {
                    {nav}
                } else {
                    nav { class: "navbar__links", {children} }
                }

                div { class: "navbar__actions",
                    if dark_mode.is_some() {
                        button {
                            r#type: "button",
                            class: "button button--ghost navbar__theme-toggle",
                            onclick: on_toggle_theme,
                            "{theme_label}"
                        }
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
}
