use dioxus::prelude::*;

#[component]
pub fn Home() -> Element {
    // Subscribe to the global language code (if provided) so we re-render on change.
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let lang = lang_code.as_ref().map(|s| s()).unwrap_or_else(|| "en-US".to_string());
    tracing::debug!(%lang, "home render");

    rsx! {
        section { class: "page page-home",
            h1 { {crate::t!("home-title")} }
            p { {crate::t!("home-intro")} }

            ul { class: "page-home__features",
                li { {crate::t!("home-feature-donut")} }
                li { {crate::t!("home-feature-radial")} }
                li { {crate::t!("home-feature-race")} }
            }
            p { class: "page-home__cta",
                {crate::t!("home-cta")}
            }
        }
    }
}
