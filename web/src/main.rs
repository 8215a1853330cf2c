use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::{use_dark_mode_provider, AppNavbar};
use ui::views::{Dashboard, Home};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Home {},
    #[route("/dashboard")]
    Dashboard {},
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
fn nav_dashboard(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Dashboard {},
        "{label}"
    })
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    let lang_code = use_signal(|| "en-US".to_string());
    use_context_provider(|| lang_code);
    let dark_mode = use_dark_mode_provider();

    register_nav(NavBuilder {
        home: nav_home,
        dashboard: nav_dashboard,
    });

    rsx! {
        document::Style { "{MAIN_CSS_INLINE}" }

        div {
            key: "{lang_code()}",
            class: "{dark_mode.theme_class()}",
            Router::<Route> {}
        }
    }
}

/// A web-specific Router around the shared navbar, using the web `Route` enum.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar { }
        Outlet::<Route> {}
    }
}
