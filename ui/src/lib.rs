//! Shared UI crate for Chartroom: chart state, chart components and the
//! views both platform launchers route to.

pub mod charts;
pub mod core;
pub mod i18n;
pub mod views;

pub mod components {
    // Localized application navbar (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::use_dark_mode_provider;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::DarkMode;
    pub use app_navbar::NavBuilder;
}
