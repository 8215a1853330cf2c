#![cfg(test)]
/*!
Theme selector lint for the desktop build.

Chart components, the legend and the tooltip emit class names that must stay
in sync with the shared theme (`ui/assets/theme/main.css`). A substring check
catches renames early without parsing CSS.

When a component starts relying on a new selector, add it to
`REQUIRED_SELECTORS`.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const NAVBAR_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/styling/navbar.css"
));

/// Core selectors / tokens that must exist in the shared theme.
const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".page {",
    ".app {",
    ".theme-dark",
    ".visually-hidden",
    // Buttons
    ".button {",
    ".button--primary",
    ".button--accent",
    ".button--ghost",
    // Dashboard
    ".page-dashboard__grid",
    ".page-dashboard__datasets",
    ".viewport-root",
    // Charts
    ".chart {",
    ".chart__svg",
    ".chart__placeholder",
    ".chart__slice",
    ".chart__bar",
    ".chart__track-bg",
    ".chart__total",
    ".chart__race-bar",
    ".chart__controls",
    // Legend
    ".chart-legend__item--hidden",
    ".chart-legend__swatch",
    ".chart-legend__toggle-all",
    // Tooltip
    ".chart-tooltip {",
    ".chart-tooltip__row",
    // Responsive block
    "@media (max-width: 720px)",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let missing: Vec<&str> = REQUIRED_SELECTORS
        .iter()
        .copied()
        .filter(|sel| !THEME_CSS.contains(sel))
        .collect();

    if !missing.is_empty() {
        panic!(
            "Missing {} required CSS selectors/tokens in unified theme:\n{}",
            missing.len(),
            missing.join("\n")
        );
    }
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 4_000,
        "Embedded theme appears unexpectedly small ({non_ws_len} non-whitespace chars); \
         did the file get truncated or the path change?"
    );
}

#[test]
fn navbar_styles_cover_actions() {
    for sel in [".navbar__links", ".navbar__link", ".navbar__actions", ".navbar__locale"] {
        assert!(NAVBAR_CSS.contains(sel), "navbar.css is missing `{sel}`");
    }
}
