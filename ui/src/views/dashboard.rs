use dioxus::prelude::*;
use serde_json::Value;

use crate::charts::{DonutChart, RaceChart, RadialChart, ViewportRoot};
use crate::core::events::ChartFilters;
use crate::core::fixtures;
use crate::core::keyframes;
use crate::core::palette::ColorScale;
use crate::t;

/// Bundled datasets the donut can switch between. Each one arrives in a
/// different row shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dataset {
    BrowserShare,
    Advertisers,
    UtmSources,
}

impl Dataset {
    const ALL: [Dataset; 3] = [Self::BrowserShare, Self::Advertisers, Self::UtmSources];

    fn rows(self) -> Vec<Value> {
        match self {
            Self::BrowserShare => fixtures::latest_browser_share(),
            Self::Advertisers => fixtures::load_json("advertisers", fixtures::ADVERTISERS_JSON),
            Self::UtmSources => fixtures::load_json("utm-sources", fixtures::UTM_SOURCES_JSON),
        }
    }

    fn unit(self) -> String {
        match self {
            Self::BrowserShare => "%".to_string(),
            Self::Advertisers => t!("unit-impressions"),
            Self::UtmSources => t!("unit-visits"),
        }
    }

    fn label(self) -> String {
        match self {
            Self::BrowserShare => t!("dataset-browsers"),
            Self::Advertisers => t!("dataset-advertisers"),
            Self::UtmSources => t!("dataset-utm"),
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::BrowserShare => "browsers",
            Self::Advertisers => "advertisers",
            Self::UtmSources => "utm",
        }
    }
}

#[component]
pub fn Dashboard() -> Element {
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang = lang_code.as_ref().map(|s| s()).unwrap_or_default();

    let mut dataset = use_signal(|| Dataset::BrowserShare);
    let mut last_filters = use_signal(|| Option::<ChartFilters>::None);
    let mut last_reset = use_signal(|| Option::<String>::None);

    let donut_rows = use_memo(move || dataset().rows());
    let radial_rows = use_signal(|| fixtures::load_json("utm-sources", fixtures::UTM_SOURCES_JSON));
    let race_frames = use_signal(|| keyframes::build_keyframes(&fixtures::browser_share_observations()));

    let on_filters = move |filters: ChartFilters| {
        tracing::debug!(items = ?filters.items, legend = filters.is_legend_clicked, "chart filters");
        last_filters.set(Some(filters));
    };
    let on_reset = move |id: String| {
        tracing::debug!(chart = %id, "toggle all");
        last_reset.set(Some(id));
    };

    let filters_line = match last_filters() {
        Some(filters) if filters.is_legend_clicked => {
            t!("filters-legend", items = filters.items.join(", "))
        }
        Some(filters) => t!("filters-click", items = filters.items.join(", ")),
        None => t!("filters-none"),
    };
    let current = dataset();
    let donut_unit = current.unit();

    rsx! {
        section { class: "page page-dashboard",
            h1 { {t!("dashboard-title")} }
            p { class: "page-dashboard__intro", {t!("dashboard-intro")} }

            div { class: "page-dashboard__datasets", role: "group",
                {Dataset::ALL.into_iter().map(|choice| {
                    let key = choice.key();
                    let label = choice.label();
                    let class = if choice == current { "button button--primary" } else { "button button--ghost" };
                    rsx! {
                        button {
                            key: "{key}",
                            r#type: "button",
                            class: "{class}",
                            onclick: move |_| dataset.set(choice),
                            "{label}"
                        }
                    }
                })}
            }

            div { class: "page-dashboard__status", aria_live: "polite",
                p { "{filters_line}" }
                if let Some(id) = last_reset() {
                    p { {t!("filters-reset", chart = id)} }
                }
            }

            ViewportRoot {
                div { class: "page-dashboard__grid",
                    DonutChart {
                        id: "donut",
                        title: t!("chart-donut-title"),
                        data: donut_rows(),
                        unit: donut_unit,
                        on_set_chart_filters: on_filters,
                        on_randomize_click: on_reset,
                    }
                    RadialChart {
                        id: "radial",
                        title: t!("chart-radial-title"),
                        data: radial_rows(),
                        color_scale: ColorScale::sequential("#c7d2fe", "#3730a3"),
                        unit: t!("unit-visits"),
                        on_set_chart_filters: on_filters,
                        on_randomize_click: on_reset,
                    }
                    RaceChart {
                        id: "race",
                        title: t!("chart-race-title"),
                        frames: race_frames(),
                        unit: "%",
                    }
                }
            }
        }
    }
}
