use dioxus::prelude::*;

use crate::core::legend::LegendStore;
use crate::t;

/// Clickable legend. Hidden entries stay listed but render dimmed.
#[component]
pub fn ChartLegend(
    legend: LegendStore,
    on_toggle: EventHandler<String>,
    on_toggle_all: EventHandler<()>,
) -> Element {
    if legend.is_empty() {
        return rsx! {};
    }

    let all_visible = legend.visible_count() == legend.len();
    let toggle_all_label = if all_visible {
        t!("legend-hide-all")
    } else {
        t!("legend-toggle-all")
    };

    let items = legend.iter().map(|(key, entry)| {
        let class = if entry.visible {
            format!("chart-legend__item {}", entry.class_name)
        } else {
            format!("chart-legend__item chart-legend__item--hidden {}", entry.class_name)
        };
        let swatch = format!("background:{}", entry.color);
        let pressed = entry.visible.to_string();
        let label = key.to_string();
        let clicked = key.to_string();
        rsx! {
            li { key: "{label}", class: "{class}",
                button {
                    r#type: "button",
                    class: "chart-legend__button",
                    aria_pressed: "{pressed}",
                    onclick: move |_| on_toggle.call(clicked.clone()),
                    span { class: "chart-legend__swatch", style: "{swatch}", aria_hidden: "true" }
                    span { class: "chart-legend__label", "{label}" }
                }
            }
        }
    });

    rsx! {
        div { class: "chart-legend",
            ul { class: "chart-legend__items", {items} }
            button {
                r#type: "button",
                class: "button button--ghost chart-legend__toggle-all",
                onclick: move |_| on_toggle_all.call(()),
                "{toggle_all_label}"
            }
        }
    }
}
