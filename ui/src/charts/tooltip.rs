use dioxus::prelude::*;

use crate::core::format;
use crate::t;

/// What the floating tooltip shows and where (client coordinates).
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipState {
    pub category: String,
    pub count: f64,
    pub percent: f64,
    pub x: f64,
    pub y: f64,
}

impl TooltipState {
    const OFFSET: f64 = 12.0;

    pub fn at(category: &str, count: f64, percent: f64, evt: &MouseEvent) -> Self {
        let point = evt.client_coordinates();
        Self {
            category: category.to_string(),
            count,
            percent,
            x: point.x,
            y: point.y,
        }
    }

    fn style(&self) -> String {
        format!(
            "left:{:.0}px;top:{:.0}px",
            self.x + Self::OFFSET,
            self.y + Self::OFFSET
        )
    }
}

#[component]
pub fn ChartTooltip(
    #[props(!optional)] state: Option<TooltipState>,
    #[props(default)] unit: String,
) -> Element {
    let Some(state) = state else {
        return rsx! {};
    };

    let count = format::format_with_unit(state.count, &unit);
    let percent = format::format_percent(state.percent);

    rsx! {
        div { class: "chart-tooltip", role: "tooltip", style: "{state.style()}",
            div { class: "chart-tooltip__category", "{state.category}" }
            div { class: "chart-tooltip__row",
                span { class: "chart-tooltip__label", {t!("tooltip-count")} }
                span { class: "chart-tooltip__value", "{count}" }
            }
            div { class: "chart-tooltip__row",
                span { class: "chart-tooltip__label", {t!("tooltip-share")} }
                span { class: "chart-tooltip__value", "{percent}" }
            }
        }
    }
}
