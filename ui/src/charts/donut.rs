use std::cell::Cell;
use std::rc::Rc;

use dioxus::prelude::*;
use serde_json::Value;

use crate::core::events::ChartFilters;
use crate::core::format;
use crate::core::layout::{self, LayoutOutcome};
use crate::core::palette::{ColorScale, PLACEHOLDER_FILL};
use crate::core::state::{ChartConfig, FilterableChart};
use crate::t;

use super::{
    play, sector_path, toggle_all, toggle_one, use_breakpoint, ChartLegend, ChartTooltip,
    TooltipState,
};

/// Drawn slice for the current animation frame.
struct SliceView {
    category: String,
    count: f64,
    percent: f64,
    path: String,
    color: String,
    class_name: String,
}

#[component]
pub fn DonutChart(
    id: String,
    data: ReadOnlySignal<Vec<Value>>,
    #[props(default)] color_scale: ColorScale,
    #[props(default)] unit: String,
    #[props(default)] title: String,
    on_set_chart_filters: Option<EventHandler<ChartFilters>>,
    on_randomize_click: Option<EventHandler<String>>,
) -> Element {
    let mut chart = {
        let id = id.clone();
        let scale = color_scale.clone();
        use_signal(move || FilterableChart::new(id, ChartConfig::donut(), scale))
    };
    let progress = use_signal(|| 0.0_f64);
    let mut tooltip = use_signal(|| Option::<TooltipState>::None);
    let breakpoint = use_breakpoint();
    let drawn_at = use_hook(|| Rc::new(Cell::new(*breakpoint.peek())));

    // Parents may hand over an equal dataset on every render; only a real
    // change rebuilds the legend.
    let rows = use_memo(move || data());
    use_effect(move || {
        let rows = rows.read().clone();
        let ticket = chart.write().set_data(&rows);
        play(chart, progress, ticket);
    });

    use_effect(use_reactive((&color_scale,), move |(color_scale,)| {
        let ticket = chart.write().set_color_scale(color_scale);
        play(chart, progress, ticket);
    }));

    use_effect(move || {
        let current = breakpoint();
        if drawn_at.replace(current) != current {
            let ticket = chart.write().on_breakpoint_change();
            play(chart, progress, ticket);
        }
    });

    use_drop(move || {
        if let Ok(mut state) = chart.try_write() {
            state.machine_mut().cancel();
        }
    });

    let Some(bp) = breakpoint() else {
        tracing::warn!(chart = %id, "no drawable area; skipping render");
        return rsx! {};
    };

    let size = bp.chart_size();
    let outer = size / 2.0 - 4.0;
    let state = chart.read();
    let inner = outer * state.config().inner_radius_ratio;
    let projected = state.projected();
    let outcome = layout::arc_layout(&projected, state.legend(), state.config().pad_angle);
    let frame = progress();

    let slices: Vec<SliceView> = outcome
        .shapes()
        .iter()
        .filter_map(|slice| {
            let (start, end) = slice.at(frame);
            sector_path(&slice.category, inner, outer, start, end).map(|path| SliceView {
                category: slice.category.clone(),
                count: slice.count,
                percent: slice.percent,
                path,
                color: slice.color.clone(),
                class_name: slice.class_name.clone(),
            })
        })
        .collect();

    let placeholder = match &outcome {
        LayoutOutcome::Placeholder => layout::ring_path(inner, outer).ok(),
        LayoutOutcome::Shapes { .. } => None,
    };
    let total = format::format_with_unit(outcome.total(), &unit);
    let legend = state.legend().clone();
    drop(state);

    let view_box = format!("{} {} {size} {size}", -size / 2.0, -size / 2.0);

    rsx! {
        figure { class: "chart chart--donut", id: "{id}",
            if !title.is_empty() {
                figcaption { class: "chart__title", "{title}" }
            }
            div { class: "chart__canvas",
                svg {
                    class: "chart__svg",
                    width: "{size}",
                    height: "{size}",
                    view_box: "{view_box}",
                    role: "img",
                    if let Some(ring) = placeholder {
                        path { class: "chart__placeholder", d: "{ring}", fill: PLACEHOLDER_FILL }
                    }
                    g { class: "chart__slices",
                        for slice in slices {
                            path {
                                key: "{slice.category}",
                                class: "chart__slice {slice.class_name}",
                                d: "{slice.path}",
                                fill: "{slice.color}",
                                onmouseenter: {
                                    let (category, count, percent) = (slice.category.clone(), slice.count, slice.percent);
                                    move |evt: MouseEvent| tooltip.set(Some(TooltipState::at(&category, count, percent, &evt)))
                                },
                                onmousemove: {
                                    let (category, count, percent) = (slice.category.clone(), slice.count, slice.percent);
                                    move |evt: MouseEvent| tooltip.set(Some(TooltipState::at(&category, count, percent, &evt)))
                                },
                                onmouseleave: move |_| tooltip.set(None),
                                onclick: {
                                    let category = slice.category.clone();
                                    move |_| {
                                        if let Some(handler) = on_set_chart_filters {
                                            handler.call(ChartFilters::clicked(category.clone()));
                                        }
                                    }
                                },
                            }
                        }
                    }
                    text { class: "chart__total", text_anchor: "middle", dy: "-0.2em", "{total}" }
                    text { class: "chart__total-label", text_anchor: "middle", dy: "1.2em", {t!("chart-total-label")} }
                }
                ChartTooltip { state: tooltip(), unit: unit.clone() }
            }
            ChartLegend {
                legend,
                on_toggle: move |key: String| toggle_one(chart, progress, &key, on_set_chart_filters),
                on_toggle_all: move |_| toggle_all(chart, progress, on_set_chart_filters, on_randomize_click),
            }
        }
    }
}
