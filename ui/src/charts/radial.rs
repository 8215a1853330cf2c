use std::cell::Cell;
use std::f64::consts::PI;
use std::rc::Rc;

use dioxus::prelude::*;
use serde_json::Value;

use crate::core::events::ChartFilters;
use crate::core::layout;
use crate::core::palette::{ColorScale, PLACEHOLDER_FILL};
use crate::core::state::{ChartConfig, FilterableChart};

use super::{
    play, sector_path, toggle_all, toggle_one, use_breakpoint, ChartLegend, ChartTooltip,
    TooltipState,
};

/// Longest bar sweeps three quarters of the circle.
const MAX_SWEEP: f64 = 1.5 * PI;

struct TrackView {
    category: String,
    count: f64,
    percent: f64,
    track: Option<String>,
    bar: Option<String>,
    color: String,
    class_name: String,
    label_y: f64,
}

/// Concentric radial bars. Hidden categories keep their track with a zero
/// bar so rows do not jump around.
#[component]
pub fn RadialChart(
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
        use_signal(move || FilterableChart::new(id, ChartConfig::radial(), scale))
    };
    let progress = use_signal(|| 0.0_f64);
    let mut tooltip = use_signal(|| Option::<TooltipState>::None);
    let breakpoint = use_breakpoint();
    let drawn_at = use_hook(|| Rc::new(Cell::new(*breakpoint.peek())));

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
    let outcome = layout::radial_layout(&projected, state.legend(), inner, outer, MAX_SWEEP);
    let frame = progress();

    let tracks: Vec<TrackView> = outcome
        .shapes()
        .iter()
        .map(|bar| TrackView {
            category: bar.category.clone(),
            count: bar.count,
            percent: bar.percent,
            track: sector_path(&bar.category, bar.inner_radius, bar.outer_radius, 0.0, MAX_SWEEP),
            bar: sector_path(
                &bar.category,
                bar.inner_radius,
                bar.outer_radius,
                0.0,
                bar.sweep_at(frame),
            ),
            color: bar.color.clone(),
            class_name: bar.class_name.clone(),
            label_y: -(bar.inner_radius + bar.outer_radius) / 2.0,
        })
        .collect();

    let placeholder = outcome
        .is_placeholder()
        .then(|| layout::ring_path(inner, outer).ok())
        .flatten();
    let legend = state.legend().clone();
    drop(state);

    let view_box = format!("{} {} {size} {size}", -size / 2.0, -size / 2.0);

    rsx! {
        figure { class: "chart chart--radial", id: "{id}",
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
                    for track in tracks {
                        g { key: "{track.category}", class: "chart__track {track.class_name}",
                            if let Some(d) = track.track {
                                path { class: "chart__track-bg", d: "{d}" }
                            }
                            if let Some(d) = track.bar {
                                path {
                                    class: "chart__bar",
                                    d: "{d}",
                                    fill: "{track.color}",
                                    onmouseenter: {
                                        let (category, count, percent) = (track.category.clone(), track.count, track.percent);
                                        move |evt: MouseEvent| tooltip.set(Some(TooltipState::at(&category, count, percent, &evt)))
                                    },
                                    onmousemove: {
                                        let (category, count, percent) = (track.category.clone(), track.count, track.percent);
                                        move |evt: MouseEvent| tooltip.set(Some(TooltipState::at(&category, count, percent, &evt)))
                                    },
                                    onmouseleave: move |_| tooltip.set(None),
                                    onclick: {
                                        let category = track.category.clone();
                                        move |_| {
                                            if let Some(handler) = on_set_chart_filters {
                                                handler.call(ChartFilters::clicked(category.clone()));
                                            }
                                        }
                                    },
                                }
                            }
                            text {
                                class: "chart__track-label",
                                x: "-6",
                                y: "{track.label_y}",
                                text_anchor: "end",
                                dominant_baseline: "middle",
                                "{track.category}"
                            }
                        }
                    }
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
