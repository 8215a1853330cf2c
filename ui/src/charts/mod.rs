//! Chart components. Each one owns its state in a signal, commits the pure
//! layout from [`crate::core::layout`] to SVG and reports interactions upward
//! through optional event handlers.

mod donut;
mod legend;
mod race;
mod radial;
mod tooltip;
mod viewport;

pub use donut::DonutChart;
pub use legend::ChartLegend;
pub use race::RaceChart;
pub use radial::RadialChart;
pub use tooltip::{ChartTooltip, TooltipState};
pub use viewport::{use_breakpoint, ViewportRoot};

use dioxus::prelude::*;

use crate::core::events::ChartFilters;
use crate::core::layout::{self, LayoutError, FRAME_MS};
use crate::core::legend::ToggleAllOutcome;
use crate::core::platform::spawn_future;
use crate::core::redraw::RenderTicket;
use crate::core::state::{FilterableChart, LegendChange};
use crate::core::timing;

/// Step `progress` through one transition. Returns `false` as soon as
/// `current` reports the ticket was superseded.
pub(crate) async fn run_transition(
    mut progress: Signal<f64>,
    duration_ms: u64,
    current: impl Fn(u64) -> Option<f64>,
) -> bool {
    progress.set(0.0);
    let frames = timing::frame_count(duration_ms, FRAME_MS);
    for frame in 1..=frames {
        timing::sleep_ms(FRAME_MS).await;
        let elapsed = (frame * FRAME_MS).min(duration_ms);
        match current(elapsed) {
            Some(eased) => progress.set(eased),
            None => return false,
        }
    }
    true
}

/// Animate a filterable chart for `ticket`; completes the redraw unless a
/// newer one took over in the meantime.
pub(crate) fn play(mut chart: Signal<FilterableChart>, progress: Signal<f64>, ticket: Option<RenderTicket>) {
    let Some(ticket) = ticket else {
        return;
    };
    let duration_ms = chart.peek().machine().duration_ms();
    tracing::debug!(chart = %chart.peek().id(), generation = ticket.generation, trigger = ?ticket.trigger, "redraw");

    spawn_future(async move {
        let finished = run_transition(progress, duration_ms, move |elapsed| {
            chart.peek().machine().progress(ticket, elapsed)
        })
        .await;
        if finished {
            chart.write().machine_mut().complete(ticket);
        }
    });
}

/// Shared handlers for the legend of a filterable chart.
pub(crate) fn toggle_one(
    mut chart: Signal<FilterableChart>,
    progress: Signal<f64>,
    key: &str,
    on_set_chart_filters: Option<EventHandler<ChartFilters>>,
) {
    let LegendChange { filters, ticket, .. } = chart.write().toggle_legend(key);
    emit_filters(filters, on_set_chart_filters);
    play(chart, progress, ticket);
}

pub(crate) fn toggle_all(
    mut chart: Signal<FilterableChart>,
    progress: Signal<f64>,
    on_set_chart_filters: Option<EventHandler<ChartFilters>>,
    on_randomize_click: Option<EventHandler<String>>,
) {
    let LegendChange {
        outcome,
        filters,
        ticket,
    } = chart.write().toggle_all();
    emit_filters(filters, on_set_chart_filters);
    if outcome != ToggleAllOutcome::Unchanged {
        if let Some(handler) = on_randomize_click {
            handler.call(chart.peek().id().to_string());
        }
    }
    play(chart, progress, ticket);
}

fn emit_filters(filters: Option<ChartFilters>, handler: Option<EventHandler<ChartFilters>>) {
    if let (Some(filters), Some(handler)) = (filters, handler) {
        handler.call(filters);
    }
}

/// Sector path for one slice at the current frame. Zero-width slices are
/// simply not drawn yet; other failures are logged and the slice is skipped.
pub(crate) fn sector_path(category: &str, inner: f64, outer: f64, start: f64, end: f64) -> Option<String> {
    match layout::arc_path(inner, outer, start, end) {
        Ok(path) => Some(path),
        Err(LayoutError::DegenerateArc { start, end })
            if start.is_finite() && end.is_finite() && end <= start + f64::EPSILON =>
        {
            None
        }
        Err(err) => {
            tracing::warn!(category, %err, "skipping slice");
            None
        }
    }
}
