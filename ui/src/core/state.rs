//! State object owned by one filterable category chart.
//!
//! [`FilterableChart`] ties the pieces together: incoming rows are normalized,
//! the legend is rebuilt for the new categories, toggles flow through the
//! legend, and every change that needs a redraw returns a [`RenderTicket`].
//! The legend keys always equal the categories of the last normalized input.

use serde_json::Value;

use super::events::ChartFilters;
use super::layout::{self, TRANSITION_MS};
use super::legend::{LegendStore, ToggleAllOutcome, ToggleOutcome};
use super::normalize::{self, CategoryRecord};
use super::palette::ColorScale;
use super::projection::{self, ProjectionPolicy};
use super::redraw::{RedrawMachine, RedrawTrigger, RenderTicket};

/// Per-chart tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Inner radius as a fraction of the outer radius (0 draws a pie).
    pub inner_radius_ratio: f64,
    /// Gap between neighbouring slices, in radians.
    pub pad_angle: f64,
    pub transition_ms: u64,
    pub projection: ProjectionPolicy,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            inner_radius_ratio: 0.6,
            pad_angle: 0.01,
            transition_ms: TRANSITION_MS,
            projection: ProjectionPolicy::Remove,
        }
    }
}

impl ChartConfig {
    pub fn donut() -> Self {
        Self::default()
    }

    pub fn radial() -> Self {
        Self {
            inner_radius_ratio: 0.25,
            pad_angle: 0.0,
            projection: ProjectionPolicy::ZeroCount,
            ..Self::default()
        }
    }
}

/// Result of a legend interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendChange<O> {
    pub outcome: O,
    /// Filters to emit upward; `None` when nothing changed.
    pub filters: Option<ChartFilters>,
    pub ticket: Option<RenderTicket>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterableChart {
    id: String,
    config: ChartConfig,
    scale: ColorScale,
    records: Vec<CategoryRecord>,
    legend: LegendStore,
    machine: RedrawMachine,
}

impl FilterableChart {
    pub fn new(id: impl Into<String>, config: ChartConfig, scale: ColorScale) -> Self {
        let machine = RedrawMachine::new(config.transition_ms);
        Self {
            id: id.into(),
            config,
            scale,
            records: Vec::new(),
            legend: LegendStore::new(),
            machine,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn records(&self) -> &[CategoryRecord] {
        &self.records
    }

    pub fn legend(&self) -> &LegendStore {
        &self.legend
    }

    pub fn machine(&self) -> &RedrawMachine {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut RedrawMachine {
        &mut self.machine
    }

    /// Replace the dataset. The legend is rebuilt from scratch, so earlier
    /// toggles do not carry over to new data.
    pub fn set_data(&mut self, rows: &[Value]) -> Option<RenderTicket> {
        self.records = normalize::normalize(rows);
        self.reinitialize_legend();
        self.machine.begin(RedrawTrigger::Data)
    }

    /// Swap the color scale. Colors are positional, so the legend is rebuilt.
    pub fn set_color_scale(&mut self, scale: ColorScale) -> Option<RenderTicket> {
        if self.scale == scale {
            return None;
        }
        self.scale = scale;
        self.reinitialize_legend();
        self.machine.begin(RedrawTrigger::Data)
    }

    pub fn toggle_legend(&mut self, key: &str) -> LegendChange<ToggleOutcome> {
        self.ensure_keys();
        let outcome = self.legend.toggle_one(key);
        if outcome == ToggleOutcome::UnknownKey {
            return LegendChange {
                outcome,
                filters: None,
                ticket: None,
            };
        }
        LegendChange {
            outcome,
            filters: Some(ChartFilters::from_legend(self.legend.visible_keys())),
            ticket: self.machine.begin(RedrawTrigger::LegendToggle),
        }
    }

    pub fn toggle_all(&mut self) -> LegendChange<ToggleAllOutcome> {
        self.ensure_keys();
        let outcome = self.legend.toggle_all();
        if outcome == ToggleAllOutcome::Unchanged {
            return LegendChange {
                outcome,
                filters: None,
                ticket: None,
            };
        }
        LegendChange {
            outcome,
            filters: Some(ChartFilters::from_legend(self.legend.visible_keys())),
            ticket: self.machine.begin(RedrawTrigger::LegendToggle),
        }
    }

    pub fn on_breakpoint_change(&mut self) -> Option<RenderTicket> {
        self.machine.begin(RedrawTrigger::Breakpoint)
    }

    /// Working dataset after applying the legend with this chart's policy.
    pub fn projected(&self) -> Vec<CategoryRecord> {
        projection::project(&self.records, &self.legend, self.config.projection)
    }

    pub fn total(&self) -> f64 {
        layout::total_count(&self.projected())
    }

    /// True when legend keys equal the normalized categories, in order.
    pub fn check_keys(&self) -> bool {
        let categories: Vec<&str> = self.records.iter().map(|r| r.category.as_str()).collect();
        self.legend.matches(&categories)
    }

    fn ensure_keys(&mut self) {
        if !self.check_keys() {
            tracing::warn!(chart = %self.id, "legend out of sync with data; reinitializing");
            self.reinitialize_legend();
        }
    }

    fn reinitialize_legend(&mut self) {
        let categories: Vec<&str> = self.records.iter().map(|r| r.category.as_str()).collect();
        self.legend.initialize(&categories, &self.scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::redraw::RenderPhase;
    use serde_json::json;

    fn rows(value: Value) -> Vec<Value> {
        value.as_array().cloned().unwrap_or_default()
    }

    fn donut() -> FilterableChart {
        FilterableChart::new("donut", ChartConfig::donut(), ColorScale::default())
    }

    #[test]
    fn new_data_rebuilds_legend() {
        let mut chart = donut();
        chart.set_data(&rows(json!([{"category": "a", "count": 1}, {"category": "b", "count": 2}])));
        chart.toggle_legend("a");
        chart.set_data(&rows(json!([{"category": "a", "count": 1}, {"category": "c", "count": 2}])));
        assert!(chart.check_keys());
        assert_eq!(chart.legend().visible_count(), 2);
    }

    #[test]
    fn legend_toggle_emits_visible_filters() {
        let mut chart = donut();
        chart.set_data(&rows(json!([{"category": "a", "count": 1}, {"category": "b", "count": 2}])));
        let change = chart.toggle_legend("a");
        assert_eq!(change.outcome, ToggleOutcome::Hidden);
        assert_eq!(change.filters, Some(ChartFilters::from_legend(vec!["b".into()])));
        assert!(change.ticket.is_some());
        assert_eq!(chart.total(), 2.0);
    }

    #[test]
    fn unknown_toggle_is_quiet() {
        let mut chart = donut();
        chart.set_data(&rows(json!([{"category": "a", "count": 1}])));
        let change = chart.toggle_legend("nope");
        assert!(change.filters.is_none());
        assert!(change.ticket.is_none());
    }

    #[test]
    fn toggle_all_on_empty_chart_does_nothing() {
        let mut chart = donut();
        assert!(chart.set_data(&[]).is_some());
        let change = chart.toggle_all();
        assert_eq!(change.outcome, ToggleAllOutcome::Unchanged);
        assert!(matches!(chart.machine().phase(), RenderPhase::Rendering { .. }));
    }

    #[test]
    fn radial_projection_keeps_hidden_rows() {
        let mut chart = FilterableChart::new("radial", ChartConfig::radial(), ColorScale::default());
        chart.set_data(&rows(json!([{"category": "a", "count": 4}, {"category": "b", "count": 2}])));
        chart.toggle_legend("a");
        let projected = chart.projected();
        assert_eq!(projected.len(), 2);
        assert_eq!(projected[0].count, 0.0);
    }
}
