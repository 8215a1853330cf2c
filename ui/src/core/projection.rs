//! Derives a chart's working dataset from normalized records and legend state.

use super::legend::LegendStore;
use super::normalize::CategoryRecord;

/// How hidden categories are treated when projecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionPolicy {
    /// Drop hidden categories. For charts without an ordering guarantee (pie, donut).
    #[default]
    Remove,
    /// Keep hidden categories with a zero count so index and rank stay stable.
    ZeroCount,
}

/// Project `records` through the legend. The input is never modified.
/// Categories missing from the legend are treated as visible.
pub fn project(
    records: &[CategoryRecord],
    legend: &LegendStore,
    policy: ProjectionPolicy,
) -> Vec<CategoryRecord> {
    let hidden = |record: &CategoryRecord| {
        legend.entry(&record.category).is_some() && !legend.is_visible(&record.category)
    };

    match policy {
        ProjectionPolicy::Remove => records
            .iter()
            .filter(|record| !hidden(record))
            .cloned()
            .collect(),
        ProjectionPolicy::ZeroCount => records
            .iter()
            .map(|record| {
                if hidden(record) {
                    CategoryRecord::new(record.category.clone(), 0.0, 0.0)
                } else {
                    record.clone()
                }
            })
            .collect(),
    }
}
