//! Payloads charts emit to their parent dashboard.

use serde::{Deserialize, Serialize};

/// Emitted through `on_set_chart_filters` when a legend toggle or a slice/bar
/// click changes the active filter set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartFilters {
    pub items: Vec<String>,
    #[serde(rename = "islegendClicked")]
    pub is_legend_clicked: bool,
}

impl ChartFilters {
    /// Filter produced by clicking a single slice or bar.
    pub fn clicked(category: impl Into<String>) -> Self {
        Self {
            items: vec![category.into()],
            is_legend_clicked: false,
        }
    }

    /// Filter produced by a legend change: the categories still visible.
    pub fn from_legend(visible: Vec<String>) -> Self {
        Self {
            items: visible,
            is_legend_clicked: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_dashboard_field_names() {
        let filters = ChartFilters::from_legend(vec!["a".into()]);
        let json = serde_json::to_value(&filters).unwrap();
        assert_eq!(json, serde_json::json!({"items": ["a"], "islegendClicked": true}));
        assert!(!ChartFilters::clicked("b").is_legend_clicked);
    }
}
