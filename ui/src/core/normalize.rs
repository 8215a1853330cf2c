//! Normalization of loosely-typed chart inputs into category records.
//!
//! Charts accept whatever the host page hands them: already-shaped
//! `{category, count, percent}` rows, advertiser rows (`{name, data: [...]}`),
//! UTM-source exports (`{UTM_SOURCE, total: "NN%"}`) or arbitrary objects.
//! [`classify`] picks an [`InputShape`] from the first element and one pure
//! mapper per shape produces the common [`CategoryRecord`] list.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One slice of a category chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub category: String,
    pub count: f64,
    /// Display-only share in `0..=100`; not required to sum to 100.
    #[serde(default)]
    pub percent: f64,
}

impl CategoryRecord {
    pub fn new(category: impl Into<String>, count: f64, percent: f64) -> Self {
        Self {
            category: category.into(),
            count,
            percent,
        }
    }
}

/// Recognized input layouts. Detection order matters: the first matching
/// variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputShape {
    /// `{category, count, percent?}`
    CategoryCount,
    /// `{name, data: [...]}`
    Advertiser,
    /// `{UTM_SOURCE, total: "NN%"}`
    UtmSource,
    /// Anything else, mapped best-effort.
    Generic,
}

const CATEGORY_FIELDS: [&str; 4] = ["category", "name", "label", "key"];
const COUNT_FIELDS: [&str; 4] = ["count", "value", "total", "amount"];

/// Classify a dataset by inspecting the first element's own properties.
/// Empty input and non-object first elements classify as [`InputShape::Generic`].
pub fn classify(rows: &[Value]) -> InputShape {
    let Some(first) = rows.first().and_then(Value::as_object) else {
        return InputShape::Generic;
    };

    if first.contains_key("category") && first.contains_key("count") {
        InputShape::CategoryCount
    } else if first.contains_key("name") && first.get("data").is_some_and(Value::is_array) {
        InputShape::Advertiser
    } else if first.contains_key("UTM_SOURCE") {
        InputShape::UtmSource
    } else {
        InputShape::Generic
    }
}

/// Normalize any JSON value. Non-arrays normalize to an empty dataset.
pub fn normalize_value(value: &Value) -> Vec<CategoryRecord> {
    match value.as_array() {
        Some(rows) => normalize(rows),
        None => Vec::new(),
    }
}

/// Normalize rows into unique-category records, preserving input order.
pub fn normalize(rows: &[Value]) -> Vec<CategoryRecord> {
    if rows.is_empty() {
        return Vec::new();
    }

    let records = match classify(rows) {
        InputShape::CategoryCount => from_category_count(rows),
        InputShape::Advertiser => from_advertiser(rows),
        InputShape::UtmSource => from_utm_source(rows),
        InputShape::Generic => from_generic(rows),
    };

    merge_duplicates(records)
}

fn from_category_count(rows: &[Value]) -> Vec<CategoryRecord> {
    rows.iter()
        .filter_map(Value::as_object)
        .filter_map(|obj| {
            let category = text_field(obj, "category")?;
            let count = number_field(obj, "count").unwrap_or(0.0).max(0.0);
            let percent = number_field(obj, "percent").unwrap_or(0.0);
            Some(CategoryRecord::new(category, count, percent))
        })
        .collect()
}

fn from_advertiser(rows: &[Value]) -> Vec<CategoryRecord> {
    let counted: Vec<(String, f64)> = rows
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|obj| {
            let name = text_field(obj, "name")?;
            let count = obj
                .get("data")
                .and_then(Value::as_array)
                .map(|data| data.len() as f64)
                .unwrap_or(0.0);
            Some((name, count))
        })
        .collect();

    let total: f64 = counted.iter().map(|(_, count)| count).sum();

    counted
        .into_iter()
        .filter(|(_, count)| *count > 0.0)
        .map(|(name, count)| CategoryRecord::new(name, count, rounded_share(count, total)))
        .collect()
}

fn from_utm_source(rows: &[Value]) -> Vec<CategoryRecord> {
    rows.iter()
        .filter_map(Value::as_object)
        .filter_map(|obj| {
            let source = text_field(obj, "UTM_SOURCE")?;
            let percent = obj.get("total").map(parse_percent).unwrap_or(f64::NAN);
            if !percent.is_finite() || percent <= 0.0 {
                return None;
            }
            Some(CategoryRecord::new(source, (percent * 100.0).round(), percent))
        })
        .collect()
}

fn from_generic(rows: &[Value]) -> Vec<CategoryRecord> {
    let extracted: Vec<(String, f64)> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let obj = row.as_object();
            let category = obj
                .and_then(|obj| CATEGORY_FIELDS.iter().find_map(|f| text_field(obj, f)))
                .unwrap_or_else(|| format!("Item {}", index + 1));
            let count = obj
                .and_then(|obj| COUNT_FIELDS.iter().find_map(|f| number_field(obj, f)))
                .unwrap_or(1.0)
                .max(0.0);
            (category, count)
        })
        .collect();

    let total: f64 = extracted.iter().map(|(_, count)| count).sum();

    extracted
        .into_iter()
        .map(|(category, count)| {
            let percent = rounded_share(count, total);
            CategoryRecord::new(category, count, percent)
        })
        .collect()
}

fn merge_duplicates(records: Vec<CategoryRecord>) -> Vec<CategoryRecord> {
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(records.len());
    let mut merged: Vec<CategoryRecord> = Vec::with_capacity(records.len());

    for record in records {
        match positions.get(&record.category) {
            Some(&at) => {
                tracing::debug!(category = %record.category, "merging duplicate category");
                merged[at].count += record.count;
                merged[at].percent += record.percent;
            }
            None => {
                positions.insert(record.category.clone(), merged.len());
                merged.push(record);
            }
        }
    }

    merged
}

fn rounded_share(count: f64, total: f64) -> f64 {
    if total > 0.0 {
        (count / total * 100.0).round()
    } else {
        0.0
    }
}

/// Non-empty string (or number rendered as string) under `field`.
fn text_field(obj: &Map<String, Value>, field: &str) -> Option<String> {
    match obj.get(field)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Finite number under `field`; numeric strings are accepted.
fn number_field(obj: &Map<String, Value>, field: &str) -> Option<f64> {
    let value = match obj.get(field)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}

/// `"12.5%"` → `12.5`; anything unparsable → NaN.
fn parse_percent(raw: &Value) -> f64 {
    match raw {
        Value::String(s) => s
            .trim()
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .unwrap_or(f64::NAN),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}
