//! Static datasets bundled with the app and the loaders that read them.
//!
//! CSV fixtures follow a deliberately small contract: comma-split lines, the
//! header row skipped, columns mapped by position onto caller-supplied names.
//! Reordering a fixture's columns therefore requires updating its caller.

use serde_json::{Map, Number, Value};
use thiserror::Error;

use super::keyframes::Observation;

pub const BROWSER_SHARE_CSV: &str = include_str!("../../fixtures/browser-share.csv");
pub const ADVERTISERS_JSON: &str = include_str!("../../fixtures/advertisers.json");
pub const UTM_SOURCES_JSON: &str = include_str!("../../fixtures/utm-sources.json");

/// Column layout of `browser-share.csv`.
pub const BROWSER_SHARE_COLUMNS: [&str; 3] = ["year", "category", "count"];

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("fixture is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON array at the top level")]
    NotAnArray,
}

/// Parse CSV text into JSON objects keyed by `columns`. Numeric fields become
/// numbers, blank lines are skipped, missing trailing fields become `null`,
/// and extra fields are ignored.
pub fn parse_positional_csv(text: &str, columns: &[&str]) -> Vec<Value> {
    text.lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut fields = line.split(',').map(str::trim);
            let row: Map<String, Value> = columns
                .iter()
                .map(|column| (column.to_string(), fields.next().map_or(Value::Null, field_value)))
                .collect();
            Value::Object(row)
        })
        .collect()
}

fn field_value(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Value::Number(int.into());
    }
    match raw.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(number) => Value::Number(number),
        None => Value::String(raw.to_string()),
    }
}

/// Parse a JSON fixture that must hold an array of records.
pub fn parse_json_fixture(text: &str) -> Result<Vec<Value>, FixtureError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(rows) => Ok(rows),
        _ => Err(FixtureError::NotAnArray),
    }
}

/// Pull `(period, category, value)` observations from loose rows. Rows
/// missing any of the three fields are skipped.
pub fn observations(
    rows: &[Value],
    period_key: &str,
    category_key: &str,
    value_key: &str,
) -> Vec<Observation> {
    rows.iter()
        .filter_map(|row| {
            let period = scalar_text(row.get(period_key)?)?;
            let category = scalar_text(row.get(category_key)?)?;
            let value = row.get(value_key)?.as_f64()?;
            Some(Observation {
                period,
                category,
                value,
            })
        })
        .collect()
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Browser share rows for the most recent year, as `{category, count}` rows.
pub fn latest_browser_share() -> Vec<Value> {
    let rows = parse_positional_csv(BROWSER_SHARE_CSV, &BROWSER_SHARE_COLUMNS);
    let latest = rows
        .iter()
        .filter_map(|row| row.get("year").and_then(Value::as_f64))
        .fold(f64::NEG_INFINITY, f64::max);

    rows.into_iter()
        .filter(|row| row.get("year").and_then(Value::as_f64) == Some(latest))
        .map(|mut row| {
            if let Some(obj) = row.as_object_mut() {
                obj.remove("year");
            }
            row
        })
        .collect()
}

pub fn browser_share_observations() -> Vec<Observation> {
    let rows = parse_positional_csv(BROWSER_SHARE_CSV, &BROWSER_SHARE_COLUMNS);
    observations(&rows, "year", "category", "count")
}

/// Loads a bundled JSON fixture, logging and returning an empty dataset on failure.
pub fn load_json(name: &str, text: &str) -> Vec<Value> {
    parse_json_fixture(text).unwrap_or_else(|err| {
        tracing::warn!(fixture = name, %err, "failed to load fixture");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn csv_skips_header_and_maps_positions() {
        let rows = parse_positional_csv("a,b,c\n1,Chrome,65.5\n\n2,Firefox\n", &["y", "name", "v"]);
        assert_eq!(
            rows,
            vec![
                json!({"y": 1, "name": "Chrome", "v": 65.5}),
                json!({"y": 2, "name": "Firefox", "v": null}),
            ]
        );
    }

    #[test]
    fn json_fixture_must_be_array() {
        assert!(matches!(
            parse_json_fixture("{\"a\": 1}"),
            Err(FixtureError::NotAnArray)
        ));
        assert!(matches!(parse_json_fixture("[1,"), Err(FixtureError::Json(_))));
        assert_eq!(parse_json_fixture("[]").unwrap(), Vec::<Value>::new());
    }

    #[test]
    fn bundled_fixtures_parse() {
        assert!(!load_json("advertisers", ADVERTISERS_JSON).is_empty());
        assert!(!load_json("utm", UTM_SOURCES_JSON).is_empty());
        let latest = latest_browser_share();
        assert!(!latest.is_empty());
        assert!(latest.iter().all(|row| row.get("year").is_none()));
        assert!(!browser_share_observations().is_empty());
    }

    #[test]
    fn observations_skip_incomplete_rows() {
        let rows = vec![
            json!({"year": 2020, "category": "a", "count": 1.5}),
            json!({"year": 2020, "category": "b"}),
        ];
        let obs = observations(&rows, "year", "category", "count");
        assert_eq!(obs.len(), 1);
        assert_eq!(obs[0].period, "2020");
    }
}
