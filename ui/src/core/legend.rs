//! Legend visibility state shared by the donut and radial charts.
//!
//! The store is an ordered map from category to [`LegendEntry`]. Key order is
//! the order categories were handed to [`LegendStore::initialize`] and drives
//! positional color assignment.
//!
//! Two rules shape the toggles:
//! - [`LegendStore::toggle_one`] never leaves every category hidden. A toggle
//!   that would do so rebounds the whole legend to visible.
//! - [`LegendStore::toggle_all`] enables everything when anything is hidden
//!   and hides everything when nothing is.

use std::collections::HashMap;

use super::palette::ColorScale;

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub visible: bool,
    pub class_name: String,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Shown,
    Hidden,
    /// The toggle would have hidden the last visible key; every key is visible again.
    ReboundToAll,
    UnknownKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAllOutcome {
    EnabledAll,
    DisabledAll,
    /// Nothing to toggle (empty legend).
    Unchanged,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegendStore {
    keys: Vec<String>,
    entries: HashMap<String, LegendEntry>,
}

/// `"Social Media"` → `"social-media"`.
pub fn class_name_for(category: &str) -> String {
    category.to_lowercase().replace(' ', "-")
}

impl LegendStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store with every category visible.
    pub fn from_categories<S: AsRef<str>>(categories: &[S], scale: &ColorScale) -> Self {
        let mut store = Self::new();
        store.initialize(categories, scale);
        store
    }

    /// Reset the store to `categories`, all visible, colors drawn from `scale`
    /// over the domain `[0, categories.len()]`. Repeated categories keep their
    /// first position.
    pub fn initialize<S: AsRef<str>>(&mut self, categories: &[S], scale: &ColorScale) {
        self.keys.clear();
        self.entries.clear();

        for category in categories {
            let category = category.as_ref();
            if self.entries.contains_key(category) {
                continue;
            }
            self.keys.push(category.to_string());
            self.entries.insert(
                category.to_string(),
                LegendEntry {
                    visible: true,
                    class_name: class_name_for(category),
                    color: String::new(),
                },
            );
        }

        let len = self.keys.len();
        for (index, key) in self.keys.iter().enumerate() {
            if let Some(entry) = self.entries.get_mut(key) {
                entry.color = scale.color(index, len);
            }
        }
    }

    pub fn toggle_one(&mut self, key: &str) -> ToggleOutcome {
        let Some(entry) = self.entries.get_mut(key) else {
            tracing::warn!(key, "legend toggle for unknown category ignored");
            return ToggleOutcome::UnknownKey;
        };

        entry.visible = !entry.visible;
        let now_visible = entry.visible;

        if self.visible_count() == 0 {
            self.set_all(true);
            return ToggleOutcome::ReboundToAll;
        }

        if now_visible {
            ToggleOutcome::Shown
        } else {
            ToggleOutcome::Hidden
        }
    }

    pub fn toggle_all(&mut self) -> ToggleAllOutcome {
        if self.keys.is_empty() {
            return ToggleAllOutcome::Unchanged;
        }

        if self.visible_count() < self.keys.len() {
            self.set_all(true);
            ToggleAllOutcome::EnabledAll
        } else {
            self.set_all(false);
            ToggleAllOutcome::DisabledAll
        }
    }

    pub fn visible_count(&self) -> usize {
        self.entries.values().filter(|entry| entry.visible).count()
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(|entry| entry.visible)
    }

    pub fn entry(&self, key: &str) -> Option<&LegendEntry> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn visible_keys(&self) -> Vec<String> {
        self.keys
            .iter()
            .filter(|key| self.is_visible(key))
            .cloned()
            .collect()
    }

    pub fn hidden_keys(&self) -> Vec<String> {
        self.keys
            .iter()
            .filter(|key| !self.is_visible(key))
            .cloned()
            .collect()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LegendEntry)> {
        self.keys
            .iter()
            .filter_map(|key| self.entries.get(key).map(|entry| (key.as_str(), entry)))
    }

    /// True when the keys are exactly `categories`, in order.
    pub fn matches<S: AsRef<str>>(&self, categories: &[S]) -> bool {
        self.keys.len() == categories.len()
            && self
                .keys
                .iter()
                .zip(categories)
                .all(|(key, category)| key == category.as_ref())
    }

    fn set_all(&mut self, visible: bool) {
        for entry in self.entries.values_mut() {
            entry.visible = visible;
        }
    }
}
