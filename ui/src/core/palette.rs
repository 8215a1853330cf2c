//! Color scales for category charts.
//!
//! Colors are positional: a category's color is looked up by its index among
//! the legend keys, never by its name. Two datasets with the same categories
//! in different orders therefore get different colors.

/// Default ordinal palette (ten distinguishable hues).
pub const CATEGORY_10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Fill used by the empty-chart placeholder ring.
pub const PLACEHOLDER_FILL: &str = "#e5e7eb";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let raw = hex.strip_prefix('#')?;
        if raw.len() != 6 || !raw.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(raw.get(i..i + 2)?, 16).ok();
        Some(Self(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Self(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

/// Scale mapping a category index to a CSS color.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorScale {
    /// Cycles through a fixed palette.
    Ordinal(Vec<String>),
    /// Interpolates between two colors across the domain `[0, len]`.
    Sequential { from: Rgb, to: Rgb },
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::category10()
    }
}

impl ColorScale {
    pub fn category10() -> Self {
        Self::Ordinal(CATEGORY_10.iter().map(|c| c.to_string()).collect())
    }

    /// Sequential scale from two hex colors; falls back to the ordinal palette
    /// when either color is malformed.
    pub fn sequential(from: &str, to: &str) -> Self {
        match (Rgb::from_hex(from), Rgb::from_hex(to)) {
            (Some(from), Some(to)) => Self::Sequential { from, to },
            _ => {
                tracing::warn!(from, to, "invalid sequential colors; using ordinal palette");
                Self::category10()
            }
        }
    }

    /// Color for `index` within a domain of `len` categories.
    pub fn color(&self, index: usize, len: usize) -> String {
        match self {
            Self::Ordinal(palette) if palette.is_empty() => PLACEHOLDER_FILL.to_string(),
            Self::Ordinal(palette) => palette[index % palette.len()].clone(),
            Self::Sequential { from, to } => {
                let t = if len == 0 {
                    0.0
                } else {
                    index as f64 / len as f64
                };
                from.lerp(*to, t).to_hex()
            }
        }
    }
}
