//! Pure layout math for category charts.
//!
//! Everything here is side-effect free so it can be unit tested without a
//! rendering surface. Components take a [`LayoutOutcome`], interpolate it with
//! [`ArcSlice::at`] while a transition runs, and commit the result as SVG via
//! [`arc_path`].

use std::f64::consts::{PI, TAU};

use thiserror::Error;

use super::legend::LegendStore;
use super::normalize::CategoryRecord;
use super::palette::PLACEHOLDER_FILL;

/// Duration of the grow-in transition.
pub const TRANSITION_MS: u64 = 750;

/// Frame interval used when stepping transitions.
pub const FRAME_MS: u64 = 16;

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("degenerate arc ({start} → {end})")]
    DegenerateArc { start: f64, end: f64 },
    #[error("invalid radii (inner {inner}, outer {outer})")]
    InvalidRadii { inner: f64, outer: f64 },
}

/// Cubic in-out easing on `t ∈ [0, 1]`.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// Eased progress after `elapsed_ms` of a `duration_ms` transition.
pub fn eased_progress(elapsed_ms: u64, duration_ms: u64) -> f64 {
    if duration_ms == 0 {
        return 1.0;
    }
    ease_cubic_in_out(elapsed_ms as f64 / duration_ms as f64)
}

pub fn total_count(records: &[CategoryRecord]) -> f64 {
    records.iter().map(|record| record.count.max(0.0)).sum()
}

/// One angular span of a pie/donut.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcSlice {
    pub category: String,
    pub count: f64,
    pub percent: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: String,
    pub class_name: String,
}

impl ArcSlice {
    /// Angles at transition `progress`: the slice grows from a zero-width
    /// wedge at its start angle to its true extent.
    pub fn at(&self, progress: f64) -> (f64, f64) {
        let progress = progress.clamp(0.0, 1.0);
        let end = self.start_angle + (self.end_angle - self.start_angle) * progress;
        (self.start_angle, end)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutOutcome<T> {
    /// Nothing to draw: show the neutral background.
    Placeholder,
    Shapes { total: f64, shapes: Vec<T> },
}

impl<T> LayoutOutcome<T> {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    pub fn shapes(&self) -> &[T] {
        match self {
            Self::Placeholder => &[],
            Self::Shapes { shapes, .. } => shapes,
        }
    }

    pub fn total(&self) -> f64 {
        match self {
            Self::Placeholder => 0.0,
            Self::Shapes { total, .. } => *total,
        }
    }
}

/// Partition the full circle proportionally to `count`, in input order.
/// `pad_angle` is removed from each slice's extent (never below zero).
pub fn arc_layout(
    records: &[CategoryRecord],
    legend: &LegendStore,
    pad_angle: f64,
) -> LayoutOutcome<ArcSlice> {
    let total = total_count(records);
    if records.is_empty() || total < 1.0 {
        return LayoutOutcome::Placeholder;
    }

    let mut cursor = 0.0;
    let slices = records
        .iter()
        .map(|record| {
            let span = record.count.max(0.0) / total * TAU;
            let pad = pad_angle.min(span).max(0.0);
            let start = cursor + pad / 2.0;
            let end = cursor + span - pad / 2.0;
            cursor += span;
            let (color, class_name) = style_for(legend, &record.category);
            ArcSlice {
                category: record.category.clone(),
                count: record.count,
                percent: record.percent,
                start_angle: start,
                end_angle: end,
                color,
                class_name,
            }
        })
        .collect();

    LayoutOutcome::Shapes {
        total,
        shapes: slices,
    }
}

/// One concentric track of a radial bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialBar {
    pub category: String,
    pub count: f64,
    pub percent: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub sweep: f64,
    pub color: String,
    pub class_name: String,
}

impl RadialBar {
    pub fn sweep_at(&self, progress: f64) -> f64 {
        self.sweep * progress.clamp(0.0, 1.0)
    }
}

/// Lay out one track per record between `inner` and `outer` radius. The
/// largest count sweeps `max_angle`; the others scale linearly. Zeroed records
/// keep their track so positions stay stable.
pub fn radial_layout(
    records: &[CategoryRecord],
    legend: &LegendStore,
    inner: f64,
    outer: f64,
    max_angle: f64,
) -> LayoutOutcome<RadialBar> {
    let total = total_count(records);
    if records.is_empty() || total < 1.0 || outer <= inner {
        return LayoutOutcome::Placeholder;
    }

    let max_count = records
        .iter()
        .map(|record| record.count)
        .fold(0.0_f64, f64::max);
    let band = (outer - inner) / records.len() as f64;
    let gap = band * 0.2;

    let bars = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let track_outer = outer - band * index as f64;
            let (color, class_name) = style_for(legend, &record.category);
            RadialBar {
                category: record.category.clone(),
                count: record.count,
                percent: record.percent,
                inner_radius: track_outer - band + gap,
                outer_radius: track_outer,
                sweep: record.count.max(0.0) / max_count * max_angle,
                color,
                class_name,
            }
        })
        .collect();

    LayoutOutcome::Shapes { total, shapes: bars }
}

fn style_for(legend: &LegendStore, category: &str) -> (String, String) {
    match legend.entry(category) {
        Some(entry) => (entry.color.clone(), entry.class_name.clone()),
        None => {
            tracing::warn!(category, "category missing from legend; drawing neutral");
            (
                PLACEHOLDER_FILL.to_string(),
                super::legend::class_name_for(category),
            )
        }
    }
}

/// Point on a circle; angle 0 is twelve o'clock, increasing clockwise.
pub fn polar(radius: f64, angle: f64) -> (f64, f64) {
    (radius * angle.sin(), -radius * angle.cos())
}

/// SVG path for an annular sector centred on the origin. A zero `inner`
/// radius yields a pie wedge.
pub fn arc_path(inner: f64, outer: f64, start: f64, end: f64) -> Result<String, LayoutError> {
    if !(start.is_finite() && end.is_finite()) || end - start <= f64::EPSILON {
        return Err(LayoutError::DegenerateArc { start, end });
    }
    if !(inner.is_finite() && outer.is_finite()) || inner < 0.0 || outer <= inner {
        return Err(LayoutError::InvalidRadii { inner, outer });
    }

    // A single SVG arc cannot draw a full circle; split it in two halves.
    if end - start >= TAU - 1e-6 {
        let mid = start + PI;
        let first = arc_path(inner, outer, start, mid)?;
        let second = arc_path(inner, outer, mid, start + TAU)?;
        return Ok(format!("{first}{second}"));
    }
    let sweep = end - start;
    let large_arc = u8::from(sweep > PI);

    let (ox0, oy0) = polar(outer, start);
    let (ox1, oy1) = polar(outer, end);

    let mut path = format!(
        "M{ox0:.3},{oy0:.3}A{outer:.3},{outer:.3} 0 {large_arc} 1 {ox1:.3},{oy1:.3}"
    );

    if inner > 0.0 {
        let (ix1, iy1) = polar(inner, end);
        let (ix0, iy0) = polar(inner, start);
        path.push_str(&format!(
            "L{ix1:.3},{iy1:.3}A{inner:.3},{inner:.3} 0 {large_arc} 0 {ix0:.3},{iy0:.3}Z"
        ));
    } else {
        path.push_str("L0,0Z");
    }

    Ok(path)
}

/// Full ring used as the empty-state background.
pub fn ring_path(inner: f64, outer: f64) -> Result<String, LayoutError> {
    arc_path(inner, outer, 0.0, TAU)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::palette::ColorScale;

    fn records(counts: &[(&str, f64)]) -> (Vec<CategoryRecord>, LegendStore) {
        let records: Vec<_> = counts
            .iter()
            .map(|(name, count)| CategoryRecord::new(*name, *count, 0.0))
            .collect();
        let names: Vec<&str> = counts.iter().map(|(name, _)| *name).collect();
        let legend = LegendStore::from_categories(&names, &ColorScale::default());
        (records, legend)
    }

    #[test]
    fn easing_hits_endpoints_and_midpoint() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        assert!((ease_cubic_in_out(0.5) - 0.5).abs() < 1e-12);
        assert!(ease_cubic_in_out(0.25) < 0.25);
        assert_eq!(eased_progress(10, 0), 1.0);
        assert_eq!(eased_progress(2_000, TRANSITION_MS), 1.0);
    }

    #[test]
    fn arcs_cover_the_circle_in_order() {
        let (data, legend) = records(&[("X", 10.0), ("Y", 10.0)]);
        let layout = arc_layout(&data, &legend, 0.0);
        assert_eq!(layout.total(), 20.0);
        let slices = layout.shapes();
        assert_eq!(slices[0].category, "X");
        assert!((slices[0].end_angle - PI).abs() < 1e-9);
        assert!((slices[1].end_angle - TAU).abs() < 1e-9);
        assert_eq!(slices[1].color, "#ff7f0e");
    }

    #[test]
    fn empty_or_tiny_totals_use_placeholder() {
        let (data, legend) = records(&[]);
        assert!(arc_layout(&data, &legend, 0.0).is_placeholder());
        let (data, legend) = records(&[("a", 0.4), ("b", 0.4)]);
        assert!(arc_layout(&data, &legend, 0.0).is_placeholder());
    }

    #[test]
    fn slices_grow_from_start_angle() {
        let (data, legend) = records(&[("a", 1.0), ("b", 3.0)]);
        let layout = arc_layout(&data, &legend, 0.0);
        let slice = &layout.shapes()[1];
        assert_eq!(slice.at(0.0), (slice.start_angle, slice.start_angle));
        assert_eq!(slice.at(1.0), (slice.start_angle, slice.end_angle));
    }

    #[test]
    fn radial_tracks_keep_zeroed_rows() {
        let (data, legend) = records(&[("a", 4.0), ("b", 0.0), ("c", 2.0)]);
        let layout = radial_layout(&data, &legend, 20.0, 80.0, 1.5 * PI);
        let bars = layout.shapes();
        assert_eq!(bars.len(), 3);
        assert!((bars[0].sweep - 1.5 * PI).abs() < 1e-9);
        assert_eq!(bars[1].sweep, 0.0);
        assert!(bars[2].outer_radius < bars[1].outer_radius);
    }

    #[test]
    fn degenerate_arcs_are_rejected() {
        assert!(matches!(
            arc_path(10.0, 20.0, 1.0, 1.0),
            Err(LayoutError::DegenerateArc { .. })
        ));
        assert!(arc_path(10.0, 20.0, 0.0, f64::NAN).is_err());
        assert!(matches!(
            arc_path(30.0, 20.0, 0.0, 1.0),
            Err(LayoutError::InvalidRadii { .. })
        ));
    }

    #[test]
    fn arc_path_shapes() {
        let donut = arc_path(50.0, 100.0, 0.0, PI / 2.0).unwrap();
        assert!(donut.starts_with("M0.000,-100.000A100.000,100.000 0 0 1 100.000,"));
        assert!(donut.ends_with('Z'));
        let wedge = arc_path(0.0, 100.0, 0.0, 1.5 * PI).unwrap();
        assert!(wedge.contains(" 0 1 1 "));
        assert!(wedge.ends_with("L0,0Z"));
        assert!(ring_path(40.0, 60.0).is_ok());
    }

    fn point(text: &str) -> (f64, f64) {
        let (x, y) = text.split_once(',').unwrap();
        (x.parse().unwrap(), y.parse().unwrap())
    }

    #[test]
    fn single_category_draws_a_visible_full_circle() {
        let (data, legend) = records(&[("only", 5.0)]);
        let layout = arc_layout(&data, &legend, 0.0);
        let slice = &layout.shapes()[0];
        let path = arc_path(0.0, 100.0, slice.start_angle, slice.end_angle).unwrap();

        let subpaths: Vec<&str> = path.split('M').filter(|s| !s.is_empty()).collect();
        assert_eq!(subpaths.len(), 2);
        for subpath in subpaths {
            let (start, rest) = subpath.split_once('A').unwrap();
            let arc = rest.split('L').next().unwrap();
            let end = arc.rsplit(' ').next().unwrap();
            let ((x0, y0), (x1, y1)) = (point(start), point(end));
            assert!((x0 - x1).hypot(y0 - y1) > 1.0, "arc endpoints coincide in {path}");
        }
    }
}
