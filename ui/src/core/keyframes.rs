//! Keyframes for time-animated race charts.
//!
//! A keyframe is one period's snapshot (for example one year of browser
//! share). Frames are played strictly in order; the race chart awaits each
//! frame's transition before starting the next.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::normalize::CategoryRecord;

/// One `(period, category, value)` observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub period: String,
    pub category: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe {
    pub period: String,
    pub records: Vec<CategoryRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedBar {
    pub rank: usize,
    pub category: String,
    pub value: f64,
    /// Share of the frame's largest value, `0..=1`.
    pub fraction: f64,
}

/// Group observations into frames ordered by period. Periods sort
/// numerically when they all parse as numbers, otherwise lexically.
/// Within a frame, categories keep first-seen order and repeats are summed.
pub fn build_keyframes(observations: &[Observation]) -> Vec<Keyframe> {
    let mut grouped: BTreeMap<String, Vec<CategoryRecord>> = BTreeMap::new();

    for obs in observations {
        if !obs.value.is_finite() {
            continue;
        }
        let records = grouped.entry(obs.period.clone()).or_default();
        match records.iter_mut().find(|r| r.category == obs.category) {
            Some(existing) => existing.count += obs.value,
            None => records.push(CategoryRecord::new(obs.category.clone(), obs.value, 0.0)),
        }
    }

    let mut frames: Vec<Keyframe> = grouped
        .into_iter()
        .map(|(period, mut records)| {
            let total: f64 = records.iter().map(|r| r.count.max(0.0)).sum();
            for record in &mut records {
                record.percent = if total > 0.0 {
                    record.count / total * 100.0
                } else {
                    0.0
                };
            }
            Keyframe { period, records }
        })
        .collect();

    let numeric = frames.iter().all(|f| f.period.trim().parse::<f64>().is_ok());
    if numeric {
        frames.sort_by(|a, b| {
            let a = a.period.trim().parse::<f64>().unwrap_or(0.0);
            let b = b.period.trim().parse::<f64>().unwrap_or(0.0);
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        });
    }

    frames
}

/// Top `top_n` bars of a frame, largest first; ties break by category name so
/// ranks are stable across frames.
pub fn rank(frame: &Keyframe, top_n: usize) -> Vec<RankedBar> {
    let mut sorted: Vec<&CategoryRecord> = frame.records.iter().collect();
    sorted.sort_by(|a, b| {
        b.count
            .partial_cmp(&a.count)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });

    let max = sorted.first().map(|r| r.count).unwrap_or(0.0);

    sorted
        .into_iter()
        .take(top_n)
        .enumerate()
        .map(|(rank, record)| RankedBar {
            rank,
            category: record.category.clone(),
            value: record.count,
            fraction: if max > 0.0 {
                (record.count / max).clamp(0.0, 1.0)
            } else {
                0.0
            },
        })
        .collect()
}

/// A bar partway through the transition between two ranked frames.
#[derive(Debug, Clone, PartialEq)]
pub struct BarFrame {
    pub category: String,
    /// Fractional rank; bars entering the chart slide in from `top_n`.
    pub position: f64,
    pub value: f64,
    pub fraction: f64,
}

/// Interpolate from `previous` to `current` at eased `progress`. Bars that
/// are new to the ranking grow from zero below the last row.
pub fn tween(previous: &[RankedBar], current: &[RankedBar], progress: f64, top_n: usize) -> Vec<BarFrame> {
    let t = progress.clamp(0.0, 1.0);
    let lerp = |from: f64, to: f64| from + (to - from) * t;

    current
        .iter()
        .map(|bar| {
            let (from_position, from_value, from_fraction) = previous
                .iter()
                .find(|p| p.category == bar.category)
                .map(|p| (p.rank as f64, p.value, p.fraction))
                .unwrap_or((top_n as f64, 0.0, 0.0));
            BarFrame {
                category: bar.category.clone(),
                position: lerp(from_position, bar.rank as f64),
                value: lerp(from_value, bar.value),
                fraction: lerp(from_fraction, bar.fraction),
            }
        })
        .collect()
}

/// Cursor over frames that only moves forward.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyframeCursor {
    next: usize,
    len: usize,
}

impl KeyframeCursor {
    pub fn new(len: usize) -> Self {
        Self { next: 0, len }
    }

    /// Index of the next frame to play, advancing the cursor.
    pub fn advance(&mut self) -> Option<usize> {
        if self.next >= self.len {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some(index)
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.len
    }

    pub fn rewind(&mut self) {
        self.next = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(period: &str, category: &str, value: f64) -> Observation {
        Observation {
            period: period.into(),
            category: category.into(),
            value,
        }
    }

    #[test]
    fn frames_sort_numerically() {
        let frames = build_keyframes(&[
            obs("2010", "a", 1.0),
            obs("2009", "a", 2.0),
            obs("999", "b", 4.0),
        ]);
        let periods: Vec<_> = frames.iter().map(|f| f.period.as_str()).collect();
        assert_eq!(periods, ["999", "2009", "2010"]);
    }

    #[test]
    fn repeated_categories_are_summed() {
        let frames = build_keyframes(&[obs("q1", "a", 1.0), obs("q1", "a", 3.0), obs("q1", "b", 4.0)]);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].records[0].count, 4.0);
        assert_eq!(frames[0].records[0].percent, 50.0);
    }

    #[test]
    fn ranks_break_ties_by_name() {
        let frame = Keyframe {
            period: "2020".into(),
            records: vec![
                CategoryRecord::new("zeta", 5.0, 0.0),
                CategoryRecord::new("alpha", 5.0, 0.0),
                CategoryRecord::new("mid", 10.0, 0.0),
            ],
        };
        let bars = rank(&frame, 2);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].category, "mid");
        assert_eq!(bars[1].category, "alpha");
        assert_eq!(bars[1].fraction, 0.5);
    }

    #[test]
    fn cursor_plays_each_frame_once() {
        let mut cursor = KeyframeCursor::new(2);
        assert_eq!(cursor.advance(), Some(0));
        assert_eq!(cursor.advance(), Some(1));
        assert_eq!(cursor.advance(), None);
        assert!(cursor.is_finished());
        cursor.rewind();
        assert_eq!(cursor.advance(), Some(0));
    }

    #[test]
    fn tween_slides_new_bars_in_from_below() {
        let previous = vec![RankedBar {
            rank: 0,
            category: "a".into(),
            value: 10.0,
            fraction: 1.0,
        }];
        let current = vec![
            RankedBar {
                rank: 0,
                category: "b".into(),
                value: 20.0,
                fraction: 1.0,
            },
            RankedBar {
                rank: 1,
                category: "a".into(),
                value: 10.0,
                fraction: 0.5,
            },
        ];

        let start = tween(&previous, &current, 0.0, 5);
        assert_eq!(start[0].position, 5.0);
        assert_eq!(start[0].fraction, 0.0);
        assert_eq!(start[1].position, 0.0);

        let end = tween(&previous, &current, 1.0, 5);
        assert_eq!(end[0].position, 0.0);
        assert_eq!(end[1].position, 1.0);
        assert_eq!(end[1].fraction, 0.5);
    }
}
