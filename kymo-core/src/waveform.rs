//! Channel waveform representation
//!
//! A waveform is a time-ordered list of level samples. Two append
//! disciplines exist:
//!
//! - step (digital, auxiliary): state changes only. A push at an existing
//!   timestamp replaces it, a push repeating the current level is dropped
//! - sample (display): same timestamp merging, but equal consecutive levels
//!   are kept, since ramp rendering needs anchor points

/// Tolerance under which two timestamps are the same instant.
pub(crate) const TIME_EPS: f64 = 1e-9;

/// One channel level at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub t_ms: f64,
    pub level: f64,
}

/// Time-ordered samples of one channel, timestamps strictly increasing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Waveform {
    points: Vec<Sample>,
}

impl Waveform {
    pub const fn new() -> Self {
        Waveform { points: Vec::new() }
    }

    pub fn points(&self) -> &[Sample] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<Sample> {
        self.points.last().copied()
    }

    /// Append a state change. Pushes must arrive in time order.
    ///
    /// A push at the current last timestamp replaces that entry (the newer
    /// level wins), collapsing again if the replacement now repeats the
    /// level before it. A push repeating the current level is dropped.
    pub fn push_step(&mut self, t_ms: f64, level: f64) {
        if let Some(last) = self.points.last().copied() {
            debug_assert!(t_ms + TIME_EPS >= last.t_ms, "step pushed out of time order");
            if (t_ms - last.t_ms).abs() <= TIME_EPS {
                let n = self.points.len();
                if n >= 2 && self.points[n - 2].level == level {
                    self.points.pop();
                } else {
                    self.points[n - 1].level = level;
                }
                return;
            }
            if last.level == level {
                return;
            }
        }
        self.points.push(Sample { t_ms, level });
    }

    /// Append a display sample. Pushes must arrive in time order.
    ///
    /// A push at the current last timestamp replaces that entry; equal
    /// consecutive levels are kept.
    pub fn push_sample(&mut self, t_ms: f64, level: f64) {
        if let Some(last) = self.points.last_mut() {
            debug_assert!(t_ms + TIME_EPS >= last.t_ms, "sample pushed out of time order");
            if (t_ms - last.t_ms).abs() <= TIME_EPS {
                last.level = level;
                return;
            }
        }
        self.points.push(Sample { t_ms, level });
    }

    /// Copy with every timestamp offset by `offset_ms`.
    pub fn shifted(&self, offset_ms: f64) -> Waveform {
        Waveform {
            points: self
                .points
                .iter()
                .map(|p| Sample {
                    t_ms: p.t_ms + offset_ms,
                    level: p.level,
                })
                .collect(),
        }
    }

    /// Level at time `t_ms`: the last entry at or before it, 0 before the
    /// first entry.
    pub fn level_at(&self, t_ms: f64) -> f64 {
        let idx = self.points.partition_point(|p| p.t_ms <= t_ms + TIME_EPS);
        if idx == 0 {
            0.0
        } else {
            self.points[idx - 1].level
        }
    }

    /// Pairs for the persisted `[time, state]` arrays.
    pub fn to_pairs(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.t_ms, p.level)).collect()
    }

    /// Rebuild from persisted pairs. Input is sorted first; same-instant
    /// duplicates keep the later pair, equal consecutive levels are kept.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> Waveform {
        let mut sorted: Vec<(f64, f64)> = pairs.into_iter().collect();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
        let mut wave = Waveform::new();
        for (t, level) in sorted {
            wave.push_sample(t, level);
        }
        wave
    }
}
