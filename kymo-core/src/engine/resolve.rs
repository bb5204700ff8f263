//! Interval resolution
//!
//! Turns one channel's overlapping event claims into the minimal ordered
//! state-change list for a single pass through a block's schedule.

use crate::waveform::Waveform;

/// One event's claim on a channel: a half-open `[start, end)` interval held
/// at a level. Slice order is declaration order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub start_ms: f64,
    pub end_ms: f64,
    pub level: f64,
}

impl Span {
    pub const fn new(start_ms: f64, end_ms: f64, level: f64) -> Self {
        Span {
            start_ms,
            end_ms,
            level,
        }
    }

    fn covers(&self, t_ms: f64) -> bool {
        self.start_ms <= t_ms && t_ms < self.end_ms
    }
}

/// Sorted, deduplicated boundary timestamps: 0, the schedule end, and every
/// span edge.
fn boundaries(spans: &[Span], end_ms: f64) -> Vec<f64> {
    let mut ts = Vec::with_capacity(spans.len() * 2 + 2);
    ts.push(0.0);
    ts.push(end_ms);
    for span in spans {
        ts.push(span.start_ms);
        ts.push(span.end_ms);
    }
    ts.sort_by(f64::total_cmp);
    ts.dedup();
    ts
}

/// Level of the governing span at `t_ms`.
///
/// Last-start-wins: among spans covering `t_ms`, the greatest start decides;
/// equal starts resolve to the later-declared span. No coverage is low.
fn level_at(spans: &[Span], t_ms: f64) -> f64 {
    let mut winner: Option<&Span> = None;
    for span in spans {
        if span.covers(t_ms) && winner.map_or(true, |w| span.start_ms >= w.start_ms) {
            winner = Some(span);
        }
    }
    winner.map_or(0.0, |w| w.level)
}

/// Resolve a channel's spans over one cycle `[0, end_ms]` into its minimal
/// state-change waveform.
///
/// The first entry is always at t=0; runs of identical level collapse. An
/// empty span set yields the single entry `(0, 0)`. Zero-length spans cover
/// nothing and so never claim a level.
pub fn resolve_steps(spans: &[Span], end_ms: f64) -> Waveform {
    let mut wave = Waveform::new();
    for t in boundaries(spans, end_ms) {
        wave.push_step(t, level_at(spans, t));
    }
    wave
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_channel_is_a_single_low_entry() {
        let wave = resolve_steps(&[], 300.0);
        assert_eq!(wave.to_pairs(), vec![(0.0, 0.0)]);
    }

    #[test]
    fn single_pulse_rises_and_falls() {
        let spans = [Span::new(0.0, 300.0, 1.0)];
        let wave = resolve_steps(&spans, 300.0);
        assert_eq!(wave.to_pairs(), vec![(0.0, 1.0), (300.0, 0.0)]);
    }

    #[test]
    fn pulse_not_at_origin_starts_low() {
        let spans = [Span::new(100.0, 250.0, 1.0)];
        let wave = resolve_steps(&spans, 400.0);
        assert_eq!(
            wave.to_pairs(),
            vec![(0.0, 0.0), (100.0, 1.0), (250.0, 0.0)]
        );
    }

    #[test]
    fn later_start_overrides_earlier_coverage() {
        // On over [0, 300), a fall claim over [280, 320): the fall's later
        // start wins from 280 on, so the level at 290 is already low.
        let spans = [Span::new(0.0, 300.0, 1.0), Span::new(280.0, 320.0, 0.0)];
        let wave = resolve_steps(&spans, 320.0);
        assert_eq!(wave.to_pairs(), vec![(0.0, 1.0), (280.0, 0.0)]);
        assert_eq!(wave.level_at(290.0), 0.0);
    }

    #[test]
    fn same_start_ties_go_to_the_later_declared() {
        let spans = [Span::new(50.0, 150.0, 1.0), Span::new(50.0, 150.0, 0.0)];
        let wave = resolve_steps(&spans, 200.0);
        assert_eq!(wave.to_pairs(), vec![(0.0, 0.0)]);

        let reversed = [Span::new(50.0, 150.0, 0.0), Span::new(50.0, 150.0, 1.0)];
        let wave = resolve_steps(&reversed, 200.0);
        assert_eq!(
            wave.to_pairs(),
            vec![(0.0, 0.0), (50.0, 1.0), (150.0, 0.0)]
        );
    }

    #[test]
    fn adjacent_claims_collapse_between_equal_levels() {
        let spans = [Span::new(0.0, 100.0, 1.0), Span::new(100.0, 200.0, 1.0)];
        let wave = resolve_steps(&spans, 200.0);
        assert_eq!(wave.to_pairs(), vec![(0.0, 1.0), (200.0, 0.0)]);
    }

    #[test]
    fn zero_length_span_claims_nothing() {
        let spans = [Span::new(50.0, 50.0, 1.0)];
        let wave = resolve_steps(&spans, 100.0);
        assert_eq!(wave.to_pairs(), vec![(0.0, 0.0)]);
    }

    #[test]
    fn gap_between_claims_drops_low() {
        let spans = [Span::new(0.0, 100.0, 1.0), Span::new(200.0, 300.0, 1.0)];
        let wave = resolve_steps(&spans, 300.0);
        assert_eq!(
            wave.to_pairs(),
            vec![(0.0, 1.0), (100.0, 0.0), (200.0, 1.0), (300.0, 0.0)]
        );
    }
}
