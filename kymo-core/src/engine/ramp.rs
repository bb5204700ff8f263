//! Display ramp synthesis
//!
//! Hardware always receives instantaneous steps; the sloped rendition of a
//! transition exists only in the display waveform. Ramp durations come from
//! the per-channel settings, so every rising edge of a channel ramps alike,
//! seams included.

use crate::config::{RampTimes, RAMP_STEP_MS};
use crate::waveform::Waveform;

/// Expand each instantaneous transition of a digital step waveform into a
/// linear display ramp.
///
/// Rising edges spread over `times.rise_ms`, falling edges over
/// `times.fall_ms`, sampled every `step_ms` with both endpoints included:
/// an anchor holding the old level at the transition time, then interior
/// samples, then the new level at transition + duration. A zero duration
/// keeps that direction instantaneous; a flat configuration returns the
/// digital waveform unchanged. A ramp longer than the gap to the next
/// transition is truncated there. A non-positive `step_ms` falls back to
/// [`RAMP_STEP_MS`].
pub fn synthesize(digital: &Waveform, times: RampTimes, step_ms: f64) -> Waveform {
    if times.is_flat() {
        return digital.clone();
    }
    let step = if step_ms > 0.0 { step_ms } else { RAMP_STEP_MS };
    let pts = digital.points();
    let mut out = Waveform::new();
    for (i, p) in pts.iter().enumerate() {
        if i == 0 {
            out.push_sample(p.t_ms, p.level);
            continue;
        }
        let prev = pts[i - 1];
        let dur = if p.level > prev.level {
            times.rise_ms
        } else {
            times.fall_ms
        };
        if dur <= 0.0 {
            out.push_sample(p.t_ms, p.level);
            continue;
        }
        let limit = pts.get(i + 1).map_or(f64::INFINITY, |n| n.t_ms);
        // the old level holds right up to the transition time
        out.push_sample(p.t_ms, prev.level);
        let swing = p.level - prev.level;
        let mut k = 1u32;
        loop {
            let t = p.t_ms + f64::from(k) * step;
            if t >= p.t_ms + dur || t >= limit {
                break;
            }
            out.push_sample(t, prev.level + swing * (t - p.t_ms) / dur);
            k += 1;
        }
        let end = p.t_ms + dur;
        if end < limit {
            out.push_sample(end, p.level);
        }
        // a truncated ramp hands over to the next transition's anchor
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digital(pairs: &[(f64, f64)]) -> Waveform {
        let mut w = Waveform::new();
        for &(t, level) in pairs {
            w.push_step(t, level);
        }
        w
    }

    #[test]
    fn flat_settings_return_the_digital_waveform() {
        let dig = digital(&[(0.0, 1.0), (300.0, 0.0)]);
        let display = synthesize(&dig, RampTimes::new(0.0, 0.0), 1.0);
        assert_eq!(display, dig);
    }

    #[test]
    fn rising_edge_expands_to_anchored_samples() {
        let dig = digital(&[(0.0, 0.0), (100.0, 1.0)]);
        let display = synthesize(&dig, RampTimes::new(5.0, 0.0), 1.0);
        assert_eq!(
            display.to_pairs(),
            vec![
                (0.0, 0.0),
                (100.0, 0.0),
                (101.0, 0.2),
                (102.0, 0.4),
                (103.0, 0.6),
                (104.0, 0.8),
                (105.0, 1.0),
            ]
        );
    }

    #[test]
    fn falling_edge_uses_the_fall_time() {
        let dig = digital(&[(0.0, 1.0), (300.0, 0.0)]);
        let display = synthesize(&dig, RampTimes::new(0.0, 2.0), 1.0);
        assert_eq!(
            display.to_pairs(),
            vec![(0.0, 1.0), (300.0, 1.0), (301.0, 0.5), (302.0, 0.0)]
        );
    }

    #[test]
    fn zero_duration_direction_stays_instantaneous() {
        let dig = digital(&[(0.0, 0.0), (100.0, 1.0), (300.0, 0.0)]);
        let display = synthesize(&dig, RampTimes::new(2.0, 0.0), 1.0);
        assert_eq!(
            display.to_pairs(),
            vec![
                (0.0, 0.0),
                (100.0, 0.0),
                (101.0, 0.5),
                (102.0, 1.0),
                (300.0, 0.0),
            ]
        );
    }

    #[test]
    fn ramp_truncates_at_the_next_transition() {
        let dig = digital(&[(0.0, 0.0), (100.0, 1.0), (102.0, 0.0)]);
        let display = synthesize(&dig, RampTimes::new(5.0, 0.0), 1.0);
        assert_eq!(
            display.to_pairs(),
            vec![(0.0, 0.0), (100.0, 0.0), (101.0, 0.2), (102.0, 0.0)]
        );
    }

    #[test]
    fn endpoints_are_inclusive_for_fractional_steps() {
        let dig = digital(&[(0.0, 0.0), (50.0, 1.0)]);
        let display = synthesize(&dig, RampTimes::new(0.5, 0.0), 1.0);
        assert_eq!(
            display.to_pairs(),
            vec![(0.0, 0.0), (50.0, 0.0), (50.5, 1.0)]
        );
    }
}
