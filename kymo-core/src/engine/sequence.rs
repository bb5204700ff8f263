//! Block sequencing
//!
//! Repetition and concatenation both work on step waveforms and go through
//! the step append discipline, so seams merge instead of stacking
//! zero-width glitches.

use crate::waveform::Waveform;

/// Repeat a single-cycle step waveform `cycles` times; copy `c` is shifted
/// by `c * cycle_len_ms`.
///
/// A cycle that ends by returning to a level the next cycle immediately
/// leaves again merges seamlessly at the seam. A zero-length cycle has
/// nothing to shift and repeats to itself.
pub fn repeat_cycles(single: &Waveform, cycle_len_ms: f64, cycles: u32) -> Waveform {
    if cycles <= 1 || cycle_len_ms <= 0.0 {
        return single.clone();
    }
    let mut out = Waveform::new();
    for c in 0..cycles {
        let offset = f64::from(c) * cycle_len_ms;
        for p in single.points() {
            out.push_step(p.t_ms + offset, p.level);
        }
    }
    out
}

/// Append a block's step waveform into the profile-wide waveform, shifted
/// to start at `offset_ms`.
pub fn append_block(profile_wave: &mut Waveform, block_wave: &Waveform, offset_ms: f64) {
    for p in block_wave.points() {
        profile_wave.push_step(p.t_ms + offset_ms, p.level);
    }
}
