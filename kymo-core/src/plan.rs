//! Pin-event execution planning
//!
//! Flattens compiled waveforms into the single time-ordered edge list the
//! playback firmware consumes. Stagger rules match the preview: enabled
//! positions are offset by the row delay, device channels additionally by
//! their per-position offset, auxiliary outputs never. Timestamps are
//! rounded to whole milliseconds; the firmware tick is 1 ms.

use crate::engine::CompiledProfile;
use crate::profile::Profile;
use crate::waveform::Waveform;

/// One GPIO edge of the execution plan.
///
/// Ordering is by time, then GPIO, then level, which is also the playback
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PinEvent {
    /// Whole milliseconds from schedule start.
    pub t_ms: i64,
    pub gpio: u32,
    pub high: bool,
}

fn push_channel(plan: &mut Vec<PinEvent>, wave: &Waveform, gpio: u32, shift_ms: f64) {
    for p in wave.points() {
        plan.push(PinEvent {
            t_ms: (p.t_ms + shift_ms).round() as i64,
            gpio,
            high: p.level >= 0.5,
        });
    }
}

/// Flatten a compiled profile into time-ordered pin events.
///
/// Only enabled positions and enabled auxiliary outputs appear; with
/// nothing enabled the plan is empty. The initial level of every channel
/// is part of the plan, so playback always starts from a defined state.
pub fn execution_plan(profile: &Profile, compiled: &CompiledProfile) -> Vec<PinEvent> {
    let mut plan = Vec::new();
    for (slot, position) in profile.positions.iter().filter(|p| p.enabled).enumerate() {
        let base_ms = slot as f64 * profile.row_delay_ms;
        push_channel(
            &mut plan,
            &compiled.isolator_digital,
            position.isolator_gpio,
            base_ms,
        );
        push_channel(
            &mut plan,
            &compiled.device_digital,
            position.device_gpio,
            base_ms + position.device_offset_ms,
        );
    }
    for output in profile
        .auxiliary_outputs
        .iter()
        .filter(|o| o.enabled && !o.name.is_empty())
    {
        if let Some(wave) = compiled.auxiliary.get(&output.name) {
            push_channel(&mut plan, wave, output.gpio, 0.0);
        }
    }
    plan.sort();
    log::debug!("planned {} pin event(s) for {:?}", plan.len(), profile.name);
    plan
}
