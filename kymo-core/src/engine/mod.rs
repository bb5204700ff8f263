//! Waveform compilation pipeline
//!
//! One compile pass walks the profile in four stages:
//!
//! 1. classify and validate every scheduled event ([`crate::events`])
//! 2. resolve each block's channels into per-cycle step waveforms
//!    ([`resolve`], [`auxiliary`])
//! 3. sequence cycles and blocks onto the profile timeline ([`sequence`])
//! 4. synthesize display ramps over the sequenced result ([`ramp`])
//!
//! Ramps are synthesized over the fully sequenced waveform: a transition at
//! a cycle seam ramps exactly like any other, and a seam without a
//! transition stays flat. The pass is atomic; any validation failure
//! returns an error and produces no waveforms.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::EngineSettings;
use crate::error::{CompileError, CompileResult};
use crate::events::{classify, EventAction};
use crate::profile::{Block, Profile, ScheduledEvent};
use crate::units::TimeUnit;
use crate::waveform::Waveform;

pub mod auxiliary;
pub mod ramp;
pub mod resolve;
pub mod sequence;

pub use auxiliary::{resolve_edges, Edge};
pub use ramp::synthesize;
pub use resolve::{resolve_steps, Span};
pub use sequence::{append_block, repeat_cycles};

/// Everything one compile pass produces.
///
/// Digital waveforms are what the hardware plays back. Display waveforms
/// add the configured ramps and exist only for plotting; auxiliary
/// channels are digital-only, keyed by output name.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledProfile {
    pub isolator_digital: Waveform,
    pub device_digital: Waveform,
    pub isolator_display: Waveform,
    pub device_display: Waveform,
    pub auxiliary: BTreeMap<String, Waveform>,
    /// Cumulative end time of each block on the profile timeline, in ms.
    pub block_ends_ms: Vec<f64>,
    /// Total schedule length in ms.
    pub total_ms: f64,
}

fn checked_ms(
    unit: TimeUnit,
    block: &Block,
    event: &ScheduledEvent,
    field: &'static str,
    value: f64,
) -> CompileResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(CompileError::NegativeTime {
            block: block.name.clone(),
            tag: event.tag.clone(),
            field,
            value,
        });
    }
    Ok(unit.to_ms(value))
}

/// Compile a profile into per-channel waveforms.
///
/// Every enabled auxiliary output gets a channel, events or not. A profile
/// with no blocks compiles to the constant-low `[(0, 0)]` on every channel.
pub fn compile(profile: &Profile, settings: &EngineSettings) -> CompileResult<CompiledProfile> {
    let unit = TimeUnit::parse(&profile.time_units)?;
    let aux_names: BTreeSet<&str> = profile.enabled_auxiliary_names().collect();
    log::debug!(
        "compiling {:?}: {} block(s), {} auxiliary channel(s), unit {}",
        profile.name,
        profile.blocks.len(),
        aux_names.len(),
        unit.as_str(),
    );

    let mut isolator = Waveform::new();
    let mut device = Waveform::new();
    let mut auxiliary: BTreeMap<&str, Waveform> = aux_names
        .iter()
        .map(|&name| (name, Waveform::new()))
        .collect();
    let mut block_ends_ms = Vec::with_capacity(profile.blocks.len());
    let mut offset_ms = 0.0;

    for block in &profile.blocks {
        if block.cycles == 0 {
            return Err(CompileError::InvalidCycleCount {
                block: block.name.clone(),
                cycles: block.cycles,
            });
        }

        let mut iso_spans = Vec::new();
        let mut dev_spans = Vec::new();
        let mut aux_edges: BTreeMap<&str, Vec<Edge>> = aux_names
            .iter()
            .map(|&name| (name, Vec::new()))
            .collect();
        // One cycle lasts until the latest event end, auxiliary included.
        let mut cycle_ms = 0.0f64;

        for event in &block.events {
            let start_ms = checked_ms(unit, block, event, "start", event.start)?;
            let duration_ms = checked_ms(unit, block, event, "duration", event.duration)?;
            let action = classify(&event.tag, &aux_names).ok_or_else(|| {
                CompileError::UnknownEventTag {
                    block: block.name.clone(),
                    tag: event.tag.clone(),
                }
            })?;
            cycle_ms = cycle_ms.max(start_ms + duration_ms);
            if let Some(level) = action.isolator_level() {
                iso_spans.push(Span::new(start_ms, start_ms + duration_ms, level));
            }
            if let Some(level) = action.device_level() {
                dev_spans.push(Span::new(start_ms, start_ms + duration_ms, level));
            }
            if let EventAction::Auxiliary { name, switch } = action {
                if let Some(edges) = aux_edges.get_mut(name.as_str()) {
                    edges.push(Edge::new(start_ms, switch.level()));
                }
            }
        }

        log::trace!(
            "block {:?}: {} event(s), cycle {} ms x {}",
            block.name,
            block.events.len(),
            cycle_ms,
            block.cycles,
        );
        let iso_cycle = resolve_steps(&iso_spans, cycle_ms);
        let dev_cycle = resolve_steps(&dev_spans, cycle_ms);
        append_block(
            &mut isolator,
            &repeat_cycles(&iso_cycle, cycle_ms, block.cycles),
            offset_ms,
        );
        append_block(
            &mut device,
            &repeat_cycles(&dev_cycle, cycle_ms, block.cycles),
            offset_ms,
        );
        for (name, edges) in &aux_edges {
            let aux_cycle = resolve_edges(edges, cycle_ms);
            if let Some(channel) = auxiliary.get_mut(name) {
                append_block(
                    channel,
                    &repeat_cycles(&aux_cycle, cycle_ms, block.cycles),
                    offset_ms,
                );
            }
        }

        offset_ms += cycle_ms * f64::from(block.cycles);
        block_ends_ms.push(offset_ms);
    }

    // With no blocks nothing was appended; every channel still reports low.
    for wave in [&mut isolator, &mut device]
        .into_iter()
        .chain(auxiliary.values_mut())
    {
        if wave.is_empty() {
            wave.push_step(0.0, 0.0);
        }
    }

    let isolator_display = synthesize(&isolator, settings.isolator_ramp, settings.ramp_step_ms);
    let device_display = synthesize(&device, settings.device_ramp, settings.ramp_step_ms);
    let total_ms = offset_ms;
    log::debug!(
        "compiled {:?}: {} ms total, {} isolator step(s), {} device step(s)",
        profile.name,
        total_ms,
        isolator.len(),
        device.len(),
    );

    Ok(CompiledProfile {
        isolator_digital: isolator,
        device_digital: device,
        isolator_display,
        device_display,
        auxiliary: auxiliary
            .into_iter()
            .map(|(name, wave)| (name.to_owned(), wave))
            .collect(),
        block_ends_ms,
        total_ms,
    })
}
