//! Per-position preview composition
//!
//! Compiled waveforms describe a single position starting at time zero.
//! On the bench, enabled positions start staggered by the profile row
//! delay, and a device channel may trail its isolator by a per-position
//! offset. Preview channels are those shifted copies, labelled for
//! plotting. Disabled positions contribute nothing and do not consume a
//! stagger slot.

use crate::engine::CompiledProfile;
use crate::profile::Profile;
use crate::waveform::Waveform;

/// One plottable channel of the bench preview.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewChannel {
    pub label: String,
    pub gpio: u32,
    /// Ramped rendition, for plotting.
    pub display: Waveform,
    /// Step rendition, what the hardware plays back.
    pub digital: Waveform,
}

/// Compose the bench preview: isolator and device channels for every
/// enabled position in declaration order, then the auxiliary channels.
///
/// Auxiliary outputs are bench-wide: never staggered, display identical
/// to digital.
pub fn preview_channels(profile: &Profile, compiled: &CompiledProfile) -> Vec<PreviewChannel> {
    let mut channels = Vec::new();
    for (slot, position) in profile.positions.iter().filter(|p| p.enabled).enumerate() {
        let base_ms = slot as f64 * profile.row_delay_ms;
        channels.push(PreviewChannel {
            label: format!("ISO P{} (GPIO{})", position.id, position.isolator_gpio),
            gpio: position.isolator_gpio,
            display: compiled.isolator_display.shifted(base_ms),
            digital: compiled.isolator_digital.shifted(base_ms),
        });
        let device_ms = base_ms + position.device_offset_ms;
        channels.push(PreviewChannel {
            label: format!("DUT P{} (GPIO{})", position.id, position.device_gpio),
            gpio: position.device_gpio,
            display: compiled.device_display.shifted(device_ms),
            digital: compiled.device_digital.shifted(device_ms),
        });
    }
    for output in profile
        .auxiliary_outputs
        .iter()
        .filter(|o| o.enabled && !o.name.is_empty())
    {
        if let Some(wave) = compiled.auxiliary.get(&output.name) {
            channels.push(PreviewChannel {
                label: format!("{} (GPIO{})", output.name, output.gpio),
                gpio: output.gpio,
                display: wave.clone(),
                digital: wave.clone(),
            });
        }
    }
    channels
}
