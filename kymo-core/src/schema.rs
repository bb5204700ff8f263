//! Persisted profile documents
//!
//! Profiles are saved as standalone JSON files embedding both the editable
//! schedule and the waveform points compiled from it, so other tools can
//! plot a profile without running the engine. On load only the schedule
//! half is trusted; waveforms are recompiled.
//!
//! Field names follow the on-disk document format, which predates this
//! crate. They are part of the interchange contract and never renamed;
//! fields added later carry defaults so older documents keep loading.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::CompiledProfile;
use crate::profile::{AuxiliaryOutput, Block, PositionConfig, Profile, ScheduledEvent};
use crate::waveform::Waveform;

fn default_true() -> bool {
    true
}

fn default_cycles() -> u32 {
    1
}

/// One scheduled event row as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDoc {
    pub event: String,
    pub start: f64,
    pub duration: f64,
}

/// One block as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDoc {
    pub block_name: String,
    #[serde(default = "default_cycles")]
    pub cycles: u32,
    #[serde(default)]
    pub scheduled_events: Vec<EventDoc>,
}

/// One bench position as persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionDoc {
    pub position: u32,
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub isolator_gpio: u32,
    pub dut_gpio: u32,
    #[serde(default)]
    pub dut_offset_ms: f64,
}

/// One auxiliary output as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuxiliaryDoc {
    pub name: String,
    pub gpio: u32,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// A complete profile file: schedule plus compiled waveform snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDocument {
    pub profile_name: String,
    pub waveform_time_units: String,
    #[serde(default)]
    pub row_delay_ms: f64,
    #[serde(default)]
    pub blocks: Vec<BlockDoc>,
    #[serde(default)]
    pub positions: Vec<PositionDoc>,
    #[serde(default)]
    pub auxiliary_outputs: Vec<AuxiliaryDoc>,
    #[serde(default)]
    pub isolator_waveform_points: Vec<[f64; 2]>,
    #[serde(default)]
    pub dut_waveform_points: Vec<[f64; 2]>,
    #[serde(default)]
    pub isolator_display_points: Vec<[f64; 2]>,
    #[serde(default)]
    pub dut_display_points: Vec<[f64; 2]>,
    #[serde(default)]
    pub auxiliary_waveforms: BTreeMap<String, Vec<[f64; 2]>>,
}

fn pairs(wave: &Waveform) -> Vec<[f64; 2]> {
    wave.to_pairs()
        .into_iter()
        .map(|(t, level)| [t, level])
        .collect()
}

impl ProfileDocument {
    /// Snapshot a profile and its compiled waveforms for saving.
    pub fn new(profile: &Profile, compiled: &CompiledProfile) -> Self {
        ProfileDocument {
            profile_name: profile.name.clone(),
            waveform_time_units: profile.time_units.clone(),
            row_delay_ms: profile.row_delay_ms,
            blocks: profile
                .blocks
                .iter()
                .map(|b| BlockDoc {
                    block_name: b.name.clone(),
                    cycles: b.cycles,
                    scheduled_events: b
                        .events
                        .iter()
                        .map(|e| EventDoc {
                            event: e.tag.clone(),
                            start: e.start,
                            duration: e.duration,
                        })
                        .collect(),
                })
                .collect(),
            positions: profile
                .positions
                .iter()
                .map(|p| PositionDoc {
                    position: p.id,
                    enabled: p.enabled,
                    isolator_gpio: p.isolator_gpio,
                    dut_gpio: p.device_gpio,
                    dut_offset_ms: p.device_offset_ms,
                })
                .collect(),
            auxiliary_outputs: profile
                .auxiliary_outputs
                .iter()
                .map(|o| AuxiliaryDoc {
                    name: o.name.clone(),
                    gpio: o.gpio,
                    enabled: o.enabled,
                })
                .collect(),
            isolator_waveform_points: pairs(&compiled.isolator_digital),
            dut_waveform_points: pairs(&compiled.device_digital),
            isolator_display_points: pairs(&compiled.isolator_display),
            dut_display_points: pairs(&compiled.device_display),
            auxiliary_waveforms: compiled
                .auxiliary
                .iter()
                .map(|(name, wave)| (name.clone(), pairs(wave)))
                .collect(),
        }
    }

    /// Rebuild the engine-side profile from the schedule half of the
    /// document. The waveform point caches are ignored.
    pub fn profile(&self) -> Profile {
        let mut profile = Profile::new(self.profile_name.clone());
        profile.time_units = self.waveform_time_units.clone();
        profile.row_delay_ms = self.row_delay_ms;
        profile.blocks = self
            .blocks
            .iter()
            .map(|b| {
                Block::new(
                    b.block_name.clone(),
                    b.cycles,
                    b.scheduled_events
                        .iter()
                        .map(|e| ScheduledEvent::new(e.event.clone(), e.start, e.duration))
                        .collect(),
                )
            })
            .collect();
        profile.positions = self
            .positions
            .iter()
            .map(|p| PositionConfig {
                id: p.position,
                enabled: p.enabled,
                isolator_gpio: p.isolator_gpio,
                device_gpio: p.dut_gpio,
                device_offset_ms: p.dut_offset_ms,
            })
            .collect();
        profile.auxiliary_outputs = self
            .auxiliary_outputs
            .iter()
            .map(|o| AuxiliaryOutput {
                name: o.name.clone(),
                gpio: o.gpio,
                enabled: o.enabled,
            })
            .collect();
        profile
    }

    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineSettings;
    use crate::engine::compile;
    use crate::events::TAG_ISOLATOR_ON;
    use serde_json::json;

    fn sample_profile() -> Profile {
        let mut profile = Profile::new("Soak Test");
        profile.row_delay_ms = 100.0;
        profile.blocks = vec![Block::new(
            "Main",
            2,
            vec![
                ScheduledEvent::new(TAG_ISOLATOR_ON, 0.0, 300.0),
                ScheduledEvent::new("Power Supply 1 On", 50.0, 0.0),
            ],
        )];
        profile.positions = vec![PositionConfig::new(1, 1, 21)];
        profile.auxiliary_outputs = vec![AuxiliaryOutput::new("Power Supply 1", 15)];
        profile
    }

    #[test]
    fn document_round_trips_through_json() {
        let profile = sample_profile();
        let compiled = compile(&profile, &EngineSettings::default()).unwrap();
        let doc = ProfileDocument::new(&profile, &compiled);
        let text = doc.to_json_string().unwrap();
        let loaded = ProfileDocument::from_json_str(&text).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn profile_reconstruction_matches_the_original() {
        let profile = sample_profile();
        let compiled = compile(&profile, &EngineSettings::default()).unwrap();
        let doc = ProfileDocument::new(&profile, &compiled);
        assert_eq!(doc.profile(), profile);
    }

    #[test]
    fn waveform_points_serialize_as_time_level_arrays() {
        let profile = sample_profile();
        let compiled = compile(&profile, &EngineSettings::default()).unwrap();
        let doc = ProfileDocument::new(&profile, &compiled);
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["isolator_waveform_points"][0], json!([0.0, 1.0]));
        assert_eq!(value["auxiliary_waveforms"]["Power Supply 1"][1], json!([50.0, 1.0]));
    }

    #[test]
    fn legacy_document_without_newer_fields_loads() {
        let text = r#"{
            "profile_name": "Legacy",
            "waveform_time_units": "ms",
            "blocks": [
                {
                    "block_name": "Main",
                    "scheduled_events": [
                        { "event": "Isolator On", "start": 0, "duration": 300 }
                    ]
                }
            ],
            "positions": [
                { "position": 1, "isolator_gpio": 1, "dut_gpio": 21 }
            ]
        }"#;
        let doc = ProfileDocument::from_json_str(text).unwrap();
        assert_eq!(doc.blocks[0].cycles, 1);
        assert!(doc.positions[0].enabled);
        assert_eq!(doc.positions[0].dut_offset_ms, 0.0);
        assert_eq!(doc.row_delay_ms, 0.0);
        assert!(doc.auxiliary_outputs.is_empty());
        assert!(doc.auxiliary_waveforms.is_empty());

        let compiled = compile(&doc.profile(), &EngineSettings::default()).unwrap();
        assert_eq!(
            compiled.isolator_digital.to_pairs(),
            vec![(0.0, 1.0), (300.0, 0.0)]
        );
    }
}
