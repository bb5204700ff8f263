//! Engine settings and bench conventions
//!
//! Ramp times and the display sampling step are bench properties, not
//! schedule data, so they live here rather than in the profile. Settings
//! deserialize from a TOML bench file; missing keys keep their defaults.

use serde::{Deserialize, Serialize};

use crate::profile::{AuxiliaryOutput, PositionConfig};

/// Display ramp sampling interval, in ms.
pub const RAMP_STEP_MS: f64 = 1.0;

/// Test positions on a stock bench.
pub const DEFAULT_NUM_POSITIONS: u32 = 10;

/// First GPIO of the isolator bank (positions use consecutive pins).
pub const ISOLATOR_GPIO_START: u32 = 1;

/// First GPIO of the device bank.
pub const DEVICE_GPIO_START: u32 = 21;

/// First GPIO handed to auxiliary outputs.
pub const AUXILIARY_GPIO_START: u32 = 15;

/// Rise/fall pair for one hardwired channel, in ms. Zero keeps that
/// direction an instantaneous step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RampTimes {
    pub rise_ms: f64,
    pub fall_ms: f64,
}

impl RampTimes {
    pub const fn new(rise_ms: f64, fall_ms: f64) -> Self {
        RampTimes { rise_ms, fall_ms }
    }

    /// True when both directions are instantaneous.
    pub fn is_flat(&self) -> bool {
        self.rise_ms <= 0.0 && self.fall_ms <= 0.0
    }
}

impl Default for RampTimes {
    fn default() -> Self {
        RampTimes::new(0.0, 0.0)
    }
}

/// Tunable engine behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub isolator_ramp: RampTimes,
    pub device_ramp: RampTimes,
    pub ramp_step_ms: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            isolator_ramp: RampTimes::new(5.0, 3.0),
            device_ramp: RampTimes::new(2.0, 2.0),
            ramp_step_ms: RAMP_STEP_MS,
        }
    }
}

impl EngineSettings {
    /// Parse settings from a bench TOML file. Keys not present keep their
    /// defaults, so a partial file is fine:
    ///
    /// ```toml
    /// ramp_step_ms = 0.5
    ///
    /// [isolator_ramp]
    /// rise_ms = 10.0
    /// fall_ms = 4.0
    /// ```
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Stock positions `1..=count` with the conventional GPIO numbering:
/// isolators from [`ISOLATOR_GPIO_START`], devices from
/// [`DEVICE_GPIO_START`], all enabled, no device offset.
pub fn default_positions(count: u32) -> Vec<PositionConfig> {
    (0..count)
        .map(|i| PositionConfig::new(i + 1, ISOLATOR_GPIO_START + i, DEVICE_GPIO_START + i))
        .collect()
}

/// Auxiliary outputs present on a stock bench.
pub fn default_auxiliary_outputs() -> Vec<AuxiliaryOutput> {
    vec![
        AuxiliaryOutput::new("Power Supply 1", AUXILIARY_GPIO_START),
        AuxiliaryOutput::new("Power Supply 2", AUXILIARY_GPIO_START + 1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_match_bench_constants() {
        let settings = EngineSettings::default();
        assert_eq!(settings.isolator_ramp, RampTimes::new(5.0, 3.0));
        assert_eq!(settings.device_ramp, RampTimes::new(2.0, 2.0));
        assert_eq!(settings.ramp_step_ms, RAMP_STEP_MS);
        assert!(!settings.isolator_ramp.is_flat());
        assert!(RampTimes::default().is_flat());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let settings = EngineSettings::from_toml("ramp_step_ms = 0.5\n").unwrap();
        assert_eq!(settings.ramp_step_ms, 0.5);
        assert_eq!(settings.isolator_ramp, RampTimes::new(5.0, 3.0));
    }

    #[test]
    fn nested_toml_overrides_channel_ramps() {
        let text = "[device_ramp]\nrise_ms = 7.5\nfall_ms = 1.0\n";
        let settings = EngineSettings::from_toml(text).unwrap();
        assert_eq!(settings.device_ramp, RampTimes::new(7.5, 1.0));
        assert_eq!(settings.isolator_ramp, RampTimes::new(5.0, 3.0));
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(EngineSettings::from_toml("ramp_step_ms = \"fast\"").is_err());
    }

    #[test]
    fn stock_positions_use_conventional_pins() {
        let positions = default_positions(DEFAULT_NUM_POSITIONS);
        assert_eq!(positions.len(), 10);
        assert_eq!(positions[0].id, 1);
        assert_eq!(positions[0].isolator_gpio, 1);
        assert_eq!(positions[0].device_gpio, 21);
        assert_eq!(positions[9].isolator_gpio, 10);
        assert_eq!(positions[9].device_gpio, 30);
        assert!(positions.iter().all(|p| p.enabled));
    }

    #[test]
    fn stock_auxiliary_outputs() {
        let outputs = default_auxiliary_outputs();
        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0].name, "Power Supply 1");
        assert_eq!(outputs[0].gpio, 15);
        assert_eq!(outputs[1].gpio, 16);
    }
}
