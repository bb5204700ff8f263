//! Profile data model
//!
//! The engine-side shapes a compile request is made of. Compiled waveforms
//! are never stored here: they are derived state, recomputed in full after
//! any edit. The persisted JSON rendition lives in [`crate::schema`].

/// One schedule row: an event tag with its start and duration in the
/// profile's time unit.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledEvent {
    pub tag: String,
    pub start: f64,
    pub duration: f64,
}

impl ScheduledEvent {
    pub fn new(tag: impl Into<String>, start: f64, duration: f64) -> Self {
        ScheduledEvent {
            tag: tag.into(),
            start,
            duration,
        }
    }
}

/// A named test phase: its own schedule, repeated `cycles` times.
///
/// Event order is declaration order, not time order; declaration order
/// breaks same-start overlap ties.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub name: String,
    pub cycles: u32,
    pub events: Vec<ScheduledEvent>,
}

impl Block {
    pub fn new(name: impl Into<String>, cycles: u32, events: Vec<ScheduledEvent>) -> Self {
        Block {
            name: name.into(),
            cycles,
            events,
        }
    }
}

/// One physical test station on the bench.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionConfig {
    pub id: u32,
    pub enabled: bool,
    pub isolator_gpio: u32,
    pub device_gpio: u32,
    /// Extra delay of the device channel relative to its isolator, in ms.
    pub device_offset_ms: f64,
}

impl PositionConfig {
    pub const fn new(id: u32, isolator_gpio: u32, device_gpio: u32) -> Self {
        PositionConfig {
            id,
            enabled: true,
            isolator_gpio,
            device_gpio,
            device_offset_ms: 0.0,
        }
    }
}

/// A user-defined binary channel (power supply, relay, ...) driven by
/// `"{name} On"` / `"{name} Off"` event tags.
#[derive(Debug, Clone, PartialEq)]
pub struct AuxiliaryOutput {
    pub name: String,
    pub gpio: u32,
    pub enabled: bool,
}

impl AuxiliaryOutput {
    pub fn new(name: impl Into<String>, gpio: u32) -> Self {
        AuxiliaryOutput {
            name: name.into(),
            gpio,
            enabled: true,
        }
    }
}

/// Root aggregate: everything one compile request needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    /// Unit tag for every event start/duration ("ms", "sec" or "min");
    /// validated when compiled.
    pub time_units: String,
    /// Stagger between consecutive enabled positions, in ms.
    pub row_delay_ms: f64,
    pub blocks: Vec<Block>,
    pub positions: Vec<PositionConfig>,
    pub auxiliary_outputs: Vec<AuxiliaryOutput>,
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Profile {
            name: name.into(),
            time_units: "ms".to_string(),
            row_delay_ms: 0.0,
            blocks: Vec::new(),
            positions: Vec::new(),
            auxiliary_outputs: Vec::new(),
        }
    }

    /// Names of the enabled auxiliary outputs, skipping empty names (an
    /// empty name can never match an event tag).
    pub fn enabled_auxiliary_names(&self) -> impl Iterator<Item = &str> {
        self.auxiliary_outputs
            .iter()
            .filter(|aux| aux.enabled && !aux.name.is_empty())
            .map(|aux| aux.name.as_str())
    }
}
