//! Event tag classification
//!
//! Schedule rows carry free-text event tags. They are parsed exactly once,
//! before any waveform is built, into the closed [`EventAction`] set; the
//! engine core never compares tag strings after that point. Unrecognized
//! tags are a hard compile failure, never a guess.

use std::collections::BTreeSet;

pub const TAG_ISOLATOR_ON: &str = "Isolator On";
pub const TAG_ISOLATOR_OFF: &str = "Isolator Off Time";
pub const TAG_ISOLATOR_RISE: &str = "Isolator Rise Time";
pub const TAG_ISOLATOR_FALL: &str = "Isolator Fall Time";
pub const TAG_DEVICE_ON: &str = "DUT On Time";
pub const TAG_DEVICE_HOLD: &str = "DUT Hold Time";
pub const TAG_DEVICE_OFF: &str = "DUT Off Time";
pub const TAG_DEVICE_RISE: &str = "DUT Rise Time";
pub const TAG_DEVICE_FALL: &str = "DUT Fall Time";
pub const TAG_CYCLE_DELAY: &str = "Cycle Delay";

/// Base tags offered by the schedule editor, in menu order.
pub const BASE_TAGS: [&str; 10] = [
    TAG_ISOLATOR_ON,
    TAG_ISOLATOR_RISE,
    TAG_ISOLATOR_FALL,
    TAG_DEVICE_ON,
    TAG_DEVICE_HOLD,
    TAG_DEVICE_RISE,
    TAG_DEVICE_FALL,
    TAG_ISOLATOR_OFF,
    TAG_DEVICE_OFF,
    TAG_CYCLE_DELAY,
];

/// Actions on the isolator channel.
///
/// Rise and Fall are full participants of digital resolution: a rise claims
/// the high level, a fall the low level. Their sloped rendering exists only
/// in the display waveform and is driven by channel settings, not by tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolatorAction {
    On,
    Off,
    Rise,
    Fall,
}

impl IsolatorAction {
    /// Digital level this action claims.
    pub fn level(self) -> f64 {
        match self {
            IsolatorAction::On | IsolatorAction::Rise => 1.0,
            IsolatorAction::Off | IsolatorAction::Fall => 0.0,
        }
    }
}

/// Actions on the device channel.
///
/// Hold marks the device active without implying any isolator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceAction {
    On,
    Hold,
    Off,
    Rise,
    Fall,
}

impl DeviceAction {
    /// Digital level this action claims.
    pub fn level(self) -> f64 {
        match self {
            DeviceAction::On | DeviceAction::Hold | DeviceAction::Rise => 1.0,
            DeviceAction::Off | DeviceAction::Fall => 0.0,
        }
    }
}

/// Switch direction on an auxiliary channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn level(self) -> f64 {
        match self {
            Switch::On => 1.0,
            Switch::Off => 0.0,
        }
    }
}

/// Semantic action behind a scheduled event tag.
#[derive(Debug, Clone, PartialEq)]
pub enum EventAction {
    Isolator(IsolatorAction),
    Device(DeviceAction),
    /// Quiet span keeping both hardwired channels low.
    CycleDelay,
    /// Latching edge on the named auxiliary channel.
    Auxiliary { name: String, switch: Switch },
}

impl EventAction {
    /// Level this action claims on the isolator channel, if any.
    pub fn isolator_level(&self) -> Option<f64> {
        match self {
            EventAction::Isolator(a) => Some(a.level()),
            EventAction::CycleDelay => Some(0.0),
            _ => None,
        }
    }

    /// Level this action claims on the device channel, if any.
    pub fn device_level(&self) -> Option<f64> {
        match self {
            EventAction::Device(a) => Some(a.level()),
            EventAction::CycleDelay => Some(0.0),
            _ => None,
        }
    }
}

/// Map an event tag to its action.
///
/// `auxiliary` holds the names of the enabled auxiliary outputs. A tag
/// matches an auxiliary channel only as the exact `"{name} On"` or
/// `"{name} Off"` string (case-sensitive). Returns `None` for anything
/// outside the vocabulary; the caller turns that into `UnknownEventTag`
/// with block context attached.
pub fn classify(tag: &str, auxiliary: &BTreeSet<&str>) -> Option<EventAction> {
    let action = match tag {
        TAG_ISOLATOR_ON => EventAction::Isolator(IsolatorAction::On),
        TAG_ISOLATOR_OFF => EventAction::Isolator(IsolatorAction::Off),
        TAG_ISOLATOR_RISE => EventAction::Isolator(IsolatorAction::Rise),
        TAG_ISOLATOR_FALL => EventAction::Isolator(IsolatorAction::Fall),
        TAG_DEVICE_ON => EventAction::Device(DeviceAction::On),
        TAG_DEVICE_HOLD => EventAction::Device(DeviceAction::Hold),
        TAG_DEVICE_OFF => EventAction::Device(DeviceAction::Off),
        TAG_DEVICE_RISE => EventAction::Device(DeviceAction::Rise),
        TAG_DEVICE_FALL => EventAction::Device(DeviceAction::Fall),
        TAG_CYCLE_DELAY => EventAction::CycleDelay,
        _ => {
            for (suffix, switch) in [(" On", Switch::On), (" Off", Switch::Off)] {
                if let Some(name) = tag.strip_suffix(suffix) {
                    if !name.is_empty() && auxiliary.contains(name) {
                        return Some(EventAction::Auxiliary {
                            name: name.to_string(),
                            switch,
                        });
                    }
                }
            }
            return None;
        }
    };
    Some(action)
}
