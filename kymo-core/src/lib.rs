//! Waveform compilation engine for multi-position GPIO test benches
//!
//! This crate contains all host-side logic that does not depend on a UI
//! toolkit or a transport:
//!
//! - Canonical millisecond timebase and unit parsing
//! - Event tag classification into closed channel actions
//! - Interval resolution (overlap handling, last-start-wins)
//! - Display ramp synthesis
//! - Multi-cycle, multi-block sequencing
//! - Auxiliary channel derivation
//! - Per-position preview composition and pin-event planning
//! - Persisted profile documents and bench settings

#![deny(unsafe_code)]

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod plan;
pub mod preview;
pub mod profile;
pub mod schema;
pub mod units;
pub mod waveform;

pub use config::{EngineSettings, RampTimes, RAMP_STEP_MS};
pub use engine::{compile, CompiledProfile};
pub use error::{CompileError, CompileResult};
pub use events::EventAction;
pub use plan::{execution_plan, PinEvent};
pub use preview::{preview_channels, PreviewChannel};
pub use profile::{AuxiliaryOutput, Block, PositionConfig, Profile, ScheduledEvent};
pub use schema::ProfileDocument;
pub use units::TimeUnit;
pub use waveform::{Sample, Waveform};
