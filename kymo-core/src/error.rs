//! Engine error types.

/// Result type for compile operations
pub type CompileResult<T> = Result<T, CompileError>;

/// Failures raised while compiling a profile.
///
/// Compilation is atomic: any of these aborts the whole request and no
/// partial waveform is returned. Ambiguous schedules (same-start overlaps,
/// an auxiliary On without a matching Off) are resolved deterministically
/// and are not errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    /// The unit tag is not one of the supported time units.
    #[error("unknown time unit {unit:?}, expected one of: ms, sec, min")]
    InvalidUnit { unit: String },

    /// An event start or duration is negative or not a finite number.
    #[error("event {tag:?} in block {block:?}: {field} must be finite and non-negative ({value})")]
    NegativeTime {
        block: String,
        tag: String,
        field: &'static str,
        value: f64,
    },

    /// A tag matches neither a base event nor any enabled auxiliary output.
    #[error("unknown event tag {tag:?} in block {block:?}")]
    UnknownEventTag { block: String, tag: String },

    /// A block declares fewer than one cycle.
    #[error("block {block:?}: cycle count must be at least 1, got {cycles}")]
    InvalidCycleCount { block: String, cycles: u32 },
}
