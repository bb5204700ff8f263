//! Canonical millisecond timebase
//!
//! Schedules are entered in a unit chosen per profile; everything downstream
//! of validation works in milliseconds.

use crate::error::{CompileError, CompileResult};

/// Time units a schedule may be entered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Millis,
    Seconds,
    Minutes,
}

impl TimeUnit {
    /// Every supported unit, in editor order.
    pub const ALL: [TimeUnit; 3] = [TimeUnit::Millis, TimeUnit::Seconds, TimeUnit::Minutes];

    /// Parse a persisted unit tag.
    pub fn parse(tag: &str) -> CompileResult<Self> {
        match tag {
            "ms" => Ok(TimeUnit::Millis),
            "sec" => Ok(TimeUnit::Seconds),
            "min" => Ok(TimeUnit::Minutes),
            _ => Err(CompileError::InvalidUnit {
                unit: tag.to_string(),
            }),
        }
    }

    /// The tag this unit is persisted under.
    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Millis => "ms",
            TimeUnit::Seconds => "sec",
            TimeUnit::Minutes => "min",
        }
    }

    /// Milliseconds in one of this unit.
    pub fn factor_ms(self) -> f64 {
        match self {
            TimeUnit::Millis => 1.0,
            TimeUnit::Seconds => 1_000.0,
            TimeUnit::Minutes => 60_000.0,
        }
    }

    /// Convert a raw schedule value in this unit to milliseconds.
    pub fn to_ms(self, value: f64) -> f64 {
        value * self.factor_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_tags() {
        assert_eq!(TimeUnit::parse("ms").unwrap(), TimeUnit::Millis);
        assert_eq!(TimeUnit::parse("sec").unwrap(), TimeUnit::Seconds);
        assert_eq!(TimeUnit::parse("min").unwrap(), TimeUnit::Minutes);
    }

    #[test]
    fn rejects_unknown_tag() {
        let err = TimeUnit::parse("hours").unwrap_err();
        assert_eq!(
            err,
            CompileError::InvalidUnit {
                unit: "hours".to_string()
            }
        );
    }

    #[test]
    fn tags_round_trip() {
        for unit in TimeUnit::ALL {
            assert_eq!(TimeUnit::parse(unit.as_str()).unwrap(), unit);
        }
    }

    #[test]
    fn converts_to_milliseconds() {
        assert_eq!(TimeUnit::Millis.to_ms(250.0), 250.0);
        assert_eq!(TimeUnit::Seconds.to_ms(1.5), 1_500.0);
        assert_eq!(TimeUnit::Minutes.to_ms(2.0), 120_000.0);
    }
}
