use chrono::NaiveTime;

/// The restaurant's daily operating window. Read once at startup and passed
/// into [`crate::Engine`] — never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hours {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl Default for Hours {
    fn default() -> Self {
        Self {
            open: NaiveTime::from_hms_opt(12, 0, 0).expect("valid opening time"),
            close: NaiveTime::from_hms_opt(23, 59, 0).expect("valid closing time"),
        }
    }
}

impl Hours {
    pub fn new(open: NaiveTime, close: NaiveTime) -> Self {
        debug_assert!(open < close, "operating window must be non-empty");
        Self { open, close }
    }

    /// Read `RESERVATION_STARTING_FROM_TIME` / `RESERVATION_ENDS_AT_TIME`
    /// (`%H:%M`), falling back to 12:00 / 23:59 on absence or parse failure.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            open: parse_or(
                std::env::var("RESERVATION_STARTING_FROM_TIME").ok(),
                defaults.open,
            ),
            close: parse_or(
                std::env::var("RESERVATION_ENDS_AT_TIME").ok(),
                defaults.close,
            ),
        }
    }
}

fn parse_or(value: Option<String>, fallback: NaiveTime) -> NaiveTime {
    value
        .and_then(|s| NaiveTime::parse_from_str(&s, "%H:%M").ok())
        .unwrap_or(fallback)
}
