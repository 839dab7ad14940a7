use chrono::{DateTime, TimeZone, Utc};

/// Source of the current instant used to compute `exp`.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// Returns `None` when `seconds` is outside chrono's representable range.
    pub fn from_timestamp(seconds: i64) -> Option<Self> {
        Utc.timestamp_opt(seconds, 0).single().map(Self::new)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_preset_instant() {
        let clock = FixedClock::from_timestamp(1_000_000_000).expect("valid timestamp");
        assert_eq!(clock.now().timestamp(), 1_000_000_000);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn fixed_clock_rejects_out_of_range() {
        assert!(FixedClock::from_timestamp(i64::MAX).is_none());
    }

    #[test]
    fn system_clock_is_after_epoch() {
        assert!(SystemClock.now().timestamp() > 1_600_000_000);
    }
}
