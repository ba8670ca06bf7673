use chrono::{DateTime, Utc};

/// Time source for stamping quiz attempts.
///
/// Services take a `Clock` instead of calling `Utc::now()` so tests can pin time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock backed by the system time.
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    /// Returns a clock that always reports `at`.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }
}

/// Deterministic timestamp for tests (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns the deterministic test timestamp.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` pinned to [`fixed_now`].
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_the_pinned_instant() {
        let clock = fixed_clock();
        assert_eq!(clock.now(), fixed_now());
        assert_eq!(clock.now(), clock.now());
        assert_eq!(fixed_now().timestamp(), FIXED_TEST_TIMESTAMP);
    }

    #[test]
    fn system_clock_is_the_default() {
        assert_eq!(Clock::default(), Clock::system());
        let before = Utc::now();
        assert!(Clock::system().now() >= before);
    }
}
