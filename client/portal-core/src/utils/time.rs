use chrono::{DateTime, Utc};

/// Source of "now" for countdown and expiry decisions.
///
/// The quiz logic never calls `Utc::now()` directly so tests can pin the
/// clock. The client clock is advisory only; the backend remains the
/// authority on whether a submission is accepted.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a fixed instant (tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
