use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Source of "now" for the stores.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// Wall-clock time truncated to whole seconds.
    fn time(&self) -> NaiveTime {
        let now = self.now().time();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// Local calendar date and time of the host.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[cfg(test)]
pub use manual::ManualClock;
