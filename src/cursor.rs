use crate::duration::Duration;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// Show-up padding before a duty day's first departure.
pub const REPORT_OFFSET: Duration = Duration(60);
/// Release padding after a duty day's last arrival.
pub const RELEASE_OFFSET: Duration = Duration(30);

/// The single mutable timestamp threaded through trip construction.
/// It only ever moves forward, except for [`TimeCursor::retreat`], which
/// exists solely to undo a rejected speculative [`TimeCursor::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeCursor {
    now: NaiveDateTime,
}

impl TimeCursor {
    pub fn seed(date: NaiveDate, check_in: NaiveTime) -> TimeCursor {
        TimeCursor {
            now: date.and_time(check_in),
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Report to first departure.
    pub fn start_duty_day(&mut self) {
        self.advance(REPORT_OFFSET);
    }

    /// Last arrival to release.
    pub fn end_duty_day(&mut self) {
        self.advance(RELEASE_OFFSET);
    }

    pub fn advance(&mut self, delta: Duration) -> Duration {
        self.now += TimeDelta::minutes(delta.minutes() as i64);
        delta
    }

    pub fn retreat(&mut self, delta: Duration) -> Duration {
        self.now -= TimeDelta::minutes(delta.minutes() as i64);
        delta
    }
}
