use crate::duration::Duration;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use std::fmt;
use std::fmt::Formatter;

/// A begin/end timestamp pair, `end >= begin` always.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Itinerary {
    pub begin: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Itinerary {
    pub fn new(begin: NaiveDateTime, end: NaiveDateTime) -> Itinerary {
        debug_assert!(end >= begin, "an itinerary never runs backwards");
        Itinerary { begin, end }
    }

    /// Builds from `HHMM` clock strings on a given date. Rosters print no
    /// day for the end time, so an end clock earlier than the begin clock
    /// means the event runs past midnight.
    pub fn from_clock_times(date: NaiveDate, begin: &str, end: &str) -> Option<Itinerary> {
        let begin_time = NaiveTime::parse_from_str(begin, "%H%M").ok()?;
        let end_time = NaiveTime::parse_from_str(end, "%H%M").ok()?;
        let begin = date.and_time(begin_time);
        let mut end = date.and_time(end_time);
        if end < begin {
            end += TimeDelta::days(1);
        }
        Some(Itinerary { begin, end })
    }

    pub fn from_duration(begin: NaiveDateTime, duration: Duration) -> Itinerary {
        Itinerary {
            begin,
            end: begin + TimeDelta::minutes(duration.minutes() as i64),
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::new((self.end - self.begin).num_minutes().max(0) as u32)
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.begin.format("%d%b %H:%M"),
            self.end.format("%d%b %H:%M")
        )
    }
}
