use crate::cursor::{RELEASE_OFFSET, REPORT_OFFSET};
use crate::duration::Duration;
use crate::equipment::Equipment;
use crate::itinerary::Itinerary;
use crate::route::Route;
use crate::schedule::CreditTotals;
use chrono::{NaiveDateTime, TimeDelta};
use std::fmt;
use std::fmt::Formatter;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub enum EventKind {
    Flight {
        carrier: String,
        equipment: Arc<Equipment>,
        deadhead: bool,
    },
    GroundDuty,
}

/// One rostered event. Flights get show-up/release padding around their
/// itinerary; ground duties report and release on their own times.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub name: String,
    pub route: Arc<Route>,
    pub itinerary: Itinerary,
    pub kind: EventKind,
    /// Row id once persisted, so a later repair pass can retract or
    /// update the exact row.
    pub store_id: Option<u64>,
}

impl Event {
    pub fn duration(&self) -> Duration {
        self.itinerary.duration()
    }

    pub fn is_deadhead(&self) -> bool {
        matches!(self.kind, EventKind::Flight { deadhead: true, .. })
    }

    pub fn report(&self) -> NaiveDateTime {
        match self.kind {
            EventKind::Flight { .. } => {
                self.itinerary.begin - TimeDelta::minutes(REPORT_OFFSET.minutes() as i64)
            }
            EventKind::GroundDuty => self.itinerary.begin,
        }
    }

    pub fn release(&self) -> NaiveDateTime {
        match self.kind {
            EventKind::Flight { .. } => {
                self.itinerary.end + TimeDelta::minutes(RELEASE_OFFSET.minutes() as i64)
            }
            EventKind::GroundDuty => self.itinerary.end,
        }
    }

    pub fn credits(&self) -> CreditTotals {
        let mut credits = CreditTotals::default();
        match self.kind {
            EventKind::Flight { deadhead: true, .. } => credits.deadhead = self.duration(),
            EventKind::Flight { deadhead: false, .. } => credits.block = self.duration(),
            EventKind::GroundDuty => {}
        }
        credits
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:6} {} {}", self.name, self.route, self.itinerary)
    }
}
