use crate::duration::Duration;
use crate::event::Event;
use crate::itinerary::Itinerary;
use chrono::{NaiveDate, NaiveDateTime};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// The four additive pay-time buckets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CreditTotals {
    /// Operating flight time.
    pub block: Duration,
    /// Positioning time flown as a passenger.
    pub deadhead: Duration,
    /// Report-to-release span per duty day.
    pub duty: Duration,
    /// Report-to-release span per trip.
    pub tafb: Duration,
}

impl Add for CreditTotals {
    type Output = CreditTotals;

    fn add(self, rhs: CreditTotals) -> CreditTotals {
        CreditTotals {
            block: self.block + rhs.block,
            deadhead: self.deadhead + rhs.deadhead,
            duty: self.duty + rhs.duty,
            tafb: self.tafb + rhs.tafb,
        }
    }
}

impl AddAssign for CreditTotals {
    fn add_assign(&mut self, rhs: CreditTotals) {
        *self = *self + rhs;
    }
}

impl Sum for CreditTotals {
    fn sum<I: Iterator<Item = CreditTotals>>(iter: I) -> CreditTotals {
        iter.fold(CreditTotals::default(), |acc, c| acc + c)
    }
}

/// One continuous on-duty period. Always holds at least one event.
#[derive(Clone, Debug, PartialEq)]
pub struct DutyDay {
    pub events: Vec<Event>,
}

impl DutyDay {
    pub fn new(events: Vec<Event>) -> DutyDay {
        debug_assert!(!events.is_empty(), "a duty day holds at least one event");
        DutyDay { events }
    }

    pub fn report(&self) -> NaiveDateTime {
        self.events[0].report()
    }

    pub fn release(&self) -> NaiveDateTime {
        self.events[self.events.len() - 1].release()
    }

    pub fn duration(&self) -> Duration {
        Duration::new((self.release() - self.report()).num_minutes().max(0) as u32)
    }

    pub fn compute_credits(&self) -> CreditTotals {
        let mut credits: CreditTotals = self.events.iter().map(Event::credits).sum();
        credits.duty = self.duration();
        credits
    }
}

/// A pairing: consecutive duty days flown away from base. Trip numbers
/// recur across the month, so identity is (number, dated).
#[derive(Clone, Debug, PartialEq)]
pub struct Trip {
    pub number: String,
    pub dated: NaiveDate,
    pub duty_days: Vec<DutyDay>,
}

impl Trip {
    pub fn new(number: String, dated: NaiveDate) -> Trip {
        Trip {
            number,
            dated,
            duty_days: Vec::new(),
        }
    }

    pub fn push(&mut self, duty_day: DutyDay) {
        self.duty_days.push(duty_day);
    }

    pub fn report(&self) -> NaiveDateTime {
        self.duty_days[0].report()
    }

    pub fn release(&self) -> NaiveDateTime {
        self.duty_days[self.duty_days.len() - 1].release()
    }

    /// Time away from base: trip report to trip release.
    pub fn duration(&self) -> Duration {
        Duration::new((self.release() - self.report()).num_minutes().max(0) as u32)
    }

    pub fn compute_credits(&self) -> CreditTotals {
        let mut credits: CreditTotals = self.duty_days.iter().map(DutyDay::compute_credits).sum();
        credits.tafb = self.duration();
        credits
    }
}

/// A non-working roster entry: vacation, day off, standby marker.
/// Carries no credit of any kind.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub name: String,
    pub itinerary: Itinerary,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LineEntry {
    Trip(Trip),
    DutyDay(DutyDay),
    Marker(Marker),
}

impl LineEntry {
    pub fn compute_credits(&self) -> CreditTotals {
        match self {
            LineEntry::Trip(trip) => trip.compute_credits(),
            LineEntry::DutyDay(duty_day) => duty_day.compute_credits(),
            LineEntry::Marker(_) => CreditTotals::default(),
        }
    }
}

/// One crew member's month.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Line {
    pub year: i32,
    pub month: u32,
    pub entries: Vec<LineEntry>,
}

impl Line {
    pub fn new(year: i32, month: u32) -> Line {
        Line {
            year,
            month,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: LineEntry) {
        self.entries.push(entry);
    }

    pub fn compute_credits(&self) -> CreditTotals {
        self.entries.iter().map(LineEntry::compute_credits).sum()
    }
}
