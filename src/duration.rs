use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

/// A non-negative count of minutes. Roster durations never carry seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(pub u32);

impl Duration {
    pub fn new(minutes: u32) -> Duration {
        Duration(minutes)
    }

    pub fn from_hours_minutes(hours: u32, minutes: u32) -> Duration {
        Duration(hours * 60 + minutes)
    }

    /// Parses `HHMM`, `HH:MM` or `H:MM` forms, with any number of hour
    /// digits (`0340`, `2:05`, `92:05`). Anything else, including
    /// negative-looking values such as `-0175`, yields `None`.
    pub fn parse(s: &str) -> Option<Duration> {
        let (hours, minutes) = match s.split_once(':') {
            Some((h, m)) => (h, m),
            None if s.len() >= 3 => s.split_at(s.len() - 2),
            None => return None,
        };
        if hours.is_empty() || minutes.len() != 2 {
            return None;
        }
        let h: u32 = hours.parse().ok()?;
        let m: u32 = minutes.parse().ok()?;
        if m >= 60 {
            return None;
        }
        Some(Duration(h * 60 + m))
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Four-digit roster form, v.gr. `0340`, `0000`.
    pub fn hhmm(&self) -> String {
        format!("{:02}{:02}", self.0 / 60, self.0 % 60)
    }

    /// Colon form without the leading zero, blank when empty, v.gr. `3:40`, ``.
    pub fn zero_suppressed(&self) -> String {
        if self.0 == 0 {
            String::new()
        } else {
            format!("{}:{:02}", self.0 / 60, self.0 % 60)
        }
    }
}

/// Colon form, hours padded to two digits but free to grow, v.gr.
/// `03:40`, `00:00`, `92:05`.
impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        Duration(self.0 + rhs.0)
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Duration) {
        self.0 += rhs.0;
    }
}

impl Sub for Duration {
    type Output = Duration;

    fn sub(self, rhs: Duration) -> Duration {
        Duration(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Duration {
    fn sum<I: Iterator<Item = Duration>>(iter: I) -> Duration {
        iter.fold(Duration(0), |acc, d| acc + d)
    }
}
