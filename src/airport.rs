use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Formatter;
use std::sync::Arc;

pub type AirportId = Arc<str>;

/// Per-diem category an airport settles under.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Viaticum {
    #[default]
    Domestic,
    Border,
    International,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub iata: AirportId,
    pub timezone: Option<String>,
    pub viaticum: Viaticum,
}

impl Airport {
    pub fn new(iata: &str) -> Airport {
        Airport {
            iata: Arc::from(iata),
            timezone: None,
            viaticum: Viaticum::default(),
        }
    }
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.iata)
    }
}
