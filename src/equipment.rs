use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Formatter;
use std::sync::Arc;

pub type EquipmentId = Arc<str>;

/// An aircraft type as rostered, v.gr. `737`, `38A`, `7S8`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub code: EquipmentId,
    /// Minimum cabin crew the type dispatches with.
    pub cabin_crew: u8,
}

impl Equipment {
    pub fn new(code: &str) -> Equipment {
        Equipment {
            code: Arc::from(code),
            cabin_crew: 0,
        }
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}
