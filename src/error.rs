use crate::duration::Duration;
use thiserror::Error;

/// Terminal outcomes of trip construction. Failure is trip-scoped:
/// one trip's error never aborts its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A flight carries no block time of its own and the duty-day
    /// aggregate could not stand in for it.
    #[error("unable to determine block time for flight {flight}")]
    UndefinedBlockTime { flight: String },

    /// A duty day closed on a different span than the roster declares.
    #[error("duty day spans {computed} against a declared {declared}")]
    DutyDayMismatch {
        computed: Duration,
        declared: Duration,
    },

    /// All duty days checked out but the trip total did not.
    #[error("trip spans {computed} TAFB against a declared {declared}")]
    TripMismatch {
        computed: Duration,
        declared: Duration,
    },
}
