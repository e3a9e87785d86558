use ulid::Ulid;

use super::store::StoreError;

#[derive(Debug)]
pub enum EngineError {
    /// `from_time` does not precede `to_time`.
    InvalidRange,
    /// The chosen table is not the smallest one that seats the party.
    SizeMismatch {
        seats: Option<u32>,
        fit: Option<u32>,
    },
    /// No free window strictly contains the requested interval.
    NoMatchingSlot,
    /// No configured table seats a party of this size.
    NoTableFits(u32),
    NotFound(Ulid),
    PastDate,
    PastTime,
    SeatsOutOfRange(u32),
    ForbiddenDelete(&'static str),
    Storage(StoreError),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidRange => write!(f, "invalid from_time and to_time"),
            EngineError::SizeMismatch { seats, fit } => {
                write!(
                    f,
                    "this table can not accept this number of customers (seats: {seats:?}, fit: {fit:?})"
                )
            }
            EngineError::NoMatchingSlot => {
                write!(f, "no free time slot contains the requested interval")
            }
            EngineError::NoTableFits(persons) => {
                write!(f, "no table fits a party of {persons}")
            }
            EngineError::NotFound(id) => write!(f, "not found: {id}"),
            EngineError::PastDate => write!(f, "the date cannot be in the past"),
            EngineError::PastTime => write!(f, "the time cannot be in the past"),
            EngineError::SeatsOutOfRange(seats) => {
                write!(f, "seat count {seats} outside the configurable range")
            }
            EngineError::ForbiddenDelete(reason) => write!(f, "deletion refused: {reason}"),
            EngineError::Storage(e) => write!(f, "storage error: {e}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for EngineError {
    fn from(e: StoreError) -> Self {
        EngineError::Storage(e)
    }
}
