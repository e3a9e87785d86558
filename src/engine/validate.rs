use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::model::{Reservation, TimeWindow};

use super::EngineError;

// ── Fit-size resolution ──────────────────────────────────────────

/// Smallest configured seat count that seats the whole party, or `None`
/// when every table is too small.
pub fn best_fit_size(persons: u32, seat_counts: &[u32]) -> Option<u32> {
    seat_counts.iter().copied().filter(|&s| s >= persons).min()
}

/// True iff the proposal lies strictly inside one of the free windows.
/// Windows never overlap, so at most one can match.
pub fn fits_free_window(from: NaiveTime, to: NaiveTime, windows: &[TimeWindow]) -> bool {
    windows.iter().any(|w| w.contains_strictly(from, to))
}

// ── Field-level checks ───────────────────────────────────────────

pub fn present_or_future_date(date: NaiveDate, today: NaiveDate) -> Result<(), EngineError> {
    if date < today {
        return Err(EngineError::PastDate);
    }
    Ok(())
}

pub fn present_or_future_time(time: NaiveTime, now: NaiveTime) -> Result<(), EngineError> {
    if time < now {
        return Err(EngineError::PastTime);
    }
    Ok(())
}

// ── Reservation validation ───────────────────────────────────────

/// Decide whether a proposed reservation on a table may be persisted.
///
/// `windows` must be the table's free windows computed at `now`;
/// `seat_counts` the distinct configured seat counts across all tables.
pub fn validate_reservation(
    table_seats: Option<u32>,
    from: NaiveTime,
    to: NaiveTime,
    persons: u32,
    seat_counts: &[u32],
    windows: &[TimeWindow],
    now: NaiveTime,
) -> Result<(), EngineError> {
    present_or_future_time(from, now)?;
    present_or_future_time(to, now)?;

    if from >= to {
        return Err(EngineError::InvalidRange);
    }

    let fit = best_fit_size(persons, seat_counts);
    if table_seats != fit {
        return Err(EngineError::SizeMismatch {
            seats: table_seats,
            fit,
        });
    }

    if !fits_free_window(from, to, windows) {
        return Err(EngineError::NoMatchingSlot);
    }

    Ok(())
}

// ── Deletion gates ───────────────────────────────────────────────

/// A table may be deleted only while nothing upcoming is booked on it today.
pub fn can_delete_table(upcoming: &[(NaiveTime, NaiveTime)]) -> bool {
    upcoming.is_empty()
}

/// A reservation may be deleted only while it is still ahead of `now`.
pub fn can_delete_reservation(reservation: &Reservation, now: NaiveDateTime) -> bool {
    reservation.is_in_future(now)
}
