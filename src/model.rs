use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// A free stretch of clock time on a table, within a single day.
/// Never persisted — recomputed from the reservation list on every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        debug_assert!(start < end, "TimeWindow start must be before end");
        Self { start, end }
    }

    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns true if `[from, to]` lies strictly inside this window —
    /// both endpoints must clear the window bounds.
    pub fn contains_strictly(&self, from: NaiveTime, to: NaiveTime) -> bool {
        self.start < from && to < self.end
    }

    /// Render as 12-hour clock strings, e.g. `("02:00 PM", "11:59 PM")`.
    pub fn display(&self) -> (String, String) {
        (format_12h(self.start), format_12h(self.end))
    }
}

/// 12-hour `hh:MM AM/PM` rendering used by the availability listing.
pub fn format_12h(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub id: Ulid,
    /// Visible table number — unique across the restaurant.
    pub number: u32,
    /// Configured seat count, 1..=12 when present.
    pub seats: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Ulid,
    pub date: NaiveDate,
    pub from_time: NaiveTime,
    pub to_time: NaiveTime,
    pub table_id: Ulid,
    pub persons: Option<u32>,
}

impl Reservation {
    /// A reservation may only be cancelled while this holds.
    pub fn is_in_future(&self, now: NaiveDateTime) -> bool {
        self.date >= now.date() && self.from_time >= now.time()
    }
}

/// One table plus its reservations, sorted by `(date, from_time)`.
#[derive(Debug, Clone)]
pub struct TableState {
    pub table: Table,
    pub reservations: Vec<Reservation>,
}

impl TableState {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            reservations: Vec::new(),
        }
    }

    /// Insert a reservation maintaining sort order by `(date, from_time)`.
    pub fn insert_reservation(&mut self, reservation: Reservation) {
        let key = (reservation.date, reservation.from_time);
        let pos = self
            .reservations
            .binary_search_by_key(&key, |r| (r.date, r.from_time))
            .unwrap_or_else(|e| e);
        self.reservations.insert(pos, reservation);
    }

    /// Remove a reservation by id.
    pub fn remove_reservation(&mut self, id: Ulid) -> Option<Reservation> {
        if let Some(pos) = self.reservations.iter().position(|r| r.id == id) {
            Some(self.reservations.remove(pos))
        } else {
            None
        }
    }

    /// `(from, to)` pairs for reservations on `date` that have not yet
    /// started at `after`, in chronological order.
    pub fn upcoming(&self, date: NaiveDate, after: NaiveTime) -> Vec<(NaiveTime, NaiveTime)> {
        self.reservations
            .iter()
            .filter(|r| r.date == date && r.from_time > after)
            .map(|r| (r.from_time, r.to_time))
            .collect()
    }
}

/// Availability listing entry for one table: identity plus the formatted
/// free windows remaining today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableAvailability {
    pub table_id: Ulid,
    pub number: u32,
    pub seats: Option<u32>,
    pub for_date: NaiveDate,
    pub availability: Vec<(String, String)>,
}

impl TableAvailability {
    pub fn new(table: &Table, for_date: NaiveDate, windows: &[TimeWindow]) -> Self {
        Self {
            table_id: table.id,
            number: table.number,
            seats: table.seats,
            for_date,
            availability: windows.iter().map(|w| w.display()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn table() -> Table {
        Table {
            id: Ulid::new(),
            number: 1,
            seats: Some(4),
        }
    }

    fn reservation(date: NaiveDate, from: NaiveTime, to: NaiveTime) -> Reservation {
        Reservation {
            id: Ulid::new(),
            date,
            from_time: from,
            to_time: to,
            table_id: Ulid::new(),
            persons: Some(2),
        }
    }

    #[test]
    fn window_overlap() {
        let a = TimeWindow::new(t(13, 0), t(14, 0));
        let b = TimeWindow::new(t(13, 30), t(15, 0));
        let c = TimeWindow::new(t(14, 0), t(15, 0));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c)); // adjacent, not overlapping
    }

    #[test]
    fn window_contains_strictly() {
        let w = TimeWindow::new(t(13, 0), t(16, 0));
        assert!(w.contains_strictly(t(13, 30), t(15, 30)));
        // touching either bound does not count
        assert!(!w.contains_strictly(t(13, 0), t(15, 0)));
        assert!(!w.contains_strictly(t(14, 0), t(16, 0)));
    }

    #[test]
    fn window_display_is_12_hour() {
        let w = TimeWindow::new(t(14, 0), t(23, 59));
        assert_eq!(w.display(), ("02:00 PM".to_string(), "11:59 PM".to_string()));
        assert_eq!(format_12h(t(0, 5)), "12:05 AM");
    }

    #[test]
    fn reservation_in_future() {
        let now = day().and_time(t(14, 0));
        let upcoming = reservation(day(), t(16, 0), t(17, 0));
        let started = reservation(day(), t(13, 0), t(15, 0));
        assert!(upcoming.is_in_future(now));
        assert!(!started.is_in_future(now));
    }

    #[test]
    fn table_state_keeps_reservations_sorted() {
        let mut st = TableState::new(table());
        st.insert_reservation(reservation(day(), t(17, 30), t(17, 45)));
        st.insert_reservation(reservation(day(), t(13, 0), t(14, 0)));
        st.insert_reservation(reservation(day(), t(16, 0), t(16, 30)));
        let starts: Vec<_> = st.reservations.iter().map(|r| r.from_time).collect();
        assert_eq!(starts, vec![t(13, 0), t(16, 0), t(17, 30)]);
    }

    #[test]
    fn table_state_remove() {
        let mut st = TableState::new(table());
        let r = reservation(day(), t(13, 0), t(14, 0));
        let id = r.id;
        st.insert_reservation(r);
        assert!(st.remove_reservation(id).is_some());
        assert!(st.remove_reservation(id).is_none());
        assert!(st.reservations.is_empty());
    }

    #[test]
    fn upcoming_excludes_started_and_other_days() {
        let mut st = TableState::new(table());
        st.insert_reservation(reservation(day(), t(12, 0), t(13, 0))); // already started
        st.insert_reservation(reservation(day(), t(16, 0), t(16, 30)));
        st.insert_reservation(reservation(
            day().succ_opt().unwrap(),
            t(18, 0),
            t(19, 0),
        )); // tomorrow
        let upcoming = st.upcoming(day(), t(14, 0));
        assert_eq!(upcoming, vec![(t(16, 0), t(16, 30))]);
    }

    #[test]
    fn upcoming_start_boundary_is_exclusive() {
        let mut st = TableState::new(table());
        st.insert_reservation(reservation(day(), t(14, 0), t(15, 0)));
        assert!(st.upcoming(day(), t(14, 0)).is_empty());
    }

    #[test]
    fn reservation_serde_roundtrip() {
        let r = reservation(day(), t(16, 0), t(16, 30));
        let json = serde_json::to_string(&r).unwrap();
        let decoded: Reservation = serde_json::from_str(&json).unwrap();
        assert_eq!(r, decoded);
    }

    #[test]
    fn availability_view_formats_windows() {
        let tbl = table();
        let windows = vec![TimeWindow::new(t(13, 0), t(16, 0))];
        let view = TableAvailability::new(&tbl, day(), &windows);
        assert_eq!(view.number, 1);
        assert_eq!(
            view.availability,
            vec![("01:00 PM".to_string(), "04:00 PM".to_string())]
        );
    }
}
