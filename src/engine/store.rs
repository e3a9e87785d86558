use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::RwLock;
use ulid::Ulid;

use crate::model::{Reservation, Table, TableState};

pub type SharedTableState = Arc<RwLock<TableState>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    TableNotFound(Ulid),
    ReservationNotFound(Ulid),
    DuplicateTableNumber(u32),
    DuplicateSlot {
        date: NaiveDate,
        from: NaiveTime,
        to: NaiveTime,
    },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::TableNotFound(id) => write!(f, "table not found: {id}"),
            StoreError::ReservationNotFound(id) => write!(f, "reservation not found: {id}"),
            StoreError::DuplicateTableNumber(number) => {
                write!(f, "table number already taken: {number}")
            }
            StoreError::DuplicateSlot { date, from, to } => {
                write!(f, "slot already reserved: {date} {from}-{to}")
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Read/write access to tables and reservations, as consumed by the engine.
/// Implementations enforce the two persistence-level uniqueness rules: table
/// `number`, and the system-wide `(date, from, to)` reservation stamp.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn insert_table(&self, table: Table) -> Result<(), StoreError>;
    async fn table(&self, id: Ulid) -> Result<Option<Table>, StoreError>;
    async fn list_tables(&self) -> Result<Vec<Table>, StoreError>;
    /// Remove a table together with all of its reservations.
    async fn remove_table(&self, id: Ulid) -> Result<Table, StoreError>;

    /// Distinct configured seat counts, ascending.
    async fn seat_counts(&self) -> Result<Vec<u32>, StoreError>;
    async fn has_table_seating(&self, persons: u32) -> Result<bool, StoreError>;

    async fn insert_reservation(&self, reservation: Reservation) -> Result<(), StoreError>;
    async fn reservation(&self, id: Ulid) -> Result<Option<Reservation>, StoreError>;
    async fn list_reservations(&self, table: Option<Ulid>) -> Result<Vec<Reservation>, StoreError>;
    async fn remove_reservation(&self, id: Ulid) -> Result<Reservation, StoreError>;

    /// `(from, to)` pairs for the table's reservations on `date` with
    /// `from > after`, in chronological order.
    async fn upcoming_reservations(
        &self,
        table: Ulid,
        date: NaiveDate,
        after: NaiveTime,
    ) -> Result<Vec<(NaiveTime, NaiveTime)>, StoreError>;
}

/// In-process reference store. One lock per table, plus reverse indexes for
/// reservation lookup and the uniqueness rules.
pub struct MemoryStore {
    tables: DashMap<Ulid, SharedTableState>,
    /// Table number → table id, backing the unique-number rule.
    numbers: DashMap<u32, Ulid>,
    /// Reverse lookup: reservation id → table id.
    reservation_to_table: DashMap<Ulid, Ulid>,
    /// Claimed `(date, from, to)` stamps → reservation id.
    slots: DashMap<(NaiveDate, NaiveTime, NaiveTime), Ulid>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: DashMap::new(),
            numbers: DashMap::new(),
            reservation_to_table: DashMap::new(),
            slots: DashMap::new(),
        }
    }

    fn state(&self, id: Ulid) -> Option<SharedTableState> {
        self.tables.get(&id).map(|e| e.value().clone())
    }

    fn all_states(&self) -> Vec<SharedTableState> {
        self.tables.iter().map(|e| e.value().clone()).collect()
    }
}

#[async_trait]
impl ReservationStore for MemoryStore {
    async fn insert_table(&self, table: Table) -> Result<(), StoreError> {
        match self.numbers.entry(table.number) {
            Entry::Occupied(_) => return Err(StoreError::DuplicateTableNumber(table.number)),
            Entry::Vacant(vacant) => {
                vacant.insert(table.id);
            }
        }
        self.tables
            .insert(table.id, Arc::new(RwLock::new(TableState::new(table))));
        Ok(())
    }

    async fn table(&self, id: Ulid) -> Result<Option<Table>, StoreError> {
        match self.state(id) {
            Some(state) => Ok(Some(state.read().await.table.clone())),
            None => Ok(None),
        }
    }

    async fn list_tables(&self) -> Result<Vec<Table>, StoreError> {
        let mut tables = Vec::new();
        for state in self.all_states() {
            tables.push(state.read().await.table.clone());
        }
        tables.sort_by_key(|t| t.number);
        Ok(tables)
    }

    async fn remove_table(&self, id: Ulid) -> Result<Table, StoreError> {
        let (_, state) = self
            .tables
            .remove(&id)
            .ok_or(StoreError::TableNotFound(id))?;
        let guard = state.read().await;
        for reservation in &guard.reservations {
            self.slots.remove(&(
                reservation.date,
                reservation.from_time,
                reservation.to_time,
            ));
            self.reservation_to_table.remove(&reservation.id);
        }
        self.numbers.remove(&guard.table.number);
        Ok(guard.table.clone())
    }

    async fn seat_counts(&self) -> Result<Vec<u32>, StoreError> {
        let mut counts: Vec<u32> = Vec::new();
        for state in self.all_states() {
            if let Some(seats) = state.read().await.table.seats
                && !counts.contains(&seats) {
                    counts.push(seats);
                }
        }
        counts.sort_unstable();
        Ok(counts)
    }

    async fn has_table_seating(&self, persons: u32) -> Result<bool, StoreError> {
        for state in self.all_states() {
            if let Some(seats) = state.read().await.table.seats
                && seats >= persons {
                    return Ok(true);
                }
        }
        Ok(false)
    }

    async fn insert_reservation(&self, reservation: Reservation) -> Result<(), StoreError> {
        let state = self
            .state(reservation.table_id)
            .ok_or(StoreError::TableNotFound(reservation.table_id))?;

        // The stamp is claimed system-wide, not per table.
        let stamp = (
            reservation.date,
            reservation.from_time,
            reservation.to_time,
        );
        match self.slots.entry(stamp) {
            Entry::Occupied(_) => {
                return Err(StoreError::DuplicateSlot {
                    date: reservation.date,
                    from: reservation.from_time,
                    to: reservation.to_time,
                });
            }
            Entry::Vacant(vacant) => {
                vacant.insert(reservation.id);
            }
        }

        self.reservation_to_table
            .insert(reservation.id, reservation.table_id);
        state.write().await.insert_reservation(reservation);
        Ok(())
    }

    async fn reservation(&self, id: Ulid) -> Result<Option<Reservation>, StoreError> {
        let Some(table_id) = self.reservation_to_table.get(&id).map(|e| *e.value()) else {
            return Ok(None);
        };
        let Some(state) = self.state(table_id) else {
            return Ok(None);
        };
        let guard = state.read().await;
        Ok(guard.reservations.iter().find(|r| r.id == id).cloned())
    }

    async fn list_reservations(&self, table: Option<Ulid>) -> Result<Vec<Reservation>, StoreError> {
        let mut reservations = Vec::new();
        match table {
            Some(id) => {
                let state = self.state(id).ok_or(StoreError::TableNotFound(id))?;
                reservations.extend(state.read().await.reservations.iter().cloned());
            }
            None => {
                for state in self.all_states() {
                    reservations.extend(state.read().await.reservations.iter().cloned());
                }
                reservations.sort_by_key(|r| (r.date, r.from_time));
            }
        }
        Ok(reservations)
    }

    async fn remove_reservation(&self, id: Ulid) -> Result<Reservation, StoreError> {
        let table_id = self
            .reservation_to_table
            .get(&id)
            .map(|e| *e.value())
            .ok_or(StoreError::ReservationNotFound(id))?;
        let state = self
            .state(table_id)
            .ok_or(StoreError::ReservationNotFound(id))?;
        let removed = state
            .write()
            .await
            .remove_reservation(id)
            .ok_or(StoreError::ReservationNotFound(id))?;
        self.slots
            .remove(&(removed.date, removed.from_time, removed.to_time));
        self.reservation_to_table.remove(&id);
        Ok(removed)
    }

    async fn upcoming_reservations(
        &self,
        table: Ulid,
        date: NaiveDate,
        after: NaiveTime,
    ) -> Result<Vec<(NaiveTime, NaiveTime)>, StoreError> {
        let state = self.state(table).ok_or(StoreError::TableNotFound(table))?;
        let guard = state.read().await;
        Ok(guard.upcoming(date, after))
    }
}
