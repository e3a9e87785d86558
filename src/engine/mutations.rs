use chrono::{NaiveDateTime, NaiveTime};
use tracing::{debug, info};
use ulid::Ulid;

use crate::limits::{MAX_TABLE_SEATS, MIN_TABLE_SEATS};
use crate::model::{Reservation, Table};
use crate::observability;

use super::validate::{can_delete_reservation, can_delete_table, validate_reservation};
use super::{Engine, EngineError};

impl Engine {
    pub async fn create_table(
        &self,
        number: u32,
        seats: Option<u32>,
    ) -> Result<Table, EngineError> {
        if let Some(s) = seats
            && !(MIN_TABLE_SEATS..=MAX_TABLE_SEATS).contains(&s) {
                return Err(EngineError::SeatsOutOfRange(s));
            }

        let table = Table {
            id: Ulid::new(),
            number,
            seats,
        };
        self.store.insert_table(table.clone()).await?;
        info!("table {number} created, seats {seats:?}");
        metrics::counter!(observability::TABLES_CREATED_TOTAL).increment(1);
        Ok(table)
    }

    /// Delete a table and, with it, all of its reservations. Refused while
    /// the table still has an upcoming reservation today.
    pub async fn delete_table(&self, id: Ulid, now: NaiveDateTime) -> Result<(), EngineError> {
        let table = self
            .store
            .table(id)
            .await?
            .ok_or(EngineError::NotFound(id))?;
        let upcoming = self
            .store
            .upcoming_reservations(id, now.date(), now.time())
            .await?;
        if !can_delete_table(&upcoming) {
            debug!("table {} has {} upcoming reservations", table.number, upcoming.len());
            return Err(EngineError::ForbiddenDelete(
                "table has upcoming reservations today",
            ));
        }
        self.store.remove_table(id).await?;
        info!("table {} deleted", table.number);
        Ok(())
    }

    /// Validate and persist a reservation on `table_id`. The date is stamped
    /// as today server-side — callers cannot book arbitrary days.
    pub async fn create_reservation(
        &self,
        table_id: Ulid,
        from: NaiveTime,
        to: NaiveTime,
        persons: u32,
        now: NaiveDateTime,
    ) -> Result<Reservation, EngineError> {
        let table = self
            .store
            .table(table_id)
            .await?
            .ok_or(EngineError::NotFound(table_id))?;
        let seat_counts = self.store.seat_counts().await?;
        let windows = self.windows_for_table(table_id, now).await?;

        if let Err(e) =
            validate_reservation(table.seats, from, to, persons, &seat_counts, &windows, now.time())
        {
            debug!("reservation on table {} rejected: {e}", table.number);
            metrics::counter!(
                observability::RESERVATIONS_REJECTED_TOTAL,
                "reason" => observability::reason_label(&e)
            )
            .increment(1);
            return Err(e);
        }

        let reservation = Reservation {
            id: Ulid::new(),
            date: now.date(),
            from_time: from,
            to_time: to,
            table_id,
            persons: Some(persons),
        };
        self.store.insert_reservation(reservation.clone()).await?;
        info!(
            "reservation {} on table {}: {from}-{to} for {persons}",
            reservation.id, table.number
        );
        metrics::counter!(observability::RESERVATIONS_CREATED_TOTAL).increment(1);
        Ok(reservation)
    }

    /// Delete a reservation. Past reservations are kept for the record and
    /// cannot be removed.
    pub async fn delete_reservation(
        &self,
        id: Ulid,
        now: NaiveDateTime,
    ) -> Result<(), EngineError> {
        let reservation = self
            .store
            .reservation(id)
            .await?
            .ok_or(EngineError::NotFound(id))?;
        if !can_delete_reservation(&reservation, now) {
            return Err(EngineError::ForbiddenDelete("reservation is in the past"));
        }
        self.store.remove_reservation(id).await?;
        info!("reservation {id} deleted");
        Ok(())
    }
}
