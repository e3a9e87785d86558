use chrono::NaiveDateTime;
use ulid::Ulid;

use crate::model::{Reservation, Table, TableAvailability, TimeWindow};
use crate::observability;

use super::validate;
use super::{Engine, EngineError};

impl Engine {
    /// Free windows remaining today on one table.
    pub async fn availability(
        &self,
        table_id: Ulid,
        now: NaiveDateTime,
    ) -> Result<Vec<TimeWindow>, EngineError> {
        self.store
            .table(table_id)
            .await?
            .ok_or(EngineError::NotFound(table_id))?;
        metrics::counter!(observability::AVAILABILITY_QUERIES_TOTAL).increment(1);
        self.windows_for_table(table_id, now).await
    }

    /// Smallest configured seat count that fits the party, if any.
    pub async fn fit_size(&self, persons: u32) -> Result<Option<u32>, EngineError> {
        let seat_counts = self.store.seat_counts().await?;
        Ok(validate::best_fit_size(persons, &seat_counts))
    }

    /// Every table of exactly the party's fit size, each with its free
    /// windows for today. Errors when no table seats the party at all.
    pub async fn availability_for_party(
        &self,
        persons: u32,
        now: NaiveDateTime,
    ) -> Result<Vec<TableAvailability>, EngineError> {
        if !self.store.has_table_seating(persons).await? {
            return Err(EngineError::NoTableFits(persons));
        }
        let fit = self.fit_size(persons).await?;

        let mut listings = Vec::new();
        for table in self.store.list_tables().await? {
            if table.seats != fit {
                continue;
            }
            let windows = self.windows_for_table(table.id, now).await?;
            listings.push(TableAvailability::new(&table, now.date(), &windows));
        }
        metrics::counter!(observability::AVAILABILITY_QUERIES_TOTAL).increment(1);
        Ok(listings)
    }

    pub async fn list_tables(&self) -> Result<Vec<Table>, EngineError> {
        Ok(self.store.list_tables().await?)
    }

    pub async fn list_reservations(
        &self,
        table: Option<Ulid>,
    ) -> Result<Vec<Reservation>, EngineError> {
        Ok(self.store.list_reservations(table).await?)
    }

    pub async fn can_delete_table(
        &self,
        table_id: Ulid,
        now: NaiveDateTime,
    ) -> Result<bool, EngineError> {
        self.store
            .table(table_id)
            .await?
            .ok_or(EngineError::NotFound(table_id))?;
        let upcoming = self
            .store
            .upcoming_reservations(table_id, now.date(), now.time())
            .await?;
        Ok(validate::can_delete_table(&upcoming))
    }

    pub async fn can_delete_reservation(
        &self,
        id: Ulid,
        now: NaiveDateTime,
    ) -> Result<bool, EngineError> {
        let reservation = self
            .store
            .reservation(id)
            .await?
            .ok_or(EngineError::NotFound(id))?;
        Ok(validate::can_delete_reservation(&reservation, now))
    }
}
