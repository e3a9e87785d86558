mod availability;
mod error;
mod mutations;
mod queries;
mod store;
mod validate;

pub use availability::{effective_start, free_windows};
pub use error::EngineError;
pub use store::{MemoryStore, ReservationStore, SharedTableState, StoreError};
pub use validate::{
    best_fit_size, can_delete_reservation, can_delete_table, fits_free_window,
    present_or_future_date, present_or_future_time, validate_reservation,
};

use std::sync::Arc;

use chrono::NaiveDateTime;
use ulid::Ulid;

use crate::config::Hours;
use crate::model::TimeWindow;

/// Current wall-clock time in the restaurant's local timezone.
pub fn now_local() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// The reservation service: validation and availability on top of a store.
/// Stateless between requests — every call re-reads the store and recomputes
/// windows, so the engine itself needs no locks or caches.
pub struct Engine {
    store: Arc<dyn ReservationStore>,
    hours: Hours,
}

impl Engine {
    pub fn new(store: Arc<dyn ReservationStore>, hours: Hours) -> Self {
        Self { store, hours }
    }

    /// Engine over a fresh [`MemoryStore`].
    pub fn in_memory(hours: Hours) -> Self {
        Self::new(Arc::new(MemoryStore::new()), hours)
    }

    pub fn hours(&self) -> &Hours {
        &self.hours
    }

    pub fn store(&self) -> &Arc<dyn ReservationStore> {
        &self.store
    }

    /// Free windows for one table at `now`, recomputed from the store.
    async fn windows_for_table(
        &self,
        table: Ulid,
        now: NaiveDateTime,
    ) -> Result<Vec<TimeWindow>, EngineError> {
        let upcoming = self
            .store
            .upcoming_reservations(table, now.date(), now.time())
            .await?;
        Ok(free_windows(&self.hours, &upcoming, now.time()))
    }
}
