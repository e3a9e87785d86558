//! In-process core for a restaurant table-reservation backend: table and
//! reservation management plus the free-window availability engine. Transport
//! and authorization layers live outside this crate.

pub mod auth;
pub mod config;
pub mod engine;
pub mod limits;
pub mod model;
pub mod observability;

pub use auth::Role;
pub use config::Hours;
pub use engine::{Engine, EngineError, MemoryStore, ReservationStore, StoreError};
pub use model::{Reservation, Table, TableAvailability, TimeWindow};
