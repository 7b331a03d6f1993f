use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use crate::config::StoreBackend;
use crate::db::{ensure_schema, get_db_pool};
use crate::error::Result;
use crate::models::{Booking, BookingInput};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgBookingStore;

/// Owner of booking records.
///
/// Every implementation logs a failure where it happens and hands it back to
/// the caller; nothing is swallowed.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Booking>>;

    /// Stores the booking under `input.id`, or a fresh id when none is given.
    async fn create(&self, input: BookingInput) -> Result<Booking>;

    /// Removing an id that is not stored succeeds without doing anything.
    async fn delete(&self, id: &str) -> Result<()>;
}

pub async fn build_store(backend: &StoreBackend) -> Result<Arc<dyn BookingStore>> {
    match backend {
        StoreBackend::Memory => {
            info!("Using in-memory booking store, bookings are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Postgres { database_url, max_connections } => {
            let pool = get_db_pool(database_url, *max_connections).await?;
            ensure_schema(&pool).await?;
            info!("Using PostgreSQL booking store");
            Ok(Arc::new(PgBookingStore::new(pool)))
        }
    }
}
