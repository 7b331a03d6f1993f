use async_trait::async_trait;
use log::{debug, error};
use tokio::sync::Mutex;

use super::BookingStore;
use crate::error::{BookingError, Result};
use crate::models::{Booking, BookingInput};

/// Process-lifetime store. Built once at startup and shared by handle; its
/// contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    bookings: Mutex<Vec<Booking>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Booking>> {
        Ok(self.bookings.lock().await.clone())
    }

    async fn create(&self, input: BookingInput) -> Result<Booking> {
        let booking = input.into_booking();
        let mut bookings = self.bookings.lock().await;
        if bookings.iter().any(|b| b.id == booking.id) {
            error!("Error adding booking: id {} already exists", booking.id);
            return Err(BookingError::DuplicateId(booking.id));
        }
        debug!("Adding booking {} ({})", booking.id, booking.title);
        bookings.push(booking.clone());
        Ok(booking)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut bookings = self.bookings.lock().await;
        let before = bookings.len();
        bookings.retain(|b| b.id != id);
        if bookings.len() == before {
            debug!("Booking {} not found, nothing to delete", id);
        }
        Ok(())
    }
}
