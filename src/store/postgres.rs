use async_trait::async_trait;
use log::error;
use sqlx::PgPool;

use super::BookingStore;
use crate::error::{BookingError, Result};
use crate::models::{Booking, BookingInput, BookingRow};

const UNIQUE_VIOLATION: &str = "23505";

pub struct PgBookingStore {
    pool: PgPool,
}

impl PgBookingStore {
    pub fn new(pool: PgPool) -> Self {
        PgBookingStore { pool }
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn list(&self) -> Result<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"SELECT id, title, "startTime", "endTime", "roomId" FROM "Booking""#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Error fetching bookings: {}", e);
            e
        })?;
        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn create(&self, input: BookingInput) -> Result<Booking> {
        let booking = input.into_booking();
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            INSERT INTO "Booking" (id, title, "startTime", "endTime", "roomId")
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, "startTime", "endTime", "roomId"
            "#,
        )
        .bind(&booking.id)
        .bind(&booking.title)
        .bind(booking.start)
        .bind(booking.end)
        .bind(&booking.room_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Error adding booking: {}", e);
            let duplicate = matches!(
                &e,
                sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION)
            );
            if duplicate {
                BookingError::DuplicateId(booking.id.clone())
            } else {
                BookingError::Database(e)
            }
        })?;
        Ok(row.into())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query(r#"DELETE FROM "Booking" WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Error deleting booking: {}", e);
                e
            })?;
        Ok(())
    }
}
