use async_trait::async_trait;
use log::error;
use reqwest::{Client, Response};
use serde::Deserialize;
use url::Url;

use crate::error::{BookingError, Result};
use crate::models::{Booking, BookingInput};
use crate::store::BookingStore;

/// Booking store living behind the HTTP API of another process.
#[derive(Debug, Clone)]
pub struct HttpBookingClient {
    client: Client,
    base_url: Url,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl HttpBookingClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(BookingError::Config(format!("{} cannot be a base URL", base_url)));
        }
        Ok(HttpBookingClient {
            client: Client::new(),
            base_url,
        })
    }

    /// Appends each segment to the base path, percent-encoding it.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.message)
        .unwrap_or(text);
    Err(BookingError::Status { status: status.as_u16(), message })
}

impl HttpBookingClient {
    async fn fetch_bookings(&self) -> Result<Vec<Booking>> {
        let response = self.client.get(self.url(&["api", "bookings"])).send().await?;
        Ok(check(response).await?.json::<Vec<Booking>>().await?)
    }

    async fn post_booking(&self, input: &BookingInput) -> Result<Booking> {
        let response = self
            .client
            .post(self.url(&["api", "bookings"]))
            .json(input)
            .send()
            .await?;
        Ok(check(response).await?.json::<Booking>().await?)
    }

    async fn delete_booking(&self, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&["api", "bookings", id]))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl BookingStore for HttpBookingClient {
    async fn list(&self) -> Result<Vec<Booking>> {
        self.fetch_bookings().await.map_err(|e| {
            error!("Error fetching bookings: {}", e);
            e
        })
    }

    async fn create(&self, input: BookingInput) -> Result<Booking> {
        self.post_booking(&input).await.map_err(|e| {
            error!("Error adding booking: {}", e);
            e
        })
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.delete_booking(id).await.map_err(|e| {
            error!("Error deleting booking: {}", e);
            e
        })
    }
}
