use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use log::error;
use serde::Serialize;

use crate::error::BookingError;
use crate::models::{Booking, BookingInput, CalendarEvent, Room, RoomInfo};
use crate::store::BookingStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookingStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        AppState { store }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/bookings", get(list_bookings).post(create_booking))
        .route("/api/bookings/:id", delete(delete_booking))
        .route("/api/events", get(list_events))
        .route("/api/rooms", get(list_rooms))
        .with_state(state)
}

/// Error returned by the API as `{ "code": ..., "message": ... }`.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    code: &'static str,
    message: String,
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::DuplicateId(_) => AppError {
                status: StatusCode::CONFLICT,
                code: "CONFLICT",
                message: err.to_string(),
            },
            other => AppError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "INTERNAL_SERVER_ERROR",
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!("[{}] {}", self.code, self.message);
        }
        let body = ErrorResponse {
            code: self.code,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

pub async fn list_bookings(State(state): State<AppState>) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(state.store.list().await?))
}

pub async fn create_booking(
    State(state): State<AppState>,
    Json(input): Json<BookingInput>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let booking = state.store.create(input).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Bookings in the shape the calendar widget consumes, colors included.
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<CalendarEvent>>, AppError> {
    let bookings = state.store.list().await?;
    Ok(Json(bookings.iter().map(CalendarEvent::from).collect()))
}

pub async fn list_rooms() -> Json<Vec<RoomInfo>> {
    Json(Room::ALL.into_iter().map(RoomInfo::from).collect())
}
