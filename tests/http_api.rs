use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use roombook::handlers::{router, AppState};
use roombook::models::{Booking, CalendarEvent};
use roombook::store::MemoryStore;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    router(AppState::new(Arc::new(MemoryStore::new())))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

fn post_booking(body: Value) -> Request<Body> {
    Request::post("/api/bookings")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::delete(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = send(&app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn empty_store_lists_nothing() {
    let (status, body) = send(&app(), get("/api/bookings")).await;
    assert_eq!(status, StatusCode::OK);
    let bookings: Vec<Booking> = serde_json::from_slice(&body).unwrap();
    assert!(bookings.is_empty());
}

#[tokio::test]
async fn create_list_and_delete() {
    let app = app();
    let (status, body) = send(
        &app,
        post_booking(json!({
            "id": "4f1c2e0a-6a8b-4a3c-9d51-0c1e2f3a4b5c",
            "title": "Alice",
            "start": "2024-01-01T09:00:00Z",
            "end": "2024-01-01T10:00:00Z",
            "roomId": "room1"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: Booking = serde_json::from_slice(&body).unwrap();
    assert_eq!(created.id, "4f1c2e0a-6a8b-4a3c-9d51-0c1e2f3a4b5c");

    let (_, body) = send(&app, get("/api/bookings")).await;
    let bookings: Vec<Booking> = serde_json::from_slice(&body).unwrap();
    assert_eq!(bookings, vec![created.clone()]);

    let (status, _) = send(&app, delete(&format!("/api/bookings/{}", created.id))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, get("/api/bookings")).await;
    let bookings: Vec<Booking> = serde_json::from_slice(&body).unwrap();
    assert!(bookings.is_empty());
}

#[tokio::test]
async fn create_without_id_or_end_is_accepted() {
    let (status, body) = send(
        &app(),
        post_booking(json!({ "title": "Bob", "start": "2024-01-02T08:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: Booking = serde_json::from_slice(&body).unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(created.end, None);
    assert_eq!(created.room_id, None);
}

#[tokio::test]
async fn deleting_unknown_id_succeeds() {
    let (status, _) = send(&app(), delete("/api/bookings/nobody")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn duplicate_id_is_a_conflict() {
    let app = app();
    let booking = json!({
        "id": "fixed",
        "title": "Alice",
        "start": "2024-01-01T09:00:00Z",
        "end": "2024-01-01T10:00:00Z"
    });
    send(&app, post_booking(booking.clone())).await;
    let (status, body) = send(&app, post_booking(booking)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["code"], "CONFLICT");
}

#[tokio::test]
async fn events_carry_room_colors() {
    let app = app();
    for (title, room) in [("Alice", Some("room1")), ("Carol", Some("room9")), ("Dan", None)] {
        send(
            &app,
            post_booking(json!({
                "title": title,
                "start": "2024-01-01T09:00:00Z",
                "end": "2024-01-01T10:00:00Z",
                "roomId": room
            })),
        )
        .await;
    }

    let (status, body) = send(&app, get("/api/events")).await;
    assert_eq!(status, StatusCode::OK);
    let events: Vec<CalendarEvent> = serde_json::from_slice(&body).unwrap();
    let colors: Vec<Option<String>> = events.into_iter().map(|e| e.color).collect();
    assert_eq!(colors, vec![Some("#baf91a".to_string()), None, None]);
}

#[tokio::test]
async fn rooms_are_listed_with_colors() {
    let (status, body) = send(&app(), get("/api/rooms")).await;
    assert_eq!(status, StatusCode::OK);
    let rooms: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        rooms,
        json!([
            { "id": "room1", "color": "#baf91a" },
            { "id": "room2", "color": "#f91adf" },
            { "id": "room3", "color": "#17ecde" }
        ])
    );
}
