use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A reserved time interval, optionally tied to a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub room_id: Option<String>,
}

/// Payload accepted by `create`. The id is normally generated by the caller;
/// stores fill one in when it is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub room_id: Option<String>,
}

impl BookingInput {
    pub fn into_booking(self) -> Booking {
        Booking {
            id: self.id.unwrap_or_else(new_booking_id),
            title: self.title,
            start: self.start,
            end: self.end,
            room_id: self.room_id,
        }
    }
}

impl From<&Booking> for BookingInput {
    fn from(booking: &Booking) -> Self {
        BookingInput {
            id: Some(booking.id.clone()),
            title: booking.title.clone(),
            start: booking.start,
            end: booking.end,
            room_id: booking.room_id.clone(),
        }
    }
}

pub fn new_booking_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// Row of the "Booking" table.
#[derive(Debug, FromRow)]
pub struct BookingRow {
    pub id: String,
    pub title: String,
    #[sqlx(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    #[sqlx(rename = "endTime")]
    pub end_time: Option<DateTime<Utc>>,
    #[sqlx(rename = "roomId")]
    pub room_id: Option<String>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking {
            id: row.id,
            title: row.title,
            start: row.start_time,
            end: row.end_time,
            room_id: row.room_id,
        }
    }
}

/// The fixed set of bookable rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Room {
    Room1,
    Room2,
    Room3,
}

impl Room {
    pub const ALL: [Room; 3] = [Room::Room1, Room::Room2, Room::Room3];

    pub fn id(&self) -> &'static str {
        match self {
            Room::Room1 => "room1",
            Room::Room2 => "room2",
            Room::Room3 => "room3",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Room::Room1 => "#baf91a",
            Room::Room2 => "#f91adf",
            Room::Room3 => "#17ecde",
        }
    }

    pub fn parse(id: &str) -> Option<Room> {
        Room::ALL.into_iter().find(|room| room.id() == id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomInfo {
    pub id: &'static str,
    pub color: &'static str,
}

impl From<Room> for RoomInfo {
    fn from(room: Room) -> Self {
        RoomInfo {
            id: room.id(),
            color: room.color(),
        }
    }
}

/// Display color for a booking's room. Unknown or missing rooms have none.
pub fn color_of(room_id: Option<&str>) -> Option<&'static str> {
    room_id.and_then(Room::parse).map(|room| room.color())
}

/// A booking as handed to the calendar widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub color: Option<String>,
    pub room_id: Option<String>,
}

impl From<&Booking> for CalendarEvent {
    fn from(booking: &Booking) -> Self {
        CalendarEvent {
            id: booking.id.clone(),
            title: booking.title.clone(),
            start: booking.start,
            end: booking.end,
            color: color_of(booking.room_id.as_deref()).map(str::to_string),
            room_id: booking.room_id.clone(),
        }
    }
}
