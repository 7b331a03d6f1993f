use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::models::{new_booking_id, Booking, BookingInput, CalendarEvent, Room};
use crate::store::BookingStore;

/// Where the calendar session currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Idle,
    /// Creation dialog is open for this range.
    Selecting {
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    },
    Creating,
    /// Delete confirmation is open for this booking.
    ConfirmingDelete { target: Booking },
    Deleting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Ignored,
    Created(Booking),
    RolledBack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Ignored,
    Deleted(Booking),
    RolledBack,
}

/// View model behind the calendar widget.
///
/// Mutations are applied to the local list before the store answers. When the
/// store reports a failure the local change is undone and a message is queued
/// for the user.
pub struct CalendarController {
    store: Arc<dyn BookingStore>,
    bookings: Vec<Booking>,
    step: Step,
    notifications: Vec<String>,
}

impl CalendarController {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        CalendarController {
            store,
            bookings: Vec::new(),
            step: Step::Idle,
            notifications: Vec::new(),
        }
    }

    /// Fetches the full booking list, replacing the local copy.
    pub async fn load(&mut self) {
        match self.store.list().await {
            Ok(bookings) => {
                info!("Loaded {} bookings", bookings.len());
                self.bookings = bookings;
            }
            Err(e) => {
                self.bookings.clear();
                self.notify(format!("Could not load bookings: {}", e));
            }
        }
    }

    pub fn step(&self) -> &Step {
        &self.step
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn events(&self) -> Vec<CalendarEvent> {
        self.bookings.iter().map(CalendarEvent::from).collect()
    }

    /// Drains the messages queued by failed operations.
    pub fn take_notifications(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notifications)
    }

    /// Widget callback: the user picked a range.
    pub fn select_range(&mut self, start: DateTime<Utc>, end: Option<DateTime<Utc>>) {
        self.step = Step::Selecting { start, end };
    }

    /// Widget callback: the user clicked an event.
    pub fn activate_event(&mut self, id: &str) -> Option<Booking> {
        let target = self.bookings.iter().find(|b| b.id == id)?.clone();
        self.step = Step::ConfirmingDelete { target: target.clone() };
        Some(target)
    }

    pub fn confirmation_prompt(&self) -> Option<String> {
        match &self.step {
            Step::ConfirmingDelete { target } => {
                Some(format!("Are you sure you want to delete \"{}\"?", target.title))
            }
            _ => None,
        }
    }

    /// Closes whichever dialog is open, dropping the pending range or target.
    pub fn close_dialog(&mut self) {
        if matches!(self.step, Step::Selecting { .. } | Step::ConfirmingDelete { .. }) {
            self.step = Step::Idle;
        }
    }

    pub async fn submit(&mut self, title: &str, room: Option<Room>) -> SubmitOutcome {
        let (start, end) = match &self.step {
            Step::Selecting { start, end } => (*start, *end),
            _ => return SubmitOutcome::Ignored,
        };
        if title.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }

        let booking = Booking {
            id: new_booking_id(),
            title: title.to_string(),
            start,
            end,
            room_id: room.map(|r| r.id().to_string()),
        };
        self.step = Step::Creating;
        self.bookings.push(booking.clone());

        let result = self.store.create(BookingInput::from(&booking)).await;
        self.step = Step::Idle;
        match result {
            Ok(stored) => SubmitOutcome::Created(stored),
            Err(e) => {
                self.bookings.retain(|b| b.id != booking.id);
                self.notify(format!("Could not save booking \"{}\": {}", booking.title, e));
                SubmitOutcome::RolledBack
            }
        }
    }

    pub async fn confirm_delete(&mut self) -> DeleteOutcome {
        let target = match std::mem::replace(&mut self.step, Step::Deleting) {
            Step::ConfirmingDelete { target } => target,
            other => {
                self.step = other;
                return DeleteOutcome::Ignored;
            }
        };

        let position = self.bookings.iter().position(|b| b.id == target.id);
        if let Some(index) = position {
            self.bookings.remove(index);
        }

        let result = self.store.delete(&target.id).await;
        self.step = Step::Idle;
        match result {
            Ok(()) => DeleteOutcome::Deleted(target),
            Err(e) => {
                if let Some(index) = position {
                    let index = index.min(self.bookings.len());
                    self.bookings.insert(index, target.clone());
                }
                self.notify(format!("Could not delete booking \"{}\": {}", target.title, e));
                DeleteOutcome::RolledBack
            }
        }
    }

    fn notify(&mut self, message: String) {
        warn!("{}", message);
        self.notifications.push(message);
    }
}
