use std::sync::Mutex;

use async_trait::async_trait;

use crate::server::{
    error::notification::NotificationError,
    model::{flight::FlightStatus, user::User},
    service::notification::{NotificationDispatcher, Recipient},
};

mod subscription;

/// Notification captured by `RecordingDispatcher`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Confirmation(Recipient),
    StatusUpdate(Recipient, Option<FlightStatus>, FlightStatus),
    Delay(Recipient, i32),
    Cancellation(Recipient),
}

/// Dispatcher that records every notification it accepts.
#[derive(Default)]
pub struct RecordingDispatcher {
    sent: Mutex<Vec<Sent>>,
}

impl RecordingDispatcher {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, sent: Sent) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push(sent);
        Ok(())
    }
}

#[async_trait]
impl NotificationDispatcher for RecordingDispatcher {
    async fn send_subscription_confirmation(
        &self,
        recipient: &Recipient,
    ) -> Result<(), NotificationError> {
        self.record(Sent::Confirmation(recipient.clone()))
    }

    async fn send_flight_status_update(
        &self,
        recipient: &Recipient,
        old_status: Option<FlightStatus>,
        new_status: FlightStatus,
    ) -> Result<(), NotificationError> {
        self.record(Sent::StatusUpdate(recipient.clone(), old_status, new_status))
    }

    async fn send_delay_notification(
        &self,
        recipient: &Recipient,
        delay_minutes: i32,
    ) -> Result<(), NotificationError> {
        self.record(Sent::Delay(recipient.clone(), delay_minutes))
    }

    async fn send_cancellation_notification(
        &self,
        recipient: &Recipient,
    ) -> Result<(), NotificationError> {
        self.record(Sent::Cancellation(recipient.clone()))
    }
}

/// Dispatcher whose every delivery fails.
pub struct FailingDispatcher;

#[async_trait]
impl NotificationDispatcher for FailingDispatcher {
    async fn send_subscription_confirmation(
        &self,
        _recipient: &Recipient,
    ) -> Result<(), NotificationError> {
        Err(NotificationError::Rejected("relay down".to_string()))
    }

    async fn send_flight_status_update(
        &self,
        _recipient: &Recipient,
        _old_status: Option<FlightStatus>,
        _new_status: FlightStatus,
    ) -> Result<(), NotificationError> {
        Err(NotificationError::Rejected("relay down".to_string()))
    }

    async fn send_delay_notification(
        &self,
        _recipient: &Recipient,
        _delay_minutes: i32,
    ) -> Result<(), NotificationError> {
        Err(NotificationError::Rejected("relay down".to_string()))
    }

    async fn send_cancellation_notification(
        &self,
        _recipient: &Recipient,
    ) -> Result<(), NotificationError> {
        Err(NotificationError::Rejected("relay down".to_string()))
    }
}

/// Converts a factory-created user row into the domain model controllers pass to services.
pub fn as_user(model: entity::user::Model) -> User {
    User::from_entity(model)
}
