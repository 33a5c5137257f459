//! Best-effort notification delivery.
//!
//! Services never talk to a delivery channel directly. They go through
//! `NotificationService`, which wraps a `NotificationDispatcher` and turns every delivery
//! failure into a log line, so a broken channel can never fail a subscription write or a
//! flight status update.

pub mod eligibility;
pub mod logging;
pub mod webhook;

use async_trait::async_trait;

use crate::server::{
    error::notification::NotificationError,
    model::{flight::FlightStatus, subscription::FlightSubscriptionDetails},
};

use self::eligibility::FlightEvent;

/// Addressing data for one subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub subscription_id: i32,
    pub email: String,
    pub device_token: Option<String>,
    pub flight_number: String,
}

impl Recipient {
    pub fn from_details(details: &FlightSubscriptionDetails) -> Self {
        Self {
            subscription_id: details.subscription.id,
            email: details.user.email.clone(),
            device_token: details.subscription.device_token.clone(),
            flight_number: details.flight.flight_number.clone(),
        }
    }

    pub fn confirmation_message(&self) -> String {
        format!(
            "You are now subscribed to status updates for flight {}",
            self.flight_number
        )
    }

    pub fn status_update_message(&self, old: Option<FlightStatus>, new: FlightStatus) -> String {
        match old {
            Some(old) => format!(
                "Flight {} status changed from {} to {}",
                self.flight_number, old, new
            ),
            None => format!("Flight {} status is now {}", self.flight_number, new),
        }
    }

    pub fn delay_message(&self, delay_minutes: i32) -> String {
        format!(
            "Flight {} is delayed by {} minutes",
            self.flight_number, delay_minutes
        )
    }

    pub fn cancellation_message(&self) -> String {
        format!("Flight {} has been cancelled", self.flight_number)
    }
}

/// Delivery channel for subscriber notifications.
///
/// Implementations report failures through `NotificationError`; callers decide whether a
/// failure matters. Inside the application that caller is always `NotificationService`.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Confirms a new or reactivated subscription.
    async fn send_subscription_confirmation(
        &self,
        recipient: &Recipient,
    ) -> Result<(), NotificationError>;

    /// Announces a status transition that is neither a delay nor a cancellation.
    async fn send_flight_status_update(
        &self,
        recipient: &Recipient,
        old_status: Option<FlightStatus>,
        new_status: FlightStatus,
    ) -> Result<(), NotificationError>;

    async fn send_delay_notification(
        &self,
        recipient: &Recipient,
        delay_minutes: i32,
    ) -> Result<(), NotificationError>;

    async fn send_cancellation_notification(
        &self,
        recipient: &Recipient,
    ) -> Result<(), NotificationError>;
}

/// Fire-and-forget wrapper around a `NotificationDispatcher`.
pub struct NotificationService<'a> {
    dispatcher: &'a dyn NotificationDispatcher,
}

impl<'a> NotificationService<'a> {
    /// Creates a new NotificationService instance.
    ///
    /// # Arguments
    /// - `dispatcher` - Delivery channel, usually `AppState::notifier`
    pub fn new(dispatcher: &'a dyn NotificationDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Sends a subscription confirmation, logging and discarding any failure.
    pub async fn confirm_subscription(&self, details: &FlightSubscriptionDetails) {
        let recipient = Recipient::from_details(details);

        if let Err(e) = self
            .dispatcher
            .send_subscription_confirmation(&recipient)
            .await
        {
            tracing::warn!(
                subscription_id = recipient.subscription_id,
                flight_number = %recipient.flight_number,
                "Failed to send subscription confirmation: {}",
                e
            );
        }
    }

    /// Sends the message matching a flight event.
    ///
    /// # Returns
    /// - `true` - The dispatcher accepted the notification
    /// - `false` - Delivery failed; the failure has been logged
    pub async fn notify_flight_event(
        &self,
        details: &FlightSubscriptionDetails,
        event: &FlightEvent,
    ) -> bool {
        let recipient = Recipient::from_details(details);

        let result = match event {
            FlightEvent::Cancellation => {
                self.dispatcher
                    .send_cancellation_notification(&recipient)
                    .await
            }
            FlightEvent::Delay { minutes } => {
                self.dispatcher
                    .send_delay_notification(&recipient, *minutes)
                    .await
            }
            FlightEvent::StatusChange { old, new } => {
                self.dispatcher
                    .send_flight_status_update(&recipient, *old, *new)
                    .await
            }
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    subscription_id = recipient.subscription_id,
                    flight_number = %recipient.flight_number,
                    "Failed to send {} notification: {}",
                    event.notification_type().as_str(),
                    e
                );
                false
            }
        }
    }
}
