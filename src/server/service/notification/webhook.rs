//! Dispatcher that forwards notifications to an HTTP relay.
//!
//! Each notification is POSTed as JSON to the configured URL. The relay is responsible for
//! the actual push delivery; any non-2xx answer counts as a failed delivery.

use async_trait::async_trait;
use serde::Serialize;

use crate::server::{
    error::notification::NotificationError,
    model::flight::FlightStatus,
    service::notification::{NotificationDispatcher, Recipient},
};

/// JSON body sent to the relay.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload<'a> {
    pub kind: &'static str,
    pub subscription_id: i32,
    pub email: &'a str,
    pub device_token: Option<&'a str>,
    pub flight_number: &'a str,
    pub message: String,
}

impl<'a> WebhookPayload<'a> {
    fn new(kind: &'static str, recipient: &'a Recipient, message: String) -> Self {
        Self {
            kind,
            subscription_id: recipient.subscription_id,
            email: &recipient.email,
            device_token: recipient.device_token.as_deref(),
            flight_number: &recipient.flight_number,
            message,
        }
    }
}

pub struct WebhookDispatcher {
    http_client: reqwest::Client,
    url: String,
}

impl WebhookDispatcher {
    /// Creates a dispatcher posting to `url` with the given client.
    pub fn new(http_client: reqwest::Client, url: String) -> Self {
        Self { http_client, url }
    }

    async fn post(&self, payload: WebhookPayload<'_>) -> Result<(), NotificationError> {
        let response = self.http_client.post(&self.url).json(&payload).send().await?;

        if !response.status().is_success() {
            return Err(NotificationError::RelayStatus(response.status()));
        }

        tracing::debug!(
            kind = payload.kind,
            subscription_id = payload.subscription_id,
            "Notification accepted by relay"
        );

        Ok(())
    }
}

#[async_trait]
impl NotificationDispatcher for WebhookDispatcher {
    async fn send_subscription_confirmation(
        &self,
        recipient: &Recipient,
    ) -> Result<(), NotificationError> {
        self.post(WebhookPayload::new(
            "CONFIRMATION",
            recipient,
            recipient.confirmation_message(),
        ))
        .await
    }

    async fn send_flight_status_update(
        &self,
        recipient: &Recipient,
        old_status: Option<FlightStatus>,
        new_status: FlightStatus,
    ) -> Result<(), NotificationError> {
        self.post(WebhookPayload::new(
            "STATUS_CHANGE",
            recipient,
            recipient.status_update_message(old_status, new_status),
        ))
        .await
    }

    async fn send_delay_notification(
        &self,
        recipient: &Recipient,
        delay_minutes: i32,
    ) -> Result<(), NotificationError> {
        self.post(WebhookPayload::new(
            "DELAY",
            recipient,
            recipient.delay_message(delay_minutes),
        ))
        .await
    }

    async fn send_cancellation_notification(
        &self,
        recipient: &Recipient,
    ) -> Result<(), NotificationError> {
        self.post(WebhookPayload::new(
            "CANCELLATION",
            recipient,
            recipient.cancellation_message(),
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_uses_camel_case_fields() {
        let recipient = Recipient {
            subscription_id: 4,
            email: "a@x.com".to_string(),
            device_token: Some("tok1".to_string()),
            flight_number: "SU100".to_string(),
        };

        let payload = WebhookPayload::new("DELAY", &recipient, recipient.delay_message(45));
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["subscriptionId"], 4);
        assert_eq!(json["deviceToken"], "tok1");
        assert_eq!(json["flightNumber"], "SU100");
        assert_eq!(json["message"], "Flight SU100 is delayed by 45 minutes");
    }

    /// Expected: a connection failure surfaces as an error instead of panicking
    #[tokio::test]
    async fn unreachable_relay_is_an_error() {
        let dispatcher =
            WebhookDispatcher::new(reqwest::Client::new(), "http://127.0.0.1:9/".to_string());
        let recipient = Recipient {
            subscription_id: 1,
            email: "a@x.com".to_string(),
            device_token: None,
            flight_number: "SU100".to_string(),
        };

        let result = dispatcher.send_cancellation_notification(&recipient).await;

        assert!(result.is_err());
    }
}
