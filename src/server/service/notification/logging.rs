//! Dispatcher that only records notifications in the application log.

use async_trait::async_trait;

use crate::server::{
    error::notification::NotificationError,
    model::flight::FlightStatus,
    service::notification::{NotificationDispatcher, Recipient},
};

/// Default dispatcher used when no relay is configured.
///
/// Emits one `info` event per notification. The recipient's email and device token stay
/// out of the log; only the subscription, flight and whether a token exists are recorded.
#[derive(Debug, Default, Clone)]
pub struct LogDispatcher;

impl LogDispatcher {
    fn emit(&self, kind: &str, recipient: &Recipient, message: &str) {
        tracing::info!(
            kind,
            subscription_id = recipient.subscription_id,
            flight_number = %recipient.flight_number,
            has_device_token = recipient.device_token.is_some(),
            "{}",
            message
        );
    }
}

#[async_trait]
impl NotificationDispatcher for LogDispatcher {
    async fn send_subscription_confirmation(
        &self,
        recipient: &Recipient,
    ) -> Result<(), NotificationError> {
        self.emit("CONFIRMATION", recipient, &recipient.confirmation_message());
        Ok(())
    }

    async fn send_flight_status_update(
        &self,
        recipient: &Recipient,
        old_status: Option<FlightStatus>,
        new_status: FlightStatus,
    ) -> Result<(), NotificationError> {
        self.emit(
            "STATUS_CHANGE",
            recipient,
            &recipient.status_update_message(old_status, new_status),
        );
        Ok(())
    }

    async fn send_delay_notification(
        &self,
        recipient: &Recipient,
        delay_minutes: i32,
    ) -> Result<(), NotificationError> {
        self.emit("DELAY", recipient, &recipient.delay_message(delay_minutes));
        Ok(())
    }

    async fn send_cancellation_notification(
        &self,
        recipient: &Recipient,
    ) -> Result<(), NotificationError> {
        self.emit("CANCELLATION", recipient, &recipient.cancellation_message());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use super::LogDispatcher;
    use crate::server::service::notification::{NotificationDispatcher, Recipient};

    #[derive(Clone, Default)]
    struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Expected: the log line names the flight but carries neither the email nor the token
    #[tokio::test]
    async fn log_line_omits_contact_details() {
        let captured = CaptureWriter::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);
        let recipient = Recipient {
            subscription_id: 7,
            email: "traveller@example.com".to_string(),
            device_token: Some("tok1".to_string()),
            flight_number: "SU100".to_string(),
        };

        LogDispatcher
            .send_cancellation_notification(&recipient)
            .await
            .unwrap();

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("SU100"));
        assert!(output.contains("has_device_token=true"));
        assert!(!output.contains("tok1"));
        assert!(!output.contains("traveller@example.com"));
    }
}
