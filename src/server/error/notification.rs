use thiserror::Error;

/// Failures while delivering a notification.
///
/// These never reach an HTTP response: `NotificationService` logs them and moves on.
#[derive(Error, Debug)]
pub enum NotificationError {
    /// The relay could not be reached or the request failed in transit.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// The relay answered with a non-success status code.
    #[error("Notification relay responded with status {0}")]
    RelayStatus(reqwest::StatusCode),

    /// The dispatcher refused the notification for another reason.
    #[error("{0}")]
    Rejected(String),
}
