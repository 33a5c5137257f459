//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and then cloned for each request
//! handler through Axum's state extraction. Both fields are cheap to clone: the
//! database connection is a pool handle and the dispatcher sits behind an `Arc`.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::server::service::notification::NotificationDispatcher;

/// Application state containing shared resources and dependencies.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Delivery channel for subscriber notifications.
    ///
    /// Either `LogDispatcher` or `WebhookDispatcher`, picked from configuration at startup.
    pub notifier: Arc<dyn NotificationDispatcher>,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `notifier` - Notification dispatcher
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(db: DatabaseConnection, notifier: Arc<dyn NotificationDispatcher>) -> Self {
        Self { db, notifier }
    }
}
