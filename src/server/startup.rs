use std::sync::Arc;

use chrono::{Duration, Timelike, Utc};
use sea_orm::DatabaseConnection;
use time::Duration as SessionDuration;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::server::{
    config::Config,
    data::flight::FlightRepository,
    error::AppError,
    model::flight::{CreateFlightParam, FlightStatus},
    service::notification::{
        logging::LogDispatcher, webhook::WebhookDispatcher, NotificationDispatcher,
    },
};

/// Installs the global tracing subscriber.
///
/// Reads the filter from `RUST_LOG`, falling back to `info` for this crate and
/// `tower_http`.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skywatch=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the application database.
///
/// Sessions live in the same SQLite database as the application data and expire after
/// seven days of inactivity.
///
/// # Returns
/// - `Ok(SessionManagerLayer)` - Layer ready to wrap the router
/// - `Err(AppError::SqlxErr)` - Failed to create the session table
pub async fn connect_to_session(
    db: &DatabaseConnection,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());

    session_store.migrate().await?;

    let session = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(SessionDuration::days(7)));

    Ok(session)
}

/// Builds the HTTP client used by the webhook dispatcher.
///
/// Redirects are disabled so the relay URL cannot bounce requests elsewhere.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))
}

/// Picks the notification dispatcher from configuration.
///
/// # Returns
/// - `WebhookDispatcher` - When `NOTIFICATION_WEBHOOK_URL` is set
/// - `LogDispatcher` - Otherwise
pub fn setup_notifier(config: &Config) -> Result<Arc<dyn NotificationDispatcher>, AppError> {
    match &config.notification_webhook_url {
        Some(url) => {
            tracing::info!("Delivering notifications to {}", url);
            Ok(Arc::new(WebhookDispatcher::new(
                setup_reqwest_client()?,
                url.clone(),
            )))
        }
        None => {
            tracing::info!("No notification relay configured, logging notifications");
            Ok(Arc::new(LogDispatcher))
        }
    }
}

/// Inserts a small set of demo flights when the flight table is empty.
///
/// # Returns
/// - `Ok(inserted)` - Number of flights inserted, zero when flights already exist
/// - `Err(AppError::DbErr)` - Database error
pub async fn seed_demo_flights(db: &DatabaseConnection) -> Result<usize, AppError> {
    let repo = FlightRepository::new(db);

    if repo.count().await? > 0 {
        return Ok(0);
    }

    let base = Utc::now()
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or_else(Utc::now);

    let flights = [
        ("SU100", "Aeroflot", "SVO", "LED", 3, 75),
        ("SU200", "Aeroflot", "SVO", "AER", 5, 150),
        ("U6101", "Ural Airlines", "SVX", "DME", 4, 140),
        ("S7101", "S7 Airlines", "OVB", "DME", 6, 245),
    ];

    for (number, airline, from, to, departs_in_hours, duration_minutes) in flights {
        let departure = base + Duration::hours(departs_in_hours);

        repo.create(CreateFlightParam {
            flight_number: number.to_string(),
            airline: airline.to_string(),
            departure_airport: from.to_string(),
            arrival_airport: to.to_string(),
            scheduled_departure: departure,
            scheduled_arrival: departure + Duration::minutes(duration_minutes),
            status: FlightStatus::Scheduled,
        })
        .await?;
    }

    tracing::info!("Seeded {} demo flights", flights.len());

    Ok(flights.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::builder::TestBuilder;

    /// Tests that seeding fills an empty table once.
    ///
    /// Expected: four flights on the first call, none on the second
    #[tokio::test]
    async fn seeds_demo_flights_once() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::Flight)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        assert_eq!(seed_demo_flights(db).await?, 4);
        assert_eq!(seed_demo_flights(db).await?, 0);

        let su100 = FlightRepository::new(db).find_by_number("SU100").await?;
        assert_eq!(
            su100.and_then(|flight| flight.status),
            Some(FlightStatus::Scheduled)
        );

        Ok(())
    }
}
