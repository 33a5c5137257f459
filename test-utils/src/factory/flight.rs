//! Flight factory for creating test flight entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test flights with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let flight = FlightFactory::new(&db)
///     .flight_number("SU100")
///     .status(None)
///     .build()
///     .await?;
/// ```
pub struct FlightFactory<'a> {
    db: &'a DatabaseConnection,
    flight_number: String,
    airline: String,
    departure_airport: String,
    arrival_airport: String,
    scheduled_departure: DateTime<Utc>,
    status: Option<String>,
    delay_minutes: Option<i32>,
}

impl<'a> FlightFactory<'a> {
    /// Creates a new FlightFactory with default values.
    ///
    /// Defaults:
    /// - flight_number: `"TS{id}"` where id is auto-incremented
    /// - airline: `"Test Air"`, route SVO → LED
    /// - scheduled_departure: 2 hours from now, arrival 2 hours later
    /// - status: `Some("SCHEDULED")`, delay_minutes: `Some(0)`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            flight_number: format!("TS{}", id),
            airline: "Test Air".to_string(),
            departure_airport: "SVO".to_string(),
            arrival_airport: "LED".to_string(),
            scheduled_departure: Utc::now() + Duration::hours(2),
            status: Some("SCHEDULED".to_string()),
            delay_minutes: Some(0),
        }
    }

    pub fn flight_number(mut self, flight_number: impl Into<String>) -> Self {
        self.flight_number = flight_number.into();
        self
    }

    pub fn airline(mut self, airline: impl Into<String>) -> Self {
        self.airline = airline.into();
        self
    }

    /// Sets the departure and arrival airport codes.
    pub fn route(mut self, departure_airport: &str, arrival_airport: &str) -> Self {
        self.departure_airport = departure_airport.to_string();
        self.arrival_airport = arrival_airport.to_string();
        self
    }

    pub fn scheduled_departure(mut self, scheduled_departure: DateTime<Utc>) -> Self {
        self.scheduled_departure = scheduled_departure;
        self
    }

    /// Sets the flight status; `None` stores a NULL status.
    pub fn status(mut self, status: Option<&str>) -> Self {
        self.status = status.map(str::to_string);
        self
    }

    pub fn delay_minutes(mut self, delay_minutes: Option<i32>) -> Self {
        self.delay_minutes = delay_minutes;
        self
    }

    /// Builds and inserts the flight entity into the database.
    pub async fn build(self) -> Result<entity::flight::Model, DbErr> {
        entity::flight::ActiveModel {
            flight_number: ActiveValue::Set(self.flight_number),
            airline: ActiveValue::Set(self.airline),
            departure_airport: ActiveValue::Set(self.departure_airport),
            arrival_airport: ActiveValue::Set(self.arrival_airport),
            scheduled_departure: ActiveValue::Set(Some(self.scheduled_departure)),
            scheduled_arrival: ActiveValue::Set(Some(self.scheduled_departure + Duration::hours(2))),
            estimated_departure: ActiveValue::Set(None),
            estimated_arrival: ActiveValue::Set(None),
            status: ActiveValue::Set(self.status),
            delay_minutes: ActiveValue::Set(self.delay_minutes),
            last_updated: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a flight with default values.
pub async fn create_flight(db: &DatabaseConnection) -> Result<entity::flight::Model, DbErr> {
    FlightFactory::new(db).build().await
}

/// Creates a flight with a specific flight number.
pub async fn create_flight_with_number(
    db: &DatabaseConnection,
    flight_number: impl Into<String>,
) -> Result<entity::flight::Model, DbErr> {
    FlightFactory::new(db).flight_number(flight_number).build().await
}
