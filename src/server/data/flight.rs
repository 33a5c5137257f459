//! Flight data repository for database operations.
//!
//! Flights are looked up by numeric ID or by flight number. The only write paths are
//! status updates and seeding of demo data.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::flight::{
    CreateFlightParam, Flight, FlightFilter, UpdateFlightStatusParam,
};

/// Repository providing database operations for flights.
pub struct FlightRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> FlightRepository<'a, C> {
    /// Creates a new FlightRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection or an open transaction
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds a flight by its database ID.
    ///
    /// # Returns
    /// - `Ok(Some(Flight))` - Flight found
    /// - `Ok(None)` - No flight with that ID
    /// - `Err(DbErr)` - Database error or unparseable stored status
    pub async fn find_by_id(&self, flight_id: i32) -> Result<Option<Flight>, DbErr> {
        entity::prelude::Flight::find_by_id(flight_id)
            .one(self.db)
            .await?
            .map(Flight::from_entity)
            .transpose()
    }

    /// Finds a flight by its flight number, e.g. `SU100`. Matching is exact.
    ///
    /// # Returns
    /// - `Ok(Some(Flight))` - Flight found
    /// - `Ok(None)` - No flight with that number
    /// - `Err(DbErr)` - Database error or unparseable stored status
    pub async fn find_by_number(&self, flight_number: &str) -> Result<Option<Flight>, DbErr> {
        entity::prelude::Flight::find()
            .filter(entity::flight::Column::FlightNumber.eq(flight_number))
            .one(self.db)
            .await?
            .map(Flight::from_entity)
            .transpose()
    }

    /// Searches flights matching every set filter.
    ///
    /// Airport codes match exactly. Flights without a status never match a status
    /// filter.
    ///
    /// # Returns
    /// - `Ok(Vec<Flight>)` - Ordered by scheduled departure, then ID; empty when nothing
    ///   matches
    /// - `Err(DbErr)` - Database error or unparseable stored status
    pub async fn search(&self, filter: &FlightFilter) -> Result<Vec<Flight>, DbErr> {
        let mut query = entity::prelude::Flight::find();

        if let Some(departure_airport) = &filter.departure_airport {
            query = query.filter(entity::flight::Column::DepartureAirport.eq(departure_airport));
        }
        if let Some(arrival_airport) = &filter.arrival_airport {
            query = query.filter(entity::flight::Column::ArrivalAirport.eq(arrival_airport));
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::flight::Column::Status.eq(status.as_str()));
        }

        query
            .order_by_asc(entity::flight::Column::ScheduledDeparture)
            .order_by_asc(entity::flight::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Flight::from_entity)
            .collect()
    }

    /// Loads all flights with the given IDs. Unknown IDs are skipped.
    pub async fn find_by_ids(&self, flight_ids: &[i32]) -> Result<Vec<Flight>, DbErr> {
        if flight_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Flight::find()
            .filter(entity::flight::Column::Id.is_in(flight_ids.iter().copied()))
            .all(self.db)
            .await?
            .into_iter()
            .map(Flight::from_entity)
            .collect()
    }

    /// Sets a flight's status and optionally its delay, stamping `last_updated`.
    ///
    /// # Arguments
    /// - `flight_id` - ID of the flight to update
    /// - `param` - New status; a `None` delay keeps the stored value
    ///
    /// # Returns
    /// - `Ok(Flight)` - The updated flight
    /// - `Err(DbErr::RecordNotUpdated)` - No flight with that ID
    /// - `Err(DbErr)` - Other database error
    pub async fn update_status(
        &self,
        flight_id: i32,
        param: UpdateFlightStatusParam,
    ) -> Result<Flight, DbErr> {
        let delay_minutes = match param.delay_minutes {
            Some(delay) => ActiveValue::Set(Some(delay)),
            None => ActiveValue::NotSet,
        };

        let entity = entity::flight::ActiveModel {
            id: ActiveValue::Unchanged(flight_id),
            status: ActiveValue::Set(Some(param.status.as_str().to_string())),
            delay_minutes,
            last_updated: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Flight::from_entity(entity)
    }

    /// Inserts a flight with no estimates and no delay.
    pub async fn create(&self, param: CreateFlightParam) -> Result<Flight, DbErr> {
        let entity = entity::flight::ActiveModel {
            flight_number: ActiveValue::Set(param.flight_number),
            airline: ActiveValue::Set(param.airline),
            departure_airport: ActiveValue::Set(param.departure_airport),
            arrival_airport: ActiveValue::Set(param.arrival_airport),
            scheduled_departure: ActiveValue::Set(Some(param.scheduled_departure)),
            scheduled_arrival: ActiveValue::Set(Some(param.scheduled_arrival)),
            estimated_departure: ActiveValue::Set(None),
            estimated_arrival: ActiveValue::Set(None),
            status: ActiveValue::Set(Some(param.status.as_str().to_string())),
            delay_minutes: ActiveValue::Set(None),
            last_updated: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Flight::from_entity(entity)
    }

    /// Counts all stored flights.
    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Flight::find().count(self.db).await
    }
}
