//! Flight domain models and parameters.
//!
//! Provides the flight domain model, the set of known flight statuses and the parameter
//! type for status updates. Statuses are stored as upper-case text and parsed at the
//! repository boundary.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use std::fmt;

use crate::{
    model::flight::{FlightDto, FlightSearchQuery, FlightSummaryDto},
    server::error::AppError,
};

/// Operational status of a flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightStatus {
    Scheduled,
    Active,
    Delayed,
    Cancelled,
    Diverted,
    Landed,
    Arrived,
}

impl FlightStatus {
    /// Stored and serialized representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::Active => "ACTIVE",
            Self::Delayed => "DELAYED",
            Self::Cancelled => "CANCELLED",
            Self::Diverted => "DIVERTED",
            Self::Landed => "LANDED",
            Self::Arrived => "ARRIVED",
        }
    }

    /// Parses a status name, ignoring surrounding whitespace and case.
    ///
    /// # Returns
    /// - `Some(FlightStatus)` - Known status
    /// - `None` - Unknown status name
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "SCHEDULED" => Some(Self::Scheduled),
            "ACTIVE" => Some(Self::Active),
            "DELAYED" => Some(Self::Delayed),
            "CANCELLED" => Some(Self::Cancelled),
            "DIVERTED" => Some(Self::Diverted),
            "LANDED" => Some(Self::Landed),
            "ARRIVED" => Some(Self::Arrived),
            _ => None,
        }
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flight record with schedule, estimates and current status.
#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    pub id: i32,
    /// Airline-assigned number such as `SU100`.
    pub flight_number: String,
    pub airline: String,
    /// IATA code of the departure airport.
    pub departure_airport: String,
    /// IATA code of the arrival airport.
    pub arrival_airport: String,
    pub scheduled_departure: Option<DateTime<Utc>>,
    pub scheduled_arrival: Option<DateTime<Utc>>,
    pub estimated_departure: Option<DateTime<Utc>>,
    pub estimated_arrival: Option<DateTime<Utc>>,
    /// `None` until an operator or feed sets a status.
    pub status: Option<FlightStatus>,
    pub delay_minutes: Option<i32>,
    pub last_updated: DateTime<Utc>,
}

impl Flight {
    /// Converts an entity model to a flight domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The flight entity from the database
    ///
    /// # Returns
    /// - `Ok(Flight)` - Converted domain model
    /// - `Err(DbErr::Custom)` - Stored status is not a known flight status
    pub fn from_entity(entity: entity::flight::Model) -> Result<Self, DbErr> {
        let status = entity
            .status
            .map(|value| {
                FlightStatus::parse(&value)
                    .ok_or_else(|| DbErr::Custom(format!("Unknown flight status '{}'", value)))
            })
            .transpose()?;

        Ok(Self {
            id: entity.id,
            flight_number: entity.flight_number,
            airline: entity.airline,
            departure_airport: entity.departure_airport,
            arrival_airport: entity.arrival_airport,
            scheduled_departure: entity.scheduled_departure,
            scheduled_arrival: entity.scheduled_arrival,
            estimated_departure: entity.estimated_departure,
            estimated_arrival: entity.estimated_arrival,
            status,
            delay_minutes: entity.delay_minutes,
            last_updated: entity.last_updated,
        })
    }

    /// Converts the flight to a DTO, attaching its active subscription count.
    pub fn into_dto(self, subscription_count: u64) -> FlightDto {
        FlightDto {
            id: self.id,
            flight_number: self.flight_number,
            airline: self.airline,
            departure_airport: self.departure_airport,
            arrival_airport: self.arrival_airport,
            scheduled_departure: self.scheduled_departure,
            scheduled_arrival: self.scheduled_arrival,
            estimated_departure: self.estimated_departure,
            estimated_arrival: self.estimated_arrival,
            status: self.status.map(|s| s.as_str().to_string()),
            delay_minutes: self.delay_minutes,
            last_updated: self.last_updated,
            subscription_count,
        }
    }

    /// Converts the flight to the summary nested inside subscription responses.
    ///
    /// A missing status stays `None` and serializes as `null`.
    pub fn into_summary_dto(self) -> FlightSummaryDto {
        FlightSummaryDto {
            id: self.id,
            flight_number: self.flight_number,
            airline: self.airline,
            status: self.status.map(|s| s.as_str().to_string()),
            scheduled_departure: self.scheduled_departure,
            scheduled_arrival: self.scheduled_arrival,
            estimated_departure: self.estimated_departure,
            estimated_arrival: self.estimated_arrival,
        }
    }
}

/// Parameters for changing a flight's status.
#[derive(Debug, Clone)]
pub struct UpdateFlightStatusParam {
    pub status: FlightStatus,
    /// New delay; `None` keeps the stored value.
    pub delay_minutes: Option<i32>,
}

/// Filters for flight search; `None` matches anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightFilter {
    pub departure_airport: Option<String>,
    pub arrival_airport: Option<String>,
    pub status: Option<FlightStatus>,
}

impl FlightFilter {
    /// Builds a filter from the search query string.
    ///
    /// Airport codes are trimmed and upper-cased; blank values are ignored.
    ///
    /// # Returns
    /// - `Ok(FlightFilter)` - Parsed filter
    /// - `Err(AppError::BadRequest)` - Unknown flight status
    pub fn from_query(query: FlightSearchQuery) -> Result<Self, AppError> {
        let airport = |code: Option<String>| {
            code.map(|c| c.trim().to_ascii_uppercase())
                .filter(|c| !c.is_empty())
        };

        let status = match query.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(FlightStatus::parse(value).ok_or_else(|| {
                AppError::BadRequest(format!("Unknown flight status '{}'", value))
            })?),
        };

        Ok(Self {
            departure_airport: airport(query.departure_airport),
            arrival_airport: airport(query.arrival_airport),
            status,
        })
    }
}

/// Parameters for inserting a flight, used when seeding demo data.
#[derive(Debug, Clone)]
pub struct CreateFlightParam {
    pub flight_number: String,
    pub airline: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub scheduled_departure: DateTime<Utc>,
    pub scheduled_arrival: DateTime<Utc>,
    pub status: FlightStatus,
}
