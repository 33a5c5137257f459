use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlightDto {
    pub id: i32,
    pub flight_number: String,
    pub airline: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub scheduled_departure: Option<DateTime<Utc>>,
    pub scheduled_arrival: Option<DateTime<Utc>>,
    pub estimated_departure: Option<DateTime<Utc>>,
    pub estimated_arrival: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub delay_minutes: Option<i32>,
    pub last_updated: DateTime<Utc>,
    /// Number of ACTIVE subscriptions for the flight.
    pub subscription_count: u64,
}

/// Flight fields nested inside a subscription.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlightSummaryDto {
    pub id: i32,
    pub flight_number: String,
    pub airline: String,
    pub status: Option<String>,
    pub scheduled_departure: Option<DateTime<Utc>>,
    pub scheduled_arrival: Option<DateTime<Utc>>,
    pub estimated_departure: Option<DateTime<Utc>>,
    pub estimated_arrival: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFlightStatusDto {
    /// One of SCHEDULED, ACTIVE, DELAYED, CANCELLED, DIVERTED, LANDED, ARRIVED.
    pub status: String,
    pub delay_minutes: Option<i32>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlightStatusUpdateDto {
    pub flight: FlightDto,
    /// Subscribers that received a notification for this change.
    pub notified: usize,
}

/// Query string of the flight search endpoint. Every filter is optional.
#[derive(Serialize, Deserialize, Clone, Debug, Default, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FlightSearchQuery {
    /// IATA code of the departure airport, e.g. `SVO`.
    pub departure_airport: Option<String>,
    /// IATA code of the arrival airport, e.g. `LED`.
    pub arrival_airport: Option<String>,
    /// One of SCHEDULED, ACTIVE, DELAYED, CANCELLED, DIVERTED, LANDED, ARRIVED.
    pub status: Option<String>,
}
