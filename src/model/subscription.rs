use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{flight::FlightSummaryDto, user::UserSummaryDto};

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlightSubscriptionDto {
    pub id: i32,
    pub flight: FlightSummaryDto,
    pub user: UserSummaryDto,
    pub status: String,
    /// Comma separated, e.g. `DELAY,CANCELLATION,STATUS_CHANGE`.
    pub notification_types: String,
    pub created_at: DateTime<Utc>,
    pub last_notified_at: Option<DateTime<Utc>>,
    pub notify_before_hours: Option<i32>,
    pub min_delay_minutes: Option<i32>,
}

/// Subscribe request. `flightNumber` wins when both identifiers are sent.
///
/// A blank `flightNumber` counts as absent, so `flightId` is used instead. A request with
/// neither identifier is rejected with 400 Bad Request.
#[derive(Serialize, Deserialize, Clone, Debug, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeDto {
    pub flight_id: Option<i32>,
    pub flight_number: Option<String>,
    pub device_token: Option<String>,
}

/// Unsubscribe request. `subscriptionId` wins over the flight identifiers.
#[derive(Serialize, Deserialize, Clone, Debug, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnsubscribeDto {
    pub subscription_id: Option<i32>,
    pub flight_id: Option<i32>,
    pub flight_number: Option<String>,
}
