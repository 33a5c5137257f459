//! Flight subscription domain models and parameters.
//!
//! A subscription records one user's interest in status changes of one flight. Status and
//! notification types are stored as text and parsed into the enums below at the
//! repository boundary. The request targets (`FlightRef`, `UnsubscribeTarget`) are built
//! from DTOs at the controller boundary so the service never sees a request without a
//! target.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use std::fmt;

use crate::{
    model::subscription::{FlightSubscriptionDto, SubscribeDto, UnsubscribeDto},
    server::{
        error::subscription::SubscriptionError,
        model::{flight::Flight, user::User},
    },
};

/// Lifecycle state of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Active,
    Cancelled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ACTIVE" => Some(Self::Active),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Kind of flight event a subscriber can opt into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Delay,
    Cancellation,
    StatusChange,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delay => "DELAY",
            Self::Cancellation => "CANCELLATION",
            Self::StatusChange => "STATUS_CHANGE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "DELAY" => Some(Self::Delay),
            "CANCELLATION" => Some(Self::Cancellation),
            "STATUS_CHANGE" => Some(Self::StatusChange),
            _ => None,
        }
    }
}

/// Ordered set of notification types without duplicates.
///
/// Stored as comma separated text, e.g. `DELAY,CANCELLATION,STATUS_CHANGE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationTypes(Vec<NotificationType>);

impl NotificationTypes {
    /// Builds a set from the given types, dropping duplicates and keeping first occurrence order.
    pub fn new(types: impl IntoIterator<Item = NotificationType>) -> Self {
        let mut unique = Vec::new();
        for notification_type in types {
            if !unique.contains(&notification_type) {
                unique.push(notification_type);
            }
        }
        Self(unique)
    }

    pub fn contains(&self, notification_type: NotificationType) -> bool {
        self.0.contains(&notification_type)
    }

    /// Parses the stored comma separated form. Empty segments are skipped.
    ///
    /// # Returns
    /// - `Some(NotificationTypes)` - Every segment named a known type
    /// - `None` - At least one segment is unknown
    pub fn parse(value: &str) -> Option<Self> {
        let types = value
            .split(',')
            .filter(|segment| !segment.trim().is_empty())
            .map(NotificationType::parse)
            .collect::<Option<Vec<_>>>()?;

        Some(Self::new(types))
    }
}

/// Every new or reactivated subscription receives all notification types.
impl Default for NotificationTypes {
    fn default() -> Self {
        Self(vec![
            NotificationType::Delay,
            NotificationType::Cancellation,
            NotificationType::StatusChange,
        ])
    }
}

impl fmt::Display for NotificationTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(NotificationType::as_str)
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&joined)
    }
}

/// Identifies a flight either by database ID or by flight number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlightRef {
    Id(i32),
    Number(String),
}

impl FlightRef {
    /// Builds a reference from optional request fields.
    ///
    /// A blank flight number counts as absent. When both are present the number wins.
    pub fn from_parts(flight_id: Option<i32>, flight_number: Option<String>) -> Option<Self> {
        match (non_blank(flight_number), flight_id) {
            (Some(number), _) => Some(Self::Number(number)),
            (None, Some(id)) => Some(Self::Id(id)),
            (None, None) => None,
        }
    }
}

impl fmt::Display for FlightRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{}", id),
            Self::Number(number) => f.write_str(number),
        }
    }
}

/// What an unsubscribe request cancels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsubscribeTarget {
    /// A specific subscription row, whatever its flight.
    Subscription(i32),
    /// The caller's ACTIVE subscription for a flight.
    Flight(FlightRef),
}

impl UnsubscribeTarget {
    /// Converts the request DTO, preferring the subscription ID over flight fields.
    ///
    /// # Returns
    /// - `Ok(UnsubscribeTarget)` - A target was identified
    /// - `Err(SubscriptionError::MissingTarget)` - No usable identifier was sent
    pub fn from_dto(dto: UnsubscribeDto) -> Result<Self, SubscriptionError> {
        if let Some(subscription_id) = dto.subscription_id {
            return Ok(Self::Subscription(subscription_id));
        }

        FlightRef::from_parts(dto.flight_id, dto.flight_number)
            .map(Self::Flight)
            .ok_or(SubscriptionError::MissingTarget)
    }
}

/// Parameters for subscribing the current user to a flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscribeParam {
    pub flight: FlightRef,
    /// Push-addressing token; blank values are normalized to `None`.
    pub device_token: Option<String>,
}

impl SubscribeParam {
    /// Converts the request DTO.
    ///
    /// # Returns
    /// - `Ok(SubscribeParam)` - A flight was identified
    /// - `Err(SubscriptionError::MissingTarget)` - Neither flight ID nor number was sent
    pub fn from_dto(dto: SubscribeDto) -> Result<Self, SubscriptionError> {
        let flight = FlightRef::from_parts(dto.flight_id, dto.flight_number)
            .ok_or(SubscriptionError::MissingTarget)?;

        Ok(Self {
            flight,
            device_token: non_blank(dto.device_token),
        })
    }
}

/// Parameters for inserting a new ACTIVE subscription.
#[derive(Debug, Clone)]
pub struct CreateSubscriptionParam {
    pub flight_id: i32,
    pub user_id: i32,
    pub device_token: Option<String>,
}

/// Stored subscription record.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightSubscription {
    pub id: i32,
    pub flight_id: i32,
    pub user_id: i32,
    pub status: SubscriptionStatus,
    pub notification_types: NotificationTypes,
    pub device_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_notified_at: Option<DateTime<Utc>>,
    pub notify_before_hours: Option<i32>,
    pub min_delay_minutes: Option<i32>,
}

impl FlightSubscription {
    /// Converts an entity model to a subscription domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(FlightSubscription)` - Converted domain model
    /// - `Err(DbErr::Custom)` - Stored status or notification types could not be parsed
    pub fn from_entity(entity: entity::flight_subscription::Model) -> Result<Self, DbErr> {
        let status = SubscriptionStatus::parse(&entity.status).ok_or_else(|| {
            DbErr::Custom(format!(
                "Unknown status '{}' on subscription {}",
                entity.status, entity.id
            ))
        })?;
        let notification_types =
            NotificationTypes::parse(&entity.notification_types).ok_or_else(|| {
                DbErr::Custom(format!(
                    "Unknown notification types '{}' on subscription {}",
                    entity.notification_types, entity.id
                ))
            })?;

        Ok(Self {
            id: entity.id,
            flight_id: entity.flight_id,
            user_id: entity.user_id,
            status,
            notification_types,
            device_token: entity.device_token,
            created_at: entity.created_at,
            last_notified_at: entity.last_notified_at,
            notify_before_hours: entity.notify_before_hours,
            min_delay_minutes: entity.min_delay_minutes,
        })
    }

    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }
}

/// Subscription joined with its flight and user, the shape every read operation returns.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightSubscriptionDetails {
    pub subscription: FlightSubscription,
    pub flight: Flight,
    pub user: User,
}

impl FlightSubscriptionDetails {
    /// Converts to the display representation returned by the API.
    pub fn into_dto(self) -> FlightSubscriptionDto {
        FlightSubscriptionDto {
            id: self.subscription.id,
            flight: self.flight.into_summary_dto(),
            user: self.user.into_summary_dto(),
            status: self.subscription.status.as_str().to_string(),
            notification_types: self.subscription.notification_types.to_string(),
            created_at: self.subscription.created_at,
            last_notified_at: self.subscription.last_notified_at,
            notify_before_hours: self.subscription.notify_before_hours,
            min_delay_minutes: self.subscription.min_delay_minutes,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
