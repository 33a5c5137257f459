//! Flight view history domain models.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{model::flight_view::FlightViewDto, server::model::flight::Flight};

/// How often and when a user last opened a flight.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightView {
    pub id: i32,
    pub user_id: i32,
    pub flight_id: i32,
    /// Time of the most recent view.
    pub viewed_at: DateTime<Utc>,
    pub view_count: i32,
}

impl FlightView {
    pub fn from_entity(entity: entity::flight_view_history::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            flight_id: entity.flight_id,
            viewed_at: entity.viewed_at,
            view_count: entity.view_count,
        }
    }
}

/// View history entry joined with the viewed flight.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightViewDetails {
    pub view: FlightView,
    pub flight: Flight,
}

impl FlightViewDetails {
    /// Builds details from a view and its flight row.
    ///
    /// # Returns
    /// - `Ok(FlightViewDetails)` - Joined view and flight
    /// - `Err(DbErr::RecordNotFound)` - The view references a missing flight
    /// - `Err(DbErr::Custom)` - Stored flight status could not be parsed
    pub fn from_entities(
        view: entity::flight_view_history::Model,
        flight: Option<entity::flight::Model>,
    ) -> Result<Self, DbErr> {
        let flight = flight.ok_or_else(|| {
            DbErr::RecordNotFound(format!(
                "Flight {} referenced by view {}",
                view.flight_id, view.id
            ))
        })?;

        Ok(Self {
            view: FlightView::from_entity(view),
            flight: Flight::from_entity(flight)?,
        })
    }

    pub fn into_dto(self) -> FlightViewDto {
        FlightViewDto {
            id: self.view.id,
            flight: self.flight.into_summary_dto(),
            viewed_at: self.view.viewed_at,
            view_count: self.view.view_count,
        }
    }
}
