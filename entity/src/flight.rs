use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "flight")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
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
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::flight_subscription::Entity")]
    FlightSubscription,
    #[sea_orm(has_many = "super::flight_view_history::Entity")]
    FlightViewHistory,
}

impl Related<super::flight_subscription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FlightSubscription.def()
    }
}

impl Related<super::flight_view_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FlightViewHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
