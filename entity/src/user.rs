use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
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
