//! Flight view history repository.
//!
//! Each (user, flight) pair owns a single row. Recording a view upserts that row,
//! bumping `view_count` and moving `viewed_at` forward.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::{Expr, ExprTrait, OnConflict},
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::server::model::flight_view::{FlightView, FlightViewDetails};

use entity::flight_view_history::Column;

pub struct FlightViewRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> FlightViewRepository<'a, C> {
    /// Creates a new FlightViewRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection or an open transaction
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records that `user_id` viewed `flight_id` at `viewed_at`.
    ///
    /// The first view inserts a row with a count of 1; later views increment the count
    /// in the same statement, so concurrent views of one flight are all counted.
    ///
    /// # Returns
    /// - `Ok(FlightView)` - The row after the upsert
    /// - `Err(DbErr)` - Database error, including foreign key violations for unknown
    ///   users or flights
    pub async fn record_view(
        &self,
        user_id: i32,
        flight_id: i32,
        viewed_at: DateTime<Utc>,
    ) -> Result<FlightView, DbErr> {
        let view = entity::flight_view_history::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            flight_id: ActiveValue::Set(flight_id),
            viewed_at: ActiveValue::Set(viewed_at),
            view_count: ActiveValue::Set(1),
            ..Default::default()
        };

        entity::prelude::FlightViewHistory::insert(view)
            .on_conflict(
                OnConflict::columns([Column::UserId, Column::FlightId])
                    .value(Column::ViewCount, Expr::col(Column::ViewCount).add(1))
                    .update_column(Column::ViewedAt)
                    .to_owned(),
            )
            .exec(self.db)
            .await?;

        self.find(user_id, flight_id).await?.ok_or_else(|| {
            DbErr::RecordNotFound(format!(
                "View of flight {} by user {}",
                flight_id, user_id
            ))
        })
    }

    /// Finds the history row for a (user, flight) pair.
    pub async fn find(&self, user_id: i32, flight_id: i32) -> Result<Option<FlightView>, DbErr> {
        Ok(entity::prelude::FlightViewHistory::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::FlightId.eq(flight_id))
            .one(self.db)
            .await?
            .map(FlightView::from_entity))
    }

    /// Gets a user's view history with the viewed flights, most recent first.
    ///
    /// # Arguments
    /// - `user_id` - Owner of the history
    /// - `limit` - Maximum number of entries; `None` returns all of them
    ///
    /// # Returns
    /// - `Ok(Vec<FlightViewDetails>)` - Ordered by `viewed_at` descending
    /// - `Err(DbErr)` - Database error or unparseable flight status
    pub async fn find_recent_by_user_id(
        &self,
        user_id: i32,
        limit: Option<u64>,
    ) -> Result<Vec<FlightViewDetails>, DbErr> {
        let mut query = entity::prelude::FlightViewHistory::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::ViewedAt)
            .order_by_desc(Column::Id)
            .find_also_related(entity::prelude::Flight);

        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        query
            .all(self.db)
            .await?
            .into_iter()
            .map(|(view, flight)| FlightViewDetails::from_entities(view, flight))
            .collect()
    }

    /// Deletes all history rows of a user.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of deleted rows
    /// - `Err(DbErr)` - Database error
    pub async fn delete_by_user_id(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::FlightViewHistory::delete_many()
            .filter(Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
