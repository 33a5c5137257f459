use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20251001_000001_create_user_table::User, m20251001_000002_create_flight_table::Flight,
};

/// One history row per (user, flight); repeat views update it in place.
pub const CREATE_FLIGHT_VIEW_HISTORY_INDEX: &str = "CREATE UNIQUE INDEX IF NOT EXISTS \
    uq_flight_view_history_user_flight ON flight_view_history (user_id, flight_id)";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FlightViewHistory::Table)
                    .if_not_exists()
                    .col(pk_auto(FlightViewHistory::Id))
                    .col(integer(FlightViewHistory::UserId))
                    .col(integer(FlightViewHistory::FlightId))
                    .col(
                        timestamp(FlightViewHistory::ViewedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(integer(FlightViewHistory::ViewCount).default(1))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_flight_view_history_user_id")
                            .from(FlightViewHistory::Table, FlightViewHistory::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_flight_view_history_flight_id")
                            .from(FlightViewHistory::Table, FlightViewHistory::FlightId)
                            .to(Flight::Table, Flight::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(CREATE_FLIGHT_VIEW_HISTORY_INDEX)
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FlightViewHistory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum FlightViewHistory {
    Table,
    Id,
    UserId,
    FlightId,
    ViewedAt,
    ViewCount,
}
