use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20251001_000001_create_user_table::User, m20251001_000002_create_flight_table::Flight,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FlightSubscription::Table)
                    .if_not_exists()
                    .col(pk_auto(FlightSubscription::Id))
                    .col(integer(FlightSubscription::FlightId))
                    .col(integer(FlightSubscription::UserId))
                    .col(string_len(FlightSubscription::Status, 20).default("ACTIVE"))
                    .col(string(FlightSubscription::NotificationTypes))
                    .col(string_null(FlightSubscription::DeviceToken))
                    .col(
                        timestamp(FlightSubscription::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_null(FlightSubscription::LastNotifiedAt))
                    .col(integer_null(FlightSubscription::NotifyBeforeHours))
                    .col(integer_null(FlightSubscription::MinDelayMinutes))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_flight_subscription_flight_id")
                            .from(FlightSubscription::Table, FlightSubscription::FlightId)
                            .to(Flight::Table, Flight::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_flight_subscription_user_id")
                            .from(FlightSubscription::Table, FlightSubscription::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_flight_subscription_flight_user")
                    .table(FlightSubscription::Table)
                    .col(FlightSubscription::FlightId)
                    .col(FlightSubscription::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FlightSubscription::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum FlightSubscription {
    Table,
    Id,
    FlightId,
    UserId,
    Status,
    NotificationTypes,
    DeviceToken,
    CreatedAt,
    LastNotifiedAt,
    NotifyBeforeHours,
    MinDelayMinutes,
}
