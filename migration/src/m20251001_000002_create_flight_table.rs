use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Flight::Table)
                    .if_not_exists()
                    .col(pk_auto(Flight::Id))
                    .col(string_len_uniq(Flight::FlightNumber, 10))
                    .col(string_len(Flight::Airline, 50))
                    .col(string_len(Flight::DepartureAirport, 3))
                    .col(string_len(Flight::ArrivalAirport, 3))
                    .col(timestamp_null(Flight::ScheduledDeparture))
                    .col(timestamp_null(Flight::ScheduledArrival))
                    .col(timestamp_null(Flight::EstimatedDeparture))
                    .col(timestamp_null(Flight::EstimatedArrival))
                    .col(string_len_null(Flight::Status, 20))
                    .col(integer_null(Flight::DelayMinutes))
                    .col(
                        timestamp(Flight::LastUpdated)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Flight::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Flight {
    Table,
    Id,
    FlightNumber,
    Airline,
    DepartureAirport,
    ArrivalAirport,
    ScheduledDeparture,
    ScheduledArrival,
    EstimatedDeparture,
    EstimatedArrival,
    Status,
    DelayMinutes,
    LastUpdated,
}
