use sea_orm_migration::prelude::*;

/// Partial unique index allowing at most one ACTIVE subscription per (flight, user).
///
/// Cancelled rows are excluded so history survives cancel/resubscribe cycles.
pub const CREATE_ACTIVE_SUBSCRIPTION_INDEX: &str = "CREATE UNIQUE INDEX IF NOT EXISTS \
    uq_flight_subscription_active ON flight_subscription (flight_id, user_id) \
    WHERE status = 'ACTIVE'";

pub const DROP_ACTIVE_SUBSCRIPTION_INDEX: &str =
    "DROP INDEX IF EXISTS uq_flight_subscription_active";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(CREATE_ACTIVE_SUBSCRIPTION_INDEX)
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(DROP_ACTIVE_SUBSCRIPTION_INDEX)
            .await?;

        Ok(())
    }
}
