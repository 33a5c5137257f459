pub use sea_orm_migration::prelude::*;

mod m20251001_000001_create_user_table;
mod m20251001_000002_create_flight_table;
mod m20251001_000003_create_flight_subscription_table;
mod m20251002_000004_create_active_subscription_index;
mod m20251003_000005_create_flight_view_history_table;

pub use m20251002_000004_create_active_subscription_index::{
    CREATE_ACTIVE_SUBSCRIPTION_INDEX, DROP_ACTIVE_SUBSCRIPTION_INDEX,
};
pub use m20251003_000005_create_flight_view_history_table::CREATE_FLIGHT_VIEW_HISTORY_INDEX;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_000001_create_user_table::Migration),
            Box::new(m20251001_000002_create_flight_table::Migration),
            Box::new(m20251001_000003_create_flight_subscription_table::Migration),
            Box::new(m20251002_000004_create_active_subscription_index::Migration),
            Box::new(m20251003_000005_create_flight_view_history_table::Migration),
        ]
    }
}
