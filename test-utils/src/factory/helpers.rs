//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique identifiers in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a user and a flight, the two rows every subscription references.
///
/// # Returns
/// - `Ok((user, flight))` - Both created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_user_and_flight(
    db: &DatabaseConnection,
) -> Result<(entity::user::Model, entity::flight::Model), DbErr> {
    let user = crate::factory::user::create_user(db).await?;
    let flight = crate::factory::flight::create_flight(db).await?;

    Ok((user, flight))
}
