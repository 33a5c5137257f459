use super::*;

/// Tests cancelling an ACTIVE subscription, then cancelling it again.
///
/// Expected: CANCELLED both times, row still present
#[tokio::test]
async fn cancels_and_is_repeatable() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (user, flight) = factory::helpers::create_user_and_flight(db).await?;
    let active = factory::create_subscription(db, flight.id, user.id).await?;
    let repo = FlightSubscriptionRepository::new(db);

    let cancelled = repo.cancel(active.id).await?;
    assert_eq!(cancelled.status, SubscriptionStatus::Cancelled);

    let again = repo.cancel(active.id).await?;
    assert_eq!(again.status, SubscriptionStatus::Cancelled);

    let stored = repo.find_by_id(active.id).await?.unwrap();
    assert_eq!(stored.status, SubscriptionStatus::Cancelled);

    Ok(())
}

/// Tests stamping the notification timestamp.
///
/// Expected: last_notified_at set to the given instant
#[tokio::test]
async fn marks_notified() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (user, flight) = factory::helpers::create_user_and_flight(db).await?;
    let active = factory::create_subscription(db, flight.id, user.id).await?;
    let repo = FlightSubscriptionRepository::new(db);

    let at = chrono::Utc::now();
    repo.mark_notified(active.id, at).await?;

    let stored = repo.find_by_id(active.id).await?.unwrap();
    assert_eq!(
        stored.last_notified_at.map(|t| t.timestamp()),
        Some(at.timestamp())
    );

    Ok(())
}
