use super::*;

/// Tests that only ACTIVE rows are returned by `find_active`.
///
/// Expected: None while the pair only has a CANCELLED row, Some once an ACTIVE row exists
#[tokio::test]
async fn ignores_cancelled_subscriptions() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (user, flight) = factory::helpers::create_user_and_flight(db).await?;
    let repo = FlightSubscriptionRepository::new(db);

    factory::flight_subscription::FlightSubscriptionFactory::new(db, flight.id, user.id)
        .status("CANCELLED")
        .build()
        .await?;
    assert!(repo.find_active(flight.id, user.id).await?.is_none());

    let active = factory::create_subscription(db, flight.id, user.id).await?;
    let found = repo.find_active(flight.id, user.id).await?.unwrap();
    assert_eq!(found.id, active.id);

    Ok(())
}

/// Tests that `find_latest` returns the newest row of any status.
///
/// Expected: the most recently inserted subscription
#[tokio::test]
async fn find_latest_returns_newest_row() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (user, flight) = factory::helpers::create_user_and_flight(db).await?;

    factory::flight_subscription::FlightSubscriptionFactory::new(db, flight.id, user.id)
        .status("CANCELLED")
        .build()
        .await?;
    let newest =
        factory::flight_subscription::FlightSubscriptionFactory::new(db, flight.id, user.id)
            .status("CANCELLED")
            .build()
            .await?;

    let latest = FlightSubscriptionRepository::new(db)
        .find_latest(flight.id, user.id)
        .await?
        .unwrap();

    assert_eq!(latest.id, newest.id);
    assert_eq!(latest.status, SubscriptionStatus::Cancelled);

    Ok(())
}

/// Tests that lookups are scoped to the (flight, user) pair.
///
/// Expected: None for another user's subscription
#[tokio::test]
async fn scoped_to_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner, flight) = factory::helpers::create_user_and_flight(db).await?;
    let other = factory::create_user(db).await?;

    factory::create_subscription(db, flight.id, owner.id).await?;
    let repo = FlightSubscriptionRepository::new(db);

    assert!(repo.find_active(flight.id, other.id).await?.is_none());
    assert!(repo.find_latest(flight.id, other.id).await?.is_none());

    Ok(())
}
