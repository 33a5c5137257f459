use super::*;

/// Tests listing a user's ACTIVE subscriptions.
///
/// Expected: only ACTIVE rows, ascending by ID
#[tokio::test]
async fn lists_active_by_user_in_id_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let first = factory::create_flight(db).await?;
    let second = factory::create_flight(db).await?;
    let third = factory::create_flight(db).await?;

    let a = factory::create_subscription(db, first.id, user.id).await?;
    let b = factory::create_subscription(db, second.id, user.id).await?;
    factory::flight_subscription::FlightSubscriptionFactory::new(db, third.id, user.id)
        .status("CANCELLED")
        .build()
        .await?;

    let subscriptions = FlightSubscriptionRepository::new(db)
        .find_active_by_user_id(user.id)
        .await?;

    let ids: Vec<i32> = subscriptions.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);

    Ok(())
}

/// Tests listing and counting a flight's ACTIVE subscriptions.
///
/// Expected: two ACTIVE subscribers, the cancelled one excluded
#[tokio::test]
async fn lists_and_counts_active_by_flight() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let flight = factory::create_flight(db).await?;
    let anna = factory::create_user(db).await?;
    let boris = factory::create_user(db).await?;
    let clara = factory::create_user(db).await?;

    factory::create_subscription(db, flight.id, anna.id).await?;
    factory::create_subscription(db, flight.id, boris.id).await?;
    factory::flight_subscription::FlightSubscriptionFactory::new(db, flight.id, clara.id)
        .status("CANCELLED")
        .build()
        .await?;

    let repo = FlightSubscriptionRepository::new(db);
    let subscriptions = repo.find_active_by_flight_id(flight.id).await?;

    assert_eq!(subscriptions.len(), 2);
    assert!(subscriptions.iter().all(|s| s.user_id != clara.id));
    assert_eq!(repo.count_active_for_flight(flight.id).await?, 2);

    Ok(())
}

/// Tests counting ACTIVE subscriptions for several flights at once.
///
/// Expected: per-flight counts; flights without ACTIVE subscriptions are absent
#[tokio::test]
async fn counts_active_for_many_flights() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let busy = factory::create_flight(db).await?;
    let quiet = factory::create_flight(db).await?;
    let empty = factory::create_flight(db).await?;
    let anna = factory::create_user(db).await?;
    let boris = factory::create_user(db).await?;

    factory::create_subscription(db, busy.id, anna.id).await?;
    factory::create_subscription(db, busy.id, boris.id).await?;
    factory::flight_subscription::FlightSubscriptionFactory::new(db, quiet.id, anna.id)
        .status("CANCELLED")
        .build()
        .await?;

    let counts = FlightSubscriptionRepository::new(db)
        .count_active_for_flights(&[busy.id, quiet.id, empty.id])
        .await?;

    assert_eq!(counts.get(&busy.id), Some(&2));
    assert!(!counts.contains_key(&quiet.id));
    assert!(!counts.contains_key(&empty.id));

    Ok(())
}
