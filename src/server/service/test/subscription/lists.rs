use super::*;

/// Tests listing a user's subscriptions by email.
///
/// Verifies only ACTIVE subscriptions are returned, oldest first.
///
/// Expected: Ok with the two ACTIVE subscriptions in creation order
#[tokio::test]
async fn lists_active_subscriptions_for_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::user::create_user_with_email(db, "a@x.com").await?;
    let first = factory::create_flight(db).await?;
    let second = factory::create_flight(db).await?;
    let third = factory::create_flight(db).await?;
    factory::create_subscription(db, first.id, user.id).await?;
    factory::flight_subscription::FlightSubscriptionFactory::new(db, second.id, user.id)
        .status("CANCELLED")
        .build()
        .await?;
    factory::create_subscription(db, third.id, user.id).await?;
    let dispatcher = RecordingDispatcher::default();

    let result = FlightSubscriptionService::new(db, &dispatcher)
        .get_user_subscriptions("a@x.com")
        .await?;

    let flight_ids: Vec<i32> = result.iter().map(|d| d.subscription.flight_id).collect();
    assert_eq!(flight_ids, vec![first.id, third.id]);
    assert!(result.iter().all(|d| d.user.email == "a@x.com"));

    Ok(())
}

/// Tests listing subscriptions for an email with no account.
///
/// Expected: Ok(empty)
#[tokio::test]
async fn unknown_email_lists_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let dispatcher = RecordingDispatcher::default();

    let result = FlightSubscriptionService::new(db, &dispatcher)
        .get_user_subscriptions("nobody@x.com")
        .await?;

    assert!(result.is_empty());

    Ok(())
}

/// Tests listing the ACTIVE subscriptions of a flight.
///
/// Expected: Ok with one entry per ACTIVE subscriber
#[tokio::test]
async fn lists_active_subscriptions_for_flight() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let flight = factory::flight::create_flight_with_number(db, "SU100").await?;
    let alice = factory::create_user(db).await?;
    let bob = factory::create_user(db).await?;
    let carol = factory::create_user(db).await?;
    factory::create_subscription(db, flight.id, alice.id).await?;
    factory::create_subscription(db, flight.id, bob.id).await?;
    factory::flight_subscription::FlightSubscriptionFactory::new(db, flight.id, carol.id)
        .status("CANCELLED")
        .build()
        .await?;
    let dispatcher = RecordingDispatcher::default();

    let result = FlightSubscriptionService::new(db, &dispatcher)
        .get_subscriptions_for_flight("SU100")
        .await?;

    let user_ids: Vec<i32> = result.iter().map(|d| d.user.id).collect();
    assert_eq!(user_ids, vec![alice.id, bob.id]);

    Ok(())
}

/// Tests listing subscriptions for an unknown flight number.
///
/// Expected: Ok(empty)
#[tokio::test]
async fn unknown_flight_lists_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let dispatcher = RecordingDispatcher::default();

    let result = FlightSubscriptionService::new(db, &dispatcher)
        .get_subscriptions_for_flight("XX000")
        .await?;

    assert!(result.is_empty());

    Ok(())
}
