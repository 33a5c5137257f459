use super::*;

/// Tests unsubscribing by subscription ID without any flight parameters.
///
/// Expected: Ok with CANCELLED subscription and no ACTIVE subscriptions left
#[tokio::test]
async fn unsubscribes_by_subscription_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = as_user(factory::create_user(db).await?);
    let flight = factory::create_flight(db).await?;
    let subscription = factory::create_subscription(db, flight.id, user.id).await?;
    let dispatcher = RecordingDispatcher::default();
    let service = FlightSubscriptionService::new(db, &dispatcher);

    let details = service
        .unsubscribe(&user, UnsubscribeTarget::Subscription(subscription.id))
        .await?;

    assert_eq!(details.subscription.id, subscription.id);
    assert_eq!(details.subscription.status, SubscriptionStatus::Cancelled);
    assert!(service.get_subscriptions_by_user_id(user.id).await?.is_empty());

    Ok(())
}

/// Tests that cancelling an already cancelled subscription by ID succeeds.
///
/// Expected: Ok with the subscription still CANCELLED
#[tokio::test]
async fn unsubscribe_by_id_is_repeatable() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = as_user(factory::create_user(db).await?);
    let flight = factory::create_flight(db).await?;
    let subscription = factory::create_subscription(db, flight.id, user.id).await?;
    let dispatcher = RecordingDispatcher::default();
    let service = FlightSubscriptionService::new(db, &dispatcher);

    service
        .unsubscribe(&user, UnsubscribeTarget::Subscription(subscription.id))
        .await?;
    let again = service
        .unsubscribe(&user, UnsubscribeTarget::Subscription(subscription.id))
        .await?;

    assert_eq!(again.subscription.status, SubscriptionStatus::Cancelled);

    Ok(())
}

/// Tests unsubscribing by flight number when nothing is ACTIVE.
///
/// Expected: Err(SubscriptionError::NoActiveSubscription)
#[tokio::test]
async fn unsubscribe_by_flight_requires_active_subscription() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = as_user(factory::create_user(db).await?);
    let flight = factory::flight::create_flight_with_number(db, "SU100").await?;
    factory::flight_subscription::FlightSubscriptionFactory::new(db, flight.id, user.id)
        .status("CANCELLED")
        .build()
        .await?;
    let dispatcher = RecordingDispatcher::default();

    let result = FlightSubscriptionService::new(db, &dispatcher)
        .unsubscribe(
            &user,
            UnsubscribeTarget::Flight(FlightRef::Number("SU100".to_string())),
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::SubscriptionErr(SubscriptionError::NoActiveSubscription(ref n))) if n == "SU100"
    ));

    Ok(())
}

/// Tests unsubscribing by flight ID.
///
/// Expected: Ok with CANCELLED subscription
#[tokio::test]
async fn unsubscribes_by_flight_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = as_user(factory::create_user(db).await?);
    let flight = factory::create_flight(db).await?;
    factory::create_subscription(db, flight.id, user.id).await?;
    let dispatcher = RecordingDispatcher::default();

    let details = FlightSubscriptionService::new(db, &dispatcher)
        .unsubscribe(&user, UnsubscribeTarget::Flight(FlightRef::Id(flight.id)))
        .await?;

    assert_eq!(details.subscription.status, SubscriptionStatus::Cancelled);
    assert_eq!(details.flight.id, flight.id);

    Ok(())
}

/// Tests that a user cannot cancel someone else's subscription.
///
/// Expected: Err(SubscriptionError::SubscriptionNotFound) and the owner's row stays ACTIVE
#[tokio::test]
async fn rejects_foreign_subscription() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = as_user(factory::create_user(db).await?);
    let intruder = as_user(factory::create_user(db).await?);
    let flight = factory::create_flight(db).await?;
    let subscription = factory::create_subscription(db, flight.id, owner.id).await?;
    let dispatcher = RecordingDispatcher::default();
    let service = FlightSubscriptionService::new(db, &dispatcher);

    let result = service
        .unsubscribe(&intruder, UnsubscribeTarget::Subscription(subscription.id))
        .await;

    assert!(matches!(
        result,
        Err(AppError::SubscriptionErr(SubscriptionError::SubscriptionNotFound(id))) if id == subscription.id
    ));
    assert_eq!(service.get_subscriptions_by_user_id(owner.id).await?.len(), 1);

    Ok(())
}

/// Tests unsubscribing from an unknown subscription ID.
///
/// Expected: Err(SubscriptionError::SubscriptionNotFound)
#[tokio::test]
async fn rejects_unknown_subscription_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = as_user(factory::create_user(db).await?);
    let dispatcher = RecordingDispatcher::default();

    let result = FlightSubscriptionService::new(db, &dispatcher)
        .unsubscribe(&user, UnsubscribeTarget::Subscription(77))
        .await;

    assert!(matches!(
        result,
        Err(AppError::SubscriptionErr(SubscriptionError::SubscriptionNotFound(77)))
    ));

    Ok(())
}
