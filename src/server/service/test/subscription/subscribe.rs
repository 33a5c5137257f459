use super::*;

/// Tests subscribing to a flight by number.
///
/// Verifies the subscription is ACTIVE with default types and that a confirmation is
/// dispatched to the subscriber.
///
/// Expected: Ok with ACTIVE subscription and one confirmation
#[tokio::test]
async fn subscribes_by_flight_number() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = as_user(factory::user::create_user_with_email(db, "a@x.com").await?);
    factory::flight::create_flight_with_number(db, "SU100").await?;
    let dispatcher = RecordingDispatcher::default();

    let details = FlightSubscriptionService::new(db, &dispatcher)
        .subscribe(&user, by_number("SU100", Some("tok1")))
        .await?;

    assert_eq!(details.subscription.status, SubscriptionStatus::Active);
    assert_eq!(
        details.subscription.notification_types.to_string(),
        "DELAY,CANCELLATION,STATUS_CHANGE"
    );
    assert_eq!(details.subscription.device_token.as_deref(), Some("tok1"));
    assert_eq!(details.flight.flight_number, "SU100");

    let sent = dispatcher.sent();
    assert_eq!(sent.len(), 1);
    assert!(matches!(&sent[0], Sent::Confirmation(r) if r.email == "a@x.com"));

    Ok(())
}

/// Tests subscribing to a flight by numeric ID.
///
/// Expected: Ok with the subscription pointing at that flight
#[tokio::test]
async fn subscribes_by_flight_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = as_user(factory::create_user(db).await?);
    let flight = factory::create_flight(db).await?;
    let dispatcher = RecordingDispatcher::default();

    let details = FlightSubscriptionService::new(db, &dispatcher)
        .subscribe(
            &user,
            SubscribeParam {
                flight: FlightRef::Id(flight.id),
                device_token: None,
            },
        )
        .await?;

    assert_eq!(details.subscription.flight_id, flight.id);
    assert!(details.subscription.device_token.is_none());

    Ok(())
}

/// Tests that subscribing twice without unsubscribing is rejected.
///
/// Expected: Err(SubscriptionError::AlreadySubscribed) and still one ACTIVE row
#[tokio::test]
async fn rejects_duplicate_subscription() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = as_user(factory::create_user(db).await?);
    factory::flight::create_flight_with_number(db, "SU100").await?;
    let dispatcher = RecordingDispatcher::default();
    let service = FlightSubscriptionService::new(db, &dispatcher);

    service.subscribe(&user, by_number("SU100", None)).await?;
    let result = service.subscribe(&user, by_number("SU100", None)).await;

    assert!(matches!(
        result,
        Err(AppError::SubscriptionErr(SubscriptionError::AlreadySubscribed(ref n))) if n == "SU100"
    ));
    assert_eq!(service.get_subscriptions_by_user_id(user.id).await?.len(), 1);
    assert_eq!(dispatcher.sent().len(), 1);

    Ok(())
}

/// Tests subscribing to unknown flights.
///
/// Expected: FlightNotFound for a number, FlightIdNotFound for an ID
#[tokio::test]
async fn rejects_unknown_flight() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = as_user(factory::create_user(db).await?);
    let dispatcher = RecordingDispatcher::default();
    let service = FlightSubscriptionService::new(db, &dispatcher);

    let by_unknown_number = service.subscribe(&user, by_number("XX000", None)).await;
    let by_unknown_id = service
        .subscribe(
            &user,
            SubscribeParam {
                flight: FlightRef::Id(999),
                device_token: None,
            },
        )
        .await;

    assert!(matches!(
        by_unknown_number,
        Err(AppError::SubscriptionErr(SubscriptionError::FlightNotFound(_)))
    ));
    assert!(matches!(
        by_unknown_id,
        Err(AppError::SubscriptionErr(SubscriptionError::FlightIdNotFound(999)))
    ));
    assert!(dispatcher.sent().is_empty());

    Ok(())
}

/// Tests the full subscribe, unsubscribe, resubscribe cycle.
///
/// a@x.com subscribes to SU100 with "tok1", unsubscribes by flight number, then
/// subscribes again without a token.
///
/// Expected: same subscription ID, ACTIVE, default types, token still "tok1"
#[tokio::test]
async fn resubscribe_reactivates_same_row() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = as_user(factory::user::create_user_with_email(db, "a@x.com").await?);
    factory::flight::create_flight_with_number(db, "SU100").await?;
    let dispatcher = RecordingDispatcher::default();
    let service = FlightSubscriptionService::new(db, &dispatcher);

    let first = service
        .subscribe(&user, by_number("SU100", Some("tok1")))
        .await?;
    assert_eq!(first.subscription.status, SubscriptionStatus::Active);

    let cancelled = service
        .unsubscribe(
            &user,
            UnsubscribeTarget::Flight(FlightRef::Number("SU100".to_string())),
        )
        .await?;
    assert_eq!(cancelled.subscription.id, first.subscription.id);
    assert_eq!(cancelled.subscription.status, SubscriptionStatus::Cancelled);

    let again = service.subscribe(&user, by_number("SU100", None)).await?;

    assert_eq!(again.subscription.id, first.subscription.id);
    assert_eq!(again.subscription.status, SubscriptionStatus::Active);
    assert_eq!(
        again.subscription.notification_types.to_string(),
        "DELAY,CANCELLATION,STATUS_CHANGE"
    );
    assert_eq!(again.subscription.device_token.as_deref(), Some("tok1"));
    assert_eq!(dispatcher.sent().len(), 2);

    Ok(())
}

/// Tests that reactivation overwrites the device token when a new one is sent.
///
/// Expected: token replaced by "tok2"
#[tokio::test]
async fn resubscribe_overwrites_token_when_given() -> Result<(), AppError> {
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
        .device_token(Some("tok1"))
        .build()
        .await?;
    let dispatcher = RecordingDispatcher::default();

    let details = FlightSubscriptionService::new(db, &dispatcher)
        .subscribe(&user, by_number("SU100", Some("tok2")))
        .await?;

    assert_eq!(details.subscription.device_token.as_deref(), Some("tok2"));

    Ok(())
}

/// Tests that a failing dispatcher does not fail the subscription.
///
/// Expected: Ok with the subscription persisted
#[tokio::test]
async fn dispatch_failure_does_not_fail_subscribe() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = as_user(factory::create_user(db).await?);
    factory::flight::create_flight_with_number(db, "SU100").await?;
    let dispatcher = FailingDispatcher;
    let service = FlightSubscriptionService::new(db, &dispatcher);

    let details = service.subscribe(&user, by_number("SU100", None)).await?;

    let stored = service.get_subscriptions_by_user_id(user.id).await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].subscription.id, details.subscription.id);

    Ok(())
}

/// Tests that a caller whose account was removed cannot subscribe.
///
/// Expected: Err(SubscriptionError::UserNotFound)
#[tokio::test]
async fn rejects_unknown_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::flight::create_flight_with_number(db, "SU100").await?;
    let ghost = crate::server::model::user::User {
        id: 404,
        email: "ghost@x.com".to_string(),
        first_name: String::new(),
        last_name: String::new(),
        created_at: chrono::Utc::now(),
    };
    let dispatcher = RecordingDispatcher::default();

    let result = FlightSubscriptionService::new(db, &dispatcher)
        .subscribe(&ghost, by_number("SU100", None))
        .await;

    assert!(matches!(
        result,
        Err(AppError::SubscriptionErr(SubscriptionError::UserNotFound(_)))
    ));

    Ok(())
}
