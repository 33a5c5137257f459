use super::*;

/// Tests reactivating a cancelled subscription without a new device token.
///
/// Expected: same ID, ACTIVE, default types restored, old token kept
#[tokio::test]
async fn keeps_token_when_none_supplied() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (user, flight) = factory::helpers::create_user_and_flight(db).await?;

    let cancelled =
        factory::flight_subscription::FlightSubscriptionFactory::new(db, flight.id, user.id)
            .status("CANCELLED")
            .notification_types("DELAY")
            .device_token(Some("tok1"))
            .build()
            .await?;

    let reactivated = FlightSubscriptionRepository::new(db)
        .reactivate(cancelled.id, None)
        .await?;

    assert_eq!(reactivated.id, cancelled.id);
    assert_eq!(reactivated.status, SubscriptionStatus::Active);
    assert_eq!(reactivated.notification_types, NotificationTypes::default());
    assert_eq!(reactivated.device_token.as_deref(), Some("tok1"));

    Ok(())
}

/// Tests reactivating with a new device token.
///
/// Expected: token replaced
#[tokio::test]
async fn overwrites_token_when_supplied() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (user, flight) = factory::helpers::create_user_and_flight(db).await?;

    let cancelled =
        factory::flight_subscription::FlightSubscriptionFactory::new(db, flight.id, user.id)
            .status("CANCELLED")
            .device_token(Some("tok1"))
            .build()
            .await?;

    let reactivated = FlightSubscriptionRepository::new(db)
        .reactivate(cancelled.id, Some("tok2".to_string()))
        .await?;

    assert_eq!(reactivated.device_token.as_deref(), Some("tok2"));

    Ok(())
}
