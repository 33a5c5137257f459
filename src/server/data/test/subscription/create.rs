use super::*;
use sea_orm::SqlErr;

/// Tests creating a subscription.
///
/// Verifies new subscriptions start ACTIVE with the default notification types.
///
/// Expected: Ok with status ACTIVE and "DELAY,CANCELLATION,STATUS_CHANGE"
#[tokio::test]
async fn creates_active_subscription_with_default_types() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (user, flight) = factory::helpers::create_user_and_flight(db).await?;

    let subscription = FlightSubscriptionRepository::new(db)
        .create(CreateSubscriptionParam {
            flight_id: flight.id,
            user_id: user.id,
            device_token: Some("tok1".to_string()),
        })
        .await?;

    assert_eq!(subscription.status, SubscriptionStatus::Active);
    assert_eq!(subscription.notification_types, NotificationTypes::default());
    assert_eq!(subscription.device_token.as_deref(), Some("tok1"));
    assert!(subscription.last_notified_at.is_none());

    Ok(())
}

/// Tests that the ACTIVE index rejects a second ACTIVE row for the same pair.
///
/// Expected: Err with SqlErr::UniqueConstraintViolation
#[tokio::test]
async fn rejects_second_active_subscription() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (user, flight) = factory::helpers::create_user_and_flight(db).await?;
    let repo = FlightSubscriptionRepository::new(db);

    let param = CreateSubscriptionParam {
        flight_id: flight.id,
        user_id: user.id,
        device_token: None,
    };
    repo.create(param.clone()).await?;
    let err = repo.create(param).await.unwrap_err();

    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));

    Ok(())
}
