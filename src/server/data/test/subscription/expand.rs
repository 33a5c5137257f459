use super::*;

/// Tests joining subscriptions with their flights and users.
///
/// Expected: input order kept, each entry carries its own flight and user
#[tokio::test]
async fn expands_in_input_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::user::create_user_with_email(db, "a@x.com").await?;
    let su100 = factory::flight::create_flight_with_number(db, "SU100").await?;
    let su200 = factory::flight::create_flight_with_number(db, "SU200").await?;
    factory::create_subscription(db, su100.id, user.id).await?;
    factory::create_subscription(db, su200.id, user.id).await?;

    let repo = FlightSubscriptionRepository::new(db);
    let subscriptions = repo.find_active_by_user_id(user.id).await?;
    let details = repo.expand(subscriptions).await?;

    let numbers: Vec<&str> = details
        .iter()
        .map(|d| d.flight.flight_number.as_str())
        .collect();
    assert_eq!(numbers, vec!["SU100", "SU200"]);
    assert!(details.iter().all(|d| d.user.email == "a@x.com"));

    Ok(())
}

/// Tests the display representation of an expanded subscription.
///
/// Expected: camelCase fields, null flight status, comma separated types
#[tokio::test]
async fn renders_display_dto() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::user::create_user_with_email(db, "a@x.com").await?;
    let flight = factory::flight::FlightFactory::new(db)
        .flight_number("SU100")
        .status(None)
        .build()
        .await?;
    let created = factory::create_subscription(db, flight.id, user.id).await?;

    let repo = FlightSubscriptionRepository::new(db);
    let subscription = repo.find_by_id(created.id).await?.unwrap();
    let dto = repo.expand_one(subscription).await?.into_dto();
    let json = serde_json::to_value(&dto).unwrap();

    assert_eq!(json["flight"]["flightNumber"], "SU100");
    assert!(json["flight"]["status"].is_null());
    assert_eq!(json["user"]["email"], "a@x.com");
    assert_eq!(json["status"], "ACTIVE");
    assert_eq!(json["notificationTypes"], "DELAY,CANCELLATION,STATUS_CHANGE");
    assert!(json["lastNotifiedAt"].is_null());

    Ok(())
}

/// Tests that an empty input needs no queries and yields nothing.
///
/// Expected: Ok(empty)
#[tokio::test]
async fn expands_empty_input() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let details = FlightSubscriptionRepository::new(db).expand(Vec::new()).await?;

    assert!(details.is_empty());

    Ok(())
}
