use crate::server::{
    data::subscription::FlightSubscriptionRepository,
    model::subscription::{CreateSubscriptionParam, NotificationTypes, SubscriptionStatus},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod cancel;
mod create;
mod expand;
mod find_active;
mod find_active_by;
mod reactivate;
