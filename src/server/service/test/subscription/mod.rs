use super::{as_user, FailingDispatcher, RecordingDispatcher, Sent};
use crate::server::{
    error::{subscription::SubscriptionError, AppError},
    model::subscription::{FlightRef, SubscribeParam, SubscriptionStatus, UnsubscribeTarget},
    service::subscription::FlightSubscriptionService,
};
use test_utils::{builder::TestBuilder, factory};

mod lists;
mod subscribe;
mod unsubscribe;

fn by_number(flight_number: &str, device_token: Option<&str>) -> SubscribeParam {
    SubscribeParam {
        flight: FlightRef::Number(flight_number.to_string()),
        device_token: device_token.map(str::to_string),
    }
}
