pub use super::flight::Entity as Flight;
pub use super::flight_subscription::Entity as FlightSubscription;
pub use super::flight_view_history::Entity as FlightViewHistory;
pub use super::user::Entity as User;
