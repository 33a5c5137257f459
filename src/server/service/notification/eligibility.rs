//! Flight events and subscriber eligibility.
//!
//! A status update on a flight produces at most one `FlightEvent`. Each ACTIVE
//! subscription then decides on its own whether it wants that event, based on its
//! notification types and delay threshold.

use crate::server::model::{
    flight::{Flight, FlightStatus},
    subscription::{FlightSubscription, NotificationType},
};

/// Notable change between two versions of a flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightEvent {
    Cancellation,
    Delay {
        minutes: i32,
    },
    StatusChange {
        old: Option<FlightStatus>,
        new: FlightStatus,
    },
}

impl FlightEvent {
    /// Derives the event produced by moving from `previous` to `updated`.
    ///
    /// Precedence: a transition into CANCELLED is a cancellation; a transition into
    /// DELAYED or a growing positive delay is a delay; any other status transition is a
    /// status change.
    ///
    /// # Returns
    /// - `Some(FlightEvent)` - The change is worth notifying about
    /// - `None` - Nothing a subscriber cares about changed
    pub fn from_change(previous: &Flight, updated: &Flight) -> Option<Self> {
        let new_status = updated.status?;
        let status_changed = previous.status != updated.status;
        let old_delay = previous.delay_minutes.unwrap_or(0);
        let new_delay = updated.delay_minutes.unwrap_or(0);

        if new_status == FlightStatus::Cancelled {
            return status_changed.then_some(Self::Cancellation);
        }

        let entered_delayed = status_changed && new_status == FlightStatus::Delayed;
        if entered_delayed || (new_delay > 0 && new_delay > old_delay) {
            return Some(Self::Delay {
                minutes: new_delay.max(0),
            });
        }

        status_changed.then_some(Self::StatusChange {
            old: previous.status,
            new: new_status,
        })
    }

    /// Notification type a subscriber must have opted into to receive this event.
    pub fn notification_type(&self) -> NotificationType {
        match self {
            Self::Cancellation => NotificationType::Cancellation,
            Self::Delay { .. } => NotificationType::Delay,
            Self::StatusChange { .. } => NotificationType::StatusChange,
        }
    }

    /// Whether `subscription` should receive this event.
    ///
    /// Requires an ACTIVE subscription that includes the event's notification type. Delays
    /// must also be positive and reach the subscription's `min_delay_minutes` when one is
    /// set.
    /// `notify_before_hours` is not considered here.
    pub fn is_eligible(&self, subscription: &FlightSubscription) -> bool {
        if !subscription.is_active()
            || !subscription
                .notification_types
                .contains(self.notification_type())
        {
            return false;
        }

        match self {
            Self::Delay { minutes } => match subscription.min_delay_minutes {
                Some(threshold) => *minutes > 0 && *minutes >= threshold,
                None => *minutes > 0,
            },
            _ => true,
        }
    }
}
