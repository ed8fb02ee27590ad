//! Request handlers

pub mod claims;
pub mod health;
pub mod journeys;
pub mod schools;

use tracing::warn;

use domain_claims::{Notification, NotificationSender};

/// Sends a notification if one is warranted
///
/// Delivery failures are logged; the change that triggered the message has
/// already been stored.
pub(crate) fn notify(sender: &dyn NotificationSender, notification: Option<Notification>) {
    let Some(notification) = notification else {
        return;
    };
    if let Err(e) = sender.send(&notification) {
        warn!(error = %e, message_type = ?notification.message_type, "Failed to send notification");
    }
}
