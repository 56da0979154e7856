//! Editor notifications for landing and partner page changes.
//!
//! [`ContentNotifier`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! and emails every configured recipient when a page kind that opts in (see
//! [`PageKind::notifies_on_change`]) is written. Delivery is fire-and-forget:
//! failures are logged and never reach the writer.

use folio_core::page_kind::PageKind;
use tokio::sync::broadcast;

use crate::bus::PlatformEvent;
use crate::delivery::email::EmailDelivery;

pub struct ContentNotifier {
    delivery: EmailDelivery,
    recipients: Vec<String>,
}

impl ContentNotifier {
    pub fn new(delivery: EmailDelivery, recipients: Vec<String>) -> Self {
        Self {
            delivery,
            recipients,
        }
    }

    /// Whether an event should produce an email.
    pub fn should_notify(event: &PlatformEvent) -> bool {
        event
            .page_kind()
            .is_some_and(PageKind::notifies_on_change)
    }

    /// Run the notification loop until the bus is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if Self::should_notify(&event) {
                        self.notify(&event).await;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Content notifier lagged, some emails were not sent");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, content notifier shutting down");
                    break;
                }
            }
        }
    }

    async fn notify(&self, event: &PlatformEvent) {
        for recipient in &self.recipients {
            if let Err(e) = self.delivery.deliver(recipient, event).await {
                tracing::error!(
                    error = %e,
                    to = %recipient,
                    event_type = %event.event_type,
                    "Failed to send content notification",
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{CONTENT_UPDATED, PAGE_CREATED};

    #[test]
    fn notifies_only_for_opted_in_kinds() {
        let id = uuid::Uuid::new_v4();
        assert!(ContentNotifier::should_notify(&PlatformEvent::page(
            CONTENT_UPDATED,
            PageKind::Landing,
            id
        )));
        assert!(ContentNotifier::should_notify(&PlatformEvent::page(
            PAGE_CREATED,
            PageKind::Partner,
            id
        )));
        assert!(!ContentNotifier::should_notify(&PlatformEvent::page(
            CONTENT_UPDATED,
            PageKind::Faq,
            id
        )));
    }

    #[test]
    fn events_without_page_type_are_ignored() {
        assert!(!ContentNotifier::should_notify(&PlatformEvent::new(
            "category_type.deleted"
        )));
    }
}
