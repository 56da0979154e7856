//! Folio event bus and editor notifications.
//!
//! - [`EventBus`] - in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`] - the domain event envelope published after every
//!   successful content write.
//! - [`delivery`] - external delivery channels (email).
//! - [`ContentNotifier`] - background task that emails editors when landing
//!   or partner content changes.

pub mod bus;
pub mod delivery;
pub mod notifier;

pub use bus::{EventBus, PlatformEvent};
pub use delivery::email::{EmailConfig, EmailDelivery};
pub use notifier::ContentNotifier;
