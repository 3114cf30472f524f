//! Push notification adapters.
//!
//! - `push_notifier` - [`Notifier`](crate::ports::Notifier) over the token store
//! - `dispatcher` - bounded queue drained by a background delivery worker
//! - `expo` - HTTP client for the Expo push service

mod dispatcher;
mod expo;
mod push_notifier;

pub use dispatcher::{DeliveryFailure, DispatcherConfig, DispatcherHandle, NotificationDispatcher};
pub use expo::{ExpoPushGateway, EXPO_PUSH_URL};
pub use push_notifier::{PushNotifier, MAX_RECIPIENTS};
