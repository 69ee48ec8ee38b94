/// Push Client Core
///
/// This library presents one unified API over a device's platform-native
/// push messaging subsystem:
/// - Registration token acquisition, refresh and release
/// - De-duplicated topic subscription management
/// - Notification category and action modeling
/// - A typed event stream routing platform callbacks (message arrival,
///   token refresh, user taps, registration errors) to application
///   listeners
///
/// The actual message transport and notification rendering live behind the
/// `push-platform` traits; this crate owns the client-side lifecycle and
/// event-dispatch logic only.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use client::PushClient;
pub use config::ClientConfig;
pub use error::{PushError, PushErrorKind, Result};
pub use models::*;
pub use services::*;
