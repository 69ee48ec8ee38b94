/// Push Platform Contracts
///
/// This library defines the seams between the client push core and the
/// platform it runs on:
/// - `PushMessaging`: the platform messaging SDK (device registration,
///   topic subscription, device group messaging)
/// - `NotificationCenter`: the OS notification center (local notification
///   removal)
///
/// The core only ever talks to the platform through these traits; concrete
/// adapters are supplied by the embedding application.

pub mod center;
pub mod errors;
pub mod messaging;

pub use center::{DynNotificationCenter, NotificationCenter};
pub use errors::PlatformError;
pub use messaging::{DynPushMessaging, PushMessaging};
