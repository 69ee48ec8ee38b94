use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::PlatformError;

/// Trait for the platform messaging SDK
///
/// Implemented by platform adapters (FCM on Android/Web, APNs on iOS, a
/// loopback adapter in tests). All calls are outbound commands; the
/// asynchronous outcomes of registration (token issuance, registration
/// errors) flow back through the core's inbound callback surface, not
/// through these return values.
#[async_trait::async_trait]
pub trait PushMessaging: Send + Sync {
    /// Request device registration with the platform push backend.
    ///
    /// An `Ok` return only means the request was accepted; the token (or a
    /// registration error) is delivered later via the callback surface.
    async fn register_device(&self) -> Result<(), PlatformError>;

    /// Request device unregistration.
    async fn unregister_device(&self) -> Result<(), PlatformError>;

    /// Subscribe this device to a topic.
    async fn subscribe_topic(&self, topic: &str) -> Result<(), PlatformError>;

    /// Unsubscribe this device from a topic.
    async fn unsubscribe_topic(&self, topic: &str) -> Result<(), PlatformError>;

    /// Send an upstream message to a device group.
    ///
    /// # Arguments
    /// * `parameters` - Message key/value payload
    /// * `group_key` - Notification key of the device group
    /// * `message_id` - Caller-chosen unique id for the message
    /// * `ttl_secs` - Time to live in seconds
    async fn send_device_group_message(
        &self,
        parameters: HashMap<String, String>,
        group_key: &str,
        message_id: &str,
        ttl_secs: u32,
    ) -> Result<(), PlatformError>;
}

/// Shared trait-object handle for the messaging SDK.
pub type DynPushMessaging = Arc<dyn PushMessaging>;
