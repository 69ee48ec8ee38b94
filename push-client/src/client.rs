use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use push_platform::{DynNotificationCenter, DynPushMessaging};

use crate::config::ClientConfig;
use crate::error::{PushErrorKind, Result};
use crate::models::{
    DispatchEvent, EventKind, NotificationCategory, NotificationData, RegistrationState,
};
use crate::services::categories::CategoryRegistry;
use crate::services::dispatcher::{EventDispatcher, Listener, ListenerToken};
use crate::services::handler::NotificationHandler;
use crate::services::tokens::TokenLifecycle;
use crate::services::topics::TopicSet;

/// Unified client over the platform push subsystem
///
/// An explicitly constructed, owned instance: build one at application
/// startup and hand it (or an `Arc` of it) to whatever needs push access.
/// There is no process-wide singleton.
///
/// The `handle_*` methods form the inbound surface that platform adapters
/// call when the SDK or the OS notification center delivers a callback;
/// they are synchronous and safe to invoke from any thread. Everything
/// else is the application surface.
pub struct PushClient {
    platform: DynPushMessaging,
    notification_center: DynNotificationCenter,
    dispatcher: Arc<EventDispatcher>,
    tokens: TokenLifecycle,
    topics: TopicSet,
    categories: Arc<CategoryRegistry>,
}

impl PushClient {
    pub fn new(
        config: ClientConfig,
        platform: DynPushMessaging,
        notification_center: DynNotificationCenter,
    ) -> Self {
        let categories = Arc::new(CategoryRegistry::new());
        let dispatcher = Arc::new(EventDispatcher::new(
            Duration::from_secs(config.dedup_window_secs),
            config.dedup_max_entries,
            categories.clone(),
        ));
        let tokens = TokenLifecycle::new(platform.clone(), dispatcher.clone(), &config);
        let topics = TopicSet::new(platform.clone(), dispatcher.clone());

        info!("push client initialized");
        Self {
            platform,
            notification_center,
            dispatcher,
            tokens,
            topics,
            categories,
        }
    }

    // --- Registration lifecycle ---

    /// Request push registration on demand.
    pub async fn register_for_push(&self) {
        self.tokens.register_for_push().await;
    }

    /// Request unregistration on demand.
    pub async fn unregister_for_push(&self) {
        self.tokens.unregister_for_push().await;
    }

    /// Last known registration token.
    pub fn token(&self) -> Option<String> {
        self.tokens.token()
    }

    /// Current registration state.
    pub fn registration_state(&self) -> RegistrationState {
        self.tokens.registration_state()
    }

    /// Resolve the registration token, waiting for the platform to deliver
    /// one if necessary. See [`TokenLifecycle::get_token_async`] for the
    /// implicit-registration and bounded-wait semantics.
    pub async fn get_token_async(&self) -> Result<String> {
        self.tokens.get_token_async().await
    }

    // --- Topic management ---

    /// Subscribe to one topic.
    pub async fn subscribe(&self, topic: &str) -> Result<()> {
        self.topics.subscribe(topic).await
    }

    /// Subscribe to multiple topics.
    pub async fn subscribe_many(&self, topics: &[&str]) -> Result<()> {
        self.topics.subscribe_many(topics).await
    }

    /// Unsubscribe from one topic.
    pub async fn unsubscribe(&self, topic: &str) -> Result<()> {
        self.topics.unsubscribe(topic).await
    }

    /// Unsubscribe from multiple topics.
    pub async fn unsubscribe_many(&self, topics: &[&str]) -> Result<()> {
        self.topics.unsubscribe_many(topics).await
    }

    /// Unsubscribe from every tracked topic.
    pub async fn unsubscribe_all(&self) {
        self.topics.unsubscribe_all().await;
    }

    /// Ordered snapshot of the subscribed topics.
    pub fn subscribed_topics(&self) -> Vec<String> {
        self.topics.subscribed_topics()
    }

    // --- Categories ---

    /// Replace the set of user notification categories.
    pub fn define_categories(&self, categories: Vec<NotificationCategory>) -> Result<()> {
        self.categories.define_categories(categories)
    }

    /// Snapshot of the defined categories.
    pub fn get_categories(&self) -> Vec<NotificationCategory> {
        self.categories.get_categories()
    }

    // --- Events ---

    /// Register a listener for an event kind.
    pub fn add_listener(&self, kind: EventKind, listener: Listener) -> ListenerToken {
        self.dispatcher.add_listener(kind, listener)
    }

    /// Remove a previously registered listener.
    pub fn remove_listener(&self, token: ListenerToken) -> bool {
        self.dispatcher.remove_listener(token)
    }

    /// Listen for `DataReceived` events.
    pub fn on_notification_received<F>(&self, listener: F) -> ListenerToken
    where
        F: Fn(&DispatchEvent) + Send + Sync + 'static,
    {
        self.add_listener(EventKind::Received, Arc::new(listener))
    }

    /// Listen for `Opened` events.
    pub fn on_notification_opened<F>(&self, listener: F) -> ListenerToken
    where
        F: Fn(&DispatchEvent) + Send + Sync + 'static,
    {
        self.add_listener(EventKind::Opened, Arc::new(listener))
    }

    /// Listen for `Deleted` events.
    pub fn on_notification_deleted<F>(&self, listener: F) -> ListenerToken
    where
        F: Fn(&DispatchEvent) + Send + Sync + 'static,
    {
        self.add_listener(EventKind::Deleted, Arc::new(listener))
    }

    /// Listen for `Error` events.
    pub fn on_notification_error<F>(&self, listener: F) -> ListenerToken
    where
        F: Fn(&DispatchEvent) + Send + Sync + 'static,
    {
        self.add_listener(EventKind::Error, Arc::new(listener))
    }

    /// Listen for `TokenRefreshed` events.
    pub fn on_token_refresh<F>(&self, listener: F) -> ListenerToken
    where
        F: Fn(&DispatchEvent) + Send + Sync + 'static,
    {
        self.add_listener(EventKind::TokenRefreshed, Arc::new(listener))
    }

    /// Install the notification handler extension point.
    pub fn set_notification_handler(&self, handler: Arc<dyn NotificationHandler>) {
        self.dispatcher.set_handler(handler);
    }

    /// The currently installed notification handler.
    pub fn notification_handler(&self) -> Arc<dyn NotificationHandler> {
        self.dispatcher.handler()
    }

    /// Remove the installed handler, restoring pass-through behavior.
    pub fn clear_notification_handler(&self) {
        self.dispatcher.clear_handler();
    }

    // --- Device group messaging ---

    /// Send an upstream message to a device group. Failures are reported
    /// through the `Error` event, not returned.
    pub async fn send_device_group_message(
        &self,
        parameters: HashMap<String, String>,
        group_key: &str,
        message_id: &str,
        ttl_secs: u32,
    ) {
        if let Err(err) = self
            .platform
            .send_device_group_message(parameters, group_key, message_id, ttl_secs)
            .await
        {
            let message = err.to_string();
            warn!(group_key, message_id, %message, "device group send failed");
            self.dispatcher.error(PushErrorKind::Unknown, message);
        }
    }

    // --- Local notification management ---

    /// Remove the notification with the given id. Fire-and-forget.
    pub fn remove_notification(&self, id: i32) {
        self.notification_center.remove_notification(id);
    }

    /// Remove the notification with the given tag and id. Fire-and-forget.
    pub fn remove_tagged_notification(&self, tag: &str, id: i32) {
        self.notification_center.remove_tagged_notification(tag, id);
    }

    /// Clear every notification posted by this application.
    pub fn clear_all_notifications(&self) {
        self.notification_center.clear_all_notifications();
    }

    // --- Inbound platform surface ---

    /// Platform delivered a new or refreshed registration token.
    pub fn handle_token_refresh(&self, token: impl Into<String>) {
        self.tokens.accept_token(token.into());
    }

    /// Platform delivered a data message.
    pub fn handle_message_received(&self, data: NotificationData) {
        self.dispatcher.notification_received(data);
    }

    /// The user opened a notification, optionally through a specific
    /// action of a registered category.
    pub fn handle_notification_opened(
        &self,
        data: NotificationData,
        action_id: Option<String>,
        category: Option<String>,
    ) {
        self.dispatcher.notification_opened(data, action_id, category);
    }

    /// The user dismissed a notification.
    pub fn handle_notification_deleted(&self, data: NotificationData) {
        self.dispatcher.notification_deleted(data);
    }

    /// Platform reported a registration failure.
    pub fn handle_registration_error(&self, kind: PushErrorKind, message: impl Into<String>) {
        self.tokens.registration_failed(kind, message.into());
    }
}
