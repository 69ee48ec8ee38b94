use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::PushErrorKind;
use crate::models::{DispatchEvent, EventKind, NotificationData};
use crate::services::categories::CategoryRegistry;
use crate::services::handler::{HandlerOutcome, NotificationHandler, PassThroughHandler};

/// Listener callback invoked with each matching event
pub type Listener = Arc<dyn Fn(&DispatchEvent) + Send + Sync>;

/// Handle returned by `add_listener`, used to remove the registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerToken {
    kind: EventKind,
    id: Uuid,
}

/// Payload keys checked, in order, for a stable platform message id.
const MESSAGE_ID_KEYS: &[&str] = &["gcm.message_id", "google.message_id", "message_id"];

/// In-process message deduplication over a bounded time window
///
/// Single-device counterpart of a set-if-absent-with-TTL deduplicator:
/// remembers the platform message id of each delivered message and
/// suppresses repeats until the window expires. Payloads without a stable
/// message id are let through untouched (fail open) — without an id there
/// is nothing safe to key on.
pub struct MessageDeduplicator {
    window: Duration,
    max_entries: usize,
    seen: Mutex<HashMap<String, Instant>>,
}

impl MessageDeduplicator {
    pub fn new(window: Duration, max_entries: usize) -> Self {
        Self {
            window,
            max_entries,
            seen: Mutex::new(HashMap::new()),
        }
    }

    /// Extract the platform message id from a payload, if present.
    pub fn message_id(data: &NotificationData) -> Option<String> {
        MESSAGE_ID_KEYS
            .iter()
            .find_map(|key| data.get(*key))
            .and_then(|value| match value {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }

    /// Record the payload's message id, reporting whether it was already
    /// seen inside the window.
    pub fn is_duplicate(&self, data: &NotificationData) -> bool {
        let Some(id) = Self::message_id(data) else {
            return false;
        };

        let mut seen = self.seen.lock().expect("dedup window lock poisoned");
        let now = Instant::now();
        seen.retain(|_, first_seen| now.duration_since(*first_seen) < self.window);

        if seen.contains_key(&id) {
            return true;
        }

        if seen.len() >= self.max_entries {
            // Evict the oldest entry to stay bounded.
            if let Some(oldest) = seen
                .iter()
                .min_by_key(|(_, first_seen)| **first_seen)
                .map(|(key, _)| key.clone())
            {
                seen.remove(&oldest);
            }
        }
        seen.insert(id, now);
        false
    }
}

/// Central hub converting platform callbacks into typed events
///
/// Every platform callback becomes exactly one `DispatchEvent`, delivered
/// to the listeners registered for that kind in registration order.
/// Thread-safe: registration and removal may race with emission. Emission
/// iterates a snapshot taken under the lock and invokes listeners outside
/// it, so a listener added mid-flight is picked up from the next event
/// onward and a removed listener is never invoked after removal.
pub struct EventDispatcher {
    listeners: RwLock<HashMap<EventKind, Vec<(Uuid, Listener)>>>,
    handler: RwLock<Arc<dyn NotificationHandler>>,
    categories: Arc<CategoryRegistry>,
    dedup: MessageDeduplicator,
}

impl EventDispatcher {
    pub fn new(
        dedup_window: Duration,
        dedup_max_entries: usize,
        categories: Arc<CategoryRegistry>,
    ) -> Self {
        Self {
            listeners: RwLock::new(HashMap::new()),
            handler: RwLock::new(Arc::new(PassThroughHandler)),
            categories,
            dedup: MessageDeduplicator::new(dedup_window, dedup_max_entries),
        }
    }

    /// Register a listener for one event kind.
    pub fn add_listener(&self, kind: EventKind, listener: Listener) -> ListenerToken {
        let id = Uuid::new_v4();
        let mut listeners = self
            .listeners
            .write()
            .expect("listener registry lock poisoned");
        listeners.entry(kind).or_default().push((id, listener));
        ListenerToken { kind, id }
    }

    /// Remove a previously registered listener. Returns whether it was
    /// still registered.
    pub fn remove_listener(&self, token: ListenerToken) -> bool {
        let mut listeners = self
            .listeners
            .write()
            .expect("listener registry lock poisoned");
        match listeners.get_mut(&token.kind) {
            Some(entries) => {
                let before = entries.len();
                entries.retain(|(id, _)| *id != token.id);
                entries.len() != before
            }
            None => false,
        }
    }

    /// Number of listeners currently registered for a kind.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners
            .read()
            .expect("listener registry lock poisoned")
            .get(&kind)
            .map(|entries| entries.len())
            .unwrap_or(0)
    }

    /// Install the notification handler extension point.
    pub fn set_handler(&self, handler: Arc<dyn NotificationHandler>) {
        *self.handler.write().expect("handler lock poisoned") = handler;
    }

    /// Remove the installed handler, restoring pass-through behavior.
    pub fn clear_handler(&self) {
        *self.handler.write().expect("handler lock poisoned") = Arc::new(PassThroughHandler);
    }

    /// The currently installed handler.
    pub fn handler(&self) -> Arc<dyn NotificationHandler> {
        self.handler.read().expect("handler lock poisoned").clone()
    }

    fn current_handler(&self) -> Arc<dyn NotificationHandler> {
        self.handler()
    }

    /// Inbound data message. Emits at most one `DataReceived`.
    pub fn notification_received(&self, data: NotificationData) {
        if self.dedup.is_duplicate(&data) {
            warn!(
                message_id = MessageDeduplicator::message_id(&data).as_deref(),
                "suppressing redelivered message"
            );
            return;
        }

        match self.current_handler().on_received(data) {
            HandlerOutcome::Handled => {
                debug!("inbound message consumed by notification handler");
            }
            HandlerOutcome::Forward(data) => self.emit(DispatchEvent::DataReceived { data }),
        }
    }

    /// Inbound open/action callback. The category identifier, when present,
    /// is resolved against the registry; unregistered names fall back to
    /// the default presentation.
    pub fn notification_opened(
        &self,
        data: NotificationData,
        action_id: Option<String>,
        category: Option<String>,
    ) {
        let category_kind = match category.as_deref() {
            Some(name) => match self.categories.find(name) {
                Some(registered) => registered.kind,
                None => {
                    debug!(category = name, "opened with unregistered category");
                    Default::default()
                }
            },
            None => Default::default(),
        };

        match self
            .current_handler()
            .on_opened(data, action_id.as_deref(), category_kind)
        {
            HandlerOutcome::Handled => {
                debug!("opened notification consumed by notification handler");
            }
            HandlerOutcome::Forward(data) => self.emit(DispatchEvent::Opened {
                data,
                action_id,
                category: category_kind,
            }),
        }
    }

    /// Inbound dismissal callback.
    pub fn notification_deleted(&self, data: NotificationData) {
        self.emit(DispatchEvent::Deleted { data });
    }

    /// Token issuance or replacement.
    pub fn token_refreshed(&self, token: String) {
        self.emit(DispatchEvent::TokenRefreshed { token });
    }

    /// Platform failure report.
    pub fn error(&self, kind: PushErrorKind, message: String) {
        self.current_handler().on_error(kind, &message);
        self.emit(DispatchEvent::Error { kind, message });
    }

    fn emit(&self, event: DispatchEvent) {
        let snapshot: Vec<Listener> = {
            let listeners = self
                .listeners
                .read()
                .expect("listener registry lock poisoned");
            listeners
                .get(&event.kind())
                .map(|entries| entries.iter().map(|(_, l)| l.clone()).collect())
                .unwrap_or_default()
        };

        debug!(
            kind = event.kind().as_str(),
            listeners = snapshot.len(),
            "dispatching event"
        );
        for listener in snapshot {
            listener(&event);
        }
    }
}
