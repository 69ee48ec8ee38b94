use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::PushErrorKind;

/// Payload of an inbound platform message: arbitrary JSON-like key/value
/// data as delivered by the messaging backend.
pub type NotificationData = HashMap<String, serde_json::Value>;

/// Registration token issued by the platform push backend
///
/// At most one current value exists per device registration; a refresh
/// replaces the value wholesale, it never merges.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistrationToken {
    /// Opaque token value
    pub value: String,

    /// When this value was issued or last refreshed
    pub issued_at: DateTime<Utc>,
}

impl RegistrationToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            issued_at: Utc::now(),
        }
    }
}

/// Behavior of a notification action when triggered
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationActionKind {
    /// Handled in the background
    Default,
    /// Requires bringing the application to the foreground
    Foreground,
    /// Requires device authentication before running
    AuthenticationRequired,
    /// Destructive action, rendered accordingly by the OS
    Destructive,
}

impl NotificationActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationActionKind::Default => "default",
            NotificationActionKind::Foreground => "foreground",
            NotificationActionKind::AuthenticationRequired => "authentication_required",
            NotificationActionKind::Destructive => "destructive",
        }
    }
}

/// A single action a user can trigger on a notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationAction {
    /// Identifier reported back on `Opened` events
    pub id: String,

    /// Display title
    pub title: String,

    /// Behavior when triggered
    pub kind: NotificationActionKind,

    /// Optional icon resource name
    pub icon: Option<String>,
}

impl NotificationAction {
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: NotificationActionKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            icon: None,
        }
    }
}

/// Presentation type of a notification category
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationCategoryKind {
    /// Standard notification presentation
    #[default]
    Default,
    /// Custom actions shown alongside the notification
    Custom,
    /// Category that only reports dismissal
    Dismiss,
}

impl NotificationCategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationCategoryKind::Default => "default",
            NotificationCategoryKind::Custom => "custom",
            NotificationCategoryKind::Dismiss => "dismiss",
        }
    }
}

/// A named group of user notification actions
///
/// Defined once at application configuration time and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationCategory {
    /// Category identifier, unique within the registry
    pub name: String,

    /// Actions offered for notifications of this category
    pub actions: Vec<NotificationAction>,

    /// Presentation type
    pub kind: NotificationCategoryKind,
}

impl NotificationCategory {
    pub fn new(name: impl Into<String>, actions: Vec<NotificationAction>) -> Self {
        Self {
            name: name.into(),
            actions,
            kind: NotificationCategoryKind::Custom,
        }
    }
}

/// Registration lifecycle state
///
/// `Unregistered → Registering → Registered → Unregistering → Unregistered`,
/// with a `Registered` self-loop on token refresh and `Failed` reachable
/// from either in-flight state. A new register/unregister call leaves
/// `Failed` again.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum RegistrationState {
    Unregistered,
    Registering,
    Registered,
    Unregistering,
    Failed,
}

impl RegistrationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationState::Unregistered => "unregistered",
            RegistrationState::Registering => "registering",
            RegistrationState::Registered => "registered",
            RegistrationState::Unregistering => "unregistering",
            RegistrationState::Failed => "failed",
        }
    }
}

/// Event kinds a listener can subscribe to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventKind {
    Received,
    Opened,
    Deleted,
    Error,
    TokenRefreshed,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Received => "received",
            EventKind::Opened => "opened",
            EventKind::Deleted => "deleted",
            EventKind::Error => "error",
            EventKind::TokenRefreshed => "token_refreshed",
        }
    }
}

/// A typed event produced from exactly one platform callback
///
/// Immutable value object; listeners receive a shared reference and clone
/// what they keep.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DispatchEvent {
    /// A data message arrived
    DataReceived { data: NotificationData },

    /// The user opened a notification, possibly through a specific action
    Opened {
        data: NotificationData,
        /// Set only when the user triggered a specific action
        action_id: Option<String>,
        category: NotificationCategoryKind,
    },

    /// The user dismissed a notification
    Deleted { data: NotificationData },

    /// A platform failure was reported
    Error { kind: PushErrorKind, message: String },

    /// The registration token was issued or replaced
    TokenRefreshed { token: String },
}

impl DispatchEvent {
    /// Registry key this event is delivered under.
    pub fn kind(&self) -> EventKind {
        match self {
            DispatchEvent::DataReceived { .. } => EventKind::Received,
            DispatchEvent::Opened { .. } => EventKind::Opened,
            DispatchEvent::Deleted { .. } => EventKind::Deleted,
            DispatchEvent::Error { .. } => EventKind::Error,
            DispatchEvent::TokenRefreshed { .. } => EventKind::TokenRefreshed,
        }
    }
}
