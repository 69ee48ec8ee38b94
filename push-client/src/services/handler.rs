use crate::error::PushErrorKind;
use crate::models::{NotificationCategoryKind, NotificationData};

/// Outcome of offering a notification to the installed handler
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerOutcome {
    /// The handler consumed the notification; default listener emission is
    /// suppressed
    Handled,
    /// Continue with default emission, carrying possibly modified data
    Forward(NotificationData),
}

/// Application-supplied hook that can intercept and customize inbound
/// notifications before default handling
///
/// Every method has a pass-through default, so an implementor overrides
/// only what it needs. When no handler is installed the dispatcher uses
/// [`PassThroughHandler`], so the pass-through path is the default rather
/// than a special case.
pub trait NotificationHandler: Send + Sync {
    /// Offered every inbound data message before `DataReceived` emission.
    fn on_received(&self, data: NotificationData) -> HandlerOutcome {
        HandlerOutcome::Forward(data)
    }

    /// Offered every opened notification or triggered action before
    /// `Opened` emission.
    fn on_opened(
        &self,
        data: NotificationData,
        _action_id: Option<&str>,
        _category: NotificationCategoryKind,
    ) -> HandlerOutcome {
        HandlerOutcome::Forward(data)
    }

    /// Observation hook for error events; cannot suppress them.
    fn on_error(&self, _kind: PushErrorKind, _message: &str) {}
}

/// Default handler installed when the application provides none
pub struct PassThroughHandler;

impl NotificationHandler for PassThroughHandler {}
