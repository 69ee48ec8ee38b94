use std::sync::Arc;

/// Trait for the OS notification center
///
/// Commands here are fire-and-forget: removing a notification that no
/// longer exists is a successful no-op, so none of these calls can fail
/// the caller.
pub trait NotificationCenter: Send + Sync {
    /// Remove the notification with the given id.
    fn remove_notification(&self, id: i32);

    /// Remove the notification with the given tag and id.
    fn remove_tagged_notification(&self, tag: &str, id: i32);

    /// Clear every notification posted by this application.
    fn clear_all_notifications(&self);
}

/// Shared trait-object handle for the notification center.
pub type DynNotificationCenter = Arc<dyn NotificationCenter>;
