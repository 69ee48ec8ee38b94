use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use push_platform::DynPushMessaging;

use crate::error::{PushError, PushErrorKind, Result};
use crate::services::dispatcher::EventDispatcher;

/// Owns the de-duplicated set of subscribed topic names
///
/// The local set is updated optimistically before the platform command is
/// issued, so `subscribed_topics` reflects intent immediately. When the
/// platform rejects a command the optimistic change is reverted and one
/// `Error` event is emitted per failed topic; no automatic retry.
pub struct TopicSet {
    platform: DynPushMessaging,
    dispatcher: Arc<EventDispatcher>,
    topics: Mutex<BTreeSet<String>>,
}

impl TopicSet {
    pub fn new(platform: DynPushMessaging, dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            platform,
            dispatcher,
            topics: Mutex::new(BTreeSet::new()),
        }
    }

    /// Subscribe to a single topic. Subscribing to an already-subscribed
    /// topic is a no-op success and issues no remote command.
    pub async fn subscribe(&self, topic: &str) -> Result<()> {
        let topic = validate_topic(topic)?;

        let inserted = {
            let mut topics = self.topics.lock().expect("topic set lock poisoned");
            topics.insert(topic.to_string())
        };
        if !inserted {
            debug!(topic, "already subscribed");
            return Ok(());
        }

        if let Err(err) = self.platform.subscribe_topic(topic).await {
            let message = err.to_string();
            {
                let mut topics = self.topics.lock().expect("topic set lock poisoned");
                topics.remove(topic);
            }
            warn!(topic, %message, "subscribe rejected, reverting local set");
            self.dispatcher.error(PushErrorKind::Unknown, message);
        } else {
            debug!(topic, "subscribed");
        }
        Ok(())
    }

    /// Subscribe to several topics. Input duplicates are deduplicated; an
    /// empty slice is a no-op. Validation runs over the whole input before
    /// any command is issued.
    pub async fn subscribe_many(&self, topics: &[&str]) -> Result<()> {
        let unique = validate_topics(topics)?;
        for topic in unique {
            self.subscribe(topic).await?;
        }
        Ok(())
    }

    /// Unsubscribe from a single topic. Removing a topic that is not
    /// subscribed is a no-op success.
    pub async fn unsubscribe(&self, topic: &str) -> Result<()> {
        let topic = validate_topic(topic)?;

        let removed = {
            let mut topics = self.topics.lock().expect("topic set lock poisoned");
            topics.remove(topic)
        };
        if !removed {
            debug!(topic, "not subscribed, nothing to do");
            return Ok(());
        }

        if let Err(err) = self.platform.unsubscribe_topic(topic).await {
            let message = err.to_string();
            {
                let mut topics = self.topics.lock().expect("topic set lock poisoned");
                topics.insert(topic.to_string());
            }
            warn!(topic, %message, "unsubscribe rejected, reverting local set");
            self.dispatcher.error(PushErrorKind::Unknown, message);
        } else {
            debug!(topic, "unsubscribed");
        }
        Ok(())
    }

    /// Unsubscribe from several topics.
    pub async fn unsubscribe_many(&self, topics: &[&str]) -> Result<()> {
        let unique = validate_topics(topics)?;
        for topic in unique {
            self.unsubscribe(topic).await?;
        }
        Ok(())
    }

    /// Unsubscribe from every tracked topic. Idempotent: with an empty set
    /// this does nothing and emits nothing.
    pub async fn unsubscribe_all(&self) {
        let snapshot: Vec<String> = {
            let mut topics = self.topics.lock().expect("topic set lock poisoned");
            let snapshot = topics.iter().cloned().collect();
            topics.clear();
            snapshot
        };

        for topic in snapshot {
            if let Err(err) = self.platform.unsubscribe_topic(&topic).await {
                let message = err.to_string();
                {
                    let mut topics = self.topics.lock().expect("topic set lock poisoned");
                    topics.insert(topic.clone());
                }
                warn!(topic = %topic, %message, "unsubscribe rejected, restoring topic");
                self.dispatcher.error(PushErrorKind::Unknown, message);
            }
        }
    }

    /// Ordered, stable snapshot of the subscribed topics.
    pub fn subscribed_topics(&self) -> Vec<String> {
        self.topics
            .lock()
            .expect("topic set lock poisoned")
            .iter()
            .cloned()
            .collect()
    }
}

fn validate_topic(topic: &str) -> Result<&str> {
    if topic.trim().is_empty() {
        return Err(PushError::InvalidTopic(topic.to_string()));
    }
    Ok(topic)
}

fn validate_topics<'a>(topics: &[&'a str]) -> Result<BTreeSet<&'a str>> {
    let mut unique = BTreeSet::new();
    for topic in topics {
        unique.insert(validate_topic(*topic)?);
    }
    Ok(unique)
}
