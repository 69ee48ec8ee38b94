//! In-memory platform fakes shared by the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use push_platform::{NotificationCenter, PlatformError, PushMessaging};

/// Call-recording, failure-injecting stand-in for the platform SDK.
pub(crate) struct FakePlatform {
    subscribes: Mutex<Vec<String>>,
    unsubscribes: Mutex<Vec<String>>,
    registers: AtomicUsize,
    unregisters: AtomicUsize,
    group_sends: AtomicUsize,
    fail_register: Mutex<Option<String>>,
    fail_unregister: Mutex<Option<String>>,
    fail_subscribe: Mutex<Option<String>>,
    fail_unsubscribe: Mutex<Option<String>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self {
            subscribes: Mutex::new(Vec::new()),
            unsubscribes: Mutex::new(Vec::new()),
            registers: AtomicUsize::new(0),
            unregisters: AtomicUsize::new(0),
            group_sends: AtomicUsize::new(0),
            fail_register: Mutex::new(None),
            fail_unregister: Mutex::new(None),
            fail_subscribe: Mutex::new(None),
            fail_unsubscribe: Mutex::new(None),
        }
    }

    pub fn register_calls(&self) -> usize {
        self.registers.load(Ordering::SeqCst)
    }

    pub fn unregister_calls(&self) -> usize {
        self.unregisters.load(Ordering::SeqCst)
    }

    pub fn group_send_calls(&self) -> usize {
        self.group_sends.load(Ordering::SeqCst)
    }

    pub fn subscribed(&self) -> Vec<String> {
        self.subscribes.lock().unwrap().clone()
    }

    pub fn unsubscribed(&self) -> Vec<String> {
        self.unsubscribes.lock().unwrap().clone()
    }

    pub fn fail_register(&self, message: &str) {
        *self.fail_register.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_unregister(&self, message: &str) {
        *self.fail_unregister.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_subscribe(&self, message: &str) {
        *self.fail_subscribe.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_unsubscribe(&self, message: &str) {
        *self.fail_unsubscribe.lock().unwrap() = Some(message.to_string());
    }
}

#[async_trait::async_trait]
impl PushMessaging for FakePlatform {
    async fn register_device(&self) -> Result<(), PlatformError> {
        self.registers.fetch_add(1, Ordering::SeqCst);
        match self.fail_register.lock().unwrap().clone() {
            Some(message) => Err(PlatformError::Registration(message)),
            None => Ok(()),
        }
    }

    async fn unregister_device(&self) -> Result<(), PlatformError> {
        self.unregisters.fetch_add(1, Ordering::SeqCst);
        match self.fail_unregister.lock().unwrap().clone() {
            Some(message) => Err(PlatformError::Unregistration(message)),
            None => Ok(()),
        }
    }

    async fn subscribe_topic(&self, topic: &str) -> Result<(), PlatformError> {
        if let Some(message) = self.fail_subscribe.lock().unwrap().clone() {
            return Err(PlatformError::Subscribe(topic.to_string(), message));
        }
        self.subscribes.lock().unwrap().push(topic.to_string());
        Ok(())
    }

    async fn unsubscribe_topic(&self, topic: &str) -> Result<(), PlatformError> {
        if let Some(message) = self.fail_unsubscribe.lock().unwrap().clone() {
            return Err(PlatformError::Unsubscribe(topic.to_string(), message));
        }
        self.unsubscribes.lock().unwrap().push(topic.to_string());
        Ok(())
    }

    async fn send_device_group_message(
        &self,
        _parameters: HashMap<String, String>,
        _group_key: &str,
        _message_id: &str,
        _ttl_secs: u32,
    ) -> Result<(), PlatformError> {
        self.group_sends.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Call-recording stand-in for the OS notification center.
pub(crate) struct FakeNotificationCenter {
    pub commands: Mutex<Vec<String>>,
}

impl FakeNotificationCenter {
    pub fn new() -> Self {
        Self {
            commands: Mutex::new(Vec::new()),
        }
    }
}

impl NotificationCenter for FakeNotificationCenter {
    fn remove_notification(&self, id: i32) {
        self.commands.lock().unwrap().push(format!("remove:{id}"));
    }

    fn remove_tagged_notification(&self, tag: &str, id: i32) {
        self.commands
            .lock()
            .unwrap()
            .push(format!("remove:{tag}:{id}"));
    }

    fn clear_all_notifications(&self) {
        self.commands.lock().unwrap().push("clear".to_string());
    }
}
