use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

use push_platform::{DynPushMessaging, PlatformError};

use crate::config::ClientConfig;
use crate::error::{PushError, PushErrorKind, Result};
use crate::models::{RegistrationState, RegistrationToken};
use crate::services::dispatcher::EventDispatcher;

/// Owns the current registration token and the registration state machine
///
/// The token value is written here and nowhere else. Registration outcomes
/// arrive asynchronously through the inbound callback surface; this
/// component converts them into events and resolves any callers suspended
/// in [`TokenLifecycle::get_token_async`].
pub struct TokenLifecycle {
    platform: DynPushMessaging,
    dispatcher: Arc<EventDispatcher>,
    state: Mutex<LifecycleState>,
    token_wait: Duration,
    auto_register: bool,
}

struct LifecycleState {
    registration: RegistrationState,
    token: Option<RegistrationToken>,
    waiters: Vec<oneshot::Sender<Result<String>>>,
}

impl TokenLifecycle {
    pub fn new(
        platform: DynPushMessaging,
        dispatcher: Arc<EventDispatcher>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            platform,
            dispatcher,
            state: Mutex::new(LifecycleState {
                registration: RegistrationState::Unregistered,
                token: None,
                waiters: Vec::new(),
            }),
            token_wait: Duration::from_secs(config.token_wait_secs),
            auto_register: config.auto_register_on_token_request,
        }
    }

    /// Request registration with the platform push backend.
    ///
    /// No meaningful return value: an immediate platform refusal becomes an
    /// `Error` event, and success is delivered later through the
    /// token-refresh callback. Calling while already registered re-requests
    /// without duplicating state.
    pub async fn register_for_push(&self) {
        {
            let mut state = self.state.lock().expect("token lifecycle lock poisoned");
            if state.registration != RegistrationState::Registered {
                state.registration = RegistrationState::Registering;
            }
        }

        info!("requesting push registration");
        if let Err(err) = self.platform.register_device().await {
            let kind = match err {
                PlatformError::PermissionDenied => PushErrorKind::PermissionDenied,
                _ => PushErrorKind::RegistrationFailed,
            };
            self.registration_failed(kind, err.to_string());
        }
    }

    /// Request unregistration. No-op while unregistered; on acknowledgment
    /// the current token is cleared.
    pub async fn unregister_for_push(&self) {
        {
            let mut state = self.state.lock().expect("token lifecycle lock poisoned");
            if state.registration == RegistrationState::Unregistered {
                debug!("unregister requested while already unregistered");
                return;
            }
            state.registration = RegistrationState::Unregistering;
        }

        info!("requesting push unregistration");
        match self.platform.unregister_device().await {
            Ok(()) => {
                let mut state = self.state.lock().expect("token lifecycle lock poisoned");
                state.registration = RegistrationState::Unregistered;
                state.token = None;
                info!("push registration cleared");
            }
            Err(err) => {
                let message = err.to_string();
                {
                    let mut state = self.state.lock().expect("token lifecycle lock poisoned");
                    state.registration = RegistrationState::Failed;
                }
                warn!(%message, "push unregistration failed");
                self.dispatcher
                    .error(PushErrorKind::UnregistrationFailed, message);
            }
        }
    }

    /// Last known token value.
    pub fn token(&self) -> Option<String> {
        self.state
            .lock()
            .expect("token lifecycle lock poisoned")
            .token
            .as_ref()
            .map(|t| t.value.clone())
    }

    /// Current registration state.
    pub fn registration_state(&self) -> RegistrationState {
        self.state
            .lock()
            .expect("token lifecycle lock poisoned")
            .registration
    }

    /// Resolve the current token, suspending until the platform delivers
    /// one if none is known yet.
    ///
    /// Called while unregistered, this triggers registration (unless
    /// disabled via `auto_register_on_token_request`). The wait is bounded
    /// by `token_wait_secs`; expiry fails with `RegistrationFailed`, so the
    /// call cannot deadlock. Dropping the returned future abandons the wait
    /// but never cancels the underlying registration attempt.
    pub async fn get_token_async(&self) -> Result<String> {
        let (needs_register, rx) = {
            let mut state = self.state.lock().expect("token lifecycle lock poisoned");
            if let Some(token) = &state.token {
                return Ok(token.value.clone());
            }
            let (tx, rx) = oneshot::channel();
            state.waiters.push(tx);
            let needs_register = self.auto_register
                && matches!(
                    state.registration,
                    RegistrationState::Unregistered | RegistrationState::Failed
                );
            (needs_register, rx)
        };

        if needs_register {
            self.register_for_push().await;
        }

        match timeout(self.token_wait, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(PushError::Registration {
                kind: PushErrorKind::RegistrationFailed,
                message: "token waiter dropped before resolution".to_string(),
            }),
            Err(_) => Err(PushError::Registration {
                kind: PushErrorKind::RegistrationFailed,
                message: format!(
                    "no registration token within {}s",
                    self.token_wait.as_secs()
                ),
            }),
        }
    }

    /// Inbound token-refresh callback: store the new value (replacing any
    /// previous one), resolve pending waiters, emit `TokenRefreshed`.
    pub fn accept_token(&self, value: String) {
        let waiters = {
            let mut state = self.state.lock().expect("token lifecycle lock poisoned");
            state.registration = RegistrationState::Registered;
            state.token = Some(RegistrationToken::new(value.clone()));
            std::mem::take(&mut state.waiters)
        };

        info!("registration token refreshed");
        for waiter in waiters {
            let _ = waiter.send(Ok(value.clone()));
        }
        self.dispatcher.token_refreshed(value);
    }

    /// Inbound registration-error callback (and the synchronous half of a
    /// refused register call): fail pending waiters and emit exactly one
    /// `Error` event.
    pub fn registration_failed(&self, kind: PushErrorKind, message: String) {
        let waiters = {
            let mut state = self.state.lock().expect("token lifecycle lock poisoned");
            state.registration = RegistrationState::Failed;
            std::mem::take(&mut state.waiters)
        };

        warn!(kind = kind.as_str(), %message, "push registration failed");
        for waiter in waiters {
            let _ = waiter.send(Err(PushError::Registration {
                kind,
                message: message.clone(),
            }));
        }
        self.dispatcher.error(kind, message);
    }
}
